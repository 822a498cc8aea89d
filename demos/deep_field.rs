//! Run the reference canvas engine through a host and print what it decodes

use deepfield::{Canvas, Host, Pixel, PixelEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Deep Field Example");
    println!("==================\n");

    let mut host = Host::new(Canvas::with_demo_pixels(), |pixels: &[Pixel]| {
        for pixel in pixels {
            let [r, g, b, a] = pixel.rgba();
            println!("  ({:>6}, {:>4})  rgba({r}, {g}, {b}, {a})", pixel.x, pixel.y);
        }
    });

    let count = host.pump()?;
    println!(
        "\nDecoded {count} pixels from region {}",
        host.engine().linear_memory().id()
    );

    // A second batch with one more pixel
    host.engine_mut().push(Pixel::new(0, 0, [255, 255, 255, 255]));
    let count = host.pump()?;
    println!(
        "Decoded {count} pixels; engine memory is {} bytes",
        deepfield::MemoryRegion::len(host.engine().memory())
    );

    println!("\nMetrics: {:?}", host.metrics());

    Ok(())
}
