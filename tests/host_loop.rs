use deepfield::host::MetricsSnapshot;
use deepfield::memory::{LinearMemory, PAGE_SIZE};
use deepfield::{
    BatchDescriptor, ByteOrder, Canvas, Error, Host, HostConfig, MemoryRegion, Pixel,
    PixelDecoder, PixelEngine, RECORD_SIZE, Result, Snapshots, decode_batch, encode_batch, view,
};

/// Engine that emits a growing diagonal line, one pixel more each step.
struct Starfield {
    memory: LinearMemory,
    step: i32,
}

impl Starfield {
    fn new() -> Self {
        Self {
            memory: LinearMemory::default(),
            step: 0,
        }
    }
}

impl PixelEngine for Starfield {
    type Memory = LinearMemory;

    fn memory(&self) -> &LinearMemory {
        &self.memory
    }

    fn produce(&mut self) -> Result<BatchDescriptor> {
        self.step += 1;
        let pixels: Vec<Pixel> = (0..self.step)
            .map(|i| Pixel::new(i, -i, [u8::try_from(i % 256).unwrap(), 0, 0, 255]))
            .collect();
        let bytes = encode_batch(&pixels, ByteOrder::Little);

        // Records live after a small header the engine keeps for itself.
        let base = 64;
        self.memory.ensure_len(base + bytes.len())?;
        self.memory.write(base, &bytes)?;
        Ok(BatchDescriptor::new(base, pixels.len()))
    }
}

#[test]
fn host_decodes_every_step_in_order() {
    let config = HostConfig {
        decoder: deepfield::DecoderConfig {
            byte_order: ByteOrder::Little,
        },
        ..HostConfig::default()
    };
    let mut host = Host::with_config(Starfield::new(), Snapshots::new(), config);

    for expected in 1..=5 {
        assert_eq!(host.pump().unwrap(), expected);
    }

    let batches = host.sink().batches();
    assert_eq!(batches.len(), 5);
    for (index, batch) in batches.iter().enumerate() {
        assert_eq!(batch.len(), index + 1);
        for (i, pixel) in batch.iter().enumerate() {
            let i = i32::try_from(i).unwrap();
            assert_eq!(pixel.position(), (i, -i));
        }
    }

    assert_eq!(
        host.metrics(),
        MetricsSnapshot {
            batches: 5,
            pixels: 15,
            ..MetricsSnapshot::default()
        }
    );
}

#[test]
fn first_step_grows_empty_memory() {
    let mut host = Host::new(Starfield::new(), Snapshots::new());
    assert!(host.engine().memory().is_empty());

    host.pump().unwrap();
    assert_eq!(host.engine().memory().len(), PAGE_SIZE);
}

#[test]
fn closure_sink_receives_snapshot() {
    let mut received = Vec::new();
    {
        let mut host = Host::new(Canvas::with_demo_pixels(), |pixels: &[Pixel]| {
            received.extend_from_slice(pixels);
        });
        host.pump().unwrap();
    }

    assert_eq!(
        received,
        vec![
            Pixel::new(-1111, 101, [251, 1, 11, 201]),
            Pixel::new(222, 202, [252, 2, 22, 202]),
            Pixel::new(333, 303, [253, 3, 33, 203]),
        ]
    );
}

#[test]
fn decoded_pixels_survive_memory_growth() {
    let mut canvas = Canvas::with_demo_pixels();
    let descriptor = canvas.produce().unwrap();
    let decoded = decode_batch(canvas.memory(), descriptor.base_offset, descriptor.count).unwrap();

    // Push enough pixels that the next step has to grow memory.
    canvas.extend((0..PAGE_SIZE / RECORD_SIZE).map(|_| Pixel::default()));
    canvas.produce().unwrap();
    assert!(canvas.linear_memory().pages() > 1);

    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded[2], Pixel::new(333, 303, [253, 3, 33, 203]));
}

#[test]
fn stale_descriptor_after_shrinking_batch_still_in_bounds() {
    // Records are superseded, not erased: an old descriptor reads whatever
    // the engine wrote last at that location.
    let mut canvas = Canvas::new(ByteOrder::Native);
    canvas.extend([Pixel::new(1, 1, [1; 4]), Pixel::new(2, 2, [2; 4])]);
    let old = canvas.produce().unwrap();

    canvas.clear();
    canvas.push(Pixel::new(9, 9, [9; 4]));
    canvas.produce().unwrap();

    let pixels = decode_batch(canvas.memory(), old.base_offset, old.count).unwrap();
    assert_eq!(pixels, vec![Pixel::new(9, 9, [9; 4]), Pixel::new(2, 2, [2; 4])]);
}

#[test]
fn spec_examples() {
    // Single record at offset 100.
    let mut region = vec![0u8; 112];
    region[100..112].copy_from_slice(&Pixel::new(-5, 10, [255, 0, 128, 255]).to_record(ByteOrder::Native));
    assert_eq!(
        decode_batch(&region, 100, 1).unwrap(),
        vec![Pixel::new(-5, 10, [255, 0, 128, 255])]
    );

    // Region of 20 bytes cannot hold a record at 12.
    let small = vec![0u8; 20];
    assert!(matches!(
        decode_batch(&small, 12, 1),
        Err(Error::OutOfBounds {
            offset: 12,
            length: 12,
            region_len: 20
        })
    ));
}

#[test]
fn decoders_over_coexisting_regions() {
    let little = encode_batch(&[Pixel::new(7, 8, [1, 2, 3, 4])], ByteOrder::Little);
    let big = encode_batch(&[Pixel::new(7, 8, [1, 2, 3, 4])], ByteOrder::Big);

    let from_little = PixelDecoder::with_byte_order(ByteOrder::Little)
        .decode_batch(&little, 0, 1)
        .unwrap();
    let from_big = PixelDecoder::with_byte_order(ByteOrder::Big)
        .decode_batch(&big, 0, 1)
        .unwrap();

    assert_eq!(from_little, from_big);
    assert_eq!(view(&little, 0, RECORD_SIZE).unwrap().len(), RECORD_SIZE);
}
