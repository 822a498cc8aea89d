#![cfg(feature = "serde")]

use deepfield::{BatchDescriptor, ByteOrder, DecoderConfig, HostConfig, Pixel};

#[test]
fn pixel_serializes_as_flat_object() {
    let pixel = Pixel::new(-5, 10, [255, 0, 128, 255]);
    let json = serde_json::to_value(pixel).unwrap();

    assert_eq!(
        json,
        serde_json::json!({ "x": -5, "y": 10, "r": 255, "g": 0, "b": 128, "a": 255 })
    );
    assert_eq!(serde_json::from_value::<Pixel>(json).unwrap(), pixel);
}

#[test]
fn host_config_fills_defaults() {
    let config: HostConfig = serde_json::from_str(r#"{ "decoder": { "byte_order": "big" } }"#).unwrap();

    assert_eq!(
        config,
        HostConfig {
            decoder: DecoderConfig {
                byte_order: ByteOrder::Big,
            },
            skip_empty_batches: false,
        }
    );

    let empty: HostConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(empty.decoder.byte_order, ByteOrder::Native);
}

#[test]
fn descriptor_roundtrips() {
    let descriptor = BatchDescriptor::new(1024, 3);
    let json = serde_json::to_string(&descriptor).unwrap();
    assert_eq!(json, r#"{"base_offset":1024,"count":3}"#);
    assert_eq!(serde_json::from_str::<BatchDescriptor>(&json).unwrap(), descriptor);
}
