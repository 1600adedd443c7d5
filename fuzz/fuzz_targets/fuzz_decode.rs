#![no_main]
use libfuzzer_sys::fuzz_target;
use rasterdex::{BmpCodec, ByteCursor, ImageCodec};

fuzz_target!(|data: &[u8]| {
    // Registry dispatch over arbitrary bytes — must never panic
    let _ = rasterdex::decode(data, enough::Unstoppable);

    // Force the BMP path even when the magic is wrong — must never panic
    let _ = BmpCodec.decode_image(&mut ByteCursor::new(data), None, &enough::Unstoppable);
});
