#![no_main]
use libfuzzer_sys::fuzz_target;
use rasterdex::{BmpCodec, ImageCodec, PixelFormat};

fuzz_target!(|data: &[u8]| {
    // If arbitrary bytes decode, re-encoding and decoding again must
    // reproduce width, height and every color channel.
    let Ok(decoded) = rasterdex::decode(data, enough::Unstoppable) else {
        return;
    };

    let Ok(reencoded) = BmpCodec.write_image(&decoded, &enough::Unstoppable) else {
        return;
    };
    let Ok(decoded2) = rasterdex::decode(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.width(), decoded2.width());
    assert_eq!(decoded.height(), decoded2.height());
    // The BMP encoder always writes 32-bit ARGB, so compare in that space.
    assert_eq!(decoded.converted_to(PixelFormat::Argb), decoded2);
});
