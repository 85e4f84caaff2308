#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: BlobDecoder::decode on arbitrary bytes.
//
// Catches bugs in:
// - Header sign/magnitude handling
// - Shape width selection and shape-product overflow
// - Extra flag dispatch and length bounds
// - Separator handling between records
//
// Any successful decode must re-encode without error.
fuzz_target!(|data: &[u8]| {
    if let Ok(records) = blob_decoder::BlobDecoder::decode(data) {
        blob_encoder::encode(&records, &blob_encoder::EncodeOptions::default())
            .expect("decoded records must re-encode");
    }
});
