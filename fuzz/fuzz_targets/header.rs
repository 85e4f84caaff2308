#![no_main]

use libfuzzer_sys::fuzz_target;
use blob_wire::RecordHeader;

// Fuzz target: RecordHeader::read_from and read_shape.
//
// A header that parses must serialize back to the same two bytes, and a
// shape of the declared length must parse to `ndim` entries.
fuzz_target!(|data: &[u8]| {
    let Ok(header) = RecordHeader::read_from(data) else {
        return;
    };

    assert_eq!(header.to_bytes(), [data[0], data[1]]);

    let rest = &data[2..];
    if rest.len() >= header.shape_len() {
        let shape = header
            .read_shape(&rest[..header.shape_len()])
            .expect("shape of declared length must parse");
        assert_eq!(shape.len(), header.ndim);
    }
});
