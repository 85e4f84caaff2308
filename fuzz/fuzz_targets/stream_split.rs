#![no_main]

use arbitrary::Arbitrary;
use blob_decoder::{BlobDecoder, DecodeError, StreamingDecoder};
use blob_types::{ArrayData, Record};
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    blob: Vec<u8>,
    cuts: Vec<u8>,
}

// NaN never equals itself, so floats are compared by bit pattern.
fn assert_same(streamed: &[Record], expected: &[Record]) {
    assert_eq!(streamed.len(), expected.len());
    for (got, want) in streamed.iter().zip(expected) {
        assert_eq!(got.array.shape, want.array.shape);
        assert_eq!(got.extra, want.extra);
        match (&got.array.data, &want.array.data) {
            (ArrayData::F32(a), ArrayData::F32(b)) => {
                assert!(a.iter().map(|x| x.to_bits()).eq(b.iter().map(|x| x.to_bits())));
            }
            (ArrayData::F64(a), ArrayData::F64(b)) => {
                assert!(a.iter().map(|x| x.to_bits()).eq(b.iter().map(|x| x.to_bits())));
            }
            (got, want) => assert_eq!(got, want),
        }
    }
}

// Fuzz target: the streaming decoder against the one-shot decoder.
//
// The blob is cut into chunks whose sizes cycle through `cuts`. Whatever
// the cut points, the streamed records must equal the one-shot result, and
// both must fail on the same inputs.
fuzz_target!(|input: Input| {
    let sizes: Vec<usize> = input.cuts.iter().map(|&c| usize::from(c).max(1)).collect();
    let mut chunks = Vec::new();
    let mut rest = input.blob.as_slice();
    let mut cycle = sizes.iter().copied().cycle();
    while !rest.is_empty() {
        let size = cycle.next().unwrap_or(rest.len()).min(rest.len());
        chunks.push(Ok::<_, std::io::Error>(Bytes::copy_from_slice(&rest[..size])));
        rest = &rest[size..];
    }

    let mut decoder = StreamingDecoder::new(futures::stream::iter(chunks));
    let streamed: Result<Vec<_>, DecodeError> = futures::executor::block_on(async {
        let mut out = Vec::new();
        while let Some(item) = decoder.next().await {
            out.push(item?);
        }
        Ok(out)
    });

    match (BlobDecoder::decode(&input.blob), streamed) {
        (Ok(expected), Ok(records)) => assert_same(&records, &expected),
        (Err(_), Err(_)) => {}
        (one_shot, streamed) => panic!("one-shot {one_shot:?} vs streamed {streamed:?}"),
    }
});
