#![no_main]

use libfuzzer_sys::fuzz_target;

use slimcbor::{encoded_len, from_slice, to_vec, CborDecode, CborEncode, MapEntries};

#[derive(Debug, PartialEq, CborEncode, CborDecode)]
enum Item {
    Int(i64),
    Text(String),
    Blob(Vec<u8>),
    Record { id: u32, label: Option<String>, children: Vec<Item> },
}

#[derive(Debug, PartialEq, CborEncode, CborDecode)]
struct Doc {
    version: u8,
    items: Vec<Item>,
    meta: MapEntries<String, i32>,
}

fuzz_target!(|data: &[u8]| {
    if let Ok(doc) = from_slice::<Doc>(data) {
        // Whatever decodes must re-encode to something that decodes to the same value.
        let out = to_vec(&doc).expect("re-encode");
        assert_eq!(encoded_len(&doc).expect("size"), out.len());
        let again: Doc = from_slice(&out).expect("decode re-encoded");
        assert_eq!(again, doc);
    }
});
