// Property-based tests for the writer, sizer, integer readers and skip.
#![cfg(feature = "alloc")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;

use slimcbor::{
    encoded_len, from_slice, to_vec, CborWrite, Decoder, Encoder, ErrorCode, Sizer, SkipLimits,
    VecSink,
};

#[derive(Debug, Clone)]
enum Node {
    Uint(u64),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Text(String),
    Bytes(Vec<u8>),
    Tag(u64, Box<Node>),
    Array(Vec<Node>),
    Map(Vec<(Node, Node)>),
}

fn arb_leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        any::<u64>().prop_map(Node::Uint),
        any::<i64>().prop_map(Node::Int),
        any::<f64>().prop_map(Node::Float),
        any::<bool>().prop_map(Node::Bool),
        Just(Node::Null),
        "[a-z]{0,40}".prop_map(Node::Text),
        proptest::collection::vec(any::<u8>(), 0..300).prop_map(Node::Bytes),
    ]
}

fn arb_node() -> impl Strategy<Value = Node> {
    arb_leaf().prop_recursive(5, 128, 12, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..12).prop_map(Node::Array),
            proptest::collection::vec((inner.clone(), inner.clone()), 0..6).prop_map(Node::Map),
            (any::<u64>(), inner).prop_map(|(tag, n)| Node::Tag(tag, Box::new(n))),
        ]
    })
}

fn write_node<W: CborWrite>(w: &mut W, node: &Node) {
    match node {
        Node::Uint(v) => w.write_u64(*v),
        Node::Int(v) => w.write_i64(*v),
        Node::Float(v) => w.write_f64(*v),
        Node::Bool(v) => w.write_bool(*v),
        Node::Null => w.write_null(),
        Node::Text(s) => w.write_str(s),
        Node::Bytes(b) => w.write_bytes(b),
        Node::Tag(tag, inner) => {
            w.write_tag(*tag);
            write_node(w, inner);
        }
        Node::Array(items) => {
            w.write_array_len(u32::try_from(items.len()).unwrap());
            for item in items {
                write_node(w, item);
            }
        }
        Node::Map(entries) => {
            w.write_map_len(u32::try_from(entries.len()).unwrap());
            for (k, v) in entries {
                write_node(w, k);
                write_node(w, v);
            }
        }
    }
}

fn encode_node(node: &Node) -> Vec<u8> {
    let mut enc = Encoder::new(VecSink::new());
    write_node(&mut enc, node);
    enc.finish().unwrap().into_vec()
}

fn size_node(node: &Node) -> usize {
    let mut sizer = Sizer::new();
    write_node(&mut sizer, node);
    sizer.len()
}

fn expected_uint_len(v: u64) -> usize {
    match v {
        0..=23 => 1,
        24..=0xff => 2,
        0x100..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    }
}

macro_rules! int_round_trip {
    ($($name:ident: $t:ty),* $(,)?) => {
        proptest! {
            $(
                #[test]
                fn $name(x in any::<$t>()) {
                    let bytes = to_vec(&x).unwrap();
                    prop_assert_eq!(from_slice::<$t>(&bytes).unwrap(), x);

                    prop_assert_eq!(encoded_len(&x).unwrap(), bytes.len());
                }
            )*
        }
    };
}

int_round_trip! {
    round_trip_u8: u8,
    round_trip_u16: u16,
    round_trip_u32: u32,
    round_trip_u64: u64,
    round_trip_i8: i8,
    round_trip_i16: i16,
    round_trip_i32: i32,
    round_trip_i64: i64,
}

proptest! {
    #[test]
    fn unsigned_encoding_is_minimal(v in any::<u64>()) {
        let bytes = to_vec(&v).unwrap();
        prop_assert_eq!(bytes.len(), expected_uint_len(v));
    }

    #[test]
    fn negative_encoding_is_minimal(v in i64::MIN..0) {
        let magnitude = u64::try_from(-1 - v).unwrap();
        let bytes = to_vec(&v).unwrap();
        prop_assert_eq!(bytes.len(), expected_uint_len(magnitude));
        prop_assert_eq!(bytes[0] & 0xe0, 0x20);
    }

    #[test]
    fn narrower_reads_overflow_exactly_when_out_of_range(v in any::<u64>()) {
        let bytes = to_vec(&v).unwrap();
        let fits = u16::try_from(v).is_ok();
        match Decoder::new(&bytes).read_u16() {
            Ok(got) => {
                prop_assert!(fits);
                prop_assert_eq!(u64::from(got), v);
            }
            Err(err) => {
                prop_assert!(!fits);
                prop_assert_eq!(
                    err.code,
                    ErrorCode::IntegerOverflow { value: v, negative: false, bits: 16 }
                );
            }
        }
    }

    #[test]
    fn f64_round_trips_bit_exact(v in any::<f64>()) {
        let bytes = to_vec(&v).unwrap();
        prop_assert_eq!(bytes.len(), 9);
        prop_assert_eq!(from_slice::<f64>(&bytes).unwrap().to_bits(), v.to_bits());
    }

    #[test]
    fn sizer_matches_encoder(node in arb_node()) {
        prop_assert_eq!(size_node(&node), encode_node(&node).len());
    }

    #[test]
    fn skip_consumes_exactly_one_value(
        node in arb_node(),
        tail in proptest::collection::vec(any::<u8>(), 0..8),
    ) {
        let mut bytes = encode_node(&node);
        let len = bytes.len();
        bytes.extend_from_slice(&tail);

        let mut d = Decoder::new(&bytes);
        d.skip().unwrap();
        prop_assert_eq!(d.position(), len);

        let mut d = Decoder::new(&bytes);
        d.skip_with_limits(SkipLimits::for_bytes(bytes.len())).unwrap();
        prop_assert_eq!(d.position(), len);
    }

    #[test]
    fn skip_handles_an_outer_indefinite_array(items in proptest::collection::vec(arb_node(), 0..6)) {
        let mut enc = Encoder::new(VecSink::new());
        enc.write_array_indefinite();
        for item in &items {
            write_node(&mut enc, item);
        }
        enc.write_break();
        let bytes = enc.finish().unwrap().into_vec();

        let mut d = Decoder::new(&bytes);
        d.skip().unwrap();
        prop_assert!(d.is_empty());
    }

    #[test]
    fn skip_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut d = Decoder::new(&bytes);
        if d.skip().is_ok() {
            prop_assert!(d.position() <= bytes.len());
        }
        let mut d = Decoder::new(&bytes);
        let _ = d.skip_with_limits(SkipLimits::for_bytes(bytes.len()));
    }
}
