//! Every integer reader runs the same range checks, whatever the target width.

use slimcbor::{CborError, Decoder, ErrorCode};

fn uint(value: u64) -> Vec<u8> {
    let mut out = Vec::new();
    match value {
        0..=23 => out.push(u8::try_from(value).unwrap()),
        24..=0xff => out.extend_from_slice(&[0x18, u8::try_from(value).unwrap()]),
        0x100..=0xffff => {
            out.push(0x19);
            out.extend_from_slice(&u16::try_from(value).unwrap().to_be_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0x1a);
            out.extend_from_slice(&u32::try_from(value).unwrap().to_be_bytes());
        }
        _ => {
            out.push(0x1b);
            out.extend_from_slice(&value.to_be_bytes());
        }
    }
    out
}

fn nint(magnitude: u64) -> Vec<u8> {
    let mut out = uint(magnitude);
    out[0] |= 0x20;
    out
}

fn overflow(value: u64, negative: bool, bits: u32) -> ErrorCode {
    ErrorCode::IntegerOverflow {
        value,
        negative,
        bits,
    }
}

#[test]
fn unsigned_max_plus_one_overflows_at_every_width() {
    let cases: [(u64, u32); 3] = [(0x100, 8), (0x1_0000, 16), (0x1_0000_0000, 32)];
    for (value, bits) in cases {
        let bytes = uint(value);
        let err = match bits {
            8 => Decoder::new(&bytes).read_u8().map(|_| ()),
            16 => Decoder::new(&bytes).read_u16().map(|_| ()),
            _ => Decoder::new(&bytes).read_u32().map(|_| ()),
        }
        .unwrap_err();
        assert_eq!(err, CborError::new(overflow(value, false, bits), 0));

        let below = uint(value - 1);
        match bits {
            8 => assert_eq!(Decoder::new(&below).read_u8().unwrap(), u8::MAX),
            16 => assert_eq!(Decoder::new(&below).read_u16().unwrap(), u16::MAX),
            _ => assert_eq!(Decoder::new(&below).read_u32().unwrap(), u32::MAX),
        }
    }
    assert_eq!(Decoder::new(&uint(u64::MAX)).read_u64().unwrap(), u64::MAX);
}

#[test]
fn signed_positive_overflow_at_every_width() {
    let cases: [(u64, u32); 4] = [
        (0x80, 8),
        (0x8000, 16),
        (0x8000_0000, 32),
        (0x8000_0000_0000_0000, 64),
    ];
    for (value, bits) in cases {
        let bytes = uint(value);
        let mut d = Decoder::new(&bytes);
        let err = match bits {
            8 => d.read_i8().map(|_| ()),
            16 => d.read_i16().map(|_| ()),
            32 => d.read_i32().map(|_| ()),
            _ => d.read_i64().map(|_| ()),
        }
        .unwrap_err();
        assert_eq!(err.code, overflow(value, false, bits));
    }
}

#[test]
fn signed_negative_edges_at_every_width() {
    // Magnitude n encodes -1 - n: MAX fits exactly, MAX + 1 overflows.
    assert_eq!(Decoder::new(&nint(127)).read_i8().unwrap(), i8::MIN);
    assert_eq!(Decoder::new(&nint(32_767)).read_i16().unwrap(), i16::MIN);
    assert_eq!(Decoder::new(&nint(0x7fff_ffff)).read_i32().unwrap(), i32::MIN);
    assert_eq!(
        Decoder::new(&nint(0x7fff_ffff_ffff_ffff)).read_i64().unwrap(),
        i64::MIN
    );

    assert_eq!(
        Decoder::new(&nint(128)).read_i8().unwrap_err().code,
        overflow(128, true, 8)
    );
    assert_eq!(
        Decoder::new(&nint(32_768)).read_i16().unwrap_err().code,
        overflow(32_768, true, 16)
    );
    assert_eq!(
        Decoder::new(&nint(0x8000_0000)).read_i32().unwrap_err().code,
        overflow(0x8000_0000, true, 32)
    );
    assert_eq!(
        Decoder::new(&nint(u64::MAX)).read_i64().unwrap_err().code,
        overflow(u64::MAX, true, 64)
    );
}

#[test]
fn unsigned_readers_reject_negative_values() {
    let bytes = nint(0);
    assert_eq!(
        Decoder::new(&bytes).read_u8().unwrap_err(),
        CborError::new(ErrorCode::ExpectedUnsigned, 0)
    );
    assert_eq!(
        Decoder::new(&bytes).read_u64().unwrap_err().code,
        ErrorCode::ExpectedUnsigned
    );
}

#[test]
fn overflow_message_names_value_and_width() {
    let err = Decoder::new(&uint(300)).read_u8().unwrap_err();
    assert_eq!(
        err.to_string(),
        "cbor decode failed at 0: integer overflow: value = 0x12c; bits = 8"
    );

    let err = Decoder::new(&nint(200)).read_i8().unwrap_err();
    assert_eq!(
        err.to_string(),
        "cbor decode failed at 0: integer overflow: value = -1-0xc8; bits = 8"
    );
}

#[test]
fn wide_encodings_of_small_values_fit_narrow_targets() {
    let bytes = [0x1b, 0, 0, 0, 0, 0, 0, 0, 0x7f];
    assert_eq!(Decoder::new(&bytes).read_i8().unwrap(), 127);
    let bytes = [0x3a, 0, 0, 0, 0x05];
    assert_eq!(Decoder::new(&bytes).read_i16().unwrap(), -6);
}
