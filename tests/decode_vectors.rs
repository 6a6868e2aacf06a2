use slimcbor::{CborError, Decoder, ErrorCode, Length, MajorType};

fn code(err: CborError) -> ErrorCode {
    err.code
}

#[test]
fn unsigned_300() {
    let mut d = Decoder::new(&[0x19, 0x01, 0x2c]);
    assert_eq!(d.read_u16().unwrap(), 300);
    assert!(d.is_empty());
}

#[test]
fn signed_minus_1000() {
    let mut d = Decoder::new(&[0x39, 0x03, 0xe7]);
    assert_eq!(d.read_i32().unwrap(), -1000);
    assert_eq!(d.position(), 3);
}

#[test]
fn indefinite_array_of_two() {
    let mut d = Decoder::new(&[0x9f, 0x01, 0x02, 0xff]);
    assert_eq!(d.read_array_len().unwrap(), Length::Indefinite);
    assert_eq!(d.read_u8().unwrap(), 1);
    assert_eq!(d.read_u8().unwrap(), 2);
    assert!(d.peek_is_break().unwrap());
    d.read_break().unwrap();
    assert!(d.is_empty());
}

#[test]
fn next_element_walks_both_length_kinds() {
    let bytes = [0x82, 0x01, 0x02, 0xbf, 0x61, b'k', 0xf5, 0xff];
    let mut d = Decoder::new(&bytes);

    let mut remaining = d.read_array_len().unwrap();
    let mut sum = 0u32;
    while d.next_element(&mut remaining).unwrap() {
        sum += d.read_u32().unwrap();
    }
    assert_eq!(sum, 3);

    let mut remaining = d.read_map_len().unwrap();
    assert!(remaining.is_indefinite());
    let mut pairs = Vec::new();
    while d.next_element(&mut remaining).unwrap() {
        pairs.push((d.read_str().unwrap(), d.read_bool().unwrap()));
    }
    assert_eq!(pairs, [("k", true)]);
    assert!(d.is_empty());
}

#[test]
fn text_abc() {
    let mut d = Decoder::new(&[0x63, b'a', b'b', b'c']);
    assert_eq!(d.read_str().unwrap(), "abc");
}

#[test]
fn text_length_then_raw_payload() {
    let bytes = [0x63, b'a', b'b', b'c'];
    assert_eq!(Decoder::new(&bytes).read_string_len().unwrap(), 3);
    assert_eq!(Decoder::new(&bytes).read_string_raw().unwrap(), b"abc");
}

#[test]
fn invalid_utf8_is_rejected_but_raw_read_passes() {
    let bytes = [0x62, 0xc3, 0x28];
    let err = Decoder::new(&bytes).read_str().unwrap_err();
    assert_eq!(err, CborError::new(ErrorCode::Utf8Invalid, 0));
    assert_eq!(Decoder::new(&bytes).read_string_raw().unwrap(), &[0xc3, 0x28]);
}

#[test]
fn bytes_roundtrip_and_length() {
    let bytes = [0x58, 0x02, 0xde, 0xad];
    assert_eq!(Decoder::new(&bytes).read_bytes().unwrap(), &[0xde, 0xad]);
    assert_eq!(Decoder::new(&bytes).read_bytes_len().unwrap(), 2);
}

#[test]
fn indefinite_strings_are_unsupported() {
    for bytes in [[0x5f, 0xff], [0x7f, 0xff]] {
        let mut d = Decoder::new(&bytes);
        let err = if bytes[0] == 0x5f {
            d.read_bytes().unwrap_err()
        } else {
            d.read_str().unwrap_err()
        };
        assert_eq!(err, CborError::new(ErrorCode::IndefiniteStringUnsupported, 0));
    }
}

#[test]
fn half_float_is_unsupported() {
    let bytes = [0xf9, 0x3c, 0x00];
    assert_eq!(
        Decoder::new(&bytes).read_f32().unwrap_err(),
        CborError::new(ErrorCode::HalfFloatUnsupported, 0)
    );
    assert_eq!(
        code(Decoder::new(&bytes).read_f64().unwrap_err()),
        ErrorCode::HalfFloatUnsupported
    );
}

#[test]
fn f64_reader_widens_f32() {
    let mut d = Decoder::new(&[0xfa, 0x3f, 0xc0, 0x00, 0x00]);
    assert!((d.read_f64().unwrap() - 1.5).abs() < f64::EPSILON);

    let tenth = 0.1_f32;
    let mut bytes = vec![0xfa];
    bytes.extend_from_slice(&tenth.to_bits().to_be_bytes());
    assert_eq!(
        Decoder::new(&bytes).read_f64().unwrap().to_bits(),
        f64::from(tenth).to_bits()
    );
}

#[test]
fn f32_reader_rejects_f64_token() {
    let mut bytes = vec![0xfb];
    bytes.extend_from_slice(&1.0f64.to_bits().to_be_bytes());
    assert_eq!(
        Decoder::new(&bytes).read_f32().unwrap_err(),
        CborError::new(ErrorCode::ExpectedFloat, 0)
    );
    let mut d = Decoder::new(&bytes);
    assert!((d.read_f64().unwrap() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn simple_tokens() {
    let mut d = Decoder::new(&[0xf4, 0xf5, 0xf6, 0xf7]);
    assert!(!d.read_bool().unwrap());
    assert!(d.read_bool().unwrap());
    d.read_null().unwrap();
    d.read_undefined().unwrap();
    assert!(d.is_empty());

    assert_eq!(
        Decoder::new(&[0xf6]).read_bool().unwrap_err(),
        CborError::new(ErrorCode::ExpectedBool, 0)
    );
    assert_eq!(
        code(Decoder::new(&[0xf7]).read_null().unwrap_err()),
        ErrorCode::ExpectedNull
    );
    assert_eq!(
        code(Decoder::new(&[0xf6]).read_undefined().unwrap_err()),
        ErrorCode::ExpectedUndefined
    );
}

#[test]
fn peek_is_null_only_consumes_null() {
    let mut d = Decoder::new(&[0xf6, 0x05]);
    assert!(d.peek_is_null().unwrap());
    assert_eq!(d.position(), 1);
    assert!(!d.peek_is_null().unwrap());
    assert_eq!(d.position(), 1);
    assert_eq!(d.read_u8().unwrap(), 5);
    assert_eq!(code(d.peek_is_null().unwrap_err()), ErrorCode::UnexpectedEof);
}

#[test]
fn tags_report_their_id() {
    let mut d = Decoder::new(&[0xc1, 0x1a, 0x51, 0x4b, 0x67, 0xb0]);
    assert_eq!(d.read_tag().unwrap(), 1);
    assert_eq!(d.read_u32().unwrap(), 1_363_896_240);

    let mut d = Decoder::new(&[0xd8, 0x20, 0x60]);
    assert_eq!(d.read_tag().unwrap(), 32);
    assert_eq!(d.read_str().unwrap(), "");

    assert_eq!(
        Decoder::new(&[0x01]).read_tag().unwrap_err(),
        CborError::new(ErrorCode::ExpectedTag, 0)
    );
}

#[test]
fn non_minimal_widths_are_accepted() {
    assert_eq!(Decoder::new(&[0x18, 0x05]).read_u8().unwrap(), 5);
    assert_eq!(
        Decoder::new(&[0x1b, 0, 0, 0, 0, 0, 0, 0, 0x07]).read_i8().unwrap(),
        7
    );
    assert_eq!(Decoder::new(&[0x79, 0x00, 0x01, b'x']).read_str().unwrap(), "x");
    assert_eq!(
        Decoder::new(&[0x99, 0x00, 0x00]).read_array_len().unwrap(),
        Length::Definite(0)
    );
}

#[test]
fn major_type_mismatch_is_reported_at_prefix() {
    let bytes = [0x01, 0x82, 0x01, 0x02];
    let mut d = Decoder::new(&bytes);
    assert_eq!(
        d.read_str().unwrap_err(),
        CborError::new(ErrorCode::ExpectedText, 0)
    );

    let mut d = Decoder::new(&bytes[1..]);
    assert_eq!(code(d.read_map_len().unwrap_err()), ErrorCode::ExpectedMap);
    assert_eq!(
        code(Decoder::new(&[0x63]).read_array_len().unwrap_err()),
        ErrorCode::ExpectedArray
    );
    assert_eq!(
        code(Decoder::new(&[0x60]).read_bytes().unwrap_err()),
        ErrorCode::ExpectedBytes
    );
    assert_eq!(
        code(Decoder::new(&[0xf5]).read_i64().unwrap_err()),
        ErrorCode::ExpectedInteger
    );
}

#[test]
fn reserved_additional_info_is_rejected() {
    for ib in [0x1c, 0x1d, 0x1e, 0x1f] {
        assert_eq!(
            Decoder::new(&[ib]).read_u64().unwrap_err(),
            CborError::new(ErrorCode::ReservedAdditionalInfo, 0)
        );
    }
}

#[test]
fn truncated_input_reports_eof() {
    assert_eq!(
        Decoder::new(&[]).read_u8().unwrap_err(),
        CborError::new(ErrorCode::UnexpectedEof, 0)
    );
    assert_eq!(
        Decoder::new(&[0x19, 0x01]).read_u16().unwrap_err(),
        CborError::new(ErrorCode::UnexpectedEof, 1)
    );
    assert_eq!(
        Decoder::new(&[0x63, b'a']).read_str().unwrap_err(),
        CborError::new(ErrorCode::UnexpectedEof, 1)
    );
}

#[test]
fn lengths_beyond_32_bits_overflow() {
    let bytes = [0x9b, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00];
    assert_eq!(
        Decoder::new(&bytes).read_array_len().unwrap_err(),
        CborError::new(ErrorCode::LengthOverflow, 0)
    );
}

#[test]
fn peek_major_type_classifies_without_consuming() {
    let d = Decoder::new(&[0xa1, 0x00, 0x00]);
    assert_eq!(d.peek_major_type().unwrap(), MajorType::Map);
    assert_eq!(d.peek_byte().unwrap(), 0xa1);
    assert_eq!(d.position(), 0);
    assert_eq!(d.remaining(), 3);
}
