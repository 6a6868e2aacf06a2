#![no_main]

use libfuzzer_sys::fuzz_target;

use slimcbor::{Decoder, RawCbor, SkipLimits};

fuzz_target!(|data: &[u8]| {
    let mut unbounded = Decoder::new(data);
    let unbounded_res = unbounded.skip();

    let mut bounded = Decoder::new(data);
    let bounded_res = bounded.skip_with_limits(SkipLimits::for_bytes(data.len()));

    // Limits derived from the input length never reject something the input can hold.
    match (unbounded_res, bounded_res) {
        (Ok(()), Ok(())) => assert_eq!(unbounded.position(), bounded.position()),
        (Err(a), Err(_)) => assert!(a.offset <= data.len()),
        (a, b) => panic!("bounded and unbounded skip disagree: {a:?} vs {b:?}"),
    }

    if unbounded_res.is_ok() {
        // A skipped item can be captured and re-skipped in isolation.
        let mut d = Decoder::new(data);
        let raw: RawCbor<'_> = slimcbor::CborDecode::decode(&mut d).expect("raw capture");
        let mut again = Decoder::new(raw.as_bytes());
        again.skip().expect("re-skip");
        assert!(again.is_empty());
    }
});
