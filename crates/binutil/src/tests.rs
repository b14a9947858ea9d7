use std::io::Cursor;

use proptest::prelude::*;

use crate::{
    INT31_MAX, Int31, SliceSource, Varint, VarintError, VarintReader, decode_buf_exact,
    encode_to_vec, get_int31, get_int64, read_int31, read_int64, write_int31, write_int64,
};

#[test]
fn test_decode_buf_exact() {
    let buf = encode_to_vec(&-300i64).unwrap();
    assert_eq!(decode_buf_exact::<i64>(&buf).unwrap(), -300);

    let mut long = buf.clone();
    long.extend([0, 0]);
    assert!(matches!(
        decode_buf_exact::<i64>(&long),
        Err(VarintError::ExtraInput(2))
    ));

    assert!(matches!(
        decode_buf_exact::<Int31>(&[]),
        Err(VarintError::NoData)
    ));
}

#[test]
fn test_encode_to_vec_lengths() {
    for v in [0u32, 127, 128, INT31_MAX] {
        let i = Int31::new(v).unwrap();
        assert_eq!(encode_to_vec(&i).unwrap().len(), i.encoded_len());
    }
    for v in [0i64, -64, i64::MIN] {
        assert_eq!(encode_to_vec(&v).unwrap().len(), v.encoded_len());
    }
}

#[test]
fn test_slice_source_back_to_back() {
    let mut buf = Vec::new();
    write_int64(&mut buf, -7).unwrap();
    write_int64(&mut buf, 1 << 33).unwrap();
    write_int64(&mut buf, i64::MIN).unwrap();

    let mut src = SliceSource::new(&buf);
    assert_eq!(i64::decode_from(&mut src).unwrap(), (-7, 1));
    assert_eq!(i64::decode_from(&mut src).unwrap(), (1 << 33, 6));
    assert_eq!(i64::decode_from(&mut src).unwrap(), (i64::MIN, 11));
    assert_eq!(src.remaining(), 0);
    assert!(matches!(
        i64::decode_from(&mut src),
        Err(VarintError::NoData)
    ));
}

#[test]
fn test_stream_eof_vs_truncation() {
    let mut buf = Vec::new();
    write_int31(&mut buf, 1 << 26).unwrap();

    // Clean end before a value.
    let mut cur = Cursor::new(buf.clone());
    assert_eq!(read_int31(&mut cur).unwrap(), (1 << 26, 5));
    let e = read_int31(&mut cur).unwrap_err();
    assert!(e.is_clean_eof());

    // End partway through.
    for k in 1..buf.len() {
        let e = read_int31(Cursor::new(&buf[..k])).unwrap_err();
        assert!(!e.is_clean_eof());
        assert!(matches!(e, VarintError::Truncated(n) if n == k));
    }
}

fn arb_int31() -> impl Strategy<Value = Int31> {
    (0..=INT31_MAX).prop_map(|v| Int31::new(v).unwrap())
}

proptest! {
    #[test]
    fn proptest_stream_equivalence_int31(vals in prop::collection::vec(arb_int31(), 0..64)) {
        let mut stream = Vec::new();
        let mut lens = Vec::new();
        for v in &vals {
            lens.push(v.write_to(&mut stream).unwrap());
        }

        let mut at = 0;
        let mut sliced = Vec::new();
        for n in &lens {
            sliced.push(get_int31(&stream[at..at + n]).unwrap());
            at += n;
        }

        let mut cur = Cursor::new(&stream);
        for exp in &sliced {
            prop_assert_eq!(read_int31(&mut cur).unwrap(), *exp);
        }
        prop_assert!(read_int31(&mut cur).unwrap_err().is_clean_eof());

        let via_reader = VarintReader::<_, Int31>::new(Cursor::new(&stream))
            .map(|r| r.map(|(v, n)| (v.inner(), n)))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        prop_assert_eq!(via_reader, sliced);
    }

    #[test]
    fn proptest_stream_equivalence_int64(vals in prop::collection::vec(any::<i64>(), 0..64)) {
        let mut stream = Vec::new();
        let mut lens = Vec::new();
        for v in &vals {
            lens.push(write_int64(&mut stream, *v).unwrap());
        }

        let mut at = 0;
        let mut sliced = Vec::new();
        for n in &lens {
            sliced.push(get_int64(&stream[at..at + n]).unwrap());
            at += n;
        }

        let mut cur = Cursor::new(&stream);
        for exp in &sliced {
            prop_assert_eq!(read_int64(&mut cur).unwrap(), *exp);
        }

        let via_reader = VarintReader::<_, i64>::new(Cursor::new(&stream))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        prop_assert_eq!(via_reader, sliced);
    }
}
