#[cfg(test)]
mod roundtrip;

#[cfg(test)]
#[test]
fn aaabbc_scenario() {
    use crate::container;
    use crate::huffman::FrequencyMap;

    let packed = crate::compress("aaabbc").unwrap();
    let parsed = container::deserialize(&packed).unwrap();
    assert_eq!(
        parsed.header.frequencies,
        FrequencyMap::from_counts(vec![('a', 3), ('b', 2), ('c', 1)]).unwrap()
    );
    // 0 0 0 11 11 10, then 7 bits of padding
    assert_eq!(parsed.header.padding_bits, 7);
    assert_eq!(parsed.payload, &[0b0001_1111, 0b0000_0000]);
    assert_eq!(crate::decompress(&packed).unwrap(), "aaabbc");
}

#[cfg(test)]
#[test]
fn empty_input_is_rejected() {
    use crate::errors::CodecError;

    assert!(matches!(crate::compress(""), Err(CodecError::EmptyInput)));
}

#[cfg(test)]
#[test]
fn truncated_payload_is_detected() {
    use crate::errors::CodecError;

    let texts = [
        // one payload byte, truncation leaves none
        "ab",
        "z",
        "The quick brown fox jumps over the lazy dog",
        "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
        "abababababababababababababababab",
        "mississippi river, mississippi state",
    ];
    for text in texts.iter() {
        let packed = crate::compress(text).unwrap();
        let truncated = &packed[..packed.len() - 1];
        assert!(
            matches!(
                crate::decompress(truncated),
                Err(CodecError::CorruptPayload(_))
            ),
            "truncating {:?} went unnoticed",
            text
        );
    }
}

#[cfg(test)]
#[test]
fn garbage_never_panics() {
    use rand::{Rng, SeedableRng};

    let mut rng = rand::rngs::SmallRng::seed_from_u64(0xDEADBEEF);
    for _ in 0..1000 {
        let len = rng.gen_range(0..64);
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let _ = crate::decompress(&data);
    }

    // valid header, random payload
    let packed = crate::compress("hello huffman").unwrap();
    let parsed = crate::container::deserialize(&packed).unwrap();
    let header_end = 4 + parsed.header_length as usize;
    for _ in 0..1000 {
        let mut data = packed[..header_end].to_vec();
        let len = rng.gen_range(1..16);
        data.extend((0..len).map(|_| rng.gen::<u8>()));
        let _ = crate::decompress(&data);
    }
}
