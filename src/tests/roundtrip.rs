use crate::container;
use crate::huffman::FrequencyMap;
use crate::{compress, decompress};
use rand::{Rng, SeedableRng};

fn roundtrip(text: &str) {
    let packed = compress(text).unwrap();
    let recovered = decompress(&packed).unwrap();
    assert_eq!(recovered, text);
}

#[test]
fn handwritten_texts() {
    let texts = [
        "a",
        "ab",
        "aaabbc",
        "Hello, world! This is a sample text for Huffman compression.",
        "The quick brown fox jumps over the lazy dog.\nThe five boxing wizards jump quickly.\r\n",
        "Ünïcödé ßtrings with ∑ math, 日本語 and emoji 🦀🦀🦀",
        "\0\u{1}\u{7f}\u{80}\u{10ffff}",
        "    \t\t\t\n\n\n",
    ];
    for text in texts.iter() {
        roundtrip(text);
    }
}

#[test]
fn single_symbol_lengths() {
    for len in 1..=40 {
        let text: String = std::iter::repeat('z').take(len).collect();
        let packed = compress(&text).unwrap();
        let parsed = container::deserialize(&packed).unwrap();
        // one zero bit per symbol
        assert_eq!(parsed.payload.len(), (len + 7) / 8);
        assert!(parsed.payload.iter().all(|byte| *byte == 0));
        assert_eq!(usize::from(parsed.header.padding_bits), (8 - len % 8) % 8);
        assert_eq!(decompress(&packed).unwrap(), text);
    }
}

#[test]
fn all_frequencies_equal() {
    // every merge is a tie, the decoder has to break them the same way
    let alphabet: Vec<char> = ('a'..='z').chain('0'..='9').collect();
    for distinct in 2..=alphabet.len() {
        let text: String = alphabet[..distinct].iter().cycle().take(distinct * 3).collect();
        roundtrip(&text);
    }
}

#[test]
fn ties_between_leaves_and_merged_nodes() {
    // 1 1 2 2 4 4 8: every merge result ties with an existing leaf
    let text: String = [('a', 1), ('b', 1), ('c', 2), ('d', 2), ('e', 4), ('f', 4), ('g', 8)]
        .iter()
        .flat_map(|(symbol, count)| std::iter::repeat(*symbol).take(*count))
        .collect();
    roundtrip(&text);
}

#[test]
fn random_texts() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0xDEADBEEF);
    let alphabets: [&[char]; 3] = [
        &['a', 'b'],
        &['a', 'b', 'c', 'd', 'e', ' ', '\n', 'é', '€'],
        &['x'],
    ];
    for _ in 0..200 {
        let alphabet = alphabets[rng.gen_range(0..alphabets.len())];
        let len = rng.gen_range(1..2000);
        let text: String = (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect();
        roundtrip(&text);
    }
}

#[test]
fn random_unicode() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0x5EED);
    for _ in 0..100 {
        let len = rng.gen_range(1..500);
        let text: String = (0..len).map(|_| rng.gen::<char>()).collect();
        let packed = compress(&text).unwrap();
        let parsed = container::deserialize(&packed).unwrap();
        assert_eq!(parsed.header.frequencies, FrequencyMap::from_text(&text));
        assert_eq!(decompress(&packed).unwrap(), text);
    }
}

#[test]
fn skewed_text_compresses() {
    let mut text = String::new();
    for (symbol, count) in [('e', 5000), ('t', 900), ('a', 300), ('o', 80), ('q', 3)].iter() {
        text.extend(std::iter::repeat(*symbol).take(*count));
    }
    let packed = compress(&text).unwrap();
    assert!(packed.len() < text.len() / 4);
    assert_eq!(decompress(&packed).unwrap(), text);
}
