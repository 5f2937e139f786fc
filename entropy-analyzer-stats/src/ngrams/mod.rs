// entropy-analyzer-stats/src/ngrams/mod.rs
extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

/// Extracts word-boundary-aware character n-grams for every `n` in `min_n..=max_n`.
///
/// The text is lowercased and split on whitespace. Each word is padded with a
/// single space on both sides and n-grams never cross words. A padded word no
/// longer than `n` is emitted once, whole, and longer n-gram sizes are skipped
/// for that word.
pub fn char_wb_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let mut ngrams = Vec::new();
    if min_n == 0 || max_n < min_n {
        return ngrams;
    }

    let lowered = text.to_lowercase();

    for word in lowered.split_whitespace() {
        let mut padded: Vec<char> = Vec::with_capacity(word.len() + 2);
        padded.push(' ');
        padded.extend(word.chars());
        padded.push(' ');
        let len = padded.len();

        for n in min_n..=max_n {
            let mut offset = 0;
            ngrams.push(padded[offset..n.min(len)].iter().collect());

            while offset + n < len {
                offset += 1;
                ngrams.push(padded[offset..offset + n].iter().collect());
            }

            if offset == 0 {
                break;
            }
        }
    }

    ngrams
}
