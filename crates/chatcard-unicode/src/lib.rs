// this_file: crates/chatcard-unicode/src/lib.rs

//! Unicode helpers shared by the font resolver and the layout engine.
//!
//! Two questions get answered here: does a string need a CJK-capable font,
//! and where may a run of prose be broken between words.

use icu_segmenter::{options::WordBreakInvariantOptions, WordSegmenter};

/// Coarse script class used to pick a fallback order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptClass {
    /// Han ideographs, kana or hangul are present
    Cjk,
    /// Everything else
    General,
}

/// Code point ranges that call for a CJK-capable face
const CJK_RANGES: [(u32, u32); 6] = [
    (0x4E00, 0x9FFF),   // CJK Unified Ideographs
    (0x3040, 0x309F),   // Hiragana
    (0x30A0, 0x30FF),   // Katakana
    (0xAC00, 0xD7AF),   // Hangul Syllables
    (0x3400, 0x4DBF),   // CJK Extension A
    (0x20000, 0x2A6DF), // CJK Extension B
];

/// Whether a single character belongs to one of the CJK ranges.
pub fn is_cjk(ch: char) -> bool {
    let cp = ch as u32;
    CJK_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&cp))
}

/// Whether any character of `text` is CJK.
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

/// Classify a string for font fallback ordering.
pub fn detect_script(text: &str) -> ScriptClass {
    if contains_cjk(text) {
        ScriptClass::Cjk
    } else {
        ScriptClass::General
    }
}

/// Split `text` at word boundaries, keeping every byte.
///
/// Whitespace and punctuation come back as their own segments, so joining
/// the result reproduces the input exactly.
pub fn word_segments(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }

    let breaks: Vec<usize> = WordSegmenter::new_auto(WordBreakInvariantOptions::default())
        .segment_str(text)
        .collect();

    let mut segments = Vec::with_capacity(breaks.len());
    for pair in breaks.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        if start < end {
            segments.push(&text[start..end]);
        }
    }

    if segments.is_empty() {
        segments.push(text);
    }
    segments
}
