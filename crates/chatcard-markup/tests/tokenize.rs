use chatcard_core::{RunStyle, StyledRun};
use chatcard_markup::{tokenize, tokenize_content, EmojiRef};

#[test]
fn test_mixed_paragraph() {
    let runs = tokenize("Hi **there**, check `main.rs` and ~~old~~ <:ok_hand:42>!");
    let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["Hi ", "there", ", check ", "main.rs", " and ", "old", " ", "<:ok_hand:42>", "!"]
    );
    assert_eq!(runs[1].style, RunStyle::BOLD);
    assert_eq!(runs[3].style, RunStyle::CODE);
    assert_eq!(runs[5].style, RunStyle::STRIKETHROUGH);
    assert!(runs[7].emoji);
    assert!(EmojiRef::parse(&runs[7].text).is_some());
}

#[test]
fn test_runs_concatenate_to_visible_text() {
    let runs = tokenize("a *b* c **d** e");
    let visible: String = runs.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(visible, "a b c d e");
}

#[test]
fn test_content_keeps_empty_paragraphs() {
    let paras = tokenize_content("first\n\n**third**");
    assert_eq!(paras.len(), 3);
    assert_eq!(paras[0], vec![StyledRun::plain("first")]);
    assert!(paras[1].is_empty());
    assert_eq!(paras[2], vec![StyledRun::new("third", RunStyle::BOLD)]);
}

#[test]
fn test_tokenizing_is_deterministic() {
    let text = "***x** _y_ __z__ `w`";
    assert_eq!(tokenize(text), tokenize(text));
}
