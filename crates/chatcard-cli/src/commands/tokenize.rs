//! Tokenize command implementation
//!
//! Shows the styled runs the renderer would lay out, one paragraph at a time.

use anyhow::Result;

use chatcard::markup::{split_emoji, tokenize_content, EmojiRef, EmojiSegment};
use chatcard::types::{RunStyle, StyledRun};

use crate::cli::TokenizeArgs;

pub fn run(args: &TokenizeArgs) -> Result<()> {
    for (index, runs) in tokenize_content(&args.text).iter().enumerate() {
        println!("paragraph {}:", index + 1);
        for line in describe_runs(runs) {
            println!("  {}", line);
        }
    }
    Ok(())
}

/// One line per run, with emoji placeholders split out of plain text
pub fn describe_runs(runs: &[StyledRun]) -> Vec<String> {
    let mut lines = Vec::new();
    for run in runs {
        if run.style.code {
            lines.push(format!("{:?} [code]", run.text));
            continue;
        }
        for segment in split_emoji(&run.text) {
            match segment {
                EmojiSegment::Emoji(token) => match EmojiRef::parse(token) {
                    Some(emoji) => lines.push(format!("{:?} [{}]", token, emoji_label(&emoji))),
                    None => lines.push(format!("{:?} [{}]", token, style_label(run.style))),
                },
                EmojiSegment::Text(text) => {
                    lines.push(format!("{:?} [{}]", text, style_label(run.style)));
                },
            }
        }
    }
    lines
}

/// `emoji wave #123`, with `animated` appended for `<a:...>` placeholders
pub fn emoji_label(emoji: &EmojiRef) -> String {
    let mut label = format!("emoji {} #{}", emoji.name, emoji.id);
    if emoji.animated {
        label.push_str(" animated");
    }
    label
}

pub fn style_label(style: RunStyle) -> String {
    if style.is_plain() {
        return "plain".to_string();
    }
    let mut flags = Vec::new();
    if style.bold {
        flags.push("bold");
    }
    if style.italic {
        flags.push("italic");
    }
    if style.code {
        flags.push("code");
    }
    if style.strikethrough {
        flags.push("strike");
    }
    flags.join("+")
}
