//! CLI Smoke Tests
//!
//! Integration tests for the chatcard CLI commands:
//! - `render`: messages file to PNG stack
//! - `tokenize`: styled runs
//! - `info`: fallback chain

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn chatcard_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_chatcard"))
}

/// Fresh scratch directory under the system temp dir
fn temp_dir(name: &str) -> PathBuf {
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("chatcard_test_{}_{}", name, id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

// ============================================================================
// Render Command Tests
// ============================================================================

#[test]
fn test_render_stack_to_png() {
    let dir = temp_dir("render");
    image::RgbImage::from_pixel(8, 8, image::Rgb([200, 30, 30]))
        .save(dir.join("avatar.png"))
        .unwrap();
    image::RgbImage::from_pixel(12, 12, image::Rgb([30, 200, 30]))
        .save(dir.join("wave.png"))
        .unwrap();
    fs::write(
        dir.join("messages.json"),
        r##"{"messages": [
            {"author": "ann", "content": "**hello** <:wave:1>", "avatar_path": "avatar.png",
             "role_color": "#e91e63", "emoji": {"<:wave:1>": "wave.png"},
             "timestamp": "2024-05-01T13:07:00Z"},
            {"author": "bob", "content": "two\nlines", "tag": {"text": "RUST"}}
        ]}"##,
    )
    .unwrap();
    let output = dir.join("out.png");

    let result = Command::new(chatcard_binary())
        .arg("render")
        .arg(dir.join("messages.json"))
        .arg("-o")
        .arg(&output)
        .arg("--no-system-fonts")
        .output()
        .expect("Failed to execute chatcard render");

    assert!(
        result.status.success(),
        "render failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Rendered 2 message(s)"));

    let decoded = image::open(&output).unwrap();
    assert!(decoded.width() >= 420 && decoded.width() <= 900);
    assert!(decoded.height() > 80);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_render_missing_input_fails() {
    let result = Command::new(chatcard_binary())
        .args(["render", "/no/such/messages.json", "--no-system-fonts"])
        .output()
        .expect("Failed to execute chatcard render");

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Failed to read messages file"));
}

#[test]
fn test_render_empty_stack() {
    let dir = temp_dir("empty");
    fs::write(dir.join("messages.json"), r#"{"messages": []}"#).unwrap();
    let output = dir.join("empty.png");

    let result = Command::new(chatcard_binary())
        .arg("render")
        .arg(dir.join("messages.json"))
        .arg("-o")
        .arg(&output)
        .args(["--no-system-fonts", "--max-width", "300"])
        .output()
        .expect("Failed to execute chatcard render");

    assert!(result.status.success());
    let decoded = image::open(&output).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (300, 80));

    let _ = fs::remove_dir_all(dir);
}

// ============================================================================
// Tokenize and Info Command Tests
// ============================================================================

#[test]
fn test_tokenize_prints_runs() {
    let result = Command::new(chatcard_binary())
        .args(["tokenize", "**bold** and ~~gone~~\nnext"])
        .output()
        .expect("Failed to execute chatcard tokenize");

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("paragraph 1:"));
    assert!(stdout.contains("paragraph 2:"));
    assert!(stdout.contains("\"bold\" [bold]"));
    assert!(stdout.contains("\"gone\" [strike]"));
}

#[test]
fn test_info_builtin_chain() {
    let result = Command::new(chatcard_binary())
        .args(["info", "--no-system-fonts", "--weight", "bold"])
        .output()
        .expect("Failed to execute chatcard info");

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Fallback chain (21px, Bold)"));
    assert!(stdout.contains("builtin 5x7"));
}

#[test]
fn test_info_help() {
    let result = Command::new(chatcard_binary())
        .args(["info", "--help"])
        .output()
        .expect("Failed to execute chatcard info --help");

    assert!(result.status.success(), "info --help should succeed");
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("--font-dir"));
}
