use chatcard_core::{Color, FontWeight, RenderConfig, WrapMode, MAX_GEOMETRY};

#[test]
fn test_defaults_when_json_is_empty() {
    let config = RenderConfig::from_json_str("{}").unwrap();
    assert_eq!(config, RenderConfig::default());
    assert_eq!(config.width, 1100);
    assert_eq!(config.min_width, 420);
    assert_eq!(config.max_width, 900);
    assert_eq!(config.palette.background, Color::rgb(0x36, 0x39, 0x3f));
}

#[test]
fn test_partial_override_keeps_other_defaults() {
    let config = RenderConfig::from_json_str(
        r##"{
            "max_width": 700,
            "wrap": "word",
            "username_weight": "Bold",
            "palette": { "background": "#000000" }
        }"##,
    )
    .unwrap();

    assert_eq!(config.max_width, 700);
    assert_eq!(config.wrap, WrapMode::Word);
    assert_eq!(config.username_weight, FontWeight::Bold);
    assert_eq!(config.palette.background, Color::black());
    assert_eq!(config.palette.text, Color::rgb(0xdd, 0xdd, 0xdd));
    assert_eq!(config.padding, 24);
}

#[test]
fn test_inverted_clamps_are_rejected() {
    let err = RenderConfig::from_json_str(r#"{"min_width": 1000, "max_width": 500}"#)
        .unwrap_err();
    assert!(err.to_string().contains("min_width"));
}

#[test]
fn test_bad_color_is_a_config_error() {
    let err = RenderConfig::from_json_str(r#"{"palette": {"text": "grey"}}"#).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_text_column_geometry() {
    let config = RenderConfig::default();
    assert_eq!(config.text_x(), 24 + 56 + 16);
    assert_eq!(config.chrome_width(), 24 * 2 + 56 + 16);
    assert_eq!(config.max_text_width(), (1100 - 120) as f32);
}

#[test]
fn test_utc_offset_conversion() {
    let config = RenderConfig {
        utc_offset_minutes: Some(540),
        ..RenderConfig::default()
    };
    assert_eq!(config.utc_offset().map(|o| o.local_minus_utc()), Some(540 * 60));
    assert_eq!(RenderConfig::default().utc_offset(), None);
}

#[test]
fn test_oversized_padding_is_rejected() {
    let err = RenderConfig::from_json_str(r#"{"padding": 3000000000}"#).unwrap_err();
    assert!(err.to_string().contains("padding"));
}

#[test]
fn test_geometry_arithmetic_saturates() {
    let config = RenderConfig {
        padding: u32::MAX,
        avatar_size: u32::MAX,
        ..RenderConfig::default()
    };
    assert_eq!(config.chrome_width(), u32::MAX);
    assert_eq!(config.text_x(), u32::MAX);
    assert_eq!(config.max_text_width(), 0.0);
}

#[test]
fn test_sanitized_when_clamps_inverted_then_min_drops_to_max() {
    let config = RenderConfig {
        min_width: 1000,
        max_width: 900,
        ..RenderConfig::default()
    }
    .sanitized();
    assert_eq!((config.min_width, config.max_width), (900, 900));
    assert!(config.validate().is_ok());
}

#[test]
fn test_sanitized_when_fields_are_unusable_then_config_validates() {
    let config = RenderConfig {
        min_width: 0,
        max_width: 0,
        padding: 3_000_000_000,
        gap: u32::MAX,
        body_size: f32::NAN,
        tag_size: -1.0,
        username_size: 1e9,
        ..RenderConfig::default()
    }
    .sanitized();

    assert_eq!((config.min_width, config.max_width), (1, 1));
    assert_eq!(config.padding, MAX_GEOMETRY);
    assert_eq!(config.gap, MAX_GEOMETRY);
    assert_eq!(config.body_size, 21.0);
    assert_eq!(config.tag_size, 14.0);
    assert_eq!(config.username_size, 21.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_sanitized_keeps_valid_configs() {
    assert_eq!(RenderConfig::default().sanitized(), RenderConfig::default());
}
