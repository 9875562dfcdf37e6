// this_file: crates/chatcard-fontdb/tests/lib.rs

use std::sync::Arc;

use chatcard_core::{FontSources, FontWeight, RenderConfig, RunStyle, TextMeasure, TextRole};
use chatcard_fontdb::{FontCache, FontChain, Typesetter};

#[test]
fn test_chain_when_no_assets_then_builtin_draws_everything() {
    let cache = FontCache::builtin_only();
    let chain = cache.chain(21.0, FontWeight::Regular);

    for text in ["Hello", "こんにちは", "Hello世界", "😀", ""] {
        let placed = chain.place(text);
        assert_eq!(placed.len(), text.chars().count(), "{text:?}");
        assert!(placed.iter().all(|g| g.face.is_builtin()));
    }
}

#[test]
fn test_cjk_text_when_builtin_only_then_order_is_unchanged() {
    let chain = FontChain::builtin(21.0, FontWeight::Regular);
    let plain: Vec<&str> = chain.for_text("abc").iter().map(|f| f.label()).collect();
    let cjk: Vec<&str> = chain.for_text("世界").iter().map(|f| f.label()).collect();
    assert_eq!(plain, cjk);
}

#[test]
fn test_cache_when_shared_across_threads_then_chains_match() {
    let cache = Arc::new(FontCache::new(FontSources::builtin_only()));
    let config = RenderConfig::default();

    let widths: Vec<f32> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let config = config.clone();
                scope.spawn(move || {
                    let ts = Typesetter::new(&cache, &config);
                    ts.advance("same text", TextRole::Body, RunStyle::PLAIN)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(widths.windows(2).all(|w| w[0] == w[1]));
    // username, body, bold body, tag and timestamp chains
    assert_eq!(cache.cached_chains(), 5);
}

#[test]
fn test_bold_measures_with_bold_chain() {
    let cache = FontCache::builtin_only();
    let ts = Typesetter::new(&cache, &RenderConfig::default());
    let plain = ts.advance("word", TextRole::Body, RunStyle::PLAIN);
    let bold = ts.advance("word", TextRole::Body, RunStyle::BOLD);
    // The built-in font has one width for every weight
    assert_eq!(plain, bold);
}
