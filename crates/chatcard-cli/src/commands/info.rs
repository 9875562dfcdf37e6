//! Info command implementation
//!
//! Displays the fallback chain the resolver builds for a size and weight.

use anyhow::Result;

use chatcard::fontdb::{branded_path, FontCache, BRANDED_DIR, CJK_FILE};
use chatcard::FontSources;

use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    let sources = FontSources {
        font_dir: args.font_dir.clone(),
        system_fonts: !args.no_system_fonts,
    };

    println!("Chatcard v{}", env!("CARGO_PKG_VERSION"));
    println!();

    match &sources.font_dir {
        Some(dir) => {
            println!("Font directory: {}", dir.display());
            let branded = branded_path(dir, args.weight);
            println!("  {:<40} {}", branded.display(), presence(branded.exists()));
            let cjk = dir.join(CJK_FILE);
            println!("  {:<40} {}", cjk.display(), presence(cjk.exists()));
        },
        None => println!("Font directory: (none, expected to contain {}/ and {})", BRANDED_DIR, CJK_FILE),
    }
    println!("System fonts: {}", if sources.system_fonts { "on" } else { "off" });
    println!();

    let cache = FontCache::new(sources);
    let chain = cache.chain(args.size, args.weight);
    println!("Fallback chain ({}px, {}):", args.size, args.weight);
    for (index, face) in chain.describe().iter().enumerate() {
        println!("  {}. {}", index + 1, face);
    }

    Ok(())
}

fn presence(found: bool) -> &'static str {
    if found {
        "found"
    } else {
        "missing"
    }
}
