//! CLI argument definitions using Clap v4

use std::path::PathBuf;

use chatcard::types::FontWeight;
use chatcard::WrapMode;
use clap::{Parser, Subcommand, ValueEnum};

/// Chatcard - chat messages rendered as images
#[derive(Parser, Debug)]
#[command(name = "chatcard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a messages file to a PNG stack
    #[command(alias = "r")]
    Render(RenderArgs),

    /// Print the styled runs of each paragraph of a text
    #[command(alias = "t")]
    Tokenize(TokenizeArgs),

    /// Print the resolved font fallback chain
    #[command(alias = "i")]
    Info(InfoArgs),
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Messages JSON file
    pub input: PathBuf,

    /// Output PNG path
    #[arg(short = 'o', long = "output", default_value = "out.png")]
    pub output: PathBuf,

    /// Render config JSON; missing fields keep their defaults
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Directory holding the branded and CJK fonts
    #[arg(long = "font-dir")]
    pub font_dir: Option<PathBuf>,

    /// Upper bound on the stack width
    #[arg(long = "max-width", default_value_t = 900)]
    pub max_width: u32,

    /// Advisory width for every message (defaults to --max-width)
    #[arg(long = "width")]
    pub width: Option<u32>,

    /// How body text may break
    #[arg(long = "wrap", value_enum)]
    pub wrap: Option<WrapArg>,

    /// Skip installed system fonts
    #[arg(long = "no-system-fonts")]
    pub no_system_fonts: bool,

    /// Number of parallel worker threads (0 = auto)
    #[arg(long = "jobs", default_value = "0")]
    pub jobs: usize,
}

/// Arguments for the tokenize command
#[derive(Parser, Debug)]
pub struct TokenizeArgs {
    /// Markdown-flavored text
    pub text: String,
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Directory holding the branded and CJK fonts
    #[arg(long = "font-dir")]
    pub font_dir: Option<PathBuf>,

    /// Font size in pixels
    #[arg(short = 's', long = "size", default_value_t = 21.0)]
    pub size: f32,

    /// Font weight: regular, medium, semibold, bold
    #[arg(short = 'w', long = "weight", default_value = "regular")]
    pub weight: FontWeight,

    /// Skip installed system fonts
    #[arg(long = "no-system-fonts")]
    pub no_system_fonts: bool,
}

/// Wrap mode as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WrapArg {
    Run,
    Word,
}

impl From<WrapArg> for WrapMode {
    fn from(arg: WrapArg) -> Self {
        match arg {
            WrapArg::Run => WrapMode::Run,
            WrapArg::Word => WrapMode::Word,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let cli = Cli::try_parse_from(["chatcard", "render", "msgs.json"]).unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!(args.max_width, 900);
        assert_eq!(args.width, None);
        assert!(!args.no_system_fonts);
    }

    #[test]
    fn test_render_flags() {
        let cli = Cli::try_parse_from([
            "chatcard",
            "-v",
            "render",
            "msgs.json",
            "-o",
            "x.png",
            "--wrap",
            "word",
            "--width",
            "600",
            "--no-system-fonts",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.wrap.map(WrapMode::from), Some(WrapMode::Word));
        assert_eq!(args.width, Some(600));
        assert!(args.no_system_fonts);
    }

    #[test]
    fn test_info_weight_parsing() {
        let cli = Cli::try_parse_from(["chatcard", "info", "--weight", "bold", "-s", "14"]).unwrap();
        let Commands::Info(args) = cli.command else {
            panic!("expected info");
        };
        assert_eq!(args.weight, FontWeight::Bold);
        assert_eq!(args.size, 14.0);

        assert!(Cli::try_parse_from(["chatcard", "info", "--weight", "heavy"]).is_err());
    }
}
