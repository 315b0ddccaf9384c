//! extract, reorder, truncate and polyA-tail locus segments from an annotated FASTA
//!
//! Locus segments are selected by index, concatenated in index order, optionally
//! truncated and optionally given a polyA tail; the output header is rebuilt
//! from the reference coordinates of the surviving bases.

use clap::{ArgAction, Parser};
use log::Level;

use std::{fmt, path::PathBuf};

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
pub struct Args {
    /// Input FASTA containing locus segments (.fa or .fa.gz)
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Comma-separated segment indices or ranges (e.g. '1,2,3' or '1-3,5,7-9')
    #[arg(
        short = 's',
        long = "include-locus-segment",
        visible_alias = "include_locus_segment"
    )]
    pub include_locus_segment: Option<String>,

    /// Keep the bases between two positions ('2:10-4:20') or cut after one ('3:150/' or '3:150/N')
    #[arg(short = 't', long)]
    pub truncate: Option<String>,

    /// Replace everything after a position with N A's ('3:150/N' or global 'position/N')
    #[arg(short = 'a', long = "poly-a", visible_alias = "polyA")]
    pub poly_a: Option<String>,

    /// Output file path (stdout when absent)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Gzip-compress the output file
    #[arg(short = 'Z', long, requires = "output", default_value = "false", action = ArgAction::SetTrue)]
    pub compress: bool,

    /// List available segments and exit
    #[arg(short = 'l', long, default_value = "false", action = ArgAction::SetTrue)]
    pub list: bool,

    /// Logging verbosity level
    #[arg(short = 'L', long, default_value = "info")]
    pub level: Level,
}

/// Formats the Args struct as a comma-separated string of key=value pairs.
impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opt = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

        write!(
            f,
            "input={}, include_locus_segment={}, truncate={}, poly_a={}, output={}, compress={}, list={}, level={}",
            self.input.display(),
            opt(&self.include_locus_segment),
            opt(&self.truncate),
            opt(&self.poly_a),
            self.output
                .as_ref()
                .map_or_else(|| "stdout".to_string(), |p| p.display().to_string()),
            self.compress,
            self.list,
            self.level,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_combine_invocation() {
        let args = Args::try_parse_from([
            "atlaswriter",
            "--input",
            "segments.fa",
            "--include_locus_segment",
            "1-3",
            "--truncate",
            "2:10-3:20",
            "--polyA",
            "3:20/5",
        ])
        .unwrap();

        assert_eq!(args.include_locus_segment.as_deref(), Some("1-3"));
        assert_eq!(args.truncate.as_deref(), Some("2:10-3:20"));
        assert_eq!(args.poly_a.as_deref(), Some("3:20/5"));
        assert!(!args.list);
        assert_eq!(args.level, Level::Info);
    }

    #[test]
    fn test_compress_requires_output() {
        assert!(Args::try_parse_from(["atlaswriter", "-i", "x.fa", "-s", "1", "-Z"]).is_err());
        assert!(
            Args::try_parse_from(["atlaswriter", "-i", "x.fa", "-s", "1", "-Z", "-o", "y.fa"])
                .is_ok()
        );
    }

    #[test]
    fn test_display_lists_every_field() {
        let args = Args::try_parse_from(["atlaswriter", "-i", "x.fa", "--list"]).unwrap();
        let shown = args.to_string();

        assert!(shown.starts_with("input=x.fa, include_locus_segment=-"));
        assert!(shown.contains("output=stdout"));
        assert!(shown.contains("list=true"));
    }
}
