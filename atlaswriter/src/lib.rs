//! extract, reorder, truncate and polyA-tail locus segments from an annotated FASTA
//!
//! This tool combines selected locus segments (FASTA records whose headers carry an
//! `accession:start-end` locus) into one record, optionally keeping only a window
//! of the combined sequence and optionally replacing its end with a polyA tail.
//! The output header is recomputed in reference coordinates.
//!
//! # Usage
//!
//! ```bash
//! Usage: atlaswriter [OPTIONS] --input <INPUT>
//!
//! Options:
//!   -i, --input <INPUT>          Input FASTA containing locus segments (.fa or .fa.gz)
//!   -s, --include-locus-segment <INCLUDE_LOCUS_SEGMENT>
//!                                Comma-separated segment indices or ranges (e.g. '1,2,3' or '1-3,5,7-9')
//!   -t, --truncate <TRUNCATE>    Keep the bases between two positions ('2:10-4:20') or cut after one ('3:150/' or '3:150/N')
//!   -a, --poly-a <POLY_A>        Replace everything after a position with N A's ('3:150/N' or global 'position/N')
//!   -o, --output <OUTPUT>        Output file path (stdout when absent)
//!   -Z, --compress               Gzip-compress the output file
//!   -l, --list                   List available segments and exit
//!   -L, --level <LEVEL>          Logging verbosity level [default: info]
//!   -h, --help                   Print help
//!   -V, --version                Print version
//! ```

pub mod catalog;
pub mod cli;
pub mod combine;
pub mod consts;
pub mod coords;
pub mod core;
pub mod edit;
pub mod error;
pub mod fasta;
pub mod selection;

pub use catalog::{Catalog, Loaded, Segment, SkippedRecord};
pub use cli::Args;
pub use combine::{Combined, Header, combine};
pub use coords::{Layout, Locus};
pub use crate::core::{atlaswriter, build_record};
pub use edit::{EditSpec, TailAppend};
pub use error::{AtlasError, Result};
