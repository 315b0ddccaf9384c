//! extract, reorder, truncate and polyA-tail locus segments from an annotated FASTA
//!
//! Fixed values shared by the parser, the edit applicator and the FASTA writer.

/// Base used to fill a tail-append edit.
pub const TAIL_BASE: u8 = b'A';

/// Residues per line in the emitted FASTA record.
pub const LINE_WIDTH: usize = 70;

/// Version suffix written after the bare accession in the combined header.
pub const ACCESSION_VERSION: &str = ".1";

/// Pattern locating `<accession>:<start>-<end>` inside a FASTA header.
pub const HEADER_COORDINATES: &str = r"([^:\s>]+):(\d+)-(\d+)";

/// Description used in the listing when a header carries no free text.
pub const NO_DESCRIPTION: &str = "No description";

pub const RANGE_TRUNCATION_USAGE: &str =
    "use 'upstream_segment:upstream_base-downstream_segment:downstream_base'";
pub const CUT_TRUNCATION_USAGE: &str = "use 'segment:position/' or 'segment:position/N'";
pub const BARE_TRUNCATION_USAGE: &str = "use 'segment:position/' or 'upstream_segment:upstream_base-downstream_segment:downstream_base'";
pub const TAIL_USAGE: &str = "use 'segment:position/count' or 'position/count'";
