//! extract, reorder, truncate and polyA-tail locus segments from an annotated FASTA
//!
//! Applies an [`EditSpec`] to the concatenated selection and rebuilds the
//! header extent from the surviving endpoints.

use crate::{
    consts::{ACCESSION_VERSION, TAIL_BASE},
    coords::Layout,
    edit::{EditSpec, TailAppend},
    error::{AtlasError, Result},
};

use std::fmt;

/// Header of the combined record, rendered without the leading '>'.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Accession without version suffix
    pub accession: String,
    pub start: u64,
    pub end: u64,
    pub description: String,
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}-{} {}",
            self.accession, ACCESSION_VERSION, self.start, self.end, self.description
        )
    }
}

/// The final record: header plus edited sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combined {
    pub header: Header,
    pub sequence: Vec<u8>,
}

/// Concatenates the layout, applies truncation then the tail, and computes
/// the header.
pub fn combine(layout: &Layout, edits: &EditSpec) -> Result<Combined> {
    let mut start = layout.first().reference_start;
    let mut end = layout.last().reference_end;

    let ids: Vec<String> = layout.ids().map(|id| id.to_string()).collect();
    let mut description = format!("Combined locus segments {}", ids.join(","));

    let mut sequence = layout.concatenate();

    if edits.is_truncated() {
        let keep_start = edits.keep_start.unwrap_or(0);
        let keep_end = edits.keep_end.unwrap_or(sequence.len());
        sequence = truncate(&sequence, keep_start, keep_end)?.to_vec();

        if let Some(offset) = edits.keep_start {
            start = layout.reference_start(offset).ok_or_else(|| {
                AtlasError::Range(format!("truncation start {} maps to no segment", offset))
            })?;
        }

        if let Some(offset) = edits.keep_end {
            end = layout.reference_end(offset).ok_or_else(|| {
                AtlasError::Range(format!("truncation end {} maps to no segment", offset))
            })?;
        }

        description.push_str(" (truncated)");
    }

    if let Some(tail) = edits.tail {
        sequence = append_tail(sequence, tail)?;
        description.push_str(&format!(" (with {} polyA tail)", tail.length));
    }

    Ok(Combined {
        header: Header {
            accession: layout.first().bare_accession().to_string(),
            start,
            end,
            description,
        },
        sequence,
    })
}

/// Returns `sequence[keep_start..keep_end]`, requiring a non-empty window
/// inside the sequence.
pub fn truncate(sequence: &[u8], keep_start: usize, keep_end: usize) -> Result<&[u8]> {
    if keep_start >= keep_end || keep_end > sequence.len() {
        return Err(AtlasError::Range(format!(
            "invalid truncation range: {}-{} (sequence length {})",
            keep_start,
            keep_end,
            sequence.len()
        )));
    }

    Ok(&sequence[keep_start..keep_end])
}

/// Replaces everything after `tail.cut_offset` with `tail.length` tail bases.
///
/// A zero-length tail leaves the sequence untouched.
pub fn append_tail(mut sequence: Vec<u8>, tail: TailAppend) -> Result<Vec<u8>> {
    if tail.cut_offset > sequence.len() {
        return Err(AtlasError::Range(format!(
            "polyA position {} is beyond the length of the combined sequence {}",
            tail.cut_offset,
            sequence.len()
        )));
    }

    if tail.length == 0 {
        return Ok(sequence);
    }

    let too_long = || {
        AtlasError::Range(format!(
            "polyA tail of {} bases after position {} is too long",
            tail.length, tail.cut_offset
        ))
    };
    let total = tail.cut_offset.checked_add(tail.length).ok_or_else(too_long)?;

    sequence.truncate(tail.cut_offset);
    sequence.try_reserve_exact(tail.length).map_err(|_| too_long())?;
    sequence.resize(total, TAIL_BASE);

    Ok(sequence)
}
