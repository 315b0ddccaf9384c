//! extract, reorder, truncate and polyA-tail locus segments from an annotated FASTA
//!
//! Coordinate translation between three spaces:
//!
//! - local: a segment id plus a 1-based position inside that segment
//! - linear: a 0-based offset into the concatenation of the selected segments
//! - reference: the 1-based inclusive coordinate recorded in a segment header
//!
//! A [`Layout`] fixes the concatenation order (the selection order) and the
//! cumulative offset at which each selected segment begins. Unselected segments
//! never contribute length.

use crate::{
    catalog::{Catalog, Segment},
    error::{AtlasError, Result},
};

use std::fmt;

/// A 1-based position inside a segment, written `segment:position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locus {
    pub segment: usize,
    pub position: usize,
}

impl Locus {
    pub fn new(segment: usize, position: usize) -> Self {
        Locus { segment, position }
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.segment, self.position)
    }
}

/// A selected segment and the linear offset of its first base.
#[derive(Debug, Clone, Copy)]
pub struct Span<'a> {
    pub segment: &'a Segment,
    pub offset: usize,
}

impl Span<'_> {
    /// Exclusive linear end of this segment.
    pub fn end(&self) -> usize {
        self.offset + self.segment.len()
    }
}

/// Selected segments laid out end to end in selection order.
#[derive(Debug, Clone)]
pub struct Layout<'a> {
    spans: Vec<Span<'a>>,
    total: usize,
}

impl<'a> Layout<'a> {
    /// Lays out `selection` (ids, already in concatenation order).
    pub fn new(catalog: &'a Catalog, selection: &[usize]) -> Result<Self> {
        if selection.is_empty() {
            return Err(AtlasError::selection("", "no segments selected"));
        }

        let mut spans = Vec::with_capacity(selection.len());
        let mut total = 0;

        for &id in selection {
            let segment = catalog.get(id).ok_or_else(|| {
                AtlasError::selection(&id.to_string(), "no such segment in the catalog")
            })?;

            spans.push(Span {
                segment,
                offset: total,
            });
            total += segment.len();
        }

        Ok(Layout { spans, total })
    }

    pub fn spans(&self) -> &[Span<'a>] {
        &self.spans
    }

    pub fn ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.spans.iter().map(|span| span.segment.id)
    }

    /// Length of the full concatenated sequence.
    pub fn total_len(&self) -> usize {
        self.total
    }

    pub fn first(&self) -> &'a Segment {
        self.spans[0].segment
    }

    pub fn last(&self) -> &'a Segment {
        self.spans[self.spans.len() - 1].segment
    }

    pub fn contains(&self, id: usize) -> bool {
        self.span(id).is_ok()
    }

    /// The span of a selected segment; unselected ids are a range error.
    pub fn span(&self, id: usize) -> Result<&Span<'a>> {
        self.spans
            .iter()
            .find(|span| span.segment.id == id)
            .ok_or_else(|| {
                AtlasError::Range(format!(
                    "segment {} must be included in the selected segments",
                    id
                ))
            })
    }

    /// Summed length of the selected segments that precede `id`.
    pub fn prefix_len(&self, id: usize) -> Result<usize> {
        Ok(self.span(id)?.offset)
    }

    /// Slice-start offset that keeps the base at `locus`: `prefix + (p - 1)`.
    pub fn start_offset(&self, locus: Locus) -> Result<usize> {
        self.prefix_len(locus.segment)?
            .checked_add(locus.position)
            .and_then(|offset| offset.checked_sub(1))
            .ok_or_else(|| AtlasError::Range(format!("position {} falls before offset 0", locus)))
    }

    /// Exclusive slice-end offset that keeps the base at `locus`: `prefix + p`.
    pub fn end_offset(&self, locus: Locus) -> Result<usize> {
        self.prefix_len(locus.segment)?
            .checked_add(locus.position)
            .ok_or_else(|| AtlasError::Range(format!("position {} is out of range", locus)))
    }

    /// Reference coordinate of the base at linear `offset` used as a slice start.
    ///
    /// An offset sitting exactly on a junction belongs to the following
    /// segment, whose first base it denotes.
    pub fn reference_start(&self, offset: usize) -> Option<u64> {
        let span = self.spans.iter().find(|span| span.end() > offset)?;
        let relative = (offset - span.offset) as u64;

        Some(span.segment.reference_start + relative)
    }

    /// Reference coordinate of the last base kept by an exclusive linear `end`.
    ///
    /// An end sitting exactly on a junction belongs to the preceding segment,
    /// whose last base it follows.
    pub fn reference_end(&self, end: usize) -> Option<u64> {
        let span = self.spans.iter().find(|span| span.end() >= end)?;
        let relative = (end - span.offset) as u64;

        (span.segment.reference_start + relative).checked_sub(1)
    }

    /// Joins the contents of the selected segments in selection order.
    pub fn concatenate(&self) -> Vec<u8> {
        let mut sequence = Vec::with_capacity(self.total);
        for span in &self.spans {
            sequence.extend_from_slice(&span.segment.content);
        }

        sequence
    }

    /// Pairs of selected ids whose reference ranges intersect.
    pub fn overlaps(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (idx, a) in self.spans.iter().enumerate() {
            for b in &self.spans[idx + 1..] {
                if a.segment.overlaps(b.segment) {
                    pairs.push((a.segment.id, b.segment.id));
                }
            }
        }

        pairs
    }
}

impl fmt::Display for Layout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spans: Vec<String> = self
            .spans
            .iter()
            .map(|span| format!("{}@{}..{}", span.segment.id, span.offset, span.end()))
            .collect();

        write!(f, "[{}] total={}", spans.join(", "), self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // id 1: ACC:1-100 (100 bases), id 2: ACC:101-300 (200 bases), id 3: ACC:400-449 (50 bases)
    fn catalog() -> Catalog {
        let fasta = format!(
            ">ACC:1-100\n{}\n>ACC:101-300\n{}\n>ACC:400-449\n{}\n",
            "A".repeat(100),
            "C".repeat(200),
            "G".repeat(50)
        );
        Catalog::from_reader(fasta.as_bytes()).unwrap().catalog
    }

    #[test]
    fn test_total_len_is_sum_of_selected() {
        let catalog = catalog();
        let layout = Layout::new(&catalog, &[1, 3]).unwrap();

        assert_eq!(layout.total_len(), 150);
        assert_eq!(layout.concatenate().len(), layout.total_len());
        assert_eq!(layout.prefix_len(3).unwrap(), 100);
    }

    #[test]
    fn test_unselected_segments_do_not_contribute() {
        let catalog = catalog();
        let layout = Layout::new(&catalog, &[2, 3]).unwrap();

        assert_eq!(layout.prefix_len(2).unwrap(), 0);
        assert_eq!(layout.prefix_len(3).unwrap(), 200);
        assert!(matches!(layout.prefix_len(1), Err(AtlasError::Range(_))));
        assert!(!layout.contains(1));
    }

    #[test]
    fn test_local_to_linear_conventions() {
        let catalog = catalog();
        let layout = Layout::new(&catalog, &[1, 2]).unwrap();

        assert_eq!(layout.start_offset(Locus::new(1, 50)).unwrap(), 49);
        assert_eq!(layout.end_offset(Locus::new(2, 20)).unwrap(), 120);
        assert_eq!(layout.start_offset(Locus::new(2, 1)).unwrap(), 100);
        assert_eq!(layout.end_offset(Locus::new(1, 100)).unwrap(), 100);
    }

    #[test]
    fn test_start_before_origin_is_range_error() {
        let catalog = catalog();
        let layout = Layout::new(&catalog, &[1, 2]).unwrap();

        assert!(matches!(
            layout.start_offset(Locus::new(1, 0)),
            Err(AtlasError::Range(_))
        ));
        // previous segment's last base
        assert_eq!(layout.start_offset(Locus::new(2, 0)).unwrap(), 99);
    }

    #[test]
    fn test_segment_boundaries_round_trip() {
        let catalog = catalog();
        let layout = Layout::new(&catalog, &[1, 2, 3]).unwrap();

        for span in layout.spans() {
            let segment = span.segment;
            let first = layout.start_offset(Locus::new(segment.id, 1)).unwrap();
            let last = layout.end_offset(Locus::new(segment.id, segment.len())).unwrap();

            assert_eq!(layout.reference_start(first), Some(segment.reference_start));
            assert_eq!(layout.reference_end(last), Some(segment.reference_end));
        }
    }

    #[test]
    fn test_junction_offset_as_start_belongs_to_next_segment() {
        let catalog = catalog();
        let layout = Layout::new(&catalog, &[1, 2]).unwrap();

        // offset 100 == cumulative length of segment 1
        assert_eq!(layout.reference_start(100), Some(101));
        assert_eq!(layout.reference_start(99), Some(100));
    }

    #[test]
    fn test_junction_offset_as_end_belongs_to_previous_segment() {
        let catalog = catalog();
        let layout = Layout::new(&catalog, &[1, 2]).unwrap();

        assert_eq!(layout.reference_end(100), Some(100));
        assert_eq!(layout.reference_end(101), Some(101));
        assert_eq!(layout.reference_end(300), Some(300));
    }

    #[test]
    fn test_junction_across_gap_in_reference() {
        let catalog = catalog();
        let layout = Layout::new(&catalog, &[2, 3]).unwrap();

        assert_eq!(layout.reference_end(200), Some(300));
        assert_eq!(layout.reference_start(200), Some(400));
    }

    #[test]
    fn test_offsets_past_the_end() {
        let catalog = catalog();
        let layout = Layout::new(&catalog, &[1]).unwrap();

        assert_eq!(layout.reference_start(100), None);
        assert_eq!(layout.reference_end(101), None);
    }

    #[test]
    fn test_empty_selection_fails() {
        let catalog = catalog();
        assert!(matches!(
            Layout::new(&catalog, &[]),
            Err(AtlasError::Selection { .. })
        ));
    }

    #[test]
    fn test_overlapping_segments_are_reported() {
        let fasta = ">A:1-10\nAAAAAAAAAA\n>A:5-14\nCCCCCCCCCC\n>A:20-29\nGGGGGGGGGG\n";
        let catalog = Catalog::from_reader(fasta.as_bytes()).unwrap().catalog;
        let layout = Layout::new(&catalog, &[1, 2, 3]).unwrap();

        assert_eq!(layout.overlaps(), vec![(1, 2)]);
    }
}
