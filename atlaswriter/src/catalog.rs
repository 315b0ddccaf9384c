//! extract, reorder, truncate and polyA-tail locus segments from an annotated FASTA
//!
//! The segment catalog: every record of the input FASTA whose header carries an
//! `<accession>:<start>-<end>` locus, kept sorted by reference start. Records
//! without a usable locus are not fatal; they are reported back to the caller
//! in [`Loaded::skipped`].

use crate::{
    consts::{HEADER_COORDINATES, NO_DESCRIPTION},
    error::{AtlasError, Result},
};

use flate2::read::MultiGzDecoder;
use log::info;
use regex::Regex;

use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    sync::LazyLock,
};

static COORDINATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(HEADER_COORDINATES).expect("ERROR: invalid header coordinate pattern")
});

/// A locus segment parsed from one FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 1-based position among the kept records, in file order
    pub id: usize,
    pub accession: String,
    /// 1-based inclusive reference coordinates from the header
    pub reference_start: u64,
    pub reference_end: u64,
    /// Header line without the leading '>'
    pub raw_header: String,
    pub content: Vec<u8>,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Free text after the first space of the header.
    pub fn description(&self) -> &str {
        self.raw_header
            .split_once(' ')
            .map(|(_, rest)| rest)
            .unwrap_or(NO_DESCRIPTION)
    }

    /// Accession with any version suffix removed (`MZ242719.1` -> `MZ242719`).
    pub fn bare_accession(&self) -> &str {
        self.accession
            .split('.')
            .next()
            .unwrap_or(&self.accession)
    }

    /// True when both reference ranges share at least one base.
    pub fn overlaps(&self, other: &Segment) -> bool {
        self.reference_start <= other.reference_end && other.reference_start <= self.reference_end
    }
}

/// Why a record did not make it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingCoordinates,
    InvertedCoordinates { start: u64, end: u64 },
}

/// A FASTA record left out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based record number in the file
    pub record: usize,
    pub header: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            SkipReason::MissingCoordinates => write!(
                f,
                "Could not parse position information from header (record {}): {}",
                self.record, self.header
            ),
            SkipReason::InvertedCoordinates { start, end } => write!(
                f,
                "Reference start {} exceeds end {} in header (record {}): {}",
                start, end, self.record, self.header
            ),
        }
    }
}

/// Immutable collection of segments sorted by reference start.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    segments: Vec<Segment>,
    // id - 1 -> index into `segments`
    by_id: Vec<usize>,
}

/// A catalog together with the records that were skipped while building it.
#[derive(Debug)]
pub struct Loaded {
    pub catalog: Catalog,
    pub skipped: Vec<SkippedRecord>,
}

impl Catalog {
    /// Loads a catalog from a FASTA file (optionally gzipped).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Loaded> {
        let path = path.as_ref();
        info!("Reading locus segments from file {}", path.display());

        let unreadable = |source| AtlasError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(unreadable)?;
        let reader: Box<dyn BufRead> = match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => Box::new(BufReader::new(MultiGzDecoder::new(file))),
            _ => Box::new(BufReader::new(file)),
        };

        let loaded = Self::from_reader(reader).map_err(unreadable)?;
        info!(
            "Loaded {} locus segments from {}",
            loaded.catalog.len(),
            path.display()
        );

        Ok(loaded)
    }

    /// Parses FASTA records from any buffered reader.
    pub fn from_reader<R: BufRead>(mut reader: R) -> std::io::Result<Loaded> {
        let mut records: Vec<(String, Vec<u8>)> = Vec::new();
        let mut line = Vec::new();
        let mut header: Option<String> = None;
        let mut seq = Vec::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }

            let trimmed = line.trim_ascii();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(rest) = trimmed.strip_prefix(b">") {
                let next = String::from_utf8_lossy(rest).trim().to_string();
                if let Some(prev_header) = header.replace(next) {
                    records.push((prev_header, std::mem::take(&mut seq)));
                }
            } else if header.is_some() {
                seq.extend_from_slice(trimmed);
            }
        }

        if let Some(last_header) = header {
            records.push((last_header, seq));
        }

        Ok(Self::from_records(records))
    }

    fn from_records(records: Vec<(String, Vec<u8>)>) -> Loaded {
        let mut segments = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();

        for (idx, (header, content)) in records.into_iter().enumerate() {
            match parse_locus(&header) {
                Ok((accession, reference_start, reference_end)) => segments.push(Segment {
                    id: segments.len() + 1,
                    accession,
                    reference_start,
                    reference_end,
                    raw_header: header,
                    content,
                }),
                Err(reason) => skipped.push(SkippedRecord {
                    record: idx + 1,
                    header,
                    reason,
                }),
            }
        }

        // stable: equal starts keep file order
        segments.sort_by_key(|segment| segment.reference_start);

        let mut by_id = vec![0; segments.len()];
        for (idx, segment) in segments.iter().enumerate() {
            by_id[segment.id - 1] = idx;
        }

        Loaded {
            catalog: Catalog { segments, by_id },
            skipped,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Segment> {
        let idx = *self.by_id.get(id.checked_sub(1)?)?;
        self.segments.get(idx)
    }

    /// Segments in storage order (ascending reference start).
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Segments in ascending id order.
    pub fn iter_by_id(&self) -> impl Iterator<Item = &Segment> {
        self.by_id.iter().map(|&idx| &self.segments[idx])
    }

    /// Renders the table printed by `--list`.
    pub fn listing(&self) -> String {
        let rule = "-".repeat(80);
        let mut out = String::from("\nAvailable Locus Segments:\n");

        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!(
            "{:^5} | {:^10} | {:^15} | {:^8} | Description\n",
            "Index", "Accession", "Range", "Length"
        ));
        out.push_str(&rule);
        out.push('\n');

        for segment in self.iter_by_id() {
            out.push_str(&format!(
                "{:^5} | {:^10} | {:^7}-{:^7} | {:^8} | {}\n",
                segment.id,
                segment.accession,
                segment.reference_start,
                segment.reference_end,
                segment.len(),
                segment.description()
            ));
        }

        out
    }
}

/// Extracts `(accession, start, end)` from the first locus found in a header.
fn parse_locus(header: &str) -> std::result::Result<(String, u64, u64), SkipReason> {
    let caps = COORDINATES
        .captures(header)
        .ok_or(SkipReason::MissingCoordinates)?;

    let start: u64 = caps[2]
        .parse()
        .map_err(|_| SkipReason::MissingCoordinates)?;
    let end: u64 = caps[3]
        .parse()
        .map_err(|_| SkipReason::MissingCoordinates)?;

    if start > end {
        return Err(SkipReason::InvertedCoordinates { start, end });
    }

    Ok((caps[1].to_string(), start, end))
}
