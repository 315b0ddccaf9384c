//! Normalization of `--truncate` and `--poly-a` expressions into one [`EditSpec`].
//!
//! Four textual forms are accepted:
//!
//! | form                 | example       | meaning                                     |
//! |----------------------|---------------|---------------------------------------------|
//! | range truncation     | `2:10-4:20`   | keep from base 10 of seg 2 to base 20 of 4  |
//! | single cut           | `3:150/[N]`   | keep up to base 150 of seg 3, then N tail   |
//! | bare cut (deprecated)| `3:150`       | same as `3:150/`                            |
//! | tail directive       | `3:150/20`, `5000/50` | replace everything after the cut    |
//!
//! All of them are resolved against a [`Layout`] here, so the boundary
//! conventions live in exactly one place.

use crate::{
    consts::{BARE_TRUNCATION_USAGE, CUT_TRUNCATION_USAGE, RANGE_TRUNCATION_USAGE, TAIL_USAGE},
    coords::{Layout, Locus},
    error::{AtlasError, Result},
};

use log::{info, warn};

use std::{fmt, str::FromStr};

/// Replace everything after `cut_offset` with `length` tail bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailAppend {
    pub cut_offset: usize,
    pub length: usize,
}

/// Edits to apply to the concatenated sequence, in linear offsets.
///
/// `keep_start`/`keep_end` form the truncation window `[start, end)`; an unset
/// bound stays open. The tail offset is relative to the truncated sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditSpec {
    pub keep_start: Option<usize>,
    pub keep_end: Option<usize>,
    pub tail: Option<TailAppend>,
}

impl EditSpec {
    pub fn is_truncated(&self) -> bool {
        self.keep_start.is_some() || self.keep_end.is_some()
    }

    /// Parses both optional expressions and resolves them against `layout`.
    ///
    /// A standalone tail directive overrides a tail count embedded in a
    /// single-cut truncation.
    pub fn resolve(truncate: Option<&str>, tail: Option<&str>, layout: &Layout) -> Result<Self> {
        let mut spec = EditSpec::default();
        let mut embedded_tail = None;

        if let Some(expr) = truncate {
            match expr.parse::<Truncation>()? {
                Truncation::Range { start, end } => {
                    spec.keep_start = Some(layout.start_offset(start)?);
                    spec.keep_end = Some(layout.end_offset(end)?);
                }
                Truncation::Cut { at, tail: count } => {
                    let keep_end = layout.end_offset(at)?;
                    spec.keep_end = Some(keep_end);

                    // the cut lands on the end of the truncated slice
                    embedded_tail = count.map(|length| TailAppend {
                        cut_offset: keep_end,
                        length,
                    });
                }
                Truncation::Bare(at) => {
                    warn!(
                        "WARN: Deprecated truncation format '{}'. Consider using '{}/' for clarity.",
                        expr, at
                    );
                    spec.keep_end = Some(layout.end_offset(at)?);
                }
            }
        }

        spec.tail = match tail {
            Some(expr) => {
                let directive = expr.parse::<TailDirective>()?;
                if embedded_tail.is_some() {
                    info!(
                        "Tail directive '{}' overrides the tail given in --truncate",
                        expr
                    );
                }

                Some(directive.resolve(layout)?)
            }
            None => embedded_tail,
        };

        Ok(spec)
    }
}

impl fmt::Display for EditSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |b: Option<usize>| b.map_or_else(|| "-".to_string(), |b| b.to_string());

        write!(
            f,
            "keep=[{}, {}) tail={}",
            bound(self.keep_start),
            bound(self.keep_end),
            self.tail.map_or_else(
                || "none".to_string(),
                |t| format!("{}x{}", t.cut_offset, t.length)
            )
        )
    }
}

/// A parsed `--truncate` expression, still in segment-local positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Truncation {
    Range { start: Locus, end: Locus },
    Cut { at: Locus, tail: Option<usize> },
    Bare(Locus),
}

impl FromStr for Truncation {
    type Err = AtlasError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.contains('-') {
            let parts: Vec<&str> = s.split('-').collect();
            if parts.len() != 2 {
                return Err(AtlasError::format(s, RANGE_TRUNCATION_USAGE));
            }

            return Ok(Truncation::Range {
                start: parse_locus(s, parts[0], RANGE_TRUNCATION_USAGE)?,
                end: parse_locus(s, parts[1], RANGE_TRUNCATION_USAGE)?,
            });
        }

        if let Some((at, suffix)) = s.split_once('/') {
            let at = parse_locus(s, at, CUT_TRUNCATION_USAGE)?;
            let suffix = suffix.split('/').next().unwrap_or_default();

            let tail = if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
                Some(
                    suffix
                        .parse()
                        .map_err(|_| AtlasError::format(s, CUT_TRUNCATION_USAGE))?,
                )
            } else {
                if !suffix.is_empty() {
                    warn!(
                        "WARN: Ignoring non-numeric tail count '{}' in truncation '{}'",
                        suffix, s
                    );
                }
                None
            };

            return Ok(Truncation::Cut { at, tail });
        }

        Ok(Truncation::Bare(parse_locus(s, s, BARE_TRUNCATION_USAGE)?))
    }
}

/// Where a standalone tail directive cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailAnchor {
    Local(Locus),
    Global(usize),
}

/// A parsed `--poly-a` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailDirective {
    pub anchor: TailAnchor,
    pub length: usize,
}

impl TailDirective {
    fn resolve(&self, layout: &Layout) -> Result<TailAppend> {
        let cut_offset = match self.anchor {
            TailAnchor::Local(locus) => {
                let span = layout.span(locus.segment)?;
                if locus.position > span.segment.len() {
                    return Err(AtlasError::Range(format!(
                        "position {} is beyond the length of segment {} (length: {})",
                        locus.position,
                        locus.segment,
                        span.segment.len()
                    )));
                }

                layout.end_offset(locus)?
            }
            TailAnchor::Global(offset) => offset,
        };

        Ok(TailAppend {
            cut_offset,
            length: self.length,
        })
    }
}

impl FromStr for TailDirective {
    type Err = AtlasError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 {
            return Err(AtlasError::format(s, TAIL_USAGE));
        }

        let length = parts[1]
            .trim()
            .parse()
            .map_err(|_| AtlasError::format(s, TAIL_USAGE))?;

        let anchor = if parts[0].contains(':') {
            TailAnchor::Local(parse_locus(s, parts[0], TAIL_USAGE)?)
        } else {
            TailAnchor::Global(
                parts[0]
                    .trim()
                    .parse()
                    .map_err(|_| AtlasError::format(s, TAIL_USAGE))?,
            )
        };

        Ok(TailDirective { anchor, length })
    }
}

/// Parses `segment:position` out of `part`, reporting `expr` on failure.
fn parse_locus(expr: &str, part: &str, usage: &'static str) -> Result<Locus> {
    let (segment, position) = part
        .split_once(':')
        .ok_or_else(|| AtlasError::format(expr, usage))?;

    let segment = segment
        .trim()
        .parse()
        .map_err(|_| AtlasError::format(expr, usage))?;
    let position = position
        .trim()
        .parse()
        .map_err(|_| AtlasError::format(expr, usage))?;

    Ok(Locus::new(segment, position))
}
