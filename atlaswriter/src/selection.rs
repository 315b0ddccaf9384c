//! Parsing of `--include-locus-segment` expressions such as `1-3,5,7-9`.

use crate::error::{AtlasError, Result};

use std::collections::BTreeSet;

/// Parses a comma-separated list of ids and inclusive `A-B` ranges.
///
/// Every id must fall in `1..=catalog_size`. The result is deduplicated and
/// sorted ascending, which is the concatenation order used downstream.
///
/// # Example
///
/// ```rust
/// use atlaswriter::selection::parse_selection;
///
/// assert_eq!(parse_selection("5,1-3,2", 6).unwrap(), vec![1, 2, 3, 5]);
/// assert!(parse_selection("2-1", 6).is_err());
/// ```
pub fn parse_selection(expr: &str, catalog_size: usize) -> Result<Vec<usize>> {
    let mut ids = BTreeSet::new();

    for token in expr.split(',') {
        let token = token.trim();

        match token.split_once('-') {
            Some((start, end)) => {
                let start = parse_id(token, start, catalog_size)?;
                let end = parse_id(token, end, catalog_size)?;

                if start > end {
                    return Err(AtlasError::selection(
                        token,
                        format!("range start {} is greater than end {}", start, end),
                    ));
                }

                ids.extend(start..=end);
            }
            None => {
                ids.insert(parse_id(token, token, catalog_size)?);
            }
        }
    }

    Ok(ids.into_iter().collect())
}

fn parse_id(token: &str, raw: &str, catalog_size: usize) -> Result<usize> {
    let id: usize = raw
        .trim()
        .parse()
        .map_err(|_| AtlasError::selection(token, format!("'{}' is not a segment index", raw)))?;

    if id < 1 || id > catalog_size {
        return Err(AtlasError::selection(
            token,
            format!("index {} is outside 1-{}", id, catalog_size),
        ));
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offending_token(err: AtlasError) -> String {
        match err {
            AtlasError::Selection { token, .. } => token,
            other => panic!("expected selection error, got {:?}", other),
        }
    }

    #[test]
    fn test_sorted_and_deduplicated() {
        assert_eq!(parse_selection("3,1,2,3", 5).unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_selection("4-5,1-2,2", 5).unwrap(), vec![1, 2, 4, 5]);
        assert_eq!(parse_selection(" 2 , 1 ", 5).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_single_id_range() {
        assert_eq!(parse_selection("2-2", 2).unwrap(), vec![2]);
    }

    #[test]
    fn test_inverted_range_fails() {
        let err = parse_selection("1,2-1", 2).unwrap_err();
        assert_eq!(offending_token(err), "2-1");
    }

    #[test]
    fn test_out_of_range_fails() {
        assert_eq!(offending_token(parse_selection("5", 2).unwrap_err()), "5");
        assert_eq!(offending_token(parse_selection("0", 2).unwrap_err()), "0");
        assert_eq!(offending_token(parse_selection("1-3", 2).unwrap_err()), "1-3");
    }

    #[test]
    fn test_malformed_tokens_fail() {
        assert_eq!(offending_token(parse_selection("1,,2", 2).unwrap_err()), "");
        assert_eq!(offending_token(parse_selection("a", 2).unwrap_err()), "a");
        assert_eq!(offending_token(parse_selection("1-2-3", 3).unwrap_err()), "1-2-3");
        assert!(parse_selection("", 2).is_err());
    }
}
