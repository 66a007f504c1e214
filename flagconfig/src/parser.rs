//! Line-oriented `key=value` configuration file parsing.
//!
//! The format is deliberately flat: UTF-8 text where each line is blank, a
//! `#` comment, or a single `key=value` assignment. No escaping, quoting,
//! or multi-line values.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{FlagConfigError, FlagConfigResult};

/// Reads `path` fully and parses it into a key/value mapping.
///
/// # Errors
///
/// Returns [`FlagConfigError::File`] when the file cannot be read and
/// [`FlagConfigError::MalformedLine`] for any non-blank, non-comment line
/// without exactly one `=`.
pub fn parse(path: &Path) -> FlagConfigResult<BTreeMap<String, String>> {
    let data = fs::read_to_string(path).map_err(|source| FlagConfigError::File {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(path, &data)
}

/// Parses already-read configuration text.
///
/// `path` is only used for error context. Keys are unique in the result;
/// the last occurrence of a duplicated key wins.
///
/// # Errors
///
/// Returns [`FlagConfigError::MalformedLine`] for any non-blank,
/// non-comment line without exactly one `=`.
pub fn parse_str(path: &Path, data: &str) -> FlagConfigResult<BTreeMap<String, String>> {
    let mut entries = BTreeMap::new();
    for (idx, raw) in data.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let malformed = || FlagConfigError::MalformedLine {
            path: path.to_path_buf(),
            line_number: idx + 1,
            line: line.to_owned(),
        };
        let Some((key, value)) = line.split_once('=') else {
            return Err(malformed());
        };
        if value.contains('=') {
            return Err(malformed());
        }
        entries.insert(key.trim().to_owned(), value.trim().to_owned());
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse_ok(data: &str) -> BTreeMap<String, String> {
        parse_str(Path::new("test.conf"), data).expect("well-formed config")
    }

    #[test]
    fn round_trips_a_single_assignment() {
        let entries = parse_ok("key=value\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get("key").map(String::as_str), Some("value"));
    }

    #[test]
    fn trims_whitespace_around_key_and_value() {
        let entries = parse_ok("  key =  value  \n");
        assert_eq!(entries.get("key").map(String::as_str), Some("value"));
    }

    #[rstest]
    #[case::blank("")]
    #[case::whitespace_only("   \n\t\n")]
    #[case::comment("# commented=out\n")]
    #[case::indented_comment("   # still a comment\n")]
    fn ignored_lines_contribute_nothing(#[case] data: &str) {
        assert!(parse_ok(data).is_empty());
    }

    #[rstest]
    #[case::two_separators("foo=bar=baz")]
    #[case::no_separator("foo")]
    fn malformed_lines_are_rejected(#[case] line: &str) {
        let data = format!("host=ok\n{line}\n");
        let err = parse_str(Path::new("test.conf"), &data).unwrap_err();
        match err {
            FlagConfigError::MalformedLine {
                path,
                line_number,
                line: reported,
            } => {
                assert_eq!(path, Path::new("test.conf"));
                assert_eq!(line_number, 2);
                assert_eq!(reported, line);
            }
            other => panic!("expected MalformedLine, got {other:?}"),
        }
    }

    #[test]
    fn last_duplicate_key_wins() {
        let entries = parse_ok("key=first\nkey=second\n");
        assert_eq!(entries.get("key").map(String::as_str), Some("second"));
    }

    #[test]
    fn hash_inside_value_is_not_a_comment() {
        let entries = parse_ok("key=value # not stripped\n");
        assert_eq!(
            entries.get("key").map(String::as_str),
            Some("value # not stripped")
        );
    }

    #[test]
    fn unreadable_path_reports_file_error() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let missing = dir.path().join("absent.conf");
        let err = parse(&missing).unwrap_err();
        match err {
            FlagConfigError::File { path, .. } => assert_eq!(path, missing),
            other => panic!("expected File, got {other:?}"),
        }
    }
}
