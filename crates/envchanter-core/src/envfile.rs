//! Env-file codec
//!
//! The local file is a list of `KEY=VALUE` lines. Blank lines and lines
//! starting with `#` are ignored. A value wrapped in a matching pair of `"` or
//! `'` has the quotes removed and the escapes `\\`, `\"`, `\n`, `\r`, `\t`
//! decoded. Values are written quoted when they contain characters that
//! would not survive a bare `KEY=VALUE` line.
//!
//! Decoding replaces `\\` before the other escapes, so a literal backslash
//! followed by `n`, `r`, `t` or `"` cannot be told apart from the
//! corresponding escape once it has been written out. Existing files depend
//! on this order, so it is kept.

use std::collections::BTreeMap;
use std::path::Path;

use envchanter_fs::io;

use crate::{Error, Result};

/// Variable name to value. Iterates in ascending key order.
pub type Snapshot = BTreeMap<String, String>;

/// Characters that force a value to be quoted on output.
const QUOTE_TRIGGERS: &[char] = &[' ', '\t', '\n', '\r', '"', '\'', '\\'];

/// Parse env-file text into a snapshot.
///
/// Each non-blank, non-comment line is split on its first `=`; key and value
/// are trimmed. A later line for the same key replaces an earlier one.
/// Line numbers in errors are 1-based.
pub fn parse(text: &str) -> Result<Snapshot> {
    let mut snapshot = Snapshot::new();

    for (idx, raw_line) in text.split('\n').enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(Error::MalformedLine { line: idx + 1 });
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::MalformedLine { line: idx + 1 });
        }

        snapshot.insert(key.to_string(), decode_value(value.trim()));
    }

    Ok(snapshot)
}

fn decode_value(value: &str) -> String {
    match strip_quotes(value) {
        Some(inner) => unescape_value(inner),
        None => value.to_string(),
    }
}

fn strip_quotes(value: &str) -> Option<&str> {
    let bytes = value.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
    if first == last && (first == b'"' || first == b'\'') {
        Some(&value[1..value.len() - 1])
    } else {
        None
    }
}

/// Decode escapes inside a quoted value, in file-format order.
pub fn unescape_value(value: &str) -> String {
    value
        .replace("\\\\", "\\")
        .replace("\\\"", "\"")
        .replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
}

/// Whether a value must be quoted to survive a round trip.
pub fn needs_quoting(value: &str) -> bool {
    value.contains(QUOTE_TRIGGERS)
}

/// Escape a value for placement between double quotes.
pub fn escape_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Render a snapshot as env-file text, one `KEY=VALUE` line per entry in
/// ascending key order.
pub fn serialize(snapshot: &Snapshot, always_quote: bool) -> String {
    let mut out = String::new();
    for (key, value) in snapshot {
        out.push_str(key);
        out.push('=');
        if always_quote || needs_quoting(value) {
            out.push('"');
            out.push_str(&escape_value(value));
            out.push('"');
        } else {
            out.push_str(value);
        }
        out.push('\n');
    }
    out
}

/// Read and parse an env-file.
pub fn read_env_file(path: &Path) -> Result<Snapshot> {
    let content = io::read_text(path)?;
    parse_with_path(&content, path)
}

/// Read and parse an env-file, treating a missing file as empty.
pub fn read_env_file_or_empty(path: &Path) -> Result<Snapshot> {
    match io::read_text_if_exists(path)? {
        Some(content) => parse_with_path(&content, path),
        None => {
            tracing::debug!(path = %path.display(), "env-file not found, starting empty");
            Ok(Snapshot::new())
        }
    }
}

fn parse_with_path(content: &str, path: &Path) -> Result<Snapshot> {
    parse(content).map_err(|e| match e {
        Error::MalformedLine { line } => Error::MalformedEnvFile {
            path: path.to_path_buf(),
            line,
        },
        other => other,
    })
}

/// Serialize a snapshot and write it with owner-only permissions.
pub fn write_env_file(path: &Path, snapshot: &Snapshot, always_quote: bool) -> Result<()> {
    io::write_text_private(path, &serialize(snapshot, always_quote))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn snapshot(pairs: &[(&str, &str)]) -> Snapshot {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_basic_lines() {
        let parsed = parse("A=1\nB=two words?\n").unwrap();
        assert_eq!(parsed, snapshot(&[("A", "1"), ("B", "two words?")]));
    }

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let text = "\n# comment\n   # indented comment\nA=1\n\n";
        assert_eq!(parse(text).unwrap(), snapshot(&[("A", "1")]));
    }

    #[test]
    fn test_parse_trims_key_and_value() {
        let parsed = parse("  KEY  =  value  \r\n").unwrap();
        assert_eq!(parsed, snapshot(&[("KEY", "value")]));
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let parsed = parse("TOKEN=abc==\n").unwrap();
        assert_eq!(parsed, snapshot(&[("TOKEN", "abc==")]));
    }

    #[test]
    fn test_parse_missing_equals_reports_line() {
        let err = parse("FOOBAR").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 1 }));

        let err = parse("A=1\n# ok\nBROKEN\n").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 3 }));
    }

    #[test]
    fn test_parse_empty_key_is_malformed() {
        assert!(matches!(
            parse("=value"),
            Err(Error::MalformedLine { line: 1 })
        ));
    }

    #[rstest]
    #[case(r#"A="quoted value""#, "quoted value")]
    #[case("A='single'", "single")]
    #[case(r#"A="line\nbreak""#, "line\nbreak")]
    #[case(r#"A="tab\there""#, "tab\there")]
    #[case(r#"A="say \"hi\"""#, "say \"hi\"")]
    #[case(r#"A="back\\slash""#, "back\\slash")]
    #[case(r#"A="""#, "")]
    #[case(r#"A="mismatched'"#, "\"mismatched'")]
    #[case(r#"A=""#, "\"")]
    #[case("A=no\\nescape", "no\\nescape")]
    fn test_parse_quoted_values(#[case] line: &str, #[case] expected: &str) {
        let parsed = parse(line).unwrap();
        assert_eq!(parsed.get("A").map(String::as_str), Some(expected));
    }

    #[test]
    fn test_unescape_order_ambiguity_is_preserved() {
        // `\\n` decodes to a newline, not a backslash followed by `n`.
        assert_eq!(unescape_value(r"a\\nb"), "a\nb");
    }

    #[test]
    fn test_parse_later_duplicate_wins() {
        assert_eq!(parse("A=1\nA=2\n").unwrap(), snapshot(&[("A", "2")]));
    }

    #[rstest]
    #[case("simple", false)]
    #[case("", false)]
    #[case("postgresql://localhost:5432/mydb", false)]
    #[case("has space", true)]
    #[case("has\ttab", true)]
    #[case("has\nline", true)]
    #[case("has\rreturn", true)]
    #[case("has\"quote", true)]
    #[case("has'quote", true)]
    #[case("has\\backslash", true)]
    fn test_needs_quoting(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(needs_quoting(value), expected);
    }

    #[rstest]
    #[case("simple", "simple")]
    #[case("has\\backslash", "has\\\\backslash")]
    #[case("has\"quote", "has\\\"quote")]
    #[case("has\nline", "has\\nline")]
    #[case("has\ttab", "has\\ttab")]
    #[case("has\rreturn", "has\\rreturn")]
    fn test_escape_value(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_value(input), expected);
    }

    #[test]
    fn test_serialize_sorted_and_quoted_when_needed() {
        let s = snapshot(&[
            ("ZETA", "plain"),
            ("ALPHA", "needs space"),
            ("MID", "x\"y"),
        ]);
        assert_eq!(
            serialize(&s, false),
            "ALPHA=\"needs space\"\nMID=\"x\\\"y\"\nZETA=plain\n"
        );
    }

    #[test]
    fn test_serialize_always_quote() {
        let s = snapshot(&[("B", "2"), ("A", "1")]);
        assert_eq!(serialize(&s, true), "A=\"1\"\nB=\"2\"\n");
    }

    #[test]
    fn test_serialize_empty_snapshot() {
        assert_eq!(serialize(&Snapshot::new(), true), "");
    }
}
