//! Content-Disposition parsing
//!
//! The server names exported files itself; the name arrives as the
//! `filename` parameter of an `attachment` disposition.

use crate::{Error, Result};

/// Extract the `filename` parameter from a Content-Disposition value.
///
/// Accepts quoted (`filename="a b.yaml"`, with `\"` escapes) and token
/// (`filename=a.yaml`) forms. Names that could leave the target directory
/// are rejected.
pub fn file_name_from_content_disposition(header: &str) -> Result<String> {
    let invalid = |reason: &str| Error::ContentDisposition {
        header: header.to_string(),
        reason: reason.to_string(),
    };

    let (disposition, mut rest) = match header.split_once(';') {
        Some(parts) => parts,
        None => return Err(invalid("no parameters")),
    };
    if disposition.trim().is_empty() {
        return Err(invalid("missing disposition type"));
    }

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return Err(invalid("no filename parameter"));
        }

        let (name, after) = rest
            .split_once('=')
            .ok_or_else(|| invalid("parameter without a value"))?;
        let after = after.trim_start();

        let (value, remaining) = match after.strip_prefix('"') {
            Some(quoted) => {
                parse_quoted(quoted).ok_or_else(|| invalid("unterminated quoted string"))?
            }
            None => match after.find(';') {
                Some(idx) => (after[..idx].trim().to_string(), &after[idx..]),
                None => (after.trim().to_string(), ""),
            },
        };

        if name.trim().eq_ignore_ascii_case("filename") {
            if value.trim().is_empty() {
                return Err(invalid("empty filename"));
            }
            if value.contains(['/', '\\']) || value == ".." {
                return Err(invalid("filename must not contain a path"));
            }
            return Ok(value);
        }

        // Skip to the next parameter
        rest = match remaining.trim_start().strip_prefix(';') {
            Some(tail) => tail,
            None if remaining.trim().is_empty() => "",
            None => return Err(invalid("unexpected text after parameter")),
        };
    }
}

/// Parse a quoted-string body (opening quote already consumed).
///
/// Returns the unescaped value and the text after the closing quote.
fn parse_quoted(input: &str) -> Option<(String, &str)> {
    let mut value = String::new();
    let mut escaped = false;
    for (idx, ch) in input.char_indices() {
        if escaped {
            value.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            return Some((value, &input[idx + 1..]));
        } else {
            value.push(ch);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"attachment; filename="openid.yaml""#, "openid.yaml")]
    #[case("attachment; filename=openid.yaml", "openid.yaml")]
    #[case(r#"attachment; filename="My App.xml""#, "My App.xml")]
    #[case(r#"attachment;filename="a\"b.json""#, "a\"b.json")]
    #[case(r#"attachment; name="file"; filename="scope;x.yaml""#, "scope;x.yaml")]
    #[case(r#"attachment; FileName="Upper.yml""#, "Upper.yml")]
    #[case("attachment; size=42; filename=local.yaml", "local.yaml")]
    fn test_parses_filename(#[case] header: &str, #[case] expected: &str) {
        assert_eq!(file_name_from_content_disposition(header).unwrap(), expected);
    }

    #[rstest]
    #[case("attachment")]
    #[case("")]
    #[case("; filename=a.yaml")]
    #[case("attachment; size=42")]
    #[case(r#"attachment; filename="unterminated.yaml"#)]
    #[case(r#"attachment; filename="""#)]
    #[case(r#"attachment; filename="../etc/passwd""#)]
    #[case(r#"attachment; filename="dir\\file.yaml""#)]
    fn test_rejects(#[case] header: &str) {
        assert!(
            file_name_from_content_disposition(header).is_err(),
            "expected rejection of {header:?}"
        );
    }
}
