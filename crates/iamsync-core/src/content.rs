//! Resource content handling
//!
//! Bodies are treated as opaque text except for one step: reading the field
//! that names the resource, so a locally renamed file still maps to the
//! right server resource.

use iamsync_meta::ContentFormat;
use regex::Regex;

use crate::error::{Error, Result};
use crate::keywords::{KeywordMapping, to_placeholders};

/// Turn an exported body into file-ready text.
///
/// Live values from `mapping` are replaced with their placeholders.
pub fn process_exported_content(body: &[u8], mapping: &KeywordMapping) -> Result<String> {
    let text = std::str::from_utf8(body).map_err(|e| Error::InvalidContent {
        message: format!("exported body is not valid UTF-8: {e}"),
    })?;
    Ok(to_placeholders(text, mapping))
}

/// Read the resource name stored under `field`.
///
/// YAML and JSON share a parser; XML is matched by element name, ignoring
/// case and namespace prefixes.
pub fn decode_identity(content: &str, format: ContentFormat, field: &str) -> Result<String> {
    let name = match format {
        ContentFormat::Yaml | ContentFormat::Json => decode_structured(content, field)?,
        ContentFormat::Xml => decode_xml(content, field)?,
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(Error::MissingIdentity {
            field: field.to_string(),
        });
    }
    Ok(name.to_string())
}

fn decode_structured(content: &str, field: &str) -> Result<String> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| Error::InvalidContent {
            message: e.to_string(),
        })?;

    value
        .get(field)
        .and_then(serde_yaml::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::MissingIdentity {
            field: field.to_string(),
        })
}

fn decode_xml(content: &str, field: &str) -> Result<String> {
    let escaped = regex::escape(field);
    let pattern = format!(
        r"(?is)<(?:[\w.\-]+:)?{escaped}(?:\s[^>]*)?>\s*(?:<!\[CDATA\[(.*?)\]\]>|([^<]*?))\s*</(?:[\w.\-]+:)?{escaped}\s*>"
    );
    let re = Regex::new(&pattern).map_err(|e| Error::InvalidContent {
        message: e.to_string(),
    })?;

    re.captures(content)
        .and_then(|caps| match (caps.get(1), caps.get(2)) {
            (Some(cdata), _) => Some(cdata.as_str().to_string()),
            (None, text) => text.map(|t| unescape_xml(t.as_str())),
        })
        .ok_or_else(|| Error::MissingIdentity {
            field: field.to_string(),
        })
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
