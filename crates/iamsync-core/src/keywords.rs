//! Keyword placeholders
//!
//! A keyword `KEY` appears in portable resource files as the placeholder
//! `{{KEY}}`. Import replaces placeholders with the environment's values;
//! export replaces the environment's values with placeholders. Both
//! directions read the same [`KeywordMapping`].

use std::collections::HashMap;
use std::sync::LazyLock;

use iamsync_meta::{KeywordMap, KeywordOverrides};
use regex::Regex;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}").expect("Invalid placeholder regex")
});

/// Resolved keyword values for one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordMapping(KeywordMap);

impl KeywordMapping {
    pub fn new(map: KeywordMap) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<KeywordMap> for KeywordMapping {
    fn from(map: KeywordMap) -> Self {
        Self(map)
    }
}

/// Placeholder text for a keyword.
pub fn placeholder(key: &str) -> String {
    format!("{{{{{key}}}}}")
}

/// Keyword mapping shared by every resource of a type: the global mapping,
/// overlaid with the type's `default` entry when one is configured.
///
/// Used to read a local file's name before the resource's own mapping is
/// known.
pub fn resolve_type_keyword_mapping(
    overrides: KeywordOverrides<'_>,
    global: &KeywordMap,
) -> KeywordMapping {
    let mut merged = global.clone();
    if let KeywordOverrides::Advanced(advanced) = overrides
        && let Some(default) = &advanced.default
    {
        merged.extend(default.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    KeywordMapping(merged)
}

/// Resolve the keyword mapping for a named resource.
///
/// Without advanced configuration the global mapping applies unchanged.
/// Otherwise the global mapping is overlaid with the resource's own entry,
/// or the type's `default` entry when the resource has none.
pub fn resolve_keyword_mapping(
    resource_name: &str,
    overrides: KeywordOverrides<'_>,
    global: &KeywordMap,
) -> KeywordMapping {
    let advanced = match overrides {
        KeywordOverrides::Global => return KeywordMapping(global.clone()),
        KeywordOverrides::Advanced(advanced) => advanced,
    };

    let mut merged = global.clone();
    if let Some(overlay) = advanced
        .overrides
        .get(resource_name)
        .or(advanced.default.as_ref())
    {
        merged.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    KeywordMapping(merged)
}

/// Replace every `{{KEY}}` with its mapped value.
///
/// Placeholders without a mapping are left untouched. Substituted values are
/// not rescanned.
pub fn apply_keyword_substitution(content: &str, mapping: &KeywordMapping) -> String {
    if mapping.is_empty() {
        return content.to_string();
    }
    PLACEHOLDER
        .replace_all(content, |caps: &regex::Captures<'_>| match mapping.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Replace every occurrence of a mapped value with its placeholder.
///
/// Longer values win over values they contain. When several keys share a
/// value, the first key in key order is used.
pub fn to_placeholders(content: &str, mapping: &KeywordMapping) -> String {
    let mut by_value: HashMap<&str, &str> = HashMap::new();
    for (key, value) in mapping.iter() {
        if !value.is_empty() {
            by_value.entry(value).or_insert(key);
        }
    }
    if by_value.is_empty() {
        return content.to_string();
    }

    let mut values: Vec<&str> = by_value.keys().copied().collect();
    values.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let alternation = values
        .iter()
        .map(|v| regex::escape(v))
        .collect::<Vec<_>>()
        .join("|");

    match Regex::new(&alternation) {
        Ok(pattern) => pattern
            .replace_all(content, |caps: &regex::Captures<'_>| {
                placeholder(by_value[&caps[0]])
            })
            .into_owned(),
        Err(e) => {
            tracing::warn!("Keyword values could not be matched, content left as-is: {e}");
            content.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iamsync_meta::AdvancedKeywordConfig;
    use pretty_assertions::assert_eq;

    fn map(pairs: &[(&str, &str)]) -> KeywordMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_placeholder_syntax() {
        assert_eq!(placeholder("HOST"), "{{HOST}}");
    }

    #[test]
    fn test_resolve_without_advanced_config_is_global() {
        let global = map(&[("ENV", "dev")]);
        let mapping = resolve_keyword_mapping("openid", KeywordOverrides::Global, &global);
        assert_eq!(mapping, KeywordMapping::new(global));
    }

    #[test]
    fn test_resolve_resource_override_wins_over_default() {
        let global = map(&[("ENV", "dev"), ("HOST", "dev.example.com")]);
        let advanced = AdvancedKeywordConfig {
            default: Some(map(&[("ENV", "type-default")])),
            overrides: [("openid".to_string(), map(&[("ENV", "openid-only")]))]
                .into_iter()
                .collect(),
        };

        let specific =
            resolve_keyword_mapping("openid", KeywordOverrides::Advanced(&advanced), &global);
        assert_eq!(specific.get("ENV"), Some("openid-only"));
        assert_eq!(specific.get("HOST"), Some("dev.example.com"));

        let other =
            resolve_keyword_mapping("profile", KeywordOverrides::Advanced(&advanced), &global);
        assert_eq!(other.get("ENV"), Some("type-default"));
    }

    #[test]
    fn test_resolve_advanced_without_match_falls_back_to_global() {
        let global = map(&[("ENV", "dev")]);
        let advanced = AdvancedKeywordConfig::default();
        let mapping =
            resolve_keyword_mapping("openid", KeywordOverrides::Advanced(&advanced), &global);
        assert_eq!(mapping, KeywordMapping::new(global));
    }

    #[test]
    fn test_type_mapping_overlays_default_only() {
        let global = map(&[("ENV", "dev"), ("HOST", "dev.example.com")]);
        let advanced = AdvancedKeywordConfig {
            default: Some(map(&[("ENV", "type-default")])),
            overrides: [("openid".to_string(), map(&[("ENV", "openid-only")]))]
                .into_iter()
                .collect(),
        };

        let mapping = resolve_type_keyword_mapping(KeywordOverrides::Advanced(&advanced), &global);
        assert_eq!(mapping.get("ENV"), Some("type-default"));
        assert_eq!(mapping.get("HOST"), Some("dev.example.com"));

        let plain = resolve_type_keyword_mapping(KeywordOverrides::Global, &global);
        assert_eq!(plain, KeywordMapping::new(global));
    }

    #[test]
    fn test_apply_substitution() {
        let mapping = KeywordMapping::new(map(&[("HOST", "https://dev.example.com")]));
        let content = "callback: {{HOST}}/cb\nlogout: {{ HOST }}/logout\nother: {{UNKNOWN}}\n";
        assert_eq!(
            apply_keyword_substitution(content, &mapping),
            "callback: https://dev.example.com/cb\nlogout: https://dev.example.com/logout\nother: {{UNKNOWN}}\n"
        );
    }

    #[test]
    fn test_substitution_does_not_cascade() {
        let mapping = KeywordMapping::new(map(&[("A", "{{B}}"), ("B", "b")]));
        assert_eq!(apply_keyword_substitution("{{A}}", &mapping), "{{B}}");
    }

    #[test]
    fn test_to_placeholders_prefers_longer_values() {
        let mapping = KeywordMapping::new(map(&[
            ("ENV", "dev"),
            ("HOST", "dev.example.com"),
        ]));
        assert_eq!(
            to_placeholders("url: https://dev.example.com\nenv: dev\n", &mapping),
            "url: https://{{HOST}}\nenv: {{ENV}}\n"
        );
    }

    #[test]
    fn test_to_placeholders_skips_empty_values() {
        let mapping = KeywordMapping::new(map(&[("EMPTY", "")]));
        assert_eq!(to_placeholders("name: x", &mapping), "name: x");
    }

    #[test]
    fn test_export_then_import_restores_live_values() {
        let mapping = KeywordMapping::new(map(&[("HOST", "https://dev.example.com")]));
        let live = "redirect: https://dev.example.com/callback\n";
        let portable = to_placeholders(live, &mapping);
        assert_eq!(portable, "redirect: {{HOST}}/callback\n");
        assert_eq!(apply_keyword_substitution(&portable, &mapping), live);
    }
}
