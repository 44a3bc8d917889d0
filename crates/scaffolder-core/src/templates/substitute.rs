//! `{{KEY}}` placeholder substitution
//!
//! All keys of a [`ReplacementMap`] are compiled into one alternation so the
//! text is scanned exactly once: inserted values are never re-scanned, and
//! placeholders whose key is not in the map are left untouched. Matching
//! works on bytes, so template content need not be UTF-8.

use crate::error::{Error, Result};
use crate::replacements::ReplacementMap;
use std::borrow::Cow;
use regex::bytes::{Captures, Regex};

/// Compiled substitution for one replacement map
#[derive(Debug, Clone)]
pub struct Substitutor<'a> {
    replacements: &'a ReplacementMap,
    pattern: Option<Regex>,
}

impl<'a> Substitutor<'a> {
    /// Compile a matcher for every key in `replacements`
    pub fn new(replacements: &'a ReplacementMap) -> Result<Self> {
        if replacements.is_empty() {
            return Ok(Self {
                replacements,
                pattern: None,
            });
        }

        // Longest keys first so a key that prefixes another never shadows it
        let mut keys: Vec<&str> = replacements.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        let alternation = keys
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = Regex::new(&format!(r"\{{\{{({})\}}\}}", alternation))
            .map_err(|e| Error::template(format!("Invalid placeholder key: {}", e)))?;

        Ok(Self {
            replacements,
            pattern: Some(pattern),
        })
    }

    /// Replace every known placeholder in `raw`
    pub fn apply(&self, raw: &str) -> String {
        match self.apply_bytes(raw.as_bytes()) {
            Cow::Borrowed(_) => raw.to_string(),
            Cow::Owned(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Replace every known placeholder in `raw`, leaving all other bytes as-is
    pub fn apply_bytes<'t>(&self, raw: &'t [u8]) -> Cow<'t, [u8]> {
        let Some(pattern) = &self.pattern else {
            return Cow::Borrowed(raw);
        };

        pattern.replace_all(raw, |caps: &Captures| {
            std::str::from_utf8(&caps[1])
                .ok()
                .and_then(|key| self.replacements.get(key))
                .map(|value| value.as_bytes().to_vec())
                .unwrap_or_else(|| caps[0].to_vec())
        })
    }
}

/// One-shot substitution; prefer [`Substitutor`] when processing many files
pub fn substitute(raw: &str, replacements: &ReplacementMap) -> Result<String> {
    Ok(Substitutor::new(replacements)?.apply(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> ReplacementMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let m = map(&[("APP_NAME", "Foo Bar")]);
        let out = substitute("{{APP_NAME}} / {{APP_NAME}} / {{APP_NAME}}", &m).unwrap();
        assert_eq!(out, "Foo Bar / Foo Bar / Foo Bar");
        assert_eq!(out.matches("Foo Bar").count(), 3);
        assert!(!out.contains("{{APP_NAME}}"));
    }

    #[test]
    fn test_unknown_placeholders_left_verbatim() {
        let m = map(&[("APP_NAME", "Foo")]);
        let out = substitute("{{APP_NAME}} {{UNKNOWN}} {{ APP_NAME }}", &m).unwrap();
        assert_eq!(out, "Foo {{UNKNOWN}} {{ APP_NAME }}");
    }

    #[test]
    fn test_text_without_placeholders_unchanged() {
        let m = map(&[("APP_NAME", "Foo"), ("OWNER", "me")]);
        let text = "const x = { a: 1 };\n{not a placeholder}\n";
        assert_eq!(substitute(text, &m).unwrap(), text);
        assert_eq!(substitute(text, &ReplacementMap::new()).unwrap(), text);
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let m = map(&[("A", "{{B}}"), ("B", "{{A}}")]);
        assert_eq!(substitute("{{A}}-{{B}}", &m).unwrap(), "{{B}}-{{A}}");
    }

    #[test]
    fn test_keys_are_literal() {
        let m = map(&[("A.B", "dot"), ("X*", "star")]);
        assert_eq!(substitute("{{A.B}} {{AxB}} {{X*}} {{XX}}", &m).unwrap(), "dot {{AxB}} star {{XX}}");
    }

    #[test]
    fn test_prefix_keys() {
        let m = map(&[("PRIMARY_COLOR", "#fff"), ("PRIMARY_COLOR_BACKGROUND", "#000")]);
        assert_eq!(
            substitute("{{PRIMARY_COLOR}}/{{PRIMARY_COLOR_BACKGROUND}}", &m).unwrap(),
            "#fff/#000"
        );
    }

    #[test]
    fn test_non_utf8_bytes_preserved() {
        let m = map(&[("APP_NAME", "Foo")]);
        let substitutor = Substitutor::new(&m).unwrap();
        let raw = b"\xff\xfe{{APP_NAME}}\x00\x80";
        assert_eq!(&*substitutor.apply_bytes(raw), &b"\xff\xfeFoo\x00\x80"[..]);
    }

    #[test]
    fn test_extra_braces() {
        let m = map(&[("APP_NAME", "Foo")]);
        assert_eq!(substitute("{{{APP_NAME}}}", &m).unwrap(), "{Foo}");
    }
}
