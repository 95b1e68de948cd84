//! Properties file content
//!
//! Content generation is pluggable: anything implementing
//! [`PropertiesSource`] can produce the text written to
//! `java-security.properties`, including plain closures.

use crate::buildpack::BuildpackInfo;
use std::collections::BTreeMap;

/// Produces the properties file body for a buildpack
pub trait PropertiesSource {
    fn render(&self, buildpack: &BuildpackInfo) -> String;
}

impl<F> PropertiesSource for F
where
    F: Fn(&BuildpackInfo) -> String,
{
    fn render(&self, buildpack: &BuildpackInfo) -> String {
        self(buildpack)
    }
}

/// Header comment plus a fixed set of entries, sorted by key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertiesTemplate {
    entries: BTreeMap<String, String>,
}

impl PropertiesTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PropertiesSource for PropertiesTemplate {
    fn render(&self, buildpack: &BuildpackInfo) -> String {
        let mut out = String::from("# Java security properties contributed by ");
        escape_comment(&buildpack.display_name(), &mut out);
        out.push('\n');
        for (key, value) in &self.entries {
            out.push_str(&escape(key, true));
            out.push('=');
            out.push_str(&escape(value, false));
            out.push('\n');
        }
        out
    }
}

/// Escape text the way `java.util.Properties#store(OutputStream)` does.
///
/// The JVM loads the file as ISO-8859-1, so everything outside printable
/// ASCII becomes `\uXXXX`. Keys escape every space, values only a leading one.
fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => push_unicode_escape(c, &mut out),
        }
    }
    out
}

/// Comment text stays on one line and in printable ASCII
fn escape_comment(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '\n' | '\r' => out.push(' '),
            ' '..='~' => out.push(c),
            _ => push_unicode_escape(c, out),
        }
    }
}

/// `\uXXXX` per UTF-16 code unit, so astral chars become surrogate pairs
fn push_unicode_escape(c: char, out: &mut String) {
    let mut units = [0u16; 2];
    for unit in c.encode_utf16(&mut units) {
        out.push_str(&format!("\\u{:04X}", unit));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> BuildpackInfo {
        BuildpackInfo::new("test/id", "test-name", "1.0.0")
    }

    #[test]
    fn empty_template_is_header_only() {
        let body = PropertiesTemplate::new().render(&info());
        assert_eq!(
            body,
            "# Java security properties contributed by test-name 1.0.0\n"
        );
    }

    #[test]
    fn entries_are_sorted() {
        let template = PropertiesTemplate::with_entries([
            ("securerandom.source", "file:/dev/urandom"),
            ("networkaddress.cache.ttl", "30"),
        ]);
        let body = template.render(&info());
        let lines: Vec<&str> = body.lines().skip(1).collect();
        assert_eq!(
            lines,
            vec![
                "networkaddress.cache.ttl=30",
                "securerandom.source=file\\:/dev/urandom",
            ]
        );
    }

    #[test]
    fn escapes_keys_and_values() {
        assert_eq!(escape("a b=c", true), "a\\ b\\=c");
        assert_eq!(escape(" a b", false), "\\ a b");
        assert_eq!(escape("x\\y\nz", false), "x\\\\y\\nz");
        assert_eq!(escape("#!", false), "\\#\\!");
    }

    #[test]
    fn header_cannot_break_lines() {
        let info = BuildpackInfo::new("id", "evil\nkey=value", "");
        let body = PropertiesTemplate::new().render(&info);
        assert_eq!(body.lines().count(), 1);
    }

    #[test]
    fn non_ascii_is_unicode_escaped() {
        let template = PropertiesTemplate::with_entries([("k", "café")]);
        let body = template.render(&info());
        assert!(body.is_ascii());
        assert!(body.ends_with("k=caf\\u00E9\n"));

        assert_eq!(escape("clé", true), "cl\\u00E9");
        assert_eq!(escape("\u{1F512}", false), "\\uD83D\\uDD12");
        assert_eq!(escape("a\u{7f}", false), "a\\u007F");
    }

    #[test]
    fn non_ascii_header_is_escaped() {
        let info = BuildpackInfo::new("id", "Bücher", "");
        let body = PropertiesTemplate::new().render(&info);
        assert_eq!(
            body,
            "# Java security properties contributed by B\\u00FCcher\n"
        );
    }

    #[test]
    fn closures_are_sources() {
        let source = |bp: &BuildpackInfo| format!("id={}\n", bp.id);
        assert_eq!(source.render(&info()), "id=test/id\n");
    }
}
