//! Tag tokenizer: raw host tags to canonical `@name value` lines, and the
//! small grammar those lines are read back with.
//!
//! ```text
//! tag-line ::= "@" key (" " token)*
//! key      ::= name child-key?
//! child-key::= "." non-space+
//! ```

use crate::model::RawTag;
use regex::Regex;
use std::sync::LazyLock;

/// Leading child key of a tag's text, e.g. `.id` in `.id 22`.
static RE_CHILD_KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\.[^ ]+").unwrap());

/// A value token that qualifies the key instead of starting the value.
static RE_CHILD_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\..+").unwrap());

/// Render one raw tag as a canonical line.
///
/// `@category` with text `.id 22` becomes `@category.id 22`; a tag without
/// text becomes `@name ` (note the trailing space).
pub fn canonicalize(tag: &RawTag) -> String {
    let text: String = tag.fragments.concat();

    if let Some(m) = RE_CHILD_KEY.find(&text) {
        let rest = text[m.end()..].trim();
        return format!("@{}{} {}", tag.name, m.as_str(), rest);
    }

    format!("@{} {}", tag.name, text)
}

/// One parsed tag: its (possibly composite) key and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLine {
    pub key: String,
    pub value: String,
}

impl TagLine {
    /// Parse a canonical line. A leading `@` is optional.
    pub fn parse_line(line: &str) -> Self {
        let line = line.trim();
        Self::parse_body(line.strip_prefix('@').unwrap_or(line))
    }

    /// Parse a tag body, i.e. the text after the `@`.
    ///
    /// The body is split on single spaces. When the first value token is a
    /// child key (`.id`) and more tokens follow, it is folded into the key.
    /// Value tokens are joined without a separator; a body with no space
    /// yields an empty value.
    pub fn parse_body(body: &str) -> Self {
        let mut tokens = body.trim().split(' ');
        let mut key = tokens.next().unwrap_or_default().to_string();
        let rest: Vec<&str> = tokens.collect();

        let value = match rest.split_first() {
            Some((child, value)) if RE_CHILD_TOKEN.is_match(child) && !value.is_empty() => {
                key.push_str(child);
                value.concat()
            }
            _ => rest.concat(),
        };

        Self { key, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, fragments: &[&str]) -> RawTag {
        RawTag::new(name, fragments.iter().map(|f| f.to_string()).collect())
    }

    #[test]
    fn plain_tag() {
        assert_eq!(canonicalize(&tag("category", &["dd"])), "@category dd");
    }

    #[test]
    fn fragments_join_without_separator() {
        assert_eq!(
            canonicalize(&tag("see", &["the ", "{@link Button}", " docs"])),
            "@see the {@link Button} docs"
        );
    }

    #[test]
    fn dotted_child_key_is_folded() {
        assert_eq!(canonicalize(&tag("category", &[".id 22"])), "@category.id 22");
        assert_eq!(canonicalize(&tag("category", &[".id", "   22  "])), "@category.id 22");
    }

    #[test]
    fn dotted_child_key_without_value() {
        assert_eq!(canonicalize(&tag("category", &[".id"])), "@category.id ");
    }

    #[test]
    fn empty_tag_keeps_trailing_space() {
        assert_eq!(canonicalize(&tag("internal", &[])), "@internal ");
        assert_eq!(canonicalize(&tag("internal", &[""])), "@internal ");
    }

    #[test]
    fn parse_plain_line() {
        let line = TagLine::parse_line("@default 'blue'");
        assert_eq!(line.key, "default");
        assert_eq!(line.value, "'blue'");
    }

    #[test]
    fn parse_composite_line() {
        let line = TagLine::parse_line("@category.id 22");
        assert_eq!(line.key, "category.id");
        assert_eq!(line.value, "22");
    }

    #[test]
    fn parse_spaced_child_key() {
        let line = TagLine::parse_body("category .id 22");
        assert_eq!(line.key, "category.id");
        assert_eq!(line.value, "22");
    }

    #[test]
    fn child_key_needs_a_value_to_fold() {
        let line = TagLine::parse_body("category .id");
        assert_eq!(line.key, "category");
        assert_eq!(line.value, ".id");
    }

    #[test]
    fn dot_inside_value_is_not_a_child_key() {
        let line = TagLine::parse_body("see docs.example.com page");
        assert_eq!(line.key, "see");
        assert_eq!(line.value, "docs.example.compage");
    }

    #[test]
    fn value_tokens_join_without_separator() {
        assert_eq!(TagLine::parse_body("author Yee Wang").value, "YeeWang");
    }

    #[test]
    fn missing_value_is_empty() {
        assert_eq!(
            TagLine::parse_line("@internal"),
            TagLine {
                key: "internal".into(),
                value: String::new()
            }
        );
        assert_eq!(TagLine::parse_line("@internal ").value, "");
    }

    #[test]
    fn canonical_round_trip() {
        let line = TagLine::parse_line(&canonicalize(&tag("category", &[".id 22"])));
        assert_eq!(line.key, "category.id");
        assert_eq!(line.value, "22");
    }
}
