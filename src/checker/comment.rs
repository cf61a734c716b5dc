//! JSDoc block splitting, as a compiler's introspection API reports it:
//! free text up to the first tag, then one `RawTag` per `@name` that starts
//! a line.

use crate::model::RawTag;
use regex::Regex;
use std::sync::LazyLock;

static RE_INLINE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{@link(?:code|plain)?\s[^}]*\}").unwrap());

/// A doc comment split into description and raw tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    pub description: String,
    pub tags: Vec<RawTag>,
}

fn is_tag_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Strip the `*` margin and one following space.
fn strip_margin(line: &str) -> &str {
    let line = line.trim_start();
    let line = line.strip_prefix('*').unwrap_or(line);
    line.strip_prefix(' ').unwrap_or(line).trim_end()
}

/// Split tag text around inline `{@link ..}` markers.
fn fragments(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut last = 0;
    for m in RE_INLINE_LINK.find_iter(text) {
        if m.start() > last {
            parts.push(text[last..m.start()].to_string());
        }
        parts.push(m.as_str().to_string());
        last = m.end();
    }
    if last < text.len() {
        parts.push(text[last..].to_string());
    }
    parts
}

struct PendingTag {
    name: String,
    lines: Vec<String>,
}

impl PendingTag {
    fn finish(self) -> RawTag {
        let text = self.lines.join("\n");
        RawTag::new(self.name, fragments(text.trim()))
    }
}

/// Parse a raw `/** .. */` block.
pub fn parse(raw: &str) -> DocComment {
    let body = raw.strip_prefix("/**").unwrap_or(raw);
    let body = body.strip_suffix("*/").unwrap_or(body);
    let body = body.replace("\r\n", "\n");

    let mut description: Vec<&str> = Vec::new();
    let mut tags = Vec::new();
    let mut pending: Option<PendingTag> = None;

    for line in body.split('\n') {
        let line = strip_margin(line);

        if let Some(rest) = line.strip_prefix('@') {
            let name_len = rest.find(|c| !is_tag_name_char(c)).unwrap_or(rest.len());
            if name_len > 0 {
                if let Some(tag) = pending.take() {
                    tags.push(tag.finish());
                }
                // `@category.id 22` reports `.id 22` as the text
                let text = rest[name_len..].trim_start_matches([' ', '\t']);
                pending = Some(PendingTag {
                    name: rest[..name_len].to_string(),
                    lines: vec![text.to_string()],
                });
                continue;
            }
        }

        match pending.as_mut() {
            Some(tag) => tag.lines.push(line.to_string()),
            None => description.push(line),
        }
    }

    if let Some(tag) = pending.take() {
        tags.push(tag.finish());
    }

    DocComment {
        description: description.join("\n").trim().to_string(),
        tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_description() {
        let doc = parse("/** Button color. */");
        assert_eq!(doc.description, "Button color.");
        assert!(doc.tags.is_empty());
    }

    #[test]
    fn multi_line_description() {
        let doc = parse("/**\n * A component with a multiline description.\n *\n * Second line.\n */");
        assert_eq!(
            doc.description,
            "A component with a multiline description.\n\nSecond line."
        );
    }

    #[test]
    fn tags_are_split_out() {
        let doc = parse("/**\n   * Button color.\n   * @category dd\n   * */");
        assert_eq!(doc.description, "Button color.");
        assert_eq!(doc.tags, vec![RawTag::new("category", vec!["dd".into()])]);
    }

    #[test]
    fn dotted_tag_name_stops_at_dot() {
        let doc = parse("/**\n * @category.id 22\n * @default 'blue'\n */");
        assert_eq!(
            doc.tags,
            vec![
                RawTag::new("category", vec![".id 22".into()]),
                RawTag::new("default", vec!["'blue'".into()]),
            ]
        );
    }

    #[test]
    fn tag_without_text_has_no_fragments() {
        let doc = parse("/** Hidden.\n * @internal\n */");
        assert_eq!(doc.tags, vec![RawTag::new("internal", vec![])]);
    }

    #[test]
    fn multi_line_tag_text() {
        let doc = parse("/**\n * @example\n * <Button />\n * <Button primary />\n */");
        assert_eq!(
            doc.tags[0].fragments.concat(),
            "<Button />\n<Button primary />"
        );
    }

    #[test]
    fn inline_link_is_its_own_fragment() {
        let doc = parse("/** @see the {@link Button} docs */");
        assert_eq!(
            doc.tags[0].fragments,
            vec!["the ", "{@link Button}", " docs"]
        );
    }

    #[test]
    fn at_sign_mid_line_is_description() {
        let doc = parse("/** Mail me at a@b.c */");
        assert_eq!(doc.description, "Mail me at a@b.c");
        assert!(doc.tags.is_empty());
    }

    #[test]
    fn double_star_terminator() {
        let doc = parse("/**\n   * Button color.\n   *\n   * @default blue\n   **/");
        assert_eq!(doc.description, "Button color.");
        assert_eq!(doc.tags, vec![RawTag::new("default", vec!["blue".into()])]);
    }
}
