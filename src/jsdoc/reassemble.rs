//! Comment reassembler: recombine a host description and its tag lines
//! into one `{description, tags}` record.

use super::tag::TagLine;
use crate::model::{JsDoc, TagMap};

/// Prepended before splitting so a tag on the very first line still sits
/// behind a `\n@` boundary.
const SENTINEL: &str = " \n";

const TAG_BOUNDARY: &str = "\n@";

/// Split a description that may still contain `@tag` lines (Mode A).
///
/// Everything before the first `\n@` is the description; every later piece
/// is a tag body.
pub fn split_description(description: &str) -> JsDoc {
    let normalized = description.replace("\r\n", "\n");
    let prefixed = format!("{SENTINEL}{normalized}");
    let mut pieces = prefixed.split(TAG_BOUNDARY);

    let head = pieces.next().unwrap_or_default();
    let description = head.strip_prefix(SENTINEL).unwrap_or(head).to_string();

    let mut tags = TagMap::new();
    for body in pieces {
        let line = TagLine::parse_body(body);
        tracing::trace!(key = %line.key, value = %line.value, "tag from description");
        tags.insert(line.key, line.value);
    }

    JsDoc { description, tags }
}

/// Read canonical `@name value` lines into a tag map (Mode B).
pub fn collect_tag_lines<S: AsRef<str>>(lines: &[S]) -> TagMap {
    let mut tags = TagMap::new();
    for line in lines {
        let line = TagLine::parse_line(line.as_ref());
        tracing::trace!(key = %line.key, value = %line.value, "tag from tag line");
        tags.insert(line.key, line.value);
    }
    tags
}

/// Reassemble a symbol's documentation.
///
/// Tag lines are read first; tags still embedded in the description are
/// split out afterwards and win on key collision.
pub fn reassemble<S: AsRef<str>>(description: Option<&str>, tag_lines: &[S]) -> JsDoc {
    let mut tags = collect_tag_lines(tag_lines);
    let split = split_description(description.unwrap_or_default());
    tags.extend(split.tags);

    JsDoc {
        description: split.description,
        tags,
    }
}
