//! tree-sitter plumbing shared by the declaration scanner and the type
//! reader.

use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// Grammar variant a source file is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    TypeScript,
    Tsx,
}

impl Dialect {
    /// `.tsx` and `.jsx` files need the JSX-aware grammar.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tsx" | "jsx") => Dialect::Tsx,
            _ => Dialect::TypeScript,
        }
    }
}

/// Parse `src`. Syntax errors still produce a tree; `None` only when the
/// grammar cannot be loaded.
pub fn parse(src: &str, dialect: Dialect) -> Option<Tree> {
    let mut parser = Parser::new();
    let language = match dialect {
        Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
    };
    if let Err(e) = parser.set_language(&language) {
        tracing::warn!(error = %e, "failed to load TypeScript grammar");
        return None;
    }
    parser.parse(src, None)
}

pub fn text<'s>(node: Node<'_>, src: &'s str) -> &'s str {
    &src[node.byte_range()]
}

/// Named children without comments.
pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// `true` when `node` has the anonymous token `token` as a direct child,
/// e.g. the `?` of an optional property.
pub fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

/// The `/** .. */` block closest before `node`, looking past separators
/// and ordinary comments.
pub fn doc_comment(node: Node<'_>, src: &str) -> Option<String> {
    let mut prev = node.prev_sibling();
    while let Some(p) = prev {
        match p.kind() {
            ";" | "," => {}
            "comment" => {
                let comment = text(p, src);
                if comment.starts_with("/**") && comment != "/**/" {
                    return Some(comment.to_string());
                }
            }
            _ => return None,
        }
        prev = p.prev_sibling();
    }
    None
}

/// Contents of a `string` node without its quotes.
pub fn string_value(node: Node<'_>, src: &str) -> String {
    let raw = text(node, src);
    let inner = raw
        .get(1..raw.len().saturating_sub(1))
        .filter(|_| raw.len() >= 2)
        .unwrap_or_default();
    inner.to_string()
}

/// Source text with every whitespace run reduced to one space.
pub fn collapsed(node: Node<'_>, src: &str) -> String {
    text(node, src).split_whitespace().collect::<Vec<_>>().join(" ")
}
