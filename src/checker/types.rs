//! Type expressions and object members, read from tree-sitter type nodes.
//!
//! Only the shapes props extraction needs get structure (unions,
//! intersections, string literals, references, object literals); everything
//! else is kept as rendered text.

use super::syntax::{collapsed, doc_comment, has_token, named_children, string_value, text};
use tree_sitter::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Union(Vec<TypeExpr>),
    Intersection(Vec<TypeExpr>),
    StringLiteral(String),
    Reference { name: String, args: Vec<TypeExpr> },
    Object(Vec<Member>),
    Other(String),
}

/// A property signature of an interface or object literal type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub optional: bool,
    pub ty: TypeExpr,
    pub doc: Option<String>,
    pub span: (usize, usize),
}

impl TypeExpr {
    pub fn render(&self) -> String {
        match self {
            TypeExpr::Union(parts) => join(parts, " | "),
            TypeExpr::Intersection(parts) => join(parts, " & "),
            TypeExpr::StringLiteral(value) => quote(value),
            TypeExpr::Reference { name, args } if args.is_empty() => name.clone(),
            TypeExpr::Reference { name, args } => format!("{}<{}>", name, join(args, ", ")),
            TypeExpr::Object(members) if members.is_empty() => "{}".to_string(),
            TypeExpr::Object(members) => {
                let mut out = String::from("{ ");
                for m in members {
                    let q = if m.optional { "?" } else { "" };
                    out.push_str(&format!("{}{}: {}; ", m.name, q, m.ty.render()));
                }
                out.push('}');
                out
            }
            TypeExpr::Other(text) => text.clone(),
        }
    }
}

fn join(parts: &[TypeExpr], sep: &str) -> String {
    parts.iter().map(TypeExpr::render).collect::<Vec<_>>().join(sep)
}

/// String literals always print double-quoted.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Convert a type node (or the `type_annotation` wrapping one).
pub fn type_expr(node: Node<'_>, src: &str) -> TypeExpr {
    match node.kind() {
        "type_annotation" | "parenthesized_type" => match named_children(node).first() {
            Some(inner) => type_expr(*inner, src),
            None => TypeExpr::Other("any".to_string()),
        },
        "union_type" => flattened(node, src, TypeExpr::Union),
        "intersection_type" => flattened(node, src, TypeExpr::Intersection),
        "literal_type" => match named_children(node).first() {
            Some(lit) if lit.kind() == "string" => TypeExpr::StringLiteral(string_value(*lit, src)),
            _ => TypeExpr::Other(collapsed(node, src)),
        },
        "type_identifier" | "nested_type_identifier" => TypeExpr::Reference {
            name: text(node, src).to_string(),
            args: Vec::new(),
        },
        "generic_type" => {
            let Some(name) = node.child_by_field_name("name") else {
                return TypeExpr::Other(collapsed(node, src));
            };
            let args = node
                .child_by_field_name("type_arguments")
                .map(|list| named_children(list).into_iter().map(|arg| type_expr(arg, src)).collect())
                .unwrap_or_default();
            TypeExpr::Reference {
                name: text(name, src).to_string(),
                args,
            }
        }
        "object_type" => TypeExpr::Object(members(node, src)),
        _ => TypeExpr::Other(collapsed(node, src)),
    }
}

/// Binary union/intersection nodes nest to the left; gather the operands
/// of a whole chain of the same operator.
fn flattened(node: Node<'_>, src: &str, build: fn(Vec<TypeExpr>) -> TypeExpr) -> TypeExpr {
    let mut parts = Vec::new();
    collect_operands(node, node.kind(), src, &mut parts);
    if parts.len() == 1 {
        parts.swap_remove(0)
    } else {
        build(parts)
    }
}

fn collect_operands(node: Node<'_>, kind: &str, src: &str, out: &mut Vec<TypeExpr>) {
    for child in named_children(node) {
        if child.kind() == kind {
            collect_operands(child, kind, src, out);
        } else {
            out.push(type_expr(child, src));
        }
    }
}

/// Property and method signatures of an interface body or object type.
/// Index, call and construct signatures have no name and are skipped.
pub fn members(body: Node<'_>, src: &str) -> Vec<Member> {
    named_children(body)
        .into_iter()
        .filter_map(|child| match child.kind() {
            "property_signature" => property(child, src),
            "method_signature" => method(child, src),
            _ => None,
        })
        .collect()
}

fn member_name(node: Node<'_>, src: &str) -> Option<String> {
    match node.kind() {
        "property_identifier" | "number" => Some(text(node, src).to_string()),
        "string" => Some(string_value(node, src)),
        _ => None,
    }
}

fn property(node: Node<'_>, src: &str) -> Option<Member> {
    let name = member_name(node.child_by_field_name("name")?, src)?;
    let ty = node
        .child_by_field_name("type")
        .map(|t| type_expr(t, src))
        .unwrap_or_else(|| TypeExpr::Other("any".to_string()));
    Some(Member {
        name,
        optional: has_token(node, "?"),
        ty,
        doc: doc_comment(node, src),
        span: (node.start_byte(), node.end_byte()),
    })
}

/// `name(params): ret` renders as `(params) => ret`.
fn method(node: Node<'_>, src: &str) -> Option<Member> {
    if has_token(node, "get") || has_token(node, "set") {
        return None;
    }
    let name = member_name(node.child_by_field_name("name")?, src)?;
    let params = node
        .child_by_field_name("parameters")
        .map(|p| collapsed(p, src))
        .unwrap_or_else(|| "()".to_string());
    let ret = node
        .child_by_field_name("return_type")
        .map(|r| type_expr(r, src).render())
        .unwrap_or_else(|| "any".to_string());
    Some(Member {
        name,
        optional: has_token(node, "?"),
        ty: TypeExpr::Other(format!("{params} => {ret}")),
        doc: doc_comment(node, src),
        span: (node.start_byte(), node.end_byte()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::syntax::{parse, Dialect};

    /// Read `src` as the right-hand side of a type alias.
    fn with_alias_value<R>(src: &str, f: impl FnOnce(Node<'_>, &str) -> R) -> R {
        let file = format!("type T = {src};");
        let tree = parse(&file, Dialect::TypeScript).unwrap();
        let alias = named_children(tree.root_node())[0];
        let value = alias.child_by_field_name("value").unwrap();
        f(value, &file)
    }

    fn ty(src: &str) -> TypeExpr {
        with_alias_value(src, type_expr)
    }

    fn members_of(src: &str) -> Vec<Member> {
        with_alias_value(src, members)
    }

    #[test]
    fn string_literal_union() {
        assert_eq!(
            ty("'blue' | 'green'"),
            TypeExpr::Union(vec![
                TypeExpr::StringLiteral("blue".into()),
                TypeExpr::StringLiteral("green".into()),
            ])
        );
        assert_eq!(ty("'blue' | 'green'").render(), "\"blue\" | \"green\"");
    }

    #[test]
    fn long_union_is_flat() {
        let TypeExpr::Union(parts) = ty("'a' | 'b' | 'c' | 'd'") else {
            panic!("expected union");
        };
        assert_eq!(parts.len(), 4);
    }

    #[test]
    fn leading_bar_is_ignored() {
        assert_eq!(ty("| 'a' | 'b'").render(), "\"a\" | \"b\"");
    }

    #[test]
    fn reference_with_arguments() {
        assert_eq!(
            ty("Pick<Props, 'a' | 'b'>"),
            TypeExpr::Reference {
                name: "Pick".into(),
                args: vec![
                    TypeExpr::Reference {
                        name: "Props".into(),
                        args: vec![]
                    },
                    ty("'a' | 'b'"),
                ],
            }
        );
        assert_eq!(ty("React.ReactNode").render(), "React.ReactNode");
    }

    #[test]
    fn function_types_render_as_text() {
        assert_eq!(ty("() => void").render(), "() => void");
        assert_eq!(ty("(e: Event, n?: number) => void").render(), "(e: Event, n?: number) => void");
    }

    #[test]
    fn array_and_parenthesized() {
        assert_eq!(ty("string[]").render(), "string[]");
        assert_eq!(ty("('a' | 'b')"), ty("'a' | 'b'"));
    }

    #[test]
    fn intersection_with_object() {
        let expr = ty("Base & { extra?: number }");
        let TypeExpr::Intersection(parts) = expr else {
            panic!("expected intersection");
        };
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1].render(), "{ extra?: number; }");
    }

    #[test]
    fn members_with_docs_and_optionality() {
        let ms = members_of(
            "{\n  /** Button color. */\n  color: 'blue' | 'green';\n\n  isDisabled?: boolean\n  'button-color': string,\n  readonly size: number\n}",
        );
        let names: Vec<&str> = ms.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["color", "isDisabled", "button-color", "size"]);
        assert_eq!(ms[0].doc.as_deref(), Some("/** Button color. */"));
        assert_eq!(ms[1].doc, None);
        assert!(!ms[0].optional);
        assert!(ms[1].optional);
        assert_eq!(ms[1].ty.render(), "boolean");
        assert_eq!(ms[3].ty.render(), "number");
    }

    #[test]
    fn multi_line_union_member() {
        let ms = members_of("{\n  size:\n    | 'small'\n    | 'large';\n  other: string;\n}");
        assert_eq!(ms.len(), 2);
        assert_eq!(ms[0].ty.render(), "\"small\" | \"large\"");
    }

    #[test]
    fn method_signature() {
        let ms = members_of("{ onChange?(value: string): void; }");
        assert_eq!(ms[0].name, "onChange");
        assert!(ms[0].optional);
        assert_eq!(ms[0].ty.render(), "(value: string) => void");
    }

    #[test]
    fn index_signature_is_skipped() {
        let ms = members_of("{ [key: string]: any; label: string }");
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].name, "label");
    }

    #[test]
    fn nested_object_member() {
        let ms = members_of("{ style: { color: string }; next: number }");
        assert_eq!(ms.len(), 2);
        assert_eq!(ms[0].ty.render(), "{ color: string; }");
    }

    #[test]
    fn member_span_covers_the_signature() {
        let file = "type T = { label: string };";
        let tree = parse(file, Dialect::TypeScript).unwrap();
        let alias = named_children(tree.root_node())[0];
        let ms = members(alias.child_by_field_name("value").unwrap(), file);
        let (start, end) = ms[0].span;
        assert_eq!(&file[start..end], "label: string");
    }
}
