//! Top-level declaration scanner.
//!
//! Walks the statements of a tree-sitter syntax tree and records exports,
//! interface / type alias declarations, component props bindings and
//! `Component.defaultProps = { .. }` assignments. Function bodies are not
//! entered, so nested declarations stay invisible.

use super::syntax::{self, has_token, named_children, string_value, text, Dialect};
use super::types::{members, type_expr, TypeExpr, Member};
use super::DeclarationKind;
use indexmap::IndexMap;
use tree_sitter::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclBody {
    Interface { extends: Vec<TypeExpr>, members: Vec<Member> },
    Alias(TypeExpr),
}

/// An interface or type alias, exported or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub body: DeclBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDecl {
    pub name: String,
    pub kind: DeclarationKind,
    pub span: (usize, usize),
    pub doc: Option<String>,
    /// Index into `ScannedFile::type_decls` for interfaces and aliases.
    pub type_decl: Option<usize>,
}

#[derive(Debug, Default)]
pub struct ScannedFile {
    pub type_decls: Vec<TypeDecl>,
    pub exports: Vec<ExportDecl>,
    /// Component name → name of its props type.
    pub component_props: Vec<(String, String)>,
    /// Component name → `defaultProps` entries as source text.
    pub default_props: Vec<(String, IndexMap<String, String>)>,
}

/// Scan one source file. `None` when no syntax tree could be built.
pub fn scan(src: &str, dialect: Dialect) -> Option<ScannedFile> {
    let tree = syntax::parse(src, dialect)?;
    let root = tree.root_node();
    if root.has_error() {
        tracing::debug!("syntax errors in source, scanning what parsed");
    }
    let mut scanner = Scanner {
        src,
        out: ScannedFile::default(),
    };
    for statement in named_children(root) {
        scanner.statement(statement);
    }
    Some(scanner.out)
}

struct Scanner<'a> {
    src: &'a str,
    out: ScannedFile,
}

impl<'a> Scanner<'a> {
    fn text(&self, node: Node<'_>) -> &'a str {
        text(node, self.src)
    }

    fn name_of(&self, node: Node<'_>) -> Option<String> {
        node.child_by_field_name("name").map(|n| self.text(n).to_string())
    }

    fn statement(&mut self, node: Node<'_>) {
        match node.kind() {
            "export_statement" => self.export(node),
            "interface_declaration" => {
                self.interface(node, None);
            }
            "type_alias_declaration" => {
                self.alias(node);
            }
            "lexical_declaration" | "variable_declaration" => {
                self.variables(node);
            }
            "function_declaration" | "generator_function_declaration" => self.function(node),
            "class_declaration" | "abstract_class_declaration" => self.class(node),
            "expression_statement" => self.default_props(node),
            "ambient_declaration" => {
                for inner in named_children(node) {
                    self.statement(inner);
                }
            }
            _ => {}
        }
    }

    fn push_export(&mut self, name: String, kind: DeclarationKind, node: Node<'_>, doc: Option<String>, type_decl: Option<usize>) {
        self.out.exports.push(ExportDecl {
            name,
            kind,
            span: (node.start_byte(), node.end_byte()),
            doc,
            type_decl,
        });
    }

    fn export(&mut self, node: Node<'_>) {
        let doc = syntax::doc_comment(node, self.src);
        let is_default = has_token(node, "default");

        if let Some(mut decl) = node.child_by_field_name("declaration") {
            if decl.kind() == "ambient_declaration" {
                match named_children(decl).first() {
                    Some(inner) => decl = *inner,
                    None => return,
                }
            }
            match decl.kind() {
                "interface_declaration" => {
                    let idx = self.interface(decl, is_default.then_some("default"));
                    let name = self.out.type_decls[idx].name.clone();
                    self.push_export(name, DeclarationKind::Interface, node, doc, Some(idx));
                }
                "type_alias_declaration" => {
                    let idx = self.alias(decl);
                    let name = self.out.type_decls[idx].name.clone();
                    self.push_export(name, DeclarationKind::TypeAlias, node, doc, Some(idx));
                }
                "lexical_declaration" | "variable_declaration" => {
                    for name in self.variables(decl) {
                        self.push_export(name, DeclarationKind::Other, node, doc.clone(), None);
                    }
                }
                _ => {
                    self.statement(decl);
                    let name = if is_default { Some("default".to_string()) } else { self.name_of(decl) };
                    if let Some(name) = name {
                        self.push_export(name, DeclarationKind::Other, node, doc, None);
                    }
                }
            }
            return;
        }

        if is_default {
            self.push_export("default".to_string(), DeclarationKind::Other, node, doc, None);
            return;
        }

        for child in named_children(node) {
            match child.kind() {
                "export_clause" => {
                    for spec in named_children(child) {
                        if spec.kind() != "export_specifier" {
                            continue;
                        }
                        let exported = spec
                            .child_by_field_name("alias")
                            .or_else(|| spec.child_by_field_name("name"));
                        if let Some(name) = exported.and_then(|n| self.export_name(n)) {
                            self.push_export(name, DeclarationKind::Other, spec, None, None);
                        }
                    }
                }
                // `export * as ns from '..'`
                "namespace_export" => {
                    if let Some(name) = named_children(child).first().and_then(|n| self.export_name(*n)) {
                        self.push_export(name, DeclarationKind::Other, node, doc.clone(), None);
                    }
                }
                _ => {}
            }
        }
    }

    fn export_name(&self, node: Node<'_>) -> Option<String> {
        match node.kind() {
            "identifier" | "type_identifier" => Some(self.text(node).to_string()),
            "string" => Some(string_value(node, self.src)),
            _ => None,
        }
    }

    /// Record `interface Name<..> extends A, B { .. }` and return its index.
    fn interface(&mut self, node: Node<'_>, name_override: Option<&str>) -> usize {
        let name = name_override
            .map(str::to_string)
            .or_else(|| self.name_of(node))
            .unwrap_or_default();
        let extends: Vec<TypeExpr> = named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "extends_type_clause")
            .flat_map(named_children)
            .map(|ty| type_expr(ty, self.src))
            .collect();
        let members: Vec<Member> = node
            .child_by_field_name("body")
            .map(|body| members(body, self.src))
            .unwrap_or_default();

        self.out.type_decls.push(TypeDecl {
            name,
            body: DeclBody::Interface { extends, members },
        });
        self.out.type_decls.len() - 1
    }

    /// Record `type Name<..> = Type` and return its index.
    fn alias(&mut self, node: Node<'_>) -> usize {
        let name = self.name_of(node).unwrap_or_default();
        let expr = node
            .child_by_field_name("value")
            .map(|value| type_expr(value, self.src))
            .unwrap_or_else(|| TypeExpr::Other("any".to_string()));
        self.out.type_decls.push(TypeDecl {
            name,
            body: DeclBody::Alias(expr),
        });
        self.out.type_decls.len() - 1
    }

    /// Binds `Props` to `Name` for `const Name: FC<Props> = ..` and
    /// `const Name = (props: Props) => ..`. Returns the declared names.
    fn variables(&mut self, node: Node<'_>) -> Vec<String> {
        let mut names = Vec::new();
        for declarator in named_children(node) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            let Some(name_node) = declarator.child_by_field_name("name") else {
                continue;
            };
            if name_node.kind() != "identifier" {
                // destructuring patterns
                continue;
            }
            let name = self.text(name_node).to_string();
            let props = declarator
                .child_by_field_name("type")
                .and_then(type_argument)
                .or_else(|| {
                    declarator
                        .child_by_field_name("value")
                        .filter(|v| matches!(v.kind(), "arrow_function" | "function_expression" | "function"))
                        .and_then(|f| f.child_by_field_name("parameters"))
                        .and_then(first_param_type)
                });
            if let Some(props) = props {
                self.bind_props(&name, props);
            }
            names.push(name);
        }
        names
    }

    /// `function Name(props: Props)` binds `Props` to `Name`.
    fn function(&mut self, node: Node<'_>) {
        let Some(name) = self.name_of(node) else {
            return;
        };
        if let Some(props) = node.child_by_field_name("parameters").and_then(first_param_type) {
            self.bind_props(&name, props);
        }
    }

    /// `class Name extends Component<Props, State>` binds `Props` to `Name`.
    fn class(&mut self, node: Node<'_>) {
        let Some(name) = self.name_of(node) else {
            return;
        };
        let props = named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "class_heritage")
            .flat_map(named_children)
            .filter(|clause| clause.kind() == "extends_clause")
            .find_map(|clause| clause.child_by_field_name("type_arguments"))
            .and_then(|args| named_children(args).into_iter().next())
            .filter(|ty| ty.kind() == "type_identifier");
        if let Some(props) = props {
            self.bind_props(&name, props);
        }
    }

    fn bind_props(&mut self, component: &str, ty: Node<'_>) {
        let ty = self.text(ty).to_string();
        self.out.component_props.push((component.to_string(), ty));
    }

    /// `Name.defaultProps = { key: value, .. }`, values kept as source text.
    fn default_props(&mut self, node: Node<'_>) {
        let Some(assign) = named_children(node).into_iter().find(|n| n.kind() == "assignment_expression") else {
            return;
        };
        let (Some(left), Some(right)) = (assign.child_by_field_name("left"), assign.child_by_field_name("right")) else {
            return;
        };
        if left.kind() != "member_expression" || right.kind() != "object" {
            return;
        }
        let (Some(object), Some(property)) = (left.child_by_field_name("object"), left.child_by_field_name("property")) else {
            return;
        };
        if object.kind() != "identifier" || self.text(property) != "defaultProps" {
            return;
        }

        let mut entries = IndexMap::new();
        for entry in named_children(right) {
            match entry.kind() {
                "pair" => {
                    let (Some(key), Some(value)) = (entry.child_by_field_name("key"), entry.child_by_field_name("value")) else {
                        continue;
                    };
                    let key = match key.kind() {
                        "property_identifier" | "number" => self.text(key).to_string(),
                        "string" => string_value(key, self.src),
                        // computed keys
                        _ => continue,
                    };
                    entries.insert(key, self.text(value).trim().to_string());
                }
                "shorthand_property_identifier" => {
                    let key = self.text(entry).to_string();
                    entries.insert(key.clone(), key);
                }
                _ => {}
            }
        }

        self.out.default_props.push((self.text(object).to_string(), entries));
    }
}

/// `Props` in an annotation like `: React.FC<Props>`.
fn type_argument(annotation: Node<'_>) -> Option<Node<'_>> {
    let ty = named_children(annotation).into_iter().next()?;
    if ty.kind() != "generic_type" {
        return None;
    }
    let args = ty.child_by_field_name("type_arguments")?;
    named_children(args)
        .into_iter()
        .next()
        .filter(|arg| arg.kind() == "type_identifier")
}

/// Type name annotating the first formal parameter.
fn first_param_type(params: Node<'_>) -> Option<Node<'_>> {
    let first = named_children(params)
        .into_iter()
        .find(|p| matches!(p.kind(), "required_parameter" | "optional_parameter"))?;
    let annotation = first.child_by_field_name("type")?;
    named_children(annotation)
        .into_iter()
        .next()
        .filter(|ty| ty.kind() == "type_identifier")
}
