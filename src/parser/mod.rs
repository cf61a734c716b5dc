//! Declaration info builder. Turns exported props declarations into
//! `ComponentDoc` records.
//!
//! `Parser` reads what the host reports (description text plus canonical
//! tag lines). `TagReassembly` wraps any `DocgenAdapter` and splits out tags
//! the host left inside descriptions.

pub mod filter;

use crate::checker::{CodeDefaults, DeclarationKind, FileId, Program, SymbolId, TypeChecker, TypeInfo};
use crate::config::{CompilerOptions, DuplicateExports, ParserOptions};
use crate::jsdoc::{canonicalize, collect_tag_lines, split_description};
use crate::model::{Component, ComponentDoc, DefaultValue, EnumValue, JsDoc, PropItem, PropItemType, Props};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static RE_LEADING_NON_ALPHA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^A-Za-z]*").unwrap());

static RE_NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

/// The three lookups a docgen pass is made of.
pub trait DocgenAdapter {
    /// `None` for anything that is not an interface or type alias.
    fn component_info(&self, symbol: SymbolId) -> Option<ComponentDoc>;
    fn props_info(&self, symbol: SymbolId, defaults: &CodeDefaults) -> Props;
    fn docgen_type(&self, ty: &TypeInfo) -> PropItemType;
    /// Defaults assigned in code for the props `symbol` declares.
    fn code_defaults(&self, symbol: SymbolId) -> CodeDefaults;
}

pub struct Parser<'a, C: TypeChecker> {
    checker: &'a C,
    options: &'a ParserOptions,
}

impl<'a, C: TypeChecker> Parser<'a, C> {
    pub fn new(checker: &'a C, options: &'a ParserOptions) -> Self {
        Self { checker, options }
    }

    /// Description and tags of a symbol as the host split them.
    pub fn full_js_doc_comment(&self, symbol: SymbolId) -> JsDoc {
        let Some(description) = self.checker.documentation_comment(symbol) else {
            return JsDoc::default();
        };
        let lines: Vec<String> = self
            .checker
            .js_doc_tags(symbol)
            .iter()
            .map(canonicalize)
            .collect();

        JsDoc {
            description,
            tags: collect_tag_lines(&lines),
        }
    }

    fn prop_item(&self, prop: SymbolId, defaults: &CodeDefaults) -> PropItem {
        let name = self.checker.symbol_name(prop).to_string();
        let ty = self.docgen_type(&self.checker.type_of_symbol(prop));
        let optional = self.checker.is_optional(prop);
        let JsDoc { description, tags } = self.full_js_doc_comment(prop);

        let code_default = defaults.get(&name);
        let default_value = match code_default {
            Some(value) => Some(DefaultValue { value: value.clone() }),
            None => default_from_tags(&tags.get("default").cloned()),
        };

        PropItem {
            required: !optional && code_default.is_none(),
            name,
            ty,
            description,
            default_value,
            tags,
        }
    }
}

fn default_from_tags(tag: &Option<String>) -> Option<DefaultValue> {
    tag.as_ref()
        .filter(|value| !value.is_empty())
        .map(|value| DefaultValue { value: value.clone() })
}

impl<C: TypeChecker> DocgenAdapter for Parser<'_, C> {
    fn component_info(&self, symbol: SymbolId) -> Option<ComponentDoc> {
        let name = self.checker.symbol_name(symbol);
        let Some(declaration) = self.checker.declarations(symbol).first() else {
            tracing::debug!(export = name, "skipping export without declarations");
            return None;
        };
        if !matches!(declaration.kind, DeclarationKind::Interface | DeclarationKind::TypeAlias) {
            tracing::debug!(export = name, "skipping export that is not a props declaration");
            return None;
        }

        let JsDoc { description, tags } = self.full_js_doc_comment(symbol);
        let defaults = self.code_defaults(symbol);

        Some(ComponentDoc {
            export_name: name.to_string(),
            description,
            tags,
            props: self.props_info(symbol, &defaults),
            methods: Vec::new(),
            block: Some((declaration.pos, declaration.end)),
            mtime: None,
        })
    }

    fn props_info(&self, symbol: SymbolId, defaults: &CodeDefaults) -> Props {
        let declared = self.checker.declared_type(symbol);
        let properties = if declared.properties.is_empty() {
            declared.constituents.into_iter().flatten().collect()
        } else {
            declared.properties
        };

        let mut props = Props::new();
        for prop in properties {
            let item = self.prop_item(prop, defaults);
            props.insert(item.name.clone(), item);
        }
        props
    }

    fn docgen_type(&self, ty: &TypeInfo) -> PropItemType {
        match &ty.string_literals {
            Some(literals) if self.options.should_extract_literal_values_from_enum => PropItemType {
                name: "enum".to_string(),
                raw: Some(ty.text.clone()),
                value: Some(
                    literals
                        .iter()
                        .map(|literal| EnumValue {
                            value: format!("\"{literal}\""),
                        })
                        .collect(),
                ),
            },
            _ => PropItemType::named(ty.text.clone()),
        }
    }

    fn code_defaults(&self, symbol: SymbolId) -> CodeDefaults {
        self.checker.code_defaults(symbol)
    }
}

/// Splits `\n@tag` lines out of component and prop descriptions produced
/// by the wrapped adapter.
pub struct TagReassembly<A> {
    inner: A,
}

impl<A: DocgenAdapter> TagReassembly<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }
}

/// A default assigned in code stays. Otherwise the default follows the
/// merged `default` tag, where description tags win over host tags.
fn reassemble_prop(prop: &mut PropItem, defaults: &CodeDefaults) {
    let split = split_description(&prop.description);
    prop.description = split.description;
    prop.tags.extend(split.tags);
    if !defaults.contains_key(&prop.name) {
        prop.default_value = default_from_tags(&prop.tags.get("default").cloned());
    }
}

impl<A: DocgenAdapter> DocgenAdapter for TagReassembly<A> {
    fn component_info(&self, symbol: SymbolId) -> Option<ComponentDoc> {
        let mut doc = self.inner.component_info(symbol)?;
        let split = split_description(&doc.description);
        doc.description = split.description;
        doc.tags.extend(split.tags);
        let defaults = self.inner.code_defaults(symbol);
        doc.props.values_mut().for_each(|prop| reassemble_prop(prop, &defaults));
        Some(doc)
    }

    fn props_info(&self, symbol: SymbolId, defaults: &CodeDefaults) -> Props {
        let mut props = self.inner.props_info(symbol, defaults);
        props.values_mut().for_each(|prop| reassemble_prop(prop, defaults));
        props
    }

    fn docgen_type(&self, ty: &TypeInfo) -> PropItemType {
        self.inner.docgen_type(ty)
    }

    fn code_defaults(&self, symbol: SymbolId) -> CodeDefaults {
        self.inner.code_defaults(symbol)
    }
}

/// Build the docs of one file: every qualifying export, filtered props,
/// duplicate names collapsed. The prop filter sees a default export under
/// the name `default`; the file-derived name is applied afterwards.
pub fn component_docs<C, A>(checker: &C, adapter: &A, file: FileId, options: &ParserOptions) -> Vec<ComponentDoc>
where
    C: TypeChecker,
    A: DocgenAdapter,
{
    let mut docs = Vec::new();
    for symbol in checker.exports_of_module(file) {
        let Some(mut doc) = adapter.component_info(symbol) else {
            continue;
        };
        if let Some(filter) = &options.prop_filter {
            let component = Component {
                name: doc.export_name.clone(),
            };
            doc.props.retain(|_, prop| filter.allows(prop, &component));
        }
        if doc.export_name == "default" {
            doc.export_name = default_export_name(checker.file_name(file));
        }
        doc.mtime = checker.modified(file);
        docs.push(doc);
    }
    dedupe_exports(docs, options.duplicate_exports)
}

/// Collapse records that share an export name.
pub fn dedupe_exports(docs: Vec<ComponentDoc>, policy: DuplicateExports) -> Vec<ComponentDoc> {
    let keep: Vec<bool> = (0..docs.len())
        .map(|i| {
            let name = &docs[i].export_name;
            match policy {
                DuplicateExports::KeepLast => docs[i + 1..].iter().all(|d| d.export_name != *name),
                DuplicateExports::KeepFirst => docs[..i].iter().all(|d| d.export_name != *name),
            }
        })
        .collect();

    docs.into_iter()
        .zip(keep)
        .filter_map(|(doc, keep)| {
            if !keep {
                tracing::debug!(export = %doc.export_name, "dropping duplicate export");
            }
            keep.then_some(doc)
        })
        .collect()
}

/// Name for a file's default export: the file stem (or the directory name
/// for `index` files) reduced to a JS identifier.
pub fn default_export_name(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let name = if stem == "index" {
        path.parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    } else {
        stem
    };

    let trimmed = RE_LEADING_NON_ALPHA.replace(name, "");
    let identifier = RE_NON_ALNUM.replace_all(&trimmed, "");
    if identifier.is_empty() {
        "DefaultName".to_string()
    } else {
        identifier.into_owned()
    }
}

/// Parses files with a fixed set of compiler and parser options.
#[derive(Debug)]
pub struct FileParser {
    compiler_options: CompilerOptions,
    parser_options: ParserOptions,
}

impl FileParser {
    pub fn new(compiler_options: CompilerOptions, parser_options: ParserOptions) -> Self {
        Self {
            compiler_options,
            parser_options,
        }
    }

    pub fn compiler_options(&self) -> &CompilerOptions {
        &self.compiler_options
    }

    /// Scan `paths` into a fresh program and document every file of it.
    pub fn parse<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<ComponentDoc> {
        self.parse_with_program_provider(paths, || Program::new(paths, &self.compiler_options))
    }

    /// Like `parse`, with the program supplied by the caller.
    pub fn parse_with_program_provider<P, C, F>(&self, paths: &[P], provider: F) -> Vec<ComponentDoc>
    where
        P: AsRef<Path>,
        C: TypeChecker,
        F: FnOnce() -> C,
    {
        let checker = provider();
        let adapter = TagReassembly::new(Parser::new(&checker, &self.parser_options));

        paths
            .iter()
            .filter_map(|path| {
                let file = checker.source_file(path.as_ref());
                if file.is_none() {
                    tracing::debug!(path = %path.as_ref().display(), "no source file in program");
                }
                file
            })
            .flat_map(|file| component_docs(&checker, &adapter, file, &self.parser_options))
            .collect()
    }
}
