//! Scanner-backed `TypeChecker`: every source file is scanned once and all
//! exported declarations are resolved up front into a flat symbol arena.

use super::comment::{self, DocComment};
use super::scan::{self, DeclBody, ScannedFile, TypeDecl};
use super::syntax::Dialect;
use super::types::TypeExpr;
use super::{
    CodeDefaults, Declaration, DeclarationKind, DeclaredType, FileId, SymbolId, TypeChecker,
    TypeInfo,
};
use crate::config::CompilerOptions;
use crate::model::RawTag;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

#[derive(Debug)]
struct SourceFile {
    path: PathBuf,
    /// Milliseconds since the Unix epoch.
    modified: Option<u64>,
    exports: Vec<SymbolId>,
}

#[derive(Debug)]
struct SymbolData {
    name: String,
    declarations: Vec<Declaration>,
    optional: bool,
    doc: Option<DocComment>,
    ty: Option<TypeInfo>,
    declared: DeclaredType,
    defaults: CodeDefaults,
}

#[derive(Debug)]
pub struct Program {
    options: CompilerOptions,
    files: Vec<SourceFile>,
    symbols: Vec<SymbolData>,
}

impl Program {
    /// Read and scan `paths`. A file that cannot be read is left out of the
    /// program, so later lookups of it find nothing.
    pub fn new<P: AsRef<Path>>(paths: &[P], options: &CompilerOptions) -> Self {
        let mut program = Self::empty(options);
        for path in paths {
            let path = path.as_ref();
            match fs::read_to_string(path) {
                Ok(src) => program.add_source(path, &src, modified_millis(path)),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable source file"),
            }
        }
        program
    }

    /// Build a program from in-memory sources.
    pub fn from_sources<I, P, S>(sources: I, options: &CompilerOptions) -> Self
    where
        I: IntoIterator<Item = (P, S)>,
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let mut program = Self::empty(options);
        for (path, src) in sources {
            program.add_source(path.as_ref(), src.as_ref(), None);
        }
        program
    }

    fn empty(options: &CompilerOptions) -> Self {
        Self {
            options: options.clone(),
            files: Vec::new(),
            symbols: Vec::new(),
        }
    }

    fn alloc(&mut self, data: SymbolData) -> SymbolId {
        self.symbols.push(data);
        SymbolId(self.symbols.len() - 1)
    }

    fn add_source(&mut self, path: &Path, src: &str, modified: Option<u64>) {
        let Some(scanned) = scan::scan(src, Dialect::for_path(path)) else {
            tracing::warn!(path = %path.display(), "skipping source file that could not be parsed");
            return;
        };
        let mut resolver = Resolver::new(&scanned.type_decls);
        let mut exports = Vec::with_capacity(scanned.exports.len());

        for export in &scanned.exports {
            let (declared, defaults) = match export.type_decl {
                Some(idx) => {
                    let resolved = resolver.declaration(idx);
                    let properties = self.alloc_properties(resolved.properties, &mut resolver);
                    let constituents = resolved
                        .constituents
                        .into_iter()
                        .map(|props| self.alloc_properties(props, &mut resolver))
                        .collect();
                    let defaults = code_defaults_for(&scanned, &scanned.type_decls[idx].name);
                    (
                        DeclaredType {
                            properties,
                            constituents,
                        },
                        defaults,
                    )
                }
                None => (DeclaredType::default(), CodeDefaults::new()),
            };

            let id = self.alloc(SymbolData {
                name: export.name.clone(),
                declarations: vec![Declaration {
                    kind: export.kind,
                    pos: export.span.0,
                    end: export.span.1,
                }],
                optional: false,
                doc: export.doc.as_deref().map(comment::parse),
                ty: None,
                declared,
                defaults,
            });
            exports.push(id);
        }

        tracing::debug!(path = %path.display(), exports = exports.len(), "scanned source file");
        self.files.push(SourceFile {
            path: path.to_path_buf(),
            modified,
            exports,
        });
    }

    fn alloc_properties(&mut self, props: PropSet, resolver: &mut Resolver<'_>) -> Vec<SymbolId> {
        props
            .into_values()
            .map(|prop| {
                let ty = self.type_info(&prop.ty, prop.optional, resolver);
                self.alloc(SymbolData {
                    name: prop.name,
                    declarations: vec![Declaration {
                        kind: DeclarationKind::Other,
                        pos: prop.span.0,
                        end: prop.span.1,
                    }],
                    optional: prop.optional,
                    doc: prop.doc.as_deref().map(comment::parse),
                    ty: Some(ty),
                    declared: DeclaredType::default(),
                    defaults: CodeDefaults::new(),
                })
            })
            .collect()
    }

    fn type_info(&self, expr: &TypeExpr, optional: bool, resolver: &mut Resolver<'_>) -> TypeInfo {
        if optional && self.options.strict_null_checks() {
            return TypeInfo::text(format!("{} | undefined", expr.render()));
        }
        TypeInfo {
            text: expr.render(),
            string_literals: resolver.string_literals(expr),
        }
    }

    fn symbol(&self, id: SymbolId) -> &SymbolData {
        &self.symbols[id.0]
    }
}

/// Defaults of every component whose props are typed as `props_type`.
fn code_defaults_for(file: &ScannedFile, props_type: &str) -> CodeDefaults {
    let mut defaults = CodeDefaults::new();
    for (component, ty) in &file.component_props {
        if ty != props_type {
            continue;
        }
        for (owner, entries) in &file.default_props {
            if owner == component {
                defaults.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
    }
    defaults
}

impl TypeChecker for Program {
    fn source_file(&self, path: &Path) -> Option<FileId> {
        self.files.iter().position(|f| f.path.as_path() == path).map(FileId)
    }

    fn file_name(&self, file: FileId) -> &Path {
        &self.files[file.0].path
    }

    fn modified(&self, file: FileId) -> Option<u64> {
        self.files[file.0].modified
    }

    fn exports_of_module(&self, file: FileId) -> Vec<SymbolId> {
        self.files[file.0].exports.clone()
    }

    fn symbol_name(&self, symbol: SymbolId) -> &str {
        &self.symbol(symbol).name
    }

    fn declarations(&self, symbol: SymbolId) -> &[Declaration] {
        &self.symbol(symbol).declarations
    }

    fn is_optional(&self, symbol: SymbolId) -> bool {
        self.symbol(symbol).optional
    }

    fn declared_type(&self, symbol: SymbolId) -> DeclaredType {
        self.symbol(symbol).declared.clone()
    }

    fn type_of_symbol(&self, symbol: SymbolId) -> TypeInfo {
        self.symbol(symbol)
            .ty
            .clone()
            .unwrap_or_else(|| TypeInfo::text("any"))
    }

    fn documentation_comment(&self, symbol: SymbolId) -> Option<String> {
        self.symbol(symbol).doc.as_ref().map(|d| d.description.clone())
    }

    fn js_doc_tags(&self, symbol: SymbolId) -> Vec<RawTag> {
        self.symbol(symbol)
            .doc
            .as_ref()
            .map(|d| d.tags.clone())
            .unwrap_or_default()
    }

    fn code_defaults(&self, symbol: SymbolId) -> CodeDefaults {
        self.symbol(symbol).defaults.clone()
    }
}

fn modified_millis(path: &Path) -> Option<u64> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    let since_epoch = modified.duration_since(UNIX_EPOCH).ok()?;
    u64::try_from(since_epoch.as_millis()).ok()
}

// -- Member resolution --------------------------------------------------------

#[derive(Debug, Clone)]
struct ResolvedProp {
    name: String,
    optional: bool,
    ty: TypeExpr,
    doc: Option<String>,
    span: (usize, usize),
}

type PropSet = IndexMap<String, ResolvedProp>;

#[derive(Debug, Default)]
struct Resolution {
    properties: PropSet,
    constituents: Vec<PropSet>,
}

impl Resolution {
    fn flat(properties: PropSet) -> Self {
        Self {
            properties,
            constituents: Vec::new(),
        }
    }
}

/// Resolves in-file type references. Names currently being resolved are
/// tracked so recursive types terminate.
struct Resolver<'a> {
    decls: &'a [TypeDecl],
    by_name: HashMap<&'a str, Vec<usize>>,
    visiting: Vec<String>,
}

impl<'a> Resolver<'a> {
    fn new(decls: &'a [TypeDecl]) -> Self {
        let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
        for (idx, decl) in decls.iter().enumerate() {
            by_name.entry(decl.name.as_str()).or_default().push(idx);
        }
        Self {
            decls,
            by_name,
            visiting: Vec::new(),
        }
    }

    /// Properties of the declaration at `idx`, merged with every other
    /// declaration of the same name.
    fn declaration(&mut self, idx: usize) -> Resolution {
        let name = self.decls[idx].name.clone();
        if self.by_name.get(name.as_str()).is_some_and(|all| all.len() > 1) {
            return self.named(&name);
        }
        self.visiting.push(name);
        let resolution = self.body(idx);
        self.visiting.pop();
        resolution
    }

    fn named(&mut self, name: &str) -> Resolution {
        if self.visiting.iter().any(|n| n == name) {
            return Resolution::default();
        }
        let Some(indices) = self.by_name.get(name).cloned() else {
            return Resolution::default();
        };

        self.visiting.push(name.to_string());
        let mut merged = Resolution::default();
        for idx in &indices {
            let r = self.body(*idx);
            merged.properties.extend(r.properties);
            if indices.len() == 1 {
                merged.constituents = r.constituents;
            }
        }
        self.visiting.pop();
        merged
    }

    fn body(&mut self, idx: usize) -> Resolution {
        let decls = self.decls;
        match &decls[idx].body {
            DeclBody::Interface { extends, members } => {
                let mut props = PropSet::new();
                for m in members {
                    props.insert(
                        m.name.clone(),
                        ResolvedProp {
                            name: m.name.clone(),
                            optional: m.optional,
                            ty: m.ty.clone(),
                            doc: m.doc.clone(),
                            span: m.span,
                        },
                    );
                }
                // inherited members never replace declared ones
                for base in extends {
                    for (name, prop) in self.expr(base).properties {
                        props.entry(name).or_insert(prop);
                    }
                }
                Resolution::flat(props)
            }
            DeclBody::Alias(expr) => self.expr(expr),
        }
    }

    fn expr(&mut self, expr: &TypeExpr) -> Resolution {
        match expr {
            TypeExpr::Object(members) => Resolution::flat(
                members
                    .iter()
                    .map(|m| {
                        (
                            m.name.clone(),
                            ResolvedProp {
                                name: m.name.clone(),
                                optional: m.optional,
                                ty: m.ty.clone(),
                                doc: m.doc.clone(),
                                span: m.span,
                            },
                        )
                    })
                    .collect(),
            ),
            TypeExpr::Intersection(parts) => {
                let mut merged = PropSet::new();
                let mut constituents = Vec::with_capacity(parts.len());
                for part in parts {
                    let r = self.expr(part);
                    merged.extend(r.properties.clone());
                    constituents.push(r.properties);
                }
                Resolution {
                    properties: merged,
                    constituents,
                }
            }
            TypeExpr::Union(parts) => {
                let constituents: Vec<PropSet> = parts.iter().map(|p| self.expr(p).properties).collect();
                let common = match constituents.split_first() {
                    Some((first, rest)) => first
                        .iter()
                        .filter(|(name, _)| rest.iter().all(|other| other.contains_key(*name)))
                        .map(|(name, prop)| (name.clone(), prop.clone()))
                        .collect(),
                    None => PropSet::new(),
                };
                Resolution {
                    properties: common,
                    constituents,
                }
            }
            TypeExpr::Reference { name, args } => self.reference(name, args),
            TypeExpr::StringLiteral(_) | TypeExpr::Other(_) => Resolution::default(),
        }
    }

    fn reference(&mut self, name: &str, args: &[TypeExpr]) -> Resolution {
        match (name, args) {
            ("Partial", [inner]) => Resolution::flat(self.with_optional(inner, true)),
            ("Required", [inner]) => Resolution::flat(self.with_optional(inner, false)),
            ("Readonly" | "NonNullable", [inner]) => self.expr(inner),
            ("Pick", [inner, keys]) => {
                let keys = self.literal_members(keys).unwrap_or_default();
                let mut props = self.expr(inner).properties;
                props.retain(|name, _| keys.contains(name));
                Resolution::flat(props)
            }
            ("Omit", [inner, keys]) => {
                let keys = self.literal_members(keys).unwrap_or_default();
                let mut props = self.expr(inner).properties;
                props.retain(|name, _| !keys.contains(name));
                Resolution::flat(props)
            }
            _ => self.named(name),
        }
    }

    fn with_optional(&mut self, inner: &TypeExpr, optional: bool) -> PropSet {
        let mut props = self.expr(inner).properties;
        for prop in props.values_mut() {
            prop.optional = optional;
        }
        props
    }

    /// Members of a string-literal union, looking through in-file aliases.
    /// `None` when any member is not a string literal.
    fn literal_members(&mut self, expr: &TypeExpr) -> Option<Vec<String>> {
        let mut out = Vec::new();
        self.flatten_literals(expr, &mut out).then_some(out)
    }

    fn flatten_literals(&mut self, expr: &TypeExpr, out: &mut Vec<String>) -> bool {
        match expr {
            TypeExpr::StringLiteral(value) => {
                if !out.contains(value) {
                    out.push(value.clone());
                }
                true
            }
            TypeExpr::Union(parts) => parts.iter().all(|p| self.flatten_literals(p, out)),
            TypeExpr::Reference { name, args } if args.is_empty() => {
                if self.visiting.iter().any(|n| n == name) {
                    return false;
                }
                let decls = self.decls;
                let Some(indices) = self.by_name.get(name.as_str()).cloned() else {
                    return false;
                };
                let [idx] = indices.as_slice() else {
                    return false;
                };
                let DeclBody::Alias(inner) = &decls[*idx].body else {
                    return false;
                };
                self.visiting.push(name.clone());
                let ok = self.flatten_literals(inner, out);
                self.visiting.pop();
                ok
            }
            _ => false,
        }
    }

    /// String literal members of a union type, or `None` if the type is not
    /// a union of string literals only.
    fn string_literals(&mut self, expr: &TypeExpr) -> Option<Vec<String>> {
        self.literal_members(expr).filter(|values| values.len() > 1)
    }
}
