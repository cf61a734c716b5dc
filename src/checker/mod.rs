//! Host adapter: the symbol-table oracle the docgen core queries, and the
//! bundled TypeScript scanner that answers it.

pub mod comment;

pub mod program;
pub mod scan;
pub mod syntax;
pub mod types;

use crate::model::RawTag;
use indexmap::IndexMap;
use std::path::Path;

pub use program::Program;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(pub usize);

/// Shape of a declaration. Only interfaces and type aliases carry props.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Interface,
    TypeAlias,
    /// Functions, classes, variables, re-export specifiers, properties.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub pos: usize,
    pub end: usize,
}

/// Properties of a symbol's declared type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredType {
    pub properties: Vec<SymbolId>,
    /// Property lists of the members of a top-level union or intersection.
    pub constituents: Vec<Vec<SymbolId>>,
}

/// The type of a property as the host renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub text: String,
    /// Set when the type is a union whose every member is a string literal.
    pub string_literals: Option<Vec<String>>,
}

impl TypeInfo {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            string_literals: None,
        }
    }
}

/// Prop name → default value as written in code.
pub type CodeDefaults = IndexMap<String, String>;

/// Read-only view of a checked program's symbol table.
pub trait TypeChecker {
    fn source_file(&self, path: &Path) -> Option<FileId>;
    fn file_name(&self, file: FileId) -> &Path;
    /// Last modification time of the file in milliseconds since the Unix
    /// epoch, when known.
    fn modified(&self, file: FileId) -> Option<u64>;
    /// Exported symbols of a module, in declaration order.
    fn exports_of_module(&self, file: FileId) -> Vec<SymbolId>;
    fn symbol_name(&self, symbol: SymbolId) -> &str;
    fn declarations(&self, symbol: SymbolId) -> &[Declaration];
    fn is_optional(&self, symbol: SymbolId) -> bool;
    fn declared_type(&self, symbol: SymbolId) -> DeclaredType;
    fn type_of_symbol(&self, symbol: SymbolId) -> TypeInfo;
    /// Free-text part of the symbol's doc comment. `None` when the symbol
    /// has no documentation at all.
    fn documentation_comment(&self, symbol: SymbolId) -> Option<String>;
    fn js_doc_tags(&self, symbol: SymbolId) -> Vec<RawTag>;
    /// Defaults supplied at runtime for the props declared by `symbol`.
    fn code_defaults(&self, symbol: SymbolId) -> CodeDefaults;
}

impl<T: TypeChecker + ?Sized> TypeChecker for &T {
    fn source_file(&self, path: &Path) -> Option<FileId> {
        (**self).source_file(path)
    }
    fn file_name(&self, file: FileId) -> &Path {
        (**self).file_name(file)
    }
    fn modified(&self, file: FileId) -> Option<u64> {
        (**self).modified(file)
    }
    fn exports_of_module(&self, file: FileId) -> Vec<SymbolId> {
        (**self).exports_of_module(file)
    }
    fn symbol_name(&self, symbol: SymbolId) -> &str {
        (**self).symbol_name(symbol)
    }
    fn declarations(&self, symbol: SymbolId) -> &[Declaration] {
        (**self).declarations(symbol)
    }
    fn is_optional(&self, symbol: SymbolId) -> bool {
        (**self).is_optional(symbol)
    }
    fn declared_type(&self, symbol: SymbolId) -> DeclaredType {
        (**self).declared_type(symbol)
    }
    fn type_of_symbol(&self, symbol: SymbolId) -> TypeInfo {
        (**self).type_of_symbol(symbol)
    }
    fn documentation_comment(&self, symbol: SymbolId) -> Option<String> {
        (**self).documentation_comment(symbol)
    }
    fn js_doc_tags(&self, symbol: SymbolId) -> Vec<RawTag> {
        (**self).js_doc_tags(symbol)
    }
    fn code_defaults(&self, symbol: SymbolId) -> CodeDefaults {
        (**self).code_defaults(symbol)
    }
}
