//! propdoc: JSDoc-aware documentation records for component props
//! declared in TypeScript.
//!
//! ```no_run
//! let docs = propdoc::parse(&["src/Button.tsx"], propdoc::ParserOptions::default());
//! for doc in &docs {
//!     println!("{}: {} props", doc.export_name, doc.props.len());
//! }
//! ```

pub mod checker;
pub mod config;
pub mod error;
pub mod jsdoc;
pub mod model;
pub mod parser;
pub mod render;

use std::path::Path;

pub use config::{load_tsconfig, CompilerOptions, DuplicateExports, ParserOptions};
pub use error::{Error, Result};
pub use model::{ComponentDoc, JsDoc, PropItem, PropItemType};
pub use parser::filter::{PropFilter, StaticPropFilter};
pub use parser::FileParser;

/// Parse `paths` with the default compiler options.
pub fn parse<P: AsRef<Path>>(paths: &[P], options: ParserOptions) -> Vec<ComponentDoc> {
    with_default_config(options).parse(paths)
}

pub fn with_default_config(options: ParserOptions) -> FileParser {
    with_compiler_options(CompilerOptions::defaults(), options)
}

/// A parser using the compiler options of a `tsconfig.json`.
pub fn with_custom_config(tsconfig: impl AsRef<Path>, options: ParserOptions) -> Result<FileParser> {
    let compiler_options = load_tsconfig(tsconfig.as_ref())?;
    Ok(with_compiler_options(compiler_options, options))
}

pub fn with_compiler_options(compiler_options: CompilerOptions, options: ParserOptions) -> FileParser {
    FileParser::new(compiler_options, options)
}
