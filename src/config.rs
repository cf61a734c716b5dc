//! Compiler and parser options, and `tsconfig.json` loading.

use crate::error::{Error, Result};
use crate::parser::filter::PropFilter;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// The subset of TypeScript compiler options the scanner reads. Unknown
/// options are kept in `other`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub jsx: Option<String>,
    pub module: Option<String>,
    pub target: Option<String>,
    pub strict: Option<bool>,
    pub strict_null_checks: Option<bool>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl CompilerOptions {
    /// Options used when no project file is given.
    pub fn defaults() -> Self {
        Self {
            jsx: Some("react".into()),
            module: Some("commonjs".into()),
            target: Some("latest".into()),
            ..Default::default()
        }
    }

    /// Optional properties gain `| undefined` under strict null checks.
    pub fn strict_null_checks(&self) -> bool {
        self.strict_null_checks.or(self.strict).unwrap_or(false)
    }

    /// Layer `child` on top of `self`, as `extends` does.
    fn merged_with(mut self, child: CompilerOptions) -> Self {
        self.jsx = child.jsx.or(self.jsx);
        self.module = child.module.or(self.module);
        self.target = child.target.or(self.target);
        self.strict = child.strict.or(self.strict);
        self.strict_null_checks = child.strict_null_checks.or(self.strict_null_checks);
        self.other.extend(child.other);
        self
    }
}

/// What to do when several exports of one file share a name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateExports {
    /// Keep the last record for the name, at its own position.
    #[default]
    KeepLast,
    /// Keep the first record for the name.
    KeepFirst,
}

#[derive(Debug, Default)]
pub struct ParserOptions {
    pub prop_filter: Option<PropFilter>,
    /// Render string-literal unions as `enum` descriptors with their values.
    pub should_extract_literal_values_from_enum: bool,
    pub duplicate_exports: DuplicateExports,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsConfigFile {
    extends: Option<String>,
    compiler_options: Option<CompilerOptions>,
}

/// Load the compiler options of a `tsconfig.json`, following `extends`.
pub fn load_tsconfig(path: &Path) -> Result<CompilerOptions> {
    load_chain(path, &mut Vec::new())
}

fn load_chain(path: &Path, seen: &mut Vec<PathBuf>) -> Result<CompilerOptions> {
    if seen.iter().any(|p| p == path) {
        return Err(Error::config(path, "circularity detected in extends"));
    }
    seen.push(path.to_path_buf());

    let text = fs::read_to_string(path).map_err(|e| Error::config(path, e))?;
    let file: TsConfigFile =
        serde_json::from_str(&strip_json_comments(&text)).map_err(|e| Error::config(path, e))?;

    let base = match file.extends.as_deref() {
        Some(extends) => {
            let base_path = resolve_extends(path, extends)?;
            tracing::debug!(base = %base_path.display(), "following tsconfig extends");
            load_chain(&base_path, seen)?
        }
        None => CompilerOptions::default(),
    };

    Ok(match file.compiler_options {
        Some(own) => base.merged_with(own),
        None => base,
    })
}

fn resolve_extends(from: &Path, extends: &str) -> Result<PathBuf> {
    if !(extends.starts_with("./") || extends.starts_with("../") || Path::new(extends).is_absolute()) {
        return Err(Error::config(
            from,
            format!("cannot resolve extends {extends:?}: only relative paths are supported"),
        ));
    }
    let dir = from.parent().unwrap_or_else(|| Path::new("."));
    let mut target = dir.join(extends);
    if target.extension().is_none() {
        target.set_extension("json");
    }
    Ok(target)
}

/// Drop `//` and `/* */` comments and trailing commas, which tsconfig files
/// allow and JSON does not.
pub fn strip_json_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            _ => out.push(c),
        }
    }

    strip_trailing_commas(&out)
}

fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let chars: Vec<char> = text.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        }
        if c == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        out.push(c);
    }
    out
}
