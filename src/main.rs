//! propdoc: document the props of React components declared in TypeScript.
//!
//! - **stdout mode**: `propdoc src/components/*.tsx`
//! - **directory mode**: `propdoc -o docs/props -f markdown src/components`

use anyhow::{Context, Result};
use clap::Parser;
use propdoc::checker::Program;
use propdoc::{CompilerOptions, DuplicateExports, FileParser, ParserOptions, PropFilter, StaticPropFilter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "propdoc",
    about = "Extract prop documentation from TypeScript component declarations"
)]
struct Cli {
    /// Input files, directories or glob patterns
    #[arg(required = true)]
    files: Vec<String>,

    /// Output directory. Prints everything to stdout when omitted.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: json (default), markdown
    #[arg(short = 'f', long, default_value = "json")]
    format: String,

    /// tsconfig.json to take compiler options from
    #[arg(short = 'p', long)]
    project: Option<PathBuf>,

    /// Spell out the members of string literal unions
    #[arg(long)]
    extract_enum_values: bool,

    /// Drop props with this name. Can be specified multiple times.
    #[arg(long = "skip-prop", value_name = "NAME")]
    skip_props: Vec<String>,

    /// Drop props without a description
    #[arg(long)]
    skip_undocumented: bool,

    /// Keep the first of several exports sharing a name instead of the last
    #[arg(long)]
    keep_first_export: bool,

    /// Log skipped files and declarations
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let renderer = propdoc::render::create_renderer(&cli.format)?;
    let parser = build_parser(&cli)?;
    let input_files = expand_globs(&cli.files)?;

    let Some(output_dir) = cli.output.as_deref() else {
        let docs = parser.parse(&input_files);
        print!("{}", renderer.render(&docs)?);
        return Ok(());
    };

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let program = Program::new(&input_files, parser.compiler_options());
    let ext = renderer.file_extension();
    for path in &input_files {
        let file_docs = parser.parse_with_program_provider(std::slice::from_ref(path), || &program);
        // Skip files without props declarations (e.g. utility modules)
        if file_docs.is_empty() {
            continue;
        }

        let out_path = output_dir.join(format!("{}.{}", derive_output_name(path), ext));
        fs::write(&out_path, renderer.render(&file_docs)?)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`, `debug` with -v).
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn build_parser(cli: &Cli) -> Result<FileParser> {
    let prop_filter = (!cli.skip_props.is_empty() || cli.skip_undocumented).then(|| {
        PropFilter::Static(StaticPropFilter {
            skip_props_with_name: cli.skip_props.clone(),
            skip_props_without_doc: cli.skip_undocumented,
        })
    });
    let options = ParserOptions {
        prop_filter,
        should_extract_literal_values_from_enum: cli.extract_enum_values,
        duplicate_exports: if cli.keep_first_export {
            DuplicateExports::KeepFirst
        } else {
            DuplicateExports::KeepLast
        },
    };

    match &cli.project {
        Some(tsconfig) => Ok(propdoc::with_custom_config(tsconfig, options)?),
        None => Ok(propdoc::with_compiler_options(CompilerOptions::defaults(), options)),
    }
}

/// File extensions recognized as source files.
const SUPPORTED_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && p.extension().and_then(|e| e.to_str()).is_some_and(is_supported) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!(pattern = %pattern, "no files matched");
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

fn is_supported(ext: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&ext)
}

/// Output file name (without extension) for a source path.
/// "src/Button.tsx" → "Button", "types/props.d.ts" → "props"
fn derive_output_name(source: &Path) -> String {
    let filename = source
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    filename
        .strip_suffix(".d.ts")
        .or_else(|| filename.strip_suffix(".tsx"))
        .or_else(|| filename.strip_suffix(".ts"))
        .unwrap_or(&filename)
        .to_string()
}
