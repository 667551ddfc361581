//! Minimal CLI: load schema document(s) → (models | operations)
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::config::CodegenConfig;
use crate::descriptor::GeneratedOutput;
use crate::generate::Generator;
use crate::schema::{self, Document};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// resolve types and normalize names from an OpenAPI-style schema document
/// and print the renderer-ready descriptors
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit the model descriptors (one per schema definition)
    Models(DescriptorOut),
    /// emit the operation descriptors, grouped by tag
    Operations(DescriptorOut),
    /// emit the full generation output (models + operations)
    All(DescriptorOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns.
    /// Definitions and operations from all inputs merge into one pass.
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// prefix joined to every model name with `_`
    #[arg(long, default_value = "")]
    model_name_prefix: String,

    /// suffix joined to every model name with `_`
    #[arg(long, default_value = "")]
    model_name_suffix: String,
}

#[derive(clap::Parser, Debug)]
struct DescriptorOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn config(&self) -> CodegenConfig {
        CodegenConfig {
            model_name_prefix: self.model_name_prefix.clone(),
            model_name_suffix: self.model_name_suffix.clone(),
            ..CodegenConfig::default()
        }
    }

    /// Load every input file and merge it into one [`Document`].
    fn load_document(&self) -> Result<Document> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let mut merged = Document::default();
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file {source_path_str}"))?;
            let json_value = crate::path_de::from_str_with_path::<serde_json::Value>(&source)
                .map_err(|e| anyhow::anyhow!("{source_path_str}: {e}"))?;
            let doc = schema::parse_document(&json_value)
                .with_context(|| format!("failed to parse schema document {source_path_str}"))?;
            merged.definitions.extend(doc.definitions);
            merged.operations.extend(doc.operations);
        }
        Ok(merged)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        let (target, select) = match &self.cmd {
            Command::Models(t) => (t, Selection::Models),
            Command::Operations(t) => (t, Selection::Operations),
            Command::All(t) => (t, Selection::All),
        };

        // debug path
        if target.no_op {
            eprintln!("{self:#?}");
            return Ok(());
        }

        let config = target.input_settings.config();
        let document = target.input_settings.load_document()?;
        let output = Generator::new(&config, &document).run();
        let rendered = render(&output, select)?;

        if let Some(out) = target.out.as_ref() {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, &rendered)
                .with_context(|| format!("failed to write {}", out.display()))?;
        } else {
            println!("{rendered}");
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Selection {
    Models,
    Operations,
    All,
}

fn render(output: &GeneratedOutput, select: Selection) -> Result<String> {
    let text = match select {
        Selection::Models => serde_json::to_string_pretty(&output.models)?,
        Selection::Operations => serde_json::to_string_pretty(&output.operations)?,
        Selection::All => serde_json::to_string_pretty(output)?,
    };
    Ok(text)
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            // Treat as a glob pattern
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                anyhow::bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            // Treat as a literal path
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
