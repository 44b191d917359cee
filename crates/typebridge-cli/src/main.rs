//! Typebridge CLI
//!
//! - `translate`: render a LinkML-style schema as TypeDB `define` statements
//!   (or the intermediate tables as JSON)
//! - `load`: translate and commit the result to a TypeDB database
//! - `inspect`: show how classes are classified
//! - `config`: print the default translation settings

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use typebridge_model::SchemaView;
use typebridge_sink::{FileSink, SchemaSink, TypeDbSink, DEFAULT_ADDRESS};
use typebridge_translate::{translate, Translation, TranslationConfig};

mod inspect;

#[derive(Parser)]
#[command(name = "typebridge")]
#[command(author, version, about = "Translate LinkML-style schemas into TypeDB schemas")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a schema and write the result
    Translate {
        /// Schema YAML file (imports are resolved relative to it)
        schema: PathBuf,

        /// Translation settings (.yaml, .yml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (`-` or omitted: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Typeql)]
        format: Format,
    },

    /// Translate a schema and define it in a TypeDB database
    Load {
        schema: PathBuf,

        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Target database name
        #[arg(short, long)]
        database: String,

        /// TypeDB server (`host:port`)
        #[arg(long, env = "TYPEDB_ADDRESS", default_value = DEFAULT_ADDRESS)]
        address: String,
    },

    /// Show the classification of a schema, or of one class
    Inspect {
        schema: PathBuf,

        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Class to explain
        #[arg(long)]
        class: Option<String>,
    },

    /// Print the default translation settings as YAML
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `define` statements, one per line
    Typeql,
    /// Intermediate descriptor tables and diagnostics
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Translate {
            schema,
            config,
            out,
            format,
        } => cmd_translate(&schema, config.as_deref(), out.as_deref(), format),
        Commands::Load {
            schema,
            config,
            database,
            address,
        } => cmd_load(&schema, config.as_deref(), TypeDbSink::new(&address, database)),
        Commands::Inspect {
            schema,
            config,
            class,
        } => cmd_inspect(&schema, config.as_deref(), class.as_deref()),
        Commands::Config => {
            print!("{}", TranslationConfig::default().to_yaml()?);
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<TranslationConfig> {
    match path {
        Some(path) => TranslationConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(TranslationConfig::default()),
    }
}

fn load_translation(schema: &Path, config: Option<&Path>) -> Result<(SchemaView, Translation)> {
    let config = load_config(config)?;
    let view = SchemaView::from_path(schema)
        .with_context(|| format!("loading schema {}", schema.display()))?;
    tracing::debug!(
        schema = view.name.as_deref().unwrap_or("<unnamed>"),
        "loaded schema"
    );
    let translation = translate(&view, &config);
    report_diagnostics(&translation);
    Ok((view, translation))
}

fn report_diagnostics(translation: &Translation) {
    for diagnostic in &translation.diagnostics {
        eprintln!("{} {}", "warning:".yellow().bold(), diagnostic);
    }
}

fn cmd_translate(schema: &Path, config: Option<&Path>, out: Option<&Path>, format: Format) -> Result<()> {
    eprintln!("{} {}", "Translating".green().bold(), schema.display());
    let (_, translation) = load_translation(schema, config)?;

    match format {
        Format::Typeql => {
            let script = translation.script();
            FileSink::from_arg(out).define(&script)?;
            eprintln!("  {} {} statements", "→".yellow(), script.len());
        }
        Format::Json => {
            let json = translation.to_json()?;
            match out {
                Some(path) if path != Path::new("-") => {
                    std::fs::write(path, format!("{json}\n"))
                        .with_context(|| format!("writing {}", path.display()))?;
                }
                _ => println!("{json}"),
            }
        }
    }

    if let Some(path) = out.filter(|p| *p != Path::new("-")) {
        eprintln!("{} {}", "wrote".green().bold(), path.display().to_string().bold());
    }
    Ok(())
}

fn cmd_load(schema: &Path, config: Option<&Path>, mut sink: TypeDbSink) -> Result<()> {
    eprintln!(
        "{} {} into {} at {}",
        "Loading".green().bold(),
        schema.display(),
        sink.database().bold(),
        sink.address()
    );
    let (_, translation) = load_translation(schema, config)?;
    let script = translation.script();
    sink.define(&script)
        .with_context(|| format!("defining schema in database {}", sink.database()))?;
    eprintln!("{} {} statements committed", "ok".green().bold(), script.len());
    Ok(())
}

fn cmd_inspect(schema: &Path, config: Option<&Path>, class: Option<&str>) -> Result<()> {
    let (view, translation) = load_translation(schema, config)?;
    let report = match class {
        Some(class) => inspect::explain_class(&view, &translation, class)?,
        None => inspect::summarize(&view, &translation)?,
    };
    print!("{report}");
    Ok(())
}
