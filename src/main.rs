use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use postshift::config::{ConfigFile, ConfigOverrides, MigrationConfig};
use postshift::model::SlugMode;
use postshift::output::Format;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "postshift",
    version,
    about = "Move date-prefixed blog posts into one directory per post"
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "json")]
    format: Format,
    /// Shorthand for --format pretty
    #[arg(long, global = true, hide = true)]
    pretty: bool,
    /// Log more (-v warnings and progress, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create <dest>/<slug>/index.md for every post in the source directory
    Migrate(BatchArgs),
    /// Show what migrate would do without writing anything
    Plan(BatchArgs),
}

#[derive(Args)]
struct BatchArgs {
    /// Directory holding the date-prefixed posts
    source: Option<PathBuf>,
    /// Existing directory that receives one subdirectory per post
    destination: Option<PathBuf>,
    /// YAML file supplying any of the options below
    #[arg(long)]
    config: Option<PathBuf>,
    /// Extension of the files to migrate
    #[arg(long)]
    extension: Option<String>,
    /// Front matter key for the inserted date line
    #[arg(long)]
    date_key: Option<String>,
    /// How the slug is cut out of the filename
    #[arg(long, value_enum)]
    slug_mode: Option<SlugMode>,
    /// Stop at the first post that fails
    #[arg(long)]
    fail_fast: bool,
}

impl BatchArgs {
    fn into_config(self) -> postshift::error::Result<MigrationConfig> {
        let file = self.config.as_deref().map(ConfigFile::load).transpose()?;
        MigrationConfig::resolve(
            file,
            ConfigOverrides {
                source_root: self.source,
                destination_root: self.destination,
                extension: self.extension,
                date_key: self.date_key,
                slug_mode: self.slug_mode,
                fail_fast: self.fail_fast,
            },
        )
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli, format: Format) -> postshift::error::Result<()> {
    match cli.command {
        Commands::Migrate(args) => {
            let config = args.into_config()?;
            postshift::commands::migrate::run(&config, format)
        }
        Commands::Plan(args) => {
            let config = args.into_config()?;
            postshift::commands::plan::run(&config, format)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = if cli.pretty {
        Format::Pretty
    } else {
        cli.format
    };
    if let Err(e) = run(cli, format) {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            _ => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}
