//! hanzi-etym CLI: build and inspect the etymology knowledge base.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use hanzi_etym::config::BuilderConfig;
use hanzi_etym::radical::{self, Direction};
use hanzi_etym::registry::EtymologyIndex;
use hanzi_etym::seeds::{SeedRegistry, SeedSource};

#[derive(Parser)]
#[command(name = "hanzi-etym", version, about = "Chinese character etymology builder")]
struct Cli {
    /// Directory of additional seed packs (one subdirectory per pack).
    #[arg(long, global = true)]
    seeds: Option<PathBuf>,

    /// Builder configuration TOML file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the knowledge base and print every entry as JSON.
    Build {
        /// Seed packs to apply, in order.
        #[arg(long = "pack", default_value = "basic")]
        packs: Vec<String>,
    },

    /// Print the entry for one character.
    Show {
        /// Character to look up.
        character: String,

        /// Seed packs to apply, in order.
        #[arg(long = "pack", default_value = "basic")]
        packs: Vec<String>,
    },

    /// List radical forms and the characters they stand for.
    Radicals {
        /// Only forms used at this position.
        #[arg(long)]
        direction: Option<DirectionArg>,
    },

    /// List available seed packs.
    Packs,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum DirectionArg {
    Bottom,
    Left,
    Right,
    Top,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Bottom => Direction::Bottom,
            DirectionArg::Left => Direction::Left,
            DirectionArg::Right => Direction::Right,
            DirectionArg::Top => Direction::Top,
        }
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let registry = match &cli.seeds {
        Some(dir) => SeedRegistry::discover(dir),
        None => SeedRegistry::bundled(),
    };

    match cli.command {
        Commands::Build { packs } => {
            let index = build_index(&registry, &packs, cli.config.as_ref())?;
            println!("{}", index.to_json().into_diagnostic()?);
        }

        Commands::Show { character, packs } => {
            let index = build_index(&registry, &packs, cli.config.as_ref())?;
            match index.entry_json(&character) {
                Some(json) => {
                    let json = json.into_diagnostic()?;
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json).into_diagnostic()?
                    );
                }
                None => {
                    miette::bail!("no etymology for \"{}\"", character);
                }
            }
        }

        Commands::Radicals { direction } => {
            let forms = match direction {
                Some(d) => radical::forms_in(d.into()),
                None => radical::all_forms(),
            };
            for form in forms {
                println!("{}\t{}\t{}", form.form, form.original, form.direction);
            }
        }

        Commands::Packs => {
            for pack in registry.list() {
                let origin = match &pack.source {
                    SeedSource::Bundled => "bundled".to_string(),
                    SeedSource::External(path) => path.display().to_string(),
                };
                println!(
                    "{:<16} {:<10} {:>4} steps  {}  ({origin})",
                    pack.id,
                    pack.version,
                    pack.steps.len(),
                    pack.name,
                );
            }
        }
    }

    Ok(())
}

fn build_index(
    registry: &SeedRegistry,
    packs: &[String],
    config: Option<&PathBuf>,
) -> Result<EtymologyIndex> {
    let config = config.map(|path| BuilderConfig::load(path)).transpose()?;
    let index = registry.build(packs, config)?;
    tracing::info!(entries = index.len(), "knowledge base built");
    Ok(index)
}
