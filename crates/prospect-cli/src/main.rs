//! `prospect` — command-line front end for the product-evaluation catalog.
//!
//! # Usage
//!
//! ```text
//! prospect add --name "LED dog collar" --supplier-price 100 \
//!   --target-sale-price 400 --other-costs 50 --rating 7 --image collar.jpg
//! prospect list --sort net-profit-desc
//! prospect mark 3f2a --failure
//! prospect rm 3f2a
//! ```
//!
//! All data lives under the directory given by `--data-dir` (or
//! `PROSPECT_DATA_DIR`), default `.prospect`.

mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use prospect_core::sort::SortOption;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "prospect", about = "Track and evaluate dropshipping product candidates")]
struct Cli {
  /// Directory holding the catalog snapshot and images.
  #[arg(long, env = "PROSPECT_DATA_DIR", default_value = ".prospect")]
  data_dir: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Add a new product to the catalog.
  Add(commands::AddArgs),

  /// Edit an existing product; unspecified flags keep their current values.
  Edit(commands::EditArgs),

  /// Delete a product (asks for confirmation unless --yes).
  Rm(commands::RmArgs),

  /// Mark a product tried/untried or record its trial outcome.
  Mark(commands::MarkArgs),

  /// List the catalog, untried products first.
  List {
    /// Sort order within the untried/tried partitions.
    #[arg(long, default_value = "date-desc")]
    sort: SortOption,
  },

  /// Show one product in full detail.
  Show {
    /// Product id (a unique prefix is enough).
    id: String,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let mut session = commands::Session::open(&cli.data_dir)?;

  match cli.command {
    Command::Add(args) => session.add(args),
    Command::Edit(args) => session.edit(args),
    Command::Rm(args) => session.rm(args),
    Command::Mark(args) => session.mark(args),
    Command::List { sort } => session.list(sort),
    Command::Show { id } => session.show(&id),
  }
}
