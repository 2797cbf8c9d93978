//! Subcommand handlers.
//!
//! [`Session`] opens the file-backed catalog and image store for the data
//! directory and runs one command against them. Mutations follow the core's
//! failure semantics: a persistence error after a successful in-memory
//! mutation becomes a durability warning, since the process is about to exit
//! and the unsaved change would be lost.

use std::{
  io::{self, BufRead, Write as _},
  path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::warn;
use uuid::Uuid;

use prospect_core::{
  Catalog, Error,
  input::RecordDraft,
  record::{Outcome, ProductRecord},
  sort::SortOption,
};
use prospect_store_file::{FileStore, ImageStore};

use crate::render;

// ─── Session ──────────────────────────────────────────────────────────────────

/// One CLI invocation's handles: the loaded catalog plus the image store.
pub struct Session {
  catalog: Catalog<FileStore>,
  images:  ImageStore,
}

impl Session {
  pub fn open(data_dir: &Path) -> Result<Self> {
    let store = FileStore::open(data_dir)
      .with_context(|| format!("opening data dir {}", data_dir.display()))?;
    let images = ImageStore::open(data_dir.join("images"))
      .context("opening image store")?;
    let catalog = Catalog::load(store).context("loading catalog")?;
    Ok(Self { catalog, images })
  }

  // ── add ───────────────────────────────────────────────────────────────────

  pub fn add(&mut self, args: AddArgs) -> Result<()> {
    let mut draft = args.fields.into_draft(RecordDraft::default());
    if let Some(path) = &args.image {
      draft.image = Some(
        self
          .images
          .ingest_file(path)
          .with_context(|| format!("ingesting image {}", path.display()))?,
      );
    }

    let input = draft.validate()?;
    let record = tolerate_unsaved(self.catalog.add(input))?;
    match record {
      Some(record) => println!("added {} ({})", record.name, short(record.id)),
      None => println!("added (unsaved, see warning)"),
    }
    Ok(())
  }

  // ── edit ──────────────────────────────────────────────────────────────────

  pub fn edit(&mut self, args: EditArgs) -> Result<()> {
    let id = self.resolve(&args.id)?;
    // Unspecified flags fall back to the record's current values.
    let current = self
      .catalog
      .get(id)
      .map(draft_of)
      .ok_or(Error::NotFound(id))?;

    let mut draft = args.fields.into_draft(current);
    if let Some(path) = &args.image {
      draft.image = Some(
        self
          .images
          .ingest_file(path)
          .with_context(|| format!("ingesting image {}", path.display()))?,
      );
    }

    let input = draft.validate()?;
    tolerate_unsaved(self.catalog.update(id, input))?;
    println!("updated {}", short(id));
    Ok(())
  }

  // ── rm ────────────────────────────────────────────────────────────────────

  pub fn rm(&mut self, args: RmArgs) -> Result<()> {
    let id = self.resolve(&args.id)?;
    let name = self
      .catalog
      .get(id)
      .map(|r| r.name.clone())
      .ok_or(Error::NotFound(id))?;

    if !args.yes && !confirm(&format!("Delete {name:?}? [y/N] "))? {
      println!("aborted");
      return Ok(());
    }

    tolerate_unsaved(self.catalog.remove(id))?;
    println!("deleted {name}");
    Ok(())
  }

  // ── mark ──────────────────────────────────────────────────────────────────

  pub fn mark(&mut self, args: MarkArgs) -> Result<()> {
    let id = self.resolve(&args.id)?;
    let outcome = match (args.success, args.failure) {
      (true, _) => Some(Outcome::Succeeded),
      (_, true) => Some(Outcome::Failed),
      _ => None,
    };

    let record = tolerate_unsaved(self.catalog.mark_outcome(id, outcome))?;
    if let Some(record) = record {
      println!("{} is now {}", record.name, render::status(&record.status));
    }
    Ok(())
  }

  // ── list / show ───────────────────────────────────────────────────────────

  pub fn list(&self, sort: SortOption) -> Result<()> {
    if self.catalog.is_empty() {
      println!("catalog is empty");
      return Ok(());
    }
    println!("{}", render::table(self.catalog.view(sort)));
    Ok(())
  }

  pub fn show(&self, id: &str) -> Result<()> {
    let id = self.resolve(id)?;
    let record = self.catalog.get(id).ok_or(Error::NotFound(id))?;
    print!("{}", render::detail(record, &self.images));
    Ok(())
  }

  // ── id resolution ─────────────────────────────────────────────────────────

  /// Accept a full UUID or a unique prefix of one.
  fn resolve(&self, given: &str) -> Result<Uuid> {
    if let Ok(id) = given.parse::<Uuid>() {
      return Ok(id);
    }

    let needle = given.to_ascii_lowercase();
    let matches: Vec<&ProductRecord> = self
      .catalog
      .records()
      .iter()
      .filter(|r| r.id.hyphenated().to_string().starts_with(&needle))
      .collect();

    match matches.as_slice() {
      [one] => Ok(one.id),
      [] => bail!("no product matches id {given:?}"),
      many => bail!(
        "id {given:?} is ambiguous ({} matches); use more characters",
        many.len()
      ),
    }
  }
}

// ─── Field flags ──────────────────────────────────────────────────────────────

/// The record fields shared by `add` and `edit`.
#[derive(Args, Debug)]
pub struct FieldArgs {
  #[arg(long)]
  name: Option<String>,

  #[arg(long)]
  storefront_url: Option<String>,

  #[arg(long)]
  supplier_url: Option<String>,

  #[arg(long)]
  ad_library_url: Option<String>,

  /// What the supplier charges per unit.
  #[arg(long)]
  supplier_price: Option<String>,

  /// Current marketplace listing price; omit if not yet listed.
  #[arg(long)]
  marketplace_price: Option<String>,

  /// The price you intend to sell at.
  #[arg(long)]
  target_sale_price: Option<String>,

  /// Shipping, fees, and other per-unit costs.
  #[arg(long)]
  other_costs: Option<String>,

  /// Number of advertising creatives produced.
  #[arg(long)]
  creative_count: Option<String>,

  /// Rating from 1 to 10.
  #[arg(long)]
  rating: Option<String>,

  #[arg(long)]
  notes: Option<String>,
}

impl FieldArgs {
  /// Overlay the given flags onto `base` (defaults for `add`, the current
  /// record for `edit`).
  fn into_draft(self, mut base: RecordDraft) -> RecordDraft {
    macro_rules! overlay {
      ($($field:ident),+ $(,)?) => {
        $(if let Some(v) = self.$field { base.$field = v; })+
      };
    }
    overlay!(
      name,
      storefront_url,
      supplier_url,
      ad_library_url,
      supplier_price,
      marketplace_price,
      target_sale_price,
      other_costs,
      creative_count,
      rating,
      notes,
    );
    base
  }
}

#[derive(Args, Debug)]
pub struct AddArgs {
  #[command(flatten)]
  fields: FieldArgs,

  /// Path to a preview image to store alongside the record.
  #[arg(long)]
  image: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
  /// Product id (a unique prefix is enough).
  id: String,

  #[command(flatten)]
  fields: FieldArgs,

  /// Replace the stored preview image.
  #[arg(long)]
  image: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RmArgs {
  /// Product id (a unique prefix is enough).
  id: String,

  /// Skip the confirmation prompt.
  #[arg(long, short)]
  yes: bool,
}

#[derive(Args, Debug)]
pub struct MarkArgs {
  /// Product id (a unique prefix is enough).
  id: String,

  /// Record the trial as a success.
  #[arg(long, conflicts_with = "failure")]
  success: bool,

  /// Record the trial as a failure.
  #[arg(long)]
  failure: bool,
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Map a persistence failure to a durability warning instead of a hard error.
///
/// The in-memory mutation succeeded; since this process is about to exit,
/// tell the user the change was not saved rather than pretending nothing
/// happened. All other errors propagate.
fn tolerate_unsaved<T>(
  result: Result<T, Error>,
) -> Result<Option<T>, Error> {
  match result {
    Ok(v) => Ok(Some(v)),
    Err(Error::Persistence(e)) => {
      warn!(error = %e, "change applied but NOT saved; it will be lost when this command exits");
      Ok(None)
    }
    Err(e) => Err(e),
  }
}

fn confirm(prompt: &str) -> Result<bool> {
  print!("{prompt}");
  io::stdout().flush().context("flushing prompt")?;

  let mut answer = String::new();
  io::stdin()
    .lock()
    .read_line(&mut answer)
    .context("reading confirmation")?;
  Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Rebuild a draft from a stored record, for edit's keep-current semantics.
fn draft_of(record: &ProductRecord) -> RecordDraft {
  RecordDraft {
    name:              record.name.clone(),
    storefront_url:    record.storefront_url.clone(),
    supplier_url:      record.supplier_url.clone(),
    ad_library_url:    record.ad_library_url.clone(),
    supplier_price:    record.supplier_price.to_string(),
    marketplace_price: record
      .marketplace_price
      .map(|p| p.to_string())
      .unwrap_or_default(),
    target_sale_price: record.target_sale_price.to_string(),
    other_costs:       record.other_costs.to_string(),
    creative_count:    record.creative_count.to_string(),
    rating:            record.rating.to_string(),
    notes:             record.notes.clone(),
    image:             record.image.clone(),
  }
}

pub fn short(id: Uuid) -> String {
  id.hyphenated().to_string()[..8].to_owned()
}
