//! Table and detail rendering for `list` and `show`.

use tabled::{Table, Tabled, settings::Style};

use prospect_core::record::{Outcome, ProductRecord, TrialStatus};
use prospect_store_file::ImageStore;

use crate::commands::short;

// ─── List table ───────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct Row {
  #[tabled(rename = "id")]
  id:         String,
  #[tabled(rename = "name")]
  name:       String,
  #[tabled(rename = "supplier")]
  supplier:   String,
  #[tabled(rename = "target")]
  target:     String,
  #[tabled(rename = "net profit")]
  net_profit: String,
  #[tabled(rename = "rating")]
  rating:     String,
  #[tabled(rename = "status")]
  status:     String,
  #[tabled(rename = "created")]
  created:    String,
}

impl Row {
  fn of(record: &ProductRecord) -> Self {
    Self {
      id:         short(record.id),
      name:       record.name.clone(),
      supplier:   record.supplier_price.to_string(),
      target:     record.target_sale_price.to_string(),
      net_profit: format!("{} ({})", record.net_profit(), record.profit_band()),
      rating:     format!("{}/10 ({})", record.rating, record.rating_band()),
      status:     status(&record.status),
      created:    record.created_at.format("%Y-%m-%d").to_string(),
    }
  }
}

pub fn table<'a>(records: impl Iterator<Item = &'a ProductRecord>) -> String {
  let rows: Vec<Row> = records.map(Row::of).collect();
  Table::new(rows).with(Style::sharp()).to_string()
}

// ─── Detail view ──────────────────────────────────────────────────────────────

pub fn detail(record: &ProductRecord, images: &ImageStore) -> String {
  let mut out = String::new();
  let mut line = |label: &str, value: String| {
    out.push_str(&format!("{label:<18} {value}\n"));
  };

  line("id", record.id.to_string());
  line("name", record.name.clone());
  line("storefront", record.storefront_url.clone());
  line("supplier", record.supplier_url.clone());
  line("ad library", record.ad_library_url.clone());
  line("supplier price", record.supplier_price.to_string());
  line(
    "marketplace price",
    record
      .marketplace_price
      .map(|p| p.to_string())
      .unwrap_or_else(|| "(not listed)".into()),
  );
  line("target price", record.target_sale_price.to_string());
  line("other costs", record.other_costs.to_string());
  line(
    "net profit",
    format!("{} ({})", record.net_profit(), record.profit_band()),
  );
  line("creatives", record.creative_count.to_string());
  line(
    "rating",
    format!("{}/10 ({})", record.rating, record.rating_band()),
  );
  line("status", status(&record.status));
  line("created", record.created_at.to_rfc3339());
  if let Some(image) = &record.image {
    line("image", images.path_of(image).display().to_string());
  }
  if !record.notes.is_empty() {
    line("notes", record.notes.clone());
  }
  out
}

// ─── Status ───────────────────────────────────────────────────────────────────

pub fn status(status: &TrialStatus) -> String {
  match status {
    TrialStatus::Untried { stale_outcome: None } => "untried".into(),
    TrialStatus::Untried { stale_outcome: Some(o) } => {
      format!("untried (previously {})", outcome(*o))
    }
    TrialStatus::TriedUnknown => "tried".into(),
    TrialStatus::TriedSucceeded => "tried, succeeded".into(),
    TrialStatus::TriedFailed => "tried, failed".into(),
  }
}

fn outcome(o: Outcome) -> &'static str {
  match o {
    Outcome::Succeeded => "succeeded",
    Outcome::Failed => "failed",
  }
}
