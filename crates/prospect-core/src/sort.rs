//! Sort options for the catalog view.
//!
//! Six sortable fields, each ascending or descending — exactly twelve
//! combinations. The comparator applies only within a tried/untried
//! partition; the partition itself always dominates (see
//! [`Catalog::view`](crate::catalog::Catalog::view)).

use std::{cmp::Ordering, fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
  error::{Error, Result},
  record::ProductRecord,
};

// ─── Key and direction ───────────────────────────────────────────────────────

/// The record field a view is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
  Rating,
  SupplierPrice,
  MarketplacePrice,
  OtherCosts,
  NetProfit,
  CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  Ascending,
  Descending,
}

// ─── SortOption ──────────────────────────────────────────────────────────────

/// One of the twelve supported field/direction combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
  pub key:       SortKey,
  pub direction: Direction,
}

impl SortOption {
  pub const fn new(key: SortKey, direction: Direction) -> Self {
    Self { key, direction }
  }

  /// The default view order: newest first.
  pub const fn date_desc() -> Self {
    Self::new(SortKey::CreatedAt, Direction::Descending)
  }

  /// All twelve combinations, in a fixed order.
  pub fn all() -> impl Iterator<Item = Self> {
    const KEYS: [SortKey; 6] = [
      SortKey::Rating,
      SortKey::SupplierPrice,
      SortKey::MarketplacePrice,
      SortKey::OtherCosts,
      SortKey::NetProfit,
      SortKey::CreatedAt,
    ];
    KEYS.into_iter().flat_map(|key| {
      [Direction::Descending, Direction::Ascending]
        .into_iter()
        .map(move |direction| Self { key, direction })
    })
  }

  /// Compare two records under this option.
  ///
  /// An unset marketplace price compares as zero. Equal keys compare as
  /// [`Ordering::Equal`]; the caller's stable sort preserves insertion order
  /// for ties.
  pub fn compare(&self, a: &ProductRecord, b: &ProductRecord) -> Ordering {
    let ord = match self.key {
      SortKey::Rating => a.rating.cmp(&b.rating),
      SortKey::SupplierPrice => a.supplier_price.cmp(&b.supplier_price),
      SortKey::MarketplacePrice => marketplace(a).cmp(&marketplace(b)),
      SortKey::OtherCosts => a.other_costs.cmp(&b.other_costs),
      SortKey::NetProfit => a.net_profit().cmp(&b.net_profit()),
      SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    };
    match self.direction {
      Direction::Ascending => ord,
      Direction::Descending => ord.reverse(),
    }
  }
}

fn marketplace(r: &ProductRecord) -> Decimal {
  r.marketplace_price.unwrap_or_default()
}

impl Default for SortOption {
  fn default() -> Self { Self::date_desc() }
}

// ─── String form ─────────────────────────────────────────────────────────────

impl fmt::Display for SortOption {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let key = match self.key {
      SortKey::Rating => "rating",
      SortKey::SupplierPrice => "supplier-price",
      SortKey::MarketplacePrice => "marketplace-price",
      SortKey::OtherCosts => "other-costs",
      SortKey::NetProfit => "net-profit",
      SortKey::CreatedAt => "date",
    };
    let dir = match self.direction {
      Direction::Ascending => "asc",
      Direction::Descending => "desc",
    };
    write!(f, "{key}-{dir}")
  }
}

impl FromStr for SortOption {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let unknown = || Error::UnknownSortOption(s.to_owned());

    let (key_str, dir_str) = s.rsplit_once('-').ok_or_else(unknown)?;
    let key = match key_str {
      "rating" => SortKey::Rating,
      "supplier-price" => SortKey::SupplierPrice,
      "marketplace-price" => SortKey::MarketplacePrice,
      "other-costs" => SortKey::OtherCosts,
      "net-profit" => SortKey::NetProfit,
      "date" | "created-at" => SortKey::CreatedAt,
      _ => return Err(unknown()),
    };
    let direction = match dir_str {
      "asc" => Direction::Ascending,
      "desc" => Direction::Descending,
      _ => return Err(unknown()),
    };
    Ok(Self { key, direction })
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn there_are_exactly_twelve_options() {
    assert_eq!(SortOption::all().count(), 12);
  }

  #[test]
  fn display_and_from_str_roundtrip() {
    for opt in SortOption::all() {
      let parsed: SortOption = opt.to_string().parse().unwrap();
      assert_eq!(parsed, opt);
    }
  }

  #[test]
  fn unknown_option_is_an_error() {
    for bad in ["", "rating", "rating-sideways", "weight-desc", "net-profit"] {
      let err = bad.parse::<SortOption>().unwrap_err();
      assert!(matches!(err, Error::UnknownSortOption(_)), "input {bad:?}");
    }
  }

  #[test]
  fn date_spelling_is_accepted() {
    let opt: SortOption = "date-desc".parse().unwrap();
    assert_eq!(opt, SortOption::date_desc());
  }
}
