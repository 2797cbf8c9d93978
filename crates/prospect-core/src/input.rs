//! Record input types and the validation boundary.
//!
//! [`RecordDraft`] carries the raw field strings a form or CLI collects.
//! [`RecordDraft::validate`] performs a single validation pass that either
//! yields a fully-typed [`NewRecordInput`] or a [`Error::Validation`] naming
//! the offending field — never a partially-parsed record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
  error::{Error, Result},
  record::ImageRef,
};

// ─── Draft ───────────────────────────────────────────────────────────────────

/// Raw, unvalidated field values for an add or edit action.
///
/// Numeric fields are strings because that is what input surfaces hand over;
/// an empty `marketplace_price` means "not yet listed".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordDraft {
  pub name:              String,
  pub storefront_url:    String,
  pub supplier_url:      String,
  pub ad_library_url:    String,
  pub supplier_price:    String,
  pub marketplace_price: String,
  pub target_sale_price: String,
  pub other_costs:       String,
  pub creative_count:    String,
  pub rating:            String,
  pub notes:             String,
  pub image:             Option<ImageRef>,
}

impl RecordDraft {
  /// Validate every field in one pass.
  pub fn validate(self) -> Result<NewRecordInput> {
    let name = self.name.trim().to_owned();
    if name.is_empty() {
      return Err(Error::Validation {
        field:  "name",
        reason: "must not be empty".into(),
      });
    }

    let supplier_price = parse_amount("supplier_price", &self.supplier_price)?;
    let marketplace_price = if self.marketplace_price.trim().is_empty() {
      None
    } else {
      Some(parse_amount("marketplace_price", &self.marketplace_price)?)
    };
    let target_sale_price =
      parse_amount("target_sale_price", &self.target_sale_price)?;
    let other_costs = parse_amount("other_costs", &self.other_costs)?;

    let creative_count =
      self.creative_count.trim().parse::<u32>().map_err(|_| {
        Error::Validation {
          field:  "creative_count",
          reason: format!(
            "expected a non-negative integer, got {:?}",
            self.creative_count
          ),
        }
      })?;

    let rating = self.rating.trim().parse::<u8>().ok();
    let rating = match rating {
      Some(r) if (1..=10).contains(&r) => r,
      _ => {
        return Err(Error::Validation {
          field:  "rating",
          reason: format!("expected an integer in 1..=10, got {:?}", self.rating),
        });
      }
    };

    Ok(NewRecordInput {
      name,
      storefront_url: self.storefront_url,
      supplier_url: self.supplier_url,
      ad_library_url: self.ad_library_url,
      supplier_price,
      marketplace_price,
      target_sale_price,
      other_costs,
      creative_count,
      rating,
      notes: self.notes,
      image: self.image,
    })
  }
}

fn parse_amount(field: &'static str, raw: &str) -> Result<Decimal> {
  let value: Decimal = raw.trim().parse().map_err(|_| Error::Validation {
    field,
    reason: format!("expected a decimal amount, got {raw:?}"),
  })?;
  if value < Decimal::ZERO {
    return Err(Error::Validation {
      field,
      reason: format!("must not be negative, got {value}"),
    });
  }
  Ok(value)
}

// ─── Validated input ─────────────────────────────────────────────────────────

/// The immutable, fully-typed input accepted by
/// [`Catalog::add`](crate::catalog::Catalog::add) and
/// [`Catalog::update`](crate::catalog::Catalog::update).
///
/// `id`, `created_at`, and the trial status are always assigned by the
/// catalog; they are not accepted from callers.
#[derive(Debug, Clone)]
pub struct NewRecordInput {
  pub name:              String,
  pub storefront_url:    String,
  pub supplier_url:      String,
  pub ad_library_url:    String,
  pub supplier_price:    Decimal,
  pub marketplace_price: Option<Decimal>,
  pub target_sale_price: Decimal,
  pub other_costs:       Decimal,
  pub creative_count:    u32,
  pub rating:            u8,
  pub notes:             String,
  pub image:             Option<ImageRef>,
}

impl NewRecordInput {
  /// Re-assert the range invariants.
  ///
  /// [`RecordDraft::validate`] already enforces these; this guards inputs
  /// constructed directly in code.
  pub fn check(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::Validation {
        field:  "name",
        reason: "must not be empty".into(),
      });
    }
    check_amount("supplier_price", self.supplier_price)?;
    if let Some(p) = self.marketplace_price {
      check_amount("marketplace_price", p)?;
    }
    check_amount("target_sale_price", self.target_sale_price)?;
    check_amount("other_costs", self.other_costs)?;
    if !(1..=10).contains(&self.rating) {
      return Err(Error::Validation {
        field:  "rating",
        reason: format!("must be in 1..=10, got {}", self.rating),
      });
    }
    Ok(())
  }
}

fn check_amount(field: &'static str, value: Decimal) -> Result<()> {
  if value < Decimal::ZERO {
    return Err(Error::Validation {
      field,
      reason: format!("must not be negative, got {value}"),
    });
  }
  Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
