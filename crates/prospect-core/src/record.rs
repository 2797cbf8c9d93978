//! The product record and its trial-status state machine.
//!
//! A record is one evaluated dropshipping candidate. Net profit is derived —
//! always recomputed from the current pricing fields, never stored — so an
//! edit can never leave a stale cached value behind.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Image reference ─────────────────────────────────────────────────────────

/// Opaque handle to a stored preview image.
///
/// The image collaborator owns the format (in practice a content-hash path);
/// the catalog only carries the reference around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl std::fmt::Display for ImageRef {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ─── Trial status ────────────────────────────────────────────────────────────

/// The result of a market trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
  Succeeded,
  Failed,
}

/// Tried/outcome state of a record.
///
/// Reverting a tried record to untried does not discard the recorded outcome;
/// it is parked in `stale_outcome`, where it describes the previous trial and
/// carries no authority. Marking the product tried again starts a fresh trial
/// in [`TrialStatus::TriedUnknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TrialStatus {
  Untried {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stale_outcome: Option<Outcome>,
  },
  TriedUnknown,
  TriedSucceeded,
  TriedFailed,
}

impl Default for TrialStatus {
  fn default() -> Self {
    Self::Untried { stale_outcome: None }
  }
}

impl TrialStatus {
  /// Apply a mark-outcome action.
  ///
  /// `None` toggles the tried flag without asserting success or failure;
  /// `Some(outcome)` marks the record tried with that outcome. Every
  /// transition is reversible; there is no terminal state.
  pub fn apply(self, outcome: Option<Outcome>) -> Self {
    match (self, outcome) {
      (_, Some(Outcome::Succeeded)) => Self::TriedSucceeded,
      (_, Some(Outcome::Failed)) => Self::TriedFailed,
      (Self::Untried { .. }, None) => Self::TriedUnknown,
      (Self::TriedUnknown, None) => Self::Untried { stale_outcome: None },
      (Self::TriedSucceeded, None) => {
        Self::Untried { stale_outcome: Some(Outcome::Succeeded) }
      }
      (Self::TriedFailed, None) => {
        Self::Untried { stale_outcome: Some(Outcome::Failed) }
      }
    }
  }

  /// Whether the product has been market-tested.
  pub fn is_tried(&self) -> bool { !matches!(self, Self::Untried { .. }) }

  /// The authoritative outcome, if one has been chosen for the current trial.
  pub fn outcome(&self) -> Option<Outcome> {
    match self {
      Self::TriedSucceeded => Some(Outcome::Succeeded),
      Self::TriedFailed => Some(Outcome::Failed),
      Self::Untried { .. } | Self::TriedUnknown => None,
    }
  }
}

// ─── Classification bands ────────────────────────────────────────────────────

/// Coarse classification of a 1–10 rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingBand {
  /// 1–3.
  Low,
  /// 4–7.
  Mid,
  /// 8–10.
  High,
}

impl std::fmt::Display for RatingBand {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      Self::Low => "low",
      Self::Mid => "mid",
      Self::High => "high",
    };
    write!(f, "{s}")
  }
}

/// Coarse classification of a net-profit figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitBand {
  /// 301 and above.
  Strong,
  /// 250–300.
  Good,
  /// 151–249.
  Thin,
  /// Below 151.
  Poor,
}

impl ProfitBand {
  pub fn classify(net_profit: Decimal) -> Self {
    if net_profit >= Decimal::from(301) {
      Self::Strong
    } else if net_profit >= Decimal::from(250) {
      Self::Good
    } else if net_profit >= Decimal::from(151) {
      Self::Thin
    } else {
      Self::Poor
    }
  }
}

impl std::fmt::Display for ProfitBand {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      Self::Strong => "strong",
      Self::Good => "good",
      Self::Thin => "thin",
      Self::Poor => "poor",
    };
    write!(f, "{s}")
  }
}

// ─── ProductRecord ───────────────────────────────────────────────────────────

/// One tracked candidate product and its evaluation data.
///
/// `id` and `created_at` are assigned by the catalog at creation and never
/// change. Everything else is replaceable through an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
  pub id:                Uuid,
  pub name:              String,
  pub storefront_url:    String,
  pub supplier_url:      String,
  pub ad_library_url:    String,
  pub supplier_price:    Decimal,
  /// `None` means the product is not yet listed on the marketplace.
  pub marketplace_price: Option<Decimal>,
  pub target_sale_price: Decimal,
  pub other_costs:       Decimal,
  pub creative_count:    u32,
  /// 1–10.
  pub rating:            u8,
  pub notes:             String,
  pub image:             Option<ImageRef>,
  #[serde(default)]
  pub status:            TrialStatus,
  pub created_at:        DateTime<Utc>,
}

impl ProductRecord {
  /// Net profit, derived: `target_sale_price - supplier_price - other_costs`.
  pub fn net_profit(&self) -> Decimal {
    self.target_sale_price - self.supplier_price - self.other_costs
  }

  pub fn rating_band(&self) -> RatingBand {
    match self.rating {
      0..=3 => RatingBand::Low,
      4..=7 => RatingBand::Mid,
      _ => RatingBand::High,
    }
  }

  pub fn profit_band(&self) -> ProfitBand {
    ProfitBand::classify(self.net_profit())
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use Outcome::{Failed, Succeeded};
  use TrialStatus::{TriedFailed, TriedSucceeded, TriedUnknown, Untried};

  #[test]
  fn toggle_from_untried_starts_a_trial() {
    let s = TrialStatus::default().apply(None);
    assert_eq!(s, TriedUnknown);
    assert!(s.is_tried());
    assert_eq!(s.outcome(), None);
  }

  #[test]
  fn explicit_outcome_is_reassignable() {
    let s = TrialStatus::default().apply(Some(Failed));
    assert_eq!(s, TriedFailed);

    let s = s.apply(Some(Succeeded));
    assert_eq!(s, TriedSucceeded);
    assert_eq!(s.outcome(), Some(Succeeded));
  }

  #[test]
  fn revert_parks_the_outcome_as_stale() {
    let s = TrialStatus::default().apply(Some(Failed)).apply(None);
    assert_eq!(s, Untried { stale_outcome: Some(Failed) });
    assert!(!s.is_tried());
    // Stale, not authoritative.
    assert_eq!(s.outcome(), None);
  }

  #[test]
  fn retrying_after_revert_starts_unknown() {
    let s = TrialStatus::default()
      .apply(Some(Succeeded))
      .apply(None)
      .apply(None);
    assert_eq!(s, TriedUnknown);
  }

  #[test]
  fn all_length_two_sequences_match_the_table() {
    use TrialStatus as T;
    let start = T::default();

    let cases: &[(&[Option<Outcome>], T)] = &[
      (&[None, None], T::Untried { stale_outcome: None }),
      (&[None, Some(Succeeded)], T::TriedSucceeded),
      (&[None, Some(Failed)], T::TriedFailed),
      (&[Some(Succeeded), None], T::Untried { stale_outcome: Some(Succeeded) }),
      (&[Some(Failed), None], T::Untried { stale_outcome: Some(Failed) }),
      (&[Some(Succeeded), Some(Failed)], T::TriedFailed),
      (&[Some(Failed), Some(Succeeded)], T::TriedSucceeded),
    ];

    for (seq, expected) in cases {
      let end = seq.iter().fold(start, |s, o| s.apply(*o));
      assert_eq!(end, *expected, "sequence {seq:?}");
    }
  }

  #[test]
  fn every_sequence_up_to_four_marks_preserves_the_invariants() {
    let actions = [None, Some(Succeeded), Some(Failed)];

    // Walk every action sequence of length <= 4 from the initial state.
    let mut frontier = vec![TrialStatus::default()];
    for _ in 0..4 {
      let mut next = Vec::new();
      for state in &frontier {
        for action in actions {
          let after = state.apply(action);
          match action {
            // An explicit outcome always lands tried with that outcome.
            Some(o) => {
              assert!(after.is_tried());
              assert_eq!(after.outcome(), Some(o));
            }
            // A toggle always flips the tried flag...
            None => {
              assert_ne!(after.is_tried(), state.is_tried());
              // ...and reverting retains the prior outcome as stale.
              if let Some(o) = state.outcome() {
                assert_eq!(after, Untried { stale_outcome: Some(o) });
              }
              // The stale value is never authoritative.
              if !after.is_tried() {
                assert_eq!(after.outcome(), None);
              }
            }
          }
          next.push(after);
        }
      }
      frontier = next;
    }
  }

  #[test]
  fn net_profit_is_the_linear_formula() {
    let r = fixture();
    assert_eq!(r.net_profit(), Decimal::from(250));
  }

  #[test]
  fn bands_follow_the_thresholds() {
    assert_eq!(ProfitBand::classify(Decimal::from(301)), ProfitBand::Strong);
    assert_eq!(ProfitBand::classify(Decimal::from(300)), ProfitBand::Good);
    assert_eq!(ProfitBand::classify(Decimal::from(250)), ProfitBand::Good);
    assert_eq!(ProfitBand::classify(Decimal::from(249)), ProfitBand::Thin);
    assert_eq!(ProfitBand::classify(Decimal::from(151)), ProfitBand::Thin);
    assert_eq!(ProfitBand::classify(Decimal::from(150)), ProfitBand::Poor);
    assert_eq!(ProfitBand::classify(Decimal::from(-10)), ProfitBand::Poor);

    let mut r = fixture();
    r.rating = 3;
    assert_eq!(r.rating_band(), RatingBand::Low);
    r.rating = 5;
    assert_eq!(r.rating_band(), RatingBand::Mid);
    r.rating = 9;
    assert_eq!(r.rating_band(), RatingBand::High);
  }

  #[test]
  fn status_serde_roundtrip_keeps_stale_outcome() {
    let s = TrialStatus::default().apply(Some(Failed)).apply(None);
    let json = serde_json::to_string(&s).unwrap();
    let back: TrialStatus = serde_json::from_str(&json).unwrap();
    assert_eq!(back, s);
  }

  fn fixture() -> ProductRecord {
    ProductRecord {
      id:                Uuid::new_v4(),
      name:              "LED dog collar".into(),
      storefront_url:    "https://shop.example/led-collar".into(),
      supplier_url:      "https://supplier.example/item/1".into(),
      ad_library_url:    "https://ads.example/library/1".into(),
      supplier_price:    Decimal::from(100),
      marketplace_price: None,
      target_sale_price: Decimal::from(400),
      other_costs:       Decimal::from(50),
      creative_count:    2,
      rating:            5,
      notes:             String::new(),
      image:             None,
      status:            TrialStatus::default(),
      created_at:        Utc::now(),
    }
  }
}
