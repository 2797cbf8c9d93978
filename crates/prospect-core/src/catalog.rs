//! [`Catalog`] — the authoritative in-memory product collection.
//!
//! The catalog owns the record list for the life of the session, applies
//! create/update/delete/mark-outcome mutations, and writes the full snapshot
//! to its [`SnapshotStore`] after every successful mutation. Validation and
//! not-found failures abort before any state change; a persist failure is
//! surfaced but never rolls the in-memory mutation back.

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::{
  error::{Error, Result},
  input::NewRecordInput,
  record::{Outcome, ProductRecord, TrialStatus},
  sort::SortOption,
  store::SnapshotStore,
};

/// The store key under which the serialized collection lives.
pub const SNAPSHOT_KEY: &str = "products";

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// The in-memory catalog plus its persistence collaborator.
#[derive(Debug)]
pub struct Catalog<S> {
  records: Vec<ProductRecord>,
  store:   S,
}

impl<S: SnapshotStore> Catalog<S> {
  /// Load the catalog from `store`.
  ///
  /// An absent snapshot yields an empty catalog. A malformed snapshot also
  /// yields an empty catalog: the corrupt value is discarded (best-effort
  /// overwrite with an empty collection) and the failure logged — recovery
  /// is fail-safe, never fatal. Only a store read error is surfaced.
  pub fn load(mut store: S) -> Result<Self> {
    let records = match store
      .get(SNAPSHOT_KEY)
      .map_err(|e| Error::Persistence(Box::new(e)))?
    {
      None => Vec::new(),
      Some(raw) => match serde_json::from_str::<Vec<ProductRecord>>(&raw) {
        Ok(records) => records,
        Err(e) => {
          warn!(error = %e, "stored snapshot is unreadable; resetting to empty");
          if let Err(e) = store.set(SNAPSHOT_KEY, "[]") {
            warn!(error = %e, "could not discard the corrupt snapshot");
          }
          Vec::new()
        }
      },
    };
    Ok(Self { records, store })
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Validate `input`, append a new record, and persist.
  ///
  /// The catalog assigns a fresh v4 id and `created_at = now`; the record
  /// starts untried.
  pub fn add(&mut self, input: NewRecordInput) -> Result<&ProductRecord> {
    input.check()?;

    let record = ProductRecord {
      id:                Uuid::new_v4(),
      name:              input.name,
      storefront_url:    input.storefront_url,
      supplier_url:      input.supplier_url,
      ad_library_url:    input.ad_library_url,
      supplier_price:    input.supplier_price,
      marketplace_price: input.marketplace_price,
      target_sale_price: input.target_sale_price,
      other_costs:       input.other_costs,
      creative_count:    input.creative_count,
      rating:            input.rating,
      notes:             input.notes,
      image:             input.image,
      status:            TrialStatus::default(),
      created_at:        Utc::now(),
    };

    let idx = self.records.len();
    self.records.push(record);
    self.persist()?;
    Ok(&self.records[idx])
  }

  /// Validate `input` and replace all mutable fields of the record `id`.
  ///
  /// `id`, `created_at`, and the trial status are untouched. Passing an
  /// `input` without an image keeps the current image, matching the edit
  /// form's behaviour of leaving the preview in place.
  pub fn update(
    &mut self,
    id: Uuid,
    input: NewRecordInput,
  ) -> Result<&ProductRecord> {
    input.check()?;
    let idx = self.index_of(id)?;

    let record = &mut self.records[idx];
    record.name = input.name;
    record.storefront_url = input.storefront_url;
    record.supplier_url = input.supplier_url;
    record.ad_library_url = input.ad_library_url;
    record.supplier_price = input.supplier_price;
    record.marketplace_price = input.marketplace_price;
    record.target_sale_price = input.target_sale_price;
    record.other_costs = input.other_costs;
    record.creative_count = input.creative_count;
    record.rating = input.rating;
    record.notes = input.notes;
    if let Some(image) = input.image {
      record.image = Some(image);
    }

    self.persist()?;
    Ok(&self.records[idx])
  }

  /// Remove the record `id` and persist. Returns the removed record.
  ///
  /// Asking the user for confirmation is the caller's job; the catalog
  /// deletes unconditionally.
  pub fn remove(&mut self, id: Uuid) -> Result<ProductRecord> {
    let idx = self.index_of(id)?;
    let removed = self.records.remove(idx);
    self.persist()?;
    Ok(removed)
  }

  /// Apply a mark-outcome transition to the record `id` and persist.
  ///
  /// `None` toggles the tried flag; `Some(outcome)` marks the record tried
  /// with that outcome. See [`TrialStatus::apply`] for the full table.
  pub fn mark_outcome(
    &mut self,
    id: Uuid,
    outcome: Option<Outcome>,
  ) -> Result<&ProductRecord> {
    let idx = self.index_of(id)?;
    let next = self.records[idx].status.apply(outcome);
    self.records[idx].status = next;
    self.persist()?;
    Ok(&self.records[idx])
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// The sorted view: every untried record before every tried one, the
  /// selected comparator within each partition, insertion order on ties.
  ///
  /// Restartable and pure — each call re-derives the order from current
  /// state; there is no hidden cursor.
  pub fn view(&self, sort: SortOption) -> impl Iterator<Item = &ProductRecord> {
    let mut ordered: Vec<&ProductRecord> = self.records.iter().collect();
    // sort_by is stable, so ties keep insertion order.
    ordered.sort_by(|a, b| {
      a.status
        .is_tried()
        .cmp(&b.status.is_tried())
        .then_with(|| sort.compare(a, b))
    });
    ordered.into_iter()
  }

  /// All records in insertion order.
  pub fn records(&self) -> &[ProductRecord] { &self.records }

  pub fn get(&self, id: Uuid) -> Option<&ProductRecord> {
    self.records.iter().find(|r| r.id == id)
  }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  // ── Internals ─────────────────────────────────────────────────────────────

  fn index_of(&self, id: Uuid) -> Result<usize> {
    self
      .records
      .iter()
      .position(|r| r.id == id)
      .ok_or(Error::NotFound(id))
  }

  /// Write the full snapshot. Called after every successful mutation; on
  /// failure the in-memory state keeps the mutation and the caller is told
  /// durability is not guaranteed.
  fn persist(&mut self) -> Result<()> {
    let encoded = serde_json::to_string(&self.records)
      .map_err(|e| Error::Persistence(Box::new(e)))?;
    self
      .store
      .set(SNAPSHOT_KEY, &encoded)
      .map_err(|e| Error::Persistence(Box::new(e)))
  }
}
