//! Integration tests for the file-backed stores against a temp directory.

use prospect_core::{
  Catalog, SNAPSHOT_KEY,
  input::RecordDraft,
  record::Outcome,
  store::SnapshotStore,
};

use crate::{Error, FileStore, ImageStore, MemoryStore};

fn draft(name: &str) -> RecordDraft {
  RecordDraft {
    name:              name.into(),
    storefront_url:    format!("https://shop.example/{name}"),
    supplier_url:      format!("https://supplier.example/{name}"),
    ad_library_url:    format!("https://ads.example/{name}"),
    supplier_price:    "100".into(),
    marketplace_price: String::new(),
    target_sale_price: "400".into(),
    other_costs:       "50".into(),
    creative_count:    "1".into(),
    rating:            "6".into(),
    notes:             String::new(),
    image:             None,
  }
}

// ─── FileStore ───────────────────────────────────────────────────────────────

#[test]
fn get_missing_key_is_none() {
  let dir = tempfile::tempdir().unwrap();
  let store = FileStore::open(dir.path()).unwrap();
  assert_eq!(store.get("products").unwrap(), None);
}

#[test]
fn set_then_get_roundtrips() {
  let dir = tempfile::tempdir().unwrap();
  let mut store = FileStore::open(dir.path()).unwrap();

  store.set("products", "[1,2,3]").unwrap();
  assert_eq!(store.get("products").unwrap().as_deref(), Some("[1,2,3]"));

  store.set("products", "[]").unwrap();
  assert_eq!(store.get("products").unwrap().as_deref(), Some("[]"));
}

#[test]
fn hostile_key_is_rejected() {
  let dir = tempfile::tempdir().unwrap();
  let mut store = FileStore::open(dir.path()).unwrap();

  for bad in ["", "../escape", "a/b", "a b"] {
    let err = store.set(bad, "x").unwrap_err();
    assert!(matches!(err, Error::InvalidKey(_)), "key {bad:?}");
  }
}

#[test]
fn writes_leave_no_temp_files() {
  let dir = tempfile::tempdir().unwrap();
  let mut store = FileStore::open(dir.path()).unwrap();
  store.set("products", "[]").unwrap();

  let names: Vec<String> = std::fs::read_dir(dir.path())
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
    .collect();
  assert_eq!(names, ["products.json"]);
}

// ─── Catalog over FileStore ──────────────────────────────────────────────────

#[test]
fn catalog_roundtrips_across_a_restart() {
  let dir = tempfile::tempdir().unwrap();

  let (kept, dropped) = {
    let store = FileStore::open(dir.path()).unwrap();
    let mut catalog = Catalog::load(store).unwrap();

    let kept = catalog.add(draft("kept").validate().unwrap()).unwrap().id;
    let dropped =
      catalog.add(draft("dropped").validate().unwrap()).unwrap().id;
    catalog.mark_outcome(kept, Some(Outcome::Succeeded)).unwrap();
    catalog.remove(dropped).unwrap();
    (kept, dropped)
  };

  let store = FileStore::open(dir.path()).unwrap();
  let catalog = Catalog::load(store).unwrap();

  assert_eq!(catalog.len(), 1);
  assert!(catalog.get(dropped).is_none());
  let record = catalog.get(kept).unwrap();
  assert_eq!(record.name, "kept");
  assert_eq!(record.status.outcome(), Some(Outcome::Succeeded));
}

#[test]
fn corrupt_snapshot_file_recovers_to_empty() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(
    dir.path().join(format!("{SNAPSHOT_KEY}.json")),
    "definitely not json",
  )
  .unwrap();

  let store = FileStore::open(dir.path()).unwrap();
  let catalog = Catalog::load(store).unwrap();
  assert!(catalog.is_empty());
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

#[test]
fn memory_store_roundtrips() {
  let mut store = MemoryStore::new();
  assert_eq!(store.get("k").unwrap(), None);
  store.set("k", "v").unwrap();
  assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
}

// ─── ImageStore ──────────────────────────────────────────────────────────────

#[test]
fn ingest_is_content_addressed_and_idempotent() {
  let dir = tempfile::tempdir().unwrap();
  let images = ImageStore::open(dir.path()).unwrap();

  let a = images.ingest(b"fake jpeg bytes", "jpg").unwrap();
  let b = images.ingest(b"fake jpeg bytes", "jpg").unwrap();
  assert_eq!(a, b);

  let stored = std::fs::read(images.path_of(&a)).unwrap();
  assert_eq!(stored, b"fake jpeg bytes");

  let count = std::fs::read_dir(dir.path()).unwrap().count();
  assert_eq!(count, 1);
}

#[test]
fn different_content_gets_different_refs() {
  let dir = tempfile::tempdir().unwrap();
  let images = ImageStore::open(dir.path()).unwrap();

  let a = images.ingest(b"one", "png").unwrap();
  let b = images.ingest(b"two", "png").unwrap();
  assert_ne!(a, b);
}

#[test]
fn weird_extension_is_normalized() {
  let dir = tempfile::tempdir().unwrap();
  let images = ImageStore::open(dir.path()).unwrap();

  let r = images.ingest(b"bytes", ".JPeG").unwrap();
  assert!(r.0.ends_with(".jpeg"), "got {r}");

  let r = images.ingest(b"bytes", "../../etc").unwrap();
  assert!(r.0.ends_with(".img"), "got {r}");
}

#[test]
fn ingest_file_reads_and_names_by_extension() {
  let dir = tempfile::tempdir().unwrap();
  let images = ImageStore::open(dir.path().join("images")).unwrap();

  let src = dir.path().join("photo.png");
  std::fs::write(&src, b"png-ish").unwrap();

  let r = images.ingest_file(&src).unwrap();
  assert!(r.0.ends_with(".png"), "got {r}");
  assert_eq!(std::fs::read(images.path_of(&r)).unwrap(), b"png-ish");
}
