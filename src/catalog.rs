use std::collections::HashMap;

use crate::error::{CatalogError, Result};
use crate::storage::CatalogSource;
use crate::types::MovieRecord;

/// Indexed, immutable set of records in source-document order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<MovieRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Parse a catalog document: a JSON object of `id -> record`. Entries that
    /// do not fit the record shape are skipped; a non-object document is an error.
    pub fn from_json(location: &str, body: &str) -> Result<Self> {
        let doc: serde_json::Value = serde_json::from_str(body).map_err(|e| CatalogError::load(location, e))?;
        let serde_json::Value::Object(entries) = doc else {
            return Err(CatalogError::load(location, "expected a JSON object keyed by id"));
        };
        let mut records = Vec::with_capacity(entries.len());
        for (id, value) in entries {
            match serde_json::from_value::<MovieRecord>(value) {
                Ok(mut m) => {
                    m.id = id;
                    records.push(m);
                }
                Err(e) => tracing::warn!(%location, %id, "skipping malformed catalog entry: {}", e),
            }
        }
        Ok(Self::from_records(records))
    }

    /// Build from records whose `id` is already set. A repeated id replaces the
    /// earlier record in place.
    pub fn from_records(records: impl IntoIterator<Item = MovieRecord>) -> Self {
        let mut out = Catalog::default();
        for mut m in records {
            if m.title.is_empty() { m.title = m.id.clone(); }
            match out.index.get(&m.id) {
                Some(&i) => out.records[i] = m,
                None => {
                    out.index.insert(m.id.clone(), out.records.len());
                    out.records.push(m);
                }
            }
        }
        out
    }

    pub fn get(&self, id: &str) -> Option<&MovieRecord> { self.index.get(id).map(|&i| &self.records[i]) }
    pub fn all(&self) -> &[MovieRecord] { &self.records }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

#[derive(Debug, Clone, Default)]
pub enum CatalogState {
    #[default]
    Pending,
    Loaded(Catalog),
    Failed(CatalogError),
}

/// Owns the catalog for one browsing session. Loads at most once; a failed
/// load is final and the store then behaves as an empty catalog.
#[derive(Debug, Default)]
pub struct CatalogStore {
    state: CatalogState,
}

impl CatalogStore {
    pub fn new() -> Self { Self::default() }

    /// Store that is already loaded; skips the source entirely.
    pub fn with_catalog(catalog: Catalog) -> Self { Self { state: CatalogState::Loaded(catalog) } }

    pub fn state(&self) -> &CatalogState { &self.state }
    pub fn is_loaded(&self) -> bool { matches!(self.state, CatalogState::Loaded(_)) }

    /// Fetch and index the catalog. Only the first call touches the source;
    /// later calls report the outcome of that first attempt.
    pub async fn load(&mut self, source: &dyn CatalogSource) -> Result<&Catalog> {
        if matches!(self.state, CatalogState::Pending) {
            let location = source.location();
            let parsed = match source.fetch().await {
                Ok(body) => Catalog::from_json(&location, &body),
                Err(e) => Err(e),
            };
            self.state = match parsed {
                Ok(catalog) => {
                    tracing::info!(%location, records = catalog.len(), "catalog loaded");
                    CatalogState::Loaded(catalog)
                }
                Err(e) => {
                    tracing::warn!("{}; continuing with an empty catalog", e);
                    CatalogState::Failed(e)
                }
            };
        }
        match &self.state {
            CatalogState::Loaded(c) => Ok(c),
            CatalogState::Failed(e) => Err(e.clone()),
            CatalogState::Pending => Err(CatalogError::load(source.location(), "catalog load did not complete")),
        }
    }

    pub fn get(&self, id: &str) -> Option<&MovieRecord> {
        match &self.state {
            CatalogState::Loaded(c) => c.get(id),
            _ => None,
        }
    }

    /// Like [`get`](Self::get) but reports a missing or empty id as `NotFound`.
    pub fn lookup(&self, id: Option<&str>) -> Result<&MovieRecord> {
        id.filter(|s| !s.is_empty())
            .and_then(|id| self.get(id))
            .ok_or_else(|| CatalogError::not_found(id))
    }

    pub fn all(&self) -> &[MovieRecord] {
        match &self.state {
            CatalogState::Loaded(c) => c.all(),
            _ => &[],
        }
    }

    pub fn by_category(&self, category: &str) -> Vec<&MovieRecord> { crate::query::by_category(self.all(), category) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StaticSource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogSource for FailingSource {
        fn location(&self) -> String { "movie-details.json".into() }
        async fn fetch(&self) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(CatalogError::load(self.location(), "connection refused"))
        }
    }

    const DOC: &str = r#"{
        "Zeta": {"title": "Zeta", "category": "bl", "release": "2023-01-01"},
        "Alpha": {"title": "alpha-2020", "title_name": "Alpha", "category": "GL", "release": "2020-01-01"},
        "Broken": "just a string",
        "Mid": {"category": "bl"}
    }"#;

    #[test]
    fn parses_in_document_order_and_skips_malformed() {
        let c = Catalog::from_json("inline", DOC).unwrap();
        let ids: Vec<_> = c.all().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["Zeta", "Alpha", "Mid"]);
        assert_eq!(c.get("Alpha").unwrap().title, "alpha-2020");
        assert_eq!(c.get("Mid").unwrap().title, "Mid");
        assert!(c.get("alpha").is_none());
    }

    #[test]
    fn odd_field_values_keep_the_record() {
        let doc = r#"{
            "Nulls": {"title": "nulls", "category": "bl", "poster": null, "year": null, "video_source": null},
            "Numeric": {"title": 42, "category": "bl", "rating": 9},
            "Plain": {"title": "plain", "category": "bl"}
        }"#;
        let c = Catalog::from_json("inline", doc).unwrap();
        let ids: Vec<_> = c.all().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["Nulls", "Numeric", "Plain"]);
        assert_eq!(c.get("Nulls").unwrap().poster, "");
        assert_eq!(c.get("Numeric").unwrap().title, "42");
        assert_eq!(c.get("Numeric").unwrap().rating.to_string(), "9");
    }

    #[test]
    fn non_object_document_is_load_error() {
        assert!(matches!(Catalog::from_json("x", "[1,2]"), Err(CatalogError::Load { .. })));
        assert!(matches!(Catalog::from_json("x", "{not json"), Err(CatalogError::Load { .. })));
    }

    #[tokio::test]
    async fn loads_once() {
        let mut store = CatalogStore::new();
        assert!(store.all().is_empty());
        store.load(&StaticSource::new("inline", DOC)).await.unwrap();
        // second source is never consulted
        let c = store.load(&StaticSource::new("other", "{}")).await.unwrap();
        assert_eq!(c.len(), 3);
        assert!(store.is_loaded());
    }

    #[tokio::test]
    async fn failed_load_degrades_to_empty_and_is_final() {
        let src = FailingSource { calls: AtomicUsize::new(0) };
        let mut store = CatalogStore::new();
        assert!(matches!(store.load(&src).await, Err(CatalogError::Load { .. })));
        assert!(store.load(&src).await.is_err());
        assert_eq!(src.calls.load(Ordering::SeqCst), 1);
        assert!(matches!(store.state(), CatalogState::Failed(_)));
        assert!(store.by_category("bl").is_empty());
        assert!(store.all().is_empty());
    }

    #[test]
    fn lookup_reports_missing_and_unknown_ids() {
        let store = CatalogStore::with_catalog(Catalog::from_json("inline", DOC).unwrap());
        assert_eq!(store.lookup(Some("Zeta")).unwrap().id, "Zeta");
        assert_eq!(store.lookup(Some("nope")), Err(CatalogError::not_found(Some("nope"))));
        assert_eq!(store.lookup(None), Err(CatalogError::not_found(None)));
        assert!(store.lookup(Some("")).is_err());
    }
}
