pub mod catalog;
pub mod config;
pub mod dates;
pub mod error;
pub mod mapping;
pub mod player;
pub mod query;
pub mod render;
pub mod site;
pub mod storage;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::catalog::{Catalog, CatalogState, CatalogStore};
    pub use crate::config::{ListingOrder, Variant};
    pub use crate::error::CatalogError;
    pub use crate::mapping::DeepLinkAction;
    pub use crate::player::{Player, PlayerState};
    pub use crate::query::{Page, SearchField};
    pub use crate::render::DetailView;
    pub use crate::site::{DetailOutcome, HomeSection, ListingView, PageButton};
    pub use crate::storage::CatalogSource;
    pub use crate::types::{FieldValue, MovieRecord};
    pub use crate::Kinolex;
}

use anyhow::Result;

use crate::catalog::{Catalog, CatalogStore};
use crate::config::Variant;
use crate::site::{DetailOutcome, HomeSection, ListingView};
use crate::storage::{source_for, CatalogSource};
use crate::types::MovieRecord;

/// Library entry point: one variant plus the catalog it browses.
pub struct Kinolex {
    variant: Variant,
    store: CatalogStore,
}

impl Kinolex {
    /// Load the variant's catalog source. A failed fetch or parse is logged
    /// and leaves an empty catalog; only an unusable variant is an error.
    pub async fn open(variant: Variant) -> Result<Self> {
        variant.validate()?;
        let mut this = Self { variant, store: CatalogStore::new() };
        match source_for(&this.variant.source, this.variant.fetch_timeout()) {
            Ok(source) => this.load_from(source.as_ref()).await,
            // unusable location behaves like a failed fetch
            Err(e) => tracing::warn!("{}; continuing with an empty catalog", e),
        }
        Ok(this)
    }

    /// Same as [`open`](Self::open) but with a caller-supplied source.
    pub async fn open_with(variant: Variant, source: &dyn CatalogSource) -> Result<Self> {
        variant.validate()?;
        let mut this = Self { variant, store: CatalogStore::new() };
        this.load_from(source).await;
        Ok(this)
    }

    pub fn with_catalog(variant: Variant, catalog: Catalog) -> Self {
        Self { variant, store: CatalogStore::with_catalog(catalog) }
    }

    async fn load_from(&mut self, source: &dyn CatalogSource) {
        // failure is already logged by the store and leaves it empty
        let _ = self.store.load(source).await;
    }

    pub fn variant(&self) -> &Variant { &self.variant }
    pub fn store(&self) -> &CatalogStore { &self.store }

    pub fn get(&self, id: &str) -> Option<&MovieRecord> { self.store.get(id) }

    pub fn home(&self) -> Vec<HomeSection> { site::home(&self.store, &self.variant) }

    pub fn listing(&self, category: &str, term: &str, page: usize) -> ListingView {
        site::listing(&self.store, &self.variant, category, term, page)
    }

    pub fn detail(&self, query: &str) -> DetailOutcome { site::detail(&self.store, &self.variant, query) }

    /// Category names with their record counts, in first-seen order.
    pub fn categories(&self) -> Vec<(String, usize)> {
        let mut out: Vec<(String, usize)> = Vec::new();
        for m in self.store.all() {
            let key = m.category.to_lowercase();
            match out.iter_mut().find(|(c, _)| *c == key) {
                Some((_, n)) => *n += 1,
                None => out.push((key, 1)),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StaticSource;

    const DOC: &str = r#"{
        "A": {"title": "A", "category": "bl", "release": "2023-01-01"},
        "B": {"title": "B", "category": "bl", "release": "2024-01-01"},
        "C": {"title": "C", "category": "gl", "release": "2025-01-01"}
    }"#;

    #[tokio::test]
    async fn open_with_static_source() {
        let k = Kinolex::open_with(Variant::preset("lgbtlex").unwrap(), &StaticSource::new("inline", DOC)).await.unwrap();
        assert_eq!(k.categories(), vec![("bl".to_string(), 2), ("gl".to_string(), 1)]);
        let ids: Vec<_> = k.store().by_category("BL").iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids, ["A", "B"]);
        assert!(matches!(k.detail("?title=C"), DetailOutcome::Render(_)));
    }

    #[tokio::test]
    async fn open_survives_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut v = Variant::preset("movielex").unwrap();
        v.source = tmp.path().join("movie-details.json").display().to_string();
        let k = Kinolex::open(v).await.unwrap();
        assert!(k.store().all().is_empty());
        assert!(k.store().by_category("movielex").is_empty());
        assert_eq!(k.detail("?title=x"), DetailOutcome::Redirect("movielex.html".into()));
    }

    #[tokio::test]
    async fn open_reads_file_source() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("movie-details.json");
        std::fs::write(&path, DOC).unwrap();
        let mut v = Variant::preset("kino").unwrap();
        v.source = path.display().to_string();
        let k = Kinolex::open(v).await.unwrap();
        assert_eq!(k.home()[0].cards.len(), 2);
        assert_eq!(k.listing("gl", "", 1).total_items, 1);
    }
}
