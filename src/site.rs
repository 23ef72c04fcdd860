use serde::Serialize;

use crate::catalog::CatalogStore;
use crate::config::{ListingOrder, Variant};
use crate::mapping::title_param;
use crate::query::{by_category, paginate, search, sort_by_recency, top_n};
use crate::render::{render_card, render_detail, DetailView};

/// "Newest in <category>" block on the home page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeSection {
    pub category: String,
    pub cards: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageButton {
    pub number: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView {
    pub category: String,
    pub term: String,
    pub cards: Vec<String>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub buttons: Vec<PageButton>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    Render(Box<DetailView>),
    /// Missing or unknown id: send the visitor to this listing page.
    Redirect(String),
}

pub fn home(store: &CatalogStore, variant: &Variant) -> Vec<HomeSection> {
    variant
        .categories
        .iter()
        .map(|category| {
            let newest = sort_by_recency(&by_category(store.all(), category));
            HomeSection {
                category: category.clone(),
                cards: top_n(&newest, variant.home_limit)
                    .into_iter()
                    .map(|m| render_card(m, &variant.detail_page))
                    .collect(),
            }
        })
        .collect()
}

/// One page of a category listing, optionally narrowed by a search term.
pub fn listing(store: &CatalogStore, variant: &Variant, category: &str, term: &str, page: usize) -> ListingView {
    let mut records = by_category(store.all(), category);
    if variant.listing_order == ListingOrder::Recency {
        records = sort_by_recency(&records);
    }
    let found = search(&records, term, &variant.search_fields);
    let p = paginate(&found, page, variant.page_size);
    ListingView {
        category: category.to_string(),
        term: term.to_string(),
        cards: p.items.iter().map(|m| render_card(m, &variant.detail_page)).collect(),
        page: p.page,
        total_pages: p.total_pages,
        total_items: p.total_items,
        buttons: (1..=p.total_pages).map(|n| PageButton { number: n, active: n == p.page }).collect(),
    }
}

/// Resolve a detail request from its query string (`?title=<id>`).
pub fn detail(store: &CatalogStore, variant: &Variant, query: &str) -> DetailOutcome {
    let id = title_param(query);
    match store.lookup(id.as_deref()) {
        Ok(m) => DetailOutcome::Render(Box::new(render_detail(m, variant))),
        Err(e) => {
            tracing::info!("{}; redirecting to {}", e, variant.listing_page);
            DetailOutcome::Redirect(variant.listing_page.clone())
        }
    }
}
