use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::mapping::DeepLinkAction;
use crate::query::{SearchField, DEFAULT_SEARCH_FIELDS};

/// How a listing orders its category before search and pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingOrder {
    /// Source-document order.
    #[default]
    Catalog,
    Recency,
}

/// Settings for one product surface (which categories it browses, where its
/// pages live, which bot it links to).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    /// Catalog location: a path, `file://` or `http(s)://` URL.
    pub source: String,
    pub categories: Vec<String>,
    /// Where a failed detail lookup redirects.
    pub listing_page: String,
    pub detail_page: String,
    pub deep_link_base: String,
    /// Deep-link actions offered on the detail view.
    pub actions: Vec<DeepLinkAction>,
    /// Whether the detail view has an in-page player.
    pub player: bool,
    pub page_size: usize,
    pub home_limit: usize,
    pub search_fields: Vec<SearchField>,
    pub listing_order: ListingOrder,
    pub fetch_timeout_secs: u64,
}

pub const PRESETS: &[&str] = &["kino", "lgbtlex", "movielex", "seriallex"];

const DEFAULT_SOURCE: &str = "movie-details.json";
const LGBT_BOT: &str = "https://t.me/lgbt_kino_bot";
const MEME_BOT: &str = "https://t.me/meme_kino_bot";

impl Variant {
    /// Built-in settings for a known product.
    pub fn preset(name: &str) -> Result<Self> {
        let base = Variant {
            name: name.to_string(),
            source: DEFAULT_SOURCE.to_string(),
            categories: vec!["bl".into(), "gl".into()],
            listing_page: "index.html".into(),
            detail_page: "movie.html".into(),
            deep_link_base: MEME_BOT.into(),
            actions: vec![DeepLinkAction::Video, DeepLinkAction::Trailer],
            player: false,
            page_size: 15,
            home_limit: 5,
            search_fields: DEFAULT_SEARCH_FIELDS.to_vec(),
            listing_order: ListingOrder::Catalog,
            fetch_timeout_secs: 15,
        };
        let v = match name {
            "kino" => Variant {
                deep_link_base: LGBT_BOT.into(),
                actions: vec![DeepLinkAction::Video],
                search_fields: vec![SearchField::Title, SearchField::Description],
                ..base
            },
            "lgbtlex" => Variant { listing_page: "lgbtlex.html".into(), ..base },
            "movielex" => Variant {
                categories: vec!["movielex".into()],
                listing_page: "movielex.html".into(),
                actions: vec![DeepLinkAction::Trailer],
                player: true,
                home_limit: 8,
                listing_order: ListingOrder::Recency,
                ..base
            },
            "seriallex" => Variant {
                categories: vec!["seriallex".into()],
                listing_page: "seriallex.html".into(),
                home_limit: 8,
                listing_order: ListingOrder::Recency,
                ..base
            },
            other => bail!("unknown variant `{}` (expected one of {})", other, PRESETS.join(", ")),
        };
        Ok(v)
    }

    pub fn fetch_timeout(&self) -> Duration { Duration::from_secs(self.fetch_timeout_secs.max(1)) }

    pub fn offers(&self, action: DeepLinkAction) -> bool { self.actions.contains(&action) }

    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.deep_link_base)
            .with_context(|| format!("invalid deep_link_base: {}", self.deep_link_base))?;
        if !matches!(base.scheme(), "http" | "https") {
            bail!("deep_link_base must be http(s): {}", self.deep_link_base);
        }
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        if self.categories.iter().any(|c| c.trim().is_empty()) {
            bail!("categories must not be empty strings");
        }
        Ok(())
    }
}

/// On-disk configuration; every field overrides the chosen preset.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub variant: Option<String>,
    pub source: Option<String>,
    pub categories: Option<Vec<String>>,
    pub listing_page: Option<String>,
    pub detail_page: Option<String>,
    pub deep_link_base: Option<String>,
    pub actions: Option<Vec<DeepLinkAction>>,
    pub player: Option<bool>,
    pub page_size: Option<usize>,
    pub home_limit: Option<usize>,
    pub search_fields: Option<Vec<SearchField>>,
    pub listing_order: Option<ListingOrder>,
    pub fetch_timeout_secs: Option<u64>,
}

impl ConfigFile {
    pub fn from_toml(s: &str) -> Result<Self> { toml::from_str(s).context("parsing config TOML") }

    /// Read `path`, or the default location when `path` is `None`. A missing
    /// default file is not an error; a missing explicit file is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_config_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };
        match fs::read_to_string(&path) {
            Ok(s) => Self::from_toml(&s).with_context(|| format!("in {}", path.display())),
            Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("reading config file: {}", path.display())),
        }
    }

    fn apply(self, v: &mut Variant) {
        if let Some(x) = self.source { v.source = x; }
        if let Some(x) = self.categories { v.categories = x; }
        if let Some(x) = self.listing_page { v.listing_page = x; }
        if let Some(x) = self.detail_page { v.detail_page = x; }
        if let Some(x) = self.deep_link_base { v.deep_link_base = x; }
        if let Some(x) = self.actions { v.actions = x; }
        if let Some(x) = self.player { v.player = x; }
        if let Some(x) = self.page_size { v.page_size = x; }
        if let Some(x) = self.home_limit { v.home_limit = x; }
        if let Some(x) = self.search_fields { v.search_fields = x; }
        if let Some(x) = self.listing_order { v.listing_order = x; }
        if let Some(x) = self.fetch_timeout_secs { v.fetch_timeout_secs = x; }
    }
}

/// Environment overrides, read once.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub variant: Option<String>,
    pub source: Option<String>,
    pub page_size: Option<usize>,
    pub fetch_timeout_secs: Option<u64>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let var = |k: &str| std::env::var(k).ok().filter(|s| !s.trim().is_empty());
        Self {
            variant: var("KINOLEX_VARIANT"),
            source: var("KINOLEX_SOURCE"),
            page_size: var("KINOLEX_PAGE_SIZE").and_then(|s| s.trim().parse().ok()),
            fetch_timeout_secs: var("KINOLEX_FETCH_TIMEOUT_SECS").and_then(|s| s.trim().parse().ok()),
        }
    }
}

/// Resolve the effective variant. Precedence, lowest first: preset, config
/// file, environment, explicit CLI choices.
pub fn resolve(file: ConfigFile, env: EnvOverrides, cli_variant: Option<&str>, cli_source: Option<&str>) -> Result<Variant> {
    let name = cli_variant
        .map(str::to_string)
        .or(env.variant)
        .or_else(|| file.variant.clone())
        .unwrap_or_else(|| "lgbtlex".to_string());
    let mut v = Variant::preset(&name)?;
    file.apply(&mut v);
    if let Some(x) = env.source { v.source = x; }
    if let Some(x) = env.page_size { v.page_size = x; }
    if let Some(x) = env.fetch_timeout_secs { v.fetch_timeout_secs = x; }
    if let Some(x) = cli_source { v.source = x.to_string(); }
    v.validate()?;
    Ok(v)
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "kinolex", "kinolex").map(|p| p.config_dir().join("kinolex.toml"))
}
