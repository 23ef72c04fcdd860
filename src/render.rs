//! Pure renderers: records in, markup or view structs out. Nothing here
//! touches a live page; the CLI (or any other adapter) decides where output goes.

use serde::Serialize;
use url::Url;

use crate::config::Variant;
use crate::mapping::{deep_link, detail_href, DeepLinkAction};
use crate::types::MovieRecord;

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Absolute URLs must be http(s); relative ones pass through. Anything else
/// (`javascript:`, `data:` …) becomes empty.
pub fn safe_url(raw: &str) -> &str {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => raw,
        Ok(_) => "",
        Err(_) => raw,
    }
}

/// Summary card used in listings and home sections.
pub fn render_card(m: &MovieRecord, detail_page: &str) -> String {
    let name = escape_html(m.display_name());
    format!(
        r#"<div class="movie-card">
    <a href="{href}">
        <img src="{poster}" alt="{name}">
        <div class="movie-info">
            <h3>{name}</h3>
            <div class="movie-meta">
                <span>{year}</span>
                <span>{rating} <i class="fas fa-star"></i></span>
            </div>
        </div>
    </a>
</div>
"#,
        href = escape_html(&detail_href(detail_page, &m.id)),
        poster = escape_html(safe_url(&m.poster)),
        name = name,
        year = escape_html(&m.year.to_string()),
        rating = escape_html(&m.rating.to_string()),
    )
}

/// Everything a detail page shows, one field per display slot. Values are
/// raw text; [`DetailView::to_html`] does the escaping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub id: String,
    pub title: String,
    pub poster: String,
    pub poster_alt: String,
    pub year: String,
    pub duration: String,
    pub rating: String,
    pub description: String,
    pub cast: String,
    pub director: String,
    pub release: String,
    pub genres: Vec<String>,
    pub watch_url: Option<String>,
    pub trailer_url: Option<String>,
    /// The record carries a non-empty `video_source`.
    pub playable: bool,
    /// The variant's pages embed an in-page player.
    pub player: bool,
    pub video_source: Option<String>,
}

pub fn render_detail(m: &MovieRecord, variant: &Variant) -> DetailView {
    let link = |action: DeepLinkAction| {
        variant
            .offers(action)
            .then(|| deep_link(&variant.deep_link_base, action, &m.title))
    };
    let video_source = m.video_source().map(str::to_string);
    DetailView {
        id: m.id.clone(),
        title: m.display_name().to_string(),
        poster: safe_url(&m.poster).to_string(),
        poster_alt: m.display_name().to_string(),
        year: m.year.to_string(),
        duration: m.duration.clone(),
        rating: format!("{} ★", m.rating),
        description: m.description.clone(),
        cast: m.cast.clone(),
        director: m.director.clone(),
        release: m.release.clone(),
        genres: m.genres().into_iter().map(str::to_string).collect(),
        watch_url: link(DeepLinkAction::Video),
        trailer_url: link(DeepLinkAction::Trailer),
        playable: video_source.is_some(),
        player: variant.player,
        video_source,
    }
}

impl DetailView {
    pub fn genre_fragments(&self) -> Vec<String> {
        self.genres.iter().map(|g| format!("<span>{}</span>", escape_html(g))).collect()
    }

    pub fn to_html(&self) -> String {
        let mut actions = String::new();
        if let Some(u) = &self.watch_url {
            actions.push_str(&format!(
                "        <a id=\"telegram-link\" class=\"btn\" href=\"{}\">Watch</a>\n",
                escape_html(u)
            ));
        }
        if let Some(u) = &self.trailer_url {
            actions.push_str(&format!(
                "        <a id=\"trailer-link\" class=\"btn\" href=\"{}\">Trailer</a>\n",
                escape_html(u)
            ));
        }
        if self.player && self.playable {
            actions.push_str("        <button id=\"watch-btn\" class=\"btn\">Watch</button>\n");
        }
        format!(
            r#"<div class="movie-detail">
    <img id="movie-poster" src="{poster}" alt="{alt}">
    <div class="movie-detail-info">
        <h1 id="movie-title">{title}</h1>
        <div class="movie-meta">
            <span id="movie-year">{year}</span>
            <span id="movie-duration">{duration}</span>
            <span id="movie-rating">{rating}</span>
        </div>
        <div id="movie-genres">{genres}</div>
        <p id="movie-description">{description}</p>
        <p>Cast: <span id="movie-cast">{cast}</span></p>
        <p>Director: <span id="movie-director">{director}</span></p>
        <p>Release: <span id="movie-release">{release}</span></p>
{actions}    </div>
</div>
"#,
            poster = escape_html(&self.poster),
            alt = escape_html(&self.poster_alt),
            title = escape_html(&self.title),
            year = escape_html(&self.year),
            duration = escape_html(&self.duration),
            rating = escape_html(&self.rating),
            genres = self.genre_fragments().join(""),
            description = escape_html(&self.description),
            cast = escape_html(&self.cast),
            director = escape_html(&self.director),
            release = escape_html(&self.release),
            actions = actions,
        )
    }
}
