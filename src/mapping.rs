use serde::{Deserialize, Serialize};

/// Actions the outbound bot deep link understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeepLinkAction {
    Video,
    Trailer,
}

impl DeepLinkAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeepLinkAction::Video => "video",
            DeepLinkAction::Trailer => "trailer",
        }
    }
}

/// Link from a card to its detail page; the id travels in `title`.
pub fn detail_href(detail_page: &str, id: &str) -> String {
    format!("{}?title={}", detail_page, urlencoding::encode(id))
}

/// `<base>?start=<action>_<title>`. Always pass the internal title here,
/// never the display name: the bot addresses entries by it.
pub fn deep_link(base: &str, action: DeepLinkAction, title: &str) -> String {
    format!("{}?start={}_{}", base, action.as_str(), urlencoding::encode(title))
}

/// Pull the `title` parameter out of a query string (leading `?` optional).
/// `+` decodes to a space; an empty value counts as absent. A `#fragment`
/// is not part of the query.
pub fn title_param(query: &str) -> Option<String> {
    let query = query.split('#').next().unwrap_or_default();
    let query = query.trim().trim_start_matches('?');
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == "title")
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}
