//! Songtexte: search via form submission, then the detail page of the
//! first hit whose label contains the normalized title.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

use crate::core::fetch::resolve_href;
use crate::core::normalize::Normalizer;
use crate::core::providers::{FetchOutcome, Lyrics, LyricsProvider, ProviderContext};
use crate::core::text::strip_markup;
use crate::error::{NetworkError, ProviderError};

const SEARCH_URL: &str = "https://www.songtexte.com/search";

static RESULT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td.song a").expect("valid selector"));

static LYRICS_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#lyrics").expect("valid selector"));

pub struct Songtexte;

fn pick_candidate(body: &str, normalizer: &Normalizer, title_key: &str) -> Option<String> {
    let document = Html::parse_document(body);
    for anchor in document.select(&RESULT_SELECTOR) {
        let label = anchor.text().collect::<String>();
        if !normalizer.fold(&label).contains(title_key) {
            continue;
        }
        if let Some(href) = anchor.value().attr("href") {
            return Some(href.to_string());
        }
    }
    None
}

fn extract_lyrics(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    let element = document.select(&LYRICS_SELECTOR).next()?;
    let text = strip_markup(&element.inner_html());
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[async_trait]
impl LyricsProvider for Songtexte {
    fn name(&self) -> &'static str {
        "songtexte"
    }

    async fn attempt(
        &self,
        ctx: &ProviderContext<'_>,
        artist: &str,
        title: &str,
    ) -> Result<FetchOutcome, ProviderError> {
        let artist_key = ctx.normalizer.artist_key(artist);
        let title_key = ctx.normalizer.title_key(title);
        if title_key.is_empty() {
            return Ok(FetchOutcome::NotFound);
        }

        let query = format!("{artist_key} {title_key}");
        let search_page = ctx
            .fetcher
            .post_form(SEARCH_URL, &[("q", query.as_str()), ("c", "songs")])
            .await?;
        if !search_page.is_success() {
            return Err(NetworkError::Status {
                status: search_page.status,
                url: search_page.final_url,
            }
            .into());
        }

        let Some(href) = pick_candidate(&search_page.body, ctx.normalizer, &title_key) else {
            debug!("songtexte: no candidate matched title key {:?}", title_key);
            return Ok(FetchOutcome::NotFound);
        };

        let Some(detail_url) = resolve_href(&search_page.final_url, &href) else {
            return Err(ProviderError::Parse(format!("unresolvable href {href:?}")));
        };

        let detail_page = ctx.fetcher.get(&detail_url).await?;
        if detail_page.status == 404 {
            return Ok(FetchOutcome::NotFound);
        }
        if !detail_page.is_success() {
            return Err(NetworkError::Status {
                status: detail_page.status,
                url: detail_page.final_url,
            }
            .into());
        }

        match extract_lyrics(&detail_page.body) {
            Some(text) => Ok(FetchOutcome::Found(Lyrics {
                text,
                provider: self.name(),
            })),
            None => Ok(FetchOutcome::NotFound),
        }
    }
}
