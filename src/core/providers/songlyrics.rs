//! SongLyrics: search page first, then the detail page of the best hit.
//!
//! Candidates from the results page are filtered by whether their label
//! contains the normalized title; the shortest surviving label wins, since
//! longer labels on this site are usually remixes and live cuts.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

use crate::core::fetch::resolve_href;
use crate::core::normalize::Normalizer;
use crate::core::providers::{FetchOutcome, Lyrics, LyricsProvider, ProviderContext};
use crate::core::text::strip_markup;
use crate::error::{NetworkError, ProviderError};

static RESULT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.serpresult h3 a").expect("valid selector"));

static LYRICS_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p#songLyricsDiv").expect("valid selector"));

const PLACEHOLDER: &str = "We do not have the lyrics for";

pub struct SongLyrics;

/// Best candidate href from a search-results page, by the title filter.
fn pick_candidate(body: &str, normalizer: &Normalizer, title_key: &str) -> Option<String> {
    let document = Html::parse_document(body);
    let mut best: Option<(usize, String)> = None;

    for anchor in document.select(&RESULT_SELECTOR) {
        let label = anchor.text().collect::<String>();
        let label_key = normalizer.fold(&label);
        if !label_key.contains(title_key) {
            continue;
        }
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let candidate = (label_key.len(), href.to_string());
        match &best {
            Some((len, _)) if *len <= candidate.0 => {}
            _ => best = Some(candidate),
        }
    }

    best.map(|(_, href)| href)
}

fn extract_lyrics(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    let element = document.select(&LYRICS_SELECTOR).next()?;
    let text = strip_markup(&element.inner_html());
    if text.is_empty() || text.starts_with(PLACEHOLDER) {
        None
    } else {
        Some(text)
    }
}

#[async_trait]
impl LyricsProvider for SongLyrics {
    fn name(&self) -> &'static str {
        "songlyrics"
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

        let query = urlencoding::encode(&format!("{artist_key} {title_key}")).into_owned();
        let search_url =
            format!("https://www.songlyrics.com/index.php?section=search&searchW={query}");
        let search_page = ctx.fetcher.get(&search_url).await?;
        if !search_page.is_success() {
            return Err(NetworkError::Status {
                status: search_page.status,
                url: search_page.final_url,
            }
            .into());
        }

        let Some(href) = pick_candidate(&search_page.body, ctx.normalizer, &title_key) else {
            debug!("songlyrics: no candidate matched title key {:?}", title_key);
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
