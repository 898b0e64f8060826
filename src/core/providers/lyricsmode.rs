//! LyricsMode: direct lyrics-page URLs, selector-based extraction.
//!
//! URLs are bucketed by the artist slug's first character, with a shared
//! "0-9" bucket for digits.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::core::providers::{FetchOutcome, Lyrics, LyricsProvider, ProviderContext};
use crate::core::text::strip_markup;
use crate::error::{NetworkError, ProviderError};

static LYRICS_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p#lyrics_text").expect("valid selector"));

pub struct LyricsMode;

fn slug(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn bucket(artist_slug: &str) -> String {
    match artist_slug.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => c.to_string(),
        _ => "0-9".to_string(),
    }
}

// Parsing is kept out of the async path; `Html` is not Send.
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
impl LyricsProvider for LyricsMode {
    fn name(&self) -> &'static str {
        "lyricsmode"
    }

    async fn attempt(
        &self,
        ctx: &ProviderContext<'_>,
        artist: &str,
        title: &str,
    ) -> Result<FetchOutcome, ProviderError> {
        let artist_slug = slug(&ctx.normalizer.artist_key(artist));
        let title_slug = slug(&ctx.normalizer.title_key(title));
        if artist_slug.is_empty() || title_slug.is_empty() {
            return Ok(FetchOutcome::NotFound);
        }

        let url = format!(
            "https://www.lyricsmode.com/lyrics/{}/{}/{}.html",
            bucket(&artist_slug),
            artist_slug,
            title_slug
        );
        let page = ctx.fetcher.get(&url).await?;

        if page.status == 404 {
            return Ok(FetchOutcome::NotFound);
        }
        if !page.is_success() {
            return Err(NetworkError::Status {
                status: page.status,
                url: page.final_url,
            }
            .into());
        }

        match extract_lyrics(&page.body) {
            Some(text) => Ok(FetchOutcome::Found(Lyrics {
                text,
                provider: self.name(),
            })),
            None => Ok(FetchOutcome::NotFound),
        }
    }
}
