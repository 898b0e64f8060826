//! AZLyrics: direct lyrics-page URLs, marker-delimited extraction.
//!
//! The lyrics block on azlyrics.com sits between two fixed HTML comments
//! with no usable id or class. Slicing between them is brittle by design;
//! when the markup shifts the provider degrades to not-found and the chain
//! moves on.

use async_trait::async_trait;

use crate::core::normalize::alnum;
use crate::core::providers::{FetchOutcome, Lyrics, LyricsProvider, ProviderContext};
use crate::core::text::{between, strip_markup};
use crate::error::{NetworkError, ProviderError};

const START_MARKER: &str = "<!-- Usage of azlyrics.com content by any third-party lyrics provider is prohibited by our licensing agreement. Sorry about that. -->";
const END_MARKER: &str = "<!-- MxM banner -->";

pub struct AzLyrics;

#[async_trait]
impl LyricsProvider for AzLyrics {
    fn name(&self) -> &'static str {
        "azlyrics"
    }

    async fn attempt(
        &self,
        ctx: &ProviderContext<'_>,
        artist: &str,
        title: &str,
    ) -> Result<FetchOutcome, ProviderError> {
        let artist_slug = alnum(&ctx.normalizer.artist_key(artist));
        let title_slug = alnum(&ctx.normalizer.title_key(title));
        if artist_slug.is_empty() || title_slug.is_empty() {
            return Ok(FetchOutcome::NotFound);
        }

        let url = format!("https://www.azlyrics.com/lyrics/{artist_slug}/{title_slug}.html");
        let page = ctx.fetcher.get(&url).await?;

        // A direct URL that does not exist is a definitive miss.
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

        let Some(fragment) = between(&page.body, START_MARKER, END_MARKER) else {
            return Ok(FetchOutcome::NotFound);
        };

        let text = strip_markup(fragment);
        if text.is_empty() {
            return Ok(FetchOutcome::NotFound);
        }

        Ok(FetchOutcome::Found(Lyrics {
            text,
            provider: self.name(),
        }))
    }
}
