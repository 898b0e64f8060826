//! Ordered fallback over providers and artist alternatives.
//!
//! Providers are consulted strictly in sequence, each artist alternative
//! in turn, and the first hit ends the run. A failing provider is logged
//! and skipped; the whole run only fails when every single attempt did.

use tracing::{debug, info, warn};

use crate::core::fetch::PageFetcher;
use crate::core::normalize::{split_artists, Normalizer};
use crate::core::providers::{FetchOutcome, LyricsProvider, ProviderContext};
use crate::error::{ProviderError, Result};

pub struct ProviderChain {
    providers: Vec<Box<dyn LyricsProvider>>,
    fetcher: Box<dyn PageFetcher>,
    normalizer: Normalizer,
}

impl ProviderChain {
    pub fn new(
        providers: Vec<Box<dyn LyricsProvider>>,
        fetcher: Box<dyn PageFetcher>,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            providers,
            fetcher,
            normalizer,
        }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Run the lookup. `artist_input` may be a comma-separated list of
    /// alternate artist names, tried in order for each provider.
    pub async fn run(&self, artist_input: &str, title: &str) -> Result<FetchOutcome> {
        let alternatives = split_artists(artist_input);
        if alternatives.is_empty() || title.trim().is_empty() {
            return Ok(FetchOutcome::NotFound);
        }

        let ctx = ProviderContext {
            fetcher: self.fetcher.as_ref(),
            normalizer: &self.normalizer,
        };

        let mut attempts = 0usize;
        let mut failures = 0usize;
        let mut last_error: Option<ProviderError> = None;

        for provider in &self.providers {
            for artist in &alternatives {
                attempts += 1;
                debug!("trying {} for {:?} - {:?}", provider.name(), artist, title);

                match provider.attempt(&ctx, artist, title).await {
                    Ok(FetchOutcome::Found(lyrics)) => {
                        info!("found lyrics via {} for {:?} - {:?}", lyrics.provider, artist, title);
                        return Ok(FetchOutcome::Found(lyrics));
                    }
                    Ok(FetchOutcome::NotFound) => {
                        debug!("{}: no match for {:?} - {:?}", provider.name(), artist, title);
                    }
                    Err(e) => {
                        warn!("{} failed for {:?} - {:?}: {}", provider.name(), artist, title, e);
                        failures += 1;
                        last_error = Some(e);
                    }
                }
            }
        }

        // Only when no attempt could complete is the run itself an error;
        // one definitive miss is enough to call the result not-found.
        if attempts > 0 && failures == attempts {
            if let Some(e) = last_error {
                return Err(e.into());
            }
        }

        Ok(FetchOutcome::NotFound)
    }
}
