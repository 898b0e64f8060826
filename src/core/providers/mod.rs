//! One module per lyrics site, all behind the same trait.
//!
//! A provider attempts exactly one lookup for one artist/title pair. It
//! never retries, never exits the process, and reports structural misses
//! (page layout changed, no candidate passed the title filter) as
//! `NotFound` rather than as errors.

use async_trait::async_trait;

use crate::core::fetch::PageFetcher;
use crate::core::normalize::Normalizer;
use crate::error::ProviderError;

pub mod azlyrics;
pub mod lyricsmode;
pub mod songlyrics;
pub mod songtexte;

/// Final extracted plain text and where it came from.
#[derive(Debug, Clone)]
pub struct Lyrics {
    pub text: String,
    pub provider: &'static str,
}

/// The two definitive outcomes of a single attempt. Transport and parse
/// failures travel separately as `ProviderError`.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Found(Lyrics),
    NotFound,
}

/// Shared lookup collaborators, borrowed for the duration of one attempt.
pub struct ProviderContext<'a> {
    pub fetcher: &'a dyn PageFetcher,
    pub normalizer: &'a Normalizer,
}

#[async_trait]
pub trait LyricsProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn attempt(
        &self,
        ctx: &ProviderContext<'_>,
        artist: &str,
        title: &str,
    ) -> Result<FetchOutcome, ProviderError>;
}

const DEFAULT_ORDER: [&str; 4] = ["azlyrics", "lyricsmode", "songlyrics", "songtexte"];

/// Built-in provider names in lookup priority order.
pub fn default_order() -> &'static [&'static str] {
    &DEFAULT_ORDER
}

pub fn is_known(name: &str) -> bool {
    DEFAULT_ORDER.contains(&name)
}

pub fn by_name(name: &str) -> Option<Box<dyn LyricsProvider>> {
    match name {
        "azlyrics" => Some(Box::new(azlyrics::AzLyrics)),
        "lyricsmode" => Some(Box::new(lyricsmode::LyricsMode)),
        "songlyrics" => Some(Box::new(songlyrics::SongLyrics)),
        "songtexte" => Some(Box::new(songtexte::Songtexte)),
        _ => None,
    }
}

/// Resolve an ordered name list into provider instances, skipping nothing:
/// the config layer has already rejected unknown names.
pub fn build(names: &[String]) -> Vec<Box<dyn LyricsProvider>> {
    names.iter().filter_map(|name| by_name(name)).collect()
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use crate::core::fetch::{Page, PageFetcher};
    use crate::error::NetworkError;

    /// Serves canned pages by URL; unknown URLs come back 404 so provider
    /// tests never touch the network.
    #[derive(Default)]
    pub struct FixtureFetcher {
        pages: HashMap<String, String>,
        form_pages: HashMap<String, String>,
        statuses: HashMap<String, u16>,
    }

    impl FixtureFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        pub fn with_form_page(mut self, url: &str, body: &str) -> Self {
            self.form_pages.insert(url.to_string(), body.to_string());
            self
        }

        pub fn with_status(mut self, url: &str, status: u16) -> Self {
            self.statuses.insert(url.to_string(), status);
            self
        }

        fn lookup(&self, table: &HashMap<String, String>, url: &str) -> Page {
            if let Some(status) = self.statuses.get(url) {
                return Page {
                    status: *status,
                    final_url: url.to_string(),
                    body: String::new(),
                };
            }
            match table.get(url) {
                Some(body) => Page {
                    status: 200,
                    final_url: url.to_string(),
                    body: body.clone(),
                },
                None => Page {
                    status: 404,
                    final_url: url.to_string(),
                    body: String::new(),
                },
            }
        }
    }

    #[async_trait]
    impl PageFetcher for FixtureFetcher {
        async fn get(&self, url: &str) -> Result<Page, NetworkError> {
            Ok(self.lookup(&self.pages, url))
        }

        async fn post_form(
            &self,
            url: &str,
            _fields: &[(&str, &str)],
        ) -> Result<Page, NetworkError> {
            Ok(self.lookup(&self.form_pages, url))
        }
    }
}
