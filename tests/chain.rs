//! End-to-end chain behavior against fixture pages: real providers, real
//! extraction, no network.

use std::collections::HashMap;

use async_trait::async_trait;

use lyrfetch::core::chain::ProviderChain;
use lyrfetch::core::fetch::{Page, PageFetcher};
use lyrfetch::core::normalize::Normalizer;
use lyrfetch::core::providers::{self, FetchOutcome};
use lyrfetch::error::NetworkError;

const AZ_MARKER_START: &str = "<!-- Usage of azlyrics.com content by any third-party lyrics provider is prohibited by our licensing agreement. Sorry about that. -->";
const AZ_MARKER_END: &str = "<!-- MxM banner -->";

/// Serves canned bodies by URL; everything else gets `default_status`.
#[derive(Default)]
struct SiteFixture {
    pages: HashMap<String, String>,
    default_status: Option<u16>,
}

impl SiteFixture {
    fn new() -> Self {
        Self::default()
    }

    fn failing_everywhere(status: u16) -> Self {
        Self {
            pages: HashMap::new(),
            default_status: Some(status),
        }
    }

    fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    fn page_for(&self, url: &str) -> Page {
        match self.pages.get(url) {
            Some(body) => Page {
                status: 200,
                final_url: url.to_string(),
                body: body.clone(),
            },
            None => Page {
                status: self.default_status.unwrap_or(404),
                final_url: url.to_string(),
                body: String::new(),
            },
        }
    }
}

#[async_trait]
impl PageFetcher for SiteFixture {
    async fn get(&self, url: &str) -> Result<Page, NetworkError> {
        Ok(self.page_for(url))
    }

    async fn post_form(&self, url: &str, _fields: &[(&str, &str)]) -> Result<Page, NetworkError> {
        Ok(self.page_for(url))
    }
}

fn full_chain(fixture: SiteFixture) -> ProviderChain {
    let names: Vec<String> = providers::default_order()
        .iter()
        .map(|s| s.to_string())
        .collect();
    ProviderChain::new(
        providers::build(&names),
        Box::new(fixture),
        Normalizer::new(true),
    )
}

fn azlyrics_page(lyrics_html: &str) -> String {
    format!(
        "<html><body><div class=\"col-xs-12\">{AZ_MARKER_START}{lyrics_html}{AZ_MARKER_END}</div></body></html>"
    )
}

#[tokio::test]
async fn known_fixture_page_yields_exact_text() {
    let fixture = SiteFixture::new().with_page(
        "https://www.azlyrics.com/lyrics/queen/bohemianrhapsody.html",
        &azlyrics_page("Is this the real life?<br>\nIs this just fantasy?<br>\n<br>\nCaught in a landslide"),
    );
    let chain = full_chain(fixture);

    match chain.run("Queen", "Bohemian Rhapsody").await.unwrap() {
        FetchOutcome::Found(lyrics) => {
            assert_eq!(
                lyrics.text,
                "Is this the real life?\nIs this just fantasy?\n\nCaught in a landslide"
            );
            assert_eq!(lyrics.provider, "azlyrics");
        }
        FetchOutcome::NotFound => panic!("expected lyrics"),
    }
}

#[tokio::test]
async fn every_site_erroring_is_an_error() {
    let chain = full_chain(SiteFixture::failing_everywhere(500));
    assert!(chain.run("Queen", "Bohemian Rhapsody").await.is_err());
}

#[tokio::test]
async fn nothing_anywhere_is_not_found() {
    // Default fixture 404s every direct URL and serves no search pages.
    let chain = full_chain(SiteFixture::new());
    assert!(matches!(
        chain.run("Queen", "Bohemian Rhapsody").await.unwrap(),
        FetchOutcome::NotFound
    ));
}

#[tokio::test]
async fn search_results_without_title_match_are_not_found() {
    let search_url =
        "https://www.songlyrics.com/index.php?section=search&searchW=queen%20bohemian%20rhapsody";
    let body = r#"<html><body>
        <div class="serpresult"><h3><a href="/other/song-lyrics/">Somebody Else - Another Song Lyrics</a></h3></div>
    </body></html>"#;
    let fixture = SiteFixture::new().with_page(search_url, body);

    let names = vec!["songlyrics".to_string()];
    let chain = ProviderChain::new(
        providers::build(&names),
        Box::new(fixture),
        Normalizer::new(true),
    );

    assert!(matches!(
        chain.run("Queen", "Bohemian Rhapsody").await.unwrap(),
        FetchOutcome::NotFound
    ));
}

#[tokio::test]
async fn second_artist_alternative_is_tried_after_first_misses() {
    // "Nobody" has no page anywhere; "Queen" hits on the first provider.
    let fixture = SiteFixture::new().with_page(
        "https://www.azlyrics.com/lyrics/queen/bohemianrhapsody.html",
        &azlyrics_page("Mama, just killed a man"),
    );
    let chain = full_chain(fixture);

    match chain.run("Nobody, Queen", "Bohemian Rhapsody").await.unwrap() {
        FetchOutcome::Found(lyrics) => {
            assert_eq!(lyrics.text, "Mama, just killed a man");
        }
        FetchOutcome::NotFound => panic!("expected lyrics from second alternative"),
    }
}

#[tokio::test]
async fn later_provider_covers_for_an_earlier_miss() {
    // Direct-URL providers miss; the songlyrics search flow succeeds.
    let search_url =
        "https://www.songlyrics.com/index.php?section=search&searchW=queen%20bohemian%20rhapsody";
    let search_body = r#"<html><body>
        <div class="serpresult"><h3><a href="/queen/bohemian-rhapsody-lyrics/">Queen - Bohemian Rhapsody Lyrics</a></h3></div>
    </body></html>"#;
    let detail_body = r#"<html><body>
        <p id="songLyricsDiv">Scaramouche, Scaramouche, will you do the Fandango?</p>
    </body></html>"#;
    let fixture = SiteFixture::new()
        .with_page(search_url, search_body)
        .with_page(
            "https://www.songlyrics.com/queen/bohemian-rhapsody-lyrics/",
            detail_body,
        );
    let chain = full_chain(fixture);

    match chain.run("Queen", "Bohemian Rhapsody").await.unwrap() {
        FetchOutcome::Found(lyrics) => {
            assert_eq!(lyrics.provider, "songlyrics");
            assert_eq!(
                lyrics.text,
                "Scaramouche, Scaramouche, will you do the Fandango?"
            );
        }
        FetchOutcome::NotFound => panic!("expected lyrics"),
    }
}
