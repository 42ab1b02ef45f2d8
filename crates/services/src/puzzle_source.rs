use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tomato_core::model::{Puzzle, PuzzleImage};
use tracing::debug;
use url::Url;

use crate::error::PuzzleFetchError;
use crate::media::resolve_image_mime;
use crate::response::{QuestionRef, parse_puzzle_body};

pub const DEFAULT_API_URL: &str = "http://marcconrad.com/uob/tomato/api.php";

/// Anything that can hand out a fresh puzzle.
#[async_trait]
pub trait PuzzleSource: Send + Sync {
    async fn fetch_puzzle(&self) -> Result<Puzzle, PuzzleFetchError>;
}

#[derive(Clone, Debug)]
pub struct PuzzleApiConfig {
    pub endpoint: Url,
    pub timeout: Duration,
}

impl PuzzleApiConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Fetches puzzles from the JSON endpoint and downloads the referenced image.
#[derive(Clone)]
pub struct HttpPuzzleSource {
    client: Client,
    endpoint: Url,
}

impl HttpPuzzleSource {
    /// # Errors
    ///
    /// Returns `PuzzleFetchError::Http` if the HTTP client cannot be built.
    pub fn new(config: PuzzleApiConfig) -> Result<Self, PuzzleFetchError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }

    async fn download_image(&self, url: Url) -> Result<PuzzleImage, PuzzleFetchError> {
        debug!(%url, "downloading puzzle image");
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(PuzzleFetchError::HttpStatus(response.status()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let data = response.bytes().await?.to_vec();
        let Some(mime) = resolve_image_mime(content_type.as_deref(), &data) else {
            debug!(content_type = ?content_type, "image response is not an image");
            return Err(PuzzleFetchError::InvalidImage);
        };
        PuzzleImage::from_bytes(mime, data).map_err(|_| PuzzleFetchError::InvalidImage)
    }
}

#[async_trait]
impl PuzzleSource for HttpPuzzleSource {
    async fn fetch_puzzle(&self) -> Result<Puzzle, PuzzleFetchError> {
        let response = self.client.get(self.endpoint.clone()).send().await?;
        if !response.status().is_success() {
            return Err(PuzzleFetchError::HttpStatus(response.status()));
        }
        let body = response.bytes().await?;
        let parsed = parse_puzzle_body(&body)?;

        let image = match parsed.question {
            QuestionRef::Remote(url) => self.download_image(url).await?,
            QuestionRef::Inline { mime, data } => {
                PuzzleImage::from_bytes(mime, data).map_err(|_| PuzzleFetchError::InvalidImage)?
            }
        };

        Ok(Puzzle::new(image, parsed.solution))
    }
}
