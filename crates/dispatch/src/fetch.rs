//! Retrieval of the test-definition payload over HTTP.

/// Errors from fetching the payload.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("payload request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The payload URL returned a non-2xx status code.
    #[error("payload URL returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the payload URL.
pub struct PayloadFetcher {
    client: reqwest::Client,
}

impl PayloadFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a fetcher reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET the payload. The body is returned as text, unmodified; it is
    /// handed to the queue as-is.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}

impl Default for PayloadFetcher {
    fn default() -> Self {
        Self::new()
    }
}
