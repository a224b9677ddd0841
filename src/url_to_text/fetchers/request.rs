use crate::config::FetchConfig;
use crate::error::{host_of, FetchError};
use log::{debug, warn};
use reqwest::Client;

/// Plain HTTP page fetcher with a browser identity and a hard timeout.
///
/// Failures are classified, never retried.
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                warn!("Failed to create HTTP client: {}", e);
                FetchError::Unreadable {
                    host: "this website".to_string(),
                }
            })?;

        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(&e, url))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} answered {}", url, status);
            return Err(FetchError::from_status(status.as_u16()));
        }

        let html = response.text().await.map_err(|e| classify(&e, url))?;
        debug!("Fetched {} bytes from {}", html.len(), url);
        Ok(html)
    }
}

fn classify(err: &reqwest::Error, url: &str) -> FetchError {
    let classified = FetchError::from_reqwest(err, url);
    if matches!(classified, FetchError::Unreadable { .. }) {
        warn!("Request to {} failed: {}", host_of(url), err);
    }
    classified
}
