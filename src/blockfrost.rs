use serde::{de::DeserializeOwned, Deserialize};
use std::fmt;
use std::time::Duration;

use crate::{
    config::BlockfrostConfig,
    service::entities::{AssetMetadata, Utxo, WalletInfo},
};

/// Blockfrost's fixed page size for list endpoints.
pub const PAGE_SIZE: usize = 100;

const MAX_BODY_SIZE: usize = 8 * 1024 * 1024;
const MAX_ERROR_BODY_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub enum BlockfrostError {
    Transport {
        url: String,
        reason: String,
    },
    Status {
        url: String,
        status: u16,
        message: Option<String>,
    },
    Decode {
        url: String,
        reason: String,
    },
}

impl std::error::Error for BlockfrostError {}

impl fmt::Display for BlockfrostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockfrostError::Transport { url, reason } => {
                write!(f, "request to {} failed: {}", url, reason)
            }
            BlockfrostError::Status {
                url,
                status,
                message,
            } => write!(
                f,
                "{} answered {}: {}",
                url,
                status,
                message.as_deref().unwrap_or("no details")
            ),
            BlockfrostError::Decode { url, reason } => {
                write!(f, "unexpected payload from {}: {}", url, reason)
            }
        }
    }
}

/// Error payload Blockfrost sends along with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub status_code: u16,
    pub error: String,
    pub message: String,
}

#[derive(Clone)]
pub struct BlockfrostClient {
    base_url: String,
    project_id: String,
    timeout: Duration,
    max_utxo_pages: u32,
}

impl BlockfrostClient {
    pub fn new(cfg: &BlockfrostConfig) -> Self {
        Self {
            base_url: cfg.base_url.trim_end_matches('/').to_owned(),
            project_id: cfg.api_key.clone(),
            timeout: Duration::from_secs(cfg.timeout_secs),
            max_utxo_pages: cfg.max_utxo_pages.max(1),
        }
    }

    /// Opens a session sharing one HTTP connection pool across its requests.
    pub fn session(&self) -> Session<'_> {
        Session {
            api: self,
            http: awc::Client::builder().timeout(self.timeout).finish(),
        }
    }
}

/// Requests issued through one `awc::Client`, so concurrent and follow-up
/// calls reuse open connections. Lives for a single page build.
pub struct Session<'a> {
    api: &'a BlockfrostClient,
    http: awc::Client,
}

impl<'a> Session<'a> {
    pub async fn get_address(&self, address: &str) -> Result<WalletInfo, BlockfrostError> {
        self.get_json(&format!("/addresses/{}", address)).await
    }

    /// All UTXOs of the address, following pagination up to the configured
    /// page cap.
    pub async fn get_utxos(&self, address: &str) -> Result<Vec<Utxo>, BlockfrostError> {
        let mut result: Vec<Utxo> = Vec::new();

        for page in 1..=self.api.max_utxo_pages {
            let batch: Vec<Utxo> = self
                .get_json(&format!("/addresses/{}/utxos?page={}", address, page))
                .await?;
            let last_page = batch.len() < PAGE_SIZE;
            result.extend(batch);

            if last_page {
                return Ok(result);
            }
        }

        warn!(
            "utxo listing truncated: address={} pages={} utxos={}",
            address,
            self.api.max_utxo_pages,
            result.len()
        );
        Ok(result)
    }

    pub async fn get_asset(&self, unit: &str) -> Result<AssetMetadata, BlockfrostError> {
        self.get_json(&format!("/assets/{}", unit)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BlockfrostError> {
        let url = format!("{}{}", self.api.base_url, path);

        let mut resp = self
            .http
            .get(&url)
            .insert_header(("project_id", self.api.project_id.clone()))
            .send()
            .await
            .map_err(|e| BlockfrostError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let message = match resp.body().limit(MAX_ERROR_BODY_SIZE).await {
                Ok(body) => serde_json::from_slice::<ErrorResponse>(&body)
                    .map(|e| e.message)
                    .ok(),
                Err(_) => None,
            };
            debug!("blockfrost request failed: url={} status={}", url, status);
            return Err(BlockfrostError::Status {
                url,
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<T>()
            .limit(MAX_BODY_SIZE)
            .await
            .map_err(|e| BlockfrostError::Decode {
                url,
                reason: e.to_string(),
            })
    }
}
