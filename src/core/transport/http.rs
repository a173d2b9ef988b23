use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING};
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::cancel::CancellationSignal;
use crate::core::config::LauncherConfig;
use crate::core::error::{LauncherError, LauncherResult};

use super::{DownloadOutcome, Transport, TransportResponse};

pub fn build_http_client(user_agent: &str, connect_timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    // Hashes are computed over the bytes as published; no transparent decoding.
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    let mut builder = Client::builder()
        .user_agent(user_agent)
        .default_headers(default_headers);
    if let Some(timeout) = connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    builder.build()
}

/// `Transport` over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &LauncherConfig) -> LauncherResult<Self> {
        let client = build_http_client(&config.user_agent, config.connect_timeout())?;
        Ok(Self::new(client))
    }

    async fn send(&self, url: &str, cancel: &CancellationSignal) -> LauncherResult<reqwest::Response> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(LauncherError::Cancelled),
            response = self.client.get(url).send() => Ok(response?),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, cancel: &CancellationSignal) -> LauncherResult<TransportResponse> {
        let response = self.send(url, cancel).await?;
        let status = response.status().as_u16();

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(LauncherError::Cancelled),
            bytes = response.bytes() => bytes?,
        };

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }

    async fn download_to_file(
        &self,
        url: &str,
        dest: &Path,
        cancel: &CancellationSignal,
    ) -> LauncherResult<DownloadOutcome> {
        let response = self.send(url, cancel).await?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!("GET {} returned HTTP {}", url, status);
            return Ok(DownloadOutcome {
                status,
                bytes_written: 0,
            });
        }

        let mut written = 0u64;
        // Scoped so the handle is closed before callers hash or rename the file.
        {
            let mut file = tokio::fs::File::create(dest)
                .await
                .map_err(|source| LauncherError::io(dest, source))?;
            let mut stream = response.bytes_stream();

            loop {
                let next = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(LauncherError::Cancelled),
                    next = stream.next() => next,
                };
                let Some(chunk) = next else { break };
                let chunk = chunk?;
                file.write_all(&chunk)
                    .await
                    .map_err(|source| LauncherError::io(dest, source))?;
                written += chunk.len() as u64;
            }

            file.flush()
                .await
                .map_err(|source| LauncherError::io(dest, source))?;
        }

        debug!("Downloaded {} bytes: {} -> {:?}", written, url, dest);
        Ok(DownloadOutcome {
            status,
            bytes_written: written,
        })
    }
}
