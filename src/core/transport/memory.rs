//! In-memory transport for unit tests. Counts every request per URL.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::cancel::CancellationSignal;
use crate::core::error::{LauncherError, LauncherResult};

use super::{DownloadOutcome, Transport, TransportResponse};

#[derive(Debug, Clone)]
enum Route {
    Body(Vec<u8>),
    Status(u16),
}

#[derive(Debug, Default)]
pub struct MemoryTransport {
    routes: Mutex<HashMap<String, Route>>,
    hits: Mutex<HashMap<String, usize>>,
    delay: Option<Duration>,
    url_delays: HashMap<String, Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.insert(url, body);
        self
    }

    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), Route::Status(status));
        self
    }

    /// Every request sleeps this long first, observing cancellation.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests for `url` sleep this long instead of the global delay.
    pub fn with_url_delay(mut self, url: &str, delay: Duration) -> Self {
        self.url_delays.insert(url.to_string(), delay);
        self
    }

    pub fn insert(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), Route::Body(body.into()));
    }

    pub fn fetches(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }

    /// Most requests ever served at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    async fn serve(&self, url: &str, cancel: &CancellationSignal) -> LauncherResult<Route> {
        cancel.check()?;
        *self.hits.lock().unwrap().entry(url.to_string()).or_default() += 1;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let _in_flight = InFlight(&self.in_flight);

        if let Some(delay) = self.url_delays.get(url).copied().or(self.delay) {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(LauncherError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }

        let route = self.routes.lock().unwrap().get(url).cloned();
        Ok(route.unwrap_or(Route::Status(404)))
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn get(&self, url: &str, cancel: &CancellationSignal) -> LauncherResult<TransportResponse> {
        Ok(match self.serve(url, cancel).await? {
            Route::Body(body) => TransportResponse { status: 200, body },
            Route::Status(status) => TransportResponse {
                status,
                body: Vec::new(),
            },
        })
    }

    async fn download_to_file(
        &self,
        url: &str,
        dest: &Path,
        cancel: &CancellationSignal,
    ) -> LauncherResult<DownloadOutcome> {
        match self.serve(url, cancel).await? {
            Route::Body(body) => {
                tokio::fs::write(dest, &body)
                    .await
                    .map_err(|source| LauncherError::io(dest, source))?;
                Ok(DownloadOutcome {
                    status: 200,
                    bytes_written: body.len() as u64,
                })
            }
            Route::Status(status) => Ok(DownloadOutcome {
                status,
                bytes_written: 0,
            }),
        }
    }
}
