//! Offline shell.
//!
//! Serves requests for the app's static assets so the widget keeps working
//! without network access:
//!
//! - navigations go to the network first and fall back to the cached
//!   offline page;
//! - same-origin GETs are answered from the cache immediately while a
//!   background task revalidates; the cache only takes status-200 answers;
//! - everything else passes through to the network.

mod cache;
mod fetcher;

pub use cache::{AssetCache, CachedResponse};
pub use fetcher::{FetchFuture, Fetcher, HttpFetcher};

use std::sync::Arc;

use tokio::task::JoinHandle;
use url::Url;

use crate::error::ShellError;

/// Static files cached ahead of time.
pub const APP_SHELL: [&str; 6] = [
    "/",
    "/offline.html",
    "/styles/globals.css",
    "/icons/icon-192.png",
    "/icons/icon-512.png",
    "/manifest.webmanifest",
];

pub const OFFLINE_PAGE: &str = "/offline.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Navigate,
    Subresource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellRequest {
    pub url: Url,
    pub method: String,
    pub mode: RequestMode,
}

impl ShellRequest {
    /// Parse `url` into a request.
    ///
    /// # Errors
    /// Returns an error if `url` is not an absolute URL.
    pub fn parse(method: &str, url: &str, mode: RequestMode) -> Result<Self, ShellError> {
        let url = Url::parse(url).map_err(|e| ShellError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            url,
            method: method.to_ascii_uppercase(),
            mode,
        })
    }

    pub fn get(url: &str) -> Result<Self, ShellError> {
        Self::parse("GET", url, RequestMode::Subresource)
    }

    pub fn navigate(url: &str) -> Result<Self, ShellError> {
        Self::parse("GET", url, RequestMode::Navigate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Network,
    Cache,
    OfflineFallback,
}

#[derive(Debug)]
pub struct ShellResponse {
    pub source: ResponseSource,
    pub response: CachedResponse,
    /// Background refresh started for a cache hit.
    pub revalidation: Option<JoinHandle<()>>,
}

pub struct OfflineShell {
    origin: Url,
    cache: AssetCache,
    fetcher: Arc<dyn Fetcher>,
}

impl OfflineShell {
    pub fn new(origin: Url, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            origin,
            cache: AssetCache::new(),
            fetcher,
        }
    }

    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    fn is_same_origin(&self, url: &Url) -> bool {
        url.origin() == self.origin.origin()
    }

    /// Fetch `paths` relative to the origin and cache every 200 answer.
    /// Returns how many were cached.
    pub async fn precache(&self, paths: &[&str]) -> usize {
        let mut cached = 0;
        for path in paths {
            let Ok(url) = self.origin.join(path) else {
                continue;
            };
            match self.fetcher.fetch(url.clone()).await {
                Ok(resp) if resp.status == 200 => {
                    self.cache.put(&url, resp);
                    cached += 1;
                }
                Ok(resp) => {
                    tracing::warn!(%url, status = resp.status, "not precached");
                }
                Err(e) => tracing::warn!(%url, error = %e, "not precached"),
            }
        }
        cached
    }

    /// Answer one request. Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns [`ShellError::Offline`] when the network fails and nothing
    /// suitable is cached, or the fetch error for passthrough requests.
    pub async fn handle(&self, request: &ShellRequest) -> Result<ShellResponse, ShellError> {
        if request.mode == RequestMode::Navigate {
            return self.navigate(request).await;
        }

        if request.method != "GET" || !self.is_same_origin(&request.url) {
            let response = self.fetcher.fetch(request.url.clone()).await?;
            return Ok(ShellResponse {
                source: ResponseSource::Network,
                response,
                revalidation: None,
            });
        }

        if let Some(cached) = self.cache.get(&request.url) {
            let revalidation = self.spawn_revalidation(request.url.clone());
            return Ok(ShellResponse {
                source: ResponseSource::Cache,
                response: cached,
                revalidation: Some(revalidation),
            });
        }

        match self.fetcher.fetch(request.url.clone()).await {
            Ok(response) => {
                if response.status == 200 {
                    self.cache.put(&request.url, response.clone());
                }
                Ok(ShellResponse {
                    source: ResponseSource::Network,
                    response,
                    revalidation: None,
                })
            }
            Err(e) => {
                tracing::debug!(url = %request.url, error = %e, "network failed, nothing cached");
                Err(ShellError::Offline(request.url.to_string()))
            }
        }
    }

    async fn navigate(&self, request: &ShellRequest) -> Result<ShellResponse, ShellError> {
        match self.fetcher.fetch(request.url.clone()).await {
            Ok(response) => Ok(ShellResponse {
                source: ResponseSource::Network,
                response,
                revalidation: None,
            }),
            Err(e) => {
                tracing::debug!(url = %request.url, error = %e, "serving offline page");
                let fallback = self
                    .origin
                    .join(OFFLINE_PAGE)
                    .ok()
                    .and_then(|url| self.cache.get(&url))
                    .ok_or_else(|| ShellError::Offline(request.url.to_string()))?;
                Ok(ShellResponse {
                    source: ResponseSource::OfflineFallback,
                    response: fallback,
                    revalidation: None,
                })
            }
        }
    }

    fn spawn_revalidation(&self, url: Url) -> JoinHandle<()> {
        let fetcher = Arc::clone(&self.fetcher);
        let cache = self.cache.clone();
        tokio::spawn(async move {
            match fetcher.fetch(url.clone()).await {
                Ok(resp) if resp.status == 200 => cache.put(&url, resp),
                Ok(resp) => tracing::debug!(%url, status = resp.status, "revalidation kept stale copy"),
                Err(e) => tracing::debug!(%url, error = %e, "revalidation failed"),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned answers keyed by path; a missing path is a network error.
    #[derive(Default)]
    struct StubFetcher {
        answers: Mutex<HashMap<String, CachedResponse>>,
        calls: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn answer(&self, path: &str, status: u16, body: &str) {
            self.answers
                .lock()
                .unwrap()
                .insert(path.to_string(), CachedResponse::new(status, body));
        }

        fn go_offline(&self) {
            self.answers.lock().unwrap().clear();
        }
    }

    impl Fetcher for StubFetcher {
        fn fetch(&self, url: Url) -> FetchFuture {
            self.calls.lock().unwrap().push(url.path().to_string());
            let answer = self.answers.lock().unwrap().get(url.path()).cloned();
            Box::pin(async move {
                answer.ok_or_else(|| ShellError::Fetch {
                    url: url.to_string(),
                    message: "connection refused".into(),
                })
            })
        }
    }

    fn shell() -> (OfflineShell, Arc<StubFetcher>) {
        let fetcher = Arc::new(StubFetcher::default());
        let origin = Url::parse("https://bravethem.app").unwrap();
        (OfflineShell::new(origin, fetcher.clone()), fetcher)
    }

    #[tokio::test]
    async fn cached_get_is_served_then_revalidated() {
        let (shell, fetcher) = shell();
        fetcher.answer("/app.css", 200, "v1");
        let req = ShellRequest::get("https://bravethem.app/app.css").unwrap();

        let first = shell.handle(&req).await.unwrap();
        assert_eq!(first.source, ResponseSource::Network);

        fetcher.answer("/app.css", 200, "v2");
        let second = shell.handle(&req).await.unwrap();
        assert_eq!(second.source, ResponseSource::Cache);
        assert_eq!(second.response.body, b"v1");
        second.revalidation.unwrap().await.unwrap();

        assert_eq!(shell.cache().get(&req.url).unwrap().body, b"v2");
    }

    #[tokio::test]
    async fn non_200_revalidation_keeps_cached_copy() {
        let (shell, fetcher) = shell();
        fetcher.answer("/app.js", 200, "good");
        let req = ShellRequest::get("https://bravethem.app/app.js").unwrap();
        shell.handle(&req).await.unwrap();

        fetcher.answer("/app.js", 503, "busy");
        let resp = shell.handle(&req).await.unwrap();
        resp.revalidation.unwrap().await.unwrap();
        assert_eq!(shell.cache().get(&req.url).unwrap().body, b"good");
    }

    #[tokio::test]
    async fn uncached_non_200_is_returned_but_not_cached() {
        let (shell, fetcher) = shell();
        fetcher.answer("/missing.png", 404, "nope");
        let req = ShellRequest::get("https://bravethem.app/missing.png").unwrap();
        let resp = shell.handle(&req).await.unwrap();
        assert_eq!(resp.response.status, 404);
        assert!(shell.cache().get(&req.url).is_none());
    }

    #[tokio::test]
    async fn offline_get_without_cache_fails() {
        let (shell, _fetcher) = shell();
        let req = ShellRequest::get("https://bravethem.app/app.css").unwrap();
        assert!(matches!(
            shell.handle(&req).await,
            Err(ShellError::Offline(_))
        ));
    }

    #[tokio::test]
    async fn navigation_falls_back_to_offline_page() {
        let (shell, fetcher) = shell();
        fetcher.answer(OFFLINE_PAGE, 200, "<h1>offline</h1>");
        fetcher.answer("/", 200, "<h1>home</h1>");
        assert_eq!(shell.precache(&APP_SHELL).await, 2);

        let req = ShellRequest::navigate("https://bravethem.app/").unwrap();
        assert_eq!(
            shell.handle(&req).await.unwrap().source,
            ResponseSource::Network
        );

        fetcher.go_offline();
        let resp = shell.handle(&req).await.unwrap();
        assert_eq!(resp.source, ResponseSource::OfflineFallback);
        assert_eq!(resp.response.body, b"<h1>offline</h1>");
    }

    #[tokio::test]
    async fn cross_origin_and_non_get_pass_through() {
        let (shell, fetcher) = shell();
        fetcher.answer("/font.woff", 200, "font");
        let cross = ShellRequest::get("https://cdn.example.com/font.woff").unwrap();
        shell.handle(&cross).await.unwrap();
        assert!(shell.cache().get(&cross.url).is_none());

        fetcher.answer("/api", 200, "ok");
        let post = ShellRequest::parse("post", "https://bravethem.app/api", RequestMode::Subresource)
            .unwrap();
        let resp = shell.handle(&post).await.unwrap();
        assert_eq!(resp.source, ResponseSource::Network);
        assert!(shell.cache().is_empty());
    }
}
