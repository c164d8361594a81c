use std::future::Future;
use std::pin::Pin;

use reqwest::Client;
use url::Url;

use super::CachedResponse;
use crate::error::ShellError;

pub type FetchFuture = Pin<Box<dyn Future<Output = Result<CachedResponse, ShellError>> + Send>>;

/// Network access for the offline shell.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: Url) -> FetchFuture;
}

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: Url) -> FetchFuture {
        let client = self.client.clone();
        Box::pin(async move {
            let fetch_failed = |e: reqwest::Error| ShellError::Fetch {
                url: url.to_string(),
                message: e.to_string(),
            };
            let resp = client
                .get(url.clone())
                .send()
                .await
                .map_err(fetch_failed)?;
            let status = resp.status().as_u16();
            let content_type = resp
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = resp.bytes().await.map_err(fetch_failed)?.to_vec();
            Ok(CachedResponse {
                status,
                content_type,
                body,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn http_fetcher_reads_status_headers_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/styles/globals.css")
            .with_status(200)
            .with_header("content-type", "text/css")
            .with_body("body{}")
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/styles/globals.css", server.url())).unwrap();
        let resp = HttpFetcher::new().fetch(url).await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.content_type.as_deref(), Some("text/css"));
        assert_eq!(resp.body, b"body{}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn http_fetcher_passes_error_statuses_through() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/gone")
            .with_status(404)
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/gone", server.url())).unwrap();
        let resp = HttpFetcher::new().fetch(url).await.unwrap();
        assert_eq!(resp.status, 404);
    }
}
