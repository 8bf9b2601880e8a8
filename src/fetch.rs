//! Page retrieval behind a small trait seam.
//!
//! - [`PageSource`]: anything that turns a URL into an HTML body
//! - [`HttpSource`]: the real implementation on top of `reqwest`
//!
//! A page is only accepted with status 200. There is no retry and no timeout
//! configuration; the first failure ends the run.

use crate::error::ScrapeError;
use crate::utils::truncate_for_log;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Async source of HTML pages.
pub trait PageSource {
    /// Fetch the body of `url`, failing on anything but a 200 response.
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// [`PageSource`] backed by a shared `reqwest` client.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(user_agent: &str) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|source| ScrapeError::Transport {
                url: String::new(),
                source,
            })?;
        Ok(Self { client })
    }
}

impl fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSource").finish_non_exhaustive()
    }
}

impl PageSource for HttpSource {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let t0 = Instant::now();
        let transport = |source| ScrapeError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Page request rejected");
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(transport)?;
        info!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        debug!(preview = %truncate_for_log(&body, 200), "Page body");
        Ok(body)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// In-memory source used by scraper and pipeline tests.
    #[derive(Default)]
    pub(crate) struct FakeSource {
        pages: HashMap<String, Result<String, u16>>,
        pub(crate) requested: RefCell<Vec<String>>,
    }

    impl FakeSource {
        pub(crate) fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), Ok(body.to_string()));
            self
        }

        pub(crate) fn with_status(mut self, url: &str, status: u16) -> Self {
            self.pages.insert(url.to_string(), Err(status));
            self
        }
    }

    impl PageSource for FakeSource {
        async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
            self.requested.borrow_mut().push(url.to_string());
            match self.pages.get(url) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(status)) => Err(ScrapeError::Status {
                    url: url.to_string(),
                    status: *status,
                }),
                None => Err(ScrapeError::Status {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_fake_source_reports_status() {
        let source = FakeSource::default().with_status("https://example.com/a", 503);
        let err = source.fetch("https://example.com/a").await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "503");
        assert_eq!(source.requested.borrow().len(), 1);
    }

    /// Serve one canned HTTP response on a local port and return its base URL.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 4096];
            let _ = socket.read(&mut request).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}")
    }

    fn local_source() -> HttpSource {
        HttpSource {
            client: Client::builder().no_proxy().build().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_http_source_rejects_non_200() {
        let base = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
        let url = format!("{base}/leagues/NBA_2024.html");

        let err = local_source().fetch(&url).await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(err.to_string(), "404");
        assert_eq!(err.url(), Some(url.as_str()));
    }

    #[tokio::test]
    async fn test_http_source_returns_200_body() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 29\r\nConnection: close\r\n\r\n<html><p>standings</p></html>",
        )
        .await;

        let body = local_source().fetch(&format!("{base}/friv/mvp.html")).await.unwrap();

        assert_eq!(body, "<html><p>standings</p></html>");
    }

    #[tokio::test]
    async fn test_http_source_reports_refused_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = local_source().fetch(&format!("http://{addr}/")).await.unwrap_err();

        assert!(matches!(err, ScrapeError::Transport { .. }));
        assert!(err.is_transport());
    }

    #[test]
    fn test_http_source_builds() {
        let source = HttpSource::new("hoops_insights/test").unwrap();
        assert!(format!("{source:?}").starts_with("HttpSource"));
    }
}
