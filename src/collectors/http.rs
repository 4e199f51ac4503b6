use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use url::Url;

use crate::collectors::PageFetcher;
use crate::error::ScrapeError;

const MAX_REDIRECTS: usize = 10;

/// reqwest-backed fetcher pinned to a single host.
pub struct HttpFetcher {
    client: reqwest::Client,
    allowed_host: String,
}

impl HttpFetcher {
    pub fn new(base: &Url, user_agent: &str, timeout: Duration) -> Result<Self, ScrapeError> {
        let allowed_host = base
            .host_str()
            .ok_or_else(|| ScrapeError::HostNotAllowed {
                url: base.to_string(),
            })?
            .to_string();

        // Cross-host redirects are not followed; the 3xx response then fails
        // the status check in `fetch`.
        let redirect_host = allowed_host.clone();
        let policy = Policy::custom(move |attempt| {
            if attempt.url().host_str() != Some(redirect_host.as_str()) {
                attempt.stop()
            } else if attempt.previous().len() >= MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else {
                attempt.follow()
            }
        });

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(policy)
            .build()
            .map_err(|e| ScrapeError::Fetch {
                url: base.to_string(),
                source: e,
            })?;

        Ok(Self {
            client,
            allowed_host,
        })
    }

    pub fn allowed_host(&self) -> &str {
        &self.allowed_host
    }

    fn is_allowed(&self, url: &Url) -> bool {
        url.host_str() == Some(self.allowed_host.as_str())
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, ScrapeError> {
        if !self.is_allowed(url) {
            return Err(ScrapeError::HostNotAllowed {
                url: url.to_string(),
            });
        }

        tracing::info!("Visiting {url}");

        let resp = self
            .client
            .get(url.clone())
            .header("Accept", "text/html,application/xhtml+xml,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| ScrapeError::Fetch {
                url: url.to_string(),
                source: e,
            })?;

        if !resp.status().is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: resp.status(),
            });
        }

        if !self.is_allowed(resp.url()) {
            return Err(ScrapeError::HostNotAllowed {
                url: resp.url().to_string(),
            });
        }

        resp.text().await.map_err(|e| ScrapeError::Fetch {
            url: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serve one canned response per accepted connection, in order.
    async fn serve(responses: Vec<String>) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            for response in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = [0u8; 2048];
                let _ = socket.read(&mut buf).await;
                socket.write_all(response.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
        });
        Url::parse(&format!("http://{addr}")).unwrap()
    }

    fn redirect_to(location: &str) -> String {
        format!(
            "HTTP/1.1 302 Found\r\nLocation: {location}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
        )
    }

    fn ok(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    fn fetcher() -> HttpFetcher {
        let base = Url::parse("https://djinni.co").unwrap();
        HttpFetcher::new(&base, "test-agent", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn pins_host_from_base_url() {
        assert_eq!(fetcher().allowed_host(), "djinni.co");
    }

    #[test]
    fn base_without_host_is_rejected() {
        let base = Url::parse("data:text/plain,hello").unwrap();
        let result = HttpFetcher::new(&base, "test-agent", Duration::from_secs(5));
        assert!(matches!(result, Err(ScrapeError::HostNotAllowed { .. })));
    }

    #[tokio::test]
    async fn foreign_host_is_refused_before_request() {
        let url = Url::parse("https://example.com/jobs/?page=0").unwrap();
        let err = fetcher().fetch(&url).await.unwrap_err();
        match err {
            ScrapeError::HostNotAllowed { url } => assert!(url.contains("example.com")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn subdomain_is_not_the_allowed_host() {
        let url = Url::parse("https://api.djinni.co/jobs/?page=0").unwrap();
        let err = fetcher().fetch(&url).await.unwrap_err();
        assert!(matches!(err, ScrapeError::HostNotAllowed { .. }));
    }

    #[tokio::test]
    async fn cross_host_redirect_is_not_followed() {
        let base = serve(vec![redirect_to("http://localhost:9/jobs/")]).await;
        let fetcher = HttpFetcher::new(&base, "test-agent", Duration::from_secs(5)).unwrap();
        let url = base.join("/jobs/?page=0").unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        match err {
            ScrapeError::Status { status, .. } => assert_eq!(status.as_u16(), 302),
            ScrapeError::HostNotAllowed { .. } => {}
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn same_host_redirect_is_followed() {
        let base = serve(vec![redirect_to("/jobs/?page=1"), ok("<ul></ul>")]).await;
        let fetcher = HttpFetcher::new(&base, "test-agent", Duration::from_secs(5)).unwrap();
        let url = base.join("/jobs/?page=0").unwrap();

        assert_eq!(fetcher.fetch(&url).await.unwrap(), "<ul></ul>");
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let base = serve(vec![
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                .to_string(),
        ])
        .await;
        let fetcher = HttpFetcher::new(&base, "test-agent", Duration::from_secs(5)).unwrap();
        let url = base.join("/jobs/?page=0").unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Status { status, .. } if status.as_u16() == 503));
    }
}
