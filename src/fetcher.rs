use std::time::Duration;
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT,
};
use crate::error::{Result, ScrapeError};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Headers sent with every request so the board sees an ordinary browser.
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-CA,en;q=0.5"));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(browser_headers())
            .cookie_store(true)
            .build()?;

        Ok(Fetcher { client })
    }

    /// GET `url` and return the body. Non-2xx responses are errors.
    pub fn fetch(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        debug!("GET {} -> {}", url, status);

        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(resp.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> Fetcher {
        Fetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn returns_body_on_success() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/jobs")
            .match_header("user-agent", BROWSER_USER_AGENT)
            .match_header("accept-language", "en-CA,en;q=0.5")
            .with_status(200)
            .with_body("<html><body>ok</body></html>")
            .create();

        let body = fetcher().fetch(&format!("{}/jobs", server.url())).unwrap();
        assert_eq!(body, "<html><body>ok</body></html>");
        mock.assert();
    }

    #[test]
    fn non_success_status_is_error() {
        let mut server = mockito::Server::new();
        server.mock("GET", "/jobs").with_status(403).create();

        let err = fetcher().fetch(&format!("{}/jobs", server.url())).unwrap_err();
        match err {
            ScrapeError::Status { status, .. } => assert_eq!(status.as_u16(), 403),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn connection_failure_is_network_error() {
        // Nothing listens on port 9 locally.
        let err = fetcher().fetch("http://127.0.0.1:9/jobs").unwrap_err();
        assert!(matches!(err, ScrapeError::Network(_)));
    }
}
