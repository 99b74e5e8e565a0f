//! Remote download of the markdown document.
//!
//! The body is staged in a temporary file and read back once the transfer is
//! complete. The file is owned by the `fetch` call and deleted when it
//! returns, whether the download succeeded or not.

use std::io::Write;
use std::path::PathBuf;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tempfile::NamedTempFile;

use crate::build::pipeline::PipelineError;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to stage download in a temporary file: {0}")]
    TempFile(#[from] std::io::Error),
}

/// The downloaded bytes are not text.
#[derive(thiserror::Error, Debug)]
#[error("downloaded document is not valid UTF-8: {0}")]
pub struct DecodeError(#[from] std::string::FromUtf8Error);

/// Retrieves a text document from a URL.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String, PipelineError>;
}

/// Fetcher backed by a blocking HTTP client.
pub struct HttpFetcher {
    client: Client,
    /// Staging directory override. Always `None` outside tests, which point it
    /// at a scratch directory to check that nothing is left behind.
    temp_dir: Option<PathBuf>,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            temp_dir: None,
        }
    }

    fn staging_file(&self) -> std::io::Result<NamedTempFile> {
        match &self.temp_dir {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new(),
        }
    }

    /// Stream the response body for `url` into `file`.
    fn download(&self, url: &str, file: &mut NamedTempFile) -> Result<u64, FetchError> {
        let request_failed = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let mut response = self.client.get(url).send().map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let bytes = response.copy_to(file).map_err(request_failed)?;
        file.flush()?;

        Ok(bytes)
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, PipelineError> {
        let mut staged = self.staging_file().map_err(FetchError::TempFile)?;

        let bytes = self.download(url, &mut staged)?;
        tracing::info!(url, bytes, path = %staged.path().display(), "downloaded markdown");

        let raw = std::fs::read(staged.path()).map_err(FetchError::TempFile)?;
        let text = String::from_utf8(raw).map_err(DecodeError::from)?;

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::net::TcpListener;
    use std::path::Path;

    use super::*;

    /// Serve a single canned HTTP response on loopback and return its URL.
    fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let head = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/markdown\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(body).unwrap();
            stream.flush().unwrap();
        });

        format!("http://{addr}/serenata/2017-05-21-ceap-datasets.md")
    }

    fn fetcher(staging: &Path) -> HttpFetcher {
        HttpFetcher {
            client: Client::builder().no_proxy().build().unwrap(),
            temp_dir: Some(staging.to_path_buf()),
        }
    }

    fn staged_files(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_fetch_returns_body() {
        let staging = tempfile::tempdir().unwrap();
        let url = serve_once("200 OK", "# CEAP\n\nCota parlamentar\n".as_bytes());

        let text = fetcher(staging.path()).fetch(&url).unwrap();

        assert_eq!(text, "# CEAP\n\nCota parlamentar\n");
        assert_eq!(staged_files(staging.path()), 0);
    }

    #[test]
    fn test_fetch_not_found() {
        let staging = tempfile::tempdir().unwrap();
        let url = serve_once("404 Not Found", b"");

        let err = fetcher(staging.path()).fetch(&url).unwrap_err();

        match err {
            PipelineError::Fetch(FetchError::Status { status, .. }) => {
                assert_eq!(status, StatusCode::NOT_FOUND)
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert_eq!(staged_files(staging.path()), 0);
    }

    #[test]
    fn test_fetch_unreachable() {
        let staging = tempfile::tempdir().unwrap();
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        // The listener is dropped, so nothing accepts on this port.
        let url = format!("http://{addr}/missing.md");

        let err = fetcher(staging.path()).fetch(&url).unwrap_err();

        assert!(matches!(err, PipelineError::Fetch(FetchError::Request { .. })));
        assert_eq!(staged_files(staging.path()), 0);
    }

    #[test]
    fn test_fetch_rejects_binary() {
        let staging = tempfile::tempdir().unwrap();
        let url = serve_once("200 OK", &[0xff, 0xfe, 0x00, 0x41]);

        let err = fetcher(staging.path()).fetch(&url).unwrap_err();

        assert!(matches!(err, PipelineError::Decode(_)));
        assert_eq!(staged_files(staging.path()), 0);
    }
}
