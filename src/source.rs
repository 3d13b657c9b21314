use std::{
    fmt,
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::blocking::Client;

use crate::foundation::error::{PlaceheatError, PlaceheatResult};

/// CSV export of the place canvas.
pub const DEFAULT_URL: &str = "https://github.com/moustacheminer/place/blob/master/export.csv?raw=true";

/// Local copy of the same export.
pub const DEFAULT_FILE: &str = "export.csv";

/// Where the CSV bytes come from. Exactly one source per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Default for Source {
    fn default() -> Self {
        Self::Url(DEFAULT_URL.to_string())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "url {url}"),
            Self::File(path) => write!(f, "file '{}'", path.display()),
        }
    }
}

/// Network knobs for [`Source::Url`].
#[derive(Clone, Debug)]
pub struct FetchOptions {
    /// Whole-request timeout. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Reject non-2xx responses. When `false` the body is used whatever the status.
    pub check_status: bool,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(60)),
            check_status: true,
            user_agent: concat!("placeheat/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Source {
    /// Open the source as a byte stream.
    ///
    /// The returned reader owns the socket or file descriptor; dropping it releases the
    /// resource.
    #[tracing::instrument(skip(self, opts), fields(source = %self))]
    pub fn open(&self, opts: &FetchOptions) -> PlaceheatResult<Box<dyn Read>> {
        match self {
            Self::Url(url) => fetch(url, opts),
            Self::File(path) => open_file(path),
        }
    }
}

fn fetch(url: &str, opts: &FetchOptions) -> PlaceheatResult<Box<dyn Read>> {
    let client = Client::builder()
        .user_agent(opts.user_agent.clone())
        .timeout(opts.timeout)
        .build()
        .map_err(|e| PlaceheatError::fetch(format!("failed to build HTTP client: {e}")))?;

    tracing::info!(url, "getting CSV data");
    let resp = client
        .get(url)
        .send()
        .map_err(|e| PlaceheatError::fetch(format!("GET {url} failed: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
        if opts.check_status {
            return Err(PlaceheatError::fetch(format!(
                "GET {url} returned HTTP {status}"
            )));
        }
        tracing::warn!(%status, "ignoring non-success HTTP status");
    }

    tracing::info!(%status, "got CSV response");
    Ok(Box::new(resp))
}

fn open_file(path: &Path) -> PlaceheatResult<Box<dyn Read>> {
    let open_err = |source| PlaceheatError::Open {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(open_err)?;
    let meta = file.metadata().map_err(open_err)?;
    if meta.is_dir() {
        return Err(open_err(std::io::Error::new(
            std::io::ErrorKind::IsADirectory,
            "is a directory",
        )));
    }

    tracing::info!(path = %path.display(), bytes = meta.len(), "opened CSV file");
    Ok(Box::new(BufReader::new(file)))
}
