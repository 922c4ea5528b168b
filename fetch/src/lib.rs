//! Client for the ESV passage API plus the reference-file downloader.
//!
//! Requests are all-or-nothing: a fixed timeout, no retries, no streamed
//! partial responses.

use anyhow::{anyhow, Context, Result};
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.esv.org/v3/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("biblestudy/", env!("CARGO_PKG_VERSION"));

/// A passage lookup result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Passage {
    /// Reference as the API understood it, e.g. "2 Timothy 1:7".
    #[serde(default)]
    pub canonical: String,
    #[serde(default)]
    pub passages: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub reference: String,
    pub content: String,
}

/// Formatting flags sent with a passage lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassageOptions {
    /// 0 leaves lines unwrapped.
    pub line_length: u32,
    pub include_headings: bool,
    pub include_footnotes: bool,
    pub indent_poetry: bool,
    pub include_verse_numbers: bool,
}

impl PassageOptions {
    /// Everything on, wrapped at 80 columns.
    pub fn display() -> Self {
        Self {
            line_length: 80,
            include_headings: true,
            include_footnotes: true,
            indent_poetry: true,
            include_verse_numbers: true,
        }
    }

    /// Bare text, used for random proverbs and usage results.
    pub fn plain() -> Self {
        Self {
            line_length: 0,
            include_headings: false,
            include_footnotes: false,
            indent_poetry: false,
            include_verse_numbers: false,
        }
    }

    /// Bare text with verse numbers, the input to interlinear alignment.
    pub fn translation() -> Self {
        Self { include_verse_numbers: true, ..Self::plain() }
    }
}

pub struct EsvClient {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl EsvClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(base_url).with_context(|| format!("invalid API url {base_url}"))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder().user_agent(USER_AGENT).timeout(timeout).build()?;
        Ok(Self { client, base, token })
    }

    pub fn passage_url(&self, query: &str, options: &PassageOptions) -> Result<Url> {
        let mut url = self.base.join("passage/text/")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("line-length", &options.line_length.to_string())
            .append_pair("include-headings", bool_param(options.include_headings))
            .append_pair("include-footnotes", bool_param(options.include_footnotes))
            .append_pair("indent-poetry", bool_param(options.indent_poetry))
            .append_pair("include-verse-numbers", bool_param(options.include_verse_numbers));
        Ok(url)
    }

    pub fn search_url(&self, query: &str, page_size: u32) -> Result<Url> {
        let mut url = self.base.join("passage/search/")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("page-size", &page_size.to_string())
            .append_pair("page", "1");
        Ok(url)
    }

    pub async fn passage(&self, query: &str, options: &PassageOptions) -> Result<Passage> {
        let url = self.passage_url(query, options)?;
        self.get_json(url).await.context("passage lookup failed")
    }

    pub async fn search(&self, query: &str, page_size: u32) -> Result<SearchResults> {
        let url = self.search_url(query, page_size)?;
        self.get_json(url).await.context("passage search failed")
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| anyhow!("ESV_API_TOKEN is not set"))?;
        tracing::debug!(%url, "GET");
        let resp = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, format!("Token {token}"))
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }
}

fn bool_param(flag: bool) -> &'static str {
    if flag {
        "true"
    } else {
        "false"
    }
}

/// Download `url` to `dest`. The body lands in a `.part` file first and is
/// renamed once complete, so an interrupted download never looks finished.
/// The `.part` file is removed when the transfer fails.
pub async fn download_file(url: &str, dest: &Path, timeout: Duration) -> Result<u64> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(5))
        .timeout(timeout)
        .build()?;
    let resp = client.get(url).send().await?.error_for_status()?;

    let partial = dest.with_extension("part");
    let written = match write_body(resp, &partial).await {
        Ok(written) => written,
        Err(e) => {
            if let Err(rm) = tokio::fs::remove_file(&partial).await {
                tracing::warn!(path = %partial.display(), error = %rm, "could not remove partial download");
            }
            return Err(e);
        }
    };
    tokio::fs::rename(&partial, dest).await?;
    tracing::info!(url, dest = %dest.display(), bytes = written, "downloaded");
    Ok(written)
}

async fn write_body(mut resp: reqwest::Response, partial: &Path) -> Result<u64> {
    let mut out = tokio::fs::File::create(partial)
        .await
        .with_context(|| format!("creating {}", partial.display()))?;
    let mut written = 0u64;
    while let Some(chunk) = resp.chunk().await? {
        out.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    out.flush().await?;
    Ok(written)
}
