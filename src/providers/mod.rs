//! Translation backends.
//!
//! Every backend implements [`Translator`]. The sync pipeline only ever sees
//! the trait, so tests substitute their own doubles.

mod copy;
mod deepl;
mod libre;
mod mymemory;

use std::{fmt, time::Duration};

use anyhow::{Context, Result};
use clap::ValueEnum;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ProviderConfig;

pub use copy::CopyTranslator;
pub use deepl::DeepL;
pub use libre::LibreTranslate;
pub use mymemory::MyMemory;

/// Longest response body kept in a [`ProviderError::Status`].
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("source text is empty")]
    EmptySource,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("rejected by provider: {0}")]
    Rejected(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("provider '{0}' requires an API key")]
    MissingApiKey(ProviderKind),
}

/// Capability interface for a translation backend.
pub trait Translator {
    fn name(&self) -> &str;

    /// Translate `text` from the `source` locale into the `target` locale.
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, ProviderError>;
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    #[value(name = "mymemory")]
    MyMemory,
    Libre,
    #[value(name = "deepl")]
    DeepL,
    /// Offline: copies the reference text unchanged.
    Copy,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::MyMemory => "mymemory",
            ProviderKind::Libre => "libre",
            ProviderKind::DeepL => "deepl",
            ProviderKind::Copy => "copy",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the backend selected in `config`.
pub fn build_translator(config: &ProviderConfig) -> Result<Box<dyn Translator>> {
    let translator: Box<dyn Translator> = match config.name {
        ProviderKind::MyMemory => Box::new(MyMemory::new(config)?),
        ProviderKind::Libre => Box::new(LibreTranslate::new(config)?),
        ProviderKind::DeepL => Box::new(DeepL::new(config)?),
        ProviderKind::Copy => Box::new(CopyTranslator),
    };
    Ok(translator)
}

pub(crate) fn http_client(config: &ProviderConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .user_agent(concat!("locsync/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

pub(crate) fn endpoint(config: &ProviderConfig, default: &str) -> String {
    config
        .endpoint
        .as_deref()
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_string()
}

/// Turn a non-success response into [`ProviderError::Status`].
pub(crate) fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let mut body = response.text().unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    Err(ProviderError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Backends must never hand back an empty translation.
pub(crate) fn non_empty(text: String) -> Result<String, ProviderError> {
    if text.trim().is_empty() {
        Err(ProviderError::MalformedResponse(
            "empty translated text".to_string(),
        ))
    } else {
        Ok(text)
    }
}
