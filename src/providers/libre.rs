use anyhow::Result;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::{ProviderError, Translator, endpoint, http_client, non_empty};
use crate::config::ProviderConfig;

const DEFAULT_ENDPOINT: &str = "https://libretranslate.com";

/// LibreTranslate server (`POST /translate`), self-hosted or public.
pub struct LibreTranslate {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibreResponse {
    translated_text: Option<String>,
    error: Option<String>,
}

impl LibreTranslate {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
            endpoint: endpoint(config, DEFAULT_ENDPOINT),
            api_key: config.api_key.clone(),
        })
    }
}

impl Translator for LibreTranslate {
    fn name(&self) -> &str {
        "libre"
    }

    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, ProviderError> {
        let request = LibreRequest {
            q: text,
            source,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };
        let response = self
            .client
            .post(format!("{}/translate", self.endpoint))
            .json(&request)
            .send()?;

        // LibreTranslate reports errors as `{"error": ".."}` with a 4xx status.
        let status = response.status();
        let body: LibreResponse = response.json().map_err(|e| {
            if status.is_success() {
                ProviderError::Http(e)
            } else {
                ProviderError::Status {
                    status: status.as_u16(),
                    body: String::new(),
                }
            }
        })?;
        parse_response(body)
    }
}

fn parse_response(body: LibreResponse) -> Result<String, ProviderError> {
    if let Some(error) = body.error {
        return Err(ProviderError::Rejected(error));
    }
    let text = body.translated_text.ok_or_else(|| {
        ProviderError::MalformedResponse("missing translatedText".to_string())
    })?;
    non_empty(text)
}
