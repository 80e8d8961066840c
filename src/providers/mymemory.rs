use anyhow::Result;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use super::{ProviderError, Translator, check_status, endpoint, http_client, non_empty};
use crate::config::ProviderConfig;

const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net";

/// MyMemory public API (`GET /get?q=..&langpair=src|tgt`).
pub struct MyMemory {
    client: Client,
    endpoint: String,
    email: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_data: Option<ResponseData>,
    /// Sent as a number on success and sometimes as a string on errors.
    response_status: Option<Value>,
    response_details: Option<Value>,
    #[serde(default)]
    quota_finished: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: Option<String>,
}

impl MyMemory {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
            endpoint: endpoint(config, DEFAULT_ENDPOINT),
            email: config.email.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

impl Translator for MyMemory {
    fn name(&self) -> &str {
        "mymemory"
    }

    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, ProviderError> {
        let mut query = vec![("q", text.to_string()), ("langpair", format!("{source}|{target}"))];
        if let Some(email) = &self.email {
            query.push(("de", email.clone()));
        }
        if let Some(key) = &self.api_key {
            query.push(("key", key.clone()));
        }

        let response = self
            .client
            .get(format!("{}/get", self.endpoint))
            .query(&query)
            .send()?;
        let body: MyMemoryResponse = check_status(response)?.json()?;
        parse_response(body)
    }
}

fn parse_response(body: MyMemoryResponse) -> Result<String, ProviderError> {
    let status = body.response_status.as_ref().and_then(status_code);
    if status != Some(200) || body.quota_finished == Some(true) {
        let details = match body.response_details {
            Some(Value::String(s)) if !s.is_empty() => s,
            _ => format!(
                "responseStatus {}",
                status.map_or_else(|| "missing".to_string(), |s| s.to_string())
            ),
        };
        return Err(ProviderError::Rejected(details));
    }

    let text = body
        .response_data
        .and_then(|data| data.translated_text)
        .ok_or_else(|| {
            ProviderError::MalformedResponse("missing responseData.translatedText".to_string())
        })?;
    non_empty(text)
}

fn status_code(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
