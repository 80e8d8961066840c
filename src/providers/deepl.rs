use anyhow::Result;
use reqwest::blocking::Client;
use serde::Deserialize;

use super::{
    ProviderError, ProviderKind, Translator, check_status, endpoint, http_client, non_empty,
};
use crate::config::ProviderConfig;

const DEFAULT_ENDPOINT: &str = "https://api-free.deepl.com";

/// DeepL API v2. Paid accounts set `endpoint` to `https://api.deepl.com`.
pub struct DeepL {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct DeepLResponse {
    #[serde(default)]
    translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    text: String,
}

impl DeepL {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let Some(api_key) = config.api_key.clone() else {
            return Err(ProviderError::MissingApiKey(ProviderKind::DeepL).into());
        };
        Ok(Self {
            client: http_client(config)?,
            endpoint: endpoint(config, DEFAULT_ENDPOINT),
            api_key,
        })
    }
}

impl Translator for DeepL {
    fn name(&self) -> &str {
        "deepl"
    }

    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, ProviderError> {
        let source_lang = language_code(source);
        let target_lang = language_code(target);
        let response = self
            .client
            .post(format!("{}/v2/translate", self.endpoint))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&[
                ("text", text),
                ("source_lang", source_lang.as_str()),
                ("target_lang", target_lang.as_str()),
            ])
            .send()?;
        let body: DeepLResponse = check_status(response)?.json()?;
        parse_response(body)
    }
}

/// DeepL expects upper-case codes with a hyphen (`pt_BR` -> `PT-BR`).
fn language_code(locale: &str) -> String {
    locale.replace('_', "-").to_uppercase()
}

fn parse_response(body: DeepLResponse) -> Result<String, ProviderError> {
    let text = body
        .translations
        .into_iter()
        .next()
        .map(|t| t.text)
        .ok_or_else(|| ProviderError::MalformedResponse("no translations returned".to_string()))?;
    non_empty(text)
}
