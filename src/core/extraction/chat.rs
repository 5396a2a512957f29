//! OpenAI-compatible chat-completions extractor

use super::extractor::Extractor;
use super::prompt::{ABOUT_PROMPT, MIN_TEXT_LENGTH, few_shot_examples};
use crate::config::ExtractionConfig;
use crate::core::models::CompanyInfo;
use crate::utils::error::{ExtractError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Extractor backed by an OpenAI-compatible `/chat/completions` endpoint
#[derive(Debug, Clone)]
pub struct ChatExtractor {
    http_client: Client,
    url: String,
    api_key: Option<String>,
    model: String,
    messages: Vec<Value>,
}

impl ChatExtractor {
    /// Create a new extractor
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ExtractError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            url: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            messages: Self::preamble()?,
        })
    }

    /// Model name sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// System prompt followed by the few-shot exchanges
    fn preamble() -> Result<Vec<Value>> {
        let mut messages = vec![json!({ "role": "system", "content": ABOUT_PROMPT })];
        for example in few_shot_examples() {
            messages.push(json!({ "role": "user", "content": example.text }));
            messages.push(json!({
                "role": "assistant",
                "content": serde_json::to_string(&example.record)?,
            }));
        }
        Ok(messages)
    }

    fn request_body(&self, text: &str) -> Value {
        let mut messages = self.messages.clone();
        messages.push(json!({ "role": "user", "content": text }));
        json!({
            "model": self.model,
            "messages": messages,
            "temperature": 0,
            "response_format": { "type": "json_object" },
        })
    }
}

#[async_trait]
impl Extractor for ChatExtractor {
    async fn extract(&self, text: &str) -> Result<Option<CompanyInfo>> {
        if text.trim().chars().count() < MIN_TEXT_LENGTH {
            warn!("Text too short for extraction");
            return Ok(None);
        }

        debug!("Extraction request: model={}", self.model);

        let mut request = self.http_client.post(&self.url).json(&self.request_body(text));
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::from_status(status, &body));
        }

        // Body read failures keep their transport classification
        let body = response.bytes().await?;
        let completion: ChatCompletionResponse = serde_json::from_slice(&body)
            .map_err(|e| ExtractError::NoResult(format!("Invalid completion response: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        let record = parse_record(&content);
        match &record {
            Some(info) => debug!(
                "Extracted: {}",
                if info.company_name.is_empty() {
                    &info.owner_name
                } else {
                    &info.company_name
                }
            ),
            None => warn!("No extractions found"),
        }
        Ok(record)
    }
}

/// Parse the model's answer into a record; `None` when nothing usable came back
pub(super) fn parse_record(content: &str) -> Option<CompanyInfo> {
    let value: Value = serde_json::from_str(strip_code_fence(content)).ok()?;
    let attributes = find_attributes(&value)?;

    let field = |name: &str| -> String {
        match attributes.get(name) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    };

    let info = CompanyInfo {
        owner_name: field("owner_name"),
        position: field("position"),
        company_name: field("company_name"),
        email: field("email"),
        phone: field("phone"),
        fax: field("fax"),
        website: field("website"),
        profession: field("profession"),
        sector: field("sector"),
    };

    (!info.is_empty()).then_some(info)
}

/// Accepts a flat object, `{"company_info": {..}}` or an extraction list
fn find_attributes(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Object(map) => {
            if let Some(nested) = map.get("company_info") {
                return find_attributes(nested);
            }
            if let Some(Value::Array(items)) = map.get("extractions") {
                return items.iter().find_map(find_attributes);
            }
            if let Some(attributes @ Value::Object(_)) = map.get("attributes") {
                return find_attributes(attributes);
            }
            Some(map)
        }
        Value::Array(items) => items.iter().find_map(find_attributes),
        _ => None,
    }
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
