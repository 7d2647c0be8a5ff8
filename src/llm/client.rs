use crate::analyst::SearchModel;
use crate::error::ServiceError;
use crate::llm::types::*;
use crate::schema::{ModelRequest, RawModelResponse};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: GEMINI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Reads the API key from `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self, ServiceError> {
        match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(ServiceError::MissingApiKey),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

pub(crate) fn build_payload(request: &ModelRequest) -> GenerateContentRequest {
    let tools = if request.search_grounding {
        vec![Tool::default()]
    } else {
        Vec::new()
    };

    GenerateContentRequest {
        contents: vec![Content::user(request.prompt.clone())],
        system_instruction: Some(Content::instruction(request.system_instruction.clone())),
        tools,
        generation_config: GenerationConfig {
            temperature: request.temperature,
        },
    }
}

#[async_trait]
impl SearchModel for GeminiClient {
    async fn generate(&self, request: &ModelRequest) -> Result<RawModelResponse, ServiceError> {
        let url = self.endpoint();
        debug!("POST {} (grounding: {})", url, request.search_grounding);

        let payload = build_payload(request);
        let res = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;
        let status = res.status();

        if !status.is_success() {
            let body = res.text().await?;
            return Err(ServiceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = res.text().await?;
        let body: GenerateContentResponse = serde_json::from_str(&text)?;
        body.into_raw()
    }
}
