use crate::error::ServiceError;
use crate::schema::{GroundingChunk, RawModelResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }

    pub fn instruction(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }

    /// All text parts joined in order.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .concat()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoogleSearch {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub google_search: GoogleSearch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

impl GenerateContentResponse {
    /// Text and citations of the first candidate.
    ///
    /// A candidate without text yields empty text; no candidate at all is an error.
    pub fn into_raw(self) -> Result<RawModelResponse, ServiceError> {
        let candidate = self
            .candidates
            .and_then(|c| c.into_iter().next())
            .ok_or_else(|| ServiceError::InvalidResponse("No candidates returned".to_string()))?;

        Ok(RawModelResponse {
            text: candidate
                .content
                .as_ref()
                .map(Content::text)
                .unwrap_or_default(),
            grounding_chunks: candidate
                .grounding_metadata
                .map(|m| m.grounding_chunks)
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_grounded_response() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "PRICE: 150.25\n"}, {"text": "CHANGE: +1.50%"}]
                },
                "groundingMetadata": {
                    "webSearchQueries": ["AAPL stock price"],
                    "groundingChunks": [
                        {"web": {"uri": "https://news.example/aapl", "title": "example.com"}},
                        {"retrievedContext": {"uri": "gs://bucket/doc"}}
                    ]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let raw = response.into_raw().unwrap();

        assert_eq!(raw.text, "PRICE: 150.25\nCHANGE: +1.50%");
        assert_eq!(raw.grounding_chunks.len(), 2);
        assert_eq!(
            raw.grounding_chunks[0].web.as_ref().unwrap().title.as_deref(),
            Some("example.com")
        );
        assert!(raw.grounding_chunks[1].web.is_none());
    }

    #[test]
    fn test_candidate_without_content_is_empty_text() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        let raw = response.into_raw().unwrap();
        assert_eq!(raw.text, "");
        assert!(raw.grounding_chunks.is_empty());
    }

    #[test]
    fn test_no_candidates_is_an_error() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            response.into_raw(),
            Err(ServiceError::InvalidResponse(_))
        ));
    }
}
