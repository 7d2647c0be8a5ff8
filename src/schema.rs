use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{MarketInsightError, Result};

/// A single user request to analyze one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    ticker: String,
}

impl AnalysisRequest {
    pub fn new(ticker: impl Into<String>) -> Result<Self> {
        let ticker = ticker.into();
        if ticker.trim().is_empty() {
            return Err(MarketInsightError::InvalidTicker);
        }
        Ok(Self { ticker })
    }

    /// The ticker exactly as the user typed it. This is what goes into the prompt.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// The ticker as shown to the user.
    pub fn display_ticker(&self) -> String {
        self.ticker.to_uppercase()
    }
}

/// Outbound request handed to a [`crate::SearchModel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub temperature: f32,
    /// Whether the model may ground its answer with web search.
    pub search_grounding: bool,
}

/// Citation record as delivered by the service (`groundingChunks[].web`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebChunk {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebChunk>,
}

impl GroundingChunk {
    pub fn web(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            web: Some(WebChunk {
                title: Some(title.into()),
                uri: Some(uri.into()),
            }),
        }
    }
}

/// Free text plus citation metadata, exactly as the service returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawModelResponse {
    pub text: String,
    pub grounding_chunks: Vec<GroundingChunk>,
}

impl RawModelResponse {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            grounding_chunks: Vec::new(),
        }
    }
}

/// Fields pulled out of the labeled response text. Every field has a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFields {
    /// Price as written by the model, or `"N/A"`
    pub price_text: String,
    /// Signed percentage, defaults to `"0.00%"`
    pub change_text: String,
    pub summary_text: String,
    pub details_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    /// Absolute URL. Never the `"#"` placeholder.
    pub url: String,
}

impl Source {
    /// Host name of the cited page, e.g. `www.reuters.com`.
    pub fn hostname(&self) -> Option<String> {
        Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// `H:MM` within the simulated session
    pub time_label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
}

impl Trend {
    pub fn observation(&self) -> &'static str {
        match self {
            Trend::Bullish => "Bullish momentum detected in recent news coverage.",
            Trend::Bearish => "Bearish pressure observed in latest reports.",
        }
    }
}

/// The finished snapshot for one ticker.
///
/// Only [`crate::StockAnalyst`] builds these; consumers read them through the accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAnalysis {
    ticker: String,
    price_text: String,
    change_text: String,
    change_percent: f64,
    analysis_markdown: String,
    sources: Vec<Source>,
    retrieved_at: DateTime<Utc>,
    series: Vec<SeriesPoint>,
}

impl StockAnalysis {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        ticker: String,
        price_text: String,
        change_text: String,
        change_percent: f64,
        analysis_markdown: String,
        sources: Vec<Source>,
        retrieved_at: DateTime<Utc>,
        series: Vec<SeriesPoint>,
    ) -> Self {
        Self {
            ticker,
            price_text,
            change_text,
            change_percent,
            analysis_markdown,
            sources,
            retrieved_at,
            series,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn price_text(&self) -> &str {
        &self.price_text
    }

    pub fn change_text(&self) -> &str {
        &self.change_text
    }

    /// Numeric change; `0.0` when the model's value could not be parsed.
    pub fn change_percent(&self) -> f64 {
        self.change_percent
    }

    pub fn analysis_markdown(&self) -> &str {
        &self.analysis_markdown
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn retrieved_at(&self) -> DateTime<Utc> {
        self.retrieved_at
    }

    pub fn series(&self) -> &[SeriesPoint] {
        &self.series
    }

    pub fn trend(&self) -> Trend {
        if self.change_percent >= 0.0 {
            Trend::Bullish
        } else {
            Trend::Bearish
        }
    }

    pub fn display_price(&self) -> String {
        if self.price_text == "N/A" {
            self.price_text.clone()
        } else {
            format!("${}", self.price_text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(change_percent: f64, price_text: &str) -> StockAnalysis {
        StockAnalysis::new(
            "AAPL".to_string(),
            price_text.to_string(),
            "+0.00%".to_string(),
            change_percent,
            String::new(),
            vec![],
            Utc::now(),
            vec![],
        )
    }

    #[test]
    fn test_snapshot_cannot_be_deserialized() {
        // Resolves only when exactly one impl applies, i.e. StockAnalysis is not DeserializeOwned.
        trait AmbiguousIfDeserialize<A> {
            fn check() {}
        }
        impl<T: ?Sized> AmbiguousIfDeserialize<()> for T {}
        impl<T: ?Sized + serde::de::DeserializeOwned> AmbiguousIfDeserialize<u8> for T {}

        <StockAnalysis as AmbiguousIfDeserialize<_>>::check();

        let json = serde_json::to_value(sample(1.5, "150.25")).unwrap();
        assert_eq!(json["priceText"], "150.25");
    }

    #[test]
    fn test_request_rejects_blank_ticker() {
        assert!(matches!(
            AnalysisRequest::new("   "),
            Err(MarketInsightError::InvalidTicker)
        ));
    }

    #[test]
    fn test_request_keeps_original_case() {
        let request = AnalysisRequest::new("brk.b").unwrap();
        assert_eq!(request.ticker(), "brk.b");
        assert_eq!(request.display_ticker(), "BRK.B");
    }

    #[test]
    fn test_source_hostname() {
        let source = Source {
            title: "Reuters".to_string(),
            url: "https://www.reuters.com/markets/us/".to_string(),
        };
        assert_eq!(source.hostname().as_deref(), Some("www.reuters.com"));

        let broken = Source {
            title: "Broken".to_string(),
            url: "not a url".to_string(),
        };
        assert_eq!(broken.hostname(), None);
    }

    #[test]
    fn test_trend_treats_flat_as_bullish() {
        assert_eq!(sample(0.0, "1").trend(), Trend::Bullish);
        assert_eq!(sample(-0.01, "1").trend(), Trend::Bearish);
    }

    #[test]
    fn test_display_price() {
        assert_eq!(sample(0.0, "150.25").display_price(), "$150.25");
        assert_eq!(sample(0.0, "N/A").display_price(), "N/A");
    }

    #[test]
    fn test_grounding_chunk_deserializes_partial_records() {
        let chunks: Vec<GroundingChunk> =
            serde_json::from_str(r#"[{"web":{"title":"A"}},{}]"#).unwrap();
        assert_eq!(chunks[0].web.as_ref().unwrap().uri, None);
        assert!(chunks[1].web.is_none());
    }
}
