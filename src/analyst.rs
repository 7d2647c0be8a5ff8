use crate::error::{MarketInsightError, Result, ServiceError};
use crate::parser::{FieldExtractor, LabeledFieldExtractor};
use crate::prompts::{ticker_prompt, DEFAULT_TEMPERATURE, SYSTEM_INSTRUCTION};
use crate::schema::{AnalysisRequest, ModelRequest, RawModelResponse, StockAnalysis};
use crate::series::generate_series_with_rng;
use crate::sources::filter_sources;
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use rand::{thread_rng, Rng};
use std::sync::Arc;

/// The search-grounded text generation service.
#[async_trait]
pub trait SearchModel: Send + Sync {
    async fn generate(
        &self,
        request: &ModelRequest,
    ) -> std::result::Result<RawModelResponse, ServiceError>;
}

#[async_trait]
impl<T: SearchModel + ?Sized> SearchModel for Box<T> {
    async fn generate(
        &self,
        request: &ModelRequest,
    ) -> std::result::Result<RawModelResponse, ServiceError> {
        (**self).generate(request).await
    }
}

#[async_trait]
impl<T: SearchModel + ?Sized> SearchModel for Arc<T> {
    async fn generate(
        &self,
        request: &ModelRequest,
    ) -> std::result::Result<RawModelResponse, ServiceError> {
        (**self).generate(request).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalystConfig {
    pub system_instruction: String,
    pub temperature: f32,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl AnalystConfig {
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Runs one ticker through the model and turns the answer into a [`StockAnalysis`].
///
/// Holds no per-request state, so a single instance can serve overlapping calls. Deciding
/// which of several in-flight results to keep is up to the caller (see
/// [`crate::RequestTracker`]).
pub struct StockAnalyst<M> {
    model: M,
    extractor: Box<dyn FieldExtractor>,
    config: AnalystConfig,
}

impl<M: SearchModel> StockAnalyst<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            extractor: Box::new(LabeledFieldExtractor),
            config: AnalystConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AnalystConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the text layout parser, e.g. once the model can return structured output.
    pub fn with_extractor(mut self, extractor: impl FieldExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn config(&self) -> &AnalystConfig {
        &self.config
    }

    pub fn build_request(&self, request: &AnalysisRequest) -> ModelRequest {
        ModelRequest {
            system_instruction: self.config.system_instruction.clone(),
            prompt: ticker_prompt(request.ticker()),
            temperature: self.config.temperature,
            search_grounding: true,
        }
    }

    /// Fetch and analyze `ticker`.
    ///
    /// Only a failed model call is an error, and it is never retried. Anything missing
    /// from a successful answer falls back to a default value.
    pub async fn analyze(&self, ticker: &str) -> Result<StockAnalysis> {
        let request = AnalysisRequest::new(ticker)?;
        let response = self.fetch(&request).await?;
        Ok(self.assemble(&request, response, &mut thread_rng()))
    }

    /// Same as [`StockAnalyst::analyze`] with a caller-supplied noise source for the series.
    pub async fn analyze_with_rng<R: Rng + Send + ?Sized>(
        &self,
        ticker: &str,
        rng: &mut R,
    ) -> Result<StockAnalysis> {
        let request = AnalysisRequest::new(ticker)?;
        let response = self.fetch(&request).await?;
        Ok(self.assemble(&request, response, rng))
    }

    async fn fetch(&self, request: &AnalysisRequest) -> Result<RawModelResponse> {
        info!("Requesting market analysis for {}", request.display_ticker());
        let model_request = self.build_request(request);

        self.model
            .generate(&model_request)
            .await
            .map_err(MarketInsightError::AnalysisFetch)
    }

    fn assemble<R: Rng + ?Sized>(
        &self,
        request: &AnalysisRequest,
        response: RawModelResponse,
        rng: &mut R,
    ) -> StockAnalysis {
        let fields = self.extractor.extract(&response.text);
        let sources = filter_sources(&response.grounding_chunks);

        let price = fields.price_value();
        let change = fields.change_value();
        let change_percent = if change.is_nan() { 0.0 } else { change };
        if price.is_nan() {
            debug!(
                "No numeric price in '{}', charting a placeholder series",
                fields.price_text
            );
        }

        let series = generate_series_with_rng(price, change_percent, rng);
        let analysis_markdown = compose_markdown(&fields.summary_text, &fields.details_text);

        info!(
            "Analysis for {} ready: price {}, change {}, {} sources",
            request.display_ticker(),
            fields.price_text,
            fields.change_text,
            sources.len()
        );

        StockAnalysis::new(
            request.display_ticker(),
            fields.price_text,
            fields.change_text,
            change_percent,
            analysis_markdown,
            sources,
            Utc::now(),
            series,
        )
    }
}

/// Both sections are always present so the rendered layout does not shift.
pub fn compose_markdown(summary: &str, details: &str) -> String {
    format!(
        "### Market Summary\n{}\n\n### Detailed Insights\n{}",
        summary, details
    )
}
