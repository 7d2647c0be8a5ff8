//! # Market Insight
//!
//! Turns the free-text answer of a search-grounded language model into a structured
//! stock snapshot, with a synthetic intraday series for charting.
//!
//! ## Pipeline
//!
//! - **Request**: a fixed system instruction asks the model to answer in four labeled
//!   fields (`PRICE:`, `CHANGE:`, `ANALYSIS:`, `DETAILS:`) with web search enabled.
//! - **Field extraction**: each label is parsed on its own and falls back to a default
//!   when missing.
//! - **Sources**: grounding citations without a usable URL are dropped.
//! - **Series**: a 30-point random walk across a 9:30 to 16:00 session that drifts from the
//!   implied open to the reported price and ends on it exactly.
//!
//! Only a failed model call is an error ([`MarketInsightError::AnalysisFetch`]). Every
//! successful call produces a complete [`StockAnalysis`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use market_insight::{GeminiClient, StockAnalyst};
//!
//! let analyst = StockAnalyst::new(GeminiClient::from_env()?);
//! let analysis = analyst.analyze("aapl").await?;
//!
//! println!("{} {} ({})", analysis.ticker(), analysis.display_price(), analysis.change_text());
//! for point in analysis.series() {
//!     println!("{} {:.2}", point.time_label, point.value);
//! }
//! ```

pub mod analyst;
pub mod error;
pub mod generation;
pub mod parser;
pub mod prompts;
pub mod schema;
pub mod series;
pub mod sources;

#[cfg(feature = "gemini")]
pub mod llm;

pub use analyst::{compose_markdown, AnalystConfig, SearchModel, StockAnalyst};
pub use error::{MarketInsightError, Result, ServiceError};
pub use generation::{RequestTicket, RequestTracker};
pub use parser::{
    extract_fields, parse_change, parse_price, FieldExtractor, LabeledFieldExtractor,
};
pub use schema::*;
pub use series::{generate_series, generate_series_with_rng, session_open, time_label};
pub use sources::filter_sources;

#[cfg(feature = "gemini")]
pub use llm::GeminiClient;
