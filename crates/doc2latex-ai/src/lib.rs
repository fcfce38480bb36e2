//! Service-backed stages of the pipeline: classification, the enhancement
//! decision, enhancement itself and improvement suggestions, plus the
//! [`Converter`] that drives a whole conversion.
//!
//! The text-understanding service is reached only through the
//! [`Inference`] trait. The OpenAI-compatible HTTP implementation lives
//! behind the `http` feature.

pub mod classifier;
pub mod enhancer;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod inference;
pub mod pipeline;
pub mod policy;
mod prompts;
pub mod suggestions;

pub use classifier::Classifier;
pub use enhancer::Enhancer;
pub use error::{ConvertError, InferenceError};
#[cfg(feature = "http")]
pub use http::OpenAiClient;
pub use inference::{GenerateRequest, GenerateResponse, Inference};
pub use pipeline::{ConversionOutput, Converter, convert_offline};
pub use policy::{ComplexityIndicator, needs_enhancement};
pub use suggestions::SuggestionGenerator;
