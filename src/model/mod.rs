pub mod analysis;
pub mod config;

pub use analysis::{AnalysisRequest, AnalysisResult, ErrorType, Fix};
pub use config::{Config, CorsConfig, LlmConfig};
