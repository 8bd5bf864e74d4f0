//! Service configuration from environment variables.

use std::path::PathBuf;

/// Runtime configuration, read once at startup.
///
/// Environment variables:
/// - `OPENAI_API_KEY` - completion API key
/// - `PDF_INSIGHT_MODEL` - completion model (default: gpt-3.5-turbo)
/// - `PDF_INSIGHT_BIND` - listen address (default: 0.0.0.0:5000)
/// - `PDF_INSIGHT_LOGO` - branding image path (default: assets/logo.jpeg)
/// - `PDF_INSIGHT_OUTPUT_DIR` - archive output directory (default: temp dir)
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub api_key: String,
    pub model: String,
    pub branding_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("PDF_INSIGHT_BIND")
                .unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            model: std::env::var("PDF_INSIGHT_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            branding_path: std::env::var("PDF_INSIGHT_LOGO")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("assets/logo.jpeg")),
            output_dir: std::env::var("PDF_INSIGHT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
        }
    }
}
