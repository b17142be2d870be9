//! Sampling options sent along with a completion request.

use serde::{Deserialize, Serialize};

/// Generation parameters shared by all backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Sampling temperature (0 for deterministic output).
    pub temperature: f32,

    /// Upper bound on generated tokens (`None` = backend default).
    #[serde(skip_serializing_if = "Option::is_none", rename = "num_predict")]
    pub max_tokens: Option<u32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: None,
        }
    }
}

impl GenerationOptions {
    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Cap the number of generated tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}
