//! Language-model backend implementations.

#[cfg(feature = "ollama")]
pub mod ollama;

use crate::Result;

/// Trait for text-completion backends.
///
/// Calls block the current thread until the full response is available.
/// The extraction pipeline is strictly sequential, so there is no streaming
/// or async variant.
pub trait LanguageModel: Send + Sync {
    /// Complete a single prompt and return the raw response text.
    ///
    /// The text is returned as produced; it is not guaranteed to contain
    /// well-formed structured data.
    fn complete(&self, prompt: &str) -> Result<String>;

    /// Model identifier, for logging.
    fn name(&self) -> &str;
}

impl<T: LanguageModel + ?Sized> LanguageModel for &T {
    fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: LanguageModel + ?Sized> LanguageModel for Box<T> {
    fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

/// Remove `<think>...</think>` sections emitted by reasoning models.
///
/// An unterminated block swallows the rest of the text, since nothing after
/// it is part of the final answer.
pub fn strip_reasoning(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(THINK_OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + THINK_OPEN.len()..];
        match after_open.find(THINK_CLOSE) {
            Some(end) => rest = &after_open[end + THINK_CLOSE.len()..],
            None => {
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);

    out.trim().to_string()
}
