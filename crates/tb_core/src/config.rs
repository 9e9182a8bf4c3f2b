use std::time::Duration;

pub const DEFAULT_MAX_RESULTS: usize = 5;
pub const DEFAULT_MAX_CHARS: usize = 3000;
pub const DEFAULT_WORKERS: usize = 5;
pub const DEFAULT_PROMPT_CEILING: usize = 20000;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Process-wide settings, read once at startup and shared read-only afterwards.
#[derive(Clone, Default)]
pub struct Settings {
    pub search: SearchSettings,
    pub inference: InferenceSettings,
    pub limits: Limits,
}

#[derive(Clone, Default)]
pub struct SearchSettings {
    pub api_key: Option<String>,
    pub engine_id: Option<String>,
}

#[derive(Clone)]
pub struct InferenceSettings {
    /// `gemini` or `dummy`
    pub model: String,
    pub api_key: Option<String>,
    pub model_name: String,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            model: "gemini".to_string(),
            api_key: None,
            model_name: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_results: usize,
    pub max_chars: usize,
    pub workers: usize,
    pub prompt_ceiling: usize,
    pub fetch_timeout: Duration,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            max_chars: DEFAULT_MAX_CHARS,
            workers: DEFAULT_WORKERS,
            prompt_ceiling: DEFAULT_PROMPT_CEILING,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

/// Treats unset and blank values the same way.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("search_api_key", &self.search.api_key.as_deref().map(|_| "<redacted>"))
            .field("search_engine_id", &self.search.engine_id)
            .field("model", &self.inference.model)
            .field("model_api_key", &self.inference.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.inference.model_name)
            .field("limits", &self.limits)
            .finish()
    }
}
