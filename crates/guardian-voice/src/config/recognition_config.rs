use crate::config::{
    default_language, default_model_path, default_use_gpu, default_utterance_secs,
};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Whisper recognizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// Path to the ggml Whisper model. Relative paths are resolved against
    /// the data directory.
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Spoken language code.
    #[serde(default = "default_language")]
    pub language: String,

    /// Seconds of audio captured per session.
    #[serde(default = "default_utterance_secs")]
    pub utterance_secs: u64,

    /// Use GPU for inference if a GPU backend was compiled in (Metal/Vulkan).
    #[serde(default = "default_use_gpu")]
    pub use_gpu: bool,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            language: default_language(),
            utterance_secs: default_utterance_secs(),
            use_gpu: default_use_gpu(),
        }
    }
}
