use crate::{CoreError, CoreResult};

use std::{panic::Location, path::Path};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Loaded Whisper model configured for one spoken language.
pub struct Transcriber {
    ctx: WhisperContext,
    language: String,
}

impl Transcriber {
    #[track_caller]
    #[instrument(skip(model_path))]
    pub fn load<P: AsRef<Path>>(model_path: P, language: &str, use_gpu: bool) -> CoreResult<Self> {
        let path = model_path.as_ref();

        if !path.exists() {
            return Err(CoreError::ModelNotFound {
                path: path.to_path_buf(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let path_str = path.to_str().ok_or(CoreError::ModelNotFound {
            path: path.to_path_buf(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let mut ctx_params = WhisperContextParameters::default();
        ctx_params.use_gpu(use_gpu);

        let ctx = WhisperContext::new_with_params(path_str, ctx_params).map_err(|e| {
            CoreError::TranscriptionFailed {
                source: Box::new(e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        info!(model_path = ?path, language, use_gpu, "Whisper model loaded");

        Ok(Self {
            ctx,
            language: language.to_string(),
        })
    }

    /// Transcribe 16kHz mono samples into a single line of text.
    #[track_caller]
    #[instrument(skip(self, samples))]
    pub fn transcribe(&self, samples: &[f32]) -> CoreResult<String> {
        if samples.is_empty() {
            return Err(CoreError::NoAudioCaptured {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(self.language.as_str()));
        params.set_print_progress(false);
        params.set_print_special(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_suppress_blank(true);
        params.set_suppress_nst(true);
        params.set_single_segment(true);

        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| CoreError::TranscriptionFailed {
                source: Box::new(e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        state
            .full(params, samples)
            .map_err(|e| CoreError::TranscriptionFailed {
                source: Box::new(e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let num_segments = state.full_n_segments();
        let mut pieces = Vec::new();

        for i in 0..num_segments {
            let segment = state
                .get_segment(i)
                .ok_or_else(|| CoreError::TranscriptionFailed {
                    source: format!("Failed to get segment {}", i).into(),
                    location: ErrorLocation::from(Location::caller()),
                })?;
            pieces.push(segment.to_string());
        }

        let text = pieces.join(" ").trim().to_string();

        debug!(
            sample_count = samples.len(),
            segment_count = num_segments,
            text_len = text.len(),
            "Utterance transcribed"
        );

        Ok(text)
    }
}
