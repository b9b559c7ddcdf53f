pub(crate) mod capture;
mod recognizer;
mod resampler;
mod transcriber;

pub(crate) use {
    capture::MicCapture,
    resampler::{Resampler, WHISPER_SAMPLE_RATE},
    transcriber::Transcriber,
};

pub use recognizer::{WhisperOptions, WhisperRecognizer};
