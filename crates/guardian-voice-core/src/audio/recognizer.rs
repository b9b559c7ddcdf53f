use crate::{
    CoreError, CoreResult, RecognitionEngine, RecognitionEvent, SessionSink,
    audio::{MicCapture, Resampler, Transcriber, WHISPER_SAMPLE_RATE},
};

use std::{
    panic::Location,
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// How often the session thread checks its stop flags while capturing.
const CAPTURE_POLL: Duration = Duration::from_millis(20);

/// Settings for [`WhisperRecognizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct WhisperOptions {
    /// Path to a ggml Whisper model.
    pub model_path: PathBuf,
    /// Spoken language code, e.g. `pt`.
    pub language: String,
    /// Use a compiled-in GPU backend when available.
    pub use_gpu: bool,
    /// Length of audio captured per session.
    pub utterance: Duration,
}

impl WhisperOptions {
    /// Defaults for `model_path`: Portuguese, GPU on, 4 second utterances.
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            language: "pt".to_string(),
            use_gpu: true,
            utterance: Duration::from_secs(4),
        }
    }
}

struct ActiveSession {
    session_id: Uuid,
    /// End capture early but still transcribe.
    stop: Arc<AtomicBool>,
    /// Discard everything.
    cancel: Arc<AtomicBool>,
}

/// Recognition engine that records one fixed-length utterance per session
/// from the default microphone and transcribes it locally with Whisper.
///
/// Each session runs on its own thread. Releasing a session only flags it
/// cancelled; a thread still busy transcribing finishes in the background
/// and its events are discarded by the loop controller.
pub struct WhisperRecognizer {
    transcriber: Arc<Transcriber>,
    utterance: Duration,
    active: Option<ActiveSession>,
}

impl WhisperRecognizer {
    /// Load the model.
    ///
    /// # Errors
    ///
    /// Returns error if the model file does not exist or cannot be loaded.
    #[track_caller]
    #[instrument(skip(options))]
    pub fn new(options: WhisperOptions) -> CoreResult<Self> {
        let transcriber =
            Transcriber::load(&options.model_path, &options.language, options.use_gpu)?;

        info!(
            utterance_ms = options.utterance.as_millis(),
            "WhisperRecognizer initialized"
        );

        Ok(Self {
            transcriber: Arc::new(transcriber),
            utterance: options.utterance,
            active: None,
        })
    }
}

impl RecognitionEngine for WhisperRecognizer {
    #[track_caller]
    fn start(&mut self, sink: SessionSink) -> CoreResult<()> {
        self.release();

        let session_id = sink.session_id();
        let stop = Arc::new(AtomicBool::new(false));
        let cancel = Arc::new(AtomicBool::new(false));

        let session = SessionRun {
            sink,
            transcriber: Arc::clone(&self.transcriber),
            utterance: self.utterance,
            stop: Arc::clone(&stop),
            cancel: Arc::clone(&cancel),
        };

        thread::Builder::new()
            .name("recognition-session".to_string())
            .spawn(move || session.run())
            .map_err(|e| CoreError::SessionUnavailable {
                reason: format!("Failed to spawn session thread: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.active = Some(ActiveSession {
            session_id,
            stop,
            cancel,
        });

        Ok(())
    }

    fn stop(&mut self) {
        if let Some(active) = &self.active {
            active.stop.store(true, Ordering::Release);
        }
    }

    fn release(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel.store(true, Ordering::Release);
            debug!(session_id = %active.session_id, "Session cancelled");
        }
    }
}

impl Drop for WhisperRecognizer {
    fn drop(&mut self) {
        self.release();
    }
}

struct SessionRun {
    sink: SessionSink,
    transcriber: Arc<Transcriber>,
    utterance: Duration,
    stop: Arc<AtomicBool>,
    cancel: Arc<AtomicBool>,
}

impl SessionRun {
    fn run(self) {
        let session_id = self.sink.session_id();

        match self.capture_and_transcribe() {
            Ok(Some(text)) => {
                if !self.cancelled() {
                    self.sink.send(RecognitionEvent::Final(text));
                }
            }
            Ok(None) => {
                if !self.cancelled() {
                    self.sink.send(RecognitionEvent::EndOfSpeech);
                }
            }
            Err(e) => {
                warn!(session_id = %session_id, error = ?e, "Recognition session failed");
                if !self.cancelled() {
                    self.sink.send(RecognitionEvent::Error(e.to_string()));
                }
            }
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    fn capture_and_transcribe(&self) -> CoreResult<Option<String>> {
        let mut capture = MicCapture::open()?;
        capture.begin()?;

        let deadline = Instant::now() + self.utterance;
        while Instant::now() < deadline
            && !self.stop.load(Ordering::Acquire)
            && !self.cancelled()
        {
            thread::sleep(CAPTURE_POLL);
        }

        let samples = capture.finish()?;
        if self.cancelled() || samples.is_empty() {
            return Ok(None);
        }

        let rate = capture.sample_rate();
        let prepared = if rate == WHISPER_SAMPLE_RATE {
            samples
        } else {
            Resampler::to_whisper(rate)?.process(&samples)?
        };

        let text = self.transcriber.transcribe(&prepared)?;
        Ok((!text.trim().is_empty()).then_some(text))
    }
}
