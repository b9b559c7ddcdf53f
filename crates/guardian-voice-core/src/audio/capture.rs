use crate::{CoreError, CoreResult};

use std::{
    panic::Location,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use cpal::{
    Device, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument};

/// Upper bound on buffered mono samples (30 seconds at 48kHz).
/// A session captures a few seconds, so this only guards against a
/// stalled session holding the microphone.
pub(crate) const MAX_UTTERANCE_SAMPLES: usize = 48_000 * 30;

/// Average interleaved frames down to mono, appending to `out` without
/// exceeding `limit` samples.
pub(crate) fn downmix_into(data: &[f32], channels: usize, out: &mut Vec<f32>, limit: usize) {
    let channels = channels.max(1);
    let room = limit.saturating_sub(out.len());

    if channels == 1 {
        out.extend(data.iter().copied().take(room));
        return;
    }

    out.extend(
        data.chunks_exact(channels)
            .take(room)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32),
    );
}

/// Default-microphone capture for a single utterance.
///
/// Created and dropped on the session thread; the cpal stream is not
/// `Send` on every backend.
pub struct MicCapture {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    samples: Arc<Mutex<Vec<f32>>>,
    /// Set before the stream is dropped so a late callback cannot write
    /// after `finish` has taken the buffer.
    closed: Arc<AtomicBool>,
}

impl MicCapture {
    #[track_caller]
    #[instrument]
    pub fn open() -> CoreResult<Self> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or(CoreError::NoMicrophoneFound {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config = device
            .default_input_config()
            .map_err(|e| CoreError::DeviceError {
                reason: format!("Failed to get config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(
            sample_rate = config.sample_rate(),
            channels = config.channels(),
            "Microphone opened"
        );

        Ok(Self {
            device,
            config: config.into(),
            stream: None,
            samples: Arc::new(Mutex::new(Vec::new())),
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    #[track_caller]
    #[instrument(skip(self))]
    pub fn begin(&mut self) -> CoreResult<()> {
        let samples = Arc::clone(&self.samples);
        let closed = Arc::clone(&self.closed);
        let channels = usize::from(self.config.channels);

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if closed.load(Ordering::Acquire) {
                        return;
                    }
                    let mut buf = samples.lock().unwrap_or_else(|e| {
                        error!("Utterance buffer lock poisoned, recovering: {}", e);
                        e.into_inner()
                    });
                    downmix_into(data, channels, &mut buf, MAX_UTTERANCE_SAMPLES);
                },
                |err| {
                    error!("Microphone stream error: {}", err);
                },
                None,
            )
            .map_err(|e| CoreError::DeviceError {
                reason: format!("Failed to build stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        stream.play().map_err(|e| CoreError::DeviceError {
            reason: format!("Failed to start stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.stream = Some(stream);
        info!("Microphone capture started");

        Ok(())
    }

    /// Stop the stream and take the captured mono samples.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn finish(&mut self) -> CoreResult<Vec<f32>> {
        self.closed.store(true, Ordering::Release);

        if let Some(stream) = self.stream.take() {
            drop(stream);
            debug!("Microphone capture stopped");
        }

        let samples = std::mem::take(&mut *self.samples.lock().map_err(|e| {
            CoreError::DeviceError {
                reason: format!("Failed to lock samples: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?);

        debug!(sample_count = samples.len(), "Utterance captured");

        Ok(samples)
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }
}
