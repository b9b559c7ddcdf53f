use crate::{CoreError, CoreResult};

use std::panic::Location;

use audioadapter_buffers::direct::InterleavedSlice;
use error_location::ErrorLocation;
use rubato::{Fft, FixedSync, Resampler as RubatoResampler};
use tracing::{debug, instrument};

/// Sample rate Whisper expects.
pub(crate) const WHISPER_SAMPLE_RATE: u32 = 16_000;

const CHUNK_FRAMES: usize = 1024;
const SUB_CHUNKS: usize = 2;

/// Mono FFT resampler from the microphone rate to [`WHISPER_SAMPLE_RATE`].
pub struct Resampler {
    inner: Fft<f32>,
    input_rate: u32,
    scratch_in: Vec<f32>,
    scratch_out: Vec<f32>,
}

impl Resampler {
    #[track_caller]
    #[instrument]
    pub fn to_whisper(input_rate: u32) -> CoreResult<Self> {
        let inner = Fft::<f32>::new(
            input_rate as usize,
            WHISPER_SAMPLE_RATE as usize,
            CHUNK_FRAMES,
            SUB_CHUNKS,
            1,
            FixedSync::Input,
        )
        .map_err(|e| CoreError::ResamplingError {
            reason: format!("Failed to create resampler: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let scratch_out = vec![0.0f32; inner.output_frames_max()];

        Ok(Self {
            inner,
            input_rate,
            scratch_in: Vec::with_capacity(CHUNK_FRAMES),
            scratch_out,
        })
    }

    /// Resample a whole utterance. The tail chunk is zero-padded and the
    /// output trimmed to the exact rate ratio.
    #[track_caller]
    #[instrument(skip(self, samples))]
    pub fn process(&mut self, samples: &[f32]) -> CoreResult<Vec<f32>> {
        if samples.is_empty() {
            return Ok(Vec::new());
        }

        let expected = (samples.len() as u64 * u64::from(WHISPER_SAMPLE_RATE)
            / u64::from(self.input_rate)) as usize;
        let mut output = Vec::with_capacity(expected + self.scratch_out.len());

        for chunk in samples.chunks(CHUNK_FRAMES) {
            self.scratch_in.clear();
            self.scratch_in.extend_from_slice(chunk);
            self.scratch_in.resize(CHUNK_FRAMES, 0.0);

            let input = InterleavedSlice::new(&self.scratch_in, 1, CHUNK_FRAMES).map_err(|e| {
                CoreError::ResamplingError {
                    reason: format!("Failed to wrap input chunk: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

            let out_frames = self.scratch_out.len();
            let mut out = InterleavedSlice::new_mut(&mut self.scratch_out, 1, out_frames)
                .map_err(|e| CoreError::ResamplingError {
                    reason: format!("Failed to wrap output chunk: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            let (_, written) = self
                .inner
                .process_into_buffer(&input, &mut out, None)
                .map_err(|e| CoreError::ResamplingError {
                    reason: format!("Resampling failed: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            output.extend_from_slice(&self.scratch_out[..written]);
        }

        output.truncate(expected);

        debug!(
            input_len = samples.len(),
            output_len = output.len(),
            input_rate = self.input_rate,
            "Utterance resampled"
        );

        Ok(output)
    }
}
