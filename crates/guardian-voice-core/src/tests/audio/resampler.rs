use crate::audio::{Resampler, WHISPER_SAMPLE_RATE};

const INPUT_SAMPLE_RATE: u32 = 48_000;
const ONE_SECOND_INPUT_SAMPLES: usize = INPUT_SAMPLE_RATE as usize;
const ONE_SECOND_OUTPUT_SAMPLES: usize = WHISPER_SAMPLE_RATE as usize;
const LENGTH_TOLERANCE: u64 = 100;
const TEST_SIGNAL_AMPLITUDE: f32 = 0.5;
const TONE_INPUT_SAMPLES: usize = 4800;
const TONE_OUTPUT_SAMPLES: usize = 1600;
const MAX_AMPLITUDE: f32 = 1.5;

/// WHAT: One second of 48kHz audio becomes about one second at 16kHz
/// WHY: Whisper only accepts 16kHz input
#[test]
#[allow(clippy::unwrap_used)]
fn given_48khz_utterance_when_resampling_then_output_length_approximately_correct() {
    // Given
    let mut resampler = Resampler::to_whisper(INPUT_SAMPLE_RATE).unwrap();
    let input = vec![TEST_SIGNAL_AMPLITUDE; ONE_SECOND_INPUT_SAMPLES];

    // When
    let output = resampler.process(&input).unwrap();

    // Then
    assert!(
        (output.len() as i64 - ONE_SECOND_OUTPUT_SAMPLES as i64).unsigned_abs() < LENGTH_TOLERANCE,
        "Expected ~{} samples, got {}",
        ONE_SECOND_OUTPUT_SAMPLES,
        output.len()
    );
    assert!(output.iter().all(|&s| s.is_finite()));
}

/// WHAT: Output never exceeds the exact rate ratio
/// WHY: Zero-padding of the last chunk must be trimmed off
#[test]
#[allow(clippy::unwrap_used)]
fn given_odd_length_utterance_when_resampling_then_trimmed_to_ratio() {
    // Given: Length that is not a multiple of the chunk size
    let mut resampler = Resampler::to_whisper(INPUT_SAMPLE_RATE).unwrap();
    let input: Vec<f32> = (0..TONE_INPUT_SAMPLES)
        .map(|i| (i as f32 * 0.1).sin() * TEST_SIGNAL_AMPLITUDE)
        .collect();

    // When
    let output = resampler.process(&input).unwrap();

    // Then
    assert!(output.len() <= TONE_OUTPUT_SAMPLES);
    assert!(output.iter().all(|s| s.abs() < MAX_AMPLITUDE));
}

/// WHAT: Empty input returns empty output
/// WHY: A session that heard nothing must not fail
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_samples_when_resampling_then_empty_output() {
    let mut resampler = Resampler::to_whisper(44_100).unwrap();

    let output = resampler.process(&[]).unwrap();

    assert!(output.is_empty());
}

/// WHAT: A resampler can be reused across utterances
/// WHY: Scratch buffers are cleared between chunks
#[test]
#[allow(clippy::unwrap_used)]
fn given_used_resampler_when_processing_again_then_same_length() {
    let mut resampler = Resampler::to_whisper(INPUT_SAMPLE_RATE).unwrap();
    let input = vec![TEST_SIGNAL_AMPLITUDE; ONE_SECOND_INPUT_SAMPLES];

    let first = resampler.process(&input).unwrap().len();
    let second = resampler.process(&input).unwrap().len();

    assert_eq!(first, second);
}
