//! PCM normalization for Whisper: downmix to mono, then resample to 16 kHz.
//!
//! Both steps work on whole buffers. We decode the entire file before transcribing, so there
//! is no chunked emission here.

use anyhow::{Context, Result, anyhow, bail};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

/// Whisper's expected mono sample rate (Hz).
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Source frames fed to rubato per `process()` call.
const RESAMPLER_CHUNK_FRAMES: usize = 2048;

/// Downmix interleaved samples into mono by averaging channels.
///
/// A trailing partial frame (fewer than `channels` samples) is dropped.
pub fn downmix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Resample a mono buffer from `src_rate` to [`TARGET_SAMPLE_RATE`].
///
/// The output holds exactly `round(len * TARGET_SAMPLE_RATE / src_rate)` samples: rubato's
/// output delay is trimmed from the front and the tail is flushed with silence.
pub fn resample_to_target(mono: &[f32], src_rate: u32) -> Result<Vec<f32>> {
    if src_rate == 0 {
        bail!("source sample rate must be non-zero");
    }
    if src_rate == TARGET_SAMPLE_RATE || mono.is_empty() {
        return Ok(mono.to_vec());
    }

    let ratio = TARGET_SAMPLE_RATE as f64 / src_rate as f64;
    let expected = (mono.len() as f64 * ratio).round() as usize;

    let mut resampler = SincFixedIn::<f32>::new(
        ratio,
        2.0,
        SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        },
        RESAMPLER_CHUNK_FRAMES,
        1,
    )
    .map_err(|e| anyhow!(e))
    .context("failed to init resampler")?;

    let in_max = resampler.input_frames_max();
    let delay = resampler.output_delay();
    let wanted = expected + delay;

    let mut out = Vec::with_capacity(wanted + in_max);
    let mut blocks = mono.chunks(in_max);

    while out.len() < wanted {
        // Past the end of the input we keep feeding silence until the delayed tail is out.
        let mut block = blocks.next().map(<[f32]>::to_vec).unwrap_or_default();
        block.resize(in_max, 0.0);

        let input = vec![block];
        let processed = resampler
            .process(&input, None)
            .map_err(|e| anyhow!(e))
            .context("resampler process failed")?;

        let [channel] = processed.as_slice() else {
            bail!("expected mono output from resampler");
        };
        if channel.is_empty() {
            bail!("resampler produced no output");
        }
        out.extend_from_slice(channel);
    }

    out.drain(..delay);
    out.truncate(expected);
    Ok(out)
}
