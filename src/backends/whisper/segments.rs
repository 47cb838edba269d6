use anyhow::{Context, Result};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperSegment, WhisperState};

use crate::segments::{Segment, centiseconds_to_seconds};

/// Run a full Whisper pass over 16 kHz mono samples and collect the segments in order.
pub(super) fn collect_segments(
    ctx: &WhisperContext,
    language: &str,
    samples: &[f32],
) -> Result<Vec<Segment>> {
    let state = run_whisper_full(ctx, language, samples)?;

    let mut segments = Vec::new();
    for whisper_segment in state.as_iter() {
        let segment = to_segment(whisper_segment)?;
        tracing::debug!(
            start = segment.start,
            end = segment.end,
            text = %segment.text,
            "transcribed segment"
        );
        segments.push(segment);
    }

    Ok(segments)
}

fn to_segment(segment: WhisperSegment) -> Result<Segment> {
    let text = segment
        .to_str()
        .context("failed to get segment text")?
        .to_owned();

    Ok(Segment {
        start: centiseconds_to_seconds(segment.start_timestamp()),
        end: centiseconds_to_seconds(segment.end_timestamp()),
        text,
    })
}

fn build_full_params(language: &str) -> FullParams<'_, '_> {
    let mut params = FullParams::new(SamplingStrategy::BeamSearch {
        beam_size: 5,
        patience: 1.0,
    });

    params.set_n_threads(num_cpus::get() as i32);
    params.set_translate(false);
    params.set_language(Some(language));
    params.set_no_context(true);
    params.set_single_segment(false);

    params.set_print_progress(false);
    params.set_print_special(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    params
}

fn run_whisper_full(ctx: &WhisperContext, language: &str, samples: &[f32]) -> Result<WhisperState> {
    let params = build_full_params(language);

    let mut state = ctx
        .create_state()
        .context("failed to create whisper state")?;

    state
        .full(params, samples)
        .context("failed to run whisper full()")?;

    Ok(state)
}
