//! WebVTT formatting: timestamps, cue blocks, and whole documents.
//!
//! Everything here is pure string assembly over already-transcribed segments. The output
//! grammar is:
//!
//! ```text
//! WEBVTT
//!
//! <start> --> <end>
//! <text>
//!
//! <start> --> <end>
//! <text>
//! ```
//!
//! There is no trailing blank line after the last cue, and an empty segment list produces the
//! header alone (`"WEBVTT\n\n"`).

use std::io::Write;

use crate::Result;
use crate::segments::Segment;

/// The mandatory WebVTT header, including the blank line that follows it.
pub const VTT_HEADER: &str = "WEBVTT\n\n";

/// The separator between the start and end timestamps on a cue timing line.
///
/// WebVTT reserves this sequence, so it must never appear in cue text.
const CUE_ARROW: &str = "-->";

/// How the hours field of a timestamp is rendered.
///
/// `Standard` omits the hours field while it is zero (`MM:SS.mmm`) and emits it zero-padded
/// to two digits otherwise (`HH:MM:SS.mmm`), which is what WebVTT players expect.
///
/// `Legacy` reproduces the output of older subtitle scripts that had the two branches swapped:
/// hours are always printed, unpadded, while they are zero (`0:MM:SS.mmm`), and dropped
/// entirely once they are not (`MM:SS.mmm`). Cues past the one-hour mark therefore wrap
/// around. Only use it when output must match files produced by those scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum TimestampStyle {
    #[default]
    Standard,
    Legacy,
}

/// Format seconds as a WebVTT timestamp using [`TimestampStyle::Standard`].
///
/// # Panics
///
/// Panics if `seconds` is negative or NaN. Engines never produce such values; a negative
/// timestamp is a caller bug, not an input error.
pub fn format_timestamp(seconds: f64) -> String {
    format_timestamp_with(seconds, TimestampStyle::Standard)
}

/// Format seconds as a WebVTT timestamp in the given style.
///
/// We round to the nearest millisecond with `f64::round` (ties away from zero).
///
/// # Panics
///
/// Panics if `seconds` is negative or NaN.
pub fn format_timestamp_with(seconds: f64, style: TimestampStyle) -> String {
    assert!(
        seconds >= 0.0,
        "non-negative timestamp expected, got {seconds}"
    );

    let mut ms = (seconds * 1000.0).round() as u64;

    let hours = ms / 3_600_000;
    ms -= hours * 3_600_000;

    let minutes = ms / 60_000;
    ms -= minutes * 60_000;

    let secs = ms / 1_000;
    ms -= secs * 1_000;

    match style {
        TimestampStyle::Standard if hours > 0 => {
            format!("{hours:02}:{minutes:02}:{secs:02}.{ms:03}")
        }
        TimestampStyle::Standard => format!("{minutes:02}:{secs:02}.{ms:03}"),
        TimestampStyle::Legacy if hours > 0 => format!("{minutes:02}:{secs:02}.{ms:03}"),
        TimestampStyle::Legacy => format!("{hours}:{minutes:02}:{secs:02}.{ms:03}"),
    }
}

/// Make transcribed text safe to use as cue text.
///
/// Every `-->` becomes `->`, then surrounding whitespace is trimmed. Replacement repeats until
/// no arrow is left, since a single pass turns `--->` into `-->`.
pub fn sanitize_cue_text(text: &str) -> String {
    let mut out = text.replace(CUE_ARROW, "->");
    while out.contains(CUE_ARROW) {
        out = out.replace(CUE_ARROW, "->");
    }
    out.trim().to_owned()
}

/// Build one two-line cue block (`"<start> --> <end>\n<text>"`) for a segment.
///
/// `start <= end` is not checked.
pub fn create_cue_block(seg: &Segment, style: TimestampStyle) -> String {
    let start = format_timestamp_with(seg.start, style);
    let end = format_timestamp_with(seg.end, style);
    let text = sanitize_cue_text(&seg.text);
    format!("{start} {CUE_ARROW} {end}\n{text}")
}

/// Assemble a complete WebVTT document from ordered segments.
pub fn create_vtt(segments: &[Segment], style: TimestampStyle) -> String {
    let cues: Vec<String> = segments
        .iter()
        .map(|seg| create_cue_block(seg, style))
        .collect();

    let mut doc = String::from(VTT_HEADER);
    doc.push_str(&cues.join("\n\n"));
    doc
}

/// Stream a complete WebVTT document into `w`.
///
/// The bytes written are identical to [`create_vtt`]. The writer is flushed before returning.
pub fn write_vtt<W: Write>(mut w: W, segments: &[Segment], style: TimestampStyle) -> Result<()> {
    w.write_all(VTT_HEADER.as_bytes())?;

    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            w.write_all(b"\n\n")?;
        }
        w.write_all(create_cue_block(seg, style).as_bytes())?;
    }

    w.flush()?;
    Ok(())
}
