use serde::{Deserialize, Serialize};

/// A unit of transcribed speech as produced by a transcription engine.
///
/// Times are in seconds. `end` is expected to be `>= start` but nothing enforces it;
/// the VTT assembler passes malformed ranges through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Convert a whisper.cpp timestamp (centiseconds) into seconds.
///
/// whisper uses `-1` for "unknown"; anything negative clamps to `0.0`.
pub(crate) fn centiseconds_to_seconds(value: i64) -> f64 {
    if value < 0 { 0.0 } else { value as f64 / 100.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centiseconds_convert_and_clamp() {
        assert_eq!(centiseconds_to_seconds(0), 0.0);
        assert_eq!(centiseconds_to_seconds(150), 1.5);
        assert_eq!(centiseconds_to_seconds(-1), 0.0);
    }

    #[test]
    fn segment_deserializes_from_engine_style_json() -> anyhow::Result<()> {
        let seg: Segment =
            serde_json::from_str(r#"{"start": 0.0, "end": 2.5, "text": " Hello there."}"#)?;
        assert_eq!(seg, Segment::new(0.0, 2.5, " Hello there."));
        Ok(())
    }
}
