use std::path::Path;

use crate::Result;
use crate::segments::Segment;

/// Language passed to the engine for every transcription.
pub const TARGET_LANGUAGE: &str = "en";

/// Pluggable speech-recognition engine used by [`crate::subtitles::run`].
///
/// An engine turns a media file into an ordered list of [`Segment`]s. How it gets there
/// (model loading, audio decoding, inference) is entirely its own business, which keeps the
/// VTT formatting testable with synthetic segments.
///
/// Implementations must return segments in playback order; the assembler never reorders them.
pub trait Transcriber {
    fn transcribe(&mut self, input: &Path, language: &str) -> Result<Vec<Segment>>;
}

impl<T: Transcriber + ?Sized> Transcriber for Box<T> {
    fn transcribe(&mut self, input: &Path, language: &str) -> Result<Vec<Segment>> {
        (**self).transcribe(input, language)
    }
}
