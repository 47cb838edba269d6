use std::path::{Path, PathBuf};

use whisper_rs::WhisperContext;

use crate::Result;
use crate::backend::Transcriber;
use crate::decoder::decode_file_to_mono;
use crate::segments::Segment;

mod ctx;
mod logging;
mod segments;

use segments::collect_segments;

/// Built-in engine powered by `whisper-rs` / `whisper.cpp`.
///
/// The model is loaded once in [`WhisperBackend::new`]; each call to
/// [`Transcriber::transcribe`] decodes the input file to 16 kHz mono and runs one full pass.
pub struct WhisperBackend {
    ctx: WhisperContext,
    model_path: PathBuf,
}

impl WhisperBackend {
    /// Load a whisper.cpp model from disk.
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self> {
        let model_path = model_path.as_ref();
        tracing::info!(model = %model_path.display(), "loading whisper model");

        let ctx = ctx::get_context(model_path)?;
        Ok(Self {
            ctx,
            model_path: model_path.to_path_buf(),
        })
    }

    /// Access the underlying Whisper context.
    pub fn context(&self) -> &WhisperContext {
        &self.ctx
    }

    /// The path the model was loaded from.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl Transcriber for WhisperBackend {
    fn transcribe(&mut self, input: &Path, language: &str) -> Result<Vec<Segment>> {
        let samples = decode_file_to_mono(input)?;
        if samples.is_empty() {
            tracing::warn!(input = %input.display(), "no audio decoded; nothing to transcribe");
            return Ok(Vec::new());
        }

        tracing::info!(
            input = %input.display(),
            samples = samples.len(),
            language,
            "running whisper"
        );
        let segments = collect_segments(&self.ctx, language, &samples)?;
        tracing::info!(segments = segments.len(), "transcription finished");

        Ok(segments)
    }
}
