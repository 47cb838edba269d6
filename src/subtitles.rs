//! High-level entry point: media file in, `.vtt` file out.
//!
//! [`run`] wires the pieces together:
//! resolve output path → (maybe) confirm overwrite → load engine → transcribe → assemble VTT →
//! write to disk.
//!
//! The engine is loaded through a caller-supplied closure and only after the overwrite
//! question is settled, so a declined run never pays for model loading. Tests pass a closure
//! that returns a synthetic [`Transcriber`].

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::backend::{TARGET_LANGUAGE, Transcriber};
use crate::backends::whisper::WhisperBackend;
use crate::confirm::ConfirmOverwrite;
use crate::models::ensure_model;
use crate::opts::Opts;
use crate::segments::Segment;
use crate::vtt::write_vtt;
use crate::{Error, Result};

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    /// The document was written.
    Written {
        path: PathBuf,
        segments: Vec<Segment>,
    },

    /// The output already existed and the user chose not to overwrite it. Nothing was
    /// transcribed or written.
    Declined { path: PathBuf },
}

/// Generate subtitles for `opts.input`.
pub fn run<T, L, C>(opts: &Opts, confirm: &mut C, load: L) -> Result<Outcome>
where
    T: Transcriber,
    L: FnOnce(&Opts) -> Result<T>,
    C: ConfirmOverwrite + ?Sized,
{
    if !opts.input.is_file() {
        return Err(Error::InputNotFound(opts.input.clone()));
    }

    let output = opts.output_path();
    if output.exists() && !opts.skip_confirmation && !confirm.confirm_overwrite(&output)? {
        tracing::info!(output = %output.display(), "overwrite declined");
        return Ok(Outcome::Declined { path: output });
    }

    let mut transcriber = load(opts)?;
    let segments = transcriber.transcribe(&opts.input, TARGET_LANGUAGE)?;

    write_document(&output, &segments, opts)?;
    tracing::info!(
        output = %output.display(),
        cues = segments.len(),
        "subtitles written"
    );

    Ok(Outcome::Written {
        path: output,
        segments,
    })
}

/// Resolve (and if needed download) the configured model, then load the Whisper engine.
///
/// This is the loader the binary hands to [`run`].
pub fn load_whisper(opts: &Opts) -> Result<WhisperBackend> {
    let model_path = ensure_model(&opts.model_dir, opts.model, opts.download_missing_model)?;
    WhisperBackend::new(model_path)
}

/// Write the assembled document as UTF-8, replacing any existing file.
fn write_document(path: &Path, segments: &[Segment], opts: &Opts) -> Result<()> {
    let file = File::create(path)?;
    write_vtt(BufWriter::new(file), segments, opts.timestamp_style)
}
