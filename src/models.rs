//! The catalogue of supported Whisper models and where to find them on disk.
//!
//! We keep an allowlist of known-good ggml artifacts from whisper.cpp's Hugging Face repo
//! rather than accepting arbitrary names, so `--model` typos fail at argument parsing.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Directory models are read from (and downloaded into) unless configured otherwise.
pub const DEFAULT_MODEL_DIR: &str = "./models";

const MODEL_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// A supported Whisper model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum WhisperModel {
    #[cfg_attr(feature = "cli", value(name = "tiny"))]
    Tiny,
    #[cfg_attr(feature = "cli", value(name = "tiny.en"))]
    TinyEn,
    #[cfg_attr(feature = "cli", value(name = "base"))]
    Base,
    #[cfg_attr(feature = "cli", value(name = "base.en"))]
    BaseEn,
    #[cfg_attr(feature = "cli", value(name = "small"))]
    Small,
    #[default]
    #[cfg_attr(feature = "cli", value(name = "small.en"))]
    SmallEn,
    #[cfg_attr(feature = "cli", value(name = "medium"))]
    Medium,
    #[cfg_attr(feature = "cli", value(name = "medium.en"))]
    MediumEn,
    #[cfg_attr(feature = "cli", value(name = "large-v1"))]
    LargeV1,
    #[cfg_attr(feature = "cli", value(name = "large-v2"))]
    LargeV2,
    #[cfg_attr(feature = "cli", value(name = "large-v3"))]
    LargeV3,
    #[cfg_attr(feature = "cli", value(name = "large-v3-turbo"))]
    LargeV3Turbo,
}

impl WhisperModel {
    pub const ALL: &'static [WhisperModel] = &[
        Self::Tiny,
        Self::TinyEn,
        Self::Base,
        Self::BaseEn,
        Self::Small,
        Self::SmallEn,
        Self::Medium,
        Self::MediumEn,
        Self::LargeV1,
        Self::LargeV2,
        Self::LargeV3,
        Self::LargeV3Turbo,
    ];

    /// The name users type (e.g. `small.en`).
    pub fn name(self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::TinyEn => "tiny.en",
            Self::Base => "base",
            Self::BaseEn => "base.en",
            Self::Small => "small",
            Self::SmallEn => "small.en",
            Self::Medium => "medium",
            Self::MediumEn => "medium.en",
            Self::LargeV1 => "large-v1",
            Self::LargeV2 => "large-v2",
            Self::LargeV3 => "large-v3",
            Self::LargeV3Turbo => "large-v3-turbo",
        }
    }

    /// Filename written to disk (e.g. `ggml-small.en.bin`).
    pub fn filename(self) -> String {
        format!("ggml-{}.bin", self.name())
    }

    /// Full download URL.
    pub fn url(self) -> String {
        format!("{MODEL_BASE_URL}/{}", self.filename())
    }

    /// Whether the model was trained on English audio only.
    pub fn is_english_only(self) -> bool {
        self.name().ends_with(".en")
    }

    /// Look a model up by its user-facing name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.name() == name)
    }
}

impl fmt::Display for WhisperModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where `model` lives inside `model_dir`.
pub fn model_path(model_dir: &Path, model: WhisperModel) -> PathBuf {
    model_dir.join(model.filename())
}

/// Return the on-disk path of `model`, downloading it first when missing and allowed.
///
/// Downloading requires the `download` feature; without it a missing model is always an error.
pub fn ensure_model(model_dir: &Path, model: WhisperModel, allow_download: bool) -> Result<PathBuf> {
    let path = model_path(model_dir, model);
    if path.is_file() {
        tracing::debug!(model = %model, path = %path.display(), "using cached model");
        return Ok(path);
    }

    if !allow_download {
        return Err(Error::msg(format!(
            "model '{model}' not found at '{}' (downloading is disabled)",
            path.display()
        )));
    }

    download_missing(model_dir, model, &path)?;
    Ok(path)
}

#[cfg(feature = "download")]
fn download_missing(model_dir: &Path, model: WhisperModel, path: &Path) -> Result<()> {
    std::fs::create_dir_all(model_dir)?;
    crate::download::download_model(model, path)?;
    Ok(())
}

#[cfg(not(feature = "download"))]
fn download_missing(_model_dir: &Path, model: WhisperModel, path: &Path) -> Result<()> {
    Err(Error::msg(format!(
        "model '{model}' not found at '{}' (built without the `download` feature)",
        path.display()
    )))
}
