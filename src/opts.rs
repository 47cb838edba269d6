use std::path::{Path, PathBuf};

use crate::models::{DEFAULT_MODEL_DIR, WhisperModel};
use crate::vtt::TimestampStyle;

/// Options for one subtitle-generation run.
///
/// This is *library-level configuration*, not CLI flags directly. The binary maps its
/// arguments onto this type so other frontends (tests, batch jobs) can build it in code.
#[derive(Debug, Clone)]
pub struct Opts {
    /// The media file to transcribe.
    pub input: PathBuf,

    /// Where to write the subtitles. `None` means next to the input with a `.vtt` extension.
    pub output: Option<PathBuf>,

    /// Which Whisper model to load.
    pub model: WhisperModel,

    /// Directory holding `ggml-*.bin` model files.
    pub model_dir: PathBuf,

    /// Fetch the model when it is not in `model_dir` yet.
    pub download_missing_model: bool,

    /// Overwrite an existing output file without asking.
    pub skip_confirmation: bool,

    /// How cue timestamps render their hours field.
    pub timestamp_style: TimestampStyle,
}

impl Opts {
    /// Options with defaults for everything but the input path.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            model: WhisperModel::default(),
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            download_missing_model: true,
            skip_confirmation: false,
            timestamp_style: TimestampStyle::default(),
        }
    }

    /// The output path this run will write to.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// The input path with its extension replaced by `vtt` (or added, if it had none).
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("vtt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_replaces_extension() {
        assert_eq!(
            default_output_path(Path::new("talks/keynote.mp4")),
            PathBuf::from("talks/keynote.vtt")
        );
        assert_eq!(
            default_output_path(Path::new("archive.tar.gz")),
            PathBuf::from("archive.tar.vtt")
        );
        assert_eq!(default_output_path(Path::new("podcast")), PathBuf::from("podcast.vtt"));
    }

    #[test]
    fn explicit_output_wins() {
        let mut opts = Opts::new("clip.wav");
        assert_eq!(opts.output_path(), PathBuf::from("clip.vtt"));

        opts.output = Some(PathBuf::from("subs/clip.en.vtt"));
        assert_eq!(opts.output_path(), PathBuf::from("subs/clip.en.vtt"));
    }

    #[test]
    fn defaults_match_the_cli() {
        let opts = Opts::new("clip.wav");
        assert_eq!(opts.model, WhisperModel::SmallEn);
        assert_eq!(opts.model_dir, PathBuf::from("./models"));
        assert!(opts.download_missing_model);
        assert!(!opts.skip_confirmation);
        assert_eq!(opts.timestamp_style, TimestampStyle::Standard);
    }
}
