use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use vtt_scribe::confirm::ConsolePrompt;
use vtt_scribe::logging;
use vtt_scribe::models::{DEFAULT_MODEL_DIR, WhisperModel};
use vtt_scribe::opts::Opts;
use vtt_scribe::segments::Segment;
use vtt_scribe::subtitles::{Outcome, load_whisper, run};
use vtt_scribe::vtt::{TimestampStyle, format_timestamp_with};

fn main() -> Result<()> {
    logging::init();
    let params = Params::parse();
    let opts = params.into_opts();

    println!("Generating subtitles from: {}", opts.input.display());
    println!("Subtitles will be saved to: {}", opts.output_path().display());
    println!();

    let mut prompt = ConsolePrompt::stdio();
    match run(&opts, &mut prompt, load_whisper)? {
        Outcome::Written { segments, .. } => {
            print_segments(&segments, opts.timestamp_style);
        }
        Outcome::Declined { .. } => {}
    }

    Ok(())
}

/// Echo each transcribed segment, one per line.
fn print_segments(segments: &[Segment], style: TimestampStyle) {
    for seg in segments {
        println!(
            "[{} --> {}] {}",
            format_timestamp_with(seg.start, style),
            format_timestamp_with(seg.end, style),
            seg.text.trim()
        );
    }
}

#[derive(Parser, Debug)]
#[command(name = "vtt-scribe")]
#[command(about = "Create subtitles from a file.")]
struct Params {
    /// The input file to generate subtitles from.
    pub input: PathBuf,

    /// The path to save the subtitles, defaults to the input path with a `.vtt` extension.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// The model to use.
    #[arg(short = 'm', long = "model", value_enum, default_value_t = WhisperModel::SmallEn)]
    pub model: WhisperModel,

    /// If the output file already exists, skip the confirmation prompt and overwrite it.
    #[arg(short = 'y', long = "skip-confirmation", default_value_t = false)]
    pub skip_confirmation: bool,

    /// Directory holding (or receiving) `ggml-*.bin` model files.
    #[arg(long = "model-dir", env = "VTT_SCRIBE_MODEL_DIR", default_value = DEFAULT_MODEL_DIR)]
    pub model_dir: PathBuf,

    /// Fail instead of downloading a model that is not in the model directory.
    #[arg(long = "no-download", default_value_t = false)]
    pub no_download: bool,

    /// How cue timestamps render hours.
    #[arg(long = "timestamp-style", value_enum, default_value_t = TimestampStyle::Standard)]
    pub timestamp_style: TimestampStyle,
}

impl Params {
    fn into_opts(self) -> Opts {
        Opts {
            input: self.input,
            output: self.output,
            model: self.model,
            model_dir: self.model_dir,
            download_missing_model: !self.no_download,
            skip_confirmation: self.skip_confirmation,
            timestamp_style: self.timestamp_style,
        }
    }
}
