use std::io::Cursor;
use std::path::Path;

use vtt_scribe::backend::Transcriber;
use vtt_scribe::confirm::ConsolePrompt;
use vtt_scribe::opts::Opts;
use vtt_scribe::segments::Segment;
use vtt_scribe::subtitles::{Outcome, run};
use vtt_scribe::vtt::{TimestampStyle, create_vtt};

/// Replays segments captured from a real engine run.
struct ReplayTranscriber {
    segments: Vec<Segment>,
}

impl ReplayTranscriber {
    fn from_fixture() -> anyhow::Result<Self> {
        let json = std::fs::read_to_string("tests/fixtures/segments.json")?;
        Ok(Self {
            segments: serde_json::from_str(&json)?,
        })
    }
}

impl Transcriber for ReplayTranscriber {
    fn transcribe(&mut self, _input: &Path, _language: &str) -> vtt_scribe::Result<Vec<Segment>> {
        Ok(self.segments.clone())
    }
}

fn fixture_transcriber(_: &Opts) -> vtt_scribe::Result<ReplayTranscriber> {
    ReplayTranscriber::from_fixture().map_err(|e| vtt_scribe::Error::Message(e.to_string()))
}

#[test]
fn writes_vtt_for_replayed_segments() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("episode.mkv");
    std::fs::write(&input, b"")?;

    let mut prompt = ConsolePrompt::new(Cursor::new(Vec::<u8>::new()), Vec::<u8>::new());
    let outcome = run(&Opts::new(&input), &mut prompt, fixture_transcriber)?;
    assert!(matches!(outcome, Outcome::Written { .. }));

    let vtt = std::fs::read_to_string(dir.path().join("episode.vtt"))?;
    assert_eq!(
        vtt,
        "WEBVTT\n\n\
         00:00.000 --> 00:03.520\nWelcome back to the channel.\n\n\
         00:03.520 --> 00:07.100\nToday we map input -> output in one pass.\n\n\
         00:07.100 --> 01:00:05.250\nSee you in an hour."
    );
    Ok(())
}

#[test]
fn legacy_style_reproduces_old_output() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("episode.mkv");
    std::fs::write(&input, b"")?;

    let mut opts = Opts::new(&input);
    opts.timestamp_style = TimestampStyle::Legacy;

    let mut prompt = ConsolePrompt::new(Cursor::new(Vec::<u8>::new()), Vec::<u8>::new());
    run(&opts, &mut prompt, fixture_transcriber)?;

    let vtt = std::fs::read_to_string(dir.path().join("episode.vtt"))?;
    assert!(vtt.starts_with("WEBVTT\n\n0:00:00.000 --> 0:00:03.520\n"));
    assert!(vtt.ends_with("0:00:07.100 --> 00:05.250\nSee you in an hour."));
    Ok(())
}

#[test]
fn console_confirmation_retries_then_overwrites() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("episode.mkv");
    let output = dir.path().join("episode.vtt");
    std::fs::write(&input, b"")?;
    std::fs::write(&output, "old subtitles")?;

    let mut shown: Vec<u8> = Vec::new();
    let mut prompt = ConsolePrompt::new(Cursor::new(b"sure\nY\n".to_vec()), &mut shown);
    let outcome = run(&Opts::new(&input), &mut prompt, fixture_transcriber)?;

    let Outcome::Written { segments, .. } = outcome else {
        panic!("expected the file to be overwritten");
    };
    assert_eq!(segments.len(), 3);

    let shown = String::from_utf8(shown)?;
    assert!(shown.contains("Do you want to overwrite it? (y/N)"));
    assert!(shown.contains("Please input either 'y' or 'n'"));

    let segments = ReplayTranscriber::from_fixture()?.segments;
    assert_eq!(
        std::fs::read_to_string(&output)?,
        create_vtt(&segments, TimestampStyle::Standard)
    );
    Ok(())
}

#[test]
fn console_confirmation_defaults_to_keeping_the_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("episode.mkv");
    let output = dir.path().join("episode.vtt");
    std::fs::write(&input, b"")?;
    std::fs::write(&output, "old subtitles")?;

    let mut prompt = ConsolePrompt::new(Cursor::new(b"\n".to_vec()), Vec::<u8>::new());
    let outcome = run(&Opts::new(&input), &mut prompt, fixture_transcriber)?;

    assert!(matches!(outcome, Outcome::Declined { .. }));
    assert_eq!(std::fs::read_to_string(&output)?, "old subtitles");
    Ok(())
}

#[test]
fn engine_with_no_speech_yields_header_only() -> anyhow::Result<()> {
    struct Silent;
    impl Transcriber for Silent {
        fn transcribe(&mut self, _: &Path, _: &str) -> vtt_scribe::Result<Vec<Segment>> {
            Ok(Vec::new())
        }
    }

    let dir = tempfile::tempdir()?;
    let input = dir.path().join("silence.wav");
    std::fs::write(&input, b"")?;

    let mut prompt = ConsolePrompt::new(Cursor::new(Vec::<u8>::new()), Vec::<u8>::new());
    run(&Opts::new(&input), &mut prompt, |_| Ok(Silent))?;

    assert_eq!(
        std::fs::read_to_string(dir.path().join("silence.vtt"))?,
        "WEBVTT\n\n"
    );
    Ok(())
}
