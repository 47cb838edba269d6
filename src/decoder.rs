//! Decode a media file (audio or video container) into mono `f32` samples at
//! [`TARGET_SAMPLE_RATE`], ready for Whisper.
//!
//! Probing and codec handling are delegated to Symphonia; downmixing and resampling live in
//! [`crate::audio_pipeline`]. Video tracks are ignored: we pick the first track that has a real
//! codec and a known sample rate.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use symphonia::core::audio::{AudioBufferRef, SampleBuffer};
use symphonia::core::codecs::{CODEC_TYPE_NULL, Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, Packet, Track};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

pub use crate::audio_pipeline::TARGET_SAMPLE_RATE;
use crate::audio_pipeline::{downmix_to_mono, resample_to_target};

/// Decode the whole file at `path` into mono samples at [`TARGET_SAMPLE_RATE`].
///
/// An empty return value means the container held an audio track with no decodable frames.
pub fn decode_file_to_mono(path: &Path) -> Result<Vec<f32>> {
    let file =
        File::open(path).with_context(|| format!("failed to open media file: {}", path.display()))?;

    let hint_extension = path.extension().and_then(|ext| ext.to_str());
    let (mut format, track) = probe_and_pick_audio_track(file, hint_extension)
        .with_context(|| format!("unsupported or unreadable media: {}", path.display()))?;

    let src_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| anyhow!("audio track has no sample rate"))?;

    let mut decoder = make_decoder_for_track(&track)?;
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut mono = Vec::new();

    while let Some(packet) = next_packet(&mut format)? {
        if packet.track_id() != track.id {
            continue;
        }

        decode_packet_and_then(&mut decoder, &packet, |decoded| {
            let channels = decoded.spec().channels.count();
            if channels == 0 {
                anyhow::bail!("decoded audio had zero channels");
            }

            let buf = sample_buf.get_or_insert_with(|| {
                SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec())
            });
            buf.copy_interleaved_ref(decoded);

            mono.extend(downmix_to_mono(buf.samples(), channels));
            Ok(())
        })?;
    }

    tracing::debug!(
        path = %path.display(),
        src_rate,
        frames = mono.len(),
        "decoded media"
    );

    resample_to_target(&mono, src_rate)
}

/// Probe the container and pick the first decodable audio track.
fn probe_and_pick_audio_track(
    file: File,
    hint_extension: Option<&str>,
) -> Result<(Box<dyn FormatReader>, Track)> {
    let mss_opts = MediaSourceStreamOptions {
        // Symphonia expects a power-of-two buffer > 32KiB for good probing behavior.
        buffer_len: 256 * 1024,
    };
    let mss = MediaSourceStream::new(Box::new(file), mss_opts);

    let mut hint = Hint::new();
    if let Some(ext) = hint_extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| anyhow!(e))
        .context("failed to probe media stream")?;

    let format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL && t.codec_params.sample_rate.is_some())
        .cloned()
        .ok_or_else(|| anyhow!("no audio track found"))?;

    Ok((format, track))
}

fn make_decoder_for_track(track: &Track) -> Result<Box<dyn Decoder>> {
    symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| anyhow!(e))
        .context("failed to create decoder for audio track")
}

/// Read the next packet. `Ok(None)` means end of stream (Symphonia reports EOF as an IO error).
fn next_packet(format: &mut Box<dyn FormatReader>) -> Result<Option<Packet>> {
    match format.next_packet() {
        Ok(p) => Ok(Some(p)),
        Err(SymphoniaError::IoError(_)) => Ok(None),
        Err(e) => Err(anyhow!(e)).context("failed reading packet"),
    }
}

/// Decode one packet and hand the buffer to `on_decoded`.
///
/// Corrupt frames (`DecodeError`) and truncated packets (`IoError`) are skipped; anything else
/// is fatal.
fn decode_packet_and_then(
    decoder: &mut Box<dyn Decoder>,
    packet: &Packet,
    on_decoded: impl FnOnce(AudioBufferRef<'_>) -> Result<()>,
) -> Result<()> {
    match decoder.decode(packet) {
        Ok(buf) => on_decoded(buf),
        Err(SymphoniaError::DecodeError(msg)) => {
            tracing::debug!(%msg, "skipping undecodable frame");
            Ok(())
        }
        Err(SymphoniaError::IoError(_)) => Ok(()),
        Err(e) => Err(anyhow!(e)).context("decoder failure"),
    }
}
