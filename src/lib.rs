//! `vtt_scribe` turns audio and video files into WebVTT subtitles using Whisper.
//!
//! This crate provides:
//! - Pure WebVTT formatting (timestamps, cue blocks, documents)
//! - A pluggable transcription engine boundary, with a built-in Whisper engine
//! - Media decoding to 16 kHz mono and a catalogue of downloadable models
//! - An overwrite-confirmation prompt and a one-call driver used by the CLI
//!
//! The formatting core has no dependency on the engine, so it can be used (and tested) with
//! segments from anywhere.

mod error;
pub use error::{Error, Result};

// High-level API (most consumers should start here).
pub mod opts;
pub mod subtitles;

// Segment data and WebVTT assembly.
pub mod segments;
pub mod vtt;

// Transcription engines.
pub mod backend;
pub mod backends;

// Audio decoding for the built-in engine.
pub mod audio_pipeline;
pub mod decoder;

// Model catalogue and retrieval.
#[cfg(feature = "download")]
pub mod download;
pub mod models;

pub mod confirm;

// Logging configuration.
#[cfg(feature = "logging")]
pub mod logging;
