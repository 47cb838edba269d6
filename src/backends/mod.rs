/// Built-in engine powered by `whisper-rs` / `whisper.cpp`.
pub mod whisper;
