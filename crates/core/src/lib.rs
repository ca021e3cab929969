//! Core library for the wave match overlay renderer.
//!
//! The crate holds the drawing pipeline behind the "wave match" minigame
//! overlay: an immutable parameter record with default-overlay semantics, a
//! sine waveform renderer over an exclusively owned drawing surface, the
//! frame pacing machinery that drives it, and the per-round minigame state
//! the rendered waves are scored against.

pub mod error;
pub mod game;
pub mod params;
pub mod render;
pub mod surface;
pub mod timeline;

pub use error::{Result, WaveMatchError};
pub use game::{WaveField, WaveMatchState, WaveTuning, MATCH_THRESHOLD};
pub use params::{WaveOverrides, WaveParameters};
pub use render::{ease, SurfaceState, WaveRenderer};
pub use surface::{DrawSurface, RecordingSurface, StrokeStyle, StrokedPath};
pub use timeline::{AnimationClock, AnimationDriver, FramePacer, TARGET_FPS};
