// snazzy - AI headshot editing sessions
// Upload a photo, let the generator polish it, then refine it with presets,
// lighting tools, a style reference and frame outpainting, with full undo/redo.

pub mod config;
pub mod editing;

pub use config::{ConfigError, StudioConfig};
pub use editing::{EditError, Orchestrator};
