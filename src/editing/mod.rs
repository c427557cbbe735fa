// Editing - history, frame geometry, prompt catalog and the orchestrator that ties them to a generator

pub mod catalog;
pub mod frame;
pub mod generator;
pub mod history;
pub mod orchestrator;
pub mod raster;
pub mod types;

pub use frame::{AspectRatio, DragTarget, FrameSpec, GeometryError, NativeRegion, Rect, ResizeHandle};
pub use generator::{
    EchoGenerator, GeminiGenerator, GenerationRequest, GeneratorError, ImageGenerator,
};
pub use history::{HistoryError, HistorySnapshot, HistoryStore};
pub use orchestrator::{EditError, Orchestrator};
pub use types::{Activity, Download, EditOutcome, ImageData, SessionEvent};
