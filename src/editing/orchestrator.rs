// Orchestrator - turns edit requests into generator calls and commits results to history

use super::catalog;
use super::frame::{FrameSpec, GeometryError};
use super::generator::{GenerationRequest, GeneratorError, ImageGenerator};
use super::history::{HistoryError, HistorySnapshot, HistoryStore};
use super::raster::{self, RasterError};
use super::types::{Activity, Download, EditOutcome, ImageData, SessionEvent};
use crate::config::StudioConfig;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast, watch};

const EDIT_FAILED: &str = "An AI error occurred. Please try a different action.";
const FRAME_FAILED: &str = "An AI error occurred during frame generation.";
const EVENT_CAPACITY: usize = 64;

/// Mutable session data; only the orchestrator touches it
struct SessionState {
    history: HistoryStore,
    generation: u64,
    notice: Option<String>,
    style_reference: Option<Arc<ImageData>>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            history: HistoryStore::new(),
            generation: 0,
            notice: None,
            style_reference: None,
        }
    }
}

/// Owns one editing session and mediates every call to the image generator.
///
/// At most one generator call runs per session; further requests are rejected with
/// [`EditError::Busy`] until it settles. A reset starts a new session generation,
/// and results that arrive for an older generation are dropped.
pub struct Orchestrator {
    config: StudioConfig,
    generator: Arc<dyn ImageGenerator>,
    state: RwLock<SessionState>,
    activity: watch::Sender<Activity>,
    events: broadcast::Sender<SessionEvent>,
}

impl Orchestrator {
    pub fn new(config: StudioConfig, generator: Arc<dyn ImageGenerator>) -> Self {
        let (activity, _) = watch::channel(Activity::idle(0));
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            config,
            generator,
            state: RwLock::new(SessionState::new()),
            activity,
            events,
        }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Start a new session from an uploaded image.
    ///
    /// The upload is all-or-nothing: if the automatic transform fails, the session
    /// ends up empty again.
    pub async fn upload(&self, image: ImageData) -> Result<EditOutcome, EditError> {
        let generation = self.reset().await;

        if let Err(e) = self.validate_upload(&image) {
            tracing::warn!("Rejected upload: {}", e);
            self.surface_error(generation, &e.to_string()).await;
            return Err(e);
        }

        let (request, guard) = {
            let mut state = self.state.write().await;
            if state.generation != generation {
                return Ok(EditOutcome::Discarded);
            }
            let original = Arc::new(image);
            state.history.initialize(original.clone())?;
            self.publish_history(&state);

            let guard = self.begin(generation, catalog::AUTO_TRANSFORM_PROGRESS)?;
            let request = GenerationRequest::new(original, catalog::AUTO_TRANSFORM_INSTRUCTION);
            (request, guard)
        };

        let result = self.generator.generate(&request).await;

        let mut state = self.state.write().await;
        let outcome = if state.generation != generation {
            tracing::info!("Discarding auto-transform for superseded session {}", generation);
            Ok(EditOutcome::Discarded)
        } else {
            match result {
                Ok(image) => {
                    state.history.commit_auto_result(Arc::new(image))?;
                    self.publish_history(&state);
                    Ok(EditOutcome::Applied { cursor: 1 })
                }
                Err(e) => {
                    tracing::warn!("Auto-transform via {} failed: {}", self.generator.name(), e);
                    state.history.reset();
                    state.style_reference = None;
                    self.publish_history(&state);
                    let err = EditError::AutoTransform;
                    state.notice = Some(err.to_string());
                    self.emit(SessionEvent::Error {
                        generation,
                        message: err.to_string(),
                    });
                    Err(err)
                }
            }
        };
        drop(state);
        drop(guard);
        outcome
    }

    /// Apply a free-form instruction to the current image
    pub async fn edit(&self, instruction: &str, progress: &str) -> Result<EditOutcome, EditError> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(EditError::EmptyInstruction);
        }

        let (current, reference, guard) = self.prepare(progress).await?;
        let request = match reference {
            Some(reference) => {
                let text = format!("{}{}", instruction, catalog::STYLE_REFERENCE_CLAUSE);
                GenerationRequest::new(current, text).with_reference(reference)
            }
            None => GenerationRequest::new(current, instruction),
        };

        let result = self.generator.generate(&request).await;
        self.commit(guard, result, EDIT_FAILED).await
    }

    pub async fn apply_custom(&self, instruction: &str) -> Result<EditOutcome, EditError> {
        self.edit(instruction, catalog::CUSTOM_PROGRESS).await
    }

    pub async fn apply_preset(&self, id: &str) -> Result<EditOutcome, EditError> {
        let preset = catalog::find(id).ok_or_else(|| EditError::UnknownPreset(id.to_string()))?;
        self.edit(preset.instruction, preset.progress).await
    }

    pub async fn apply_color_temperature(&self, kelvin: u32) -> Result<EditOutcome, EditError> {
        let (instruction, progress) = catalog::color_temperature(kelvin);
        self.edit(&instruction, &progress).await
    }

    pub async fn apply_light_direction(&self, degrees: f64) -> Result<EditOutcome, EditError> {
        let (instruction, progress) = catalog::key_light(degrees);
        self.edit(&instruction, &progress).await
    }

    /// Restyle the current image after the attached reference
    pub async fn apply_style_reference(&self) -> Result<EditOutcome, EditError> {
        if self.state.read().await.style_reference.is_none() {
            return Err(EditError::NoStyleReference);
        }
        self.edit(catalog::APPLY_STYLE_INSTRUCTION, catalog::APPLY_STYLE_PROGRESS)
            .await
    }

    /// Extend the current image to the frame and let the generator fill the gap
    pub async fn outpaint(&self, frame: &FrameSpec) -> Result<EditOutcome, EditError> {
        let (current, _, guard) = self.prepare(catalog::OUTPAINT_PROGRESS).await?;

        let canvas = match Self::outpaint_canvas(&current, frame) {
            Ok(canvas) => canvas,
            Err(e) => {
                tracing::warn!("Could not build outpaint canvas: {}", e);
                self.surface_error(guard.generation, FRAME_FAILED).await;
                return Err(e);
            }
        };

        let request = GenerationRequest::new(Arc::new(canvas), catalog::OUTPAINT_INSTRUCTION);
        let result = self.generator.generate(&request).await;
        self.commit(guard, result, FRAME_FAILED).await
    }

    fn outpaint_canvas(current: &ImageData, frame: &FrameSpec) -> Result<ImageData, EditError> {
        let (width, height) = raster::dimensions(current)?;
        let region = frame.native_region(width, height)?;
        tracing::debug!("Outpaint region {:?} over {}x{} image", region, width, height);
        Ok(raster::extend_canvas(current, &region)?)
    }

    /// Drop all session state and start a new generation; returns the new generation
    pub async fn reset(&self) -> u64 {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.history.reset();
        state.notice = None;
        state.style_reference = None;
        let generation = state.generation;
        self.activity.send_replace(Activity::idle(generation));
        self.emit(SessionEvent::Reset { generation });
        generation
    }

    pub async fn undo(&self) -> bool {
        self.mutate_history(HistoryStore::undo).await
    }

    pub async fn redo(&self) -> bool {
        self.mutate_history(HistoryStore::redo).await
    }

    /// Push the original again; also detaches the style reference
    pub async fn revert_to_original(&self) -> bool {
        let mut state = self.state.write().await;
        state.style_reference = None;
        let changed = state.history.revert_to_original();
        if changed {
            self.publish_history(&state);
        }
        changed
    }

    pub async fn revert_to_auto(&self) -> bool {
        self.mutate_history(HistoryStore::revert_to_auto).await
    }

    pub async fn set_style_reference(&self, reference: ImageData) -> Result<(), EditError> {
        if !self.config.upload.accepts(&reference.mime_type) {
            return Err(EditError::UploadDecode(format!(
                "unsupported file type {}",
                reference.mime_type
            )));
        }
        raster::dimensions(&reference).map_err(|e| EditError::UploadDecode(e.to_string()))?;
        self.state.write().await.style_reference = Some(Arc::new(reference));
        Ok(())
    }

    pub async fn clear_style_reference(&self) {
        self.state.write().await.style_reference = None;
    }

    pub async fn style_reference(&self) -> Option<Arc<ImageData>> {
        self.state.read().await.style_reference.clone()
    }

    pub async fn snapshot(&self) -> HistorySnapshot {
        self.state.read().await.history.snapshot()
    }

    pub async fn current_image(&self) -> Option<Arc<ImageData>> {
        self.state.read().await.history.current().cloned()
    }

    pub async fn can_undo(&self) -> bool {
        self.state.read().await.history.can_undo()
    }

    pub async fn can_redo(&self) -> bool {
        self.state.read().await.history.can_redo()
    }

    /// Error notice left by the last failed call, if not dismissed
    pub async fn notice(&self) -> Option<String> {
        self.state.read().await.notice.clone()
    }

    pub async fn dismiss_error(&self) {
        self.state.write().await.notice = None;
    }

    /// The current image as a timestamped file
    pub async fn download(&self) -> Option<Download> {
        let current = self.current_image().await?;
        Some(Download::new(
            current,
            &self.config.export.file_prefix,
            chrono::Utc::now(),
        ))
    }

    pub fn activity(&self) -> Activity {
        self.activity.borrow().clone()
    }

    pub fn watch_activity(&self) -> watch::Receiver<Activity> {
        self.activity.subscribe()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn validate_upload(&self, image: &ImageData) -> Result<(), EditError> {
        let upload = &self.config.upload;
        if !upload.accepts(&image.mime_type) {
            return Err(EditError::UploadDecode(format!(
                "unsupported file type {}",
                image.mime_type
            )));
        }
        if image.len() > upload.max_bytes {
            return Err(EditError::UploadDecode(format!(
                "file is {} bytes, the limit is {}",
                image.len(),
                upload.max_bytes
            )));
        }
        raster::dimensions(image).map_err(|e| EditError::UploadDecode(e.to_string()))?;
        Ok(())
    }

    /// Claim the session for one call and collect its inputs
    async fn prepare(
        &self,
        progress: &str,
    ) -> Result<(Arc<ImageData>, Option<Arc<ImageData>>, BusyGuard<'_>), EditError> {
        let mut state = self.state.write().await;
        let current = state.history.current().cloned().ok_or(EditError::NoImage)?;
        let guard = self.begin(state.generation, progress)?;
        state.notice = None;
        Ok((current, state.style_reference.clone(), guard))
    }

    fn begin(&self, generation: u64, progress: &str) -> Result<BusyGuard<'_>, EditError> {
        let started = self.activity.send_if_modified(|activity| {
            if activity.busy {
                false
            } else {
                *activity = Activity::busy(generation, progress);
                true
            }
        });
        if !started {
            return Err(EditError::Busy);
        }

        tracing::info!("{}", progress);
        self.emit(SessionEvent::Busy {
            generation,
            label: progress.to_string(),
        });
        Ok(BusyGuard {
            orchestrator: self,
            generation,
        })
    }

    async fn commit(
        &self,
        guard: BusyGuard<'_>,
        result: Result<ImageData, GeneratorError>,
        failure: &'static str,
    ) -> Result<EditOutcome, EditError> {
        let generation = guard.generation;
        let mut state = self.state.write().await;

        let outcome = if state.generation != generation {
            tracing::info!("Discarding result for superseded session {}", generation);
            match result {
                Ok(_) => Ok(EditOutcome::Discarded),
                Err(_) => Err(EditError::Edit(failure)),
            }
        } else {
            match result {
                Ok(image) => {
                    let cursor = state.history.append(Arc::new(image))?;
                    self.publish_history(&state);
                    Ok(EditOutcome::Applied { cursor })
                }
                Err(e) => {
                    tracing::warn!("Edit via {} failed: {}", self.generator.name(), e);
                    state.notice = Some(failure.to_string());
                    self.emit(SessionEvent::Error {
                        generation,
                        message: failure.to_string(),
                    });
                    Err(EditError::Edit(failure))
                }
            }
        };
        drop(state);
        drop(guard);
        outcome
    }

    async fn surface_error(&self, generation: u64, message: &str) {
        let mut state = self.state.write().await;
        if state.generation == generation {
            state.notice = Some(message.to_string());
            self.emit(SessionEvent::Error {
                generation,
                message: message.to_string(),
            });
        }
    }

    async fn mutate_history(&self, op: fn(&mut HistoryStore) -> bool) -> bool {
        let mut state = self.state.write().await;
        let changed = op(&mut state.history);
        if changed {
            self.publish_history(&state);
        }
        changed
    }

    fn publish_history(&self, state: &SessionState) {
        self.emit(SessionEvent::HistoryChanged {
            generation: state.generation,
            len: state.history.len(),
            cursor: state.history.cursor(),
        });
    }

    fn emit(&self, event: SessionEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }
}

/// Clears the busy flag when the call settles, however it settles
struct BusyGuard<'a> {
    orchestrator: &'a Orchestrator,
    generation: u64,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let generation = self.generation;
        self.orchestrator.activity.send_if_modified(|activity| {
            if activity.busy && activity.generation == generation {
                *activity = Activity::idle(generation);
                true
            } else {
                false
            }
        });
        self.orchestrator.emit(SessionEvent::Idle { generation });
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("Could not read the selected image: {0}")]
    UploadDecode(String),

    #[error("Failed to process the image with AI. Please check your API key or try another photo.")]
    AutoTransform,

    #[error("{0}")]
    Edit(&'static str),

    #[error("Invalid frame: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Could not prepare the image: {0}")]
    Raster(#[from] RasterError),

    #[error("Session history rejected the change: {0}")]
    History(#[from] HistoryError),

    #[error("Another edit is still in progress")]
    Busy,

    #[error("No image loaded")]
    NoImage,

    #[error("No style reference attached")]
    NoStyleReference,

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Edit instruction is empty")]
    EmptyInstruction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::frame::{AspectRatio, Rect};
    use async_trait::async_trait;
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Test double: replays queued results, echoing the target once the queue is empty
    struct ScriptedGenerator {
        results: Mutex<VecDeque<Result<ImageData, GeneratorError>>>,
        requests: Mutex<Vec<GenerationRequest>>,
        hold: Mutex<Option<Arc<Notify>>>,
        entered: Notify,
    }

    impl ScriptedGenerator {
        fn new() -> Self {
            Self {
                results: Mutex::new(VecDeque::new()),
                requests: Mutex::new(Vec::new()),
                hold: Mutex::new(None),
                entered: Notify::new(),
            }
        }

        fn push(&self, result: Result<ImageData, GeneratorError>) {
            self.results.lock().unwrap().push_back(result);
        }

        /// Make the next call wait until the returned gate is notified
        fn hold_next(&self) -> Arc<Notify> {
            let gate = Arc::new(Notify::new());
            *self.hold.lock().unwrap() = Some(gate.clone());
            gate
        }

        fn requests(&self) -> Vec<GenerationRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ImageGenerator for ScriptedGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<ImageData, GeneratorError> {
            self.requests.lock().unwrap().push(request.clone());
            let hold = self.hold.lock().unwrap().take();
            if let Some(gate) = hold {
                self.entered.notify_one();
                gate.notified().await;
            }
            let next = self.results.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Ok(request.target().unwrap().as_ref().clone()))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn png(width: u32, height: u32) -> ImageData {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 120, 80, 255]));
        raster::encode_png(DynamicImage::ImageRgba8(img)).unwrap()
    }

    fn tagged(tag: u8) -> ImageData {
        ImageData::new("image/png", vec![tag])
    }

    fn setup() -> (Arc<ScriptedGenerator>, Orchestrator) {
        let generator = Arc::new(ScriptedGenerator::new());
        let orchestrator = Orchestrator::new(StudioConfig::default(), generator.clone());
        (generator, orchestrator)
    }

    fn drain(rx: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn busy_idle(events: &[SessionEvent]) -> (usize, usize) {
        let busy = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::Busy { .. }))
            .count();
        let idle = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::Idle { .. }))
            .count();
        (busy, idle)
    }

    #[tokio::test]
    async fn test_upload_runs_auto_transform() {
        let (generator, orchestrator) = setup();
        generator.push(Ok(tagged(1)));

        let outcome = orchestrator.upload(png(4, 4)).await.unwrap();
        assert_eq!(outcome, EditOutcome::Applied { cursor: 1 });

        let snapshot = orchestrator.snapshot().await;
        assert_eq!(snapshot.entries.len(), 2);
        assert_eq!(snapshot.cursor, Some(1));
        assert_eq!(snapshot.current().unwrap().bytes, vec![1]);

        let requests = generator.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].images.len(), 1);
        assert_eq!(requests[0].instruction, catalog::AUTO_TRANSFORM_INSTRUCTION);
        assert!(!orchestrator.activity().busy);
    }

    #[tokio::test]
    async fn test_failed_auto_transform_empties_session() {
        let (generator, orchestrator) = setup();
        generator.push(Err(GeneratorError::NoImage(None)));

        let err = orchestrator.upload(png(4, 4)).await.unwrap_err();
        assert!(matches!(err, EditError::AutoTransform));

        let snapshot = orchestrator.snapshot().await;
        assert!(snapshot.original.is_none());
        assert!(snapshot.entries.is_empty());
        assert_eq!(snapshot.cursor, None);
        assert!(orchestrator.notice().await.is_some());
        assert!(!orchestrator.activity().busy);
    }

    #[tokio::test]
    async fn test_upload_validation() {
        let (generator, orchestrator) = setup();

        let gif = ImageData::new("image/gif", png(2, 2).bytes);
        assert!(matches!(
            orchestrator.upload(gif).await,
            Err(EditError::UploadDecode(_))
        ));

        let junk = ImageData::new("image/png", vec![0, 1, 2, 3]);
        assert!(matches!(
            orchestrator.upload(junk).await,
            Err(EditError::UploadDecode(_))
        ));

        let mut config = StudioConfig::default();
        config.upload.max_bytes = 10;
        let small = Orchestrator::new(config, generator.clone());
        assert!(matches!(
            small.upload(png(8, 8)).await,
            Err(EditError::UploadDecode(_))
        ));

        assert!(generator.requests().is_empty());
        assert!(orchestrator.snapshot().await.is_empty());
        assert!(orchestrator.notice().await.is_some());
    }

    #[tokio::test]
    async fn test_edit_success_appends_with_one_busy_cycle() {
        let (generator, orchestrator) = setup();
        orchestrator.upload(png(4, 4)).await.unwrap();
        let mut rx = orchestrator.subscribe();

        generator.push(Ok(tagged(9)));
        let outcome = orchestrator.apply_preset("office").await.unwrap();
        assert_eq!(outcome, EditOutcome::Applied { cursor: 2 });
        assert_eq!(orchestrator.current_image().await.unwrap().bytes, vec![9]);

        let events = drain(&mut rx);
        assert_eq!(busy_idle(&events), (1, 1));
        assert!(matches!(events.first(), Some(SessionEvent::Busy { label, .. }) if label == "Applying Office Background..."));
        assert!(matches!(events.last(), Some(SessionEvent::Idle { .. })));
        assert!(!orchestrator.activity().busy);
    }

    #[tokio::test]
    async fn test_edit_failure_leaves_history_untouched() {
        let (generator, orchestrator) = setup();
        orchestrator.upload(png(4, 4)).await.unwrap();
        orchestrator.apply_custom("first").await.unwrap();
        orchestrator.undo().await;
        let before = orchestrator.snapshot().await;
        let mut rx = orchestrator.subscribe();

        generator.push(Err(GeneratorError::NetworkError("connection reset".into())));
        let err = orchestrator.apply_custom("second").await.unwrap_err();
        assert_eq!(err.to_string(), EDIT_FAILED);

        let after = orchestrator.snapshot().await;
        assert_eq!(after.cursor, before.cursor);
        assert_eq!(after.entries.len(), before.entries.len());
        for (a, b) in after.entries.iter().zip(&before.entries) {
            assert!(Arc::ptr_eq(a, b));
        }

        let events = drain(&mut rx);
        assert_eq!(busy_idle(&events), (1, 1));
        assert!(!events.iter().any(|e| matches!(e, SessionEvent::HistoryChanged { .. })));
        assert_eq!(orchestrator.notice().await.as_deref(), Some(EDIT_FAILED));
        assert!(!orchestrator.activity().busy);

        orchestrator.dismiss_error().await;
        assert!(orchestrator.notice().await.is_none());
    }

    #[tokio::test]
    async fn test_edit_without_image_or_instruction() {
        let (generator, orchestrator) = setup();
        assert!(matches!(
            orchestrator.apply_custom("anything").await,
            Err(EditError::NoImage)
        ));
        assert!(matches!(
            orchestrator.apply_custom("   ").await,
            Err(EditError::EmptyInstruction)
        ));
        assert!(matches!(
            orchestrator.apply_preset("missing").await,
            Err(EditError::UnknownPreset(_))
        ));
        assert!(generator.requests().is_empty());
        assert!(!orchestrator.activity().busy);
    }

    #[tokio::test]
    async fn test_style_reference_augments_request() {
        let (generator, orchestrator) = setup();
        orchestrator.upload(png(4, 4)).await.unwrap();

        assert!(matches!(
            orchestrator.apply_style_reference().await,
            Err(EditError::NoStyleReference)
        ));

        orchestrator.set_style_reference(png(2, 2)).await.unwrap();
        let reference = orchestrator.style_reference().await.unwrap();
        orchestrator.apply_color_temperature(4000).await.unwrap();

        let request = generator.requests().pop().unwrap();
        assert_eq!(request.images.len(), 2);
        assert!(Arc::ptr_eq(&request.images[0], &reference));
        assert!(request.instruction.contains("4000K"));
        assert!(request.instruction.ends_with(catalog::STYLE_REFERENCE_CLAUSE));

        orchestrator.apply_style_reference().await.unwrap();
        let request = generator.requests().pop().unwrap();
        assert!(request.instruction.starts_with(catalog::APPLY_STYLE_INSTRUCTION));

        orchestrator.clear_style_reference().await;
        orchestrator.apply_light_direction(90.0).await.unwrap();
        let request = generator.requests().pop().unwrap();
        assert_eq!(request.images.len(), 1);
        assert!(request.instruction.contains("from the right"));
    }

    #[tokio::test]
    async fn test_revert_to_original_detaches_reference() {
        let (generator, orchestrator) = setup();
        generator.push(Ok(tagged(1)));
        orchestrator.upload(png(4, 4)).await.unwrap();
        orchestrator.set_style_reference(png(2, 2)).await.unwrap();

        assert!(orchestrator.revert_to_original().await);
        assert!(orchestrator.style_reference().await.is_none());
        let snapshot = orchestrator.snapshot().await;
        assert!(Arc::ptr_eq(
            snapshot.current().unwrap(),
            snapshot.original.as_ref().unwrap()
        ));

        assert!(orchestrator.undo().await);
        assert_eq!(orchestrator.current_image().await.unwrap().bytes, vec![1]);
        assert!(orchestrator.redo().await);
        assert!(orchestrator.revert_to_auto().await);
        assert_eq!(orchestrator.current_image().await.unwrap().bytes, vec![1]);
        assert!(orchestrator.can_undo().await);
        assert!(!orchestrator.can_redo().await);
    }

    #[tokio::test]
    async fn test_outpaint_sends_extended_canvas() {
        let (generator, orchestrator) = setup();
        orchestrator.upload(png(4, 4)).await.unwrap();
        orchestrator.set_style_reference(png(2, 2)).await.unwrap();

        let frame = FrameSpec::new(
            Rect::new(-2.0, -2.0, 8.0, 8.0),
            Rect::new(0.0, 0.0, 4.0, 4.0),
            AspectRatio::Free,
        );
        let outcome = orchestrator.outpaint(&frame).await.unwrap();
        assert_eq!(outcome, EditOutcome::Applied { cursor: 2 });

        let request = generator.requests().pop().unwrap();
        assert_eq!(request.images.len(), 1);
        assert_eq!(request.instruction, catalog::OUTPAINT_INSTRUCTION);

        let canvas = raster::decode(request.target().unwrap()).unwrap().to_rgba8();
        assert_eq!(canvas.dimensions(), (8, 8));
        assert_eq!(canvas.get_pixel(0, 0)[3], 0);
        assert_eq!(canvas.get_pixel(3, 3)[3], 255);
    }

    #[tokio::test]
    async fn test_outpaint_rejects_degenerate_frame() {
        let (generator, orchestrator) = setup();
        orchestrator.upload(png(4, 4)).await.unwrap();
        let calls = generator.requests().len();

        let frame = FrameSpec::new(
            Rect::new(0.0, 0.0, 0.0, 8.0),
            Rect::new(0.0, 0.0, 4.0, 4.0),
            AspectRatio::Free,
        );
        let mut rx = orchestrator.subscribe();
        assert!(matches!(
            orchestrator.outpaint(&frame).await,
            Err(EditError::Geometry(_))
        ));
        assert_eq!(generator.requests().len(), calls);
        assert!(!orchestrator.activity().busy);
        assert_eq!(orchestrator.notice().await.as_deref(), Some(FRAME_FAILED));

        let events = drain(&mut rx);
        assert_eq!(busy_idle(&events), (1, 1));
        assert!(events.iter().any(
            |e| matches!(e, SessionEvent::Error { message, .. } if message == FRAME_FAILED)
        ));
    }

    #[tokio::test]
    async fn test_outpaint_rejects_oversized_canvas() {
        let (generator, orchestrator) = setup();
        orchestrator.upload(png(4, 4)).await.unwrap();
        let before = orchestrator.snapshot().await;
        let calls = generator.requests().len();

        let frame = FrameSpec::new(
            Rect::new(0.0, 0.0, 1e6, 1e6),
            Rect::new(0.0, 0.0, 0.001, 0.001),
            AspectRatio::Free,
        );
        assert!(matches!(
            orchestrator.outpaint(&frame).await,
            Err(EditError::Geometry(GeometryError::TooLarge { .. }))
        ));
        assert_eq!(generator.requests().len(), calls);
        assert_eq!(orchestrator.snapshot().await.cursor, before.cursor);
        assert_eq!(orchestrator.notice().await.as_deref(), Some(FRAME_FAILED));
        assert!(!orchestrator.activity().busy);
    }

    #[tokio::test]
    async fn test_concurrent_edit_rejected_and_stale_result_discarded() {
        let generator = Arc::new(ScriptedGenerator::new());
        let orchestrator = Arc::new(Orchestrator::new(StudioConfig::default(), generator.clone()));
        orchestrator.upload(png(4, 4)).await.unwrap();

        let gate = generator.hold_next();
        let task = {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move { orchestrator.apply_custom("slow edit").await })
        };
        generator.entered.notified().await;
        assert!(orchestrator.activity().busy);

        assert!(matches!(
            orchestrator.apply_custom("impatient").await,
            Err(EditError::Busy)
        ));

        let generation = orchestrator.reset().await;
        assert!(!orchestrator.activity().busy);

        gate.notify_one();
        let outcome = task.await.unwrap().unwrap();
        assert_eq!(outcome, EditOutcome::Discarded);
        assert!(orchestrator.snapshot().await.is_empty());
        assert_eq!(orchestrator.activity(), Activity::idle(generation));
    }

    #[tokio::test]
    async fn test_superseded_auto_transform_failure_leaves_new_session() {
        let generator = Arc::new(ScriptedGenerator::new());
        let orchestrator = Arc::new(Orchestrator::new(StudioConfig::default(), generator.clone()));
        // second upload completes first, then the held first call fails
        generator.push(Ok(tagged(2)));
        generator.push(Err(GeneratorError::NetworkError("timed out".into())));

        let gate = generator.hold_next();
        let first = {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move { orchestrator.upload(png(4, 4)).await })
        };
        generator.entered.notified().await;

        let second = orchestrator.upload(png(6, 6)).await.unwrap();
        assert_eq!(second, EditOutcome::Applied { cursor: 1 });

        gate.notify_one();
        assert_eq!(first.await.unwrap().unwrap(), EditOutcome::Discarded);

        let snapshot = orchestrator.snapshot().await;
        assert_eq!(snapshot.entries.len(), 2);
        assert_eq!(snapshot.cursor, Some(1));
        assert_eq!(snapshot.current().unwrap().bytes, vec![2]);
        assert!(orchestrator.notice().await.is_none());
        assert!(!orchestrator.activity().busy);
    }

    #[tokio::test]
    async fn test_superseded_auto_transform_success_is_dropped() {
        let generator = Arc::new(ScriptedGenerator::new());
        let orchestrator = Arc::new(Orchestrator::new(StudioConfig::default(), generator.clone()));
        generator.push(Ok(tagged(1)));

        let gate = generator.hold_next();
        let first = {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move { orchestrator.upload(png(4, 4)).await })
        };
        generator.entered.notified().await;

        let generation = orchestrator.reset().await;
        gate.notify_one();
        assert_eq!(first.await.unwrap().unwrap(), EditOutcome::Discarded);

        assert!(orchestrator.snapshot().await.is_empty());
        assert_eq!(orchestrator.activity(), Activity::idle(generation));

        // the session is usable again
        orchestrator.upload(png(4, 4)).await.unwrap();
        assert_eq!(orchestrator.snapshot().await.entries.len(), 2);
    }

    #[test]
    fn test_history_errors_keep_their_meaning() {
        let err = EditError::from(HistoryError::AlreadyInitialized);
        assert!(matches!(err, EditError::History(HistoryError::AlreadyInitialized)));
        assert!(!matches!(err, EditError::Busy));
        assert!(err.to_string().contains("reset first"));
    }

    #[tokio::test]
    async fn test_download_names_current_image() {
        let (_, orchestrator) = setup();
        assert!(orchestrator.download().await.is_none());
        orchestrator.upload(png(4, 4)).await.unwrap();

        let download = orchestrator.download().await.unwrap();
        assert!(download.file_name.starts_with("SnazzyHeadshot_"));
        assert!(download.file_name.ends_with(".png"));
        assert!(!download.bytes().is_empty());
    }
}
