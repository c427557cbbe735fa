// Frame geometry - interactive crop frame over a pannable image, mapped to native pixels

use std::fmt;
use std::str::FromStr;

/// Smallest frame edge in display pixels
pub const MIN_FRAME_SIZE: f64 = 50.0;

/// Largest outpaint canvas, in native pixels
pub const MAX_CANVAS_PIXELS: f64 = 64.0 * 1024.0 * 1024.0;

/// Share of the container the image occupies on its limiting axis when framing starts
const FIT_FACTOR: f64 = 0.8;

/// Axis-aligned rectangle in display coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Drag handles on the frame outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
        ResizeHandle::Top,
        ResizeHandle::Bottom,
        ResizeHandle::Left,
        ResizeHandle::Right,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeHandle::Top => "top",
            ResizeHandle::Bottom => "bottom",
            ResizeHandle::Left => "left",
            ResizeHandle::Right => "right",
            ResizeHandle::TopLeft => "top-left",
            ResizeHandle::TopRight => "top-right",
            ResizeHandle::BottomLeft => "bottom-left",
            ResizeHandle::BottomRight => "bottom-right",
        }
    }

    fn moves_top(&self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    fn moves_bottom(&self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }

    fn moves_left(&self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    fn moves_right(&self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    fn is_horizontal(&self) -> bool {
        self.moves_left() || self.moves_right()
    }

    fn is_vertical(&self) -> bool {
        self.moves_top() || self.moves_bottom()
    }
}

impl FromStr for ResizeHandle {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeHandle::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| GeometryError::UnknownHandle(s.to_string()))
    }
}

/// Frame aspect-ratio constraint, expressed as width / height
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AspectRatio {
    Free,
    Fixed(f64),
}

impl AspectRatio {
    /// Ratios offered by the framing tool, in display order
    pub const PRESETS: [(&'static str, AspectRatio); 8] = [
        ("Custom", AspectRatio::Free),
        ("1:1", AspectRatio::Fixed(1.0)),
        ("3:4", AspectRatio::Fixed(3.0 / 4.0)),
        ("2:3", AspectRatio::Fixed(2.0 / 3.0)),
        ("4:3", AspectRatio::Fixed(4.0 / 3.0)),
        ("3:2", AspectRatio::Fixed(3.0 / 2.0)),
        ("16:9", AspectRatio::Fixed(16.0 / 9.0)),
        ("9:16", AspectRatio::Fixed(9.0 / 16.0)),
    ];

    pub fn value(&self) -> Option<f64> {
        match self {
            AspectRatio::Free => None,
            AspectRatio::Fixed(r) => Some(*r),
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Fixed(3.0 / 4.0)
    }
}

impl FromStr for AspectRatio {
    type Err = GeometryError;

    /// Accepts `Custom`/`free` or `W:H` with positive terms
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("custom") || s.eq_ignore_ascii_case("free") {
            return Ok(AspectRatio::Free);
        }
        let invalid = || GeometryError::InvalidRatio(s.to_string());
        let (w, h) = s.split_once(':').ok_or_else(invalid)?;
        let w: f64 = w.trim().parse().map_err(|_| invalid())?;
        let h: f64 = h.trim().parse().map_err(|_| invalid())?;
        if !(w > 0.0 && h > 0.0) || !w.is_finite() || !h.is_finite() {
            return Err(invalid());
        }
        Ok(AspectRatio::Fixed(w / h))
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectRatio::Free => write!(f, "Custom"),
            AspectRatio::Fixed(r) => {
                match AspectRatio::PRESETS
                    .iter()
                    .find(|(_, p)| matches!(p, AspectRatio::Fixed(v) if (v - r).abs() < 1e-9))
                {
                    Some((name, _)) => write!(f, "{}", name),
                    None => write!(f, "{:.4}", r),
                }
            }
        }
    }
}

/// Region of the outpaint canvas, in native image pixels.
///
/// `width`/`height` size the canvas; `left`/`top` is where the image's own
/// origin lands on it. Either offset may be negative (the frame starts inside
/// the image) or larger than the image (the frame extends past it).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeRegion {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl NativeRegion {
    /// Canvas size in whole pixels, never below one
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.width.round().max(1.0) as u32,
            self.height.round().max(1.0) as u32,
        )
    }

    /// Image offset on the canvas in whole pixels
    pub fn image_offset(&self) -> (i64, i64) {
        (self.left.round() as i64, self.top.round() as i64)
    }

    /// True when some part of the canvas lies outside the image and needs synthesis
    pub fn needs_fill(&self, native_width: u32, native_height: u32) -> bool {
        self.left > 0.0
            || self.top > 0.0
            || self.left + (native_width as f64) < self.width
            || self.top + (native_height as f64) < self.height
    }
}

/// Map the frame onto the image's native resolution.
///
/// The scale is uniform and taken from the horizontal axis.
pub fn native_region(
    frame: &Rect,
    placement: &Rect,
    native_width: u32,
    native_height: u32,
) -> Result<NativeRegion, GeometryError> {
    if frame.is_degenerate() {
        return Err(GeometryError::Degenerate("frame"));
    }
    if placement.is_degenerate() {
        return Err(GeometryError::Degenerate("image placement"));
    }
    if native_width == 0 || native_height == 0 {
        return Err(GeometryError::Degenerate("native image"));
    }

    let scale = native_width as f64 / placement.width;
    let region = NativeRegion {
        left: (placement.x - frame.x) * scale,
        top: (placement.y - frame.y) * scale,
        width: frame.width * scale,
        height: frame.height * scale,
    };

    let pixels = region.width.round().max(1.0) * region.height.round().max(1.0);
    if !(pixels <= MAX_CANVAS_PIXELS && region.left.is_finite() && region.top.is_finite()) {
        return Err(GeometryError::TooLarge {
            width: region.width,
            height: region.height,
        });
    }
    Ok(region)
}

/// Resize `start` by a cumulative pointer delta on one handle.
///
/// The edges opposite the handle stay put. Both sides are clamped to
/// [`MIN_FRAME_SIZE`] before the ratio is applied. With a fixed ratio, edge
/// handles drive their own axis and corners follow whichever axis moved more.
pub fn resize_frame(start: &Rect, handle: ResizeHandle, dx: f64, dy: f64, ratio: AspectRatio) -> Rect {
    let mut width = start.width;
    let mut height = start.height;

    if handle.moves_right() {
        width += dx;
    }
    if handle.moves_left() {
        width -= dx;
    }
    if handle.moves_bottom() {
        height += dy;
    }
    if handle.moves_top() {
        height -= dy;
    }

    width = width.max(MIN_FRAME_SIZE);
    height = height.max(MIN_FRAME_SIZE);

    if let Some(r) = ratio.value() {
        let width_drives = match (handle.is_horizontal(), handle.is_vertical()) {
            (true, false) => true,
            (false, true) => false,
            _ => dx.abs() >= dy.abs(),
        };
        if width_drives {
            height = width / r;
            if height < MIN_FRAME_SIZE {
                height = MIN_FRAME_SIZE;
                width = height * r;
            }
        } else {
            width = height * r;
            if width < MIN_FRAME_SIZE {
                width = MIN_FRAME_SIZE;
                height = width / r;
            }
        }
    }

    let x = if handle.moves_left() {
        start.right() - width
    } else {
        start.x
    };
    let y = if handle.moves_top() {
        start.bottom() - height
    } else {
        start.y
    };

    Rect::new(x, y, width, height)
}

/// What a pointer drag is manipulating
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragTarget {
    Frame(ResizeHandle),
    Image,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    target: DragTarget,
    pointer: (f64, f64),
    frame: Rect,
    placement: Rect,
}

/// Live state of one framing interaction
#[derive(Debug, Clone)]
pub struct FrameSpec {
    frame: Rect,
    placement: Rect,
    ratio: AspectRatio,
    drag: Option<Drag>,
}

impl FrameSpec {
    pub fn new(frame: Rect, placement: Rect, ratio: AspectRatio) -> Self {
        Self {
            frame,
            placement,
            ratio,
            drag: None,
        }
    }

    /// Centre the image in a container at 80% of its limiting axis.
    ///
    /// The frame starts on top of the image and then takes on the ratio.
    pub fn fit(
        container_width: f64,
        container_height: f64,
        native_width: u32,
        native_height: u32,
        ratio: AspectRatio,
    ) -> Result<Self, GeometryError> {
        if !(container_width > 0.0 && container_height > 0.0) {
            return Err(GeometryError::Degenerate("container"));
        }
        if native_width == 0 || native_height == 0 {
            return Err(GeometryError::Degenerate("native image"));
        }

        let image_ratio = native_width as f64 / native_height as f64;
        let (width, height) = if container_width / container_height > image_ratio {
            let height = container_height * FIT_FACTOR;
            (height * image_ratio, height)
        } else {
            let width = container_width * FIT_FACTOR;
            (width, width / image_ratio)
        };
        let placement = Rect::new(
            (container_width - width) / 2.0,
            (container_height - height) / 2.0,
            width,
            height,
        );

        let frame = Rect::new(
            placement.x,
            placement.y,
            width.max(MIN_FRAME_SIZE),
            height.max(MIN_FRAME_SIZE),
        );
        let mut spec = Self::new(frame, placement, AspectRatio::Free);
        spec.set_aspect_ratio(ratio);
        Ok(spec)
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn placement(&self) -> Rect {
        self.placement
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.ratio
    }

    /// Switch the ratio constraint; a fixed ratio re-derives the frame height.
    ///
    /// Neither side ends up below [`MIN_FRAME_SIZE`]: a height that would is
    /// clamped and the width re-derived from it.
    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) {
        self.ratio = ratio;
        if let Some(r) = ratio.value() {
            let width = self.frame.width.max(MIN_FRAME_SIZE);
            let height = width / r;
            if height < MIN_FRAME_SIZE {
                self.frame.height = MIN_FRAME_SIZE;
                self.frame.width = MIN_FRAME_SIZE * r;
            } else {
                self.frame.width = width;
                self.frame.height = height;
            }
        }
    }

    pub fn begin_drag(&mut self, target: DragTarget, pointer_x: f64, pointer_y: f64) {
        self.drag = Some(Drag {
            target,
            pointer: (pointer_x, pointer_y),
            frame: self.frame,
            placement: self.placement,
        });
    }

    /// Apply the pointer position relative to where the drag began
    pub fn drag_to(&mut self, pointer_x: f64, pointer_y: f64) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let dx = pointer_x - drag.pointer.0;
        let dy = pointer_y - drag.pointer.1;

        match drag.target {
            DragTarget::Frame(handle) => {
                self.frame = resize_frame(&drag.frame, handle, dx, dy, self.ratio);
            }
            DragTarget::Image => {
                self.placement.x = drag.placement.x + dx;
                self.placement.y = drag.placement.y + dy;
            }
        }
        true
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn native_region(&self, native_width: u32, native_height: u32) -> Result<NativeRegion, GeometryError> {
        native_region(&self.frame, &self.placement, native_width, native_height)
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GeometryError {
    #[error("Degenerate {0}: width and height must be positive")]
    Degenerate(&'static str),

    #[error("Unknown resize handle: {0}")]
    UnknownHandle(String),

    #[error("Invalid aspect ratio: {0}")]
    InvalidRatio(String),

    #[error("Frame too large: {width:.0}x{height:.0} px exceeds the outpaint canvas limit")]
    TooLarge { width: f64, height: f64 },
}
