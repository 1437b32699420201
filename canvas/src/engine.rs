use tracing::{debug, warn};
use web_sys::HtmlCanvasElement;

use crate::curve::Curve;
use crate::export::{ExportError, export_svg};
use crate::frame::{CanvasFrame, rescale};
use crate::geom::Point;
use crate::hit::{Hit, hit_test};
use crate::input::{Button, DragSession, DragTarget, InputState, Tool};
use crate::share::{ShareOutcome, ShareRejection, ShareTicket, ShareTracker};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The curve changed; the renderer should redraw from [`EngineCore::curve`].
    CurveChanged,
    /// A new interior anchor was inserted at `index`.
    AnchorInserted { index: usize },
    /// The interior anchor at `index` was removed.
    AnchorDeleted { index: usize },
    /// The host should show this CSS cursor over the canvas.
    SetCursor(String),
    /// Open this location for the user (a stored share).
    OpenLink(String),
    /// Show a recoverable, user-facing message.
    Notify(String),
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Last cursor sent to the host, so hover only reports changes.
    pub cursor: Option<String>,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub curve: Curve,
    pub frame: Option<CanvasFrame>,
    pub ui: UiState,
    pub input: InputState,
    pub share: ShareTracker,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine already sized to `frame`, holding the default curve.
    #[must_use]
    pub fn with_frame(frame: CanvasFrame) -> Self {
        let mut core = Self::new();
        core.on_frame_change(frame);
        core
    }

    // --- Frame ---

    /// The canvas changed size.
    ///
    /// The first frame seeds the default curve; later ones rescale the curve
    /// from the previous frame. Invalid sizes are ignored.
    pub fn on_frame_change(&mut self, frame: CanvasFrame) -> Vec<Action> {
        let frame = match CanvasFrame::new(frame.width_px, frame.height_px) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "ignoring invalid frame");
                return Vec::new();
            }
        };
        match self.frame {
            None => {
                self.curve = Curve::new_default(frame);
                debug!(width = frame.width_px, height = frame.height_px, "initial frame");
            }
            Some(previous) if previous == frame => return Vec::new(),
            Some(previous) => {
                rescale(&mut self.curve, previous, frame);
                debug!(width = frame.width_px, height = frame.height_px, "curve rescaled");
            }
        }
        self.frame = Some(frame);
        vec![Action::CurveChanged]
    }

    /// The size sliders moved. Values are clamped into the slider range.
    pub fn on_frame_change_inches(&mut self, width_in: f64, height_in: f64) -> Vec<Action> {
        match CanvasFrame::from_inches_clamped(width_in, height_in) {
            Ok(frame) => self.on_frame_change(frame),
            Err(e) => {
                warn!(error = %e, "ignoring invalid frame");
                Vec::new()
            }
        }
    }

    // --- Tool / reset ---

    /// Set the active tool.
    pub fn on_tool_mode_changed(&mut self, tool: Tool) -> Vec<Action> {
        self.ui.tool = tool;
        Vec::new()
    }

    /// Replace the curve with the default one for the current frame.
    pub fn on_reset_requested(&mut self) -> Vec<Action> {
        let frame = *self.frame.get_or_insert_with(CanvasFrame::default);
        self.curve = Curve::new_default(frame);
        self.input = InputState::Idle;
        vec![Action::CurveChanged]
    }

    // --- Pointer ---

    pub fn on_pointer_down(&mut self, pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        if let InputState::Dragging(session) = self.input {
            // Single-pointer model: a stray second press never steals the drag.
            debug!(?session, "pointer-down while dragging ignored");
            return Vec::new();
        }
        let Some(hit) = hit_test(pt, &self.curve) else {
            return Vec::new();
        };
        match self.ui.tool {
            Tool::Add => self.press_add(hit),
            Tool::Delete => self.press_delete(hit),
        }
    }

    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        match self.input {
            InputState::Dragging(session) => {
                let moved = match session.target {
                    DragTarget::Anchor => self.curve.move_anchor(session.anchor_index, pt),
                    DragTarget::Handle(which) => self.curve.move_handle(session.anchor_index, which, pt),
                };
                if moved { vec![Action::CurveChanged] } else { Vec::new() }
            }
            InputState::Idle => self.hover(pt),
        }
    }

    pub fn on_pointer_up(&mut self, _pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.end_drag();
        Vec::new()
    }

    /// Pointer left the canvas or the gesture was cancelled; ends any drag.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_drag();
        Vec::new()
    }

    fn press_add(&mut self, hit: Hit) -> Vec<Action> {
        match hit {
            Hit::Anchor { index } => {
                self.input = InputState::Dragging(DragSession { anchor_index: index, target: DragTarget::Anchor });
                Vec::new()
            }
            Hit::Handle { index, which } => {
                self.input =
                    InputState::Dragging(DragSession { anchor_index: index, target: DragTarget::Handle(which) });
                Vec::new()
            }
            Hit::Curve(on_curve) => {
                let Some(index) = self.curve.insert_anchor(on_curve.segment, on_curve.point) else {
                    return Vec::new();
                };
                debug!(index, segment = on_curve.segment, "anchor inserted");
                self.input = InputState::Dragging(DragSession { anchor_index: index, target: DragTarget::Anchor });
                vec![Action::AnchorInserted { index }, Action::CurveChanged]
            }
        }
    }

    fn press_delete(&mut self, hit: Hit) -> Vec<Action> {
        let Hit::Anchor { index } = hit else {
            return Vec::new();
        };
        if !self.curve.delete_anchor(index) {
            return Vec::new();
        }
        debug!(index, "anchor deleted");
        vec![Action::AnchorDeleted { index }, Action::CurveChanged]
    }

    fn end_drag(&mut self) {
        if let InputState::Dragging(session) = self.input {
            debug!(?session, "drag ended");
        }
        self.input = InputState::Idle;
    }

    fn hover(&mut self, pt: Point) -> Vec<Action> {
        let cursor = match (hit_test(pt, &self.curve), self.ui.tool) {
            (Some(Hit::Anchor { .. } | Hit::Handle { .. }), Tool::Add) => "grab",
            (Some(Hit::Curve(_)), Tool::Add) => "crosshair",
            (Some(Hit::Anchor { index }), Tool::Delete) => {
                if self.curve.anchor(index).is_some_and(|a| a.is_endpoint) { "not-allowed" } else { "pointer" }
            }
            _ => "default",
        };
        if self.ui.cursor.as_deref() == Some(cursor) {
            return Vec::new();
        }
        self.ui.cursor = Some(cursor.to_string());
        vec![Action::SetCursor(cursor.to_string())]
    }

    // --- Export / share ---

    /// Validate and serialize the current curve.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] when there is no frame or curve yet, or when
    /// the curve crosses itself.
    pub fn on_export_requested(&self) -> Result<String, ExportError> {
        let Some(frame) = self.frame else {
            return Err(ExportError::InsufficientAnchors { count: self.curve.len() });
        };
        export_svg(&self.curve, frame).inspect_err(|e| warn!(error = %e, "export declined"))
    }

    /// Export a snapshot for sharing and mark a share in flight.
    ///
    /// # Errors
    ///
    /// Returns a [`ShareRejection`] if the export is declined or a previous
    /// share has not completed yet.
    pub fn on_share_requested(&mut self) -> Result<ShareTicket, ShareRejection> {
        if let Some(seq) = self.share.in_flight() {
            return Err(ShareRejection::InFlight { seq });
        }
        let svg = self.on_export_requested()?;
        let ticket = self.share.begin(svg)?;
        debug!(seq = ticket.seq, bytes = ticket.svg.len(), "share started");
        Ok(ticket)
    }

    /// The host finished the storage call for ticket `seq`.
    ///
    /// The curve is not touched. Completions for unknown tickets are dropped.
    pub fn on_share_completed(&mut self, seq: u64, outcome: ShareOutcome) -> Vec<Action> {
        if !self.share.finish(seq) {
            debug!(seq, "stale share completion ignored");
            return Vec::new();
        }
        match outcome {
            ShareOutcome::Stored { url } => vec![Action::OpenLink(url)],
            ShareOutcome::Failed { reason } => {
                warn!(seq, %reason, "share failed");
                vec![Action::Notify("Sharing failed. Check your connection and try again.".to_string())]
            }
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    #[must_use]
    pub fn frame(&self) -> Option<CanvasFrame> {
        self.frame
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    /// The active drag session, if any.
    #[must_use]
    pub fn drag(&self) -> Option<DragSession> {
        self.input.session()
    }

    /// The curve as JSON, for renderers on the host side.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.curve)
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
///
/// Pointer coordinates arrive in client space and are converted through the
/// element's bounding rectangle. The element is resized whenever the frame
/// changes; drawing stays with the host's renderer.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element, at the default frame.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let engine = Self { canvas, core: EngineCore::with_frame(CanvasFrame::default()) };
        engine.sync_canvas_size();
        engine
    }

    fn to_canvas(&self, client_x: f64, client_y: f64) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        Point::new(client_x - rect.left(), client_y - rect.top())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sync_canvas_size(&self) {
        if let Some(frame) = self.core.frame() {
            self.canvas.set_width(frame.width_px.round() as u32);
            self.canvas.set_height(frame.height_px.round() as u32);
        }
    }

    // --- Delegated inputs ---

    pub fn on_frame_change(&mut self, frame: CanvasFrame) -> Vec<Action> {
        let actions = self.core.on_frame_change(frame);
        self.sync_canvas_size();
        actions
    }

    pub fn on_frame_change_inches(&mut self, width_in: f64, height_in: f64) -> Vec<Action> {
        let actions = self.core.on_frame_change_inches(width_in, height_in);
        self.sync_canvas_size();
        actions
    }

    pub fn on_tool_mode_changed(&mut self, tool: Tool) -> Vec<Action> {
        self.core.on_tool_mode_changed(tool)
    }

    pub fn on_reset_requested(&mut self) -> Vec<Action> {
        self.core.on_reset_requested()
    }

    pub fn on_pointer_down(&mut self, client_x: f64, client_y: f64, button: Button) -> Vec<Action> {
        let pt = self.to_canvas(client_x, client_y);
        self.core.on_pointer_down(pt, button)
    }

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) -> Vec<Action> {
        let pt = self.to_canvas(client_x, client_y);
        self.core.on_pointer_move(pt)
    }

    pub fn on_pointer_up(&mut self, client_x: f64, client_y: f64, button: Button) -> Vec<Action> {
        let pt = self.to_canvas(client_x, client_y);
        self.core.on_pointer_up(pt, button)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    /// # Errors
    ///
    /// See [`EngineCore::on_export_requested`].
    pub fn on_export_requested(&self) -> Result<String, ExportError> {
        self.core.on_export_requested()
    }

    /// # Errors
    ///
    /// See [`EngineCore::on_share_requested`].
    pub fn on_share_requested(&mut self) -> Result<ShareTicket, ShareRejection> {
        self.core.on_share_requested()
    }

    pub fn on_share_completed(&mut self, seq: u64, outcome: ShareOutcome) -> Vec<Action> {
        self.core.on_share_completed(seq, outcome)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn curve(&self) -> &Curve {
        self.core.curve()
    }

    #[must_use]
    pub fn frame(&self) -> Option<CanvasFrame> {
        self.core.frame()
    }

    /// # Errors
    ///
    /// See [`EngineCore::snapshot_json`].
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        self.core.snapshot_json()
    }
}
