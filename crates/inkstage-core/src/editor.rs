//! Event entry point tying the canvas to the active tool handler.

use crate::canvas::Canvas;
use crate::config::EngineConfig;
use crate::tools::{ToolHandler, ToolKind, handler_for};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Input event, already converted to document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    DoubleClick(Point),
    Key { key: char, shift: bool },
}

/// A canvas plus the handler for its active tool.
///
/// The active tool can change outside a handler (through [`Editor::canvas_mut`])
/// or inside one (draw tools revert to select). The editor swaps in the
/// matching handler before and after every event.
pub struct Editor {
    canvas: Canvas,
    handler: Box<dyn ToolHandler>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("canvas", &self.canvas)
            .field("handler", &self.handler.kind())
            .finish()
    }
}

impl Editor {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_canvas(Canvas::new(config))
    }

    pub fn with_canvas(canvas: Canvas) -> Self {
        let handler = handler_for(canvas.active_tool());
        Self { canvas, handler }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }

    pub fn active_tool(&self) -> ToolKind {
        self.canvas.active_tool()
    }

    /// Activate a tool, abandoning any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.canvas.set_active_tool(tool);
        self.handler = handler_for(tool);
    }

    /// Dispatch one event. Returns false for unmapped keys.
    pub fn handle_event(&mut self, event: EditorEvent) -> bool {
        match event {
            EditorEvent::PointerDown(point) => self.pointer_down(point),
            EditorEvent::PointerMove(point) => self.pointer_move(point),
            EditorEvent::PointerUp(point) => self.pointer_up(point),
            EditorEvent::DoubleClick(point) => self.double_click(point),
            EditorEvent::Key { key, shift } => return self.key_down(key, shift),
        }
        true
    }

    pub fn pointer_down(&mut self, point: Point) {
        self.sync_handler();
        self.handler.on_pointer_down(&mut self.canvas, point);
        self.sync_handler();
    }

    pub fn pointer_move(&mut self, point: Point) {
        self.sync_handler();
        self.handler.on_pointer_move(&mut self.canvas, point);
        self.sync_handler();
    }

    pub fn pointer_up(&mut self, point: Point) {
        self.sync_handler();
        self.handler.on_pointer_up(&mut self.canvas, point);
        self.sync_handler();
    }

    pub fn double_click(&mut self, point: Point) {
        self.sync_handler();
        self.handler.on_double_click(&mut self.canvas, point);
        self.sync_handler();
    }

    /// Tool shortcut. Ignored while a text element is being edited.
    pub fn key_down(&mut self, key: char, shift: bool) -> bool {
        if self.canvas.elements().iter().any(|e| e.is_editing()) {
            return false;
        }
        match ToolKind::from_shortcut(key, shift) {
            Some(tool) => {
                self.set_tool(tool);
                true
            }
            None => false,
        }
    }

    pub fn undo(&mut self) -> bool {
        self.canvas.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.canvas.redo()
    }

    fn sync_handler(&mut self) {
        let tool = self.canvas.active_tool();
        if tool != self.handler.kind() {
            self.handler = handler_for(tool);
        }
    }
}
