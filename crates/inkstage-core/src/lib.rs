//! Inkstage Core Library
//!
//! Editing engine for a 2D design canvas: an immutable element model, shape
//! geometry, alignment snapping, pointer tools and undo/redo history. Hosts
//! feed document-space pointer events in and draw [`Canvas::render_list`].

pub mod canvas;
pub mod config;
pub mod editor;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod history;
pub mod selection;
pub mod snap;
pub mod tools;

pub use canvas::{Canvas, CanvasDocument, Elements, ToolSession};
pub use config::EngineConfig;
pub use editor::{Editor, EditorEvent};
pub use elements::{
    Element, ElementFamily, ElementId, ElementKind, ElementPatch, ElementState, SerializableColor,
};
pub use error::{EngineError, EngineResult};
pub use geometry::{Outline, PathCommand, PathData};
pub use history::History;
pub use selection::{Handle, HandleKind, ResizeTransform, apply_resize_transform};
pub use snap::{Guideline, GuidelineKind, SnapResult, SnapTarget, compute_snap};
pub use tools::{DrawingStyle, ToolHandler, ToolKind};
