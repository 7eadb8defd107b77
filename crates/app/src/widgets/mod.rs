//! Reusable widgets for the upload step.

pub mod drag_drop;
pub mod file_picker;

pub use drag_drop::DragDropHandler;
pub use file_picker::{FileFilter, FilePickerWidget};
