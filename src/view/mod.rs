//! View layer: pure renderers, modal state, event bindings, and terminal
//! formatting of the rendered views.

pub mod bindings;
pub mod screen;
pub mod modal;
pub mod render;
pub mod text;

pub use bindings::*;
pub use screen::*;
pub use modal::*;
pub use render::*;
