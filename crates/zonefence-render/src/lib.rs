//! Rendering utilities for terminals and CI surfaces (console, Markdown, GitHub annotations).
//!
//! Renderers are pure: they take a [`RenderableReport`] and return text.

#![forbid(unsafe_code)]

mod console;
mod gha;
mod markdown;
mod model;

pub use console::render_console;
pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{RenderableData, RenderableReport, RenderableVerdictStatus, RenderableViolation};
