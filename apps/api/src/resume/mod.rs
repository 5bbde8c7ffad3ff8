// Resume composition, achievement review and PDF rendering.

pub mod content;
pub mod handlers;
pub mod render;
pub mod validation;

pub use content::{compose_resume, ResumeContent};
pub use render::{render_pdf, RenderError};
