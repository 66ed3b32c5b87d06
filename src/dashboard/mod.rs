pub mod context;
pub mod generator;
pub mod template;

pub use context::RenderContext;
pub use generator::{DashboardGenerator, DashboardPaths, GenerationReport};
pub use template::Template;
