#![forbid(unsafe_code)]

pub mod colorspace;
pub mod core;
pub mod dsl;
pub mod engine;
pub mod error;
pub mod loader;
pub mod model;
pub mod page;
pub mod scene;
pub mod svg;

pub use colorspace::Encoding;
pub use self::core::{GridShape, Point, Rect, Rgb8, Size};
pub use dsl::{ColorTableBuilder, VersionChartBuilder};
pub use engine::render;
pub use error::{PatchgridError, PatchgridResult};
pub use model::{ColorEntry, ColorTable, DisplayConfig, VersionChart};
pub use scene::{Annotation, Scene, Shape};
