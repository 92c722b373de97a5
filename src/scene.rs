use crate::core::{Point, Rect, Rgb8, Size};

/// Rendering-agnostic output of the layout engine: positioned, colored
/// squares plus optional text annotations, computed fresh per request.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Figure dimensions after uniform screen_ratio scaling.
    pub figure: Size,
    /// Dimensions of the local (unscaled) coordinate frame all shapes
    /// live in: cols x patch_size by rows x patch_size.
    pub frame: Size,
    pub shapes: Vec<Shape>,
    pub annotations: Vec<Annotation>,
}

/// One filled square in the local frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    pub patch_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Top-left corner.
    pub origin: Point,
    pub side: f64,
    pub fill: Rgb8,
}

impl Shape {
    /// The occupied square as a rect in the local frame.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.side,
            self.origin.y + self.side,
        )
    }
}

/// Text centered in one patch, in a color legible against its fill.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Annotation {
    pub center: Point,
    pub text: String,
    pub color: Rgb8,
}
