/// Bounding box of the element a paint server is applied to, handed to
/// paint generators at resolve time.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}
