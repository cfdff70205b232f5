use crate::coords::Vec2;
use crate::native::NativeValue;

/// 2×3 affine matrix `[a, b, c, d, e, f]`:
///
/// - `x' = a·x + c·y + e`
/// - `y' = b·x + d·y + f`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::identity()
    }
}

impl Matrix {
    pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Clockwise in the y-down user space; `degrees` as in SVG.
    pub fn rotate(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Rotation about `(cx, cy)`.
    pub fn rotate_about(degrees: f32, cx: f32, cy: f32) -> Self {
        Matrix::translate(cx, cy)
            .multiply(&Matrix::rotate(degrees))
            .multiply(&Matrix::translate(-cx, -cy))
    }

    /// Shear by `x_deg` along X and `y_deg` along Y.
    pub fn skew(x_deg: f32, y_deg: f32) -> Self {
        Self::new(1.0, y_deg.to_radians().tan(), x_deg.to_radians().tan(), 1.0, 0.0, 0.0)
    }

    /// `self · rhs`: `rhs` is applied first.
    pub fn multiply(&self, rhs: &Matrix) -> Matrix {
        Matrix {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            e: self.a * rhs.e + self.c * rhs.f + self.e,
            f: self.b * rhs.e + self.d * rhs.f + self.f,
        }
    }

    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(self.a * p.x + self.c * p.y + self.e, self.b * p.x + self.d * p.y + self.f)
    }

    pub fn to_array(&self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    pub fn to_native(&self) -> NativeValue {
        NativeValue::numbers(self.to_array())
    }
}
