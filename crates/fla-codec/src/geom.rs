pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Transform = euclid::Transform2D<f64, Unit, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

/// Builds an affine transform from the `(a, b, c, d, tx, ty)` parameters used by XFL `<Matrix>`.
pub fn matrix(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Transform {
    Transform::new(a, b, c, d, tx, ty)
}
