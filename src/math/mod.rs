mod vector;
mod bounds;
mod transform;

pub use vector::Vector2;
pub use bounds::Bounds2;
pub use transform::{
    ModelViewTransform, DEFAULT_ZOOM_LEVEL, MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL, STAGE_HEIGHT,
    STAGE_WIDTH,
};

/// Constant for a very small number, used for comparisons
pub const EPSILON: f64 = 1.0e-9;

/// Returns true if the value is approximately zero
#[inline]
pub fn approx_zero(a: f64) -> bool {
    a.abs() < EPSILON
}
