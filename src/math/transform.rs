use nalgebra as na;

use crate::error::PhysicsError;
use crate::math::{Bounds2, Vector2};
use crate::Result;

/// Width of the fixed stage rectangle, in view units
pub const STAGE_WIDTH: f64 = 1024.0;

/// Height of the fixed stage rectangle, in view units
pub const STAGE_HEIGHT: f64 = 618.0;

/// Smallest selectable zoom level
pub const MIN_ZOOM_LEVEL: i32 = 1;

/// Largest selectable zoom level
pub const MAX_ZOOM_LEVEL: i32 = 6;

/// Zoom level at which a scene shows its default framing
pub const DEFAULT_ZOOM_LEVEL: i32 = 4;

/// View units per meter at a zoom scale of 1
const BASE_VIEW_UNITS_PER_METER: f64 = 1.5e-9;

/// Affine map between model space (meters, +y up) and the stage (+y down).
///
/// The stage center always shows `center`; each zoom level doubles or halves
/// the scale relative to the scene's default framing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelViewTransform {
    matrix: na::Matrix3<f64>,
    inverse: na::Matrix3<f64>,
    scale: f64,
}

impl ModelViewTransform {
    /// Builds the transform for a scene's default zoom scale at a given zoom level
    pub fn for_zoom(default_zoom_scale: f64, center: Vector2, zoom_level: i32) -> Result<Self> {
        if !(MIN_ZOOM_LEVEL..=MAX_ZOOM_LEVEL).contains(&zoom_level) {
            return Err(PhysicsError::InvalidParameter(format!(
                "zoom level {} outside {}..={}",
                zoom_level, MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL
            )));
        }
        let factor = 2f64.powi(zoom_level - DEFAULT_ZOOM_LEVEL);
        Self::from_scale(default_zoom_scale * BASE_VIEW_UNITS_PER_METER * factor, center)
    }

    /// Builds a transform with an explicit scale in view units per meter
    pub fn from_scale(scale: f64, center: Vector2) -> Result<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "transform scale must be positive and finite, got {}",
                scale
            )));
        }

        #[rustfmt::skip]
        let matrix = na::Matrix3::new(
            scale, 0.0,    STAGE_WIDTH * 0.5 - scale * center.x,
            0.0,   -scale, STAGE_HEIGHT * 0.5 + scale * center.y,
            0.0,   0.0,    1.0,
        );
        let inverse = matrix.try_inverse().ok_or_else(|| {
            PhysicsError::InvalidParameter("model-view matrix is not invertible".to_string())
        })?;

        Ok(Self { matrix, inverse, scale })
    }

    /// View units per meter
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Maps a model-space point onto the stage
    pub fn model_to_view(&self, point: Vector2) -> Vector2 {
        let p = self.matrix.transform_point(&na::Point2::new(point.x, point.y));
        Vector2::new(p.x, p.y)
    }

    /// Maps a stage point back into model space
    pub fn view_to_model(&self, point: Vector2) -> Vector2 {
        let p = self.inverse.transform_point(&na::Point2::new(point.x, point.y));
        Vector2::new(p.x, p.y)
    }

    /// Maps a model-space displacement (no translation) onto the stage
    pub fn model_to_view_delta(&self, delta: Vector2) -> Vector2 {
        Vector2::from_nalgebra(&self.matrix.transform_vector(&delta.to_nalgebra()))
    }

    /// Maps a stage displacement back into model space
    pub fn view_to_model_delta(&self, delta: Vector2) -> Vector2 {
        Vector2::from_nalgebra(&self.inverse.transform_vector(&delta.to_nalgebra()))
    }

    /// Converts a model-space length (e.g. a radius) into view units
    #[inline]
    pub fn model_to_view_distance(&self, distance: f64) -> f64 {
        distance * self.scale
    }

    /// The model-space rectangle currently covered by the stage
    pub fn model_bounds(&self) -> Bounds2 {
        Bounds2::from_corners(
            self.view_to_model(Vector2::new(0.0, 0.0)),
            self.view_to_model(Vector2::new(STAGE_WIDTH, STAGE_HEIGHT)),
        )
    }
}
