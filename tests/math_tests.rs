use orbit_sim::math::{
    Bounds2, ModelViewTransform, Vector2, DEFAULT_ZOOM_LEVEL, MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL,
    STAGE_HEIGHT, STAGE_WIDTH,
};
use std::f64::consts::PI;
use approx::assert_relative_eq;

#[test]
fn test_vector2_operations() {
    let v1 = Vector2::new(3.0, 4.0);
    let v2 = Vector2::new(-1.0, 2.0);

    assert_eq!(v1 + v2, Vector2::new(2.0, 6.0));
    assert_eq!(v1 - v2, Vector2::new(4.0, 2.0));
    assert_eq!(v1 * 2.0, Vector2::new(6.0, 8.0));
    assert_eq!(2.0 * v1, v1 * 2.0);
    assert_eq!(-v1, Vector2::new(-3.0, -4.0));

    assert_eq!(v1.dot(&v2), 5.0);
    assert_eq!(v1.cross(&v2), 10.0);
    assert_eq!(v1.length(), 5.0);
    assert_eq!(v1.distance(&Vector2::ZERO), 5.0);

    let normalized = v1.normalize();
    assert_relative_eq!(normalized.length(), 1.0);
    assert_relative_eq!(normalized, Vector2::new(0.6, 0.8));

    // too short to have a direction
    assert!(Vector2::ZERO.normalize().is_zero());

    let sum: Vector2 = vec![v1, v2, Vector2::new(1.0, 1.0)].into_iter().sum();
    assert_eq!(sum, Vector2::new(3.0, 7.0));
}

#[test]
fn test_vector2_polar() {
    let v = Vector2::from_polar(2.0, PI / 2.0);
    assert_relative_eq!(v, Vector2::new(0.0, 2.0), epsilon = 1e-12);
    assert_relative_eq!(v.angle(), PI / 2.0);

    let perpendicular = v.perpendicular();
    assert_relative_eq!(perpendicular.dot(&v), 0.0, epsilon = 1e-12);
    assert!(!Vector2::new(f64::NAN, 0.0).is_finite());
}

#[test]
fn test_bounds() {
    let bounds = Bounds2::from_corners(Vector2::new(4.0, -1.0), Vector2::new(-2.0, 3.0));
    assert_eq!(bounds.min, Vector2::new(-2.0, -1.0));
    assert_eq!(bounds.max, Vector2::new(4.0, 3.0));
    assert_eq!(bounds.center(), Vector2::new(1.0, 1.0));
    assert!(bounds.contains_point(Vector2::new(4.0, 3.0)));
    assert!(!bounds.contains_point(Vector2::new(4.5, 0.0)));
    assert!(bounds.dilated(1.0).contains_point(Vector2::new(4.5, 0.0)));
}

#[test]
fn test_transform_centers_and_flips() {
    let transform = ModelViewTransform::for_zoom(1.25, Vector2::ZERO, DEFAULT_ZOOM_LEVEL).unwrap();
    let scale = transform.scale();
    assert_relative_eq!(scale, 1.25 * 1.5e-9);

    // the zoom center lands on the middle of the stage
    let center = transform.model_to_view(Vector2::ZERO);
    assert_relative_eq!(center, Vector2::new(STAGE_WIDTH / 2.0, STAGE_HEIGHT / 2.0));

    // +y in the model points up the stage
    let above = transform.model_to_view(Vector2::new(0.0, 1.0e11));
    assert!(above.y < center.y);
    assert_relative_eq!(center.y - above.y, 1.0e11 * scale, max_relative = 1e-12);

    let delta = transform.model_to_view_delta(Vector2::new(1.0e10, 1.0e10));
    assert_relative_eq!(delta, Vector2::new(1.0e10 * scale, -1.0e10 * scale), max_relative = 1e-12);
    assert_relative_eq!(transform.model_to_view_distance(2.0e10), 2.0e10 * scale);
}

#[test]
fn test_transform_inverse() {
    let center = Vector2::new(1.47e11, 0.0);
    let transform = ModelViewTransform::for_zoom(400.0, center, 5).unwrap();

    let model = Vector2::new(1.471e11, 3.8e8);
    let back = transform.view_to_model(transform.model_to_view(model));
    assert_relative_eq!(back, model, max_relative = 1e-9);

    let view_delta = Vector2::new(12.0, -7.0);
    let round_trip = transform.model_to_view_delta(transform.view_to_model_delta(view_delta));
    assert_relative_eq!(round_trip, view_delta, max_relative = 1e-9);
}

#[test]
fn test_zoom_levels() {
    let level = |l| ModelViewTransform::for_zoom(1.0, Vector2::ZERO, l);

    let default = level(DEFAULT_ZOOM_LEVEL).unwrap();
    let closer = level(DEFAULT_ZOOM_LEVEL + 1).unwrap();
    assert_relative_eq!(closer.scale(), default.scale() * 2.0);

    // zooming in shows half as much model space in each direction
    let (near, wide) = (closer.model_bounds(), default.model_bounds());
    assert_relative_eq!(near.width() * 2.0, wide.width(), max_relative = 1e-12);
    assert_relative_eq!(wide.width(), STAGE_WIDTH / default.scale(), max_relative = 1e-12);
    assert_relative_eq!(default.model_bounds().center(), Vector2::ZERO, epsilon = 1.0);

    assert!(level(MIN_ZOOM_LEVEL).is_ok());
    assert!(level(MAX_ZOOM_LEVEL).is_ok());
    assert!(level(MIN_ZOOM_LEVEL - 1).is_err());
    assert!(level(MAX_ZOOM_LEVEL + 1).is_err());
    assert!(ModelViewTransform::from_scale(0.0, Vector2::ZERO).is_err());
}
