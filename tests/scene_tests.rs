use orbit_sim::core::presets::{
    EARTH_PERIHELION, EARTH_RADIUS, SPACE_STATION_PERIGEE, SPACE_STATION_RADIUS,
};
use orbit_sim::core::{DisplayOptions, SceneConfig};
use orbit_sim::error::PhysicsError;
use orbit_sim::math::DEFAULT_ZOOM_LEVEL;
use orbit_sim::{GravityAndOrbitsModel, Scene, SceneKind, TimeSpeed, Vector2};
use std::cell::RefCell;
use std::rc::Rc;
use approx::assert_relative_eq;

fn model() -> GravityAndOrbitsModel {
    GravityAndOrbitsModel::new().unwrap()
}

fn positions(scene: &Scene) -> Vec<Vector2> {
    scene.engine().bodies().iter().map(|(_, b)| b.position()).collect()
}

fn separation(scene: &Scene, a: &str, b: &str) -> f64 {
    let a = scene.body(scene.find_body(a).unwrap()).unwrap().position();
    let b = scene.body(scene.find_body(b).unwrap()).unwrap().position();
    a.distance(&b)
}

#[test]
fn test_presets_build() {
    let model = model();
    let kinds: Vec<SceneKind> = model.scenes().iter().map(|s| s.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SceneKind::SunEarth,
            SceneKind::SunEarthMoon,
            SceneKind::EarthMoon,
            SceneKind::EarthSpaceStation
        ]
    );

    assert_eq!(model.active_index(), 0);
    assert!(!model.is_playing());
    for (i, scene) in model.scenes().iter().enumerate() {
        assert_eq!(scene.is_active(), i == 0);
        assert!(!scene.is_running());
        assert!(!scene.deviated_from_defaults());
        assert_eq!(scene.zoom_level(), DEFAULT_ZOOM_LEVEL);
    }

    let scene = model.active_scene();
    let earth = scene.body(scene.find_body("earth").unwrap()).unwrap();
    assert_eq!(earth.position(), Vector2::new(EARTH_PERIHELION, 0.0));
    assert!(earth.is_mass_settable());
    // forces are ready before the first step
    assert!(earth.force().x < 0.0);
}

#[test]
fn test_empty_scene_is_rejected() {
    let config = SceneConfig::new(SceneKind::SunEarth, Vec::new());
    assert!(Scene::new(config).is_err());
    assert!(GravityAndOrbitsModel::with_scenes(Vec::new()).is_err());
}

#[test]
fn test_only_active_scene_advances() {
    let mut model = model();
    let idle = positions(model.scene(1).unwrap());

    model.set_playing(true);
    assert!(model.step(0.1) > 0);
    assert!(model.active_scene().simulation_time() > 0.0);
    assert_eq!(positions(model.scene(1).unwrap()), idle);
    assert_eq!(model.scene(1).unwrap().simulation_time(), 0.0);

    // an inactive scene ignores direct steps too
    let idle_third = positions(model.scene(2).unwrap());
    assert_eq!(model.scene_mut(2).unwrap().step(1.0), 0);
    assert!(matches!(
        model.scene_mut(2).unwrap().step_once(),
        Err(PhysicsError::InvalidState(_))
    ));
    assert_eq!(positions(model.scene(2).unwrap()), idle_third);
    assert_eq!(model.scene(2).unwrap().simulation_time(), 0.0);

    let paused_first = positions(model.scene(0).unwrap());
    model.select_scene(1).unwrap();
    assert!(model.scene(1).unwrap().is_running());
    assert!(!model.scene(0).unwrap().is_running());

    model.step(0.1);
    assert_eq!(positions(model.scene(0).unwrap()), paused_first);
    assert_ne!(positions(model.scene(1).unwrap()), idle);

    assert!(model.select_scene(4).is_err());
    assert_eq!(model.active_index(), 1);
}

#[test]
fn test_save_state_requires_pause() {
    let mut model = model();
    model.set_playing(true);
    assert!(matches!(
        model.active_scene_mut().save_state(),
        Err(PhysicsError::InvalidState(_))
    ));

    model.set_playing(false);
    assert!(model.active_scene_mut().save_state().is_ok());
}

#[test]
fn test_rewind_returns_to_saved_state() {
    let mut model = model();
    for _ in 0..20 {
        model.step_once().unwrap();
    }
    model.active_scene_mut().save_state().unwrap();
    let saved = positions(model.active_scene());

    model.set_playing(true);
    for _ in 0..10 {
        model.step(0.1);
    }
    assert_ne!(positions(model.active_scene()), saved);

    model.rewind();
    assert_eq!(positions(model.active_scene()), saved);
    assert_eq!(model.active_scene().simulation_time(), 0.0);
    assert!(!model.active_scene().is_rewinding());
    // rewinding does not pause
    assert!(model.is_playing());
}

#[test]
fn test_velocity_edit_while_paused_is_rewind_point() {
    let mut model = model();
    let edited = Vector2::new(0.0, 31_000.0);
    {
        let scene = model.active_scene_mut();
        let earth = scene.find_body("earth").unwrap();
        scene.user_set_velocity(earth, edited).unwrap();
        assert!(scene.deviated_from_defaults());
    }

    model.set_playing(true);
    for _ in 0..10 {
        model.step(0.1);
    }
    model.rewind();

    let scene = model.active_scene();
    let earth = scene.body(scene.find_body("earth").unwrap()).unwrap();
    assert_eq!(earth.velocity(), edited);
    assert_eq!(earth.position(), Vector2::new(EARTH_PERIHELION, 0.0));
}

#[test]
fn test_reset_scene_clears_deviation() {
    let mut model = model();
    model.select_scene(2).unwrap();

    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    let scene = model.active_scene_mut();
    scene
        .deviated_from_defaults_property()
        .subscribe(Box::new(move |new: &bool, _: &bool| sink.borrow_mut().push(*new)));

    let moon = scene.find_body("moon").unwrap();
    let start = scene.body(moon).unwrap().position();
    scene.user_set_position(moon, start + Vector2::new(1.0e7, 0.0)).unwrap();
    let heavier = 2.0 * scene.body(moon).unwrap().mass();
    scene.user_set_mass(moon, heavier).unwrap();
    assert!(scene.deviated_from_defaults());

    scene.reset_scene();
    assert!(!scene.deviated_from_defaults());
    assert_eq!(scene.body(moon).unwrap().position(), start);
    assert_eq!(*changes.borrow(), vec![true, false]);
}

#[test]
fn test_pending_edits_are_not_saved_by_rewind() {
    let mut model = model();
    let scene = model.active_scene_mut();
    let earth = scene.find_body("earth").unwrap();
    let preset_velocity = scene.body(earth).unwrap().velocity();

    // recorded through direct body access, not yet handed to the engine
    scene.body_mut(earth).unwrap().user_set_velocity(Vector2::new(0.0, 1.0)).unwrap();
    scene.rewind();

    assert!(!scene.is_rewinding());
    assert!(scene.deviated_from_defaults());
    assert_eq!(scene.body(earth).unwrap().velocity(), preset_velocity);
}

#[test]
fn test_body_dragged_into_star_collides() {
    let mut model = model();
    let scene = model.active_scene_mut();
    let earth = scene.find_body("earth").unwrap();
    let inside = Vector2::new(1.0e8, 0.0);
    scene.user_set_position(earth, inside).unwrap();

    scene.step_once().unwrap();

    let body = scene.body(earth).unwrap();
    assert!(body.is_collided());
    assert_eq!(body.velocity(), Vector2::ZERO);
    assert_eq!(body.position(), inside);
    assert!(scene.body(scene.find_body("sun").unwrap()).unwrap().is_collided());

    assert!(scene.user_set_velocity(earth, Vector2::new(0.0, 30_000.0)).is_err());
    scene.step_once().unwrap();
    assert_eq!(scene.body(earth).unwrap().velocity(), Vector2::ZERO);
}

#[test]
fn test_body_properties_notify_views() {
    let mut model = model();
    let scene = model.active_scene_mut();
    let earth = scene.find_body("earth").unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let id = scene
        .body_mut(earth)
        .unwrap()
        .position_property()
        .subscribe(Box::new(move |new: &Vector2, _: &Vector2| sink.borrow_mut().push(*new)));

    let moved = Vector2::new(EARTH_PERIHELION * 1.1, 0.0);
    scene.user_set_position(earth, moved).unwrap();
    assert_eq!(*seen.borrow(), vec![moved]);
    assert!(scene.deviated_from_defaults());

    assert!(scene.body_mut(earth).unwrap().position_property().unsubscribe(id));
    scene.step_once().unwrap();
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn test_step_once_only_while_paused() {
    let mut model = model();
    model.step_once().unwrap();
    let scene = model.active_scene();
    assert_eq!(scene.simulation_time(), scene.clock().base_dt());

    model.set_playing(true);
    assert!(model.step_once().is_err());
}

#[test]
fn test_zoom_levels() {
    let mut model = model();
    let scene = model.active_scene_mut();
    let default_scale = scene.transform().scale();

    assert!(scene.set_zoom_level(7).is_err());
    assert_eq!(scene.zoom_level(), DEFAULT_ZOOM_LEVEL);

    scene.set_zoom_level(DEFAULT_ZOOM_LEVEL + 1).unwrap();
    assert_relative_eq!(scene.transform().scale(), default_scale * 2.0);

    scene.reset_zoom().unwrap();
    assert_relative_eq!(scene.transform().scale(), default_scale);
}

#[test]
fn test_zoom_changes_go_through_validation() {
    let mut model = model();
    let scene = model.active_scene_mut();
    let levels = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&levels);
    scene
        .zoom_level_property()
        .subscribe(Box::new(move |new: &i32, _: &i32| sink.borrow_mut().push(*new)));
    let default_bounds = scene.model_bounds();

    assert!(scene.set_zoom_level(99).is_err());
    assert_eq!(scene.zoom_level(), DEFAULT_ZOOM_LEVEL);
    assert_eq!(scene.model_bounds(), default_bounds);

    scene.set_zoom_level(DEFAULT_ZOOM_LEVEL - 1).unwrap();
    assert_eq!(scene.zoom_level_property().get(), DEFAULT_ZOOM_LEVEL - 1);
    assert_relative_eq!(scene.model_bounds().width(), default_bounds.width() * 2.0);
    assert_eq!(*levels.borrow(), vec![DEFAULT_ZOOM_LEVEL - 1]);
}

#[test]
fn test_global_controls_reach_every_scene() {
    let mut model = model();
    model.set_gravity_enabled(false);
    model.set_time_speed(TimeSpeed::Fast);

    for scene in model.scenes() {
        assert!(!scene.engine().is_gravity_enabled());
        assert_eq!(scene.clock().speed(), TimeSpeed::Fast);
    }
}

#[test]
fn test_reset_restores_startup_state() {
    let mut model = model();
    model.display_mut().show_path = true;
    model.set_gravity_enabled(false);
    model.set_time_speed(TimeSpeed::Slow);
    model.select_scene(3).unwrap();
    model.active_scene_mut().set_zoom_level(2).unwrap();
    model.set_playing(true);
    for _ in 0..8 {
        model.step(0.25);
    }

    let pristine = GravityAndOrbitsModel::new().unwrap();
    model.reset().unwrap();

    assert_eq!(*model.display(), DisplayOptions::default());
    assert_eq!(model.active_index(), 0);
    assert!(!model.is_playing());
    assert!(model.is_gravity_enabled());
    assert_eq!(model.time_speed(), TimeSpeed::Normal);
    for (scene, fresh) in model.scenes().iter().zip(pristine.scenes()) {
        assert_eq!(positions(scene), positions(fresh));
        assert_eq!(scene.zoom_level(), DEFAULT_ZOOM_LEVEL);
        assert_eq!(scene.simulation_time(), 0.0);
        assert!(!scene.is_running());
        assert!(scene.engine().is_gravity_enabled());
    }
}

#[test]
fn test_return_bodies() {
    let mut model = model();
    let scene = model.active_scene_mut();
    assert!(!scene.return_bodies());

    let earth = scene.find_body("earth").unwrap();
    scene.user_set_position(earth, Vector2::new(1.0e13, 0.0)).unwrap();
    assert_eq!(scene.bodies_out_of_bounds(), vec![earth]);

    assert!(scene.return_bodies());
    assert_eq!(scene.body(earth).unwrap().position(), Vector2::new(EARTH_PERIHELION, 0.0));
}

#[test]
fn test_sun_earth_year() {
    let mut model = model();
    for _ in 0..365 {
        model.step_once().unwrap();
    }

    let scene = model.active_scene();
    let distance = separation(scene, "sun", "earth");
    assert!(distance > 0.98 * EARTH_PERIHELION && distance < 1.05 * EARTH_PERIHELION);

    let earth = scene.body(scene.find_body("earth").unwrap()).unwrap();
    assert!(!earth.is_collided());
    assert_eq!(earth.path_len(), 365);
    assert_eq!(earth.max_path_length(), 548);
}

#[test]
fn test_space_station_stays_in_orbit() {
    let mut model = model();
    model.select_scene(3).unwrap();
    let start = EARTH_RADIUS + SPACE_STATION_PERIGEE + SPACE_STATION_RADIUS;

    for _ in 0..80 {
        model.step_once().unwrap();
        let distance = separation(model.active_scene(), "earth", "space station");
        assert_relative_eq!(distance, start, max_relative = 0.02);
    }
}

#[test]
fn test_earth_moon_has_no_net_momentum() {
    let model = model();
    let scene = model.scene(2).unwrap();
    let moon = scene.body(scene.find_body("moon").unwrap()).unwrap();
    let moon_momentum = moon.mass() * moon.velocity().length();

    assert!(scene.engine().total_momentum().length() < 1e-9 * moon_momentum);
}
