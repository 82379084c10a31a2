use std::f32::consts::PI;

use approx::assert_relative_eq;
use portfolio_wasm::anim::Ring;
use portfolio_wasm::catalog::builtin_projects;
use portfolio_wasm::clock::{FrameClock, FrameTick};
use portfolio_wasm::portal::{Portal, HOVER_SCALE, IDLE_SCALE};
use portfolio_wasm::scene::{light_orbit, SceneComposer, LIGHT_HEIGHT};
use portfolio_wasm::SiteConfig;

fn portal() -> Portal {
    Portal::new(&builtin_projects()[0], 0)
}

#[test]
fn ring_angle_never_decreases() {
    let mut ring = Ring::default();
    let mut clock = FrameClock::new();
    let mut last = ring.angle();
    // Irregular, sometimes zero, sometimes backwards host timestamps.
    for now in [0.0, 16.0, 16.0, 40.0, 30.0, 1_000.0, 1_016.7, 5_000.0] {
        let tick = clock.tick(now).unwrap();
        ring.step(&tick);
        assert!(ring.angle() >= last);
        last = ring.angle();
    }
}

#[test]
fn hover_scale_matches_closed_form() {
    for n in [1, 10, 50] {
        let mut p = portal();
        p.pointer_enter();
        for _ in 0..n {
            p.step(&FrameTick::default());
        }
        let expected = 1.1 - 0.1 * 0.9f32.powi(n);
        let scale = p.scale();
        assert_relative_eq!(scale.x, expected, epsilon = 1e-5);
        assert_relative_eq!(scale.y, expected, epsilon = 1e-5);
        assert_relative_eq!(scale.z, expected, epsilon = 1e-5);
    }
}

#[test]
fn hover_is_level_triggered_within_a_frame() {
    let mut p = portal();
    p.pointer_enter();
    p.pointer_leave();
    assert_eq!(p.target_scale(), IDLE_SCALE);
    p.step(&FrameTick::default());
    assert_eq!(p.scale().x, IDLE_SCALE);

    p.pointer_leave();
    p.pointer_enter();
    assert_eq!(p.target_scale(), HOVER_SCALE);
}

#[test]
fn light_orbits_with_radius_four() {
    let start = light_orbit(0.0);
    assert_relative_eq!(start.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(start.y, LIGHT_HEIGHT);
    assert_relative_eq!(start.z, 4.0, epsilon = 1e-5);

    let half = light_orbit(3.0 * PI);
    assert_relative_eq!(half.x, 0.0, epsilon = 1e-4);
    assert_relative_eq!(half.y, LIGHT_HEIGHT);
    assert_relative_eq!(half.z, -4.0, epsilon = 1e-4);

    for i in 0..50 {
        let p = light_orbit(i as f32 * 0.7);
        assert_relative_eq!((p.x * p.x + p.z * p.z).sqrt(), 4.0, epsilon = 1e-4);
    }
}

#[test]
fn scene_has_one_portal_per_project_in_catalog_order() {
    let config = SiteConfig::builtin().unwrap();
    let scene = SceneComposer::new(config.clone());
    let ids: Vec<_> = scene.portals().iter().map(|p| p.id()).collect();
    let expected: Vec<_> = config.catalog.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, expected);

    let frame = scene.frame();
    assert_eq!(frame.portals.len(), 4);
    assert_eq!(frame.post.len(), 4);
    assert_eq!(frame.sparkles.len(), 60);
}

#[test]
fn scene_step_moves_light_and_spins_rings() {
    let config = SiteConfig::builtin().unwrap();
    let mut scene = SceneComposer::new(config);
    let mut clock = FrameClock::new();
    for _ in 0..100 {
        let tick = clock.advance(0.1);
        scene.step(&tick);
    }
    let tick = clock.current();
    assert_relative_eq!(tick.elapsed, 10.0, epsilon = 1e-4);
    let light = scene.key_light().position;
    assert_relative_eq!(light.x, (10.0f32 / 3.0).sin() * 4.0, epsilon = 1e-3);
    for portal in scene.portals() {
        assert_relative_eq!(portal.ring().angle(), 2.5, epsilon = 1e-3);
    }
}
