//! Damped orbit camera around the scene origin. Rotation and zoom only.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec2, Vec3};

pub const MIN_DISTANCE: f32 = 3.0;
pub const MAX_DISTANCE: f32 = 12.0;
pub const DAMPING: f32 = 0.08;
pub const FOV_Y_DEGREES: f32 = 50.0;
/// Keeps the polar angle off the poles so `look_at` never degenerates.
const POLAR_EPSILON: f32 = 1e-3;
/// Each wheel notch scales distance by this factor.
const ZOOM_STEP: f32 = 0.95;

#[derive(Debug, Clone)]
pub struct OrbitController {
    target: Vec3,
    azimuth: f32,
    polar: f32,
    distance: f32,
    azimuth_velocity: f32,
    polar_velocity: f32,
    aspect: f32,
    viewport: Vec2,
}

impl Default for OrbitController {
    fn default() -> Self {
        // Start at (0, 1.5, 8) looking at the origin.
        let eye = Vec3::new(0.0, 1.5, 8.0);
        Self {
            target: Vec3::ZERO,
            azimuth: eye.x.atan2(eye.z),
            polar: (eye.y / eye.length()).acos(),
            distance: eye.length().clamp(MIN_DISTANCE, MAX_DISTANCE),
            azimuth_velocity: 0.0,
            polar_velocity: 0.0,
            aspect: 16.0 / 9.0,
            viewport: Vec2::new(1280.0, 720.0),
        }
    }
}

impl OrbitController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
            self.aspect = width / height;
        }
    }

    /// Pointer drag in pixels. A drag across the full viewport height turns a
    /// full circle, as three.js OrbitControls does.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        let h = self.viewport.y.max(1.0);
        self.azimuth_velocity -= TAU * dx / h;
        self.polar_velocity -= TAU * dy / h;
    }

    /// Wheel input: positive `notches` zoom out, negative zoom in.
    pub fn zoom(&mut self, notches: f32) {
        let factor = ZOOM_STEP.powf(-notches);
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Panning is disabled.
    pub fn pan(&mut self, _dx: f32, _dy: f32) {}

    /// Apply one frame of damped rotation.
    pub fn update(&mut self) {
        self.azimuth += self.azimuth_velocity * DAMPING;
        self.polar = (self.polar + self.polar_velocity * DAMPING)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.azimuth_velocity *= 1.0 - DAMPING;
        self.polar_velocity *= 1.0 - DAMPING;
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn eye(&self) -> Vec3 {
        let (sp, cp) = self.polar.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        self.target + Vec3::new(sp * sa, cp, sp * ca) * self.distance
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(FOV_Y_DEGREES.to_radians(), self.aspect, 0.1, 200.0)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Project a world point into CSS pixels. `None` when behind the camera.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_proj() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x * 0.5 + 0.5) * self.viewport.x,
            (1.0 - (ndc.y * 0.5 + 0.5)) * self.viewport.y,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped() {
        let mut cam = OrbitController::new();
        for _ in 0..200 {
            cam.zoom(1.0);
        }
        assert_eq!(cam.distance(), MAX_DISTANCE);
        for _ in 0..200 {
            cam.zoom(-1.0);
        }
        assert_eq!(cam.distance(), MIN_DISTANCE);
    }

    #[test]
    fn drag_is_damped_not_instant() {
        let mut cam = OrbitController::new();
        let start = cam.azimuth();
        cam.drag(-100.0, 0.0);
        cam.update();
        let first = cam.azimuth() - start;
        let total = TAU * 100.0 / 720.0;
        assert!(first > 0.0 && first < total);
        for _ in 0..500 {
            cam.update();
        }
        assert!((cam.azimuth() - start - total).abs() < 1e-3);
    }

    #[test]
    fn pan_does_nothing() {
        let mut cam = OrbitController::new();
        let eye = cam.eye();
        cam.pan(50.0, 50.0);
        cam.update();
        assert_eq!(cam.eye(), eye);
    }

    #[test]
    fn polar_never_flips() {
        let mut cam = OrbitController::new();
        cam.drag(0.0, 100_000.0);
        for _ in 0..100 {
            cam.update();
        }
        assert!(cam.polar() >= POLAR_EPSILON);
    }

    #[test]
    fn origin_projects_to_viewport_center() {
        let cam = OrbitController::new();
        let p = cam.project(Vec3::ZERO).unwrap();
        assert!((p.x - 640.0).abs() < 1e-2);
        assert!((p.y - 360.0).abs() < 1e-2);
    }
}
