//! Decorative per-frame motion: the spinning ring, the bobbing gem, and the
//! gentle float wrapper every portal sits in.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::clock::FrameTick;

pub const RING_SPEED: f32 = 0.25;
pub const GEM_SPIN_SPEED: f32 = 0.6;
pub const GEM_BOB_AMPLITUDE: f32 = 0.15;
/// Seconds per radian of the gem bob; a full cycle is `TAU * 0.9` ≈ 5.65 s.
pub const GEM_BOB_TIME_SCALE: f32 = 0.9;

/// Torus that spins about its local Z axis.
#[derive(Debug, Clone, Default)]
pub struct Ring {
    angle: f32,
}

impl Ring {
    pub fn step(&mut self, tick: &FrameTick) {
        self.angle += RING_SPEED * tick.delta;
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_z(self.angle)
    }
}

/// Octahedron inside the ring: spins about Y and bobs on scene time.
#[derive(Debug, Clone)]
pub struct Gem {
    yaw: f32,
    base_height: f32,
    height: f32,
}

impl Gem {
    pub fn new(base_height: f32) -> Self {
        Self {
            yaw: 0.0,
            base_height,
            height: base_height,
        }
    }

    pub fn step(&mut self, tick: &FrameTick) {
        self.yaw += GEM_SPIN_SPEED * tick.delta;
        self.height = self.base_height
            + GEM_BOB_AMPLITUDE * (tick.elapsed / GEM_BOB_TIME_SCALE).sin();
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(
            Quat::from_rotation_y(self.yaw),
            Vec3::new(0.0, self.height, 0.0),
        )
    }
}

/// Cosmetic bob and tilt applied around a whole portal.
#[derive(Debug, Clone, Copy)]
pub struct Float {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    /// Phase offset in seconds so neighbouring portals drift out of step.
    pub offset: f32,
}

impl Float {
    pub fn new(offset: f32) -> Self {
        Self {
            speed: 1.5,
            rotation_intensity: 0.6,
            float_intensity: 1.2,
            offset,
        }
    }

    /// `(translation, rotation)` at scene time `elapsed`.
    pub fn sample(&self, elapsed: f32) -> (Vec3, Quat) {
        let phase = (self.offset + elapsed) / 4.0 * self.speed;
        let (s, c) = phase.sin_cos();
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            c / 8.0 * self.rotation_intensity,
            s / 8.0 * self.rotation_intensity,
            s / 20.0 * self.rotation_intensity,
        );
        let lift = s / 10.0 * self.float_intensity;
        (Vec3::new(0.0, lift, 0.0), rotation)
    }

    pub fn transform(&self, elapsed: f32) -> Mat4 {
        let (translation, rotation) = self.sample(elapsed);
        Mat4::from_rotation_translation(rotation, translation)
    }
}

/// First-order lag toward `target`: `value += (target - value) * factor`.
#[inline]
pub fn ease_toward(value: f32, target: f32, factor: f32) -> f32 {
    value + (target - value) * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(elapsed: f32, delta: f32) -> FrameTick {
        FrameTick {
            elapsed,
            delta,
            frame: 0,
        }
    }

    #[test]
    fn ring_spins_at_fixed_rate() {
        let mut ring = Ring::default();
        for _ in 0..4 {
            ring.step(&tick(0.0, 0.5));
        }
        assert!((ring.angle() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn gem_bobs_on_elapsed_time_not_delta() {
        let mut gem = Gem::new(0.2);
        gem.step(&tick(GEM_BOB_TIME_SCALE * std::f32::consts::FRAC_PI_2, 0.0));
        assert!((gem.height() - (0.2 + GEM_BOB_AMPLITUDE)).abs() < 1e-5);
        assert_eq!(gem.yaw(), 0.0);

        gem.step(&tick(GEM_BOB_TIME_SCALE * std::f32::consts::PI, 1.0));
        assert!((gem.height() - 0.2).abs() < 1e-5);
        assert!((gem.yaw() - GEM_SPIN_SPEED).abs() < 1e-6);
    }

    #[test]
    fn float_stays_within_small_range() {
        let float = Float::new(3.0);
        for i in 0..200 {
            let (t, _) = float.sample(i as f32 * 0.1);
            assert!(t.y.abs() <= 0.1 * float.float_intensity + 1e-6);
        }
    }

    #[test]
    fn ease_toward_halves_gap() {
        assert_eq!(ease_toward(0.0, 2.0, 0.5), 1.0);
        assert_eq!(ease_toward(2.0, 2.0, 0.1), 2.0);
    }
}
