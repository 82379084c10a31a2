//! Scene composition: lights, backdrop, field effects, portals and the
//! post-processing stack. The composer owns all per-frame entity state and
//! hands the renderer an immutable [`SceneFrame`] each frame.

use std::rc::Rc;

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::FrameTick;
use crate::config::SiteConfig;
use crate::palette::parse_hex;
use crate::portal::Portal;

pub const LIGHT_ORBIT_RADIUS: f32 = 4.0;
/// Seconds per radian of the light orbit; a full lap is `6π` ≈ 18.85 s.
pub const LIGHT_ORBIT_TIME_SCALE: f32 = 3.0;
pub const LIGHT_HEIGHT: f32 = 5.0;
pub const GROUND_HEIGHT: f32 = -1.5;
const STAR_SEED: u64 = 0x5eed_cafe;

/// Position of the orbiting directional light at scene time `t`.
pub fn light_orbit(t: f32) -> Vec3 {
    let phase = t / LIGHT_ORBIT_TIME_SCALE;
    Vec3::new(
        phase.sin() * LIGHT_ORBIT_RADIUS,
        LIGHT_HEIGHT,
        phase.cos() * LIGHT_ORBIT_RADIUS,
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldSpec {
    pub radius: f32,
    pub depth: f32,
    pub count: usize,
    pub factor: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparklesSpec {
    pub count: usize,
    pub scale: f32,
    pub size: f32,
    pub speed: f32,
}

/// Fixed post-processing passes, applied in order by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PostEffect {
    Bloom {
        intensity: f32,
        luminance_threshold: f32,
        luminance_smoothing: f32,
    },
    DepthOfField {
        focus_distance: f32,
        focal_length: f32,
        bokeh_scale: f32,
    },
    Noise {
        opacity: f32,
    },
    Vignette {
        offset: f32,
        darkness: f32,
    },
}

pub fn post_stack() -> [PostEffect; 4] {
    [
        PostEffect::Bloom {
            intensity: 1.2,
            luminance_threshold: 0.2,
            luminance_smoothing: 0.9,
        },
        PostEffect::DepthOfField {
            focus_distance: 0.02,
            focal_length: 0.05,
            bokeh_scale: 2.0,
        },
        PostEffect::Noise { opacity: 0.04 },
        PostEffect::Vignette {
            offset: 0.3,
            darkness: 0.9,
        },
    ]
}

/// Per-portal draw data for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalFrame {
    pub id: &'static str,
    pub ring: Mat4,
    pub gem: Mat4,
    pub color: Vec3,
    pub label_anchor: Vec3,
    pub hovered: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct SceneFrame<'a> {
    pub elapsed: f32,
    pub background: Vec3,
    pub ambient: f32,
    pub key_light: Light,
    pub accent_light: Light,
    pub stars: &'a [Vec3],
    pub star_color: Vec3,
    pub sparkles: Vec<Vec3>,
    pub portals: Vec<PortalFrame>,
    pub ground_height: f32,
    pub ground_color: Vec3,
    pub title: &'static str,
    pub post: [PostEffect; 4],
}

pub struct SceneComposer {
    config: Rc<SiteConfig>,
    portals: Vec<Portal>,
    stars: Vec<Vec3>,
    sparkles: Vec<Vec3>,
    sparkle_spec: SparklesSpec,
    key_light: Light,
    elapsed: f32,
}

impl SceneComposer {
    pub fn new(config: Rc<SiteConfig>) -> Self {
        let portals = config
            .catalog
            .records()
            .iter()
            .enumerate()
            .map(|(slot, record)| Portal::new(record, slot))
            .collect();

        let starfield = StarfieldSpec {
            radius: 60.0,
            depth: 40.0,
            count: 3000,
            factor: 4.0,
        };
        let sparkle_spec = SparklesSpec {
            count: 60,
            scale: 12.0,
            size: 2.0,
            speed: 0.4,
        };

        // Fixed seed so the starfield is identical every load.
        let mut rng = StdRng::seed_from_u64(STAR_SEED);
        let stars = scatter_stars(&mut rng, &starfield);
        let sparkles = (0..sparkle_spec.count)
            .map(|_| {
                let v = Vec3::new(
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-0.5..0.5),
                    rng.gen_range(-1.0..1.0),
                );
                v * (sparkle_spec.scale * 0.5)
            })
            .collect();

        let key_light = Light {
            position: light_orbit(0.0),
            color: Vec3::ONE,
            intensity: 1.4,
        };

        log::debug!(
            "scene composed: {} portals, {} stars, {} sparkles",
            config.catalog.len(),
            starfield.count,
            sparkle_spec.count
        );

        Self {
            config,
            portals,
            stars,
            sparkles,
            sparkle_spec,
            key_light,
            elapsed: 0.0,
        }
    }

    pub fn step(&mut self, tick: &FrameTick) {
        self.elapsed = tick.elapsed;
        self.key_light.position = light_orbit(tick.elapsed);
        for portal in &mut self.portals {
            portal.step(tick);
        }
    }

    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    pub fn portal_mut(&mut self, id: &str) -> Option<&mut Portal> {
        self.portals.iter_mut().find(|p| p.id() == id)
    }

    pub fn key_light(&self) -> Light {
        self.key_light
    }

    pub fn frame(&self) -> SceneFrame<'_> {
        let palette = &self.config.palette;
        let color = |token| parse_hex(token).unwrap_or(Vec3::ONE);
        let t = self.elapsed;
        let drift = self.sparkle_spec.speed * t;
        let sparkles = self
            .sparkles
            .iter()
            .enumerate()
            .map(|(i, base)| {
                let phase = drift + i as f32 * 0.37;
                *base + Vec3::new(phase.cos() * 0.3, phase.sin() * 0.4, 0.0)
            })
            .collect();

        SceneFrame {
            elapsed: t,
            background: color(palette.background),
            ambient: 0.25,
            key_light: self.key_light,
            accent_light: Light {
                position: Vec3::new(0.0, 2.0, 2.0),
                color: color(palette.accent),
                intensity: 2.0,
            },
            stars: &self.stars,
            star_color: color(palette.star),
            sparkles,
            portals: self
                .portals
                .iter()
                .map(|p| PortalFrame {
                    id: p.id(),
                    ring: p.ring_transform(t),
                    gem: p.gem_transform(t),
                    color: p.color(),
                    label_anchor: p.label_anchor(t),
                    hovered: p.is_hovered(),
                })
                .collect(),
            ground_height: GROUND_HEIGHT,
            ground_color: color(palette.ground),
            title: self.config.title,
            post: post_stack(),
        }
    }
}

fn scatter_stars(rng: &mut StdRng, spec: &StarfieldSpec) -> Vec<Vec3> {
    (0..spec.count)
        .map(|_| {
            // Uniform direction, distance in [radius, radius + depth].
            let dir = loop {
                let v = Vec3::new(
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                );
                let len = v.length_squared();
                if len > 1e-4 && len <= 1.0 {
                    break v.normalize();
                }
            };
            dir * (spec.radius + rng.gen_range(0.0..spec.depth))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_lie_in_shell() {
        let config = SiteConfig::builtin().unwrap();
        let scene = SceneComposer::new(config);
        let frame = scene.frame();
        assert_eq!(frame.stars.len(), 3000);
        for s in frame.stars {
            let d = s.length();
            assert!((60.0 - 1e-3..=100.0 + 1e-3).contains(&d), "{d}");
        }
    }

    #[test]
    fn starfield_is_identical_across_loads() {
        let config = SiteConfig::builtin().unwrap();
        let a = SceneComposer::new(config.clone());
        let b = SceneComposer::new(config);
        assert_eq!(a.frame().stars, b.frame().stars);
        assert_eq!(a.frame().sparkles, b.frame().sparkles);
        for s in &a.frame().sparkles {
            // Base box of +-6 x +-3 x +-6 plus the drift offset.
            assert!(s.x.abs() <= 6.31 && s.y.abs() <= 3.41 && s.z.abs() <= 6.01, "{s}");
        }
    }
}
