//! A clickable project marker: ring, gem and floating label.

use glam::{Mat4, Vec3};

use crate::anim::{ease_toward, Float, Gem, Ring};
use crate::catalog::ProjectRecord;
use crate::clock::FrameTick;

pub const HOVER_SCALE: f32 = 1.1;
pub const IDLE_SCALE: f32 = 1.0;
pub const SCALE_EASING: f32 = 0.1;
/// Label sits this far above the portal origin.
pub const LABEL_LIFT: f32 = 1.6;

#[derive(Debug, Clone)]
pub struct Portal {
    id: &'static str,
    origin: Vec3,
    color: Vec3,
    hovered: bool,
    scale: Vec3,
    ring: Ring,
    gem: Gem,
    float: Float,
}

impl Portal {
    /// `slot` is the catalog index; it only staggers the float phase.
    pub fn new(record: &ProjectRecord, slot: usize) -> Self {
        Self {
            id: record.id,
            origin: record.position(),
            color: record.rgb(),
            hovered: false,
            scale: Vec3::splat(IDLE_SCALE),
            ring: Ring::default(),
            gem: Gem::new(0.0),
            float: Float::new(slot as f32 * 1.7),
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    /// Hand this portal's id to the parent's open action.
    pub fn click<F: FnOnce(&str)>(&self, on_open: F) {
        on_open(self.id);
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn target_scale(&self) -> f32 {
        if self.hovered {
            HOVER_SCALE
        } else {
            IDLE_SCALE
        }
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn gem(&self) -> &Gem {
        &self.gem
    }

    pub fn step(&mut self, tick: &FrameTick) {
        let target = self.target_scale();
        self.scale = Vec3::new(
            ease_toward(self.scale.x, target, SCALE_EASING),
            ease_toward(self.scale.y, target, SCALE_EASING),
            ease_toward(self.scale.z, target, SCALE_EASING),
        );
        self.ring.step(tick);
        self.gem.step(tick);
    }

    /// Group transform: origin, float wrapper, hover scale.
    pub fn group_transform(&self, elapsed: f32) -> Mat4 {
        Mat4::from_translation(self.origin)
            * self.float.transform(elapsed)
            * Mat4::from_scale(self.scale)
    }

    pub fn ring_transform(&self, elapsed: f32) -> Mat4 {
        self.group_transform(elapsed) * Mat4::from_quat(self.ring.rotation())
    }

    pub fn gem_transform(&self, elapsed: f32) -> Mat4 {
        self.group_transform(elapsed) * self.gem.transform()
    }

    /// World-space anchor for the HTML label.
    pub fn label_anchor(&self, elapsed: f32) -> Vec3 {
        self.group_transform(elapsed)
            .transform_point3(Vec3::new(0.0, LABEL_LIFT, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_projects;

    #[test]
    fn click_reports_own_id() {
        let records = builtin_projects();
        let portal = Portal::new(&records[3], 3);
        let mut opened = None;
        portal.click(|id| opened = Some(id.to_string()));
        assert_eq!(opened.as_deref(), Some("arproto"));
    }

    #[test]
    fn leaving_shrinks_back_toward_idle() {
        let records = builtin_projects();
        let mut portal = Portal::new(&records[0], 0);
        portal.pointer_enter();
        for _ in 0..30 {
            portal.step(&FrameTick::default());
        }
        let grown = portal.scale().x;
        portal.pointer_leave();
        portal.step(&FrameTick::default());
        assert!(portal.scale().x < grown);
        assert!(portal.scale().x > IDLE_SCALE);
        assert_eq!(portal.scale().x, portal.scale().z);
    }
}
