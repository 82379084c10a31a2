//! Heads-up overlay model. The DOM layer renders this; nothing here touches
//! the browser.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub href: &'static str,
}

pub const SOCIAL_LINKS: [SocialLink; 3] = [
    SocialLink { label: "GitHub", href: "#" },
    SocialLink { label: "LinkedIn", href: "#" },
    SocialLink { label: "Email", href: "#" },
];

pub const HINTS: [&str; 3] = ["Drag to orbit", "Scroll to zoom", "Click a portal to open"];

#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    progress: f32,
    pub hints: &'static [&'static str],
    pub socials: &'static [SocialLink],
    pub label: &'static str,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            progress: 0.0,
            hints: &HINTS,
            socials: &SOCIAL_LINKS,
            label: "EXPLORED",
        }
    }
}

impl Hud {
    /// Set the exploration bar. Values outside `0..=100` are clamped; NaN
    /// reads as empty.
    pub fn set_progress(&mut self, value: f32) {
        self.progress = if value.is_nan() { 0.0 } else { value.clamp(0.0, 100.0) };
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// CSS width for the bar fill, e.g. `"72%"`.
    pub fn progress_width(&self) -> String {
        format!("{}%", self.progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped() {
        let mut hud = Hud::default();
        hud.set_progress(140.0);
        assert_eq!(hud.progress_width(), "100%");
        hud.set_progress(-3.0);
        assert_eq!(hud.progress(), 0.0);
        hud.set_progress(f32::NAN);
        assert_eq!(hud.progress(), 0.0);
        hud.set_progress(42.5);
        assert_eq!(hud.progress_width(), "42.5%");
    }
}
