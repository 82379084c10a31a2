#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Animated 3D portfolio: portals for projects, a HUD and modal dialogs.
//! The core modules are plain Rust and test on the host; the browser layer
//! under `wasm` only compiles for wasm32.

pub mod anim;
pub mod app;
pub mod camera;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod hud;
pub mod modal;
pub mod palette;
pub mod portal;
pub mod scene;

pub use app::{App, UiEvent};
pub use config::SiteConfig;
pub use error::PortfolioError;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm;
