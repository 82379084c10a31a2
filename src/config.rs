use std::rc::Rc;

use crate::catalog::{builtin_projects, Catalog};
use crate::error::Result;
use crate::palette::Palette;

/// Compiled-in site configuration, validated once and shared by every
/// consumer through `Rc`.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub catalog: Catalog,
    pub palette: Palette,
    pub title: &'static str,
    pub tagline: &'static str,
}

impl SiteConfig {
    pub fn new(catalog: Catalog, palette: Palette) -> Self {
        Self {
            catalog,
            palette,
            title: "JK // PORTFOLIO",
            tagline: "drag to orbit · scroll to zoom · click a portal",
        }
    }

    /// Build the built-in configuration. Fails fast on a malformed catalog.
    pub fn builtin() -> Result<Rc<Self>> {
        let catalog = Catalog::new(builtin_projects())?;
        log::info!("catalog loaded with {} projects", catalog.len());
        Ok(Rc::new(Self::new(catalog, Palette::default())))
    }
}
