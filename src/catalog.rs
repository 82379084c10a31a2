//! The static project catalog that drives portal placement and modal content.

use std::collections::HashSet;

use glam::Vec3;

use crate::error::{PortfolioError, Result};
use crate::palette::parse_hex;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectLink {
    pub label: &'static str,
    pub href: &'static str,
}

/// One project shown as a portal in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub id: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub desc: &'static str,
    pub links: Vec<ProjectLink>,
    /// `#rrggbb` token used for the ring, gem and label accent.
    pub color: &'static str,
    pub position: [f32; 3],
}

impl ProjectRecord {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Parsed accent color. Validated at catalog construction.
    pub fn rgb(&self) -> Vec3 {
        parse_hex(self.color).unwrap_or(Vec3::ONE)
    }

    fn validate(&self) -> Result<()> {
        let missing = |field| PortfolioError::MissingField {
            id: self.id.to_string(),
            field,
        };
        if self.id.trim().is_empty() {
            return Err(missing("id"));
        }
        if self.title.trim().is_empty() {
            return Err(missing("title"));
        }
        if self.desc.trim().is_empty() {
            return Err(missing("desc"));
        }
        if parse_hex(self.color).is_none() {
            return Err(PortfolioError::InvalidColor {
                id: self.id.to_string(),
                value: self.color.to_string(),
            });
        }
        if self.links.iter().any(|l| l.href.is_empty() || l.label.is_empty()) {
            return Err(missing("links"));
        }
        Ok(())
    }
}

/// Ordered, validated list of projects. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    records: Vec<ProjectRecord>,
}

impl Catalog {
    /// Validate `records` and build the catalog. Fails on the first duplicate
    /// id or malformed record.
    pub fn new(records: Vec<ProjectRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(PortfolioError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for record in &records {
            record.validate()?;
            if !seen.insert(record.id) {
                return Err(PortfolioError::DuplicateId {
                    id: record.id.to_string(),
                });
            }
        }
        Ok(Self { records })
    }

    pub fn get(&self, id: &str) -> Option<&ProjectRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The projects compiled into the site.
pub fn builtin_projects() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord {
            id: "mship",
            title: "Mothership",
            subtitle: "Realtime multiplayer space sim",
            desc: "A browser space sim with authoritative physics, \
                   instanced fleets and a procedural nebula skybox.",
            links: vec![
                ProjectLink { label: "Live demo", href: "#" },
                ProjectLink { label: "Source", href: "#" },
            ],
            color: "#7df9ff",
            position: [-4.5, 0.5, 0.0],
        },
        ProjectRecord {
            id: "pacman",
            title: "Pac-Man 3D",
            subtitle: "Arcade classic, one dimension up",
            desc: "Grid pathfinding ghosts, a chase/scatter scheduler and a \
                   maze that folds into a torus.",
            links: vec![
                ProjectLink { label: "Play", href: "#" },
                ProjectLink { label: "Source", href: "#" },
            ],
            color: "#ffd23f",
            position: [-1.5, -0.2, -2.0],
        },
        ProjectRecord {
            id: "monster",
            title: "Monster Lab",
            subtitle: "Procedural creature builder",
            desc: "Skinned meshes assembled from parts, with inverse \
                   kinematics walk cycles generated per limb count.",
            links: vec![
                ProjectLink { label: "Gallery", href: "#" },
                ProjectLink { label: "Write-up", href: "#" },
            ],
            color: "#ff5ec4",
            position: [1.5, 0.3, -2.0],
        },
        ProjectRecord {
            id: "arproto",
            title: "AR Prototype",
            subtitle: "Markerless placement on the web",
            desc: "Plane detection, light estimation and anchored content \
                   running in a mobile browser session.",
            links: vec![
                ProjectLink { label: "Video", href: "#" },
                ProjectLink { label: "Notes", href: "#" },
            ],
            color: "#9dff6a",
            position: [4.5, -0.3, 0.0],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid_and_ordered() {
        let catalog = Catalog::new(builtin_projects()).unwrap();
        let ids: Vec<_> = catalog.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, ["mship", "pacman", "monster", "arproto"]);
        assert_eq!(catalog.index_of("monster"), Some(2));
        assert!(catalog.get("nope").is_none());
    }

    #[test]
    fn duplicate_id_fails_validation() {
        let mut records = builtin_projects();
        let mut dup = records[0].clone();
        dup.title = "Second mothership";
        records.push(dup);
        assert_eq!(
            Catalog::new(records),
            Err(PortfolioError::DuplicateId { id: "mship".into() })
        );
    }

    #[test]
    fn missing_field_and_bad_color_fail_validation() {
        let mut records = builtin_projects();
        records[1].title = " ";
        assert_eq!(
            Catalog::new(records),
            Err(PortfolioError::MissingField {
                id: "pacman".into(),
                field: "title"
            })
        );

        let mut records = builtin_projects();
        records[2].color = "pink";
        assert!(matches!(
            Catalog::new(records),
            Err(PortfolioError::InvalidColor { .. })
        ));

        assert_eq!(Catalog::new(Vec::new()), Err(PortfolioError::EmptyCatalog));
    }
}
