//! Built-in furniture catalog and sample data.

use super::{FurnitureItem, FurnitureKind};
use crate::color::HexColor;
use crate::config::EditorConfig;
use crate::geometry::Placement;
use crate::project::Project;
use crate::room::{ColorPalette, Room};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Catalog type filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Kind(FurnitureKind),
}

impl KindFilter {
    /// Parse a filter tag. `"all"` matches everything.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "all" => KindFilter::All,
            other => KindFilter::Kind(FurnitureKind::from(other)),
        }
    }

    pub fn matches(&self, item: &FurnitureItem) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Kind(kind) => item.kind == *kind,
        }
    }
}

/// Catalog of placeable furniture templates.
#[derive(Debug, Clone)]
pub struct Catalog {
    templates: Vec<FurnitureItem>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Create a catalog from explicit templates.
    pub fn new(templates: Vec<FurnitureItem>) -> Self {
        Self { templates }
    }

    /// The catalog shipped with the application.
    pub fn builtin() -> Self {
        Self::new(vec![
            template(
                "chair-1",
                FurnitureKind::Chair,
                "Modern Dining Chair",
                (0.5, 0.5, 0.8),
                HexColor::new(0xa4, 0x75, 0x51),
                "https://images.pexels.com/photos/116910/pexels-photo-116910.jpeg?auto=compress&cs=tinysrgb&w=600",
            ),
            template(
                "chair-2",
                FurnitureKind::Chair,
                "Lounge Chair",
                (0.7, 0.8, 0.75),
                HexColor::new(0xd9, 0xcf, 0xc1),
                "https://images.pexels.com/photos/11112735/pexels-photo-11112735.jpeg",
            ),
            template(
                "sofa-1",
                FurnitureKind::Sofa,
                "Three-Seater Sofa",
                (2.0, 0.9, 0.8),
                HexColor::new(0x68, 0x75, 0x85),
                "https://images.pexels.com/photos/11112731/pexels-photo-11112731.jpeg",
            ),
            template(
                "table-1",
                FurnitureKind::Table,
                "Coffee Table",
                (1.2, 0.6, 0.45),
                HexColor::new(0x5c, 0x40, 0x33),
                "https://images.pexels.com/photos/2079455/pexels-photo-2079455.jpeg",
            ),
            template(
                "table-2",
                FurnitureKind::Table,
                "Dining Table",
                (1.5, 0.9, 0.75),
                HexColor::new(0x8b, 0x5a, 0x2b),
                "https://images.pexels.com/photos/373548/pexels-photo-373548.jpeg",
            ),
        ])
    }

    /// All templates in catalog order.
    pub fn templates(&self) -> &[FurnitureItem] {
        &self.templates
    }

    /// Get a template by id.
    pub fn get(&self, id: &str) -> Option<&FurnitureItem> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Templates matching a type filter, in catalog order.
    pub fn filter<'a>(&'a self, filter: &'a KindFilter) -> impl Iterator<Item = &'a FurnitureItem> + 'a {
        self.templates.iter().filter(move |t| filter.matches(t))
    }

    /// Clone a template into a placed instance with a fresh id.
    pub fn instantiate(template: &FurnitureItem, placement: Placement) -> FurnitureItem {
        FurnitureItem {
            id: format!("{}-{}", template.id, Uuid::new_v4()),
            position: placement,
            ..template.clone()
        }
    }

    /// Instantiate at the configured default placement.
    pub fn instantiate_default(template: &FurnitureItem, config: &EditorConfig) -> FurnitureItem {
        Self::instantiate(template, config.default_placement)
    }
}

fn template(
    id: &str,
    kind: FurnitureKind,
    name: &str,
    (width, depth, height): (f64, f64, f64),
    color: HexColor,
    image_url: &str,
) -> FurnitureItem {
    FurnitureItem {
        id: id.to_string(),
        kind,
        name: name.to_string(),
        width,
        depth,
        height,
        position: Placement::default(),
        color,
        image_url: Some(image_url.to_string()),
    }
}

/// The living room used by the sample project.
pub fn sample_room() -> Room {
    let mut room = Room::new("Living Room", 5.0, 4.0, 2.7).with_palette(ColorPalette {
        walls: HexColor::new(0xf5, 0xf5, 0xf5),
        floor: HexColor::new(0xd7, 0xcc, 0xa3),
        accent: HexColor::new(0x4a, 0x6f, 0xa5),
    });
    room.id = "room-1".to_string();
    room
}

/// Project seeded into empty storage on first start.
pub fn sample_project(now: DateTime<Utc>) -> Project {
    let catalog = Catalog::builtin();
    let placed = [
        ("chair-1", Placement::new(1.0, 1.0, 0.0)),
        ("sofa-1", Placement::new(2.0, 2.0, 90.0)),
        ("table-1", Placement::new(3.0, 3.0, 0.0)),
    ];
    let furniture = placed
        .into_iter()
        .filter_map(|(id, placement)| catalog.get(id).map(|t| t.with_placement(placement)))
        .collect();

    Project {
        id: "project-1".to_string(),
        name: "Modern Living Room".to_string(),
        created_at: now,
        updated_at: now,
        room: sample_room(),
        furniture,
    }
}
