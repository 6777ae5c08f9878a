//! Furniture item definitions.

mod catalog;

pub use catalog::{Catalog, KindFilter, sample_project, sample_room};

use crate::color::HexColor;
use crate::geometry::{Placement, footprint_rect, visual_rect};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for furniture items.
pub type FurnitureId = String;

/// Type tag of a furniture item.
///
/// Chairs, tables and sofas have dedicated 3D models; any other tag is kept
/// verbatim and rendered as a plain box.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FurnitureKind {
    Chair,
    Table,
    Sofa,
    Other(String),
}

impl FurnitureKind {
    pub fn as_str(&self) -> &str {
        match self {
            FurnitureKind::Chair => "chair",
            FurnitureKind::Table => "table",
            FurnitureKind::Sofa => "sofa",
            FurnitureKind::Other(tag) => tag,
        }
    }
}

impl From<String> for FurnitureKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "chair" => FurnitureKind::Chair,
            "table" => FurnitureKind::Table,
            "sofa" => FurnitureKind::Sofa,
            _ => FurnitureKind::Other(tag),
        }
    }
}

impl From<&str> for FurnitureKind {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<FurnitureKind> for String {
    fn from(kind: FurnitureKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for FurnitureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A furniture item: either a catalog template or a placed instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureItem {
    pub id: FurnitureId,
    #[serde(rename = "type")]
    pub kind: FurnitureKind,
    pub name: String,
    /// Extent along the room length, in meters.
    pub width: f64,
    /// Extent along the room width, in meters.
    pub depth: f64,
    pub height: f64,
    pub position: Placement,
    pub color: HexColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl FurnitureItem {
    /// Create a new item with a fresh id at the room origin.
    pub fn new(kind: impl Into<FurnitureKind>, name: impl Into<String>, width: f64, depth: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: kind.into(),
            name: name.into(),
            width,
            depth,
            height,
            position: Placement::default(),
            color: HexColor::white(),
            image_url: None,
        }
    }

    /// Footprint used for clamping. Independent of rotation.
    pub fn footprint(&self) -> Size {
        Size::new(self.width, self.depth)
    }

    /// Top-left corner of the footprint, in meters.
    pub fn origin(&self) -> Point {
        self.position.position()
    }

    /// Unrotated floor rectangle, in meters.
    pub fn bounds(&self) -> Rect {
        footprint_rect(self.origin(), self.footprint())
    }

    /// Rotated bounding box, in meters.
    pub fn visual_bounds(&self) -> Rect {
        visual_rect(&self.position, self.footprint())
    }

    /// Copy of this item at a new placement.
    pub fn with_placement(&self, placement: Placement) -> Self {
        Self {
            position: placement,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip_through_string() {
        assert_eq!(FurnitureKind::from("sofa"), FurnitureKind::Sofa);
        assert_eq!(FurnitureKind::from("lamp"), FurnitureKind::Other("lamp".to_string()));
        assert_eq!(String::from(FurnitureKind::Other("lamp".into())), "lamp");
    }

    #[test]
    fn test_item_serialized_layout() {
        let mut item = FurnitureItem::new("chair", "Stool", 0.4, 0.4, 0.6);
        item.image_url = Some("https://example.com/stool.jpg".to_string());
        item.position = Placement::new(1.0, 2.0, 90.0);

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "chair");
        assert_eq!(value["imageUrl"], "https://example.com/stool.jpg");
        assert_eq!(value["position"]["rotation"], 90.0);
        assert_eq!(value["color"], "#ffffff");
    }

    #[test]
    fn test_item_deserializes_without_image() {
        let json = r##"{"id":"x","type":"desk","name":"Desk","width":1.4,"depth":0.7,"height":0.75,
            "position":{"x":0,"y":0,"rotation":0},"color":"#8B5A2B"}"##;
        let item: FurnitureItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, FurnitureKind::Other("desk".to_string()));
        assert!(item.image_url.is_none());
    }

    #[test]
    fn test_bounds() {
        let mut item = FurnitureItem::new("sofa", "Sofa", 2.0, 0.9, 0.8);
        item.position = Placement::new(1.0, 1.0, 90.0);
        let bounds = item.bounds();
        assert_eq!(bounds.origin(), Point::new(1.0, 1.0));
        assert!((bounds.x1 - 3.0).abs() < 1e-9);
        assert!((bounds.y1 - 1.9).abs() < 1e-9);
        let visual = item.visual_bounds();
        assert!((visual.width() - 0.9).abs() < 1e-9);
        assert!((visual.height() - 2.0).abs() < 1e-9);
    }
}
