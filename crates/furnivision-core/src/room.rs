//! Room shape, dimensions and palette.

use crate::color::HexColor;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Room validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoomError {
    #[error("Room {field} must be positive, got {value}")]
    NonPositiveDimension { field: &'static str, value: f64 },
}

/// Shape tag of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomShape {
    Square,
    #[default]
    Rectangle,
    LShape,
}

impl RoomShape {
    /// All shapes, in the order they are offered to the user.
    pub const ALL: [RoomShape; 3] = [RoomShape::Square, RoomShape::Rectangle, RoomShape::LShape];

    /// Get display name for this shape.
    pub fn name(self) -> &'static str {
        match self {
            RoomShape::Square => "Square",
            RoomShape::Rectangle => "Rectangle",
            RoomShape::LShape => "L-Shape",
        }
    }
}

/// Secondary wing length and width given to a room switched to `LShape`.
pub const DEFAULT_SECONDARY_SIZE: f64 = 2.0;

/// Room dimensions in meters.
///
/// The secondary wing of an L-shaped room only exists on the `LShape`
/// variant. It is stored for editors and renderers but never used for
/// placement bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimensions {
    Rectangle {
        length: f64,
        width: f64,
        height: f64,
    },
    LShape {
        length: f64,
        width: f64,
        height: f64,
        secondary_length: f64,
        secondary_width: f64,
    },
}

impl Dimensions {
    pub fn rectangle(length: f64, width: f64, height: f64) -> Self {
        Self::Rectangle { length, width, height }
    }

    pub fn length(&self) -> f64 {
        match *self {
            Self::Rectangle { length, .. } | Self::LShape { length, .. } => length,
        }
    }

    pub fn width(&self) -> f64 {
        match *self {
            Self::Rectangle { width, .. } | Self::LShape { width, .. } => width,
        }
    }

    pub fn height(&self) -> f64 {
        match *self {
            Self::Rectangle { height, .. } | Self::LShape { height, .. } => height,
        }
    }

    /// Secondary wing `(length, width)` for L-shaped rooms.
    pub fn secondary(&self) -> Option<(f64, f64)> {
        match *self {
            Self::Rectangle { .. } => None,
            Self::LShape {
                secondary_length,
                secondary_width,
                ..
            } => Some((secondary_length, secondary_width)),
        }
    }

    /// Floor extent used for clamping: length along x, width along y.
    pub fn extent(&self) -> Size {
        Size::new(self.length(), self.width())
    }

    fn into_rectangle(self) -> Self {
        Self::rectangle(self.length(), self.width(), self.height())
    }

    fn into_l_shape(self) -> Self {
        match self {
            Self::LShape { .. } => self,
            Self::Rectangle { length, width, height } => Self::LShape {
                length,
                width,
                height,
                secondary_length: DEFAULT_SECONDARY_SIZE,
                secondary_width: DEFAULT_SECONDARY_SIZE,
            },
        }
    }
}

/// Wall, floor and accent colors of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub walls: HexColor,
    pub floor: HexColor,
    pub accent: HexColor,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            walls: HexColor::new(0xf5, 0xf5, 0xf5),
            floor: HexColor::new(0xd7, 0xcc, 0xa3),
            accent: HexColor::new(0x4a, 0x6f, 0xa5),
        }
    }
}

/// A room that furniture is placed into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RoomRecord", into = "RoomRecord")]
pub struct Room {
    pub id: String,
    pub name: String,
    shape: RoomShape,
    dimensions: Dimensions,
    pub palette: ColorPalette,
}

impl Room {
    /// Create a rectangular (or square) room with a fresh id.
    pub fn new(name: impl Into<String>, length: f64, width: f64, height: f64) -> Self {
        Self {
            id: format!("room-{}", Uuid::new_v4()),
            name: name.into(),
            shape: RoomShape::Rectangle,
            dimensions: Dimensions::rectangle(length, width, height),
            palette: ColorPalette::default(),
        }
    }

    pub fn shape(&self) -> RoomShape {
        self.shape
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// Floor extent in meters.
    pub fn extent(&self) -> Size {
        self.dimensions.extent()
    }

    /// Change the room shape, converting dimensions to the matching variant.
    ///
    /// Switching to `LShape` seeds a 2 m by 2 m secondary wing. Switching
    /// away discards it.
    pub fn set_shape(&mut self, shape: RoomShape) {
        self.dimensions = match shape {
            RoomShape::LShape => self.dimensions.into_l_shape(),
            RoomShape::Square | RoomShape::Rectangle => self.dimensions.into_rectangle(),
        };
        self.shape = shape;
    }

    /// Replace the dimensions. The shape follows the variant: L-shaped
    /// dimensions make an L-shaped room, rectangular ones drop an L shape
    /// back to a rectangle.
    pub fn set_dimensions(&mut self, dimensions: Dimensions) {
        self.shape = match (dimensions, self.shape) {
            (Dimensions::LShape { .. }, _) => RoomShape::LShape,
            (Dimensions::Rectangle { .. }, RoomShape::LShape) => RoomShape::Rectangle,
            (Dimensions::Rectangle { .. }, shape) => shape,
        };
        self.dimensions = dimensions;
    }

    /// Builder-style palette override.
    pub fn with_palette(mut self, palette: ColorPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Check that every dimension is strictly positive.
    pub fn validate(&self) -> Result<(), RoomError> {
        let mut fields = vec![
            ("length", self.dimensions.length()),
            ("width", self.dimensions.width()),
            ("height", self.dimensions.height()),
        ];
        if let Some((secondary_length, secondary_width)) = self.dimensions.secondary() {
            fields.push(("secondary length", secondary_length));
            fields.push(("secondary width", secondary_width));
        }
        match fields.into_iter().find(|(_, value)| !(*value > 0.0)) {
            Some((field, value)) => Err(RoomError::NonPositiveDimension { field, value }),
            None => Ok(()),
        }
    }
}

/// Persisted room layout: flat dimensions with optional secondary fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoomRecord {
    id: String,
    name: String,
    dimensions: DimensionsRecord,
    shape: RoomShape,
    palette: ColorPalette,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DimensionsRecord {
    length: f64,
    width: f64,
    height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secondary_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secondary_width: Option<f64>,
}

impl From<RoomRecord> for Room {
    fn from(record: RoomRecord) -> Self {
        let d = record.dimensions;
        let base = Dimensions::rectangle(d.length, d.width, d.height);
        let dimensions = match record.shape {
            RoomShape::LShape => match (d.secondary_length, d.secondary_width) {
                (Some(secondary_length), Some(secondary_width)) => Dimensions::LShape {
                    length: d.length,
                    width: d.width,
                    height: d.height,
                    secondary_length,
                    secondary_width,
                },
                _ => base.into_l_shape(),
            },
            RoomShape::Square | RoomShape::Rectangle => base,
        };
        Self {
            id: record.id,
            name: record.name,
            shape: record.shape,
            dimensions,
            palette: record.palette,
        }
    }
}

impl From<Room> for RoomRecord {
    fn from(room: Room) -> Self {
        let secondary = room.dimensions.secondary();
        Self {
            id: room.id,
            name: room.name,
            dimensions: DimensionsRecord {
                length: room.dimensions.length(),
                width: room.dimensions.width(),
                height: room.dimensions.height(),
                secondary_length: secondary.map(|(l, _)| l),
                secondary_width: secondary.map(|(_, w)| w),
            },
            shape: room.shape,
            palette: room.palette,
        }
    }
}
