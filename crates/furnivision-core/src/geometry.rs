//! Placement geometry: world/view conversion, room clamping and rotation steps.
//!
//! World coordinates are meters, room-local, with the origin at the room
//! corner. View coordinates are pixels on the floor-plan canvas. The two are
//! related by a fixed scale and no translation.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Default floor-plan scale in pixels per meter.
pub const PIXELS_PER_METER: f64 = 100.0;

/// Angle applied by a single rotation step, in degrees.
pub const ROTATION_STEP_DEGREES: f64 = 90.0;

/// Position and rotation of a furniture instance within a room.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    /// Distance from the room corner along the room length, in meters.
    pub x: f64,
    /// Distance from the room corner along the room width, in meters.
    pub y: f64,
    /// Rotation in degrees, a multiple of 90 in `[0, 360)`.
    pub rotation: f64,
}

impl Placement {
    /// Create a new placement.
    pub fn new(x: f64, y: f64, rotation: f64) -> Self {
        Self { x, y, rotation }
    }

    /// Position part of the placement.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Copy of this placement moved to `position`, keeping the rotation.
    pub fn with_position(self, position: Point) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..self
        }
    }

    /// Rotation folded into `[0, 360)` and snapped to the nearest quarter turn.
    pub fn normalized_rotation(&self) -> f64 {
        let quarters = (self.rotation / ROTATION_STEP_DEGREES).round();
        (quarters * ROTATION_STEP_DEGREES).rem_euclid(360.0)
    }

    /// Whether the rotated item has its width and depth swapped on screen.
    pub fn is_quarter_turned(&self) -> bool {
        let r = self.normalized_rotation();
        r == 90.0 || r == 270.0
    }
}

/// Convert a world position (meters) to view coordinates (pixels).
pub fn world_to_view(position: Point, scale: f64) -> Point {
    Point::new(position.x * scale, position.y * scale)
}

/// Convert a view point (pixels) to world coordinates (meters).
pub fn view_to_world(point: Point, scale: f64) -> Point {
    Point::new(point.x / scale, point.y / scale)
}

/// Clamp a candidate position so the footprint stays inside the room.
///
/// Each axis is bounded independently to `[0, room - footprint]`. When the
/// footprint is larger than the room along an axis the position is pinned
/// to 0 on that axis and the item overflows.
pub fn clamp_to_room(candidate: Point, footprint: Size, room: Size) -> Point {
    Point::new(
        clamp_axis(candidate.x, room.width - footprint.width),
        clamp_axis(candidate.y, room.height - footprint.height),
    )
}

fn clamp_axis(value: f64, max: f64) -> f64 {
    // min first, then max: an oversized footprint gives a negative max and lands on 0
    value.min(max).max(0.0)
}

/// Advance a rotation by one quarter turn, wrapping at 360.
pub fn rotate_step(degrees: f64) -> f64 {
    (degrees + ROTATION_STEP_DEGREES).rem_euclid(360.0)
}

/// Unrotated floor rectangle covered by a footprint at `origin`, in meters.
pub fn footprint_rect(origin: Point, footprint: Size) -> Rect {
    Rect::from_origin_size(origin, footprint)
}

/// Bounding box of a footprint rotated about its center, in meters.
///
/// Only quarter turns are supported, so the box either matches the footprint
/// or has width and depth swapped. Clamping never uses this box.
pub fn visual_rect(placement: &Placement, footprint: Size) -> Rect {
    let rect = footprint_rect(placement.position(), footprint);
    if placement.is_quarter_turned() {
        Rect::from_center_size(rect.center(), Size::new(footprint.height, footprint.width))
    } else {
        rect
    }
}

/// Fixed-scale transform between world meters and view pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Pixels per meter.
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: PIXELS_PER_METER,
        }
    }
}

impl ViewTransform {
    /// Create a transform with the given pixels-per-meter scale.
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Affine that maps world coordinates to view coordinates.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale)
    }

    /// Convert a world point to view coordinates.
    pub fn world_to_view(&self, position: Point) -> Point {
        world_to_view(position, self.scale)
    }

    /// Convert a view point to world coordinates.
    pub fn view_to_world(&self, point: Point) -> Point {
        view_to_world(point, self.scale)
    }

    /// Convert a view-space offset to world units.
    pub fn offset_to_world(&self, offset: Vec2) -> Vec2 {
        offset / self.scale
    }

    /// Convert a world size to view pixels.
    pub fn size_to_view(&self, size: Size) -> Size {
        size * self.scale
    }

    /// Convert a world rectangle to view pixels.
    pub fn rect_to_view(&self, rect: Rect) -> Rect {
        Rect::from_points(self.world_to_view(rect.origin()), self.world_to_view(Point::new(rect.x1, rect.y1)))
    }
}
