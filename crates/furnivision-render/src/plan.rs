//! 2D floor-plan display list.

use furnivision_core::furniture::{FurnitureId, FurnitureItem};
use furnivision_core::geometry::ViewTransform;
use furnivision_core::interaction::InteractionController;
use furnivision_core::project::Project;
use kurbo::{Affine, Line, Point, Rect, Size};
use peniko::Color;

/// Wall outline width in pixels.
pub const WALL_THICKNESS: f64 = 8.0;

/// Distance between grid lines in meters.
pub const GRID_SPACING: f64 = 1.0;

/// A furniture item as drawn on the floor plan.
#[derive(Debug, Clone)]
pub struct PlanItem {
    pub id: FurnitureId,
    /// Text drawn centered in the item.
    pub label: String,
    /// Unrotated rectangle in pixels.
    pub rect: Rect,
    /// Rotation in degrees about the rectangle's center.
    pub rotation: f64,
    pub color: Color,
    pub selected: bool,
}

impl PlanItem {
    fn new(item: &FurnitureItem, transform: &ViewTransform, selected: bool) -> Self {
        Self {
            id: item.id.clone(),
            label: item.name.clone(),
            rect: transform.rect_to_view(item.bounds()),
            rotation: item.position.normalized_rotation(),
            color: item.color.into(),
            selected,
        }
    }

    /// Transform that rotates the rectangle about its center.
    pub fn transform(&self) -> Affine {
        Affine::rotate_about(self.rotation.to_radians(), self.rect.center())
    }

    /// Axis-aligned pixel bounds after rotation.
    pub fn visual_rect(&self) -> Rect {
        self.transform().transform_rect_bbox(self.rect)
    }
}

/// Everything needed to draw the floor plan of one project.
#[derive(Debug, Clone)]
pub struct FloorPlan {
    /// Canvas size in pixels (room length by room width).
    pub size: Size,
    pub floor_color: Color,
    pub wall_color: Color,
    /// Items in drawing order, bottom first.
    pub items: Vec<PlanItem>,
    /// Grid lines in pixels, one per whole meter.
    pub grid: Vec<Line>,
    /// Where the selected item's controls go.
    pub controls_anchor: Option<Point>,
}

impl FloorPlan {
    /// Build the display list for `project` with the controller's selection.
    pub fn build(project: &Project, controller: &InteractionController) -> Self {
        let transform = controller.transform();
        let room = project.room.extent();
        let size = transform.size_to_view(room);
        let selected = controller.selected();

        let items = project
            .furniture
            .iter()
            .map(|item| PlanItem::new(item, &transform, selected == Some(item.id.as_str())))
            .collect();

        Self {
            size,
            floor_color: project.room.palette.floor.into(),
            wall_color: project.room.palette.walls.into(),
            items,
            grid: grid_lines(room, size, &transform),
            controls_anchor: controller.controls_anchor(project),
        }
    }

    /// Canvas rectangle in pixels.
    pub fn bounds(&self) -> Rect {
        self.size.to_rect()
    }

    pub fn selected_item(&self) -> Option<&PlanItem> {
        self.items.iter().find(|item| item.selected)
    }
}

fn grid_lines(room: Size, size: Size, transform: &ViewTransform) -> Vec<Line> {
    let columns = (room.width / GRID_SPACING).floor() as usize;
    let rows = (room.height / GRID_SPACING).floor() as usize;

    let vertical = (1..=columns).map(|i| {
        let x = transform.scale * GRID_SPACING * i as f64;
        Line::new((x, 0.0), (x, size.height))
    });
    let horizontal = (1..=rows).map(|i| {
        let y = transform.scale * GRID_SPACING * i as f64;
        Line::new((0.0, y), (size.width, y))
    });
    vertical.chain(horizontal).collect()
}
