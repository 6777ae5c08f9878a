//! 3D scene description.
//!
//! World axes: x runs along the room length, z along the room width and y
//! points up. The room corner used as the floor-plan origin sits at the
//! world origin, so a placement `(x, y)` maps to world `(x, 0, y)`.

use furnivision_core::furniture::{FurnitureId, FurnitureItem, FurnitureKind};
use furnivision_core::project::Project;
use glam::{DMat4, DQuat, DVec2, DVec3};
use log::debug;
use peniko::Color;

/// A flat rectangle (floor or wall).
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub center: DVec3,
    pub size: DVec2,
    /// Direction the visible face points to.
    pub normal: DVec3,
    pub color: Color,
}

/// One box of a furniture model, in model space.
///
/// Model space has its origin on the floor at the center of the item's
/// footprint.
#[derive(Debug, Clone, Copy)]
pub struct BoxPart {
    pub name: &'static str,
    pub center: DVec3,
    pub size: DVec3,
    pub color: Color,
}

impl BoxPart {
    fn new(name: &'static str, center: DVec3, size: DVec3, color: Color) -> Self {
        Self {
            name,
            center,
            size,
            color,
        }
    }
}

/// Box assembly standing in for one furniture item.
#[derive(Debug, Clone)]
pub struct FurnitureModel {
    pub item_id: FurnitureId,
    /// Footprint center on the floor, in world space.
    pub translation: DVec3,
    /// Rotation about the vertical axis, in radians.
    pub yaw: f64,
    pub parts: Vec<BoxPart>,
}

impl FurnitureModel {
    /// Build the model for a placed item.
    pub fn build(item: &FurnitureItem) -> Self {
        let (w, d, h) = (item.width, item.depth, item.height);
        let color: Color = item.color.into();
        let parts = match item.kind {
            FurnitureKind::Chair => chair_parts(w, d, h, color),
            FurnitureKind::Sofa => sofa_parts(w, d, h, color, item.color.darken(0.8).into()),
            FurnitureKind::Table => table_parts(w, d, h, color),
            FurnitureKind::Other(_) => vec![BoxPart::new(
                "body",
                DVec3::new(0.0, h / 2.0, 0.0),
                DVec3::new(w, h, d),
                color,
            )],
        };

        Self {
            item_id: item.id.clone(),
            translation: DVec3::new(item.position.x + w / 2.0, 0.0, item.position.y + d / 2.0),
            yaw: item.position.rotation.to_radians(),
            parts,
        }
    }

    /// Model-to-world transform.
    pub fn transform(&self) -> DMat4 {
        DMat4::from_rotation_translation(DQuat::from_rotation_y(self.yaw), self.translation)
    }

    /// World position of a part's center.
    pub fn part_center(&self, part: &BoxPart) -> DVec3 {
        self.transform().transform_point3(part.center)
    }
}

fn chair_parts(w: f64, d: f64, h: f64, color: Color) -> Vec<BoxPart> {
    let seat_height = h * 0.45;
    let back_height = h * 0.55;
    let seat_thickness = h * 0.05;
    let back_thickness = w * 0.05;
    let leg = w.min(d) * 0.05;
    let leg_height = seat_height - seat_thickness;

    let mut parts = vec![
        BoxPart::new(
            "seat",
            DVec3::new(0.0, seat_height - seat_thickness / 2.0, 0.0),
            DVec3::new(w * 0.9, seat_thickness, d * 0.9),
            color,
        ),
        BoxPart::new(
            "back",
            DVec3::new(0.0, seat_height + back_height / 2.0, -d / 2.0 + back_thickness / 2.0),
            DVec3::new(w * 0.8, back_height, back_thickness),
            color,
        ),
    ];
    parts.extend(legs(w / 2.0 - leg, d / 2.0 - leg, leg, leg_height, color));
    parts
}

fn sofa_parts(w: f64, d: f64, h: f64, color: Color, frame: Color) -> Vec<BoxPart> {
    let seat_height = h * 0.4;
    let seat_depth = d * 0.6;
    let back_height = h * 0.6;
    let back_thickness = d * 0.15;
    let arm_width = w * 0.12;
    let arm_height = h * 0.7;
    let cushion_height = h * 0.08;
    let arm = |name, x: f64| {
        BoxPart::new(
            name,
            DVec3::new(x, seat_height + arm_height / 2.0, 0.0),
            DVec3::new(arm_width, arm_height, d * 0.8),
            color,
        )
    };

    vec![
        BoxPart::new(
            "base",
            DVec3::new(0.0, seat_height / 2.0, 0.0),
            DVec3::new(w, seat_height, d),
            frame,
        ),
        BoxPart::new(
            "seat_cushion",
            DVec3::new(0.0, seat_height + cushion_height / 2.0, d / 2.0 - seat_depth / 2.0),
            DVec3::new(w * 0.9, cushion_height, seat_depth),
            color,
        ),
        BoxPart::new(
            "back",
            DVec3::new(0.0, seat_height + back_height / 2.0, -d / 2.0 + back_thickness / 2.0),
            DVec3::new(w * 0.9, back_height, back_thickness),
            color,
        ),
        arm("left_arm", -w / 2.0 + arm_width / 2.0),
        arm("right_arm", w / 2.0 - arm_width / 2.0),
        BoxPart::new(
            "back_cushion",
            DVec3::new(0.0, seat_height + back_height * 0.6, -d / 2.0 + back_thickness * 1.2),
            DVec3::new(w * 0.8, back_height * 0.4, back_thickness * 0.6),
            color,
        ),
    ]
}

fn table_parts(w: f64, d: f64, h: f64, color: Color) -> Vec<BoxPart> {
    let top_thickness = h * 0.08;
    let leg = w.min(d) * 0.06;
    let leg_height = h - top_thickness;
    let apron_height = h * 0.1;
    let apron_thickness = top_thickness * 0.6;
    let apron_y = h - top_thickness - apron_height / 2.0;
    let long_apron = DVec3::new(w * 0.8, apron_height, apron_thickness);
    let short_apron = DVec3::new(apron_thickness, apron_height, d * 0.6);

    let mut parts = vec![
        BoxPart::new(
            "top",
            DVec3::new(0.0, h - top_thickness / 2.0, 0.0),
            DVec3::new(w, top_thickness, d),
            color,
        ),
        BoxPart::new(
            "front_apron",
            DVec3::new(0.0, apron_y, d / 2.0 - apron_thickness / 2.0),
            long_apron,
            color,
        ),
        BoxPart::new(
            "back_apron",
            DVec3::new(0.0, apron_y, -d / 2.0 + apron_thickness / 2.0),
            long_apron,
            color,
        ),
        BoxPart::new(
            "left_apron",
            DVec3::new(-w / 2.0 + apron_thickness / 2.0, apron_y, 0.0),
            short_apron,
            color,
        ),
        BoxPart::new(
            "right_apron",
            DVec3::new(w / 2.0 - apron_thickness / 2.0, apron_y, 0.0),
            short_apron,
            color,
        ),
    ];
    parts.extend(legs(w / 2.0 - leg / 2.0, d / 2.0 - leg / 2.0, leg, leg_height, color));
    parts
}

/// Four square legs standing on the floor at `(±x, ±z)`.
fn legs(x: f64, z: f64, thickness: f64, height: f64, color: Color) -> [BoxPart; 4] {
    let size = DVec3::new(thickness, height, thickness);
    let leg = |name, x, z| BoxPart::new(name, DVec3::new(x, height / 2.0, z), size, color);
    [
        leg("front_left_leg", -x, z),
        leg("front_right_leg", x, z),
        leg("back_left_leg", -x, -z),
        leg("back_right_leg", x, -z),
    ]
}

/// Perspective camera orbiting the room.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: DVec3,
    pub target: DVec3,
    /// Vertical field of view in degrees.
    pub fov: f64,
}

impl Camera {
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, DVec3::Y)
    }

    pub fn projection_matrix(&self, aspect_ratio: f64) -> DMat4 {
        DMat4::perspective_rh(self.fov.to_radians(), aspect_ratio, 0.1, 1000.0)
    }
}

/// Ambient light plus one directional light.
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    pub ambient_intensity: f64,
    pub sun_position: DVec3,
    pub sun_intensity: f64,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.5,
            sun_position: DVec3::splat(5.0),
            sun_intensity: 1.0,
        }
    }
}

/// 3D view of one project: floor, back and left walls, and furniture.
#[derive(Debug, Clone)]
pub struct Scene {
    pub floor: Plane,
    pub back_wall: Plane,
    pub left_wall: Plane,
    pub camera: Camera,
    pub lighting: Lighting,
    pub models: Vec<FurnitureModel>,
}

impl Scene {
    pub fn build(project: &Project) -> Self {
        let dims = project.room.dimensions();
        let (length, width, height) = (dims.length(), dims.width(), dims.height());
        let floor_color: Color = project.room.palette.floor.into();
        let wall_color: Color = project.room.palette.walls.into();

        let models: Vec<_> = project.furniture.iter().map(FurnitureModel::build).collect();
        debug!("Built scene for {} with {} models", project.id, models.len());

        Self {
            floor: Plane {
                center: DVec3::new(length / 2.0, 0.0, width / 2.0),
                size: DVec2::new(length, width),
                normal: DVec3::Y,
                color: floor_color,
            },
            back_wall: Plane {
                center: DVec3::new(length / 2.0, height / 2.0, 0.0),
                size: DVec2::new(length, height),
                normal: DVec3::Z,
                color: wall_color,
            },
            left_wall: Plane {
                center: DVec3::new(0.0, height / 2.0, width / 2.0),
                size: DVec2::new(width, height),
                normal: DVec3::X,
                color: wall_color,
            },
            camera: Camera {
                position: DVec3::new(length * 1.5, height * 1.5, width * 1.5),
                target: DVec3::ZERO,
                fov: 50.0,
            },
            lighting: Lighting::default(),
            models,
        }
    }

    pub fn model(&self, item_id: &str) -> Option<&FurnitureModel> {
        self.models.iter().find(|m| m.item_id == item_id)
    }
}
