//! FurniVision Render Library
//!
//! Read-only views of a project: the 2D floor-plan display list and the 3D
//! scene description. Both are rebuilt from the project store whenever it
//! announces a change.

mod plan;
mod scene;

pub use plan::{FloorPlan, GRID_SPACING, PlanItem, WALL_THICKNESS};
pub use scene::{BoxPart, Camera, FurnitureModel, Lighting, Plane, Scene};
