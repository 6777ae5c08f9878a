//! FurniVision Core Library
//!
//! Platform-agnostic data model and logic for the FurniVision room planner:
//! room and furniture geometry, the furniture catalog, persisted projects
//! and the floor-plan interaction controller.

pub mod color;
pub mod config;
pub mod furniture;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod project;
pub mod room;
pub mod storage;
pub mod store;

pub use color::{ColorError, HexColor};
pub use config::EditorConfig;
pub use furniture::{Catalog, FurnitureId, FurnitureItem, FurnitureKind, KindFilter, sample_project, sample_room};
pub use geometry::{PIXELS_PER_METER, Placement, ViewTransform, clamp_to_room, rotate_step};
pub use input::{MouseButton, PointerEvent, PointerTarget};
pub use interaction::{InteractionController, InteractionState, Response};
pub use project::{Project, ProjectId};
pub use room::{ColorPalette, Dimensions, Room, RoomError, RoomShape};
pub use storage::{KeyValueStore, MemoryStorage, StorageError, StorageResult};
pub use store::{Clock, ProjectStore, StoreEvent, SubscriptionId, SystemClock, ViewMode};
