//! Floor-plan interaction controller.
//!
//! Turns pointer input into placement changes on the active project:
//! selecting an item, dragging it (keeping the grab point under the cursor),
//! rotating it in quarter turns and deleting it. At most one item is
//! selected at a time.
//!
//! ```text
//!   Idle ──down(item)──> Selected ──down(same item)──> Dragging
//!    ^                     ^  │                           │
//!    │                     │  └──down(other item)──┐      │ move: clamp + write
//!    │                     │                       v      │
//!    │                     └────── up / leave ─────────────┘
//!    └──── background click / delete ──── (any selected state)
//! ```
//!
//! Every change is written through the [`ProjectStore`] immediately. Without
//! an active project every command is ignored.

use crate::config::EditorConfig;
use crate::furniture::{FurnitureId, FurnitureItem};
use crate::geometry::{Placement, ViewTransform, clamp_to_room, rotate_step};
use crate::input::{MouseButton, PointerEvent, PointerTarget};
use crate::project::Project;
use crate::storage::KeyValueStore;
use crate::store::ProjectStore;
use kurbo::{Point, Vec2};
use log::debug;

/// Selection and drag state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// Nothing selected.
    #[default]
    Idle,
    /// An item is selected and its controls are shown.
    Selected {
        item: FurnitureId,
        /// Pointer position relative to the item's view origin, in pixels.
        offset: Vec2,
    },
    /// The selected item follows the pointer.
    Dragging { item: FurnitureId, offset: Vec2 },
}

impl InteractionState {
    /// The selected item, if any (dragging implies selected).
    pub fn selected(&self) -> Option<&str> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Selected { item, .. } | InteractionState::Dragging { item, .. } => Some(item),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, InteractionState::Dragging { .. })
    }
}

/// Outcome of a controller command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Response {
    /// Nothing changed.
    Ignored,
    /// An item became selected.
    Selected,
    /// A drag started. The platform should suppress its default drag behavior.
    DragStarted,
    /// The dragged item moved to a new placement.
    Moved(Placement),
    /// A drag ended; the item stays selected.
    Released,
    /// The selection was cleared.
    Deselected,
    /// The selected item was rotated to the given angle.
    Rotated(f64),
    /// The selected item was removed.
    Deleted,
}

impl Response {
    /// Whether the platform should prevent the default handling of the event.
    pub fn suppress_default(&self) -> bool {
        matches!(self, Response::DragStarted | Response::Moved(_))
    }
}

/// State machine driving the 2D floor plan.
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    transform: ViewTransform,
    controls_offset: f64,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl InteractionController {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            transform: config.transform(),
            controls_offset: config.controls_offset,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Id of the selected item.
    pub fn selected(&self) -> Option<&str> {
        self.state.selected()
    }

    /// Dispatch a platform pointer event.
    ///
    /// `target` is what lies under the pointer for `Down` events and is
    /// ignored otherwise.
    pub fn handle_pointer_event<S: KeyValueStore>(
        &mut self,
        store: &mut ProjectStore<S>,
        event: &PointerEvent,
        target: &PointerTarget,
    ) -> Response {
        match event {
            PointerEvent::Down { position, button: MouseButton::Left } => match target.item() {
                Some(id) => self.pointer_down(store, id, *position),
                None => self.background_click(),
            },
            PointerEvent::Down { .. } => Response::Ignored,
            PointerEvent::Move { position } => self.pointer_move(store, *position),
            PointerEvent::Up { .. } => self.pointer_released(),
            PointerEvent::Leave => self.pointer_left(),
        }
    }

    /// Pointer pressed on an item.
    ///
    /// Selects the item, or starts dragging it if it is already selected.
    /// The grab offset is measured from the item's origin each time so the
    /// item never jumps under the cursor.
    pub fn pointer_down<S: KeyValueStore>(
        &mut self,
        store: &mut ProjectStore<S>,
        item_id: &str,
        pointer: Point,
    ) -> Response {
        let Some(project) = store.current_project() else {
            self.state = InteractionState::Idle;
            return Response::Ignored;
        };
        let Some(item) = project.furniture_item(item_id) else {
            debug!("pointer_down ignored: unknown item {}", item_id);
            return Response::Ignored;
        };
        let offset = pointer - self.transform.world_to_view(item.origin());

        match &self.state {
            InteractionState::Dragging { item, .. } if item == item_id => Response::Ignored,
            InteractionState::Selected { item, .. } if item == item_id => {
                debug!("Dragging {}", item_id);
                self.state = InteractionState::Dragging {
                    item: item_id.to_string(),
                    offset,
                };
                Response::DragStarted
            }
            _ => {
                debug!("Selected {}", item_id);
                self.state = InteractionState::Selected {
                    item: item_id.to_string(),
                    offset,
                };
                Response::Selected
            }
        }
    }

    /// Pointer moved. Only has an effect while dragging.
    pub fn pointer_move<S: KeyValueStore>(&mut self, store: &mut ProjectStore<S>, pointer: Point) -> Response {
        let (item_id, offset) = match &self.state {
            InteractionState::Dragging { item, offset } => (item.clone(), *offset),
            _ => return Response::Ignored,
        };
        let Some(item) = self.live_item(store, &item_id) else {
            return Response::Ignored;
        };
        let Some(project) = store.current_project() else {
            return Response::Ignored;
        };

        let candidate = self.transform.view_to_world(pointer - offset);
        let position = clamp_to_room(candidate, item.footprint(), project.room.extent());
        let placement = item.position.with_position(position);
        store.update_furniture(item.with_placement(placement));
        Response::Moved(placement)
    }

    /// Pointer released anywhere in the document.
    pub fn pointer_released(&mut self) -> Response {
        self.end_drag()
    }

    /// Pointer left the document.
    pub fn pointer_left(&mut self) -> Response {
        self.end_drag()
    }

    fn end_drag(&mut self) -> Response {
        match std::mem::take(&mut self.state) {
            InteractionState::Dragging { item, offset } => {
                debug!("Drag of {} ended", item);
                self.state = InteractionState::Selected { item, offset };
                Response::Released
            }
            other => {
                self.state = other;
                Response::Ignored
            }
        }
    }

    /// Click on empty canvas: clear the selection.
    pub fn background_click(&mut self) -> Response {
        match self.state {
            InteractionState::Idle => Response::Ignored,
            _ => {
                self.state = InteractionState::Idle;
                Response::Deselected
            }
        }
    }

    /// Rotate the selected item a quarter turn.
    pub fn rotate_selected<S: KeyValueStore>(&mut self, store: &mut ProjectStore<S>) -> Response {
        let Some(item_id) = self.selected().map(str::to_string) else {
            return Response::Ignored;
        };
        let Some(item) = self.live_item(store, &item_id) else {
            return Response::Ignored;
        };
        let placement = Placement {
            rotation: rotate_step(item.position.rotation),
            ..item.position
        };
        store.update_furniture(item.with_placement(placement));
        Response::Rotated(placement.rotation)
    }

    /// Remove the selected item from the project.
    pub fn delete_selected<S: KeyValueStore>(&mut self, store: &mut ProjectStore<S>) -> Response {
        let Some(item_id) = self.selected().map(str::to_string) else {
            return Response::Ignored;
        };
        if self.live_item(store, &item_id).is_none() {
            return Response::Ignored;
        }
        store.remove_furniture(&item_id);
        self.state = InteractionState::Idle;
        Response::Deleted
    }

    /// Drop the selection if it no longer refers to an item of the active
    /// project. Returns true if a selection remains.
    pub fn sync_with<S: KeyValueStore>(&mut self, store: &ProjectStore<S>) -> bool {
        let valid = match (self.state.selected(), store.current_project()) {
            (None, _) => return false,
            (Some(id), Some(project)) => project.contains_furniture(id),
            (Some(_), None) => false,
        };
        if !valid {
            debug!("Selection cleared: item no longer in active project");
            self.state = InteractionState::Idle;
        }
        valid
    }

    /// Clone of a selected item that still exists, resetting to idle otherwise.
    fn live_item<S: KeyValueStore>(&mut self, store: &ProjectStore<S>, item_id: &str) -> Option<FurnitureItem> {
        let item = store
            .current_project()
            .and_then(|project| project.furniture_item(item_id))
            .cloned();
        if item.is_none() {
            self.sync_with(store);
        }
        item
    }

    /// Topmost item whose rotated bounds contain a view point.
    pub fn item_at<'a>(&self, project: &'a Project, point: Point) -> Option<&'a FurnitureItem> {
        let world = self.transform.view_to_world(point);
        project
            .furniture
            .iter()
            .rev()
            .find(|item| item.visual_bounds().contains(world))
    }

    /// Pointer target for a view point.
    pub fn target_at(&self, project: &Project, point: Point) -> PointerTarget {
        match self.item_at(project, point) {
            Some(item) => PointerTarget::Item(item.id.clone()),
            None => PointerTarget::Background,
        }
    }

    /// Where the selected item's controls are drawn, in view pixels.
    pub fn controls_anchor(&self, project: &Project) -> Option<Point> {
        let item = project.furniture_item(self.selected()?)?;
        let origin = self.transform.world_to_view(item.origin());
        Some(Point::new(origin.x, origin.y - self.controls_offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::Room;
    use crate::storage::MemoryStorage;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// Store with an active 5m x 4m project holding a chair at (1, 1) and
    /// a sofa at (3, 2).
    fn setup() -> (ProjectStore<MemoryStorage>, FurnitureId, FurnitureId) {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut store = ProjectStore::open(MemoryStorage::new());
        store.create_project("Den", Room::new("Den", 5.0, 4.0, 2.7));

        let mut chair = FurnitureItem::new("chair", "Chair", 0.5, 0.5, 0.8);
        chair.position = Placement::new(1.0, 1.0, 0.0);
        let mut sofa = FurnitureItem::new("sofa", "Sofa", 2.0, 0.9, 0.8);
        sofa.position = Placement::new(3.0, 2.0, 0.0);
        let (chair_id, sofa_id) = (chair.id.clone(), sofa.id.clone());
        store.add_furniture(chair);
        store.add_furniture(sofa);
        (store, chair_id, sofa_id)
    }

    fn placement_of(store: &ProjectStore<MemoryStorage>, id: &str) -> Placement {
        store.current_project().unwrap().furniture_item(id).unwrap().position
    }

    #[test]
    fn test_select_records_offset() {
        let (mut store, chair, _) = setup();
        let mut controller = InteractionController::default();

        let response = controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        assert_eq!(response, Response::Selected);
        assert_eq!(
            controller.state(),
            &InteractionState::Selected {
                item: chair.clone(),
                offset: Vec2::new(20.0, 30.0),
            }
        );
    }

    #[test]
    fn test_second_press_starts_drag() {
        let (mut store, chair, _) = setup();
        let mut controller = InteractionController::default();

        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        let response = controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        assert_eq!(response, Response::DragStarted);
        assert!(response.suppress_default());
        assert!(controller.state().is_dragging());
    }

    #[test]
    fn test_selecting_other_item_replaces_selection() {
        let (mut store, chair, sofa) = setup();
        let mut controller = InteractionController::default();

        controller.pointer_down(&mut store, &chair, Point::new(110.0, 110.0));
        let response = controller.pointer_down(&mut store, &sofa, Point::new(310.0, 210.0));
        assert_eq!(response, Response::Selected);
        assert_eq!(controller.selected(), Some(sofa.as_str()));
        assert!(!controller.state().is_dragging());
    }

    #[test]
    fn test_pressing_other_item_while_dragging_selects_it() {
        let (mut store, chair, sofa) = setup();
        let mut controller = InteractionController::default();

        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        assert!(controller.state().is_dragging());

        let response = controller.pointer_down(&mut store, &sofa, Point::new(350.0, 240.0));
        assert_eq!(response, Response::Selected);
        assert_eq!(
            controller.state(),
            &InteractionState::Selected {
                item: sofa.clone(),
                offset: Vec2::new(50.0, 40.0),
            }
        );

        // The chair no longer follows the pointer
        controller.pointer_move(&mut store, Point::new(400.0, 300.0));
        assert_eq!(placement_of(&store, &chair), Placement::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_pressing_dragged_item_again_is_ignored() {
        let (mut store, chair, _) = setup();
        let mut controller = InteractionController::default();

        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        let response = controller.pointer_down(&mut store, &chair, Point::new(140.0, 140.0));
        assert_eq!(response, Response::Ignored);
        assert_eq!(
            controller.state(),
            &InteractionState::Dragging {
                item: chair.clone(),
                offset: Vec2::new(20.0, 30.0),
            }
        );
    }

    #[test]
    fn test_drag_keeps_grab_offset() {
        let (mut store, chair, _) = setup();
        let mut controller = InteractionController::default();

        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));

        let response = controller.pointer_move(&mut store, Point::new(220.0, 230.0));
        assert_eq!(response, Response::Moved(Placement::new(2.0, 2.0, 0.0)));
        assert_eq!(placement_of(&store, &chair), Placement::new(2.0, 2.0, 0.0));
    }

    #[test]
    fn test_drag_clamps_to_room() {
        let (mut store, chair, _) = setup();
        let mut controller = InteractionController::default();

        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        controller.pointer_move(&mut store, Point::new(1000.0, 130.0));

        let placement = placement_of(&store, &chair);
        assert!(approx(placement.x, 4.5));
        assert!(approx(placement.y, 1.0));

        controller.pointer_move(&mut store, Point::new(-300.0, -300.0));
        assert_eq!(placement_of(&store, &chair).position(), Point::ZERO);
    }

    #[test]
    fn test_released_placement_is_clamp_fixed_point() {
        let (mut store, _, sofa) = setup();
        let mut controller = InteractionController::default();

        controller.pointer_down(&mut store, &sofa, Point::new(310.0, 210.0));
        controller.pointer_down(&mut store, &sofa, Point::new(310.0, 210.0));
        controller.pointer_move(&mut store, Point::new(487.0, 399.0));
        controller.pointer_released();

        let item = store.current_project().unwrap().furniture_item(&sofa).unwrap().clone();
        let room = store.current_project().unwrap().room.extent();
        assert_eq!(clamp_to_room(item.origin(), item.footprint(), room), item.origin());
    }

    #[test]
    fn test_release_anywhere_ends_drag() {
        let (mut store, chair, _) = setup();
        let mut controller = InteractionController::default();

        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        assert_eq!(controller.pointer_left(), Response::Released);
        assert_eq!(controller.selected(), Some(chair.as_str()));
        assert!(!controller.state().is_dragging());

        // Moves after release do nothing
        let before = placement_of(&store, &chair);
        assert_eq!(controller.pointer_move(&mut store, Point::new(400.0, 300.0)), Response::Ignored);
        assert_eq!(placement_of(&store, &chair), before);
        assert_eq!(controller.pointer_released(), Response::Ignored);
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let (mut store, chair, _) = setup();
        let mut controller = InteractionController::default();
        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        assert_eq!(controller.pointer_move(&mut store, Point::new(300.0, 300.0)), Response::Ignored);
        assert_eq!(placement_of(&store, &chair), Placement::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_background_click_deselects() {
        let (mut store, chair, _) = setup();
        let mut controller = InteractionController::default();

        assert_eq!(controller.background_click(), Response::Ignored);
        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        assert_eq!(controller.background_click(), Response::Deselected);
        assert_eq!(controller.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_rotate_selected() {
        let (mut store, chair, _) = setup();
        let mut controller = InteractionController::default();

        assert_eq!(controller.rotate_selected(&mut store), Response::Ignored);
        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        assert_eq!(controller.rotate_selected(&mut store), Response::Rotated(90.0));
        assert_eq!(placement_of(&store, &chair).rotation, 90.0);
        assert_eq!(controller.selected(), Some(chair.as_str()));

        for _ in 0..3 {
            controller.rotate_selected(&mut store);
        }
        assert_eq!(placement_of(&store, &chair), Placement::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_rotation_keeps_unrotated_footprint_for_clamping() {
        let (mut store, _, sofa) = setup();
        let mut controller = InteractionController::default();

        controller.pointer_down(&mut store, &sofa, Point::new(310.0, 210.0));
        controller.rotate_selected(&mut store);
        controller.pointer_down(&mut store, &sofa, Point::new(310.0, 210.0));
        controller.pointer_move(&mut store, Point::new(1000.0, 1000.0));

        let placement = placement_of(&store, &sofa);
        assert!(approx(placement.x, 3.0));
        assert!(approx(placement.y, 3.1));
        assert_eq!(placement.rotation, 90.0);
    }

    #[test]
    fn test_delete_selected() {
        let (mut store, chair, sofa) = setup();
        let mut controller = InteractionController::default();

        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        assert_eq!(controller.delete_selected(&mut store), Response::Deleted);
        assert_eq!(controller.state(), &InteractionState::Idle);

        let project = store.current_project().unwrap();
        assert!(!project.contains_furniture(&chair));
        assert!(project.contains_furniture(&sofa));
        assert_eq!(controller.delete_selected(&mut store), Response::Ignored);
    }

    #[test]
    fn test_no_active_project_is_noop() {
        let (mut store, chair, _) = setup();
        let mut controller = InteractionController::default();
        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));

        let active = store.current_project().unwrap().id.clone();
        store.save_project();
        store.delete_project(&active);
        assert!(store.current_project().is_none());

        assert_eq!(controller.rotate_selected(&mut store), Response::Ignored);
        assert_eq!(controller.delete_selected(&mut store), Response::Ignored);
        assert_eq!(controller.pointer_down(&mut store, &chair, Point::ZERO), Response::Ignored);
        assert_eq!(controller.pointer_move(&mut store, Point::ZERO), Response::Ignored);
        assert_eq!(controller.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_item_removed_elsewhere_resets_selection() {
        let (mut store, chair, _) = setup();
        let mut controller = InteractionController::default();
        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));

        store.remove_furniture(&chair);
        assert_eq!(controller.pointer_move(&mut store, Point::new(300.0, 300.0)), Response::Ignored);
        assert_eq!(controller.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_handle_pointer_event_sequence() {
        let (mut store, chair, _) = setup();
        let mut controller = InteractionController::default();
        let target = {
            let project = store.current_project().unwrap();
            controller.target_at(project, Point::new(120.0, 130.0))
        };
        assert_eq!(target, PointerTarget::Item(chair.clone()));

        let down = PointerEvent::Down {
            position: Point::new(120.0, 130.0),
            button: MouseButton::Left,
        };
        assert_eq!(controller.handle_pointer_event(&mut store, &down, &target), Response::Selected);
        assert_eq!(controller.handle_pointer_event(&mut store, &down, &target), Response::DragStarted);

        let mv = PointerEvent::Move {
            position: Point::new(320.0, 130.0),
        };
        assert_eq!(
            controller.handle_pointer_event(&mut store, &mv, &PointerTarget::Background),
            Response::Moved(Placement::new(3.0, 1.0, 0.0))
        );

        let up = PointerEvent::Up {
            position: Point::new(320.0, 130.0),
            button: MouseButton::Left,
        };
        assert_eq!(
            controller.handle_pointer_event(&mut store, &up, &PointerTarget::Background),
            Response::Released
        );

        let right = PointerEvent::Down {
            position: Point::new(5.0, 5.0),
            button: MouseButton::Right,
        };
        assert_eq!(
            controller.handle_pointer_event(&mut store, &right, &PointerTarget::Background),
            Response::Ignored
        );

        let background = PointerEvent::Down {
            position: Point::new(5.0, 5.0),
            button: MouseButton::Left,
        };
        assert_eq!(
            controller.handle_pointer_event(&mut store, &background, &PointerTarget::Background),
            Response::Deselected
        );
    }

    #[test]
    fn test_item_at_prefers_topmost() {
        let (mut store, chair, sofa) = setup();
        let mut chair_item = store.current_project().unwrap().furniture_item(&chair).unwrap().clone();
        chair_item.position = Placement::new(3.5, 2.2, 0.0);
        store.update_furniture(chair_item);

        let controller = InteractionController::default();
        let project = store.current_project().unwrap();
        // Sofa was added after the chair so it is on top
        assert_eq!(controller.item_at(project, Point::new(360.0, 230.0)).map(|i| i.id.as_str()), Some(sofa.as_str()));
        assert!(controller.item_at(project, Point::new(10.0, 390.0)).is_none());
    }

    #[test]
    fn test_controls_anchor() {
        let (mut store, chair, _) = setup();
        let mut controller = InteractionController::default();
        assert!(controller.controls_anchor(store.current_project().unwrap()).is_none());

        controller.pointer_down(&mut store, &chair, Point::new(120.0, 130.0));
        let anchor = controller.controls_anchor(store.current_project().unwrap()).unwrap();
        assert_eq!(anchor, Point::new(100.0, 60.0));
    }
}
