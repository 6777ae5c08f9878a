//! Project store: the active project, the saved-project collection and
//! their persistence.
//!
//! Every mutation is written through to the key-value store immediately and
//! then announced to subscribers. Storage failures are logged and otherwise
//! ignored; callers never see them.

use crate::furniture::{Catalog, FurnitureId, FurnitureItem, sample_project};
use crate::geometry::Placement;
use crate::project::{Project, ProjectId};
use crate::room::Room;
use crate::storage::{
    CURRENT_PROJECT_KEY, KeyValueStore, SAVED_PROJECTS_KEY, StorageResult, load_json, save_json,
};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Source of timestamps for project metadata.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Which view of the active project is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// Floor plan.
    #[default]
    #[serde(rename = "2d")]
    TwoD,
    /// Perspective scene.
    #[serde(rename = "3d")]
    ThreeD,
}

/// Change notification delivered to subscribers after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// The active project was replaced, modified or cleared.
    ActiveChanged,
    /// The saved-project collection changed.
    SavedChanged,
    /// The view mode changed.
    ViewModeChanged,
}

/// Handle returned by [`ProjectStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(StoreEvent)>;

/// Owns the active project and the saved-project collection.
pub struct ProjectStore<S: KeyValueStore> {
    storage: S,
    clock: Box<dyn Clock>,
    current: Option<Project>,
    saved: Vec<Project>,
    view_mode: ViewMode,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> ProjectStore<S> {
    /// Restore state from `storage`, seeding the sample project when empty.
    pub fn open(storage: S) -> Self {
        Self::open_with_clock(storage, Box::new(SystemClock))
    }

    /// Like [`ProjectStore::open`] with an explicit clock.
    pub fn open_with_clock(storage: S, clock: Box<dyn Clock>) -> Self {
        let now = clock.now();
        let mut store = Self {
            storage,
            clock,
            current: None,
            saved: Vec::new(),
            view_mode: ViewMode::default(),
            subscribers: Vec::new(),
            next_subscription: 0,
        };

        // Unreadable data falls back to the sample in memory only; the stored
        // value is left alone until the next save.
        match store.storage.get(SAVED_PROJECTS_KEY) {
            Ok(Some(json)) => {
                store.saved = restore_projects(&json).unwrap_or_else(|| vec![sample_project(now)]);
            }
            Ok(None) => {
                info!("No saved projects found, seeding sample project");
                store.saved = vec![sample_project(now)];
                store.persist_saved();
            }
            Err(e) => {
                warn!("Failed to read saved projects: {}", e);
                store.saved = vec![sample_project(now)];
            }
        }

        store.current = match load_json::<Project>(&store.storage, CURRENT_PROJECT_KEY) {
            Ok(Some(project)) => {
                info!("Restored active project {}", project.id);
                Some(project)
            }
            Ok(None) => Some(sample_project(now)),
            Err(e) => {
                warn!("Discarding unreadable active project: {}", e);
                Some(sample_project(now))
            }
        };

        store
    }

    /// The project currently open for editing.
    pub fn current_project(&self) -> Option<&Project> {
        self.current.as_ref()
    }

    /// Saved projects in insertion order.
    pub fn saved_projects(&self) -> &[Project] {
        &self.saved
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Switch between the floor plan and the perspective view. Not persisted.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view_mode != mode {
            self.view_mode = mode;
            self.notify(StoreEvent::ViewModeChanged);
        }
    }

    /// Register an observer called after every change.
    pub fn subscribe(&mut self, subscriber: impl FnMut(StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Start a new, unsaved project and make it active.
    pub fn create_project(&mut self, name: impl Into<String>, room: Room) -> ProjectId {
        let project = Project::new(name, room, self.clock.now());
        let id = project.id.clone();
        debug!("Created project {}", id);
        self.set_current(Some(project));
        id
    }

    /// Replace the active project wholesale.
    pub fn update_project(&mut self, mut project: Project) {
        project.touch(self.clock.now());
        debug!("Updated project {}", project.id);
        self.set_current(Some(project));
    }

    /// Upsert the active project into the saved collection.
    pub fn save_project(&mut self) -> bool {
        let now = self.clock.now();
        let Some(project) = self.current.as_mut() else {
            debug!("save_project ignored: no active project");
            return false;
        };
        project.touch(now);
        let snapshot = project.clone();

        match self.saved.iter_mut().find(|p| p.id == snapshot.id) {
            Some(existing) => *existing = snapshot,
            None => self.saved.push(snapshot),
        }
        debug!("Saved project {}", project.id);

        self.persist_saved();
        self.persist_current();
        self.notify(StoreEvent::SavedChanged);
        self.notify(StoreEvent::ActiveChanged);
        true
    }

    /// Make a saved project active. Unknown ids are ignored.
    pub fn load_project(&mut self, id: &str) -> bool {
        let Some(project) = self.saved.iter().find(|p| p.id == id).cloned() else {
            debug!("load_project ignored: unknown project {}", id);
            return false;
        };
        debug!("Loaded project {}", id);
        self.set_current(Some(project));
        true
    }

    /// Remove a project from the saved collection, closing it if active.
    pub fn delete_project(&mut self, id: &str) {
        let before = self.saved.len();
        self.saved.retain(|p| p.id != id);
        if self.saved.len() != before {
            debug!("Deleted saved project {}", id);
            self.persist_saved();
            self.notify(StoreEvent::SavedChanged);
        }

        if self.current.as_ref().is_some_and(|p| p.id == id) {
            debug!("Deleted active project {}", id);
            self.set_current(None);
        }
    }

    /// Append an item to the active project.
    ///
    /// Ignored without an active project or if the id is already used.
    pub fn add_furniture(&mut self, item: FurnitureItem) -> bool {
        self.mutate_current(|project| {
            let id = item.id.clone();
            let added = project.add_furniture(item);
            if !added {
                warn!("add_furniture ignored: duplicate id {}", id);
            }
            added
        })
    }

    /// Instantiate a catalog template into the active project.
    pub fn add_from_template(&mut self, template: &FurnitureItem, placement: Placement) -> Option<FurnitureId> {
        let item = Catalog::instantiate(template, placement);
        let id = item.id.clone();
        self.add_furniture(item).then_some(id)
    }

    /// Replace the item with a matching id in the active project.
    pub fn update_furniture(&mut self, item: FurnitureItem) -> bool {
        self.mutate_current(|project| project.replace_furniture(item))
    }

    /// Remove an item from the active project.
    pub fn remove_furniture(&mut self, id: &str) -> bool {
        self.mutate_current(|project| project.remove_furniture(id).is_some())
    }

    /// Apply `f` to the active project; on success refresh the timestamp,
    /// persist and notify.
    fn mutate_current(&mut self, f: impl FnOnce(&mut Project) -> bool) -> bool {
        let now = self.clock.now();
        let Some(project) = self.current.as_mut() else {
            debug!("Furniture change ignored: no active project");
            return false;
        };
        if !f(project) {
            return false;
        }
        project.touch(now);
        self.persist_current();
        self.notify(StoreEvent::ActiveChanged);
        true
    }

    fn set_current(&mut self, project: Option<Project>) {
        self.current = project;
        self.persist_current();
        self.notify(StoreEvent::ActiveChanged);
    }

    fn persist_current(&self) {
        let result: StorageResult<()> = match &self.current {
            Some(project) => save_json(&self.storage, CURRENT_PROJECT_KEY, project),
            None => self.storage.remove(CURRENT_PROJECT_KEY),
        };
        if let Err(e) = result {
            warn!("Failed to persist active project: {}", e);
        }
    }

    fn persist_saved(&self) {
        if let Err(e) = save_json(&self.storage, SAVED_PROJECTS_KEY, &self.saved) {
            warn!("Failed to persist saved projects: {}", e);
        }
    }

    fn notify(&mut self, event: StoreEvent) {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(event);
        }
    }
}

/// Parse the saved collection record by record, skipping unreadable ones.
///
/// Returns `None` when the value is not a JSON array or no record survives.
fn restore_projects(json: &str) -> Option<Vec<Project>> {
    let records: Vec<serde_json::Value> = match serde_json::from_str(json) {
        Ok(records) => records,
        Err(e) => {
            warn!("Ignoring unreadable saved projects: {}", e);
            return None;
        }
    };

    let total = records.len();
    let projects: Vec<Project> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(project) => Some(project),
            Err(e) => {
                warn!("Skipping unreadable saved project at index {}: {}", index, e);
                None
            }
        })
        .collect();

    if total > 0 && projects.is_empty() {
        return None;
    }
    info!("Restored {} of {} saved projects", projects.len(), total);
    Some(projects)
}
