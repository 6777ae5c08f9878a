//! Project document: one room and the furniture placed in it.

use crate::furniture::FurnitureItem;
use crate::room::Room;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for projects.
pub type ProjectId = String;

/// A furniture layout project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub room: Room,
    /// Placed furniture, back to front.
    pub furniture: Vec<FurnitureItem>,
}

impl Project {
    /// Create an empty project with a fresh id.
    pub fn new(name: impl Into<String>, room: Room, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("project-{}", Uuid::new_v4()),
            name: name.into(),
            created_at: now,
            updated_at: now,
            room,
            furniture: Vec::new(),
        }
    }

    /// Refresh the update timestamp.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Get a placed item by id.
    pub fn furniture_item(&self, id: &str) -> Option<&FurnitureItem> {
        self.furniture.iter().find(|f| f.id == id)
    }

    pub fn contains_furniture(&self, id: &str) -> bool {
        self.furniture_item(id).is_some()
    }

    /// Append an item. Returns false if an item with the same id exists.
    pub fn add_furniture(&mut self, item: FurnitureItem) -> bool {
        if self.contains_furniture(&item.id) {
            return false;
        }
        self.furniture.push(item);
        true
    }

    /// Replace the item with a matching id. Returns false if absent.
    pub fn replace_furniture(&mut self, item: FurnitureItem) -> bool {
        match self.furniture.iter_mut().find(|f| f.id == item.id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove the item with the given id.
    pub fn remove_furniture(&mut self, id: &str) -> Option<FurnitureItem> {
        let index = self.furniture.iter().position(|f| f.id == id)?;
        Some(self.furniture.remove(index))
    }

    /// Serialize the project to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a project from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Placement;

    fn project() -> Project {
        Project::new("Den", Room::new("Den", 4.0, 3.0, 2.5), Utc::now())
    }

    #[test]
    fn test_new_project() {
        let project = project();
        assert!(project.id.starts_with("project-"));
        assert!(project.furniture.is_empty());
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn test_furniture_list_operations() {
        let mut project = project();
        let chair = FurnitureItem::new("chair", "Chair", 0.5, 0.5, 0.8);
        let id = chair.id.clone();

        assert!(project.add_furniture(chair.clone()));
        assert!(!project.add_furniture(chair.clone()));
        assert_eq!(project.furniture.len(), 1);

        let moved = chair.with_placement(Placement::new(1.0, 1.0, 0.0));
        assert!(project.replace_furniture(moved.clone()));
        assert_eq!(project.furniture_item(&id), Some(&moved));

        let stranger = FurnitureItem::new("table", "Table", 1.0, 1.0, 0.7);
        assert!(!project.replace_furniture(stranger));

        assert_eq!(project.remove_furniture(&id), Some(moved));
        assert!(project.remove_furniture(&id).is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut project = project();
        project.add_furniture(FurnitureItem::new("sofa", "Sofa", 2.0, 0.9, 0.8));
        let json = project.to_json().unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"updatedAt\""));
        assert_eq!(Project::from_json(&json).unwrap(), project);
    }
}
