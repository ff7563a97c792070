//! In-memory category store. Category names are unique, case-insensitively.

use std::sync::Mutex;
use uuid::Uuid;

use ab_core::error::{AppError, Result};
use ab_core::models::Category;
use ab_core::traits::CategoryRepo;

use crate::lock;

#[derive(Default)]
pub struct MemoryCategoryRepo {
    items: Mutex<Vec<Category>>,
}

impl MemoryCategoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(id: Uuid) -> AppError {
        AppError::NotFound("category", id.to_string())
    }
}

impl CategoryRepo for MemoryCategoryRepo {
    fn add(&self, category: Category) -> Result<()> {
        let mut items = lock(&self.items);
        if items.iter().any(|c| c.name().eq_ignore_ascii_case(category.name())) {
            return Err(AppError::Conflict(
                "a category with the same name already exists".into(),
            ));
        }
        items.push(category);
        Ok(())
    }

    fn get_all(&self) -> Vec<Category> {
        lock(&self.items).clone()
    }

    fn get_by_id(&self, id: Uuid) -> Option<Category> {
        lock(&self.items).iter().find(|c| c.id() == id).cloned()
    }

    fn get_by_name(&self, name: &str) -> Option<Category> {
        lock(&self.items)
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    fn update(&self, category: &Category) -> Result<()> {
        let mut items = lock(&self.items);
        let stored = items
            .iter_mut()
            .find(|c| c.id() == category.id())
            .ok_or_else(|| Self::not_found(category.id()))?;
        stored.set_name(category.name())?;
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        let mut items = lock(&self.items);
        let position = items
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        items.remove(position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_rejects_names_differing_only_by_case() {
        let repo = MemoryCategoryRepo::new();
        repo.add(Category::new("Electronics").unwrap()).unwrap();
        let err = repo.add(Category::new("ELECTRONICS").unwrap());
        assert!(matches!(err, Err(AppError::Conflict(_))));
        assert_eq!(repo.get_all().len(), 1);
    }

    #[test]
    fn get_by_name_is_case_insensitive() {
        let repo = MemoryCategoryRepo::new();
        repo.add(Category::new("Vehicles").unwrap()).unwrap();
        assert!(repo.get_by_name("vehicles").is_some());
        assert!(repo.get_by_name("Furniture").is_none());
    }

    #[test]
    fn update_renames_the_stored_category() {
        let repo = MemoryCategoryRepo::new();
        let mut category = Category::new("Books").unwrap();
        repo.add(category.clone()).unwrap();

        category.set_name("Comics").unwrap();
        repo.update(&category).unwrap();
        assert_eq!(repo.get_by_id(category.id()).unwrap().name(), "Comics");
    }

    #[test]
    fn update_and_delete_require_a_known_id() {
        let repo = MemoryCategoryRepo::new();
        let unsaved = Category::new("Books").unwrap();
        assert!(matches!(repo.update(&unsaved), Err(AppError::NotFound(_, _))));
        assert!(matches!(repo.delete(unsaved.id()), Err(AppError::NotFound(_, _))));
    }
}
