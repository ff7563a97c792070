//! Category lifecycle. Creation registers atomically; removal is refused
//! while any advertisement still references the category.

use uuid::Uuid;

use ab_core::error::{AppError, Result};
use ab_core::models::Category;
use ab_core::traits::{AdvertisementRepo, CategoryRepo};

/// Validates the name and registers the new category in one step.
pub fn create_category(categories: &impl CategoryRepo, name: &str) -> Result<Category> {
    let category = Category::new(name)?;
    categories.add(category.clone())?;
    Ok(category)
}

/// Deletes a category that no advertisement references anymore.
pub fn remove_category(
    categories: &impl CategoryRepo,
    advertisements: &impl AdvertisementRepo,
    id: Uuid,
) -> Result<()> {
    let referenced = advertisements.get_all().iter().any(|ad| ad.category_id == id);
    if referenced {
        return Err(AppError::Conflict(
            "cannot delete a category with existing advertisements".into(),
        ));
    }
    categories.delete(id)
}
