//! Listing categories. Name uniqueness (case-insensitive) is a repository
//! rule; removal is guarded by the catalog service while advertisements still
//! reference the category.

use uuid::Uuid;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: Uuid,
    name: String,
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation(
            "category name cannot be empty or whitespace".into(),
        ));
    }
    Ok(())
}

impl Category {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { id: Uuid::new_v4(), name })
    }

    /// Rebuilds a category from persisted state.
    pub fn restore(id: Uuid, name: String) -> Result<Self> {
        validate_name(&name)?;
        Ok(Self { id, name })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_blank_name() {
        assert!(matches!(Category::new("   "), Err(AppError::Validation(_))));
    }

    #[test]
    fn set_name_revalidates() {
        let mut category = Category::new("Electronics").unwrap();
        assert!(category.set_name("").is_err());
        assert_eq!(category.name(), "Electronics");
        category.set_name("Vehicles").unwrap();
        assert_eq!(category.name(), "Vehicles");
    }
}
