//! Shared fixtures for the cross-crate scenario tests.

use std::collections::HashMap;
use std::sync::Mutex;

use ab_core::dto::{CreateAdvertisementDto, RegisterUserDto};
use ab_core::error::Result;
use ab_core::models::AdvertisementType;
use ab_core::traits::StringStore;
use uuid::Uuid;

/// An in-memory stand-in for the snapshot file store.
#[derive(Default)]
pub struct FakeStringStore {
    documents: Mutex<HashMap<String, String>>,
}

impl FakeStringStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StringStore for FakeStringStore {
    fn read_string(&self, path: &str) -> Result<String> {
        Ok(self
            .documents
            .lock()
            .expect("document map lock")
            .get(path)
            .cloned()
            .unwrap_or_default())
    }

    fn write_string(&self, path: &str, content: &str) -> Result<()> {
        self.documents
            .lock()
            .expect("document map lock")
            .insert(path.to_owned(), content.to_owned());
        Ok(())
    }
}

pub fn register_dto(username: &str) -> RegisterUserDto {
    RegisterUserDto {
        username: username.into(),
        password: "secret1".into(),
        first_name: "Test".into(),
        last_name: "User".into(),
        phone: "555-0100".into(),
    }
}

pub fn selling_dto(category_id: Uuid, price: f64) -> CreateAdvertisementDto {
    CreateAdvertisementDto {
        title: format!("Selling at {price}"),
        description: "A sample listing".into(),
        category_id,
        advertisement_type: AdvertisementType::Selling,
        price,
        photo_paths: Vec::new(),
    }
}

pub fn exchange_dto(category_id: Uuid) -> CreateAdvertisementDto {
    CreateAdvertisementDto {
        title: "Swap offer".into(),
        description: "Trade instead of cash".into(),
        category_id,
        advertisement_type: AdvertisementType::Exchange,
        price: 0.0,
        photo_paths: Vec::new(),
    }
}
