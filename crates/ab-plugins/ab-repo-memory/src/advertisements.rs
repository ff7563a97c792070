//! In-memory listing store.

use std::sync::Mutex;
use uuid::Uuid;

use ab_core::error::{AppError, Result};
use ab_core::filter::AdvertisementFilter;
use ab_core::models::Advertisement;
use ab_core::traits::{AdvertisementRepo, Snapshot};

use crate::codec;
use crate::lock;

#[derive(Default)]
pub struct MemoryAdvertisementRepo {
    items: Mutex<Vec<Advertisement>>,
}

impl MemoryAdvertisementRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(id: Uuid) -> AppError {
        AppError::NotFound("advertisement", id.to_string())
    }

    /// Runs an entity-level state change against the stored listing.
    fn with_mut<R>(&self, id: Uuid, op: impl FnOnce(&mut Advertisement) -> R) -> Result<R> {
        let mut items = lock(&self.items);
        let ad = items
            .iter_mut()
            .find(|ad| ad.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        Ok(op(ad))
    }
}

impl AdvertisementRepo for MemoryAdvertisementRepo {
    fn add(&self, advertisement: Advertisement) -> Result<()> {
        lock(&self.items).push(advertisement);
        Ok(())
    }

    fn get_all(&self) -> Vec<Advertisement> {
        lock(&self.items).clone()
    }

    fn get_by_id(&self, id: Uuid) -> Option<Advertisement> {
        lock(&self.items).iter().find(|ad| ad.id() == id).cloned()
    }

    fn get_by_user_id(&self, owner_id: Uuid) -> Vec<Advertisement> {
        lock(&self.items)
            .iter()
            .filter(|ad| ad.owner_id == owner_id)
            .cloned()
            .collect()
    }

    fn find_by_filters(&self, filter: &AdvertisementFilter) -> Vec<Advertisement> {
        lock(&self.items)
            .iter()
            .filter(|ad| filter.matches(ad))
            .cloned()
            .collect()
    }

    fn update(&self, advertisement: &Advertisement) -> Result<()> {
        self.with_mut(advertisement.id(), |stored| stored.apply_update(advertisement))
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        let mut items = lock(&self.items);
        let position = items
            .iter()
            .position(|ad| ad.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        items.remove(position);
        Ok(())
    }

    fn publish(&self, id: Uuid) -> Result<bool> {
        self.with_mut(id, Advertisement::publish)
    }

    fn unpublish(&self, id: Uuid) -> Result<bool> {
        self.with_mut(id, Advertisement::unpublish)
    }

    fn promote(&self, id: Uuid) -> Result<bool> {
        self.with_mut(id, Advertisement::promote)
    }
}

impl Snapshot for MemoryAdvertisementRepo {
    fn serialize_all(&self) -> Result<String> {
        codec::advertisements_to_json(&lock(&self.items))
    }

    fn deserialize_all(&self, json: &str) -> Result<()> {
        let mut items = lock(&self.items);
        items.clear();
        *items = codec::advertisements_from_json(json)?;
        Ok(())
    }
}
