//! In-memory account store. Usernames are globally unique,
//! case-insensitively. Snapshots never include the derived advertisement and
//! chat views; those are recomputed from the other repositories.

use std::sync::Mutex;
use uuid::Uuid;

use ab_core::error::{AppError, Result};
use ab_core::models::RegisteredUser;
use ab_core::traits::{RegisteredUserRepo, Snapshot};

use crate::codec;
use crate::lock;

#[derive(Default)]
pub struct MemoryRegisteredUserRepo {
    items: Mutex<Vec<RegisteredUser>>,
}

impl MemoryRegisteredUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(id: Uuid) -> AppError {
        AppError::NotFound("user", id.to_string())
    }
}

impl RegisteredUserRepo for MemoryRegisteredUserRepo {
    fn add(&self, user: RegisteredUser) -> Result<()> {
        let mut items = lock(&self.items);
        if items.iter().any(|u| u.username().eq_ignore_ascii_case(user.username())) {
            return Err(AppError::Conflict(
                "a user with the same username already exists".into(),
            ));
        }
        items.push(user);
        Ok(())
    }

    fn get_all(&self) -> Vec<RegisteredUser> {
        lock(&self.items).clone()
    }

    fn get_by_id(&self, id: Uuid) -> Option<RegisteredUser> {
        lock(&self.items).iter().find(|u| u.id() == id).cloned()
    }

    fn get_by_username(&self, username: &str) -> Option<RegisteredUser> {
        lock(&self.items)
            .iter()
            .find(|u| u.username().eq_ignore_ascii_case(username))
            .cloned()
    }

    fn update(&self, user: &RegisteredUser) -> Result<()> {
        let mut items = lock(&self.items);
        let stored = items
            .iter_mut()
            .find(|u| u.id() == user.id())
            .ok_or_else(|| Self::not_found(user.id()))?;
        stored.set_username(user.username())?;
        stored.set_password(user.password())?;
        stored.set_first_name(user.first_name())?;
        stored.set_last_name(user.last_name())?;
        stored.set_phone(user.phone())?;
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        let mut items = lock(&self.items);
        let position = items
            .iter()
            .position(|u| u.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        items.remove(position);
        Ok(())
    }
}

impl Snapshot for MemoryRegisteredUserRepo {
    fn serialize_all(&self) -> Result<String> {
        codec::users_to_json(&lock(&self.items))
    }

    fn deserialize_all(&self, json: &str) -> Result<()> {
        let mut items = lock(&self.items);
        items.clear();
        *items = codec::users_from_json(json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_core::dto::RegisterUserDto;

    fn user(username: &str) -> RegisteredUser {
        RegisteredUser::new(&RegisterUserDto {
            username: username.into(),
            password: "secret1".into(),
            first_name: "Test".into(),
            last_name: "User".into(),
            phone: "555-0100".into(),
        })
        .unwrap()
    }

    #[test]
    fn add_rejects_username_collisions_case_insensitively() {
        let repo = MemoryRegisteredUserRepo::new();
        repo.add(user("adalovelace")).unwrap();
        let err = repo.add(user("AdaLovelace"));
        assert!(matches!(err, Err(AppError::Conflict(_))));
    }

    #[test]
    fn get_by_username_is_case_insensitive() {
        let repo = MemoryRegisteredUserRepo::new();
        repo.add(user("adalovelace")).unwrap();
        assert!(repo.get_by_username("ADALOVELACE").is_some());
        assert!(repo.get_by_username("unknown").is_none());
    }

    #[test]
    fn update_rewrites_the_stored_account() {
        let repo = MemoryRegisteredUserRepo::new();
        let mut account = user("adalovelace");
        repo.add(account.clone()).unwrap();

        account.set_phone("555-0199").unwrap();
        repo.update(&account).unwrap();
        assert_eq!(repo.get_by_id(account.id()).unwrap().phone(), "555-0199");
    }

    #[test]
    fn update_and_delete_require_a_known_id() {
        let repo = MemoryRegisteredUserRepo::new();
        let unsaved = user("adalovelace");
        assert!(matches!(repo.update(&unsaved), Err(AppError::NotFound(_, _))));
        assert!(matches!(repo.delete(unsaved.id()), Err(AppError::NotFound(_, _))));
    }

    #[test]
    fn snapshot_round_trip_preserves_accounts() {
        let repo = MemoryRegisteredUserRepo::new();
        repo.add(user("adalovelace")).unwrap();
        repo.add(user("graceh0pper")).unwrap();
        let before = repo.get_all();

        let restored = MemoryRegisteredUserRepo::new();
        restored.deserialize_all(&repo.serialize_all().unwrap()).unwrap();
        assert_eq!(restored.get_all(), before);
    }
}
