//! Registered accounts.
//!
//! A guest is not an entity: anyone may browse via the filter query, and
//! registration is the `account::register` service. A registered user's
//! advertisements and chats are derived views over the other repositories
//! (`listings::advertisements_owned_by`, `messaging::chats_of`), never stored
//! on the account.

use uuid::Uuid;

use crate::dto::RegisterUserDto;
use crate::error::{AppError, Result};

/// Minimum length for both usernames and passwords, in characters.
pub const MIN_CREDENTIAL_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredUser {
    id: Uuid,
    username: String,
    password: String,
    first_name: String,
    last_name: String,
    phone: String,
}

fn validate_username(username: &str) -> Result<()> {
    if username.trim().chars().count() < MIN_CREDENTIAL_LEN {
        return Err(AppError::Validation(format!(
            "username must be at least {MIN_CREDENTIAL_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_CREDENTIAL_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_CREDENTIAL_LEN} characters"
        )));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "password must contain at least one digit".into(),
        ));
    }
    Ok(())
}

fn validate_required(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "{field} cannot be empty or whitespace"
        )));
    }
    Ok(())
}

impl RegisteredUser {
    pub fn new(dto: &RegisterUserDto) -> Result<Self> {
        Self::restore(
            Uuid::new_v4(),
            dto.username.clone(),
            dto.password.clone(),
            dto.first_name.clone(),
            dto.last_name.clone(),
            dto.phone.clone(),
        )
    }

    /// Rebuilds an account from persisted state, re-running validation.
    pub fn restore(
        id: Uuid,
        username: String,
        password: String,
        first_name: String,
        last_name: String,
        phone: String,
    ) -> Result<Self> {
        validate_username(&username)?;
        validate_password(&password)?;
        validate_required("first name", &first_name)?;
        validate_required("last name", &last_name)?;
        validate_required("phone", &phone)?;

        Ok(Self { id, username, password, first_name, last_name, phone })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_username(&mut self, username: impl Into<String>) -> Result<()> {
        let username = username.into();
        validate_username(&username)?;
        self.username = username;
        Ok(())
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_password(&mut self, password: impl Into<String>) -> Result<()> {
        let password = password.into();
        validate_password(&password)?;
        self.password = password;
        Ok(())
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) -> Result<()> {
        let first_name = first_name.into();
        validate_required("first name", &first_name)?;
        self.first_name = first_name;
        Ok(())
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) -> Result<()> {
        let last_name = last_name.into();
        validate_required("last name", &last_name)?;
        self.last_name = last_name;
        Ok(())
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> Result<()> {
        let phone = phone.into();
        validate_required("phone", &phone)?;
        self.phone = phone;
        Ok(())
    }

    /// Exact match on both fields. Username lookup may be case-insensitive at
    /// the repository, but credentials themselves are compared verbatim.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(username: &str, password: &str) -> RegisterUserDto {
        RegisterUserDto {
            username: username.into(),
            password: password.into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            phone: "555-0100".into(),
        }
    }

    #[test]
    fn new_accepts_valid_dto() {
        let user = RegisteredUser::new(&dto("adalovelace", "secret1")).unwrap();
        assert_eq!(user.username(), "adalovelace");
    }

    #[test]
    fn short_username_is_rejected() {
        assert!(RegisteredUser::new(&dto("ada", "secret1")).is_err());
    }

    #[test]
    fn password_without_digit_is_rejected() {
        assert!(RegisteredUser::new(&dto("adalovelace", "secrets")).is_err());
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(RegisteredUser::new(&dto("adalovelace", "s1")).is_err());
    }

    #[test]
    fn blank_phone_is_rejected() {
        let mut d = dto("adalovelace", "secret1");
        d.phone = " ".into();
        assert!(RegisteredUser::new(&d).is_err());
    }

    #[test]
    fn authenticate_is_exact() {
        let user = RegisteredUser::new(&dto("adalovelace", "secret1")).unwrap();
        assert!(user.authenticate("adalovelace", "secret1"));
        assert!(!user.authenticate("adalovelace", "wrong"));
        assert!(!user.authenticate("AdaLovelace", "secret1"));
    }
}
