//! Registration and sign-in.

use ab_core::dto::RegisterUserDto;
use ab_core::error::Result;
use ab_core::models::RegisteredUser;
use ab_core::traits::RegisteredUserRepo;

/// Turns a guest into a registered account. Validation happens in the entity
/// constructor; the repository rejects username collisions.
pub fn register(users: &impl RegisteredUserRepo, dto: &RegisterUserDto) -> Result<RegisteredUser> {
    let user = RegisteredUser::new(dto)?;
    users.add(user.clone())?;
    Ok(user)
}

/// Looks the account up by username (case-insensitive at the repository) and
/// verifies the credentials verbatim. `None` covers both unknown usernames
/// and wrong passwords.
pub fn authenticate(
    users: &impl RegisteredUserRepo,
    username: &str,
    password: &str,
) -> Option<RegisteredUser> {
    users
        .get_by_username(username)
        .filter(|user| user.authenticate(username, password))
}
