//! Registration and credential checks.

use crate::domain::{NewUser, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, UserRepository};

/// Register a new account and return the stored user.
///
/// Empty fields and taken usernames are `DomainError::Validation` /
/// `DomainError::Duplicate` carrying the message to show.
pub async fn register(
    users: &dyn UserRepository,
    passwords: &dyn PasswordService,
    username: &str,
    password: &str,
) -> Result<User, DomainError> {
    if username.is_empty() {
        return Err(DomainError::Validation("Username is required.".to_string()));
    }
    if password.is_empty() {
        return Err(DomainError::Validation("Password is required.".to_string()));
    }

    if users.find_by_username(username).await?.is_some() {
        return Err(already_registered(username));
    }

    let password_hash = passwords
        .hash(password)
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    // The unique index still decides when two registrations race.
    match users
        .create(NewUser::new(username.to_string(), password_hash))
        .await
    {
        Ok(user) => Ok(user),
        Err(RepoError::Constraint(_)) => Err(already_registered(username)),
        Err(e) => Err(e.into()),
    }
}

/// Check a username/password pair and return the matching user.
pub async fn authenticate(
    users: &dyn UserRepository,
    passwords: &dyn PasswordService,
    username: &str,
    password: &str,
) -> Result<User, DomainError> {
    let Some(user) = users.find_by_username(username).await? else {
        return Err(DomainError::Validation("Incorrect username.".to_string()));
    };

    let valid = passwords
        .verify(password, &user.password_hash)
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    if !valid {
        return Err(DomainError::Validation("Incorrect password.".to_string()));
    }

    Ok(user)
}

fn already_registered(username: &str) -> DomainError {
    DomainError::Duplicate(format!("User {username} is already registered."))
}
