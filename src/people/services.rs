//! Registration, sign-in, and listing flows.
//!
//! Each flow runs its checks in a fixed order and stops at the first
//! failure; the result is a tagged outcome the handler layer turns into a
//! page, redirect, or status code. Only [`FlowError`] escapes.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::people::password;
use crate::people::repo::Person;
use crate::people::validate::{is_blank, is_valid_email};

/// Fatal failures that propagate out of a flow.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("storage failure: {0}")]
    Storage(anyhow::Error),
    #[error("password hashing failure: {0}")]
    Hash(anyhow::Error),
}

/// Result of a registration attempt.
#[derive(Debug)]
pub enum RegisterOutcome {
    Registered(Person),
    EmptyField,
    InvalidEmail,
    EmailTaken,
}

/// Result of a sign-in attempt.
#[derive(Debug)]
pub enum SignInOutcome {
    SignedIn(Person),
    EmptyField,
    InvalidEmail,
    UnknownUser,
    BadCredentials,
}

pub async fn register(
    db: &SqlitePool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<RegisterOutcome, FlowError> {
    let name = name.trim();
    let email = email.trim().to_lowercase();

    if is_blank(name) {
        return Ok(RegisterOutcome::EmptyField);
    }
    if is_blank(&email) {
        return Ok(RegisterOutcome::EmptyField);
    }
    if is_blank(password) {
        return Ok(RegisterOutcome::EmptyField);
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "registration with invalid email");
        return Ok(RegisterOutcome::InvalidEmail);
    }

    let existing = Person::find_by_email(db, &email)
        .await
        .map_err(FlowError::Storage)?;
    if existing.is_some() {
        warn!(email = %email, "registration for existing email");
        return Ok(RegisterOutcome::EmailTaken);
    }

    let hashed = password::hash(password).map_err(FlowError::Hash)?;

    match Person::create(db, name, &email, &hashed).await {
        Ok(person) => {
            info!(id = person.id, email = %person.email, "person registered");
            Ok(RegisterOutcome::Registered(person))
        }
        // Concurrent registration can slip past the lookup; the unique
        // constraint on email is the backstop.
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %email, "registration lost insert race");
            Ok(RegisterOutcome::EmailTaken)
        }
        Err(e) => Err(FlowError::Storage(e)),
    }
}

pub async fn sign_in(
    db: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<SignInOutcome, FlowError> {
    let email = email.trim().to_lowercase();

    if is_blank(&email) {
        return Ok(SignInOutcome::EmptyField);
    }
    if is_blank(password) {
        return Ok(SignInOutcome::EmptyField);
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "sign-in with invalid email");
        return Ok(SignInOutcome::InvalidEmail);
    }

    let person = match Person::find_by_email(db, &email)
        .await
        .map_err(FlowError::Storage)?
    {
        Some(person) => person,
        None => {
            warn!(email = %email, "sign-in for unknown email");
            return Ok(SignInOutcome::UnknownUser);
        }
    };

    let matches = password::verify(password, &person.password).map_err(FlowError::Hash)?;
    if !matches {
        warn!(id = person.id, email = %person.email, "sign-in with wrong password");
        return Ok(SignInOutcome::BadCredentials);
    }

    info!(id = person.id, email = %person.email, "person signed in");
    Ok(SignInOutcome::SignedIn(person))
}

/// Every registered person, ordered by name ascending.
pub async fn list_all(db: &SqlitePool) -> Result<Vec<Person>, FlowError> {
    Person::list_all(db).await.map_err(FlowError::Storage)
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}
