use sqlx::PgPool;
use thiserror::Error;

use crate::core::principal::Principal;
use crate::core::security;
use crate::core::time::primitive_now_utc;
use crate::db::is_unique_violation;
use crate::repositories::{accounts, auth_sessions, credentials};

pub(crate) const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Error)]
pub(crate) enum AccountError {
    #[error("{0}")]
    Validation(String),
    #[error("current password is incorrect")]
    WrongPassword,
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
    #[error("account no longer exists")]
    Missing,
    #[error("password hashing failed")]
    Hashing(#[from] security::SecurityError),
    #[error("account update failed: {0}")]
    Persistence(#[from] sqlx::Error),
}

pub(crate) struct PasswordChange<'a> {
    pub(crate) current: &'a str,
    pub(crate) new: &'a str,
    pub(crate) confirm: &'a str,
}

pub(crate) fn passwords_match(new: &str, confirm: &str) -> bool {
    new == confirm
}

/// Trimmed, non-empty and free of `@` so it can never be mistaken for an email.
pub(crate) fn normalize_username(raw: &str) -> Result<&str, AccountError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(AccountError::Validation("Username is required".to_string()));
    }
    if username.contains('@') {
        return Err(AccountError::Validation("Username may not contain '@'".to_string()));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(AccountError::Validation("Username may not contain spaces".to_string()));
    }
    Ok(username)
}

pub(crate) fn validate_password_change(change: &PasswordChange<'_>) -> Result<(), AccountError> {
    if change.current.is_empty() || change.new.is_empty() || change.confirm.is_empty() {
        return Err(AccountError::Validation("All password fields are required".to_string()));
    }
    if !passwords_match(change.new, change.confirm) {
        return Err(AccountError::Validation("New passwords do not match".to_string()));
    }
    if change.new.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}

/// Renames the account and returns the reloaded principal.
pub(crate) async fn change_username(
    pool: &PgPool,
    principal: &Principal,
    raw_username: &str,
) -> Result<Principal, AccountError> {
    let username = normalize_username(raw_username)?;
    let kind = principal.kind();

    if username != principal.username()
        && accounts::username_taken(pool, kind, username, principal.id()).await?
    {
        return Err(AccountError::UsernameTaken(username.to_string()));
    }

    let updated =
        match accounts::update_username(pool, kind, principal.id(), username, primitive_now_utc())
            .await
        {
            Ok(updated) => updated,
            Err(err) if is_unique_violation(&err) => {
                return Err(AccountError::UsernameTaken(username.to_string()))
            }
            Err(err) => return Err(err.into()),
        };
    if !updated {
        return Err(AccountError::Missing);
    }

    let account =
        credentials::find_by_id(pool, kind, principal.id()).await?.ok_or(AccountError::Missing)?;
    account.into_principal().map_err(|_| AccountError::Missing)
}

/// Verifies the current password, stores the new hash and revokes the account's
/// other sessions.
pub(crate) async fn change_password(
    pool: &PgPool,
    principal: &Principal,
    session_id: &str,
    change: PasswordChange<'_>,
) -> Result<(), AccountError> {
    validate_password_change(&change)?;

    let verified = security::verify_password(change.current, principal.hashed_password())
        .unwrap_or(false);
    if !verified {
        return Err(AccountError::WrongPassword);
    }

    let hashed_password = security::hash_password(change.new)?;
    let now = primitive_now_utc();

    let mut tx = pool.begin().await?;
    let updated = accounts::update_password(
        &mut *tx,
        principal.kind(),
        principal.id(),
        &hashed_password,
        now,
    )
    .await?;
    if !updated {
        return Err(AccountError::Missing);
    }
    let revoked =
        auth_sessions::revoke_others(&mut *tx, principal.kind(), principal.id(), session_id, now)
            .await?;
    tx.commit().await?;

    tracing::info!(
        kind = principal.kind().as_str(),
        principal_id = principal.id(),
        revoked_sessions = revoked,
        "Password changed"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_is_plain_equality() {
        assert!(passwords_match("hunter22", "hunter22"));
        assert!(!passwords_match("hunter22", "hunter23"));
        assert!(!passwords_match("hunter22", "Hunter22"));
    }

    #[test]
    fn usernames_are_trimmed_and_checked() {
        assert_eq!(normalize_username("  ada  ").unwrap(), "ada");
        assert!(matches!(normalize_username("   "), Err(AccountError::Validation(_))));
        assert!(matches!(normalize_username("ada@school.test"), Err(AccountError::Validation(_))));
        assert!(matches!(normalize_username("ada lovelace"), Err(AccountError::Validation(_))));
    }

    #[test]
    fn password_change_rules() {
        let ok = PasswordChange { current: "old-pass", new: "new-password", confirm: "new-password" };
        assert!(validate_password_change(&ok).is_ok());

        let mismatch =
            PasswordChange { current: "old-pass", new: "new-password", confirm: "new-passw0rd" };
        assert!(matches!(validate_password_change(&mismatch), Err(AccountError::Validation(_))));

        let short = PasswordChange { current: "old-pass", new: "short", confirm: "short" };
        assert!(matches!(validate_password_change(&short), Err(AccountError::Validation(_))));

        let blank = PasswordChange { current: "", new: "new-password", confirm: "new-password" };
        assert!(matches!(validate_password_change(&blank), Err(AccountError::Validation(_))));
    }
}
