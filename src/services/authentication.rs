use thiserror::Error;

use crate::core::principal::{Principal, UnknownRole};
use crate::core::security;
use crate::db::types::PrincipalKind;
use crate::repositories::credentials::{CredentialStore, StoredAccount};

/// Kinds probed when the caller does not pick one. The first kind whose account
/// matches both identifier and password wins, so a teacher shadows an admin or a
/// student sharing the same identifier and password.
pub(crate) const PROBE_ORDER: [PrincipalKind; 3] =
    [PrincipalKind::Teacher, PrincipalKind::Admin, PrincipalKind::Student];

#[derive(Debug, Error)]
pub(crate) enum AuthError {
    #[error("identifier and password are required")]
    Validation,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    UnknownRole(#[from] UnknownRole),
    #[error("credential lookup failed: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Resolves `identifier` (username or email) and `password` to a principal.
///
/// With `selector` set only that kind is probed, otherwise [`PROBE_ORDER`] applies.
/// Admin accounts resolve by role id after the password matched.
pub(crate) async fn authenticate(
    store: &dyn CredentialStore,
    identifier: &str,
    password: &str,
    selector: Option<PrincipalKind>,
) -> Result<Principal, AuthError> {
    let identifier = validate_credentials(identifier, password)?;

    let kinds = match selector {
        Some(kind) => vec![kind],
        None => PROBE_ORDER.to_vec(),
    };

    for kind in kinds {
        let Some(account) = store.find_by_identifier(kind, identifier).await? else {
            continue;
        };

        if password_matches(kind, &account, password) {
            return Ok(account.into_principal()?);
        }
    }

    Err(AuthError::InvalidCredentials)
}

/// Trimmed identifier, or `Validation` when either field is empty.
pub(crate) fn validate_credentials<'a>(
    identifier: &'a str,
    password: &str,
) -> Result<&'a str, AuthError> {
    let identifier = identifier.trim();
    if identifier.is_empty() || password.is_empty() {
        return Err(AuthError::Validation);
    }
    Ok(identifier)
}

fn password_matches(kind: PrincipalKind, account: &StoredAccount, password: &str) -> bool {
    match security::verify_password(password, account.hashed_password()) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(kind = kind.as_str(), error = %err, "Stored password hash is unreadable");
            false
        }
    }
}
