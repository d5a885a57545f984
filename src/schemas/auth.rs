use serde::{Deserialize, Serialize};

use crate::db::types::PrincipalKind;
use crate::schemas::principal::PrincipalResponse;
use crate::services::role_router::Destination;

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    /// Username or email.
    #[serde(alias = "username", alias = "email")]
    pub(crate) identifier: String,
    pub(crate) password: String,
    /// Restricts the probe to one account kind.
    #[serde(default, alias = "accountKind")]
    pub(crate) account_kind: Option<PrincipalKind>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    pub(crate) token_type: String,
    pub(crate) expires_at: String,
    pub(crate) destination: Destination,
    pub(crate) principal: PrincipalResponse,
}

#[derive(Debug, Serialize)]
pub(crate) struct MeResponse {
    pub(crate) destination: Destination,
    pub(crate) principal: PrincipalResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_accepts_identifier_aliases() {
        let by_email: LoginRequest =
            serde_json::from_str(r#"{"email":"ada@school.test","password":"pw"}"#).unwrap();
        assert_eq!(by_email.identifier, "ada@school.test");
        assert!(by_email.account_kind.is_none());

        let with_kind: LoginRequest = serde_json::from_str(
            r#"{"identifier":"ada","password":"pw","accountKind":"student"}"#,
        )
        .unwrap();
        assert_eq!(with_kind.account_kind, Some(PrincipalKind::Student));
    }
}
