use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ChangeUsernameRequest {
    pub(crate) username: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChangePasswordRequest {
    #[serde(alias = "currentPassword")]
    pub(crate) current_password: String,
    #[serde(alias = "newPassword")]
    pub(crate) new_password: String,
    #[serde(alias = "confirmPassword")]
    pub(crate) confirm_password: String,
}
