use crate::core::security;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::SUPER_ADMIN_ROLE_ID;
use crate::repositories::admins;

/// Makes sure the configured super admin exists with the configured password and role.
pub(crate) async fn ensure_superadmin(state: &AppState) -> anyhow::Result<()> {
    let config = state.settings().admin();
    if config.first_superadmin_password.is_empty() {
        tracing::warn!("FIRST_SUPERADMIN_PASSWORD not configured; skipping super admin creation");
        return Ok(());
    }

    let username = &config.first_superadmin_username;
    let now = primitive_now_utc();

    if let Some(admin) = admins::find_by_username(state.db(), username).await? {
        let verified =
            security::verify_password(&config.first_superadmin_password, &admin.hashed_password)
                .unwrap_or(false);
        let up_to_date = verified
            && admin.role_id == SUPER_ADMIN_ROLE_ID
            && admin.email == config.first_superadmin_email;

        if up_to_date {
            tracing::info!(username = %username, "Default super admin already up to date");
            return Ok(());
        }

        let hashed_password = if verified {
            admin.hashed_password.clone()
        } else {
            security::hash_password(&config.first_superadmin_password)?
        };
        admins::reset_superadmin(
            state.db(),
            admin.id,
            &config.first_superadmin_email,
            &hashed_password,
            SUPER_ADMIN_ROLE_ID,
            now,
        )
        .await?;

        tracing::info!(username = %username, "Updated default super admin");
        return Ok(());
    }

    let hashed_password = security::hash_password(&config.first_superadmin_password)?;
    admins::create(
        state.db(),
        admins::CreateAdmin {
            username,
            email: &config.first_superadmin_email,
            hashed_password,
            full_name: "Super Admin",
            role_id: SUPER_ADMIN_ROLE_ID,
            created_at: now,
        },
    )
    .await?;

    tracing::info!(username = %username, "Created default super admin");
    Ok(())
}
