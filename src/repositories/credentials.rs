use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::principal::{Principal, UnknownRole};
use crate::db::models::{Admin, Student, Teacher};
use crate::db::types::PrincipalKind;
use crate::repositories::{admins, students, teachers};

/// A stored account row of any kind, before role resolution.
#[derive(Debug, Clone)]
pub(crate) enum StoredAccount {
    Admin(Admin),
    Teacher(Teacher),
    Student(Student),
}

impl StoredAccount {
    pub(crate) fn hashed_password(&self) -> &str {
        match self {
            Self::Admin(admin) => &admin.hashed_password,
            Self::Teacher(teacher) => &teacher.hashed_password,
            Self::Student(student) => &student.hashed_password,
        }
    }

    pub(crate) fn into_principal(self) -> Result<Principal, UnknownRole> {
        match self {
            Self::Admin(admin) => Principal::from_admin(admin),
            Self::Teacher(teacher) => Ok(Principal::Teacher(teacher)),
            Self::Student(student) => Ok(Principal::Student(student)),
        }
    }
}

/// Lookup seam for the login probe.
#[async_trait]
pub(crate) trait CredentialStore: Send + Sync {
    async fn find_by_identifier(
        &self,
        kind: PrincipalKind,
        identifier: &str,
    ) -> Result<Option<StoredAccount>, sqlx::Error>;
}

pub(crate) struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub(crate) fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_identifier(
        &self,
        kind: PrincipalKind,
        identifier: &str,
    ) -> Result<Option<StoredAccount>, sqlx::Error> {
        let account = match kind {
            PrincipalKind::Admin => {
                admins::find_by_identifier(&self.pool, identifier).await?.map(StoredAccount::Admin)
            }
            PrincipalKind::Teacher => teachers::find_by_identifier(&self.pool, identifier)
                .await?
                .map(StoredAccount::Teacher),
            PrincipalKind::Student => students::find_by_identifier(&self.pool, identifier)
                .await?
                .map(StoredAccount::Student),
        };
        Ok(account)
    }
}

/// Loads the account a session points at.
pub(crate) async fn find_by_id(
    pool: &PgPool,
    kind: PrincipalKind,
    id: i64,
) -> Result<Option<StoredAccount>, sqlx::Error> {
    let account = match kind {
        PrincipalKind::Admin => admins::find_by_id(pool, id).await?.map(StoredAccount::Admin),
        PrincipalKind::Teacher => teachers::find_by_id(pool, id).await?.map(StoredAccount::Teacher),
        PrincipalKind::Student => students::find_by_id(pool, id).await?.map(StoredAccount::Student),
    };
    Ok(account)
}
