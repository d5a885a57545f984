use thiserror::Error;

use crate::db::models::{Admin, Student, Teacher};
use crate::db::types::{PrincipalKind, ADMIN_ROLE_ID, SUPER_ADMIN_ROLE_ID};

/// An authenticated identity. Admin rows resolve to `SuperAdmin` or `Admin` by role id.
#[derive(Debug, Clone)]
pub(crate) enum Principal {
    SuperAdmin(Admin),
    Admin(Admin),
    Teacher(Teacher),
    Student(Student),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown admin role id {0}")]
pub(crate) struct UnknownRole(pub(crate) i32);

impl Principal {
    pub(crate) fn from_admin(admin: Admin) -> Result<Self, UnknownRole> {
        match admin.role_id {
            SUPER_ADMIN_ROLE_ID => Ok(Self::SuperAdmin(admin)),
            ADMIN_ROLE_ID => Ok(Self::Admin(admin)),
            other => Err(UnknownRole(other)),
        }
    }

    pub(crate) fn kind(&self) -> PrincipalKind {
        match self {
            Self::SuperAdmin(_) | Self::Admin(_) => PrincipalKind::Admin,
            Self::Teacher(_) => PrincipalKind::Teacher,
            Self::Student(_) => PrincipalKind::Student,
        }
    }

    /// Wire name of the variant, distinguishing super admins from admins.
    pub(crate) fn role_name(&self) -> &'static str {
        match self {
            Self::SuperAdmin(_) => "super_admin",
            Self::Admin(_) => "admin",
            Self::Teacher(_) => "teacher",
            Self::Student(_) => "student",
        }
    }

    pub(crate) fn id(&self) -> i64 {
        match self {
            Self::SuperAdmin(admin) | Self::Admin(admin) => admin.id,
            Self::Teacher(teacher) => teacher.id,
            Self::Student(student) => student.id,
        }
    }

    pub(crate) fn username(&self) -> &str {
        match self {
            Self::SuperAdmin(admin) | Self::Admin(admin) => &admin.username,
            Self::Teacher(teacher) => &teacher.username,
            Self::Student(student) => &student.username,
        }
    }

    pub(crate) fn hashed_password(&self) -> &str {
        match self {
            Self::SuperAdmin(admin) | Self::Admin(admin) => &admin.hashed_password,
            Self::Teacher(teacher) => &teacher.hashed_password,
            Self::Student(student) => &student.hashed_password,
        }
    }

    /// Same stored account, regardless of field values.
    pub(crate) fn same_account(&self, other: &Principal) -> bool {
        self.kind() == other.kind() && self.id() == other.id()
    }
}
