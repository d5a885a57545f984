use serde::{Deserialize, Serialize};
use sqlx::Type;

/// Table family a principal is stored in. Super admins and admins share `Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "principalkind", rename_all = "lowercase")]
pub(crate) enum PrincipalKind {
    Admin,
    Teacher,
    Student,
}

impl PrincipalKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }
}

/// Declaration order is chronological within an academic year; history sorting and the
/// Postgres enum both rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "semester", rename_all = "lowercase")]
pub(crate) enum Semester {
    First,
    Second,
    Summer,
}

pub(crate) const SUPER_ADMIN_ROLE_ID: i32 = 1;
pub(crate) const ADMIN_ROLE_ID: i32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semesters_order_chronologically() {
        let mut items = vec![Semester::Summer, Semester::First, Semester::Second];
        items.sort();
        assert_eq!(items, vec![Semester::First, Semester::Second, Semester::Summer]);
    }

    #[test]
    fn principal_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_value(PrincipalKind::Teacher).unwrap(), "teacher");
        let parsed: PrincipalKind = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(parsed, PrincipalKind::Student);
        assert_eq!(PrincipalKind::Admin.as_str(), "admin");
    }
}
