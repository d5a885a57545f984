use serde::Serialize;

use crate::core::principal::Principal;
use crate::core::time::format_primitive;
use crate::db::models::{Admin, Student, Teacher};
use crate::db::types::PrincipalKind;

/// Public view of an account. Password hashes never leave the server.
#[derive(Debug, Serialize)]
pub(crate) struct PrincipalResponse {
    pub(crate) id: i64,
    pub(crate) kind: PrincipalKind,
    pub(crate) role: &'static str,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) role_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) student_id_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) program: Option<String>,
    pub(crate) created_at: String,
}

impl PrincipalResponse {
    pub(crate) fn from_principal(principal: &Principal) -> Self {
        let mut response = match principal {
            Principal::SuperAdmin(admin) | Principal::Admin(admin) => Self::from_admin(admin.clone()),
            Principal::Teacher(teacher) => Self::from_teacher(teacher.clone()),
            Principal::Student(student) => Self::from_student(student.clone()),
        };
        response.role = principal.role_name();
        response
    }

    /// Role label follows the stored role id; unknown ids are labelled `admin`.
    pub(crate) fn from_admin(admin: Admin) -> Self {
        let role = match Principal::from_admin(admin.clone()) {
            Ok(principal) => principal.role_name(),
            Err(_) => "admin",
        };
        Self {
            id: admin.id,
            kind: PrincipalKind::Admin,
            role,
            username: admin.username,
            email: admin.email,
            full_name: admin.full_name,
            role_id: Some(admin.role_id),
            department: None,
            student_id_no: None,
            program: None,
            created_at: format_primitive(admin.created_at),
        }
    }

    pub(crate) fn from_teacher(teacher: Teacher) -> Self {
        Self {
            id: teacher.id,
            kind: PrincipalKind::Teacher,
            role: "teacher",
            username: teacher.username,
            email: teacher.email,
            full_name: teacher.full_name,
            role_id: None,
            department: teacher.department,
            student_id_no: None,
            program: None,
            created_at: format_primitive(teacher.created_at),
        }
    }

    pub(crate) fn from_student(student: Student) -> Self {
        Self {
            id: student.id,
            kind: PrincipalKind::Student,
            role: "student",
            username: student.username,
            email: student.email,
            full_name: student.full_name,
            role_id: None,
            department: None,
            student_id_no: Some(student.student_id_no),
            program: student.program,
            created_at: format_primitive(student.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::principal::fixtures;

    #[test]
    fn super_admin_response_carries_role_and_hides_hash() {
        let mut admin = fixtures::admin(1, "root", 1);
        admin.hashed_password = "$argon2id$secret".to_string();
        let principal = Principal::from_admin(admin).unwrap();

        let json = serde_json::to_value(PrincipalResponse::from_principal(&principal)).unwrap();
        assert_eq!(json["role"], "super_admin");
        assert_eq!(json["kind"], "admin");
        assert_eq!(json["role_id"], 1);
        assert_eq!(json["created_at"], "2024-09-01T08:00:00Z");
        assert!(json.get("hashed_password").is_none());
        assert!(json.get("student_id_no").is_none());
    }

    #[test]
    fn student_response_includes_student_fields() {
        let json = serde_json::to_value(PrincipalResponse::from_student(fixtures::student(7, "ada")))
            .unwrap();
        assert_eq!(json["student_id_no"], "S-00007");
        assert_eq!(json["program"], "BSc Computer Science");
        assert!(json.get("role_id").is_none());
    }
}
