use serde::Serialize;

use crate::core::principal::Principal;

/// Landing area a client should open after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Destination {
    TeacherHome,
    SuperAdminHome,
    AdminHome,
    StudentHome,
}

pub(crate) fn destination_for(principal: &Principal) -> Destination {
    match principal {
        Principal::Teacher(_) => Destination::TeacherHome,
        Principal::SuperAdmin(_) => Destination::SuperAdminHome,
        Principal::Admin(_) => Destination::AdminHome,
        Principal::Student(_) => Destination::StudentHome,
    }
}
