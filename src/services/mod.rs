pub(crate) mod academic_records;
pub(crate) mod accounts;
pub(crate) mod authentication;
pub(crate) mod grade_points;
pub(crate) mod role_router;
