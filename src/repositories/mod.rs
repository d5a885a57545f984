pub(crate) mod accounts;
pub(crate) mod admins;
pub(crate) mod auth_sessions;
pub(crate) mod courses;
pub(crate) mod credentials;
pub(crate) mod enrollments;
pub(crate) mod grades;
pub(crate) mod health;
pub(crate) mod offerings;
pub(crate) mod records;
pub(crate) mod students;
pub(crate) mod teachers;
