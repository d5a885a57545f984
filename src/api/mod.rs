pub(crate) mod account;
pub(crate) mod admin;
pub(crate) mod auth;
pub(crate) mod errors;
pub(crate) mod guards;
pub(crate) mod handlers;
pub(crate) mod router;
pub(crate) mod students;
pub(crate) mod teachers;
pub(crate) mod validation;
