//! Endpoint groups, one module per trait in [`crate::traits`].

mod admin;
mod auth;
mod cert;
mod superadmin;
mod user;
