//! Directly registered routes.

pub mod home;
