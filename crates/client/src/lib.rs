//! HTTP client for the ArchivesSpace Digital Object API.
//!
//! [`session::Session`] authenticates against the backend and signs
//! every request; [`digital_object::DigitalObjectApi`] wraps the
//! repository-scoped Digital Object endpoints (listing, fetch, create,
//! badge update, delete) using [`reqwest`].

pub mod digital_object;
pub mod session;
