//! User module: three-layer architecture (domain, repository, service).
//!
//! Registration, partial update, strikes and profile-image bookkeeping
//! live here; handlers only translate the results.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::UserService;
