//! Offering module: the services a provider advertises on the
//! marketplace. Same three-layer shape as `users`.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::OfferingService;
