//! Tag module: a lookup table with name uniqueness and nothing else.

pub mod repo;
pub mod repository;
pub mod service;

pub use service::TagService;
