pub mod db;
pub mod errors;
pub mod offering;
pub mod offering_tag;
pub mod tag;
pub mod user;
