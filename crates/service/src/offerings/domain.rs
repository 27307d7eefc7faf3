use serde::{Deserialize, Serialize};

use models::{offering, tag};

/// Create/replace input for an offering. Updates are wholesale: every
/// mutable field, tags included, comes from this payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOffering {
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

/// An offering together with its resolved tags; the shape handlers
/// serialize back to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferingWithTags {
    #[serde(flatten)]
    pub offering: offering::Model,
    pub tags: Vec<tag::Model>,
}
