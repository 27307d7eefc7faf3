use serde::{Deserialize, Serialize};

/// Registration input; the password arrives in plaintext and is hashed
/// before it ever reaches a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub document: String,
    pub password: String,
    pub phone: String,
}

/// Update input. Only these fields are mutable through the update path;
/// document, credential, strike counter and id are immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}
