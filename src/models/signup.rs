use serde::{Deserialize, Serialize};

/// Raw signup input. Role and status arrive as strings so that unknown
/// values surface as a 400 from validation instead of a deserialization
/// rejection; absent fields deserialize to empty strings for the same
/// reason.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignupPayload {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
