use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity payload embedded in every issued token. Produced only after a
/// successful password verification; integrity is guaranteed by the
/// signature, so it carries no secrets.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Claims {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub iat: usize, // issuance (UNIX timestamp)
    pub exp: usize, // expiration (UNIX timestamp)
}
