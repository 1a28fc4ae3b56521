use serde::{Deserialize, Serialize};

/// A rocket record.
///
/// The `id` is assigned by the caller and must be a UUID string. It is the
/// lookup and deletion key and never changes once the record exists.
/// `rocket_type` and `name` are free-form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rocket {
    pub id: String,
    #[serde(rename = "type")]
    pub rocket_type: String,
    pub name: String,
}
