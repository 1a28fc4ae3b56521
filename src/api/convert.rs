//! Conversions between wire messages and domain models.
//!
//! Every conversion copies field by field into a fresh value.

use crate::models::Rocket;
use crate::proto;

impl From<proto::Rocket> for Rocket {
    fn from(rocket: proto::Rocket) -> Self {
        Self {
            id: rocket.id,
            rocket_type: rocket.r#type,
            name: rocket.name,
        }
    }
}

impl From<Rocket> for proto::Rocket {
    fn from(rocket: Rocket) -> Self {
        Self {
            id: rocket.id,
            name: rocket.name,
            r#type: rocket.rocket_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_field_maps_to_rocket_type() {
        let rocket: Rocket = proto::Rocket {
            id: "11111111-1111-1111-1111-111111111111".to_string(),
            name: "Saturn V".to_string(),
            r#type: "heavy".to_string(),
        }
        .into();

        assert_eq!(rocket.rocket_type, "heavy");
        assert_eq!(rocket.name, "Saturn V");

        let wire = proto::Rocket::from(rocket);
        assert_eq!(wire.r#type, "heavy");
    }
}
