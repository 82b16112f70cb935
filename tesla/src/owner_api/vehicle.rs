use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OnlineState {
    Online,
    Asleep,
    Offline,
    #[serde(other)]
    Unknown,
}

/// One entry of `GET /vehicles`, also returned by `wake_up`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Vehicle {
    /// id used in every `/vehicles/{id}/...` path
    pub id: u64,

    /// id used by the streaming endpoint
    pub vehicle_id: u64,

    pub vin: String,
    pub display_name: Option<String>,

    #[serde(with = "ext_util::serde::comma_separated")]
    pub option_codes: Vec<String>,

    pub color: Option<String>,
    pub tokens: Vec<String>,
    pub state: OnlineState,
    pub in_service: Option<bool>,
    pub remote_start_enabled: bool,
    pub calendar_enabled: bool,
    pub notifications_enabled: bool,
    pub backseat_token: Option<String>,
    pub backseat_token_updated_at: Option<u64>,
}

impl Vehicle {
    pub fn is_online(&self) -> bool {
        self.state == OnlineState::Online
    }

    pub fn has_option(&self, code: &str) -> bool {
        self.option_codes.iter().any(|option| option == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_vehicle() {
        // given
        let raw = r#"{
            "color": null,
            "display_name": "Nikola",
            "id": 1234,
            "option_codes": "MS01,RENA,TM00,DRLH,PF00,BT85",
            "vehicle_id": 5678,
            "vin": "5YJSA1CN5CFP01657",
            "tokens": ["x", "y"],
            "state": "asleep",
            "remote_start_enabled": false,
            "calendar_enabled": true,
            "notifications_enabled": true
        }"#;

        // when
        let vehicle: Vehicle = serde_json::from_str(raw).unwrap();

        // then
        assert_eq!(vehicle.id, 1234);
        assert_eq!(vehicle.display_name.as_deref(), Some("Nikola"));
        assert_eq!(vehicle.state, OnlineState::Asleep);
        assert!(!vehicle.is_online());
        assert!(vehicle.has_option("BT85"));
        assert!(!vehicle.has_option("BT70"));
        assert_eq!(vehicle.backseat_token, None);
    }

    #[test]
    fn should_reject_vehicle_without_id() {
        let raw = r#"{"vin":"5YJSA1CN5CFP01657","state":"online"}"#;

        assert!(serde_json::from_str::<Vehicle>(raw).is_err());
    }
}
