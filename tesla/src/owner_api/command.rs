use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::result::{Error, Result};

/// A remote command: `POST /vehicles/{id}/command/{name}?{params}`, with an
/// optional JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    params: Vec<(String, String)>,
    body: Option<Value>,
}

impl Command {
    pub fn new(name: &str) -> Self {
        Command {
            name: name.to_owned(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn param(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.params.push((key.to_owned(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// The name becomes a single path segment, so only `[A-Za-z0-9_]` is
    /// allowed.
    pub fn validate(&self) -> Result<()> {
        let valid = !self.name.is_empty()
            && self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');

        if valid {
            Ok(())
        } else {
            Err(Error::InvalidCommand(self.name.clone()))
        }
    }

    pub fn charge_port_door_open() -> Self {
        Self::new("charge_port_door_open")
    }

    pub fn charge_standard() -> Self {
        Self::new("charge_standard")
    }

    pub fn charge_max_range() -> Self {
        Self::new("charge_max_range")
    }

    pub fn charge_start() -> Self {
        Self::new("charge_start")
    }

    pub fn charge_stop() -> Self {
        Self::new("charge_stop")
    }

    pub fn set_charge_limit(percent: u8) -> Self {
        Self::new("set_charge_limit").param("percent", percent)
    }

    pub fn flash_lights() -> Self {
        Self::new("flash_lights")
    }

    pub fn honk_horn() -> Self {
        Self::new("honk_horn")
    }

    pub fn door_lock() -> Self {
        Self::new("door_lock")
    }

    pub fn door_unlock() -> Self {
        Self::new("door_unlock")
    }

    /// Temperatures in the vehicle's configured units.
    pub fn set_temps(driver: f32, passenger: f32) -> Self {
        Self::new("set_temps")
            .param("driver_temp", driver)
            .param("passenger_temp", passenger)
    }

    pub fn auto_conditioning_start() -> Self {
        Self::new("auto_conditioning_start")
    }

    pub fn auto_conditioning_stop() -> Self {
        Self::new("auto_conditioning_stop")
    }

    /// Enables keyless driving; `password` is the account password.
    pub fn remote_start_drive(password: &str) -> Self {
        Self::new("remote_start_drive").param("password", password)
    }

    pub fn reset_valet_pin() -> Self {
        Self::new("reset_valet_pin")
    }

    pub fn sun_roof_control(state: SunRoofState, percent: Option<u8>) -> Self {
        let command = Self::new("sun_roof_control").param("state", state);
        match percent {
            Some(percent) => command.param("percent", percent),
            None => command,
        }
    }

    pub fn actuate_trunk(which: Trunk) -> Self {
        Self::new("actuate_trunk").param("which_trunk", which)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunRoofState {
    Open,
    Close,
    Comfort,
    Vent,
    Move,
}

impl fmt::Display for SunRoofState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            SunRoofState::Open => "open",
            SunRoofState::Close => "close",
            SunRoofState::Comfort => "comfort",
            SunRoofState::Vent => "vent",
            SunRoofState::Move => "move",
        };
        f.write_str(state)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trunk {
    Front,
    Rear,
}

impl fmt::Display for Trunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trunk::Front => f.write_str("front"),
            Trunk::Rear => f.write_str("rear"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub result: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Accepted,
    AlreadyInState(String),
    Rejected(String),
}

impl CommandResult {
    pub fn outcome(&self) -> CommandOutcome {
        let reason = self.reason.as_deref().unwrap_or_default();

        match (self.result, reason) {
            (true, _) => CommandOutcome::Accepted,
            (false, reason) if reason.starts_with("already") || reason == "complete" => {
                CommandOutcome::AlreadyInState(reason.to_owned())
            }
            (false, reason) => CommandOutcome::Rejected(reason.to_owned()),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.outcome() == CommandOutcome::Accepted
    }
}
