mod auth;
pub mod command;
pub mod config;
mod request;
pub mod state;
pub mod vehicle;

pub use auth::{Auth, Token};
pub use command::{Command, CommandOutcome, CommandResult};
pub use config::Config;
pub use vehicle::Vehicle;

use reqwest::Method;
use serde::{de::DeserializeOwned, Deserialize};

use crate::result::Result;
use request::Request;
use state::{ChargeState, ClimateState, DriveState, GuiSettings, VehicleState};

/// Every authenticated endpoint wraps its payload in `{"response": ...}`.
#[derive(Deserialize)]
struct Envelope<T> {
    response: T,
}

/// An authenticated session for one account.
///
/// The only way to get a `Client` is to log in, so every request it sends
/// carries the token the token endpoint returned.
pub struct Client {
    request: Request,
    auth: Auth,
    token: Token,
}

impl Client {
    pub fn new(config: &Config, auth: Auth) -> Result<Self> {
        let request = Request::new(config)?;
        let token = auth::authenticate(&request, &auth, config)?;

        Ok(Client {
            request,
            auth,
            token,
        })
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn vehicles(&self) -> Result<Vec<Vehicle>> {
        self.get("/vehicles")
    }

    pub fn mobile_enabled(&self, vehicle_id: u64) -> Result<bool> {
        self.get(&format!("/vehicles/{vehicle_id}/mobile_enabled"))
    }

    pub fn charge_state(&self, vehicle_id: u64) -> Result<ChargeState> {
        self.data_request(vehicle_id, "charge_state")
    }

    pub fn climate_state(&self, vehicle_id: u64) -> Result<ClimateState> {
        self.data_request(vehicle_id, "climate_state")
    }

    pub fn drive_state(&self, vehicle_id: u64) -> Result<DriveState> {
        self.data_request(vehicle_id, "drive_state")
    }

    pub fn gui_settings(&self, vehicle_id: u64) -> Result<GuiSettings> {
        self.data_request(vehicle_id, "gui_settings")
    }

    pub fn vehicle_state(&self, vehicle_id: u64) -> Result<VehicleState> {
        self.data_request(vehicle_id, "vehicle_state")
    }

    /// Commands sent to a sleeping vehicle fail; wake it first.
    pub fn wake_up(&self, vehicle_id: u64) -> Result<Vehicle> {
        let path = format!("/vehicles/{vehicle_id}/wake_up");
        let builder = self.request.authorized(Method::POST, &path, &self.token);

        self.fetch(&path, builder)
    }

    pub fn send_command(&self, vehicle_id: u64, command: &Command) -> Result<CommandResult> {
        command.validate()?;

        let path = format!("/vehicles/{vehicle_id}/command/{}", command.name());
        let mut builder = self.request.authorized(Method::POST, &path, &self.token);
        if !command.params().is_empty() {
            builder = builder.query(command.params());
        }
        if let Some(body) = command.body() {
            builder = builder.json(body);
        }

        let result: CommandResult = self.fetch(&path, builder)?;
        log::info!("{} on {vehicle_id}: {:?}", command.name(), result.outcome());

        Ok(result)
    }

    fn data_request<T: DeserializeOwned>(&self, vehicle_id: u64, category: &str) -> Result<T> {
        self.get(&format!("/vehicles/{vehicle_id}/data_request/{category}"))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.request.authorized(Method::GET, path, &self.token);
        self.fetch(path, builder)
    }

    fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        builder: reqwest::blocking::RequestBuilder,
    ) -> Result<T> {
        let envelope: Envelope<T> = self.request.send(path, builder)?;
        Ok(envelope.response)
    }
}
