use anyhow::{bail, Context};
use indicatif::ProgressBar;
use serde::Serialize;
use std::{fmt, str::FromStr, time::Duration};
use structopt::StructOpt;

pub mod owner_api;
pub mod result;

use owner_api::{Auth, Client, Command, CommandOutcome, Config};

#[derive(StructOpt, Debug)]
#[structopt(name = "tesla", about = "Query and command vehicles through the Tesla owner API")]
pub struct CliArgs {
    /// account email
    #[structopt(long, env = "TESLA_EMAIL")]
    pub email: String,

    /// account password
    #[structopt(long, env = "TESLA_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// OAuth client id
    #[structopt(long, env = "TESLA_CLIENT_ID")]
    pub client_id: String,

    /// OAuth client secret
    #[structopt(long, env = "TESLA_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    #[structopt(
        long,
        env = "TESLA_API_URL",
        default_value = "https://owner-api.teslamotors.com/api/1"
    )]
    pub api_url: String,

    #[structopt(
        long,
        env = "TESLA_AUTH_URL",
        default_value = "https://owner-api.teslamotors.com"
    )]
    pub auth_url: String,

    #[structopt(
        long,
        env = "TESLA_STREAMING_URL",
        default_value = "https://streaming.vn.teslamotors.com"
    )]
    pub streaming_url: String,

    /// seconds to wait for each request, unlimited by default
    #[structopt(long)]
    pub timeout: Option<u64>,

    /// -v info, -vv debug, -vvv trace
    #[structopt(short, long, parse(from_occurrences))]
    pub verbose: u8,

    #[structopt(subcommand)]
    pub cmd: Cmd,
}

impl CliArgs {
    pub fn config(&self) -> result::Result<Config> {
        let config = Config::new(&self.api_url, &self.auth_url, &self.streaming_url)?;

        Ok(match self.timeout {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        })
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[derive(StructOpt, Debug)]
pub enum Cmd {
    /// list the account's vehicles
    Vehicles,

    /// check whether mobile access is enabled
    MobileEnabled { id: u64 },

    /// fetch one state snapshot: charge, climate, drive, gui or vehicle
    State { id: u64, kind: StateKind },

    /// wake a sleeping vehicle
    Wake { id: u64 },

    /// send a remote command, e.g. `command 1234 set_temps -p driver_temp=72`
    Command {
        id: u64,
        name: String,

        /// query parameter as key=value, repeatable
        #[structopt(short, long = "param")]
        params: Vec<Param>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Charge,
    Climate,
    Drive,
    Gui,
    Vehicle,
}

impl FromStr for StateKind {
    type Err = String;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind {
            "charge" => Ok(StateKind::Charge),
            "climate" => Ok(StateKind::Climate),
            "drive" => Ok(StateKind::Drive),
            "gui" => Ok(StateKind::Gui),
            "vehicle" => Ok(StateKind::Vehicle),
            other => Err(format!(
                "unknown state {other:?}, expected charge, climate, drive, gui or vehicle"
            )),
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            StateKind::Charge => "charge",
            StateKind::Climate => "climate",
            StateKind::Drive => "drive",
            StateKind::Gui => "gui",
            StateKind::Vehicle => "vehicle",
        };
        f.write_str(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param(pub String, pub String);

impl FromStr for Param {
    type Err = String;

    fn from_str(param: &str) -> Result<Self, Self::Err> {
        match param.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok(Param(key.to_owned(), value.to_owned())),
            _ => Err(format!("expected key=value, got {param:?}")),
        }
    }
}

pub fn run(args: &CliArgs) -> anyhow::Result<()> {
    let config = args.config().context("invalid configuration")?;
    let auth = Auth::password_grant(&args.client_id, &args.client_secret, &args.email, &args.password);
    let client = spin("Logging in...", || Client::new(&config, auth)).context("failed to log in")?;

    match &args.cmd {
        Cmd::Vehicles => {
            let vehicles = spin("Listing vehicles...", || client.vehicles())
                .context("failed to list vehicles")?;
            print(&vehicles)
        }
        Cmd::MobileEnabled { id } => {
            let enabled = spin("Checking mobile access...", || client.mobile_enabled(*id))
                .with_context(|| format!("failed to check mobile access of {id}"))?;
            print(&enabled)
        }
        Cmd::State { id, kind } => print_state(&client, *id, *kind)
            .with_context(|| format!("failed to fetch {kind} state of {id}")),
        Cmd::Wake { id } => {
            let vehicle = spin("Waking up...", || client.wake_up(*id))
                .with_context(|| format!("failed to wake {id}"))?;
            print(&vehicle)
        }
        Cmd::Command { id, name, params } => {
            let command = params
                .iter()
                .fold(Command::new(name), |command, Param(key, value)| {
                    command.param(key, value)
                });
            let result = spin("Sending command...", || client.send_command(*id, &command))
                .with_context(|| format!("failed to send {name} to {id}"))?;
            print(&result)?;

            match result.outcome() {
                CommandOutcome::Accepted => Ok(()),
                CommandOutcome::AlreadyInState(reason) => bail!("{name} not needed: {reason}"),
                CommandOutcome::Rejected(reason) => bail!("{name} rejected: {reason}"),
            }
        }
    }
}

fn print_state(client: &Client, id: u64, kind: StateKind) -> anyhow::Result<()> {
    let message = "Fetching state...";
    match kind {
        StateKind::Charge => print(&spin(message, || client.charge_state(id))?),
        StateKind::Climate => print(&spin(message, || client.climate_state(id))?),
        StateKind::Drive => print(&spin(message, || client.drive_state(id))?),
        StateKind::Gui => print(&spin(message, || client.gui_settings(id))?),
        StateKind::Vehicle => print(&spin(message, || client.vehicle_state(id))?),
    }
}

fn spin<T>(message: &'static str, call: impl FnOnce() -> result::Result<T>) -> result::Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(80);

    let result = call();
    spinner.finish_and_clear();

    result
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> CliArgs {
        let base = [
            "tesla",
            "--email",
            "elon@tesla.com",
            "--password",
            "go",
            "--client-id",
            "abc123",
            "--client-secret",
            "def456",
        ];
        CliArgs::from_iter_safe(base.iter().chain(extra)).unwrap()
    }

    #[test]
    fn should_parse_command_params() {
        // when
        let args = parse(&[
            "command",
            "1234",
            "set_temps",
            "-p",
            "driver_temp=72",
            "--param",
            "passenger_temp=70",
        ]);

        // then
        match args.cmd {
            Cmd::Command { id, name, params } => {
                assert_eq!(id, 1234);
                assert_eq!(name, "set_temps");
                assert_eq!(
                    params,
                    vec![
                        Param("driver_temp".to_owned(), "72".to_owned()),
                        Param("passenger_temp".to_owned(), "70".to_owned())
                    ]
                );
            }
            other => panic!("unexpected subcommand {other:?}"),
        }
    }

    #[test]
    fn should_parse_state_kind() {
        // when
        let args = parse(&["-vv", "--timeout", "5", "state", "1234", "climate"]);

        // then
        assert!(matches!(
            args.cmd,
            Cmd::State {
                id: 1234,
                kind: StateKind::Climate
            }
        ));
        assert_eq!(args.log_level(), log::LevelFilter::Debug);
        assert_eq!(args.config().unwrap().timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn should_reject_unknown_state_kind() {
        assert!("battery".parse::<StateKind>().is_err());
    }

    #[test]
    fn should_require_key_in_param() {
        // expect
        assert_eq!(
            "percent=80".parse::<Param>(),
            Ok(Param("percent".to_owned(), "80".to_owned()))
        );
        assert_eq!(
            "password==go".parse::<Param>(),
            Ok(Param("password".to_owned(), "=go".to_owned()))
        );
        assert!("=80".parse::<Param>().is_err());
        assert!("percent".parse::<Param>().is_err());
    }
}
