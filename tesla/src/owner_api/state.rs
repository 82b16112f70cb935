use serde::{Deserialize, Serialize};
use std::time::SystemTime;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargingState {
    Charging,
    Complete,
    Disconnected,
    NoPower,
    Starting,
    Stopped,
    #[serde(other)]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChargeState {
    pub charging_state: ChargingState,
    pub charge_limit_soc: u8,
    pub charge_limit_soc_std: u8,
    pub charge_limit_soc_min: u8,
    pub charge_limit_soc_max: u8,
    pub charge_to_max_range: bool,
    pub battery_heater_on: Option<bool>,
    pub not_enough_power_to_heat: Option<bool>,
    pub max_range_charge_counter: u32,
    pub fast_charger_present: bool,
    pub fast_charger_type: Option<String>,
    pub battery_range: f64,
    pub est_battery_range: f64,
    pub ideal_battery_range: f64,
    pub battery_level: u8,
    pub usable_battery_level: Option<u8>,
    pub battery_current: Option<f64>,
    pub charge_energy_added: f64,
    pub charge_miles_added_rated: f64,
    pub charge_miles_added_ideal: f64,
    pub charger_voltage: Option<u32>,
    pub charger_pilot_current: Option<u32>,
    pub charger_actual_current: Option<u32>,
    pub charger_power: Option<u32>,
    pub charger_phases: Option<u8>,
    pub time_to_full_charge: f64,
    pub trip_charging: Option<bool>,
    pub charge_rate: f64,
    pub charge_port_door_open: Option<bool>,
    pub charge_port_latch: Option<String>,
    pub motorized_charge_port: Option<bool>,
    pub scheduled_charging_start_time: Option<u64>,
    pub scheduled_charging_pending: bool,
    pub user_charge_enable_request: Option<bool>,
    pub charge_enable_request: bool,
    pub charge_current_request: Option<u32>,
    pub charge_current_request_max: Option<u32>,
    pub managed_charging_active: Option<bool>,
    pub managed_charging_user_canceled: Option<bool>,
    pub managed_charging_start_time: Option<u64>,
    pub eu_vehicle: Option<bool>,
}

impl ChargeState {
    pub fn is_charging(&self) -> bool {
        matches!(
            self.charging_state,
            ChargingState::Charging | ChargingState::Starting
        )
    }
}

/// Temperatures are in Celsius regardless of the GUI units.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClimateState {
    pub inside_temp: Option<f64>,
    pub outside_temp: Option<f64>,
    pub driver_temp_setting: f64,
    pub passenger_temp_setting: f64,
    pub min_avail_temp: Option<f64>,
    pub max_avail_temp: Option<f64>,
    pub is_auto_conditioning_on: Option<bool>,
    pub is_climate_on: Option<bool>,
    pub is_front_defroster_on: Option<bool>,
    pub is_rear_defroster_on: Option<bool>,
    pub is_preconditioning: Option<bool>,
    pub smart_preconditioning: Option<bool>,
    pub fan_status: Option<u8>,
    pub seat_heater_left: Option<u8>,
    pub seat_heater_right: Option<u8>,
    pub seat_heater_rear_left: Option<u8>,
    pub seat_heater_rear_right: Option<u8>,
    pub seat_heater_rear_center: Option<u8>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftState {
    P,
    R,
    N,
    D,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DriveState {
    pub shift_state: Option<ShiftState>,
    pub speed: Option<f64>,
    pub power: Option<i32>,
    pub latitude: f64,
    pub longitude: f64,
    pub heading: u16,

    #[serde(with = "ext_util::serde::epoch_secs")]
    pub gps_as_of: SystemTime,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GuiSettings {
    pub gui_distance_units: String,
    pub gui_temperature_units: String,
    pub gui_charge_rate_units: String,
    pub gui_24_hour_time: bool,
    pub gui_range_display: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VehicleState {
    pub api_version: u32,
    pub car_type: String,
    pub car_version: String,
    pub vehicle_name: Option<String>,
    pub odometer: f64,
    pub locked: bool,
    pub valet_mode: bool,
    pub remote_start: bool,
    pub remote_start_supported: bool,
    pub calendar_supported: bool,
    pub notifications_supported: bool,
    pub parsed_calendar_supported: Option<bool>,
    pub center_display_state: u8,
    pub autopark_state: Option<String>,

    /// driver front door, non-zero when open
    pub df: u8,
    /// driver rear door
    pub dr: u8,
    /// passenger front door
    pub pf: u8,
    /// passenger rear door
    pub pr: u8,
    /// front trunk
    pub ft: u8,
    /// rear trunk
    pub rt: u8,

    pub sun_roof_installed: Option<u8>,
    pub sun_roof_state: Option<String>,
    pub sun_roof_percent_open: Option<u8>,

    pub exterior_color: Option<String>,
    pub roof_color: Option<String>,
    pub wheel_type: Option<String>,
    pub dark_rims: Option<bool>,
    pub has_spoiler: Option<bool>,
    pub spoiler_type: Option<String>,
    pub perf_config: Option<String>,
    pub rhd: Option<bool>,
    pub seat_type: Option<u8>,
    pub rear_seat_heaters: Option<u8>,
    pub third_row_seats: Option<String>,
}

impl VehicleState {
    pub fn any_door_open(&self) -> bool {
        [self.df, self.dr, self.pf, self.pr].iter().any(|&door| door != 0)
    }

    pub fn any_trunk_open(&self) -> bool {
        self.ft != 0 || self.rt != 0
    }
}
