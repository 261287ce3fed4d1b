//! `get_setting` keyed lookup (§6.2), modeled as a typed trait over a
//! single string-keyed store rather than a stringly-typed call site at
//! every use, following `config/settings.rs`'s validator pattern.

use std::collections::HashMap;

/// Typed access to the settings the core consults. Implementors only need
/// to supply the underlying values; the typed getters below do the lookup
/// and report a missing key as an error rather than a silent default,
/// since a missing setting is a caller bug, not a recoverable run-time
/// condition (§7 only names geometric/thermal/plan failures as recoverable).
pub trait Settings {
    fn get_int(&self, name: &str) -> anyhow::Result<i64>;
    fn get_real(&self, name: &str) -> anyhow::Result<f64>;
    fn get_bool(&self, name: &str) -> anyhow::Result<bool>;
    fn get_string(&self, name: &str) -> anyhow::Result<String>;
}

/// The exact setting names recognised by the core (§6.2), grouped by
/// family for documentation purposes only — `StaticSettings` stores them
/// all in one map.
pub mod names {
    pub const WALL_LINE_WIDTH_0: &str = "wall_line_width_0";
    pub const WALL_LINE_WIDTH_X: &str = "wall_line_width_x";
    pub const WALL_TRANSITION_LENGTH: &str = "wall_transition_length";
    pub const WALL_TRANSITION_FILTER_DISTANCE: &str = "wall_transition_filter_distance";
    pub const WALL_TRANSITION_FILTER_DEVIATION: &str = "wall_transition_filter_deviation";
    pub const WALL_TRANSITION_ANGLE: &str = "wall_transition_angle";
    pub const WALL_DISTRIBUTION_COUNT: &str = "wall_distribution_count";
    pub const MIN_BEAD_WIDTH: &str = "min_bead_width";
    pub const MIN_FEATURE_SIZE: &str = "min_feature_size";
    pub const WALL_0_INSET: &str = "wall_0_inset";
    pub const MAX_BEAD_COUNT: &str = "max_bead_count";
    pub const MINIMUM_VARIABLE_LINE_WIDTH: &str = "minimum_variable_line_width";
    pub const PRIME_TOWER_SIZE: &str = "prime_tower_size";
    pub const PRIME_TOWER_MIN_VOLUME: &str = "prime_tower_min_volume";
    pub const PRIME_TOWER_LINE_WIDTH: &str = "prime_tower_line_width";
    pub const PRIME_TOWER_FLOW: &str = "prime_tower_flow";
    pub const PRIME_TOWER_POSITION_X: &str = "prime_tower_position_x";
    pub const PRIME_TOWER_POSITION_Y: &str = "prime_tower_position_y";
    pub const PRIME_TOWER_MAX_BRIDGING_DISTANCE: &str = "prime_tower_max_bridging_distance";
    pub const PRIME_TOWER_BASE_SIZE: &str = "prime_tower_base_size";
    pub const PRIME_TOWER_BASE_HEIGHT: &str = "prime_tower_base_height";
    pub const PRIME_TOWER_BASE_CURVE_MAGNITUDE: &str = "prime_tower_base_curve_magnitude";
    pub const MACHINE_MAX_FEEDRATE_X: &str = "machine_max_feedrate_x";
    pub const MACHINE_MAX_FEEDRATE_Y: &str = "machine_max_feedrate_y";
    pub const MACHINE_MAX_FEEDRATE_Z: &str = "machine_max_feedrate_z";
    pub const MACHINE_MAX_FEEDRATE_E: &str = "machine_max_feedrate_e";
    pub const MACHINE_MAX_ACCELERATION_X: &str = "machine_max_acceleration_x";
    pub const MACHINE_MAX_ACCELERATION_Y: &str = "machine_max_acceleration_y";
    pub const MACHINE_MAX_ACCELERATION_Z: &str = "machine_max_acceleration_z";
    pub const MACHINE_MAX_ACCELERATION_E: &str = "machine_max_acceleration_e";
    pub const MACHINE_MAX_JERK_XY: &str = "machine_max_jerk_xy";
    pub const MACHINE_MAX_JERK_Z: &str = "machine_max_jerk_z";
    pub const MACHINE_MAX_JERK_E: &str = "machine_max_jerk_e";
    pub const MACHINE_ACCELERATION: &str = "machine_acceleration";
    pub const MACHINE_MIN_COOL_HEAT_TIME_WINDOW: &str = "machine_min_cool_heat_time_window";
    pub const MACHINE_NOZZLE_HEAT_UP_SPEED: &str = "machine_nozzle_heat_up_speed";
    pub const MATERIAL_STANDBY_TEMPERATURE: &str = "material_standby_temperature";
    pub const MATERIAL_INITIAL_PRINT_TEMPERATURE: &str = "material_initial_print_temperature";
    pub const MATERIAL_FINAL_PRINT_TEMPERATURE: &str = "material_final_print_temperature";
    pub const MATERIAL_PRINT_TEMPERATURE: &str = "material_print_temperature";
    pub const MATERIAL_FLOW_DEPENDENT_TEMPERATURE: &str = "material_flow_dependent_temperature";
    pub const COOL_MIN_LAYER_TIME: &str = "cool_min_layer_time";
    pub const COOL_MIN_LAYER_TIME_FAN_SPEED_MAX: &str = "cool_min_layer_time_fan_speed_max";
    pub const COOL_FAN_SPEED_MIN: &str = "cool_fan_speed_min";
    pub const COOL_FAN_SPEED_MAX: &str = "cool_fan_speed_max";
    pub const COOL_MIN_SPEED: &str = "cool_min_speed";
    pub const RETRACT_AT_LAYER_CHANGE: &str = "retract_at_layer_change";
    pub const TRAVEL_RETRACT_BEFORE_OUTER_WALL: &str = "travel_retract_before_outer_wall";
}

/// Value variants a raw setting can hold, mirroring §6.2's
/// `(int|real|bool|enum|string)`. Enum-valued settings are represented as
/// their string form; typed call sites parse further if needed.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Int(i64),
    Real(f64),
    Bool(bool),
    String(String),
}

/// A plain map-backed `Settings` implementation, directly constructible in
/// tests without standing up a full config-file parser (which is an
/// explicit non-goal, §1).
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    values: HashMap<String, SettingValue>,
}

impl StaticSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: SettingValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: SettingValue) {
        self.values.insert(name.into(), value);
    }

    fn get(&self, name: &str) -> anyhow::Result<&SettingValue> {
        self.values
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("unknown setting: {name}"))
    }
}

impl Settings for StaticSettings {
    fn get_int(&self, name: &str) -> anyhow::Result<i64> {
        match self.get(name)? {
            SettingValue::Int(v) => Ok(*v),
            other => Err(anyhow::anyhow!("setting {name} is not an int: {other:?}")),
        }
    }

    fn get_real(&self, name: &str) -> anyhow::Result<f64> {
        match self.get(name)? {
            SettingValue::Real(v) => Ok(*v),
            SettingValue::Int(v) => Ok(*v as f64),
            other => Err(anyhow::anyhow!("setting {name} is not a real: {other:?}")),
        }
    }

    fn get_bool(&self, name: &str) -> anyhow::Result<bool> {
        match self.get(name)? {
            SettingValue::Bool(v) => Ok(*v),
            other => Err(anyhow::anyhow!("setting {name} is not a bool: {other:?}")),
        }
    }

    fn get_string(&self, name: &str) -> anyhow::Result<String> {
        match self.get(name)? {
            SettingValue::String(v) => Ok(v.clone()),
            other => Err(anyhow::anyhow!("setting {name} is not a string: {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_back_values_by_family() {
        let settings = StaticSettings::new()
            .with(names::MAX_BEAD_COUNT, SettingValue::Int(8))
            .with(names::COOL_MIN_SPEED, SettingValue::Real(10.0))
            .with(names::RETRACT_AT_LAYER_CHANGE, SettingValue::Bool(true));

        assert_eq!(settings.get_int(names::MAX_BEAD_COUNT).unwrap(), 8);
        assert_eq!(settings.get_real(names::COOL_MIN_SPEED).unwrap(), 10.0);
        assert!(settings.get_bool(names::RETRACT_AT_LAYER_CHANGE).unwrap());
    }

    #[test]
    fn unknown_setting_is_an_error() {
        let settings = StaticSettings::new();
        assert!(settings.get_int("not_a_real_setting").is_err());
    }

    #[test]
    fn int_widens_to_real() {
        let settings = StaticSettings::new().with(names::MAX_BEAD_COUNT, SettingValue::Int(4));
        assert_eq!(settings.get_real(names::MAX_BEAD_COUNT).unwrap(), 4.0);
    }
}
