use crate::core::variant::Variant;
use crate::errors::{AppError, AppResult};
use crate::models::location::Location;
use crate::utils::time::parse_duration;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Acceleration presets offered by the testing panel.
pub const MULTIPLIER_PRESETS: [i64; 4] = [1, 10, 100, 1000];

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Job-site coordinates the geofence is centered on.
    pub site_latitude: f64,
    pub site_longitude: f64,
    pub geofence_radius_m: f64,
    #[serde(default = "default_shift_goal")]
    pub shift_goal: String,
    #[serde(default = "default_variant")]
    pub app_variant: String,
    #[serde(default = "default_multiplier")]
    pub time_multiplier: i64,
    #[serde(default = "default_simulated_distance")]
    pub simulated_distance_m: f64,
    #[serde(default = "default_geofence_override")]
    pub geofence_override: bool,
}

fn default_shift_goal() -> String {
    "8h".to_string()
}
fn default_variant() -> String {
    "v1".to_string()
}
fn default_multiplier() -> i64 {
    100
}
fn default_simulated_distance() -> f64 {
    1000.0
}
fn default_geofence_override() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Downtown San Francisco
            site_latitude: 37.7749,
            site_longitude: -122.4194,
            geofence_radius_m: 500.0,
            shift_goal: default_shift_goal(),
            app_variant: default_variant(),
            time_multiplier: default_multiplier(),
            simulated_distance_m: default_simulated_distance(),
            geofence_override: default_geofence_override(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("shiftclock")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".shiftclock")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shiftclock.conf")
    }

    /// Load configuration from the given path (or the standard one), falling
    /// back to defaults when no file exists.
    pub fn load(custom_path: Option<&str>) -> AppResult<Self> {
        let path = match custom_path {
            Some(p) => PathBuf::from(p),
            None => Self::config_file(),
        };

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str(&content).map_err(|_| AppError::ConfigLoad)
        } else {
            Ok(Config::default())
        }
    }

    /// Initialize the configuration directory and file.
    pub fn init_all(is_test: bool) -> AppResult<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let config = Config::default();

        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        Ok(())
    }

    pub fn site_location(&self) -> Location {
        Location::new(self.site_latitude, self.site_longitude)
    }

    pub fn shift_goal_seconds(&self) -> AppResult<i64> {
        parse_duration(&self.shift_goal)
    }

    pub fn variant(&self) -> AppResult<Variant> {
        Variant::from_code(&self.app_variant)
    }

    /// Collect human-readable problems with the current values.
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.geofence_radius_m <= 0.0 {
            problems.push(format!(
                "geofence_radius_m must be positive (found {})",
                self.geofence_radius_m
            ));
        }
        if self.simulated_distance_m < 0.0 {
            problems.push(format!(
                "simulated_distance_m must not be negative (found {})",
                self.simulated_distance_m
            ));
        }
        if parse_duration(&self.shift_goal).is_err() {
            problems.push(format!("shift_goal is not a valid duration: {}", self.shift_goal));
        }
        if Variant::from_code(&self.app_variant).is_err() {
            problems.push(format!("app_variant must be v1..v4: {}", self.app_variant));
        }
        if !MULTIPLIER_PRESETS.contains(&self.time_multiplier) {
            problems.push(format!(
                "time_multiplier {} is not a testing-panel preset (1, 10, 100, 1000)",
                self.time_multiplier
            ));
        }

        problems
    }
}
