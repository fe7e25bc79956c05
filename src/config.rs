use std::path::Path;

use config_file::FromConfigFile;
use serde::Deserialize;

use crate::error::Result;
use crate::simulator::window::WindowSettings;

/// Defaults for the command line, optionally read from a TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub fps: f64,
    pub cycle_speed: f64,
    pub pulse_speed: f64,
    pub pulse_iterations: u32,
    pub window_size: u32,
    pub window_title: String,
}

impl Default for Settings {
    fn default() -> Self {
        let window = WindowSettings::default();
        Settings {
            fps: 60.0,
            cycle_speed: 0.5,
            pulse_speed: 1.0,
            pulse_iterations: 3,
            window_size: window.size,
            window_title: window.title,
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        match path {
            Some(path) => {
                log::info!("Loading settings from {}", path.display());
                Ok(Settings::from_config_file(path)?)
            }
            None => Ok(Settings::default()),
        }
    }

    /// Seconds per frame.
    pub fn step(&self) -> f64 {
        if self.fps > 0.0 {
            1.0 / self.fps
        } else {
            log::warn!("Ignoring fps = {}, using 60", self.fps);
            1.0 / 60.0
        }
    }

    pub fn window(&self) -> WindowSettings {
        WindowSettings {
            title: self.window_title.clone(),
            size: self.window_size,
        }
    }
}
