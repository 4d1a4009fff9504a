use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{
    collector_config::CollectorConfig,
    pipeline_config::{DispatchConfig, IngestionConfig},
    serial_config::SerialConfig,
};

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    pub serial: SerialConfig,
    pub collector: CollectorConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub ingestion: IngestionConfig,
}

impl AppConfig {
    pub fn load(file_path: impl AsRef<Path>) -> Result<AppConfig> {
        let file_path = file_path.as_ref();
        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Could not read config file {}", file_path.display()))?;
        toml::from_str(&content).context("Could not parse TOML config")
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use internal::domain::frame::Terminator;

    use super::*;
    use crate::config::pipeline_config::DispatchMode;

    #[test]
    fn should_load_app_config() {
        let conf = AppConfig::load(Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml")).unwrap();
        assert_eq!(conf.serial.baud_rate, 9600);
        assert_eq!(conf.collector.tank_name, "some-tank-name");
        assert_eq!(conf.dispatch.mode, DispatchMode::Queued);
    }

    #[test]
    fn should_apply_defaults_for_optional_sections() {
        let conf: AppConfig = toml::from_str(
            r#"
            [serial]
            path = "/dev/ttyUSB0"

            [collector]
            url = "http://localhost:8000/receive"
            token = "secret"
            tank_name = "reef-01"
            "#,
        )
        .unwrap();
        assert_eq!(conf.serial.baud_rate, 9600);
        assert_eq!(Terminator::from(conf.serial.terminator), Terminator::CarriageReturn);
        assert_eq!(conf.serial.rts, None);
        assert_eq!(conf.collector.request_timeout_ms, 10_000);
        assert_eq!(conf.dispatch.mode, DispatchMode::Queued);
        assert_eq!(conf.dispatch.queue_capacity, 256);
        assert_eq!(conf.dispatch.max_in_flight, 8);
        assert!(!conf.ingestion.strict);
    }

    #[test]
    fn should_fail_on_missing_collector_section() {
        let err = toml::from_str::<AppConfig>("[serial]\npath = \"/dev/ttyACM0\"\n").unwrap_err();
        assert!(err.to_string().contains("collector"));
    }

    #[test]
    fn should_fail_on_missing_file() {
        let err = AppConfig::load("does-not-exist.toml").unwrap_err();
        assert!(err.to_string().contains("does-not-exist.toml"));
    }
}
