use std::time::Duration;

use internal::domain::frame::Terminator;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct SerialConfig {
    pub path: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    #[serde(default)]
    pub terminator: TerminatorConfig,
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    pub rts: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TerminatorConfig {
    #[default]
    Cr,
    Lf,
}

impl From<TerminatorConfig> for Terminator {
    fn from(value: TerminatorConfig) -> Self {
        match value {
            TerminatorConfig::Cr => Terminator::CarriageReturn,
            TerminatorConfig::Lf => Terminator::LineFeed,
        }
    }
}

impl SerialConfig {
    /// Poll period of the device, also bounds how long shutdown waits for the reader.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

fn default_baud_rate() -> u32 {
    9600
}

fn default_read_timeout_ms() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_line_feed_terminator() {
        let conf: SerialConfig = toml::from_str("path = \"/dev/ttyACM0\"\nterminator = \"lf\"\nrts = false").unwrap();
        assert_eq!(Terminator::from(conf.terminator), Terminator::LineFeed);
        assert_eq!(conf.rts, Some(false));
        assert_eq!(conf.read_timeout(), Duration::from_millis(100));
    }

    #[test]
    fn should_reject_unknown_terminator() {
        assert!(toml::from_str::<SerialConfig>("path = \"/dev/ttyACM0\"\nterminator = \"nul\"").is_err());
    }
}
