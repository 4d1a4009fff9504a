use serde::Deserialize;

#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Readings are queued and sent by a background worker.
    #[default]
    Queued,
    /// Each reading is sent before the next frame is read.
    Inline,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DispatchConfig {
    pub mode: DispatchMode,
    pub queue_capacity: usize,
    pub max_in_flight: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            mode: DispatchMode::Queued,
            queue_capacity: 256,
            max_in_flight: 8,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct IngestionConfig {
    pub strict: bool,
}
