use anyhow::{Context, Result};
use log::info;
use serialport::{FlowControl, SerialPort};

use crate::config::serial_config::SerialConfig;

pub struct SerialClient {
    pub serial_config: SerialConfig,
}

impl SerialClient {
    /// Opens the device. The port is closed when the returned handle is dropped.
    pub fn open(&self) -> Result<Box<dyn SerialPort>> {
        let mut port = serialport::new(&self.serial_config.path, self.serial_config.baud_rate)
            .timeout(self.serial_config.read_timeout())
            .flow_control(FlowControl::None)
            .open()
            .with_context(|| format!("Cannot open serial device {}", self.serial_config.path))?;
        if let Some(rts) = self.serial_config.rts {
            port.write_request_to_send(rts).context("Unable to set RTS line")?;
        }
        info!(
            "Listening on {} at {} baud",
            self.serial_config.path, self.serial_config.baud_rate
        );
        Ok(port)
    }
}
