//! Processing device selection.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Where evaluator computation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    /// Pick the best available device.
    #[default]
    Auto,
    /// Run on the host CPU.
    Cpu,
    /// Run on an accelerator.
    Accelerator,
}

impl Device {
    /// Resolve `Auto` to a concrete device and check that it is available.
    ///
    /// Only the CPU backend is built, so `Auto` resolves to `Cpu` and
    /// `Accelerator` is rejected.
    pub fn resolve(self) -> Result<Device, ModelError> {
        match self {
            Device::Auto | Device::Cpu => Ok(Device::Cpu),
            Device::Accelerator => Err(ModelError::DeviceUnavailable {
                device: self.to_string(),
            }),
        }
    }
}

impl FromStr for Device {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Device, ModelError> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Device::Auto),
            "cpu" => Ok(Device::Cpu),
            "accelerator" | "cuda" | "gpu" => Ok(Device::Accelerator),
            _ => Err(ModelError::UnknownDevice {
                found: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Auto => write!(f, "auto"),
            Device::Cpu => write!(f, "cpu"),
            Device::Accelerator => write!(f, "accelerator"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Device;
    use crate::error::ModelError;

    #[test]
    fn auto_resolves_to_cpu() {
        assert_eq!(Device::Auto.resolve().unwrap(), Device::Cpu);
        assert_eq!(Device::Cpu.resolve().unwrap(), Device::Cpu);
    }

    #[test]
    fn accelerator_is_unavailable() {
        assert!(matches!(
            Device::Accelerator.resolve(),
            Err(ModelError::DeviceUnavailable { .. })
        ));
    }

    #[test]
    fn parse_names() {
        assert_eq!("AUTO".parse::<Device>().unwrap(), Device::Auto);
        assert_eq!("cpu".parse::<Device>().unwrap(), Device::Cpu);
        assert_eq!("cuda".parse::<Device>().unwrap(), Device::Accelerator);
        assert!("tpu".parse::<Device>().is_err());
    }
}
