//! Conversions from contract models to CLI DTOs

use super::dto::{DeviceDto, ResolutionDto, SettingsDto, WarningDto};
use crate::contract::{DeviceIdentity, FieldDecodeError, Resolution, Settings};

impl From<&DeviceIdentity> for DeviceDto {
    fn from(device: &DeviceIdentity) -> Self {
        Self {
            name: device.name.to_string(),
            vendor: device.vendor.to_string(),
            model: device.model.to_string(),
            serial: device.serial.to_string(),
        }
    }
}

impl From<&Settings> for SettingsDto {
    fn from(settings: &Settings) -> Self {
        Self {
            hostname: settings.hostname.to_string(),
            system_otp_directory: settings.system_otp_directory.to_string(),
            device_otp_directory: settings.device_otp_directory.to_string(),
            debug: settings.debug,
            enable: settings.enabled,
            try_otp: settings.try_otp,
            enforce_otp: settings.enforce_otp,
            probe_timeout: settings.probe_timeout,
            device: DeviceDto::from(&settings.device),
        }
    }
}

impl From<&FieldDecodeError> for WarningDto {
    fn from(warning: &FieldDecodeError) -> Self {
        Self {
            scope: warning.scope.to_string(),
            option: warning.option.to_string(),
            message: warning.failure.to_string(),
        }
    }
}

impl From<&Resolution> for ResolutionDto {
    fn from(resolution: &Resolution) -> Self {
        Self {
            settings: SettingsDto::from(&resolution.settings),
            warnings: resolution.warnings.iter().map(WarningDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::HOSTNAME_MAX_LEN;
    use crate::contract::{BoundedString, DecodeFailure, OptionName, ScopeKind};

    #[test]
    fn test_settings_dto_uses_option_names() {
        let settings =
            Settings::with_hostname(BoundedString::new("authbox", HOSTNAME_MAX_LEN).unwrap());
        let resolution = Resolution {
            settings,
            warnings: vec![FieldDecodeError {
                scope: ScopeKind::User,
                option: OptionName::Debug,
                failure: DecodeFailure::NotBoolean {
                    text: "yes".to_owned(),
                },
            }],
        };

        let dto = ResolutionDto::from(&resolution);
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["settings"]["hostname"], "authbox");
        assert_eq!(json["settings"]["enable"], true);
        assert_eq!(json["settings"]["probe_timeout"], 10);
        assert_eq!(json["warnings"][0]["scope"], "user");
        assert_eq!(json["warnings"][0]["option"], "debug");
    }

    #[test]
    fn test_empty_warnings_are_omitted() {
        let settings =
            Settings::with_hostname(BoundedString::new("authbox", HOSTNAME_MAX_LEN).unwrap());
        let dto = ResolutionDto::from(&Resolution {
            settings,
            warnings: Vec::new(),
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("warnings").is_none());
    }
}
