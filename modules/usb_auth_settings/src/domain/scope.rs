//! Scope resolution
//!
//! Each scope is decoded into a [`ScopeOverlay`] holding only the options the
//! scope actually supplies. Overlays are applied to the settings in
//! precedence order, field by field, so the last scope that supplies an
//! option wins.

use super::document::Document;
use super::lookup::{decode_bool, decode_int, decode_string, LookupError, TypedLookup};
use super::path::Scope;
use crate::contract::model::{
    DEVICE_OTP_DIRECTORY_MAX_LEN, HOSTNAME_MAX_LEN, SYSTEM_OTP_DIRECTORY_MAX_LEN,
};
use crate::contract::{BoundedString, ConfigError, FieldDecodeError, OptionName, Settings};

/// Options supplied by a single scope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeOverlay {
    pub hostname: Option<BoundedString>,
    pub system_otp_directory: Option<BoundedString>,
    pub device_otp_directory: Option<BoundedString>,
    pub debug: Option<bool>,
    pub enabled: Option<bool>,
    pub try_otp: Option<bool>,
    pub enforce_otp: Option<bool>,
    pub probe_timeout: Option<u32>,
}

impl ScopeOverlay {
    /// Whether the scope supplies no option at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite every field of `settings` this overlay supplies
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(ref value) = self.hostname {
            settings.hostname = value.clone();
        }
        if let Some(ref value) = self.system_otp_directory {
            settings.system_otp_directory = value.clone();
        }
        if let Some(ref value) = self.device_otp_directory {
            settings.device_otp_directory = value.clone();
        }
        if let Some(value) = self.debug {
            settings.debug = value;
        }
        if let Some(value) = self.enabled {
            settings.enabled = value;
        }
        if let Some(value) = self.try_otp {
            settings.try_otp = value;
        }
        if let Some(value) = self.enforce_otp {
            settings.enforce_otp = value;
        }
        if let Some(value) = self.probe_timeout {
            settings.probe_timeout = value;
        }
    }
}

/// Overlay of one scope plus the field errors met while decoding it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeRead {
    pub overlay: ScopeOverlay,
    pub errors: Vec<FieldDecodeError>,
}

/// Applies typed lookups across an ordered list of scopes
pub struct ScopeResolver<'d> {
    lookup: TypedLookup<'d>,
}

impl<'d> ScopeResolver<'d> {
    pub fn new(document: &'d dyn Document) -> Self {
        Self {
            lookup: TypedLookup::new(document),
        }
    }

    /// Decode every recognised option of `scope`
    ///
    /// Malformed values are reported in [`ScopeRead::errors`] and left out of
    /// the overlay. Only path and query failures abort.
    pub fn read_overlay(&self, scope: Scope<'_>) -> Result<ScopeRead, ConfigError> {
        let path = scope.path()?;
        let mut read = ScopeRead::default();

        for option in OptionName::ALL {
            match self.read_option(&path, option, &mut read.overlay) {
                Ok(()) => {}
                Err(LookupError::Decode(failure)) => {
                    let err = FieldDecodeError {
                        scope: scope.kind(),
                        option,
                        failure,
                    };
                    tracing::warn!(error = %err, "Ignoring malformed option");
                    read.errors.push(err);
                }
                Err(LookupError::Query(e)) => return Err(e.into()),
                Err(LookupError::Path(e)) => return Err(e.into()),
            }
        }
        Ok(read)
    }

    fn read_option(
        &self,
        scope_path: &str,
        option: OptionName,
        overlay: &mut ScopeOverlay,
    ) -> Result<(), LookupError> {
        let Some(text) = self.lookup.lookup(scope_path, option.as_str())? else {
            return Ok(());
        };
        match option {
            OptionName::Hostname => {
                overlay.hostname = Some(decode_string(&text, HOSTNAME_MAX_LEN)?);
            }
            OptionName::SystemOtpDirectory => {
                overlay.system_otp_directory =
                    Some(decode_string(&text, SYSTEM_OTP_DIRECTORY_MAX_LEN)?);
            }
            OptionName::DeviceOtpDirectory => {
                overlay.device_otp_directory =
                    Some(decode_string(&text, DEVICE_OTP_DIRECTORY_MAX_LEN)?);
            }
            OptionName::Debug => overlay.debug = Some(decode_bool(&text)?),
            OptionName::Enable => overlay.enabled = Some(decode_bool(&text)?),
            OptionName::TryOtp => overlay.try_otp = Some(decode_bool(&text)?),
            OptionName::EnforceOtp => overlay.enforce_otp = Some(decode_bool(&text)?),
            OptionName::ProbeTimeout => overlay.probe_timeout = Some(decode_int(&text)?),
        }
        Ok(())
    }

    /// Apply `scopes` to `settings`, lowest precedence first
    ///
    /// Returns the field errors of every scope. A field error never stops the
    /// other fields or later scopes from being applied.
    pub fn resolve(
        &self,
        scopes: &[Scope<'_>],
        settings: &mut Settings,
    ) -> Result<Vec<FieldDecodeError>, ConfigError> {
        let mut errors = Vec::new();
        for scope in scopes {
            let read = self.read_overlay(*scope)?;
            if !read.overlay.is_empty() {
                tracing::debug!(scope = %scope.kind(), overlay = ?read.overlay, "Applying scope");
            }
            read.overlay.apply_to(settings);
            errors.extend(read.errors);
        }
        Ok(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{DecodeFailure, QueryError, ScopeKind};
    use std::collections::HashMap;

    struct MapDocument(HashMap<String, String>);

    impl MapDocument {
        fn new(entries: &[(&str, &str, &str)]) -> Self {
            let map = entries
                .iter()
                .map(|(scope, option, value)| {
                    (
                        format!("{scope}option[@name='{option}']"),
                        (*value).to_owned(),
                    )
                })
                .collect();
            Self(map)
        }
    }

    impl Document for MapDocument {
        fn query_text(&self, expression: &str) -> Result<Option<String>, QueryError> {
            Ok(self.0.get(expression).cloned())
        }
    }

    const DEFAULTS: &str = "/configuration/defaults/";
    const DEVICE: &str = "/configuration/devices/device[@name='d1']/";
    const USER: &str = "/configuration/users/user[@name='alice']/";
    const SERVICE: &str = "/configuration/services/service[@name='login']/";

    fn scopes() -> [Scope<'static>; 4] {
        [
            Scope::Defaults,
            Scope::Device("d1"),
            Scope::User("alice"),
            Scope::Service("login"),
        ]
    }

    fn base() -> Settings {
        Settings::with_hostname(BoundedString::new("host", HOSTNAME_MAX_LEN).unwrap())
    }

    #[test]
    fn test_overlay_apply_only_touches_supplied_fields() {
        let mut settings = base();
        let overlay = ScopeOverlay {
            debug: Some(true),
            probe_timeout: Some(3),
            ..Default::default()
        };
        overlay.apply_to(&mut settings);

        let mut expected = base();
        expected.debug = true;
        expected.probe_timeout = 3;
        assert_eq!(settings, expected);
    }

    #[test]
    fn test_empty_overlay() {
        assert!(ScopeOverlay::default().is_empty());
        let mut settings = base();
        ScopeOverlay::default().apply_to(&mut settings);
        assert_eq!(settings, base());
    }

    #[test]
    fn test_later_scope_wins_per_field() {
        let doc = MapDocument::new(&[
            (DEFAULTS, "probe_timeout", "20"),
            (DEVICE, "probe_timeout", "30"),
            (DEVICE, "debug", "true"),
            (USER, "probe_timeout", "40"),
            (SERVICE, "enforce_otp", "true"),
        ]);
        let mut settings = base();
        let errors = ScopeResolver::new(&doc)
            .resolve(&scopes(), &mut settings)
            .unwrap();

        assert!(errors.is_empty());
        assert_eq!(settings.probe_timeout, 40);
        assert!(settings.debug);
        assert!(settings.enforce_otp);
    }

    #[test]
    fn test_read_overlay_decodes_all_types() {
        let doc = MapDocument::new(&[
            (USER, "hostname", "kiosk"),
            (USER, "system_otp_directory", "/var/lib/pamusb"),
            (USER, "device_otp_directory", ".pamusb"),
            (USER, "enable", "false"),
            (USER, "try_otp", "FALSE"),
            (USER, "probe_timeout", "5"),
        ]);
        let read = ScopeResolver::new(&doc)
            .read_overlay(Scope::User("alice"))
            .unwrap();

        assert!(read.errors.is_empty());
        let overlay = read.overlay;
        assert_eq!(overlay.hostname.unwrap(), "kiosk");
        assert_eq!(overlay.system_otp_directory.unwrap(), "/var/lib/pamusb");
        assert_eq!(overlay.device_otp_directory.unwrap(), ".pamusb");
        assert_eq!(overlay.enabled, Some(false));
        assert_eq!(overlay.try_otp, Some(false));
        assert_eq!(overlay.probe_timeout, Some(5));
        assert_eq!(overlay.debug, None);
        assert_eq!(overlay.enforce_otp, None);
    }

    #[test]
    fn test_field_error_does_not_block_other_fields() {
        let doc = MapDocument::new(&[
            (DEFAULTS, "debug", "sometimes"),
            (DEFAULTS, "probe_timeout", "15"),
            (SERVICE, "probe_timeout", "-3"),
        ]);
        let mut settings = base();
        let errors = ScopeResolver::new(&doc)
            .resolve(&scopes(), &mut settings)
            .unwrap();

        assert!(!settings.debug);
        assert_eq!(settings.probe_timeout, 15);
        assert_eq!(
            errors,
            vec![
                FieldDecodeError {
                    scope: ScopeKind::Defaults,
                    option: OptionName::Debug,
                    failure: DecodeFailure::NotBoolean {
                        text: "sometimes".to_owned()
                    },
                },
                FieldDecodeError {
                    scope: ScopeKind::Service,
                    option: OptionName::ProbeTimeout,
                    failure: DecodeFailure::OutOfRange {
                        text: "-3".to_owned()
                    },
                },
            ]
        );
    }

    #[test]
    fn test_over_long_string_keeps_previous_scope_value() {
        let too_long = "h".repeat(HOSTNAME_MAX_LEN + 1);
        let doc = MapDocument::new(&[
            (DEVICE, "hostname", "from-device"),
            (USER, "hostname", too_long.as_str()),
        ]);
        let mut settings = base();
        let errors = ScopeResolver::new(&doc)
            .resolve(&scopes(), &mut settings)
            .unwrap();

        assert_eq!(settings.hostname, "from-device");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].scope, ScopeKind::User);
    }

    #[test]
    fn test_query_failure_aborts() {
        struct BrokenDocument;
        impl Document for BrokenDocument {
            fn query_text(&self, expression: &str) -> Result<Option<String>, QueryError> {
                Err(QueryError::Malformed {
                    expression: expression.to_owned(),
                    reason: "unsupported".to_owned(),
                })
            }
        }

        let mut settings = base();
        let result = ScopeResolver::new(&BrokenDocument).resolve(&scopes(), &mut settings);
        assert!(matches!(result, Err(ConfigError::InvalidQuery(_))));
    }
}
