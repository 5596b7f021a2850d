//! Device binding - resolves the device record assigned to a user

use super::document::Document;
use super::lookup::{LookupError, TypedLookup};
use super::path::{validate_identity, PathBuilder, DEVICE_PROPERTY, USER_PROPERTY};
use crate::contract::model::{DEVICE_NAME_MAX_LEN, USER_MAX_LEN};
use crate::contract::{
    BoundedString, ConfigError, DecodeFailure, DeviceBindError, DeviceIdentity, IdentityRole,
    RecordProblem,
};

/// Resolves the [`DeviceIdentity`] bound to a user
pub struct DeviceBinder<'d> {
    lookup: TypedLookup<'d>,
}

impl<'d> DeviceBinder<'d> {
    pub fn new(document: &'d dyn Document) -> Self {
        Self {
            lookup: TypedLookup::new(document),
        }
    }

    /// Bind the device assigned to `user`
    ///
    /// The user record must name a device, and the device record must supply
    /// `vendor`, `model` and `serial`. Partial records are rejected with
    /// [`ConfigError::NoDeviceFound`].
    pub fn bind(&self, user: &str) -> Result<DeviceIdentity, ConfigError> {
        if let Err(e) = validate_identity(IdentityRole::User, user, USER_MAX_LEN) {
            return Err(no_device(
                user,
                DeviceBindError::NoDeviceBound {
                    user: user.to_owned(),
                    problem: RecordProblem::InvalidKey(e.violation),
                },
            ));
        }

        let mut identity = DeviceIdentity::unbound();
        let device_path = PathBuilder::new(USER_PROPERTY).build(&[user, "device"])?;
        let problem = match self.lookup.get_string_at(&device_path, &mut identity.name) {
            Ok(true) => None,
            Ok(false) => Some(RecordProblem::Missing),
            Err(e) => Some(RecordProblem::Unreadable(structural(e)?)),
        };
        if let Some(problem) = problem {
            return Err(no_device(
                user,
                DeviceBindError::NoDeviceBound {
                    user: user.to_owned(),
                    problem,
                },
            ));
        }

        validate_identity(
            IdentityRole::Device,
            identity.name.as_str(),
            DEVICE_NAME_MAX_LEN,
        )
        .map_err(|e| no_device(user, DeviceBindError::InvalidDeviceName(e)))?;

        tracing::debug!(user, device = %identity.name, "Parsing settings...");
        let DeviceIdentity {
            name,
            vendor,
            model,
            serial,
        } = &mut identity;
        for (property, slot) in [("vendor", vendor), ("model", model), ("serial", serial)] {
            self.read_property(user, name, property, slot)?;
        }
        Ok(identity)
    }

    fn read_property(
        &self,
        user: &str,
        device: &BoundedString,
        property: &'static str,
        slot: &mut BoundedString,
    ) -> Result<(), ConfigError> {
        let path = PathBuilder::new(DEVICE_PROPERTY).build(&[device.as_str(), property])?;
        let problem = match self.lookup.get_string_at(&path, slot) {
            Ok(true) => return Ok(()),
            Ok(false) => RecordProblem::Missing,
            Err(e) => RecordProblem::Unreadable(structural(e)?),
        };
        Err(no_device(
            user,
            DeviceBindError::IncompleteDeviceRecord {
                device: device.as_str().to_owned(),
                property,
                problem,
            },
        ))
    }
}

/// Separate decode failures from errors that abort the whole assembly
fn structural(err: LookupError) -> Result<DecodeFailure, ConfigError> {
    match err {
        LookupError::Decode(failure) => Ok(failure),
        LookupError::Query(e) => Err(e.into()),
        LookupError::Path(e) => Err(e.into()),
    }
}

fn no_device(user: &str, source: DeviceBindError) -> ConfigError {
    tracing::error!(user, reason = %source, "No device found for user");
    ConfigError::no_device_found(user, source)
}
