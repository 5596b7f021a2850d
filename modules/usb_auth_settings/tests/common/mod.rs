//! Common test utilities and a shared configuration document

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;
use usb_auth_settings::config::Config;
use usb_auth_settings::domain::{FixedHostname, Service};
use usb_auth_settings::infra::xml::XmlDocumentLoader;

/// Host name every test service reports
pub const TEST_HOSTNAME: &str = "authbox";

/// Realistic configuration for testing
///
/// alice owns d1, carol owns d2 whose record lacks a serial, bob has no
/// device. Only `login` enforces OTP and only `ssh` renames the host.
pub const STANDARD_CONFIG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<configuration>
    <defaults>
        <option name="debug">false</option>
        <option name="probe_timeout">15</option>
    </defaults>
    <devices>
        <device name="d1">
            <vendor>Acme</vendor>
            <model>X1</model>
            <serial>123</serial>
            <option name="try_otp">false</option>
            <option name="probe_timeout">20</option>
        </device>
        <device name="d2">
            <vendor>Acme</vendor>
            <model>X2</model>
        </device>
    </devices>
    <users>
        <user name="alice">
            <device>d1</device>
            <option name="debug">true</option>
            <option name="probe_timeout">30</option>
        </user>
        <user name="carol">
            <device>d2</device>
        </user>
        <user name="bob"/>
    </users>
    <services>
        <service name="login">
            <option name="enforce_otp">true</option>
        </service>
        <service name="ssh">
            <option name="hostname">gateway</option>
        </service>
    </services>
</configuration>
"#;

/// A configuration document written to a temporary file
pub struct Fixture {
    file: NamedTempFile,
}

impl Fixture {
    /// Write `content` to a fresh temporary file
    pub fn new(content: &str) -> Self {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        Self { file }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_CONFIG)
    }

    /// Wrap scope and record fragments in a `configuration` root
    pub fn with_body(body: &str) -> Self {
        Self::new(&format!("<configuration>{body}</configuration>"))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Minimal user and device records binding `user` to device `dev`
pub fn bound_user(user: &str) -> String {
    format!(
        "<devices><device name=\"dev\"><vendor>V</vendor><model>M</model><serial>S</serial></device></devices>\
         <users><user name=\"{user}\"><device>dev</device></user></users>"
    )
}

/// Service reading real files with a fixed host name
pub fn service(config: Config) -> Service {
    Service::new(
        Arc::new(XmlDocumentLoader::new()),
        Arc::new(FixedHostname::new(TEST_HOSTNAME)),
        config,
    )
}

pub fn lenient_service() -> Service {
    service(Config::default())
}

pub fn strict_service() -> Service {
    service(Config {
        strict_field_decoding: true,
        ..Config::default()
    })
}

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}
