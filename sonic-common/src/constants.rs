//! Preference keys and protocol constants shared by every sonic crate.
//!
//! Per-server keys are suffixed with the decimal server instance,
//! e.g. `serverUrl1`, `username2`. Use [instance_key] to build them.

/// Selected server instance. This key is never suffixed.
pub const PREFERENCES_KEY_SERVER_INSTANCE: &str = "serverId";
pub const PREFERENCES_KEY_SERVER_URL: &str = "serverUrl";
pub const PREFERENCES_KEY_USERNAME: &str = "username";
pub const PREFERENCES_KEY_PASSWORD: &str = "password";
pub const PREFERENCES_KEY_ALLOW_SELF_SIGNED_CERTIFICATE: &str = "allowSSCertificate";
pub const PREFERENCES_KEY_LDAP_SUPPORT: &str = "enableLdapSupport";

/// Minimal Subsonic REST protocol version this client speaks.
pub const REST_PROTOCOL_VERSION: &str = "1.7.0";
/// Value of the `c` parameter sent with every request.
pub const REST_CLIENT_ID: &str = "sonic";

/// Build the key of a per-instance preference.
#[inline]
pub fn instance_key(prefix: &str, instance: u32) -> String {
    format!("{prefix}{instance}")
}
