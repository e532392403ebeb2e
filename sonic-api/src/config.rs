use crate::ApiVersion;
use std::fmt::{Debug, Formatter};

/// Connection parameters of a [SubsonicApiClient](crate::SubsonicApiClient).
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfiguration {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub minimal_protocol_version: ApiVersion,
    pub client_id: String,
    pub allow_self_signed_certificate: bool,
    pub enable_ldap_user_support: bool,
    pub debug: bool,
}

impl ClientConfiguration {
    /// Whether requests authenticate with a salted md5 token instead of the password.
    pub fn use_token_auth(&self) -> bool {
        !self.enable_ldap_user_support && self.minimal_protocol_version.supports_token_auth()
    }
}

impl Debug for ClientConfiguration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfiguration")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("minimal_protocol_version", &self.minimal_protocol_version)
            .field("client_id", &self.client_id)
            .field(
                "allow_self_signed_certificate",
                &self.allow_self_signed_certificate,
            )
            .field("enable_ldap_user_support", &self.enable_ldap_user_support)
            .field("debug", &self.debug)
            .finish()
    }
}
