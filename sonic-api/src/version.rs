use crate::ApiError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Known versions of the Subsonic REST API, ordered from oldest to newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ApiVersion {
    V1_1_0,
    V1_1_1,
    V1_2_0,
    V1_3_0,
    V1_4_0,
    V1_5_0,
    V1_6_0,
    V1_7_0,
    V1_8_0,
    V1_9_0,
    V1_10_2,
    V1_11_0,
    V1_12_0,
    V1_13_0,
    V1_14_0,
    V1_15_0,
    V1_16_0,
}

impl ApiVersion {
    pub const ALL: [ApiVersion; 17] = [
        ApiVersion::V1_1_0,
        ApiVersion::V1_1_1,
        ApiVersion::V1_2_0,
        ApiVersion::V1_3_0,
        ApiVersion::V1_4_0,
        ApiVersion::V1_5_0,
        ApiVersion::V1_6_0,
        ApiVersion::V1_7_0,
        ApiVersion::V1_8_0,
        ApiVersion::V1_9_0,
        ApiVersion::V1_10_2,
        ApiVersion::V1_11_0,
        ApiVersion::V1_12_0,
        ApiVersion::V1_13_0,
        ApiVersion::V1_14_0,
        ApiVersion::V1_15_0,
        ApiVersion::V1_16_0,
    ];

    /// Version string sent in the `v` parameter.
    pub const fn rest_api_version(&self) -> &'static str {
        match self {
            ApiVersion::V1_1_0 => "1.1.0",
            ApiVersion::V1_1_1 => "1.1.1",
            ApiVersion::V1_2_0 => "1.2.0",
            ApiVersion::V1_3_0 => "1.3.0",
            ApiVersion::V1_4_0 => "1.4.0",
            ApiVersion::V1_5_0 => "1.5.0",
            ApiVersion::V1_6_0 => "1.6.0",
            ApiVersion::V1_7_0 => "1.7.0",
            ApiVersion::V1_8_0 => "1.8.0",
            ApiVersion::V1_9_0 => "1.9.0",
            ApiVersion::V1_10_2 => "1.10.2",
            ApiVersion::V1_11_0 => "1.11.0",
            ApiVersion::V1_12_0 => "1.12.0",
            ApiVersion::V1_13_0 => "1.13.0",
            ApiVersion::V1_14_0 => "1.14.0",
            ApiVersion::V1_15_0 => "1.15.0",
            ApiVersion::V1_16_0 => "1.16.0",
        }
    }

    /// First Subsonic server release implementing this API version.
    pub const fn server_version(&self) -> &'static str {
        match self {
            ApiVersion::V1_1_0 => "3.8",
            ApiVersion::V1_1_1 => "3.9",
            ApiVersion::V1_2_0 => "4.0",
            ApiVersion::V1_3_0 => "4.1",
            ApiVersion::V1_4_0 => "4.2",
            ApiVersion::V1_5_0 => "4.4",
            ApiVersion::V1_6_0 => "4.5",
            ApiVersion::V1_7_0 => "4.6",
            ApiVersion::V1_8_0 => "4.7",
            ApiVersion::V1_9_0 => "4.8",
            ApiVersion::V1_10_2 => "4.9",
            ApiVersion::V1_11_0 => "5.0",
            ApiVersion::V1_12_0 => "5.1",
            ApiVersion::V1_13_0 => "5.3",
            ApiVersion::V1_14_0 => "6.0",
            ApiVersion::V1_15_0 => "6.1",
            ApiVersion::V1_16_0 => "6.1.2",
        }
    }

    /// Salted token authentication was introduced in 1.13.0.
    pub fn supports_token_auth(&self) -> bool {
        *self >= ApiVersion::V1_13_0
    }

    pub fn from_api_version(version: &str) -> Result<Self, ApiError> {
        Self::ALL
            .into_iter()
            .find(|v| v.rest_api_version() == version)
            .ok_or_else(|| ApiError::UnknownApiVersion(version.to_string()))
    }
}

impl FromStr for ApiVersion {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_api_version(s)
    }
}

impl Display for ApiVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.rest_api_version())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiVersion;
    use sonic_common::constants::REST_PROTOCOL_VERSION;

    #[test]
    fn parse_known_versions() {
        for version in ApiVersion::ALL {
            assert_eq!(
                version.rest_api_version().parse::<ApiVersion>().unwrap(),
                version
            );
        }
        assert!("1.10.1".parse::<ApiVersion>().is_err());
        assert!("".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn rest_protocol_version_is_known() {
        assert_eq!(
            ApiVersion::from_api_version(REST_PROTOCOL_VERSION).unwrap(),
            ApiVersion::V1_7_0
        );
    }

    #[test]
    fn ordering() {
        assert!(ApiVersion::V1_10_2 > ApiVersion::V1_9_0);
        assert!(!ApiVersion::V1_7_0.supports_token_auth());
        assert!(ApiVersion::V1_13_0.supports_token_auth());
        assert!(ApiVersion::V1_16_0.supports_token_auth());
    }
}
