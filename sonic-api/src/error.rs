use serde::Deserialize;
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown api version: {0}")]
    UnknownApiVersion(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("server returned error {kind} ({code}): {message}")]
    ServerError {
        kind: ErrorKind,
        code: u16,
        message: String,
    },

    #[error("invalid response: {0}")]
    InvalidResponse(&'static str),

    #[error(transparent)]
    RequestError(#[from] reqwest::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
}

/// Error element of a failed `<subsonic-response>`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubsonicError {
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

impl From<SubsonicError> for ApiError {
    fn from(error: SubsonicError) -> Self {
        ApiError::ServerError {
            kind: ErrorKind::from_code(error.code),
            code: error.code,
            message: error.message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Generic = 0,
    RequiredParameterMissing = 10,
    IncompatibleClient = 20,
    IncompatibleServer = 30,
    WrongUsernameOrPassword = 40,
    TokenNotSupportedForLDAP = 41,
    Unauthorized = 50,
    TrialOver = 60,
    NotFound = 70,
}

impl ErrorKind {
    /// Unknown codes are reported as [ErrorKind::Generic].
    pub fn from_code(code: u16) -> Self {
        match code {
            10 => ErrorKind::RequiredParameterMissing,
            20 => ErrorKind::IncompatibleClient,
            30 => ErrorKind::IncompatibleServer,
            40 => ErrorKind::WrongUsernameOrPassword,
            41 => ErrorKind::TokenNotSupportedForLDAP,
            50 => ErrorKind::Unauthorized,
            60 => ErrorKind::TrialOver,
            70 => ErrorKind::NotFound,
            _ => ErrorKind::Generic,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            ErrorKind::Generic => "generic error",
            ErrorKind::RequiredParameterMissing => "required parameter is missing",
            ErrorKind::IncompatibleClient => "client must upgrade",
            ErrorKind::IncompatibleServer => "server must upgrade",
            ErrorKind::WrongUsernameOrPassword => "wrong username or password",
            ErrorKind::TokenNotSupportedForLDAP => "token authentication not supported for LDAP users",
            ErrorKind::Unauthorized => "user is not authorized for the given operation",
            ErrorKind::TrialOver => "trial period is over",
            ErrorKind::NotFound => "requested data was not found",
        };
        f.write_str(message)
    }
}
