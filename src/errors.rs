use std::fmt::{Debug, Display, Formatter};

pub(crate) type EmptyResult = Result<(), Error>;
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum ErrorKind {
    /// Token file exists but could not be parsed
    CorruptTokenStore,
    /// Authorization code could not be exchanged for tokens
    AuthExchangeFailed,
    /// Redirect URL pasted by the user is unusable
    InvalidRedirect,
    /// API rejected the request with a 4xx status
    ClientRequest {
        status: u16,
        body: serde_json::Value,
    },
    /// 5xx status, timeout or connection failure
    ServiceUnavailable { status: Option<u16> },
    InvalidRequest,
    Config,
    Json,
    Io,
}

pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

impl Error {
    pub fn new<E>(kind: ErrorKind, err: Option<E>) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            kind,
            source: err.map(Into::into),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// HTTP status returned by the API, if the error came from a response
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            ErrorKind::ClientRequest { status, .. } => Some(status),
            ErrorKind::ServiceUnavailable { status } => status,
            _ => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self.kind, ErrorKind::ClientRequest { .. })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ErrorKind::CorruptTokenStore => f.write_str("token file is corrupt"),
            ErrorKind::AuthExchangeFailed => f.write_str("failed to exchange authorization code"),
            ErrorKind::InvalidRedirect => f.write_str("invalid redirect url"),
            ErrorKind::ClientRequest { status, .. } => {
                write!(f, "request rejected with status {}", status)
            }
            ErrorKind::ServiceUnavailable { status: Some(status) } => {
                write!(f, "service unavailable (status {})", status)
            }
            ErrorKind::ServiceUnavailable { status: None } => f.write_str("service unavailable"),
            ErrorKind::InvalidRequest => f.write_str("invalid request"),
            ErrorKind::Config => f.write_str("configuration error"),
            ErrorKind::Json => f.write_str("json serialization error"),
            ErrorKind::Io => f.write_str("io error"),
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut builder = f.debug_struct("itad_client::Error");
        builder.field("kind", &self.kind);
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|err| &**err as _)
    }
}

pub(crate) fn corrupt_token_store_error<E: Into<BoxError>>(err: E) -> Error {
    Error::new(ErrorKind::CorruptTokenStore, Some(err))
}

pub(crate) fn auth_exchange_error<E: Into<BoxError>>(err: E) -> Error {
    Error::new(ErrorKind::AuthExchangeFailed, Some(err))
}

pub(crate) fn invalid_redirect_error<E: Into<BoxError>>(err: E) -> Error {
    Error::new(ErrorKind::InvalidRedirect, Some(err))
}

pub(crate) fn client_request_error(status: u16, body: serde_json::Value) -> Error {
    Error::new(ErrorKind::ClientRequest { status, body }, None::<BoxError>)
}

pub(crate) fn service_unavailable_error(status: u16) -> Error {
    Error::new(
        ErrorKind::ServiceUnavailable {
            status: Some(status),
        },
        None::<BoxError>,
    )
}

/// Transport level failure, the request never got a response
pub(crate) fn request_error<E: Into<BoxError>>(err: E) -> Error {
    Error::new(ErrorKind::ServiceUnavailable { status: None }, Some(err))
}

pub(crate) fn invalid_request_error<E: Into<BoxError>>(err: E) -> Error {
    Error::new(ErrorKind::InvalidRequest, Some(err))
}

pub(crate) fn config_error<E: Into<BoxError>>(err: E) -> Error {
    Error::new(ErrorKind::Config, Some(err))
}

pub(crate) fn json_error<E: Into<BoxError>>(err: E) -> Error {
    Error::new(ErrorKind::Json, Some(err))
}

pub(crate) fn io_error<E: Into<BoxError>>(err: E) -> Error {
    Error::new(ErrorKind::Io, Some(err))
}
