use std::fmt;

/// trace.moe 回傳的錯誤種類（依 HTTP 狀態碼）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,
    PaymentRequired,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    TooManyRequests,
    InternalServerError,
    ServiceUnavailable,
    GatewayTimeout,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 9] = [
        ErrorKind::BadRequest,
        ErrorKind::PaymentRequired,
        ErrorKind::Forbidden,
        ErrorKind::NotFound,
        ErrorKind::MethodNotAllowed,
        ErrorKind::TooManyRequests,
        ErrorKind::InternalServerError,
        ErrorKind::ServiceUnavailable,
        ErrorKind::GatewayTimeout,
    ];

    /// 狀態碼對照表，不在表內回傳 None
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(Self::BadRequest),
            402 => Some(Self::PaymentRequired),
            403 => Some(Self::Forbidden),
            404 => Some(Self::NotFound),
            405 => Some(Self::MethodNotAllowed),
            429 => Some(Self::TooManyRequests),
            500 => Some(Self::InternalServerError),
            503 => Some(Self::ServiceUnavailable),
            504 => Some(Self::GatewayTimeout),
            _ => None,
        }
    }

    pub fn status(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::PaymentRequired => 402,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::TooManyRequests => 429,
            Self::InternalServerError => 500,
            Self::ServiceUnavailable => 503,
            Self::GatewayTimeout => 504,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::BadRequest => "Image is malformed, or some params are incorrect",
            Self::PaymentRequired => "Search quota or concurrency limit exceeded",
            Self::Forbidden => "No permission to access",
            Self::NotFound => "The requested resource is not found",
            Self::MethodNotAllowed => "Wrong HTTP method used",
            Self::TooManyRequests => "HTTP rate limit exceeded",
            Self::InternalServerError => "Database error",
            Self::ServiceUnavailable => "Database is overloaded",
            Self::GatewayTimeout => "Database is not responding",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{kind}: {message}")]
    Api { kind: ErrorKind, message: String },

    #[error("Unrecognized HTTP status {status}: {message}")]
    UnrecognizedStatus { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// 將非 200 的回應轉成對應錯誤
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match ErrorKind::from_status(status) {
            Some(kind) => Error::Api { kind, message },
            None => Error::UnrecognizedStatus { status, message },
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// 伺服器回應的狀態碼（若有）
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { kind, .. } => Some(kind.status()),
            Error::UnrecognizedStatus { status, .. } => Some(*status),
            Error::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// 伺服器提供的錯誤訊息（不含前綴說明）
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } | Error::UnrecognizedStatus { message, .. } => {
                Some(message)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
