//! Shared failure type for companion-session provider ports.

/// Failure of an outbound companion-session call (chat, voice, video,
/// speech synthesis).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider integration is not configured.
    NotConfigured(&'static str),

    /// The call exceeded its timeout bound. The provider-side operation
    /// may still complete out-of-band.
    Timeout { timeout_secs: u64 },

    /// Provider responded non-2xx.
    Http { status: u16, body: String },

    /// Transport-level failure.
    Network(String),

    /// Provider responded 2xx with a body we could not interpret.
    InvalidResponse(String),
}

impl ProviderError {
    pub fn network(message: impl Into<String>) -> Self {
        ProviderError::Network(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        ProviderError::InvalidResponse(message.into())
    }

    /// True for the timeout variant.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Timeout { .. })
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::NotConfigured(which) => {
                write!(f, "{} integration not configured", which)
            }
            ProviderError::Timeout { timeout_secs } => {
                write!(f, "provider call exceeded {}s", timeout_secs)
            }
            ProviderError::Http { status, body } => {
                write!(f, "provider returned {}: {}", status, body)
            }
            ProviderError::Network(message) => write!(f, "provider unreachable: {}", message),
            ProviderError::InvalidResponse(message) => {
                write!(f, "unexpected provider response: {}", message)
            }
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<ProviderError> for crate::domain::foundation::DomainError {
    fn from(err: ProviderError) -> Self {
        use crate::domain::foundation::ErrorCode;

        let code = match err {
            ProviderError::Timeout { .. } => ErrorCode::ProviderTimeout,
            ProviderError::NotConfigured(_) => ErrorCode::InternalError,
            _ => ErrorCode::ProviderError,
        };
        Self::new(code, err.to_string())
    }
}
