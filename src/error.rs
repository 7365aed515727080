/// Errors that can occur while validating a site root URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Scheme missing or not `http`/`https`
    InvalidScheme,
    /// Missing or malformed host
    InvalidHost,
    /// Invalid port number
    InvalidPort,
    /// Invalid IPv6 literal
    InvalidIpv6,
    /// IDNA processing error
    IdnaError,
    /// Invalid URL structure
    InvalidUrl,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::InvalidScheme => "Invalid scheme",
            Self::InvalidHost => "Invalid host",
            Self::InvalidPort => "Invalid port",
            Self::InvalidIpv6 => "Invalid IPv6 address",
            Self::IdnaError => "IDNA processing error",
            Self::InvalidUrl => "Invalid URL",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Broad category of a [`CodecError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required setting is absent
    Configuration,
    /// A setting is present but malformed
    Validation,
}

/// Errors raised by [`UrlCodec`](crate::UrlCodec) construction and SSL switching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// `site_root` is empty
    MissingSiteRoot,
    /// SSL was requested but `site_root_ssl` is not configured
    MissingSslRoot,
    /// `site_root` is not an absolute http(s) URL
    InvalidSiteRoot(ParseError),
    /// `site_root_ssl` is not an absolute http(s) URL
    InvalidSslRoot(ParseError),
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingSiteRoot | Self::MissingSslRoot => ErrorKind::Configuration,
            Self::InvalidSiteRoot(_) | Self::InvalidSslRoot(_) => ErrorKind::Validation,
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

impl core::fmt::Display for CodecError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingSiteRoot => f.write_str("Site root not set"),
            Self::MissingSslRoot => f.write_str("SSL site root not set"),
            Self::InvalidSiteRoot(e) => write!(f, "Invalid site root URL: {e}"),
            Self::InvalidSslRoot(e) => write!(f, "Invalid SSL site root URL: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidSiteRoot(e) | Self::InvalidSslRoot(e) => Some(e),
            Self::MissingSiteRoot | Self::MissingSslRoot => None,
        }
    }
}

/// Result type for codec operations
pub type Result<T> = core::result::Result<T, CodecError>;
