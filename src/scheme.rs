/// Schemes a site root may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    /// Scheme for a request, picked by whether it arrived over TLS
    pub fn for_request(secure: bool) -> Self {
        if secure { Self::Https } else { Self::Http }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }
}

/// Get the scheme from a scheme string (ASCII case-insensitive).
/// Returns `None` for anything other than http or https.
pub fn get_scheme(scheme: &str) -> Option<Scheme> {
    let bytes = scheme.as_bytes();

    // Filter by length first, then compare
    match bytes.len() {
        4 if bytes.eq_ignore_ascii_case(b"http") => Some(Scheme::Http),
        5 if bytes.eq_ignore_ascii_case(b"https") => Some(Scheme::Https),
        _ => None,
    }
}
