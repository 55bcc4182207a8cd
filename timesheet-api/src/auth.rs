use std::fmt;

/// Bearer credentials for the timesheet service.
///
/// Obtaining the token is the job of whatever login flow sits in front of
/// this crate; the client only attaches it to each request.
#[derive(Clone)]
pub struct Credentials {
    access_token: String,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    pub fn as_bearer_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_header_prefixes_token() {
        let credentials = Credentials::new("abc123");
        assert_eq!(credentials.as_bearer_header(), "Bearer abc123");
    }

    #[test]
    fn debug_output_hides_token() {
        let credentials = Credentials::new("secret-token");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("secret-token"));
    }
}
