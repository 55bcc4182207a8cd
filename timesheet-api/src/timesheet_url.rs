#[derive(Debug, Clone)]
pub struct TimesheetURL(String);

impl AsRef<str> for TimesheetURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TimesheetURL {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self(base_url.into())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_path_joins_with_single_slash() {
        let url = TimesheetURL::new("https://example.com/").append_path("/api/shifts");
        assert_eq!(url.as_ref(), "https://example.com/api/shifts");

        let url = TimesheetURL::new("https://example.com").append_path("api/shifts");
        assert_eq!(url.as_ref(), "https://example.com/api/shifts");
    }
}
