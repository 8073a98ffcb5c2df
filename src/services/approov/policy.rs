use axum::http::HeaderName;

/// Path patterns exempted from the token binding stage.
///
/// Pattern syntax:
/// - `/health`  exact path
/// - `/auth/*`  `/auth`, `/auth/` and everything below it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePatterns {
    exact: Vec<String>,
    prefixes: Vec<String>,
}

impl RoutePatterns {
    /// Parse a comma-separated pattern list. Blank entries are ignored.
    pub fn parse(raw: &str) -> Self {
        let mut patterns = Self::default();
        for pattern in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match pattern.strip_suffix("/*") {
                Some(prefix) => patterns.prefixes.push(prefix.to_string()),
                None => patterns.exact.push(pattern.to_string()),
            }
        }
        patterns
    }

    pub fn matches(&self, path: &str) -> bool {
        if self.exact.iter().any(|p| p == path) {
            return true;
        }

        self.prefixes.iter().any(|prefix| match path.strip_prefix(prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        })
    }
}

/// Knobs for the binding stage.
#[derive(Debug, Clone)]
pub struct BindingPolicy {
    // If false, every verified request is forwarded without a binding check.
    pub enabled: bool,
    // Header whose raw value is hashed into the `pay` claim.
    pub header: HeaderName,
    pub exempt: RoutePatterns,
}

impl BindingPolicy {
    pub fn applies_to(&self, path: &str) -> bool {
        self.enabled && !self.exempt.matches(path)
    }
}
