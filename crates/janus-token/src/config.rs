//! Inspector configuration.

/// Default claim carrying the application payload.
pub const DEFAULT_CLAIMS_FIELD: &str = "clientParams";

/// Largest clock skew allowance honoured, in seconds.
///
/// Larger values are capped. The decoder subtracts the leeway from the
/// current epoch time, which must not underflow.
pub const MAX_LEEWAY_SECS: u64 = 3600;

/// Settings for [`TokenInspector`](crate::TokenInspector).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectorConfig {
    /// Claim holding the application payload.
    pub claims_field: String,
    /// Clock skew tolerated on `exp` and `nbf`, in seconds.
    pub leeway_secs: u64,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            claims_field: DEFAULT_CLAIMS_FIELD.to_string(),
            leeway_secs: 0,
        }
    }
}

impl InspectorConfig {
    /// Set the claim holding the application payload.
    #[must_use]
    pub fn with_claims_field(mut self, field: impl Into<String>) -> Self {
        self.claims_field = field.into();
        self
    }

    /// Set the clock skew leeway, capped at [`MAX_LEEWAY_SECS`].
    #[must_use]
    pub fn with_leeway_secs(mut self, secs: u64) -> Self {
        self.leeway_secs = secs.min(MAX_LEEWAY_SECS);
        self
    }
}
