//! Tracking consent resolution.

use bridge_traits::configuration::TrackingConsent;
use tracing::warn;

/// Resolve a host consent string.
///
/// Matching is case-insensitive against `pending`, `granted` and
/// `not_granted`. Anything else, including `None`, resolves to
/// [`TrackingConsent::Pending`] and emits a warning.
pub fn resolve_consent(raw: Option<&str>) -> TrackingConsent {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        Some("pending") => TrackingConsent::Pending,
        Some("granted") => TrackingConsent::Granted,
        Some("not_granted") => TrackingConsent::NotGranted,
        _ => {
            warn!(
                consent = raw.unwrap_or("<absent>"),
                default = "PENDING",
                "Unknown tracking consent, falling back to default"
            );
            TrackingConsent::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_any_case() {
        assert_eq!(resolve_consent(Some("granted")), TrackingConsent::Granted);
        assert_eq!(resolve_consent(Some("GRANTED")), TrackingConsent::Granted);
        assert_eq!(resolve_consent(Some("Pending")), TrackingConsent::Pending);
        assert_eq!(resolve_consent(Some("not_granted")), TrackingConsent::NotGranted);
        assert_eq!(resolve_consent(Some("NOT_GRANTED")), TrackingConsent::NotGranted);
    }

    #[test]
    fn test_unknown_values_default_to_pending() {
        assert_eq!(resolve_consent(None), TrackingConsent::Pending);
        assert_eq!(resolve_consent(Some("")), TrackingConsent::Pending);
        assert_eq!(resolve_consent(Some("some-type")), TrackingConsent::Pending);
        assert_eq!(resolve_consent(Some("not granted")), TrackingConsent::Pending);
        assert_eq!(resolve_consent(Some(" granted")), TrackingConsent::Pending);
    }

    #[test]
    fn test_default_resolution_is_stable() {
        let first = resolve_consent(Some("maybe"));
        let second = resolve_consent(Some("maybe"));
        assert_eq!(first, second);
    }
}
