use crate::domains::leads::models::ErrorType;

/// Substrings that mark a provider failure as a login/session problem the
/// user can fix by refreshing their cookies.
const AUTH_MARKERS: &[&str] = &[
    "authorization",
    "authorize",
    "authenticate",
    "authentication",
    "unauthorized",
    "cookie",
    "session expired",
    "login",
];

/// Classify a provider failure message (case-insensitive substring match).
pub fn classify_error(message: &str) -> ErrorType {
    let message = message.to_lowercase();

    if AUTH_MARKERS.iter().any(|marker| message.contains(marker)) {
        return ErrorType::AuthError;
    }

    ErrorType::GeneralError
}
