/// Default base URL when no backend endpoint is configured.
///
/// Matches the development fallback the site frontend ships with.
pub const DEFAULT_CHAT_BASE_URL: &str = "http://localhost:8000";

/// Normalize a base URL to the chat endpoint.
///
/// Normalization rules:
/// 1) keep a trailing `/chat` unchanged
/// 2) append `/chat` otherwise
/// Empty/whitespace input falls back to [`DEFAULT_CHAT_BASE_URL`].
pub fn chat_url(input: &str) -> String {
    normalized(input, "/chat")
}

/// Normalize a base URL to the health endpoint, with the same rules.
pub fn health_url(input: &str) -> String {
    normalized(input, "/health")
}

fn normalized(input: &str, suffix: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_CHAT_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with(suffix) {
        return trimmed.to_string();
    }
    format!("{trimmed}{suffix}")
}
