/// Shorten a reject reason for list display, appending "…" when truncated.
/// Counts chars, not bytes, so multibyte reasons never split mid-character.
pub fn truncate_reason(reason: &str, max_chars: usize) -> String {
    if reason.chars().count() <= max_chars {
        reason.to_string()
    } else {
        let head: String = reason.chars().take(max_chars).collect();
        format!("{}…", head)
    }
}


/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
