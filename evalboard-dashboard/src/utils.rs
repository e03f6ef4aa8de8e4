//! Formatting helpers shared by the terminal and HTML renderers

/// Format a latency in seconds with two decimals and an `s` suffix.
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.2}s", seconds)
}

/// Format an averaged score with two decimals.
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Make serialized JSON safe to place inside a `<script>` element.
///
/// `</` is the only sequence that can terminate the element early; `<\/` parses to the
/// same JSON string.
pub fn json_for_script(json: &str) -> String {
    json.replace("</", "<\\/")
}
