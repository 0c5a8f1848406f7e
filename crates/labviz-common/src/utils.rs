//! Shared naming and string helpers.

/// Prefix of the synthetic node that stands for one rule in a rule graph.
pub const RULE_NODE_PREFIX: &str = "R";

/// Returns the synthetic node name for the rule at `index`, e.g. `R0`.
pub fn rule_node_name(index: usize) -> String {
    format!("{RULE_NODE_PREFIX}{index}")
}

/// Turns a figure name into a file stem that is safe on every platform.
///
/// Runs of characters outside `[A-Za-z0-9-_]` collapse into one `_`.
pub fn sanitize_file_stem(input: &str) -> String {
    let mut stem = String::with_capacity(input.len());
    let mut last_was_sep = false;
    for c in input.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            stem.push(c);
            last_was_sep = false;
        } else if !last_was_sep {
            stem.push('_');
            last_was_sep = true;
        }
    }
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "figure".to_string()
    } else {
        stem.to_string()
    }
}

/// Truncates a string to at most `max_chars` characters, ending with an ellipsis.
pub fn truncate_string(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
