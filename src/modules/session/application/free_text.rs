// src/modules/session/application/free_text.rs
//
// Tech stack and badges are edited as one big textarea. The raw text is
// split on newlines or commas into trimmed tags; blank tokens vanish,
// order and duplicates are preserved.

pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(|c| c == '\n' || c == ',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_lines(items: &[String]) -> String {
    items.join("\n")
}
