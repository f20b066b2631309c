/// Normalize player input, entity names and key phrases for comparison.
///
/// Upper-cases, trims, and collapses every run of whitespace to a single
/// space. No other characters are removed.
pub fn normalize(input: &str) -> String {
    input
        .split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}
