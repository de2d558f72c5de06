use crate::languages::tally::LanguageShares;

pub const HEADER: &str = "| ID | Language | Percentage |";
pub const SEPARATOR: &str = "|----|----------|------------|";

/// Header, separator and one numbered row per language, highest share first.
/// Every line ends with `\n`.
pub fn render_table(shares: &LanguageShares) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(SEPARATOR);
    out.push('\n');
    for (id, (language, share)) in shares.ranked().into_iter().enumerate() {
        out.push_str(&format!("| {} | {} | {:.2}% |\n", id + 1, language, share));
    }
    out
}
