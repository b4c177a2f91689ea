//! Line normalization for rendered document text.

use std::str::Lines;

/// Trimmed, non-empty lines of a text dump.
///
/// Cheap to clone; a clone replays the remaining lines independently.
#[derive(Debug, Clone)]
pub struct NormalizedLines<'a> {
    inner: Lines<'a>,
}

impl<'a> Iterator for NormalizedLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().map(str::trim).find(|line| !line.is_empty())
    }
}

/// Split `text` into trimmed, non-empty lines. Internal spacing is kept.
pub fn normalize_lines(text: &str) -> NormalizedLines<'_> {
    NormalizedLines { inner: text.lines() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trims_and_drops_empty_lines() {
        let text = "  Junior U15 Male  \n\n   \n\t53kg   120\r\n59kg 135\n";
        let lines: Vec<&str> = normalize_lines(text).collect();
        assert_eq!(lines, vec!["Junior U15 Male", "53kg   120", "59kg 135"]);
    }

    #[test]
    fn test_restartable() {
        let lines = normalize_lines("a\n\nb\n");
        let first: Vec<&str> = lines.clone().collect();
        let second: Vec<&str> = lines.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_lines("").count(), 0);
        assert_eq!(normalize_lines("\n \n\t\n").count(), 0);
    }
}
