//! Weight-class and total normalization.

use super::patterns::WEIGHT_TOTAL_PAIR;
use crate::models::totals::{QualifyingTotal, WeightClass};

/// A weight/total pair found in a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTotalMatch {
    pub weight_class: WeightClass,
    pub qualifying_total: QualifyingTotal,
    /// Raw matched text.
    pub source: String,
    /// Byte span of the match in the scanned text.
    pub position: (usize, usize),
}

/// Canonicalize a raw weight-class match.
///
/// `100+kg` and `+100kg` both become `+100kg`; `KG` is lower-cased;
/// anything else is returned as-is. Returns `None` when the input is not
/// a weight class at all.
pub fn normalize_weight_class(raw: &str) -> Option<WeightClass> {
    let lower = raw.trim().to_ascii_lowercase();
    let body = lower.strip_suffix("kg")?;
    let open_ended = body.starts_with('+') || body.ends_with('+');
    let digits = body.trim_matches('+');

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    if open_ended {
        WeightClass::parse(&format!("+{digits}kg"))
    } else {
        WeightClass::parse(&format!("{digits}kg"))
    }
}

/// Find the first weight/total pair in `text`.
///
/// Only the first pair counts; later pairs on the same line are ignored.
pub fn find_weight_total(text: &str) -> Option<WeightTotalMatch> {
    let caps = WEIGHT_TOTAL_PAIR.captures(text)?;
    let full = caps.get(0)?;
    let total_start = caps.get(4)?.start();
    let raw_weight = text[full.start()..total_start].trim_end();

    let weight_class = normalize_weight_class(raw_weight)?;
    let qualifying_total = QualifyingTotal::parse(&caps[4])?;

    Some(WeightTotalMatch {
        weight_class,
        qualifying_total,
        source: full.as_str().to_string(),
        position: (full.start(), full.end()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn canonical(raw: &str) -> Option<String> {
        normalize_weight_class(raw).map(|w| w.as_str().to_string())
    }

    #[test]
    fn test_normalize_weight_class() {
        assert_eq!(canonical("53kg"), Some("53kg".to_string()));
        assert_eq!(canonical("100+kg"), Some("+100kg".to_string()));
        assert_eq!(canonical("+100kg"), Some("+100kg".to_string()));
        assert_eq!(canonical("87KG"), Some("87kg".to_string()));
        assert_eq!(canonical("kg"), None);
        assert_eq!(canonical("5x5kg"), None);
    }

    #[test]
    fn test_find_weight_total() {
        let found = find_weight_total("59kg 135").unwrap();
        assert_eq!(found.weight_class.as_str(), "59kg");
        assert_eq!(found.qualifying_total.as_str(), "135");
        assert_eq!(found.position, (0, 8));

        let found = find_weight_total("109+kg   300").unwrap();
        assert_eq!(found.weight_class.as_str(), "+109kg");
        assert_eq!(found.qualifying_total.as_str(), "300");
    }

    #[test]
    fn test_first_pair_wins() {
        let found = find_weight_total("Male 49kg 110 55kg 125").unwrap();
        assert_eq!(found.weight_class.as_str(), "49kg");
        assert_eq!(found.qualifying_total.as_str(), "110");
    }

    #[test]
    fn test_total_stops_at_last_digit() {
        let found = find_weight_total("59kg 135a").unwrap();
        assert_eq!(found.weight_class.as_str(), "59kg");
        assert_eq!(found.qualifying_total.as_str(), "135");
        assert_eq!(found.source, "59kg 135");
    }

    #[test]
    fn test_zero_total_is_not_a_pair() {
        assert!(find_weight_total("53kg 0").is_none());
        assert!(find_weight_total("53kg 00").is_none());
    }

    #[test]
    fn test_no_pair() {
        assert!(find_weight_total("Page 100kg of 200").is_none());
        assert!(find_weight_total("59kg").is_none());
        assert!(find_weight_total("Junior U15 Male").is_none());
    }
}
