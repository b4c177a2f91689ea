//! Common regex patterns for qualifying-totals extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Weight class followed by the total: "59kg 135", "109+kg 300", "+109kg 300".
    // Trailing text after the digits is not part of the total.
    pub static ref WEIGHT_TOTAL_PAIR: Regex = Regex::new(
        r"(?i)(\+)?(\d+)(\+)?kg\s+(\d+)"
    ).unwrap();

    // A token that on its own looks like a weight class
    pub static ref WEIGHT_TOKEN: Regex = Regex::new(
        r"(?i)^\+?\d+\+?kg$"
    ).unwrap();

    // Canonical forms stored in the lookup structure
    pub static ref CANONICAL_WEIGHT_CLASS: Regex = Regex::new(
        r"^\+?\d+kg$"
    ).unwrap();

    pub static ref CANONICAL_TOTAL: Regex = Regex::new(
        r"^\d+$"
    ).unwrap();

    // Column-title rows: "Event Age Gender Bodyweight QT", "Weight Class Total"
    pub static ref COLUMN_TITLES: Regex = Regex::new(
        r"(?ix)^
          (?:event|age(?:\s*group)?|gender|sex|weight\s*class|bodyweight(?:\s+division)?|qt|qualifying\s+totals?|total)
          (?:\s+(?:event|age(?:\s*group)?|gender|sex|weight\s*class|bodyweight(?:\s+division)?|qt|qualifying\s+totals?|total))*
          $"
    ).unwrap();

    // Title row as the original layout printed it, possibly with other words around
    pub static ref HEADER_ROW: Regex = Regex::new(
        r"\bEvent\b.*\bAge\b.*\bGender\b"
    ).unwrap();

    // TypeScript identifier for generated declarations
    pub static ref TS_IDENTIFIER: Regex = Regex::new(
        r"^[A-Za-z_$][A-Za-z0-9_$]*$"
    ).unwrap();
}
