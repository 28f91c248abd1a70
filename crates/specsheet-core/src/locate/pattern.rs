//! Pattern-search locating discipline.
//!
//! An ordered list of rules is run against the concatenated page text.
//! A rule whose pattern does not match leaves its field absent; it never
//! fails the extraction.

use crate::error::SpecSheetError;
use crate::locate::CandidateFieldSet;
use crate::normalize::compose_range;
use crate::schema::Field;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, PoisonError};

/// Compiled rule patterns, keyed by source. Rule tables are `'static`, so
/// each pattern is compiled once per process.
static COMPILED: LazyLock<Mutex<HashMap<&'static str, Regex>>> = LazyLock::new(Default::default);

fn compiled(pattern: &'static str) -> Result<Regex, SpecSheetError> {
    let mut cache = COMPILED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(re) = cache.get(pattern) {
        return Ok(re.clone());
    }
    let re = Regex::new(pattern)?;
    cache.insert(pattern, re.clone());
    Ok(re)
}

/// Which capture group(s) of a match become the field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// A single capture group.
    Group(usize),
    /// Two groups forming a high/low range. Both must match, otherwise the
    /// whole field is absent.
    Range { high: usize, low: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pub field: Field,
    /// Regex source; use inline flags such as `(?s)` for multi-line spans.
    pub pattern: &'static str,
    pub capture: Capture,
}

impl PatternRule {
    pub const fn group(field: Field, pattern: &'static str, group: usize) -> Self {
        PatternRule {
            field,
            pattern,
            capture: Capture::Group(group),
        }
    }

    pub const fn range(field: Field, pattern: &'static str, high: usize, low: usize) -> Self {
        PatternRule {
            field,
            pattern,
            capture: Capture::Range { high, low },
        }
    }

    /// Run this rule against `text`. `Ok(None)` means no match.
    pub fn find(&self, text: &str) -> Result<Option<String>, SpecSheetError> {
        let re = compiled(self.pattern)?;
        let Some(caps) = re.captures(text) else {
            return Ok(None);
        };

        let group = |i: usize| {
            caps.get(i)
                .map(|m| m.as_str().trim())
                .filter(|s| !s.is_empty())
        };

        let value = match self.capture {
            Capture::Group(i) => group(i).map(str::to_string),
            Capture::Range { high, low } => match (group(high), group(low)) {
                (Some(h), Some(l)) => Some(compose_range(h, l)),
                _ => None,
            },
        };
        Ok(value)
    }
}

/// Apply `rules` in order. Later rules for the same field only fill it in
/// when earlier ones left it absent.
pub fn apply_rules(text: &str, rules: &[PatternRule]) -> Result<CandidateFieldSet, SpecSheetError> {
    let mut fields = CandidateFieldSet::new();

    for rule in rules {
        if fields.get(rule.field).is_some() {
            continue;
        }
        match rule.find(text)? {
            Some(value) => fields.set(rule.field, value),
            None => {
                tracing::debug!(
                    field = %rule.field,
                    pattern = rule.pattern,
                    "pattern did not match"
                );
                fields.mark_absent(rule.field);
            }
        }
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Model number 5262\n\
                        Width 88.9 cm\n\
                        Height range\n\
                        High: 76.2 cm\n\
                        Low: 29.2 cm\n";

    #[test]
    fn test_group_capture() {
        let rule = PatternRule::group(Field::MfrNumber, r"Model number\s*(\d+)", 1);
        assert_eq!(rule.find(TEXT).unwrap().as_deref(), Some("5262"));
    }

    #[test]
    fn test_range_capture_composes() {
        let rule = PatternRule::range(
            Field::Height,
            r"(?s)Height range.*?High:\s*(\d+.*?cm).*?Low:\s*(\d+.*?cm)",
            1,
            2,
        );
        assert_eq!(
            rule.find(TEXT).unwrap().as_deref(),
            Some("High: 76.2 cm, Low: 29.2 cm")
        );
    }

    #[test]
    fn test_range_with_missing_half_is_absent() {
        let rule = PatternRule::range(
            Field::Height,
            r"High:\s*(\d+ cm)?.*?Low:\s*(\d+.*?cm)",
            1,
            2,
        );
        // group 1 is optional and fails to match "76.2 cm"
        assert_eq!(rule.find("High: 76.2 cm Low: 29.2 cm").unwrap(), None);
    }

    #[test]
    fn test_no_match_marks_absent() {
        let rules = [
            PatternRule::group(Field::Volts, r"Volts:\s*(\d+-\d+ VAC)", 1),
            PatternRule::group(Field::Width, r"Width\s*(\d+.*?cm)", 1),
        ];
        let fields = apply_rules(TEXT, &rules).unwrap();
        assert!(fields.is_absent(Field::Volts));
        assert_eq!(fields.get(Field::Width), Some("88.9 cm"));
    }

    #[test]
    fn test_fallback_rule_fills_absent_field() {
        let rules = [
            PatternRule::group(Field::MfrNumber, r"Catalog\s*(\d+)", 1),
            PatternRule::group(Field::MfrNumber, r"Model number\s*(\d+)", 1),
        ];
        let fields = apply_rules(TEXT, &rules).unwrap();
        assert_eq!(fields.get(Field::MfrNumber), Some("5262"));
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let rule = PatternRule::group(Field::Volts, r"(unclosed", 1);
        assert!(matches!(rule.find(TEXT), Err(SpecSheetError::Regex(_))));
        assert!(matches!(rule.find(TEXT), Err(SpecSheetError::Regex(_))));
    }

    #[test]
    fn test_pattern_compiled_once() {
        const PATTERN: &str = r"Width\s*(\d+\.\d+) cm";
        let rule = PatternRule::group(Field::Width, PATTERN, 1);
        assert_eq!(rule.find(TEXT).unwrap().as_deref(), Some("88.9"));

        let cached = COMPILED
            .lock()
            .unwrap()
            .get(PATTERN)
            .map(|re| re.as_str().to_string());
        assert_eq!(cached.as_deref(), Some(PATTERN));

        assert_eq!(rule.find("Width 12.5 cm").unwrap().as_deref(), Some("12.5"));
    }
}
