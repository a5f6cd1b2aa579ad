use super::model::{ExtractedAmount, RecognizedText};
use super::value_objects::NumberFormat;

/// Matched case-insensitively anywhere in a line, so it also covers `SUBTOTAL`.
const TOTAL_KEYWORD: &str = "total";
const MAX_FRACTION_DIGITS: usize = 2;

/// Reads the receipt total out of recognized text.
///
/// A line matches when it contains `TOTAL` (or `SUBTOTAL`), optionally
/// followed by a colon and whitespace, followed by a run of digits and
/// group separators. The first matching line wins; later lines are not
/// consulted even if they hold a larger or "grand" total.
///
/// A decimal separator followed by one or two digits is read as cents.
/// Anything else after the digit run ends the number, so `TOTAL 12.345`
/// in comma format reads as `12`. Signs are not part of the number: a
/// line like `TOTAL -5,000` does not match.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmountExtractor {
    format: NumberFormat,
}

impl AmountExtractor {
    pub fn new(format: NumberFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> NumberFormat {
        self.format
    }

    /// Returns the amount of the first matching line, or `None`.
    pub fn extract(&self, text: &RecognizedText) -> Option<ExtractedAmount> {
        text.lines()
            .iter()
            .find_map(|line| self.extract_from_line(line))
    }

    /// Tries every keyword occurrence in the line, left to right.
    pub fn extract_from_line(&self, line: &str) -> Option<ExtractedAmount> {
        // ASCII lowering keeps byte offsets aligned with `line`.
        let lowered = line.to_ascii_lowercase();
        lowered
            .match_indices(TOTAL_KEYWORD)
            .find_map(|(start, keyword)| self.amount_after(&line[start + keyword.len()..]))
    }

    fn amount_after(&self, rest: &str) -> Option<ExtractedAmount> {
        let rest = rest.strip_prefix(':').unwrap_or(rest).trim_start();
        self.parse_number(rest)
    }

    fn parse_number(&self, input: &str) -> Option<ExtractedAmount> {
        let (group, decimal) = self.format.separators();

        let run_len = input
            .find(|c: char| !(c.is_ascii_digit() || c == group))
            .unwrap_or(input.len());
        let integer: String = input[..run_len]
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        if integer.is_empty() {
            return None;
        }

        let literal = match fraction_digits(&input[run_len..], decimal) {
            Some(fraction) => format!("{}.{}", integer, fraction),
            None => integer,
        };
        literal.parse::<f64>().ok().and_then(ExtractedAmount::new)
    }
}

fn fraction_digits(rest: &str, decimal: char) -> Option<&str> {
    let after = rest.strip_prefix(decimal)?;
    let len = after
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(after.len());
    (1..=MAX_FRACTION_DIGITS)
        .contains(&len)
        .then(|| &after[..len])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn extract(lines: Vec<&str>) -> Option<f64> {
        AmountExtractor::default()
            .extract(&RecognizedText::from(lines))
            .map(|a| a.value())
    }

    fn with_commas(value: u64) -> String {
        let digits = value.to_string();
        let mut grouped = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        grouped
    }

    #[test]
    fn should_extract_total_with_thousands_separator() {
        assert_eq!(extract(vec!["TOTAL 14,000"]), Some(14000.0));
    }

    #[test]
    fn should_extract_subtotal_with_colon() {
        assert_eq!(extract(vec!["SUBTOTAL: 14,000"]), Some(14000.0));
    }

    #[test]
    fn should_extract_when_colon_has_no_trailing_space() {
        assert_eq!(extract(vec!["Total:7,250"]), Some(7250.0));
    }

    #[test]
    fn should_match_keyword_case_insensitively() {
        assert_eq!(extract(vec!["grand total 3,500"]), Some(3500.0));
    }

    #[test]
    fn should_prefer_first_matching_line() {
        let lines = vec!["ITEM A 5,000", "SUBTOTAL 12,500", "TOTAL 14,000"];
        assert_eq!(extract(lines), Some(12500.0));
    }

    #[test]
    fn should_return_none_without_total_keyword() {
        let lines = vec!["ITEM A 5,000", "CASH 20,000", "CHANGE 6,000"];
        assert_eq!(extract(lines), None);
    }

    #[test]
    fn should_return_none_for_empty_text() {
        assert_eq!(extract(vec![]), None);
    }

    #[test]
    fn should_skip_line_with_signed_amount() {
        assert_eq!(extract(vec!["TOTAL -5,000"]), None);
        assert_eq!(extract(vec!["TOTAL -5,000", "TOTAL 5,000"]), Some(5000.0));
    }

    #[test]
    fn should_skip_keyword_not_followed_by_number() {
        assert_eq!(extract(vec!["TOTAL ITEMS", "TOTAL 9,900"]), Some(9900.0));
    }

    #[test]
    fn should_try_later_keyword_in_same_line() {
        assert_eq!(extract(vec!["SUBTOTAL TOTAL 9,000"]), Some(9000.0));
        assert_eq!(extract(vec!["TOTAL QTY x TOTAL: 1,200"]), Some(1200.0));
    }

    #[test]
    fn should_read_cents_after_decimal_point() {
        assert_eq!(extract(vec!["TOTAL 1,234.56"]), Some(1234.56));
        assert_eq!(extract(vec!["TOTAL 12.5"]), Some(12.5));
    }

    #[test]
    fn should_stop_at_decimal_point_with_more_than_two_digits() {
        assert_eq!(extract(vec!["TOTAL 12.345"]), Some(12.0));
    }

    #[test]
    fn should_read_period_grouped_totals() {
        let extractor = AmountExtractor::new(NumberFormat::PeriodThousands);
        let text = RecognizedText::from(vec!["TOTAL 14.000", "TOTAL 1.234,50"]);
        assert_eq!(extractor.extract(&text).map(|a| a.value()), Some(14000.0));

        let text = RecognizedText::from(vec!["Total: 1.234,50"]);
        assert_eq!(extractor.extract(&text).map(|a| a.value()), Some(1234.5));
    }

    #[test]
    fn should_handle_non_ascii_text_around_keyword() {
        assert_eq!(extract(vec!["Prix € TOTAL 4,200 ✓"]), Some(4200.0));
    }

    proptest! {
        #[test]
        fn should_read_back_any_comma_grouped_total(value in 0u64..10_000_000_000) {
            let line = format!("TOTAL {}", with_commas(value));
            prop_assert_eq!(extract(vec![line.as_str()]), Some(value as f64));
        }

        #[test]
        fn should_be_idempotent(lines in proptest::collection::vec(".{0,40}", 0..8)) {
            let extractor = AmountExtractor::default();
            let text = RecognizedText::from(lines);
            prop_assert_eq!(extractor.extract(&text), extractor.extract(&text));
        }

        #[test]
        fn should_ignore_lines_without_keyword(lines in proptest::collection::vec("[0-9A-SU-Z ,.:]{0,30}", 0..8)) {
            // Alphabet without 'T' cannot spell the keyword.
            let text = RecognizedText::from(lines);
            prop_assert_eq!(AmountExtractor::default().extract(&text), None);
        }
    }
}
