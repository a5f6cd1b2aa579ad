use serde::{Deserialize, Serialize};

/// Lines of text recognized on a receipt image, in the order the OCR
/// engine reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedText(Vec<String>);

impl RecognizedText {
    pub fn new(lines: Vec<String>) -> Self {
        Self(lines)
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for RecognizedText {
    fn from(lines: Vec<String>) -> Self {
        Self(lines)
    }
}

impl From<Vec<&str>> for RecognizedText {
    fn from(lines: Vec<&str>) -> Self {
        Self(lines.into_iter().map(str::to_string).collect())
    }
}

/// A non-negative monetary total read from a receipt.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ExtractedAmount(f64);

impl ExtractedAmount {
    /// Returns `None` for negative or non-finite values.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for ExtractedAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Outcome of a one-shot extraction: the total plus the lines it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptAmount {
    pub amount: ExtractedAmount,
    pub lines: RecognizedText,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_amount_with_two_fraction_digits() {
        let amount = ExtractedAmount::new(14000.0).unwrap();
        assert_eq!(amount.to_string(), "14000.00");

        let amount = ExtractedAmount::new(7.5).unwrap();
        assert_eq!(amount.to_string(), "7.50");
    }

    #[test]
    fn should_reject_negative_and_non_finite_amounts() {
        assert!(ExtractedAmount::new(-1.0).is_none());
        assert!(ExtractedAmount::new(f64::NAN).is_none());
        assert!(ExtractedAmount::new(f64::INFINITY).is_none());
        assert!(ExtractedAmount::new(0.0).is_some());
    }

    #[test]
    fn should_keep_line_order() {
        let text = RecognizedText::from(vec!["first", "second"]);
        assert_eq!(text.lines(), ["first".to_string(), "second".to_string()]);
        assert_eq!(text.len(), 2);
        assert!(!text.is_empty());
    }
}
