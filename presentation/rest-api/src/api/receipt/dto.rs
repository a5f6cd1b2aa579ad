use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use business::domain::receipt::model::ReceiptAmount;

/// Receipt image to read a total from.
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct ExtractAmountRequest {
    /// Base64 image, optionally as a `data:image/...;base64,` URL
    pub image_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct ReceiptAmountResponse {
    /// Total found next to the first "total" keyword
    pub amount: f64,
    /// Amount formatted with two fraction digits
    pub display_amount: String,
    /// Recognized lines the total was read from
    pub lines: Vec<String>,
}

impl From<ReceiptAmount> for ReceiptAmountResponse {
    fn from(receipt: ReceiptAmount) -> Self {
        Self {
            amount: receipt.amount.value(),
            display_amount: receipt.amount.to_string(),
            lines: receipt.lines.into_lines(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::receipt::model::{ExtractedAmount, RecognizedText};

    #[test]
    fn should_map_receipt_amount_to_response() {
        let receipt = ReceiptAmount {
            amount: ExtractedAmount::new(14000.5).unwrap(),
            lines: RecognizedText::from(vec!["Cafe", "TOTAL 14,000.50"]),
        };

        let response = ReceiptAmountResponse::from(receipt);

        assert_eq!(response.amount, 14000.5);
        assert_eq!(response.display_amount, "14000.50");
        assert_eq!(response.lines, vec!["Cafe", "TOTAL 14,000.50"]);
    }
}
