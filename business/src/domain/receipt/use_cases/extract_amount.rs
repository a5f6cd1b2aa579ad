use async_trait::async_trait;

use crate::domain::receipt::errors::ReceiptError;
use crate::domain::receipt::model::ReceiptAmount;

pub struct ExtractAmountParams {
    pub image_base64: String,
}

#[async_trait]
pub trait ExtractReceiptAmountUseCase: Send + Sync {
    async fn execute(&self, params: ExtractAmountParams) -> Result<ReceiptAmount, ReceiptError>;
}
