use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::receipt::amount_extractor::AmountExtractor;
use crate::domain::receipt::errors::ReceiptError;
use crate::domain::receipt::model::ReceiptAmount;
use crate::domain::receipt::services::{ImageEncoderService, OcrService};
use crate::domain::receipt::use_cases::extract_amount::{
    ExtractAmountParams, ExtractReceiptAmountUseCase,
};
use crate::domain::receipt::value_objects::SelectedFile;

const UPLOAD_NAME: &str = "upload";

/// One-shot extraction without a scan session or a form to write to.
pub struct ExtractReceiptAmountUseCaseImpl {
    pub encoder: Arc<dyn ImageEncoderService>,
    pub ocr: Arc<dyn OcrService>,
    pub extractor: AmountExtractor,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ExtractReceiptAmountUseCase for ExtractReceiptAmountUseCaseImpl {
    async fn execute(&self, params: ExtractAmountParams) -> Result<ReceiptAmount, ReceiptError> {
        if params.image_base64.trim().is_empty() {
            self.logger.warn("Receipt extraction requested without an image");
            return Err(ReceiptError::ImageMissing);
        }

        let file = SelectedFile::from_data_url(UPLOAD_NAME, params.image_base64);
        let image = self.encoder.encode(&file).await.inspect_err(|err| {
            self.logger.error(&format!(
                "Receipt image could not be encoded: {}",
                err.reason().unwrap_or("no detail")
            ));
        })?;

        self.logger.info(&format!(
            "Recognizing receipt text ({} base64 chars)",
            image.len()
        ));
        let lines = self.ocr.recognize(&image).await.inspect_err(|err| {
            self.logger.error(&format!(
                "Text recognition failed: {}",
                err.reason().unwrap_or("no detail")
            ));
        })?;

        match self.extractor.extract(&lines) {
            Some(amount) => {
                self.logger.info(&format!(
                    "Receipt total {} found in {} lines",
                    amount,
                    lines.len()
                ));
                Ok(ReceiptAmount { amount, lines })
            }
            None => {
                self.logger.warn(&format!(
                    "No total found in {} recognized lines",
                    lines.len()
                ));
                Err(ReceiptError::TotalNotFound)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::receipt::model::{ExtractedAmount, RecognizedText};
    use crate::domain::receipt::value_objects::{Base64Image, ImageSource};
    use mockall::mock;

    mock! {
        pub Encoder {}

        #[async_trait]
        impl ImageEncoderService for Encoder {
            async fn encode(&self, file: &SelectedFile) -> Result<Base64Image, ReceiptError>;
        }
    }

    mock! {
        pub Ocr {}

        #[async_trait]
        impl OcrService for Ocr {
            async fn recognize(&self, image: &Base64Image) -> Result<RecognizedText, ReceiptError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn data_url_encoder() -> MockEncoder {
        let mut encoder = MockEncoder::new();
        encoder.expect_encode().returning(|file| match file.source() {
            ImageSource::DataUrl(raw) => Base64Image::from_data_url(raw),
            _ => Err(ReceiptError::encoding("unexpected source")),
        });
        encoder
    }

    fn use_case(encoder: MockEncoder, ocr: MockOcr) -> ExtractReceiptAmountUseCaseImpl {
        ExtractReceiptAmountUseCaseImpl {
            encoder: Arc::new(encoder),
            ocr: Arc::new(ocr),
            extractor: AmountExtractor::default(),
            logger: mock_logger(),
        }
    }

    #[tokio::test]
    async fn should_return_amount_and_lines_when_total_found() {
        let mut ocr = MockOcr::new();
        ocr.expect_recognize()
            .withf(|image| image.as_str() == "iVBORw0KGgo=")
            .returning(|_| {
                Ok(RecognizedText::from(vec![
                    "ITEM A 5,000",
                    "SUBTOTAL 12,500",
                    "TOTAL 14,000",
                ]))
            });

        let result = use_case(data_url_encoder(), ocr)
            .execute(ExtractAmountParams {
                image_base64: "data:image/png;base64,iVBORw0KGgo=".to_string(),
            })
            .await;

        let receipt = result.unwrap();
        assert_eq!(receipt.amount, ExtractedAmount::new(12500.0).unwrap());
        assert_eq!(receipt.lines.len(), 3);
    }

    #[tokio::test]
    async fn should_return_image_missing_when_payload_blank() {
        let mut encoder = MockEncoder::new();
        encoder.expect_encode().never();
        let mut ocr = MockOcr::new();
        ocr.expect_recognize().never();

        let result = use_case(encoder, ocr)
            .execute(ExtractAmountParams {
                image_base64: "  ".to_string(),
            })
            .await;

        assert_eq!(result.unwrap_err(), ReceiptError::ImageMissing);
    }

    #[tokio::test]
    async fn should_return_total_not_found_when_no_keyword() {
        let mut ocr = MockOcr::new();
        ocr.expect_recognize()
            .returning(|_| Ok(RecognizedText::from(vec!["THANK YOU"])));

        let result = use_case(data_url_encoder(), ocr)
            .execute(ExtractAmountParams {
                image_base64: "aGVsbG8=".to_string(),
            })
            .await;

        assert_eq!(result.unwrap_err(), ReceiptError::TotalNotFound);
    }

    #[tokio::test]
    async fn should_propagate_ocr_failure() {
        let mut ocr = MockOcr::new();
        ocr.expect_recognize()
            .returning(|_| Err(ReceiptError::ocr_service("connection refused")));

        let result = use_case(data_url_encoder(), ocr)
            .execute(ExtractAmountParams {
                image_base64: "aGVsbG8=".to_string(),
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ReceiptError::OcrServiceFailed(_)
        ));
    }

    #[tokio::test]
    async fn should_propagate_encoding_failure() {
        let mut ocr = MockOcr::new();
        ocr.expect_recognize().never();

        let result = use_case(data_url_encoder(), ocr)
            .execute(ExtractAmountParams {
                image_base64: "data:image/png;base64,".to_string(),
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ReceiptError::EncodingFailed(_)
        ));
    }
}
