use std::sync::Arc;

use logger::TracingLogger;
use memory::expense_form::store::ExpenseFormStore;
use ocr::client::OcrHttpClient;
use ocr::image_encoder::Base64ImageEncoder;
use ocr::text_recognizer::OcrServiceHttp;

use business::application::receipt::extract_amount::ExtractReceiptAmountUseCaseImpl;
use business::application::scan_session::controller::ScanDependencies;
use business::domain::receipt::amount_extractor::AmountExtractor;

use crate::api::expense_form::routes::ExpenseFormApi;
use crate::api::health::routes::HealthApi;
use crate::api::receipt::routes::ReceiptApi;
use crate::config::app_config::AppConfig;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub receipt_api: ReceiptApi,
    pub expense_form_api: ExpenseFormApi,
}

impl DependencyContainer {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        // Infrastructure adapters
        let ocr_client = OcrHttpClient::new(
            config.ocr.endpoint.clone(),
            config.ocr.api_key.clone(),
            config.ocr.timeout,
        );
        let ocr = Arc::new(OcrServiceHttp::new(ocr_client));
        let encoder = Arc::new(Base64ImageEncoder::new());
        let extractor = AmountExtractor::new(config.extraction.number_format);

        tracing::info!(
            "OCR service at {} ({}s timeout), amounts read with {} grouping",
            config.ocr.endpoint,
            config.ocr.timeout.as_secs(),
            config.extraction.number_format
        );

        // Receipt use cases
        let extract_amount_use_case = Arc::new(ExtractReceiptAmountUseCaseImpl {
            encoder: encoder.clone(),
            ocr: ocr.clone(),
            extractor,
            logger: Arc::new(TracingLogger::new("receipt")),
        });

        // Expense forms and their scan controllers
        let store = Arc::new(ExpenseFormStore::new(ScanDependencies {
            encoder,
            ocr,
            extractor,
            logger: Arc::new(TracingLogger::new("scan_session")),
        }));

        Ok(Self {
            health_api: HealthApi::new(),
            receipt_api: ReceiptApi::new(extract_amount_use_case),
            expense_form_api: ExpenseFormApi::new(store),
        })
    }
}
