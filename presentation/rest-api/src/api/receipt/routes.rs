use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use business::domain::receipt::use_cases::extract_amount::{
    ExtractAmountParams, ExtractReceiptAmountUseCase,
};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::receipt::dto::{ExtractAmountRequest, ReceiptAmountResponse};
use crate::api::tags::ApiTags;

pub struct ReceiptApi {
    extract_amount_use_case: Arc<dyn ExtractReceiptAmountUseCase>,
}

impl ReceiptApi {
    pub fn new(extract_amount_use_case: Arc<dyn ExtractReceiptAmountUseCase>) -> Self {
        Self {
            extract_amount_use_case,
        }
    }
}

/// Receipt API
///
/// Stateless total extraction for clients that manage their own form.
#[OpenApi]
impl ReceiptApi {
    /// Extract the total from a receipt image
    ///
    /// Runs text recognition on the image and returns the amount printed
    /// after the first line containing "total".
    #[oai(path = "/receipts/extract-amount", method = "post", tag = "ApiTags::Receipts")]
    async fn extract_amount(&self, body: Json<ExtractAmountRequest>) -> ExtractAmountResponse {
        let params = ExtractAmountParams {
            image_base64: body.0.image_base64,
        };

        match self.extract_amount_use_case.execute(params).await {
            Ok(receipt) => ExtractAmountResponse::Ok(Json(receipt.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => ExtractAmountResponse::BadRequest(json),
                    422 => ExtractAmountResponse::UnprocessableEntity(json),
                    502 => ExtractAmountResponse::BadGateway(json),
                    _ => ExtractAmountResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum ExtractAmountResponse {
    #[oai(status = 200)]
    Ok(Json<ReceiptAmountResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
