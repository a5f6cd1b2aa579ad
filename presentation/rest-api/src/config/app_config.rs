use super::{
    cors_config, extraction_config::ExtractionConfig, ocr_config::OcrConfig,
    server_config::ServerConfig,
};
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub ocr: OcrConfig,
    pub extraction: ExtractionConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            cors: cors_config::init_cors(),
            ocr: OcrConfig::from_env(),
            extraction: ExtractionConfig::from_env(),
        }
    }
}
