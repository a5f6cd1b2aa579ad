pub mod client;
pub mod image_encoder;
pub mod text_recognizer;
