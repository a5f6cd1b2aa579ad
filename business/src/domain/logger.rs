/// Logging port used by the use cases and the scan controller.
///
/// Messages may name files, session tokens and amounts, never image data.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}
