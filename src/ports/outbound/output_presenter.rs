use crate::shared::Result;

/// OutputPresenter port for presenting the formatted report
///
/// Implementations decide where the report goes (stdout, file).
pub trait OutputPresenter {
    /// Presents the formatted report content
    ///
    /// # Errors
    /// Returns an error if the output destination cannot be written
    fn present(&self, content: &str) -> Result<()>;
}
