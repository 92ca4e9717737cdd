/// Input problems caught before any remote call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a question before submitting.")]
    EmptyQuestion,
    #[error("Please upload an audio file first.")]
    MissingUpload,
    #[error("The uploaded audio file is empty.")]
    EmptyUpload,
    #[error("Unsupported audio format '{0}'. Upload an mp3, wav or m4a file.")]
    UnsupportedFormat(String),
}
