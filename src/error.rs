/// All errors that can surface from a diary operation.
#[derive(Debug, thiserror::Error)]
pub enum DiaryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Write something first!")]
    EmptyEntry,

    #[error("Limit: {limit} words, got {count}. Trim a bit.")]
    WordLimit { count: usize, limit: usize },

    #[error("Pick a valid future time.")]
    PastReminder,

    #[error("Could not parse \"{0}\" as a date & time")]
    BadTime(String),
}

impl DiaryError {
    /// Rejections caused by user input, as opposed to real failures.
    /// The surface shows these as a blocking message; nothing was mutated.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            DiaryError::EmptyEntry
                | DiaryError::WordLimit { .. }
                | DiaryError::PastReminder
                | DiaryError::BadTime(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DiaryError>;
