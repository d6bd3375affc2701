use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuggestError {
   #[error("Git command failed: {0}")]
   GitError(String),

   #[error("No staged changes. Run 'git add' first.")]
   NoStagedChanges,

   #[error("Nothing left to send to the engine; every staged file matched an exclusion rule")]
   NoRelevantChanges,

   #[error("Detached HEAD state: there is no branch name to prefix with")]
   DetachedHead,

   #[error("Engine response is not a JSON array:\n{raw}")]
   MalformedResponse { raw: String },

   #[error("Engine response contained no usable commit messages")]
   EmptyResponse,

   #[error("{0} returned an empty completion")]
   BlankCompletion(String),

   #[error("Authentication failed: {0}")]
   AuthFailed(String),

   #[error("Rate limited: {0}")]
   RateLimited(String),

   #[error("Bad request: {0}")]
   BadRequest(String),

   #[error("Connection failed: {0}")]
   Connectivity(String),

   #[error("API request failed (HTTP {status}): {body}")]
   ApiError { status: u16, body: String },

   #[error("Commit cancelled")]
   Cancelled,

   #[error("IO error: {0}")]
   IoError(#[from] std::io::Error),

   #[error("JSON error: {0}")]
   JsonError(#[from] serde_json::Error),

   #[error("HTTP error: {0}")]
   HttpError(#[from] reqwest::Error),

   #[error("Clipboard error: {0}")]
   ClipboardError(#[from] arboard::Error),

   #[error("{0}")]
   Other(String),
}

impl From<dialoguer::Error> for SuggestError {
   fn from(err: dialoguer::Error) -> Self {
      match err {
         dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => Self::Cancelled,
         dialoguer::Error::IO(e) => Self::IoError(e),
      }
   }
}

pub type Result<T> = std::result::Result<T, SuggestError>;
