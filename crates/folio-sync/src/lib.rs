pub mod github;
pub mod http;
pub mod reconciler;
pub mod traits;

pub use github::{GitHubRemote, DOCUMENT_PATH};
pub use reconciler::{PublishOutcome, ReadMode, Reconciler, DEFAULT_COMMIT_MESSAGE, FALLBACK_REPO};
pub use traits::{PublishError, RemoteDocument};
