//! Article Fetch - Qiita Items Export
//!
//! The request path behind the slash-command primitive: build the Qiita
//! items URL, fetch it, pretty-print the JSON and persist it to disk.
//!
//! ```text
//! build_items_url → ArticleClient::fetch → pretty_print → write_output
//! ```
//!
//! Every step fails with an [`ArticleError`] whose `Display` text is suitable
//! for showing to a chat user.

pub mod error;
pub mod fetch;
pub mod format;
pub mod output;
pub mod url;

pub use error::ArticleError;
pub use fetch::{ArticleClient, DEFAULT_TIMEOUT_SECS};
pub use format::pretty_print;
pub use output::{DEFAULT_OUTPUT_PATH, write_output};
pub use url::{DEFAULT_BASE_URL, DEFAULT_PAGE, DEFAULT_PER_PAGE, build_items_url};
