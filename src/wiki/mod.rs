//! MediaWiki action API: cookie-carrying session, bot login and page edits.

pub mod cookies;
pub mod edit;
pub mod session;

pub use cookies::CookieJar;
pub use session::{login, LoginOutcome, WikiSession};
