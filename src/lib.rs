//! Tools for a MediaWiki site maintained from a GitHub repository.
//!
//! - [`wiki`] logs a bot in and edits pages through the action API.
//! - [`publish`] copies a repository file onto a wiki page.
//! - [`sidebar`] renders the recent-changes sidebar widget.

pub mod actions;
pub mod config;
pub mod error;
pub mod github;
pub mod http;
pub mod logging;
pub mod publish;
pub mod sidebar;
pub mod wiki;

pub use error::{Error, Result};
