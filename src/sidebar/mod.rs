//! The recent-changes sidebar widget.
//!
//! Fetches the wiki's `feedrecentchanges` RSS, turns each entry into a row
//! with a relative timestamp, and renders the rows into the active skin's
//! navigation panel through a [`host::SidebarHost`].

pub mod feed;
pub mod host;
pub mod i18n;
pub mod relative_time;
pub mod skins;
pub mod template;
pub mod widget;

pub use feed::FeedItem;
pub use host::{SidebarHost, StaticPage};
pub use i18n::Locale;
pub use skins::{SkinRegistry, SkinTemplate};
pub use widget::{RenderOutcome, SidebarWidget};
