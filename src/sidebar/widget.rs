use super::feed::{self, FeedItem};
use super::host::SidebarHost;
use super::i18n::Locale;
use super::skins::{SkinRegistry, SkinTemplate};
use super::template::fill;
use crate::config::SidebarConfig;
use crate::error::Result;
use crate::http::HttpTransport;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

/// How many rows the sidebar menu shows; the content slot gets all of them.
pub const MENU_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered { rows: usize },
    UnknownSkin,
    /// The skin's target container was missing or ambiguous.
    NoTarget,
}

#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    last_executed: Option<DateTime<Utc>>,
}

impl WidgetState {
    pub fn last_executed(&self) -> Option<DateTime<Utc>> {
        self.last_executed
    }
}

/// The recent-changes sidebar: renders on load, then again whenever the page
/// becomes visible and the refresh delay has passed since the last render.
pub struct SidebarWidget {
    skins: SkinRegistry,
    locale: Locale,
    refresh_delay: Duration,
    state: WidgetState,
}

impl SidebarWidget {
    pub fn new(config: &SidebarConfig) -> Self {
        Self {
            skins: SkinRegistry::with_overrides(config.skins.clone()),
            locale: config.locale,
            refresh_delay: refresh_delay(config.refresh_delay_secs),
            state: WidgetState::default(),
        }
    }

    pub fn skins(&self) -> &SkinRegistry {
        &self.skins
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub async fn on_load(&mut self, host: &mut dyn SidebarHost, transport: &dyn HttpTransport, now: DateTime<Utc>) {
        self.refresh(host, transport, now).await;
        self.state.last_executed = Some(now);
    }

    /// Returns whether a render was triggered.
    pub async fn on_visibility_change(
        &mut self,
        host: &mut dyn SidebarHost,
        transport: &dyn HttpTransport,
        hidden: bool,
        now: DateTime<Utc>,
    ) -> bool {
        if hidden {
            return false;
        }
        let due = match self.state.last_executed {
            Some(last) => now - last >= self.refresh_delay,
            None => true,
        };
        if !due {
            debug!("Skipping refresh, last render was under {}s ago", self.refresh_delay.num_seconds());
            return false;
        }

        self.refresh(host, transport, now).await;
        self.state.last_executed = Some(now);
        true
    }

    /// Renders and logs failures; whatever was rendered before stays in place.
    async fn refresh(&self, host: &mut dyn SidebarHost, transport: &dyn HttpTransport, now: DateTime<Utc>) {
        match self.render(host, transport, now).await {
            Ok(RenderOutcome::Rendered { rows }) => info!("Rendered {} recent changes", rows),
            Ok(outcome) => debug!("Nothing rendered: {:?}", outcome),
            Err(e) => warn!("Failed to refresh recent changes: {}", e),
        }
    }

    pub async fn render(
        &self,
        host: &mut dyn SidebarHost,
        transport: &dyn HttpTransport,
        now: DateTime<Utc>,
    ) -> Result<RenderOutcome> {
        let Some(template) = host.skin().and_then(|skin| self.skins.get(skin)) else {
            return Ok(RenderOutcome::UnknownSkin);
        };
        if host.count_matches(&template.target) != 1 {
            return Ok(RenderOutcome::NoTarget);
        }

        let request = feed::recent_changes_request(host.script_path());
        let url = request.url.clone();
        let response = transport.execute(request).await?.error_for_status(&url)?;
        let items = feed::parse_items(&response.body, host.article_path(), now, self.locale)?;

        let rows = build_rows(template, &items, self.locale);
        let messages = self.locale.messages();

        host.remove_rendered();
        host.fill_slot(&rows.concat());

        let contents = rows.iter().take(MENU_ROWS).map(String::as_str).collect::<String>();
        let fields = [("tabname", messages.recent_changes), ("contents", contents.as_str())];
        host.append_to(&template.target, &fill(&template.menu, &fields));

        if host.has_toggle_handler() {
            let header = fill(".vector-menu-heading,#p-${tabname}-label", &fields);
            host.rebind_toggle(&header);
        }

        Ok(RenderOutcome::Rendered { rows: rows.len() })
    }
}

/// Delays past what `Duration` can hold are clamped to its maximum.
fn refresh_delay(secs: u64) -> Duration {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}

/// One row per item, or a single placeholder row when there are none.
pub fn build_rows(template: &SkinTemplate, items: &[FeedItem], locale: Locale) -> Vec<String> {
    if items.is_empty() {
        let fields = [("pagename", locale.messages().no_update), ("link", ""), ("timeago", "")];
        return vec![fill(&template.row, &fields)];
    }

    items
        .iter()
        .map(|item| {
            let fields = [
                ("pagename", item.title.as_str()),
                ("link", item.link.as_str()),
                ("timeago", item.time_ago.as_str()),
            ];
            fill(&template.row, &fields)
        })
        .collect()
}
