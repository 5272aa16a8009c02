use super::skins::SkinRegistry;
use scraper::{Html, Selector};

/// Selector for the in-content slot a wiki page can place to receive the full list.
pub const RECENT_CHANGES_SLOT: &str = ".recent-changes-js";

/// The page the widget renders into.
pub trait SidebarHost {
    fn skin(&self) -> Option<&str>;
    fn script_path(&self) -> &str;
    fn article_path(&self) -> &str;
    /// Number of nodes matching a CSS selector.
    fn count_matches(&self, selector: &str) -> usize;
    /// Drops every node a previous render added.
    fn remove_rendered(&mut self);
    /// Replaces the contents of [`RECENT_CHANGES_SLOT`] nodes.
    fn fill_slot(&mut self, html: &str);
    fn append_to(&mut self, selector: &str, html: &str);
    fn has_toggle_handler(&self) -> bool;
    fn rebind_toggle(&mut self, header_selector: &str);
}

/// A rendered menu appended under a target container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendedMenu {
    pub target: String,
    pub html: String,
}

/// A host backed by a static HTML snapshot of a wiki page.
///
/// The snapshot is only read; what the widget writes is kept alongside it.
pub struct StaticPage {
    document: Html,
    skin: Option<String>,
    script_path: String,
    article_path: String,
    toggle_handler: bool,
    slot_html: Option<String>,
    menus: Vec<AppendedMenu>,
    bound_toggle: Option<String>,
}

impl StaticPage {
    pub fn new(html: &str, script_path: impl Into<String>, article_path: impl Into<String>) -> Self {
        Self {
            document: Html::parse_document(html),
            skin: None,
            script_path: script_path.into(),
            article_path: article_path.into(),
            toggle_handler: false,
            slot_html: None,
            menus: Vec::new(),
            bound_toggle: None,
        }
    }

    /// Uses `skin` if given, else the longest `skin-*` body class the registry knows.
    pub fn with_skin(mut self, skin: Option<String>, registry: &SkinRegistry) -> Self {
        self.skin = skin.or_else(|| detect_skin(&self.document, registry));
        self
    }

    pub fn with_toggle_handler(mut self, present: bool) -> Self {
        self.toggle_handler = present;
        self
    }

    pub fn slot_html(&self) -> Option<&str> {
        self.slot_html.as_deref()
    }

    pub fn menus(&self) -> &[AppendedMenu] {
        &self.menus
    }

    pub fn bound_toggle(&self) -> Option<&str> {
        self.bound_toggle.as_deref()
    }
}

fn detect_skin(document: &Html, registry: &SkinRegistry) -> Option<String> {
    let selector = Selector::parse("body").ok()?;
    let body = document.select(&selector).next()?;
    let skins: Vec<&str> = body
        .value()
        .attr("class")?
        .split_whitespace()
        .filter_map(|class| class.strip_prefix("skin-"))
        .collect();

    // vector-2022 pages also carry skin-vector; the longest known name is the specific one
    skins
        .iter()
        .filter(|name| registry.contains(name))
        .max_by_key(|name| name.len())
        .or_else(|| skins.first())
        .map(|name| name.to_string())
}

impl SidebarHost for StaticPage {
    fn skin(&self) -> Option<&str> {
        self.skin.as_deref()
    }

    fn script_path(&self) -> &str {
        &self.script_path
    }

    fn article_path(&self) -> &str {
        &self.article_path
    }

    fn count_matches(&self, selector: &str) -> usize {
        match Selector::parse(selector) {
            Ok(selector) => self.document.select(&selector).count(),
            Err(_) => 0,
        }
    }

    fn remove_rendered(&mut self) {
        self.menus.clear();
    }

    fn fill_slot(&mut self, html: &str) {
        if self.count_matches(RECENT_CHANGES_SLOT) > 0 {
            self.slot_html = Some(html.to_string());
        }
    }

    fn append_to(&mut self, selector: &str, html: &str) {
        self.menus.push(AppendedMenu {
            target: selector.to_string(),
            html: html.to_string(),
        });
    }

    fn has_toggle_handler(&self) -> bool {
        self.toggle_handler
    }

    fn rebind_toggle(&mut self, header_selector: &str) {
        self.bound_toggle = Some(header_selector.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VECTOR_PAGE: &str = r#"<html><body class="mediawiki ltr skin-vector-2022 skin-vector action-view">
<div id="vector-main-menu"></div>
<div class="mw-parser-output"><div class="recent-changes-js"></div></div>
</body></html>"#;

    #[test]
    fn test_detects_known_skin_class() {
        let page = StaticPage::new(VECTOR_PAGE, "/w", "/wiki/$1").with_skin(None, &SkinRegistry::default());
        assert_eq!(page.skin(), Some("vector-2022"));
    }

    #[test]
    fn test_most_specific_skin_wins_in_any_class_order() {
        let registry = SkinRegistry::default();
        for body in [
            r#"<body class="skin-vector skin-vector-2022"></body>"#,
            r#"<body class="skin-vector-2022 skin-vector"></body>"#,
            r#"<body class="skin--vector-2022 skin-vector skin-vector-2022"></body>"#,
        ] {
            let page = StaticPage::new(body, "/w", "/wiki/$1").with_skin(None, &registry);
            assert_eq!(page.skin(), Some("vector-2022"), "{body}");
        }
    }

    #[test]
    fn test_body_without_class_has_no_skin() {
        let page = StaticPage::new("<body></body>", "/w", "/wiki/$1").with_skin(None, &SkinRegistry::default());
        assert_eq!(page.skin(), None);
    }

    #[test]
    fn test_explicit_skin_wins() {
        let page = StaticPage::new(VECTOR_PAGE, "/w", "/wiki/$1")
            .with_skin(Some("metrolook".into()), &SkinRegistry::default());
        assert_eq!(page.skin(), Some("metrolook"));
    }

    #[test]
    fn test_unknown_skin_falls_back_to_first_class() {
        let page = StaticPage::new(r#"<body class="skin-timeless"></body>"#, "/w", "/wiki/$1")
            .with_skin(None, &SkinRegistry::default());
        assert_eq!(page.skin(), Some("timeless"));
    }

    #[test]
    fn test_count_matches() {
        let page = StaticPage::new(VECTOR_PAGE, "/w", "/wiki/$1");
        assert_eq!(page.count_matches("#vector-main-menu"), 1);
        assert_eq!(page.count_matches("#mw-panel"), 0);
        assert_eq!(page.count_matches("[[bad"), 0);
    }

    #[test]
    fn test_slot_only_filled_when_present() {
        let mut page = StaticPage::new(VECTOR_PAGE, "/w", "/wiki/$1");
        page.fill_slot("<li>x</li>");
        assert_eq!(page.slot_html(), Some("<li>x</li>"));

        let mut bare = StaticPage::new("<body></body>", "/w", "/wiki/$1");
        bare.fill_slot("<li>x</li>");
        assert_eq!(bare.slot_html(), None);
    }

    #[test]
    fn test_remove_rendered_clears_menus() {
        let mut page = StaticPage::new(VECTOR_PAGE, "/w", "/wiki/$1");
        page.append_to("#vector-main-menu", "<div></div>");
        assert_eq!(page.menus().len(), 1);
        page.remove_rendered();
        assert!(page.menus().is_empty());
    }
}
