use serde::Deserialize;
use std::collections::HashMap;

/// Class carried by every node the widget renders, so a later render can find
/// and remove them. The spelling is part of the existing on-wiki markup.
pub const RENDERED_CLASS: &str = "sidebar-resentchanges";

/// Markup for one skin: where the menu goes, the menu wrapper and one row.
///
/// `menu` sees `${tabname}` and `${contents}`; `row` sees `${pagename}`,
/// `${link}` and `${timeago}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SkinTemplate {
    pub target: String,
    pub menu: String,
    pub row: String,
}

impl SkinTemplate {
    fn new(target: &str, menu: &str, row: &str) -> Self {
        Self {
            target: target.to_string(),
            menu: menu.to_string(),
            row: row.to_string(),
        }
    }
}

fn vector() -> SkinTemplate {
    SkinTemplate::new(
        "#mw-panel",
        concat!(
            r#"<nav id="p-${tabname}" class="vector-menu mw-portlet vector-menu-portal portal sidebar-resentchanges" aria-labelledby="p-${tabname}-label" role="navigation">"#,
            r#"<h3 id="p-${tabname}-label" class="vector-menu-heading">"#,
            r#"<span class="vector-menu-heading-label">${tabname}</span>"#,
            r#"</h3>"#,
            r#"<div class="vector-menu-content">"#,
            r#"<ul class="vector-menu-content-list">"#,
            r#"${contents}"#,
            r#"</ul>"#,
            r#"</div>"#,
            r#"</nav>"#,
        ),
        r#"<li class="mw-list-item"><a href="${link}" title="${pagename}"><span>${pagename} (${timeago})</span></a></li>"#,
    )
}

fn vector_2022() -> SkinTemplate {
    SkinTemplate::new(
        "#vector-main-menu",
        concat!(
            r#"<div id="p-${tabname}" class="vector-menu mw-portlet mw-portlet-${tabname} sidebar-resentchanges">"#,
            r#"<div class="vector-menu-heading">"#,
            r#"${tabname}"#,
            r#"</div>"#,
            r#"<div class="vector-menu-content">"#,
            r#"<ul class="vector-menu-content-list">"#,
            r#"${contents}"#,
            r#"</ul>"#,
            r#"</div>"#,
            r#"</div>"#,
        ),
        r#"<li class="mw-list-item"><a href="${link}"><span>${pagename} (${timeago})</span></a></li>"#,
    )
}

fn metrolook() -> SkinTemplate {
    SkinTemplate::new(
        "#mw-panel",
        concat!(
            r#"<div class="portal expanded sidebar-resentchanges" role="navigation" id="p-${tabname}" aria-labelledby="p-${tabname}-label">"#,
            r##"<h5 id="p-${tabname}-label" tabindex="0"><a href="#" aria-haspopup="true" aria-controls="p-${tabname}-list" role="button""##,
            r#"aria-pressed="false" aria-expanded="true">${tabname}</a></h5>"#,
            r#"<div class="body" style="display: block;">"#,
            r#"<ul>${contents}</ul>"#,
            r#"</div>"#,
            r#"</div>"#,
        ),
        r#"<li><span title="${pagename}" class="plainlinks" style="font-size:80%"><a href="${link}">${pagename}</a> (${timeago})</span></li>"#,
    )
}

/// Skin name -> template lookup, seeded with the built-in skins.
#[derive(Debug, Clone)]
pub struct SkinRegistry {
    skins: HashMap<String, SkinTemplate>,
}

impl Default for SkinRegistry {
    fn default() -> Self {
        let skins = [
            ("vector", vector()),
            ("vector-2022", vector_2022()),
            ("metrolook", metrolook()),
        ]
        .into_iter()
        .map(|(name, template)| (name.to_string(), template))
        .collect();

        Self { skins }
    }
}

impl SkinRegistry {
    /// Built-ins plus `overrides`; an override replaces a built-in of the same name.
    pub fn with_overrides(overrides: HashMap<String, SkinTemplate>) -> Self {
        let mut registry = Self::default();
        registry.skins.extend(overrides);
        registry
    }

    pub fn get(&self, skin: &str) -> Option<&SkinTemplate> {
        self.skins.get(skin)
    }

    pub fn contains(&self, skin: &str) -> bool {
        self.skins.contains_key(skin)
    }
}
