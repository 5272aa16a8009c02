use crate::error::{Error, Result};
use crate::sidebar::i18n::Locale;
use crate::sidebar::skins::SkinTemplate;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_REFRESH_DELAY_SECS: u64 = 300;

/// Collects required values, remembering the names of the ones that are missing.
/// Empty strings count as missing.
#[derive(Default)]
struct Required {
    missing: Vec<String>,
}

impl Required {
    fn take(&mut self, name: &str, value: Option<String>) -> String {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => v,
            None => {
                self.missing.push(name.to_string());
                String::new()
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T> {
        if self.missing.is_empty() {
            Ok(value)
        } else {
            Err(Error::Configuration(self.missing))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginInputs {
    pub api: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoginConfig {
    pub api: String,
    pub username: String,
    pub password: String,
}

impl LoginInputs {
    pub fn validate(self) -> Result<LoginConfig> {
        let mut req = Required::default();
        let config = LoginConfig {
            api: req.take("MW_API", self.api),
            username: req.take("MW_USERNAME", self.username),
            password: req.take("MW_PASSWORD", self.password),
        };
        req.finish(config)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PublishInputs {
    pub api: Option<String>,
    pub csrf_token: Option<String>,
    pub cookie: Option<String>,
    pub github_token: Option<String>,
    pub target_page: Option<String>,
    pub target_path: Option<String>,
    pub repository: Option<String>,
    pub git_ref: Option<String>,
    pub github_api: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub api: String,
    pub csrf_token: String,
    pub cookie: String,
    pub github_token: String,
    pub target_page: String,
    pub target_path: String,
    pub owner: String,
    pub repo: String,
    pub git_ref: String,
    pub github_api: String,
}

impl PublishInputs {
    pub fn validate(self) -> Result<PublishConfig> {
        let mut req = Required::default();
        let api = req.take("MW_API", self.api);
        let csrf_token = req.take("MW_CSRF_TOKEN", self.csrf_token);
        let cookie = req.take("MW_COOKIE", self.cookie);
        let github_token = req.take("GITHUB_TOKEN", self.github_token);
        let target_page = req.take("MW_TARGET_PAGE", self.target_page);
        let target_path = req.take("GITHUB_TARGET_DIR", self.target_path);
        let repository = req.take("GITHUB_REPOSITORY", self.repository);
        let git_ref = req.take("GITHUB_REF", self.git_ref);

        let (owner, repo) = match repository.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
                (owner.to_string(), repo.to_string())
            }
            _ => {
                if !repository.is_empty() {
                    req.missing.push("GITHUB_REPOSITORY (owner/repo)".to_string());
                }
                (String::new(), String::new())
            }
        };

        let github_api = self
            .github_api
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_GITHUB_API.to_string());

        req.finish(PublishConfig {
            api,
            csrf_token,
            cookie,
            github_token,
            target_page,
            target_path,
            owner,
            repo,
            git_ref,
            github_api: github_api.trim_end_matches('/').to_string(),
        })
    }
}

/// Widget settings, read from TOML. Every field has a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    pub locale: Locale,
    /// Minimum seconds between re-renders triggered by the page becoming visible.
    pub refresh_delay_secs: u64,
    /// Overrides skin detection from the host page.
    pub skin: Option<String>,
    pub script_path: Option<String>,
    pub article_path: String,
    /// Extra or replacement skin templates, keyed by skin name.
    pub skins: HashMap<String, SkinTemplate>,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            refresh_delay_secs: DEFAULT_REFRESH_DELAY_SECS,
            skin: None,
            script_path: None,
            article_path: "/wiki/$1".to_string(),
            skins: HashMap::new(),
        }
    }
}

impl SidebarConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sidebar-recentchanges").join("config.toml"))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Loads `path` if given, else the default location if it exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}
