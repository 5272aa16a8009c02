use crate::error::Result;
use crate::http::{HttpRequest, HttpTransport};
use tracing::info;

const RAW_MEDIA_TYPE: &str = "application/vnd.github.v3.raw";

/// Reads raw file contents through the GitHub repository contents API.
pub struct GithubContentClient<'a> {
    api_base: String,
    token: String,
    transport: &'a dyn HttpTransport,
}

impl<'a> GithubContentClient<'a> {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>, transport: &'a dyn HttpTransport) -> Self {
        Self {
            api_base: api_base.into(),
            token: token.into(),
            transport,
        }
    }

    pub fn content_url(&self, owner: &str, repo: &str, path: &str, git_ref: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            self.api_base,
            owner,
            repo,
            path.trim_start_matches('/'),
            urlencoding::encode(git_ref)
        )
    }

    pub async fn fetch_raw(&self, owner: &str, repo: &str, path: &str, git_ref: &str) -> Result<String> {
        let url = self.content_url(owner, repo, path, git_ref);

        let request = HttpRequest::get(url.clone())
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", RAW_MEDIA_TYPE)
            .header("X-GitHub-Api-Version", "2022-11-28");

        let response = self.transport.execute(request).await?.error_for_status(&url)?;
        info!("Fetched {} ({} bytes) from {}/{}@{}", path, response.body.len(), owner, repo, git_ref);

        Ok(response.body)
    }
}
