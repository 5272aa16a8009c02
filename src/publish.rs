use crate::config::{PublishConfig, PublishInputs};
use crate::error::Result;
use crate::github::GithubContentClient;
use crate::http::HttpTransport;
use crate::wiki::cookies::CookieJar;
use crate::wiki::edit::EditResult;
use crate::wiki::session::WikiSession;
use tracing::info;

/// Copies one repository file onto one wiki page, reusing a session from `mw-login`.
pub async fn publish(transport: &dyn HttpTransport, inputs: PublishInputs) -> Result<EditResult> {
    let PublishConfig {
        api,
        csrf_token,
        cookie,
        github_token,
        target_page,
        target_path,
        owner,
        repo,
        git_ref,
        github_api,
    } = inputs.validate()?;

    let github = GithubContentClient::new(github_api, github_token, transport);
    let content = github.fetch_raw(&owner, &repo, &target_path, &git_ref).await?;

    info!("Publishing {} to [[{}]]", target_path, target_page);
    let mut session = WikiSession::with_cookies(api, transport, CookieJar::from_header(&cookie));
    session.edit_page(&target_page, &content, &csrf_token).await
}
