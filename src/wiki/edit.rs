use super::session::WikiSession;
use crate::error::{Error, Result};
use crate::http::HttpRequest;
use serde::Deserialize;
use tracing::{debug, info, warn};

pub const EDIT_SUMMARY: &str = "Posted via GitHub Actions";
const EDIT_SUCCESS: &str = "Success";

#[derive(Debug, Deserialize)]
struct EditResponse {
    edit: Option<EditResult>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct EditResult {
    pub result: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "newrevid")]
    pub new_revision: Option<u64>,
    /// Present when MediaWiki suppressed a no-op edit.
    pub nochange: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<String>,
    info: Option<String>,
}

impl WikiSession<'_> {
    /// Replaces the text of `title` with `text` as a bot edit.
    pub async fn edit_page(&mut self, title: &str, text: &str, csrf_token: &str) -> Result<EditResult> {
        let url = format!("{}?format=json", self.api());
        let request = HttpRequest::post_form(
            url,
            [
                ("action", "edit"),
                ("title", title),
                ("text", text),
                ("token", csrf_token),
                ("summary", EDIT_SUMMARY),
                ("bot", "true"),
            ],
        );

        let response = self.send(request).await?;
        debug!("Edit response: {}", response.body);
        let parsed: EditResponse = response.json()?;

        match parsed {
            EditResponse {
                edit: Some(edit), ..
            } if edit.result.as_deref() == Some(EDIT_SUCCESS) => {
                if edit.nochange.is_some() {
                    info!("Page {} already up to date", title);
                } else {
                    info!("Page {} edited successfully", title);
                }
                Ok(edit)
            }
            EditResponse {
                error: Some(error), ..
            } => {
                warn!("Failed to edit page: {}", response.body);
                let info = error
                    .info
                    .or(error.code)
                    .unwrap_or_else(|| "unknown API error".to_string());
                Err(Error::Api(info))
            }
            EditResponse { edit: Some(edit), .. } => {
                warn!("Failed to edit page: {}", response.body);
                let result = edit.result.as_deref().unwrap_or("missing");
                Err(Error::Api(format!("edit result was {}", result)))
            }
            _ => {
                warn!("Failed to edit page: {}", response.body);
                Err(Error::Api("response carried no edit result".to_string()))
            }
        }
    }
}
