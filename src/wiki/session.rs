use super::cookies::CookieJar;
use crate::config::{LoginConfig, LoginInputs};
use crate::error::{Error, Result};
use crate::http::{HttpRequest, HttpResponse, HttpTransport};
use serde::Deserialize;
use tracing::{debug, info, warn};

const LOGIN_SUCCESS: &str = "Success";

#[derive(Debug, Deserialize)]
struct TokensResponse {
    query: Option<TokensQuery>,
}

#[derive(Debug, Deserialize)]
struct TokensQuery {
    tokens: Tokens,
}

#[derive(Debug, Deserialize)]
struct Tokens {
    logintoken: Option<String>,
    csrftoken: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    login: Option<LoginResult>,
}

#[derive(Debug, Deserialize)]
struct LoginResult {
    result: Option<String>,
    reason: Option<serde_json::Value>,
}

/// What a successful login hands to the publish step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub csrf_token: String,
    pub cookie: String,
}

/// An authenticated (or authenticating) conversation with one wiki API.
///
/// Every response's cookies are merged into the jar and the whole jar is
/// replayed on the next request.
pub struct WikiSession<'a> {
    api: String,
    transport: &'a dyn HttpTransport,
    jar: CookieJar,
}

impl<'a> WikiSession<'a> {
    pub fn new(api: impl Into<String>, transport: &'a dyn HttpTransport) -> Self {
        Self::with_cookies(api, transport, CookieJar::new())
    }

    pub fn with_cookies(
        api: impl Into<String>,
        transport: &'a dyn HttpTransport,
        jar: CookieJar,
    ) -> Self {
        Self {
            api: api.into(),
            transport,
            jar,
        }
    }

    pub fn api(&self) -> &str {
        &self.api
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.jar
    }

    /// Sends `request` with the jar attached and folds any returned cookies back in.
    pub async fn send(&mut self, mut request: HttpRequest) -> Result<HttpResponse> {
        if !self.jar.is_empty() {
            request = request.header("Cookie", self.jar.header_value());
        }
        let url = request.url.clone();
        let response = self.transport.execute(request).await?;
        self.jar.merge_all(&response.set_cookies);
        debug!("{} -> {} ({} cookies held)", url, response.status, self.jar.len());
        response.error_for_status(&url)
    }

    async fn fetch_token(&mut self, query: &str) -> Result<Tokens> {
        let url = format!("{}?action=query&meta=tokens{}&format=json", self.api, query);
        let response = self.send(HttpRequest::get(url)).await?;
        let parsed: TokensResponse = response.json()?;
        parsed
            .query
            .map(|q| q.tokens)
            .ok_or_else(|| Error::Response("token query returned no tokens".to_string()))
    }

    pub async fn login_token(&mut self) -> Result<String> {
        self.fetch_token("&type=login")
            .await?
            .logintoken
            .ok_or_else(|| Error::Response("missing query.tokens.logintoken".to_string()))
    }

    pub async fn csrf_token(&mut self) -> Result<String> {
        self.fetch_token("")
            .await?
            .csrftoken
            .ok_or_else(|| Error::Response("missing query.tokens.csrftoken".to_string()))
    }

    /// Runs the bot-password handshake: login token, credentials, CSRF token.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<String> {
        let login_token = self.login_token().await?;

        let url = format!("{}?action=login&format=json", self.api);
        let request = HttpRequest::post_form(
            url,
            [
                ("lgname", username),
                ("lgpassword", password),
                ("lgtoken", login_token.as_str()),
            ],
        );
        let response = self.send(request).await?;
        let parsed: LoginResponse = response.json()?;

        let Some(login) = parsed.login else {
            warn!("Login response: {}", response.body);
            return Err(Error::Authentication(
                "response carried no login result".to_string(),
            ));
        };
        if login.result.as_deref() != Some(LOGIN_SUCCESS) {
            warn!("Login response: {}", response.body);
            let result = login.result.unwrap_or_else(|| "no result".to_string());
            let detail = match login.reason {
                Some(serde_json::Value::String(reason)) => format!("{}: {}", result, reason),
                Some(reason) => format!("{}: {}", result, reason),
                None => result,
            };
            return Err(Error::Authentication(detail));
        }
        info!("Logged in as {}", username);

        self.csrf_token().await
    }
}

/// Validates the inputs, then logs in. No request is made when an input is missing.
pub async fn login(transport: &dyn HttpTransport, inputs: LoginInputs) -> Result<LoginOutcome> {
    let LoginConfig {
        api,
        username,
        password,
    } = inputs.validate()?;

    let mut session = WikiSession::new(api, transport);
    let csrf_token = session.login(&username, &password).await?;

    Ok(LoginOutcome {
        csrf_token,
        cookie: session.cookies().header_value(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::ScriptedTransport;
    use crate::http::Method;

    const API: &str = "https://wiki.example/w/api.php";

    fn inputs() -> LoginInputs {
        LoginInputs {
            api: Some(API.to_string()),
            username: Some("Bot@ci".to_string()),
            password: Some("secret".to_string()),
        }
    }

    #[tokio::test]
    async fn test_login_happy_path() {
        let transport = ScriptedTransport::new()
            .respond_with_cookies(
                200,
                r#"{"query":{"tokens":{"logintoken":"lt+\\"}}}"#,
                &["wiki_session=s1; path=/; HttpOnly"],
            )
            .respond_with_cookies(
                200,
                r#"{"login":{"result":"Success","lgusername":"Bot"}}"#,
                &["wiki_session=s2; path=/", "wikiUserID=7; path=/"],
            )
            .respond(200, r#"{"query":{"tokens":{"csrftoken":"abc+\\"}}}"#);

        let outcome = login(&transport, inputs()).await.unwrap();
        assert_eq!(outcome.csrf_token, "abc+\\");
        assert_eq!(outcome.cookie, "wiki_session=s2; wikiUserID=7");

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(
            requests[0].url,
            format!("{API}?action=query&meta=tokens&type=login&format=json")
        );
        assert_eq!(requests[0].header_value("Cookie"), None);

        assert_eq!(requests[1].method, Method::Post);
        assert_eq!(requests[1].url, format!("{API}?action=login&format=json"));
        assert_eq!(requests[1].form_value("lgname"), Some("Bot@ci"));
        assert_eq!(requests[1].form_value("lgpassword"), Some("secret"));
        assert_eq!(requests[1].form_value("lgtoken"), Some("lt+\\"));
        assert_eq!(requests[1].header_value("Cookie"), Some("wiki_session=s1"));

        assert_eq!(requests[2].url, format!("{API}?action=query&meta=tokens&format=json"));
        assert_eq!(
            requests[2].header_value("Cookie"),
            Some("wiki_session=s2; wikiUserID=7")
        );
    }

    #[tokio::test]
    async fn test_missing_input_makes_no_request() {
        let transport = ScriptedTransport::new();
        let mut missing = inputs();
        missing.password = None;

        let err = login(&transport, missing).await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_failed_result_is_authentication_error() {
        let transport = ScriptedTransport::new()
            .respond(200, r#"{"query":{"tokens":{"logintoken":"lt"}}}"#)
            .respond(
                200,
                r#"{"login":{"result":"Failed","reason":"Incorrect username or password entered."}}"#,
            );

        let err = login(&transport, inputs()).await.unwrap_err();
        match err {
            Error::Authentication(msg) => assert!(msg.starts_with("Failed")),
            other => panic!("unexpected error: {other:?}"),
        }
        // no CSRF request after a failed login
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_login_object_is_authentication_error() {
        let transport = ScriptedTransport::new()
            .respond(200, r#"{"query":{"tokens":{"logintoken":"lt"}}}"#)
            .respond(200, r#"{"warnings":{}}"#);

        let err = login(&transport, inputs()).await.unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[tokio::test]
    async fn test_login_without_result_field_is_authentication_error() {
        let transport = ScriptedTransport::new()
            .respond(200, r#"{"query":{"tokens":{"logintoken":"lt"}}}"#)
            .respond(200, r#"{"login":{"reason":"throttled"}}"#);

        let err = login(&transport, inputs()).await.unwrap_err();
        match err {
            Error::Authentication(msg) => assert_eq!(msg, "no result: throttled"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_structured_reason_is_kept() {
        let transport = ScriptedTransport::new()
            .respond(200, r#"{"query":{"tokens":{"logintoken":"lt"}}}"#)
            .respond(200, r#"{"login":{"result":"Aborted","reason":{"code":"botpasswords"}}}"#);

        let err = login(&transport, inputs()).await.unwrap_err();
        assert!(matches!(err, Error::Authentication(msg) if msg.starts_with("Aborted: ") && msg.contains("botpasswords")));
    }

    #[tokio::test]
    async fn test_http_error_is_network_error() {
        let transport = ScriptedTransport::new().respond(503, "unavailable");

        let err = login(&transport, inputs()).await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_missing_csrf_token_is_response_error() {
        let transport = ScriptedTransport::new()
            .respond(200, r#"{"query":{"tokens":{"logintoken":"lt"}}}"#)
            .respond(200, r#"{"login":{"result":"Success"}}"#)
            .respond(200, r#"{"query":{"tokens":{}}}"#);

        let err = login(&transport, inputs()).await.unwrap_err();
        assert!(matches!(err, Error::Response(_)));
    }
}
