// ============================================================================
// API CLIENT - Backend endpoints, bearer auth and 401 handling
// ============================================================================
// Stateless apart from the shared session: no retries, no queueing.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::CONFIG;
use crate::error::{extract_error_field, ApiError};
use crate::models::{
    ContentUpdate, Envelope, GenerationPage, GenerationResult, GenerationView, ListFilter,
    LoginRequest, PrelightReport, PublishState, RegisterRequest, Session,
};
use crate::routing::{is_auth_path, Navigator, Route};
use crate::services::transport::{ApiRequest, ApiResponse, HttpMethod, HttpTransport};
use crate::state::SessionStore;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    session: SessionStore,
    navigator: Rc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        transport: Rc<dyn HttpTransport>,
        session: SessionStore,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self::with_base_url(&CONFIG.backend_url, transport, session, navigator)
    }

    pub fn with_base_url(
        base_url: &str,
        transport: Rc<dyn HttpTransport>,
        session: SessionStore,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session,
            navigator,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest {
            method,
            url: self.url(path),
            query,
            bearer: self.session.access_token(),
            body,
        };

        log::debug!("🌐 [API] {:?} {}", method, path);
        let response = self.transport.execute(request).await.map_err(|e| {
            log::error!("❌ [API] {:?} {} failed: {}", method, path, e);
            e
        })?;

        if response.status == 401 {
            let message = extract_error_field(&response.body);
            self.handle_unauthorized();
            return Err(ApiError::Unauthorized { message });
        }
        if !response.is_success() {
            let message = extract_error_field(&response.body);
            log::warn!(
                "⚠️ [API] {:?} {} -> HTTP {} {:?}",
                method,
                path,
                response.status,
                message
            );
            return Err(ApiError::Http {
                status: response.status,
                message,
            });
        }
        Ok(response)
    }

    /// Expired or rejected token: drop the session, bounce to /login
    fn handle_unauthorized(&self) {
        log::warn!("🔒 [API] 401 received, clearing session");
        self.session.logout();
        let current = self.navigator.current_path();
        if !is_auth_path(&current) {
            self.navigator.replace(&Route::Login.path());
        }
    }

    fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ApiError> {
        serde_json::from_slice(&response.body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    fn decode_data<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ApiError> {
        Self::decode::<Envelope<T>>(response).map(|envelope| envelope.data)
    }

    fn to_body<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(value).map_err(|e| ApiError::Serialization(e.to_string()))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let body = Self::to_body(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let response = self
            .send(HttpMethod::Post, "/auth/login", Vec::new(), Some(body))
            .await?;
        Self::decode_data(&response)
    }

    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        let body = Self::to_body(&RegisterRequest {
            email: email.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        })?;
        let response = self
            .send(HttpMethod::Post, "/auth/register", Vec::new(), Some(body))
            .await?;
        Self::decode_data(&response)
    }

    pub async fn list_generations(
        &self,
        page: u32,
        limit: u32,
        filter: ListFilter,
    ) -> Result<GenerationPage, ApiError> {
        let query = vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
            ("filter".to_string(), filter.as_query().to_string()),
        ];
        let response = self
            .send(HttpMethod::Get, "/generations", query, None)
            .await?;
        Self::decode_data(&response)
    }

    /// Unlike the other endpoints, prelight answers without a `data` envelope
    pub async fn prelight(&self, issue_key: &str) -> Result<PrelightReport, ApiError> {
        let body = json!({ "issueKey": issue_key });
        let response = self
            .send(HttpMethod::Post, "/generations/prelight", Vec::new(), Some(body))
            .await?;
        Self::decode(&response)
    }

    pub async fn generate_testcases(&self, issue_key: &str) -> Result<GenerationResult, ApiError> {
        let body = json!({ "issueKey": issue_key });
        let response = self
            .send(HttpMethod::Post, "/generations/testcases", Vec::new(), Some(body))
            .await?;
        Self::decode_data(&response)
    }

    pub async fn view_generation(&self, id: &str) -> Result<GenerationView, ApiError> {
        let path = format!("/generations/{}/view", id);
        let response = self.send(HttpMethod::Get, &path, Vec::new(), None).await?;
        Self::decode_data(&response)
    }

    pub async fn update_content(&self, id: &str, content: &str) -> Result<ContentUpdate, ApiError> {
        let path = format!("/generations/{}/content", id);
        let body = json!({ "content": content });
        let response = self
            .send(HttpMethod::Put, &path, Vec::new(), Some(body))
            .await?;
        Self::decode_data(&response)
    }

    pub async fn set_published(&self, id: &str, published: bool) -> Result<PublishState, ApiError> {
        let path = format!("/generations/{}/publish", id);
        let body = json!({ "published": published });
        let response = self
            .send(HttpMethod::Put, &path, Vec::new(), Some(body))
            .await?;
        Self::decode_data(&response)
    }

    /// Raw file bytes
    pub async fn download(&self, id: &str) -> Result<Vec<u8>, ApiError> {
        let path = format!("/generations/{}/download", id);
        let response = self.send(HttpMethod::Get, &path, Vec::new(), None).await?;
        Ok(response.body)
    }

    pub async fn delete_generation(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/generations/{}", id);
        self.send(HttpMethod::Delete, &path, Vec::new(), None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_session, Harness};
    use futures::executor::block_on;

    #[test]
    fn bearer_token_attached_only_with_session() {
        let h = Harness::new("/dashboard");
        h.transport.respond_json(200, r#"{"data":{"generations":[]}}"#);
        h.transport.respond_json(200, r#"{"data":{"generations":[]}}"#);

        block_on(h.api.list_generations(1, 10, ListFilter::All)).unwrap();
        h.session.login(sample_session());
        block_on(h.api.list_generations(2, 10, ListFilter::Mine)).unwrap();

        let requests = h.transport.requests();
        assert_eq!(requests[0].bearer, None);
        assert_eq!(requests[1].bearer.as_deref(), Some("access-1"));
        assert_eq!(requests[1].url, "http://api.test/generations");
        assert!(requests[1]
            .query
            .contains(&("filter".to_string(), "mine".to_string())));
        assert!(requests[1]
            .query
            .contains(&("page".to_string(), "2".to_string())));
    }

    #[test]
    fn unauthorized_clears_session_and_redirects() {
        let h = Harness::new("/view/abc");
        h.session.login(sample_session());
        h.transport.respond_json(401, r#"{"error":"Token expired"}"#);

        let err = block_on(h.api.view_generation("abc")).unwrap_err();

        assert_eq!(
            err,
            ApiError::Unauthorized {
                message: Some("Token expired".into())
            }
        );
        assert!(!h.session.is_authenticated());
        assert_eq!(h.navigator.replaced(), vec!["/login".to_string()]);
    }

    #[test]
    fn unauthorized_on_auth_page_does_not_redirect() {
        let h = Harness::new("/login");
        h.transport.respond_json(401, r#"{"error":"Invalid credentials"}"#);

        let err = block_on(h.api.login("mia@example.com", "wrong")).unwrap_err();

        assert_eq!(err.server_message(), Some("Invalid credentials"));
        assert!(h.navigator.replaced().is_empty());
        assert!(h.navigator.pushed().is_empty());
    }

    #[test]
    fn other_statuses_carry_body_error() {
        let h = Harness::new("/");
        h.session.login(sample_session());
        h.transport
            .respond_json(404, r#"{"error":"Issue QA-9 not found in tracker"}"#);

        let err = block_on(h.api.prelight("QA-9")).unwrap_err();

        assert_eq!(
            err,
            ApiError::Http {
                status: 404,
                message: Some("Issue QA-9 not found in tracker".into())
            }
        );
        assert!(h.session.is_authenticated());
    }

    #[test]
    fn prelight_reads_top_level_body() {
        let h = Harness::new("/");
        h.transport.respond_json(
            200,
            r#"{"issueKey":"QA-7","title":"Checkout flow","uiStory":true,"attachments":2,"estimatedTokens":5120,"estimatedCost":"0.0154"}"#,
        );

        let report = block_on(h.api.prelight("QA-7")).unwrap();

        assert_eq!(report.issue_key, "QA-7");
        assert!(report.ui_story);
        assert_eq!(report.estimated_cost_label(), "0.0154");
        let sent = &h.transport.requests()[0];
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.body, Some(json!({"issueKey": "QA-7"})));
    }

    #[test]
    fn endpoints_use_expected_paths() {
        let h = Harness::new("/view/g1");
        h.transport.respond_json(200, r#"{"data":{"content":"x","currentVersion":2}}"#);
        h.transport.respond_json(200, r#"{"data":{"published":true}}"#);
        h.transport.respond_bytes(200, b"# file".to_vec());
        h.transport.respond_json(204, "");

        block_on(h.api.update_content("g1", "x")).unwrap();
        block_on(h.api.set_published("g1", true)).unwrap();
        let bytes = block_on(h.api.download("g1")).unwrap();
        block_on(h.api.delete_generation("g1")).unwrap();

        assert_eq!(bytes, b"# file");
        let calls: Vec<(HttpMethod, String)> = h
            .transport
            .requests()
            .into_iter()
            .map(|r| (r.method, r.url))
            .collect();
        assert_eq!(
            calls,
            vec![
                (HttpMethod::Put, "http://api.test/generations/g1/content".into()),
                (HttpMethod::Put, "http://api.test/generations/g1/publish".into()),
                (HttpMethod::Get, "http://api.test/generations/g1/download".into()),
                (HttpMethod::Delete, "http://api.test/generations/g1".into()),
            ]
        );
    }

    #[test]
    fn malformed_success_body_is_parse_error() {
        let h = Harness::new("/");
        h.transport.respond_json(200, "<html>proxy page</html>");
        let err = block_on(h.api.generate_testcases("QA-1")).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn transport_failure_is_passed_through() {
        let h = Harness::new("/");
        h.transport.fail(ApiError::Network("Failed to fetch".into()));
        let err = block_on(h.api.generate_testcases("QA-1")).unwrap_err();
        assert_eq!(err, ApiError::Network("Failed to fetch".into()));
    }
}
