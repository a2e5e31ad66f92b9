use crate::domain::{DatabaseId, QueryPage, SourceError, WorkspaceDatabase};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error as _;
use std::time::Duration;
use url::Url;

// Thin wrapper around reqwest for workspace database queries.
#[derive(Clone)]
pub struct NotionClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
    version: String,
}

#[derive(Debug, Serialize)]
struct QueryRequest {
    page_size: u32,
}

// Error body the API returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    code: Option<String>,
    message: Option<String>,
}

impl NotionClient {
    pub fn new(
        base_url: Url,
        token: Option<String>,
        version: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            token,
            version: version.into(),
        })
    }

    fn query_url(&self, database_id: &DatabaseId) -> Result<Url, SourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::Transport(format!("invalid base url {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v1", "databases", database_id.as_str(), "query"]);
        Ok(url)
    }
}

#[async_trait]
impl WorkspaceDatabase for NotionClient {
    async fn query(
        &self,
        database_id: &DatabaseId,
        page_size: u32,
    ) -> Result<QueryPage, SourceError> {
        let url = self.query_url(database_id)?;

        let mut request = self
            .http
            .post(url)
            .header("Notion-Version", &self.version)
            .json(&QueryRequest { page_size });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let res = request
            .send()
            .await
            .map_err(|err| SourceError::Transport(describe_transport(&err)))?;
        let status = res.status();

        // Keep the upstream code/message so the client sees why the source failed.
        if !status.is_success() {
            let body = res.json::<ApiErrorResponse>().await.ok();
            let (code, message) = match body {
                Some(body) => (body.code, body.message),
                None => (None, None),
            };
            tracing::debug!(status = status.as_u16(), ?code, "workspace query rejected");
            return Err(SourceError::Upstream {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let body = res
            .bytes()
            .await
            .map_err(|err| SourceError::Transport(describe_transport(&err)))?;
        serde_json::from_slice::<QueryPage>(&body)
            .map_err(|err| SourceError::Decode(err.to_string()))
    }
}

// reqwest's own message omits the cause, so append every source in the chain.
fn describe_transport(err: &reqwest::Error) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }
    if err.is_timeout() && !description.contains("timed out") {
        description.push_str(": timed out");
    }
    description
}
