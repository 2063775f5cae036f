use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{MatchRecord, QuotaInfo, SearchImage, SearchOptions};
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;
use tokio::sync::OnceCell;

/// API key 使用的 header
pub const TRACE_KEY_HEADER: &str = "x-trace-key";

/// HTTP 連線：自己建立的，或由呼叫端提供的
#[derive(Debug)]
enum Session {
    Owned(reqwest::Client),
    Borrowed(reqwest::Client),
}

impl Session {
    fn http(&self) -> &reqwest::Client {
        match self {
            Session::Owned(client) | Session::Borrowed(client) => client,
        }
    }
}

/// trace.moe 非同步客戶端
///
/// 連線在第一次請求時才建立並重複使用。`close` 或 drop 時釋放；
/// 由呼叫端提供的連線只會被解除關聯，不影響呼叫端手上的 handle。
#[derive(Debug)]
pub struct TraceMoe {
    base_url: Url,
    api_key: Option<String>,
    session: OnceCell<Session>,
}

impl TraceMoe {
    /// 建立客戶端，連線會在第一次使用時建立
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::build(config, None)
    }

    /// 使用外部提供的 reqwest client
    pub fn with_session(config: ClientConfig, http: reqwest::Client) -> Result<Self> {
        Self::build(config, Some(Session::Borrowed(http)))
    }

    fn build(config: ClientConfig, session: Option<Session>) -> Result<Self> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| Error::InvalidUrl(format!("{}: {}", base, e)))?;

        Ok(Self {
            base_url,
            api_key: config.credential().map(str::to_string),
            session: OnceCell::new_with(session),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 目前是否持有連線
    pub fn is_connected(&self) -> bool {
        self.session.initialized()
    }

    /// 目前持有的連線是否由客戶端自己建立
    pub fn owns_session(&self) -> bool {
        matches!(self.session.get(), Some(Session::Owned(_)))
    }

    /// 釋放連線，沒有連線時不做任何事
    pub fn close(&mut self) {
        match self.session.take() {
            Some(Session::Owned(_)) => tracing::debug!("released owned HTTP session"),
            Some(Session::Borrowed(_)) => tracing::debug!("detached borrowed HTTP session"),
            None => {}
        }
    }

    /// 取得連線，不存在就建立
    ///
    /// 同時多個第一次請求也只會建立一條連線（OnceCell 保證，刻意不保留競態）。
    async fn session(&self) -> Result<&reqwest::Client> {
        let session = self
            .session
            .get_or_try_init(|| async {
                let http = reqwest::Client::builder().build()?;
                tracing::debug!("created HTTP session");
                Ok::<_, Error>(Session::Owned(http))
            })
            .await?;

        Ok(session.http())
    }

    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        form: Option<Form>,
    ) -> Result<Value> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", endpoint, e)))?;

        let mut request = self.session().await?.request(method.clone(), url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(key) = &self.api_key {
            request = request.header(TRACE_KEY_HEADER, key);
        }
        if let Some(form) = form {
            request = request.multipart(form);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(
            "{} {} {} {}",
            method,
            response.url(),
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        );

        let json_body = is_json(response.headers());
        let body = response.text().await?;
        if status != StatusCode::OK {
            let message = if json_body {
                error_message(&body)
            } else {
                body
            };
            return Err(Error::from_status(status.as_u16(), message));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// 以網址或上傳圖片搜尋截圖出處
    ///
    /// 回傳伺服器 `result` 欄位中的結果，順序與內容皆不做更動。
    pub async fn search(
        &self,
        image: impl Into<SearchImage>,
        options: &SearchOptions,
    ) -> Result<Vec<MatchRecord>> {
        let image = image.into();
        let query = options.query_pairs(&image);

        let (method, form) = match image {
            SearchImage::Url(_) => (Method::GET, None),
            SearchImage::Upload { bytes, file_name } => {
                let part = Part::bytes(bytes).file_name(file_name);
                (Method::POST, Some(Form::new().part("image", part)))
            }
        };

        let mut data = self.request(method, "search", &query, form).await?;
        match data.get_mut("result").map(Value::take) {
            Some(Value::Array(result)) => Ok(result),
            _ => Err(Error::InvalidResponse(
                "missing `result` array in search response".to_string(),
            )),
        }
    }

    /// 查詢帳號（有 API key）或 IP 的搜尋額度
    pub async fn me(&self) -> Result<QuotaInfo> {
        self.request(Method::GET, "me", &[], None).await
    }
}

impl Drop for TraceMoe {
    fn drop(&mut self) {
        self.close();
    }
}

/// Content-Type 是否為 `application/json`
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// JSON 錯誤回應的訊息：`error` 欄位，否則為原始內容
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
