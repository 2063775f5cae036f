use serde::{Deserialize, Serialize};

/// trace.moe API 位址
pub const BASE_URL: &str = "https://api.trace.moe/";

/// 客戶端配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API 基底位址
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key，透過 `x-trace-key` header 送出
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_base_url() -> String {
    BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// 有效的 API key，空字串視為未設定
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }
}
