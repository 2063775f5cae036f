use std::path::Path;

/// 單筆搜尋結果（原樣保留伺服器回傳的 JSON）
pub type MatchRecord = serde_json::Value;

/// 帳號或 IP 的搜尋額度資訊（原樣保留伺服器回傳的 JSON）
pub type QuotaInfo = serde_json::Value;

/// 要搜尋的截圖
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchImage {
    /// 圖片網址，以 `url` 查詢參數送出
    Url(String),
    /// 上傳的圖片內容，以 multipart 欄位 `image` 送出
    Upload { bytes: Vec<u8>, file_name: String },
}

impl SearchImage {
    pub fn url(url: impl Into<String>) -> Self {
        SearchImage::Url(url.into())
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        SearchImage::Upload {
            bytes: bytes.into(),
            file_name: "image".to_string(),
        }
    }

    /// 從檔案讀取圖片
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(SearchImage::Upload { bytes, file_name })
    }
}

impl From<&str> for SearchImage {
    fn from(url: &str) -> Self {
        SearchImage::url(url)
    }
}

impl From<String> for SearchImage {
    fn from(url: String) -> Self {
        SearchImage::Url(url)
    }
}

impl From<Vec<u8>> for SearchImage {
    fn from(bytes: Vec<u8>) -> Self {
        SearchImage::bytes(bytes)
    }
}

impl From<&[u8]> for SearchImage {
    fn from(bytes: &[u8]) -> Self {
        SearchImage::bytes(bytes)
    }
}

/// 搜尋選項
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// 忽略黑邊
    pub cut_borders: bool,
    /// 只搜尋指定的 AniList 作品
    pub anilist_id: Option<u64>,
    /// 在結果中附帶 AniList 資訊
    pub anilist_info: bool,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cut_borders(mut self, cut_borders: bool) -> Self {
        self.cut_borders = cut_borders;
        self
    }

    pub fn with_anilist_id(mut self, anilist_id: u64) -> Self {
        self.anilist_id = Some(anilist_id);
        self
    }

    pub fn with_anilist_info(mut self, anilist_info: bool) -> Self {
        self.anilist_info = anilist_info;
        self
    }

    /// 組出 `/search` 的查詢參數。旗標參數為空值，關閉時完全不送。
    pub fn query_pairs(&self, image: &SearchImage) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let SearchImage::Url(url) = image {
            params.push(("url", url.clone()));
        }

        if self.cut_borders {
            params.push(("cutBorders", String::new()));
        }

        if let Some(id) = self.anilist_id {
            params.push(("anilistID", id.to_string()));
        }

        if self.anilist_info {
            params.push(("anilistInfo", String::new()));
        }

        params
    }
}
