//! # tracemoe
//!
//! 非同步的 [trace.moe](https://trace.moe) API 客戶端：以網址或上傳圖片搜尋
//! 動畫截圖的出處，並查詢搜尋額度。
//!
//! ```no_run
//! use tracemoe::{ClientConfig, SearchOptions, TraceMoe};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tracemoe::Error> {
//!     let mut client = TraceMoe::new(ClientConfig::default())?;
//!
//!     let options = SearchOptions::new().with_cut_borders(true);
//!     let result = client
//!         .search("https://images.plurk.com/32B15UXxymfSMwKGTObY5e.jpg", &options)
//!         .await?;
//!     for record in &result {
//!         println!("{} {}", record["filename"], record["similarity"]);
//!     }
//!
//!     println!("{}", client.me().await?);
//!     client.close();
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod types;

pub use client::{TRACE_KEY_HEADER, TraceMoe};
pub use config::{BASE_URL, ClientConfig};
pub use error::{Error, ErrorKind, Result};
pub use types::{MatchRecord, QuotaInfo, SearchImage, SearchOptions};

/// crate 版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
