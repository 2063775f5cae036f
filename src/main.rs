use anyhow::{Context, Result, bail};
use std::env;
use tracemoe::{ClientConfig, SearchImage, SearchOptions, TraceMoe};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "search" => run_search(&args[2..]).await?,
            "me" => run_me().await?,
            "--help" | "-h" => print_help(),
            "--version" | "-V" => println!("tracemoe {}", tracemoe::VERSION),
            _ => {
                println!("未知命令: {}", args[1]);
                print_help();
            }
        }
    } else {
        print_help();
    }

    Ok(())
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tracemoe=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// 從環境變數建立客戶端配置
fn load_config() -> ClientConfig {
    let mut config = ClientConfig::default();

    if let Ok(base_url) = env::var("TRACE_MOE_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    if let Ok(api_key) = env::var("TRACE_MOE_API_KEY") {
        config = config.with_api_key(api_key);
    }

    config
}

async fn run_search(args: &[String]) -> Result<()> {
    let mut target = None;
    let mut options = SearchOptions::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--cut-borders" => options = options.with_cut_borders(true),
            "--anilist-info" => options = options.with_anilist_info(true),
            "--anilist-id" => {
                let id = iter.next().context("--anilist-id 需要一個數字")?;
                let id = id
                    .parse::<u64>()
                    .with_context(|| format!("無效的 AniList ID: {}", id))?;
                options = options.with_anilist_id(id);
            }
            other if target.is_none() => target = Some(other.to_string()),
            other => bail!("多餘的參數: {}", other),
        }
    }

    let Some(target) = target else {
        print_help();
        return Ok(());
    };

    let image = if target.starts_with("http://") || target.starts_with("https://") {
        SearchImage::url(target)
    } else {
        SearchImage::from_path(&target)
            .await
            .with_context(|| format!("無法讀取圖片: {}", target))?
    };

    let mut client = TraceMoe::new(load_config())?;
    tracing::info!("🔎 搜尋中...");
    let result = client.search(image, &options).await;
    client.close();

    let result = result?;
    tracing::info!("✅ 找到 {} 筆結果", result.len());
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

async fn run_me() -> Result<()> {
    let client = TraceMoe::new(load_config())?;
    let info = client.me().await?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn print_help() {
    println!("tracemoe - trace.moe 動畫截圖搜尋\n");
    println!("用法:");
    println!("  tracemoe search <網址|檔案> [選項]  # 搜尋截圖出處");
    println!("  tracemoe me                        # 查詢搜尋額度");
    println!("  tracemoe --help                    # 顯示此幫助\n");
    println!("搜尋選項:");
    println!("  --cut-borders      忽略黑邊");
    println!("  --anilist-id <ID>  只搜尋指定的 AniList 作品");
    println!("  --anilist-info     附帶 AniList 資訊\n");
    println!("環境變數:");
    println!("  TRACE_MOE_API_KEY   # API key");
    println!("  TRACE_MOE_BASE_URL  # API 位址 (預設 https://api.trace.moe/)");
}
