//! keyident CLI：逐行识别候选密钥 / 强制刷新模式缓存

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use keyident::{ConfigManager, GlobalConfig, KeyIdentifier, PatternLoader};

#[derive(Parser)]
#[command(name = "keyident", version, about = "API密钥服务识别工具")]
struct Cli {
    /// 输出详细日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 识别密钥文件（逐行），- 表示标准输入
    Scan {
        /// 密钥文件路径或 -
        file: String,
    },
    /// 强制刷新模式缓存
    UpdatePatterns,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = ConfigManager::custom().verbose(cli.verbose).build();

    match cli.command {
        Commands::Scan { file } => run_scan(&file, config).await,
        Commands::UpdatePatterns => run_update(config).await,
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "keyident=debug" } else { "keyident=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// scan 子命令：读取候选密钥并逐行输出识别结果
async fn run_scan(file: &str, config: GlobalConfig) -> anyhow::Result<()> {
    let input = if file == "-" {
        use tokio::io::AsyncReadExt;
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("读取标准输入失败")?;
        buf
    } else {
        tokio::fs::read_to_string(Path::new(file))
            .await
            .with_context(|| format!("读取密钥文件失败：{}", file))?
    };

    let identifier = KeyIdentifier::new(config).await?;
    let keys: Vec<&str> = input.lines().collect();
    let results = identifier.scan(keys.iter().copied());

    // 对齐输出：密钥 / 服务 / 置信度
    let key_width = keys.iter().map(|k| k.chars().count()).max().unwrap_or(3).max(3);
    println!("{:<width$}  {:<24}  {}", "Key", "Service", "Confidence", width = key_width);
    for (key, result) in keys.iter().zip(&results) {
        println!(
            "{:<width$}  {:<24}  {:.2}",
            key,
            result.service.as_deref().unwrap_or("-"),
            result.confidence,
            width = key_width
        );
    }

    Ok(())
}

/// update-patterns 子命令：全量刷新并打印各数据源报告
/// 单个数据源失败不影响退出码，仅在报告中体现
async fn run_update(config: GlobalConfig) -> anyhow::Result<()> {
    let summary = PatternLoader::refresh(&config).await?;

    for report in &summary.reports {
        match &report.error {
            None => println!("✓ {}：{} 条模式", report.source, report.fetched),
            Some(e) => println!("✗ {}：{}", report.source, e),
        }
    }
    println!("✓ 模式缓存已刷新，去重后共 {} 条。", summary.patterns.len());

    Ok(())
}
