//! 模式加载管理器
//! 负责从本地缓存或远程数据源构建模式集合

use std::time::Duration;
use reqwest::Client;
use tracing::{debug, warn};

use super::model::{PatternRecord, PatternSet, RefreshSummary, SourceReport};
use super::source::RemoteSource;
use super::cache::PatternCacheManager;
use crate::error::{KiResult, KeyIdentError};
use crate::config::GlobalConfig;

/// 模式加载管理器
pub struct PatternLoader;

impl PatternLoader {
    /// 加载模式集合（优先本地缓存，缓存缺失则全量刷新）
    /// 缓存文件存在但损坏时直接报错，不做静默回退
    pub async fn load(config: &GlobalConfig) -> KiResult<PatternSet> {
        if config.cache_path.exists() {
            let patterns = PatternCacheManager::load_from_cache(config).await?;
            debug!("从本地缓存加载模式集合成功，模式数：{}", patterns.len());
            return Ok(patterns);
        }

        warn!("本地缓存不存在，将从远程数据源重建");
        let summary = Self::refresh(config).await?;
        Ok(summary.patterns)
    }

    /// 强制全量刷新：逐源拉取、归一化、去重、落盘
    /// 单个数据源失败仅记告警并跳过，刷新整体不失败
    pub async fn refresh(config: &GlobalConfig) -> KiResult<RefreshSummary> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .build()?;

        let mut merged: Vec<PatternRecord> = Vec::new();
        let mut reports = Vec::new();

        for source in &config.sources {
            debug!("开始拉取 [{}]，URL：{}", source.name, source.url);
            match Self::fetch_source(&client, source).await {
                Ok(records) => {
                    debug!("成功拉取 [{}]，模式数：{}", source.name, records.len());
                    reports.push(SourceReport::ok(&source.name, records.len()));
                    merged.extend(records);
                }
                Err(e) => {
                    warn!("拉取 [{}] 失败：{}，跳过该数据源", source.name, e);
                    reports.push(SourceReport::failed(&source.name, e.to_string()));
                }
            }
        }

        // 跨源去重：regex 为键，后处理的数据源覆盖先处理的
        let patterns = PatternSet::from_records(merged);

        // 整体覆盖写入缓存（写失败不影响本次刷新结果）
        if let Err(e) = PatternCacheManager::save_to_cache(config, &patterns).await {
            warn!("模式集合缓存到本地失败：{}", e);
        } else {
            debug!("模式集合已缓存到本地，去重后模式数：{}", patterns.len());
        }

        Ok(RefreshSummary { patterns, reports })
    }

    /// 拉取单个数据源并按其固定结构归一化
    async fn fetch_source(client: &Client, source: &RemoteSource) -> KiResult<Vec<PatternRecord>> {
        let response = client
            .get(&source.url)
            .header("User-Agent", "keyident/0.1.0")
            .header("Accept-Encoding", "gzip, deflate")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(KeyIdentError::PatternLoadError(format!(
                "URL {} 返回状态码 {}",
                source.url,
                response.status()
            )));
        }

        let raw = response.bytes().await?;
        source.schema.normalize(&source.name, &raw)
    }
}
