//! 模式缓存管理
//! 仅处理模式集合的本地序列化（JSON）和反序列化

use tracing::debug;

use super::model::PatternSet;
use crate::error::{KiResult, KeyIdentError};
use crate::config::GlobalConfig;

/// 模式缓存管理器
pub struct PatternCacheManager;

impl PatternCacheManager {
    /// 从本地缓存加载模式集合
    /// 文件存在但不可读/损坏视为致命错误，由调用方决定是否传播
    pub async fn load_from_cache(config: &GlobalConfig) -> KiResult<PatternSet> {
        let cache_path = &config.cache_path;
        let cache_data = tokio::fs::read(cache_path)
            .await
            .map_err(|e| KeyIdentError::CacheReadError(format!("读取缓存文件失败：{}", e)))?;

        // JSON反序列化（缓存格式：{name, regex} 对象数组）
        let patterns: PatternSet = serde_json::from_slice(&cache_data)
            .map_err(|e| KeyIdentError::CacheReadError(format!("缓存文件反序列化失败：{}", e)))?;

        debug!("缓存文件反序列化成功，模式数：{}", patterns.len());

        Ok(patterns)
    }

    /// 将模式集合缓存到本地（整体覆盖写入）
    pub async fn save_to_cache(config: &GlobalConfig, patterns: &PatternSet) -> KiResult<()> {
        let cache_path = &config.cache_path;

        // 带缩进的JSON序列化，缓存文件保持人类可读
        let cache_data = serde_json::to_vec_pretty(patterns)?;

        debug!("模式集合序列化成功，序列化后数据大小：{} 字节", cache_data.len());

        // 写入文件
        tokio::fs::write(cache_path, cache_data).await?;
        Ok(())
    }

    /// 清除本地缓存
    pub async fn clear_cache(config: &GlobalConfig) -> KiResult<()> {
        let cache_path = &config.cache_path;
        if cache_path.exists() {
            tokio::fs::remove_file(cache_path).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::model::PatternRecord;
    use crate::config::ConfigManager;

    fn temp_config(dir: &tempfile::TempDir) -> GlobalConfig {
        ConfigManager::custom()
            .cache_path(dir.path().join("patterns_cache.json"))
            .build()
    }

    #[tokio::test]
    async fn test_cache_round_trip() {
        // 测试场景：写入后重新加载，模式集合应完全一致
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);

        let patterns = PatternSet::from_records(vec![
            PatternRecord::new("GitHub", "^ghp_[0-9a-zA-Z]{36}$"),
            PatternRecord::new("Stripe", "^sk_live_[0-9a-zA-Z]{24}$"),
        ]);

        PatternCacheManager::save_to_cache(&config, &patterns).await.unwrap();
        let restored = PatternCacheManager::load_from_cache(&config).await.unwrap();

        assert_eq!(restored, patterns);
    }

    #[tokio::test]
    async fn test_corrupt_cache_is_cache_read_error() {
        // 测试场景：缓存文件存在但内容损坏，返回 CacheReadError
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);

        tokio::fs::write(&config.cache_path, b"{not valid json").await.unwrap();

        let err = PatternCacheManager::load_from_cache(&config).await.unwrap_err();
        assert!(matches!(err, KeyIdentError::CacheReadError(_)));
    }

    #[tokio::test]
    async fn test_clear_cache_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);

        PatternCacheManager::save_to_cache(&config, &PatternSet::default()).await.unwrap();
        assert!(config.cache_path.exists());

        PatternCacheManager::clear_cache(&config).await.unwrap();
        assert!(!config.cache_path.exists());
    }
}
