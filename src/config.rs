//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

use crate::pattern::source::{RemoteSource, default_sources};

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 模式缓存路径
    pub cache_path: PathBuf,
    // 远程模式数据源（按配置顺序拉取，顺序决定去重优先级）
    pub sources: Vec<RemoteSource>,
    // 超时配置（单位：秒）
    pub http_timeout: u64,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from("patterns_cache.json"),
            sources: default_sources(),
            http_timeout: 15,
            verbose: false,
        }
    }
}

/// 配置管理器（单例）
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn cache_path(mut self, path: PathBuf) -> Self {
        self.config.cache_path = path;
        self
    }

    pub fn sources(mut self, sources: Vec<RemoteSource>) -> Self {
        self.config.sources = sources;
        self
    }

    pub fn http_timeout(mut self, timeout: u64) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}

impl Default for CustomConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
