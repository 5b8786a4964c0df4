//! keyident - API密钥服务识别库
//! 聚合多个公开密钥特征库，对候选字符串做全匹配识别并输出置信度

// 导出全局错误类型
pub use self::error::{KeyIdentError, KiResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder};

// 导出模式模块核心接口
pub use self::pattern::{
    PatternRecord, PatternSet, ScanResult, SourceReport, RefreshSummary,
    RemoteSource, SourceSchema, default_sources,
    PatternLoader, PatternCacheManager,
};

// 导出识别模块核心接口
pub use self::identifier::{
    KeyIdentifier, CompiledPattern, CompiledPatternSet,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod pattern;
pub mod identifier;
