//! 模式模块：负责模式的拉取、归一化、去重、缓存与数据模型定义
pub mod model;
pub mod source;
pub mod cache;
pub mod loader;

// 导出核心接口
pub use self::model::{PatternRecord, PatternSet, ScanResult, SourceReport, RefreshSummary};
pub use self::source::{RemoteSource, SourceSchema, default_sources};
pub use self::loader::PatternLoader;
pub use self::cache::PatternCacheManager;
