//! 识别模块：候选字符串的全匹配识别与置信度评分
pub mod compiled;
pub mod identifier;

// 导出核心接口
pub use self::compiled::{CompiledPattern, CompiledPatternSet};
pub use self::identifier::KeyIdentifier;
