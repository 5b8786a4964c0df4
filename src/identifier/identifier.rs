//! 识别器核心：对候选字符串执行全匹配识别并输出置信度评分

use std::sync::Arc;

use super::compiled::CompiledPatternSet;
use crate::pattern::model::{PatternSet, ScanResult};
use crate::pattern::loader::PatternLoader;
use crate::error::KiResult;
use crate::config::GlobalConfig;

/// 密钥识别器
/// 模式集合在创建时编译一次，识别过程只读、无副作用，可跨线程共享
#[derive(Debug, Clone)]
pub struct KeyIdentifier {
    compiled: Arc<CompiledPatternSet>,
    config: GlobalConfig,
}

impl KeyIdentifier {
    /// 创建识别器（优先本地缓存加载模式集合）
    pub async fn new(config: GlobalConfig) -> KiResult<Self> {
        // 1. 加载模式集合
        let pattern_set = PatternLoader::load(&config).await?;

        // 2. 编译为全匹配正则
        let compiled = CompiledPatternSet::compile(&pattern_set);

        Ok(Self {
            compiled: Arc::new(compiled),
            config,
        })
    }

    /// 从已构建的模式集合创建识别器（依赖注入，便于测试与复用）
    pub fn from_patterns(patterns: &PatternSet, config: GlobalConfig) -> Self {
        Self {
            compiled: Arc::new(CompiledPatternSet::compile(patterns)),
            config,
        }
    }

    /// 识别单条候选字符串
    /// 未命中不是错误：返回 (None, 0.0)
    pub fn identify(&self, candidate: &str) -> ScanResult {
        // 1. 按集合顺序收集全匹配序列（评分与位次相关，顺序不可打乱）
        let matches: Vec<(&str, usize)> = self
            .compiled
            .iter()
            .filter(|p| p.regex.is_match(candidate))
            .map(|p| (p.name.as_str(), p.pattern_len))
            .collect();

        if matches.is_empty() {
            return ScanResult::no_match();
        }

        // 2. 最短正则优先，长度相同取序列中最先出现者
        let mut best_index = 0;
        for (i, (_, len)) in matches.iter().enumerate() {
            if *len < matches[best_index].1 {
                best_index = i;
            }
        }

        // 3. 置信度 = 1 / (最佳匹配在全匹配序列中的位次)
        //    只看位次，不看命中总数或长度差距，与既有输出保持兼容
        let confidence = round3(1.0 / (best_index as f64 + 1.0));

        ScanResult::matched(matches[best_index].0, confidence)
    }

    /// 批量识别（逐条，保持输入顺序）
    pub fn scan<'a, I>(&self, candidates: I) -> Vec<ScanResult>
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates.into_iter().map(|c| self.identify(c)).collect()
    }

    /// 可用模式数（编译通过的）
    pub fn pattern_count(&self) -> usize {
        self.compiled.len()
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }
}

/// 保留3位小数（同值取偶舍入，与既有输出保持一致）
fn round3(value: f64) -> f64 {
    (value * 1000.0).round_ties_even() / 1000.0
}
