//! 编译后模式模型
//! 将原始模式集合预编译为可执行的全匹配正则

use regex::Regex;
use tracing::{debug, warn};

use crate::pattern::model::PatternSet;

/// 编译后的单条模式
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub name: String,
    pub regex: Regex,
    /// 原始正则字符串的字符长度（评分用）
    pub pattern_len: usize,
}

/// 编译后的模式集合（保持 PatternSet 的迭代顺序）
#[derive(Debug, Clone, Default)]
pub struct CompiledPatternSet {
    patterns: Vec<CompiledPattern>,
    skipped: usize,
}

impl CompiledPatternSet {
    /// 编译模式集合
    /// 无法编译的模式属于数据源质量缺陷：跳过并告警，不让整体加载失败
    pub fn compile(set: &PatternSet) -> Self {
        let mut patterns = Vec::with_capacity(set.len());
        let mut skipped = 0usize;

        for record in set.iter() {
            match Self::compile_fullmatch(&record.regex) {
                Ok(regex) => patterns.push(CompiledPattern {
                    name: record.name.clone(),
                    regex,
                    pattern_len: record.regex.chars().count(),
                }),
                Err(e) => {
                    skipped += 1;
                    warn!("模式 [{}] 正则编译失败：{}，已跳过", record.name, e);
                }
            }
        }

        debug!("模式编译完成，可用模式数：{}，跳过：{}", patterns.len(), skipped);

        Self { patterns, skipped }
    }

    /// 将正则锚定为全匹配形式（整串命中，而非子串命中）
    fn compile_fullmatch(pattern: &str) -> Result<Regex, regex::Error> {
        Regex::new(&format!("^(?:{})$", pattern))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// 编译阶段跳过的模式数
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::model::PatternRecord;

    #[test]
    fn test_compile_anchors_fullmatch() {
        // 测试场景：未锚定的正则编译后只允许整串命中
        let set = PatternSet::from_records(vec![PatternRecord::new("B", "b")]);
        let compiled = CompiledPatternSet::compile(&set);

        let pattern = compiled.iter().next().unwrap();
        assert!(pattern.regex.is_match("b"));
        assert!(!pattern.regex.is_match("abc"));
    }

    #[test]
    fn test_compile_skips_invalid_regex() {
        // 测试场景：无法编译的模式被跳过并计数，其余模式正常可用
        let set = PatternSet::from_records(vec![
            PatternRecord::new("Broken", "([unclosed"),
            PatternRecord::new("GitHub", "^ghp_[0-9a-zA-Z]{36}$"),
        ]);
        let compiled = CompiledPatternSet::compile(&set);

        assert_eq!(compiled.len(), 1);
        assert_eq!(compiled.skipped(), 1);
        assert_eq!(compiled.iter().next().unwrap().name, "GitHub");
    }

    #[test]
    fn test_pattern_len_counts_chars_of_raw_regex() {
        // 测试场景：长度取原始正则字符串的字符数，不含锚定包装
        let set = PatternSet::from_records(vec![PatternRecord::new("X", "a{2}")]);
        let compiled = CompiledPatternSet::compile(&set);

        assert_eq!(compiled.iter().next().unwrap().pattern_len, 4);
    }
}
