//! 模式数据模型定义
//! 仅存储模式数据，无任何业务逻辑，支持序列化/反序列化

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};

/// 单条密钥特征（服务名 + 正则）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub name: String,
    pub regex: String,
}

impl PatternRecord {
    pub fn new(name: impl Into<String>, regex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            regex: regex.into(),
        }
    }
}

/// 合并去重后的模式集合
/// 以 regex 字符串为去重键：首次出现决定位置，后写入者覆盖内容。
/// 迭代顺序固定为插入顺序，识别评分依赖该顺序。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternSet {
    records: Vec<PatternRecord>,
}

impl PatternSet {
    /// 从原始记录流构建模式集合（按出现顺序去重）
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = PatternRecord>,
    {
        let mut set = Self::default();
        let mut index_by_regex: HashMap<String, usize> = HashMap::new();

        for record in records {
            match index_by_regex.get(&record.regex) {
                // 同一 regex 重复出现：位置不变，内容以后写入者为准
                Some(&idx) => set.records[idx] = record,
                None => {
                    index_by_regex.insert(record.regex.clone(), set.records.len());
                    set.records.push(record);
                }
            }
        }

        set
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatternRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[PatternRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 单条候选字符串的识别结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    pub service: Option<String>,
    pub confidence: f64,
}

impl ScanResult {
    /// 未命中任何模式
    pub fn no_match() -> Self {
        Self {
            service: None,
            confidence: 0.0,
        }
    }

    pub fn matched(service: impl Into<String>, confidence: f64) -> Self {
        Self {
            service: Some(service.into()),
            confidence,
        }
    }
}

// ======== 为 ScanResult 实现 Display trait（用于 CLI / Report 输出） ========
impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.service {
            Some(svc) => write!(f, "{} ({:.3})", svc, self.confidence),
            None => write!(f, "-"),
        }
    }
}

/// 单个数据源的拉取结果（成功条数或失败原因）
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub source: String,
    pub fetched: usize,
    pub error: Option<String>,
}

impl SourceReport {
    pub fn ok(source: impl Into<String>, fetched: usize) -> Self {
        Self {
            source: source.into(),
            fetched,
            error: None,
        }
    }

    pub fn failed(source: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            fetched: 0,
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// 一次全量刷新的产出：模式集合 + 各数据源报告
#[derive(Debug, Clone)]
pub struct RefreshSummary {
    pub patterns: PatternSet,
    pub reports: Vec<SourceReport>,
}

impl RefreshSummary {
    /// 拉取失败的数据源数量
    pub fn warning_count(&self) -> usize {
        self.reports.iter().filter(|r| !r.is_ok()).count()
    }
}
