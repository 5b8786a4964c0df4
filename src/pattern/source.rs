//! 远程模式数据源定义与归一化
//! 每个数据源绑定固定的文档结构，按源身份分发解析逻辑（不做形状嗅探）

use std::collections::BTreeMap;
use serde::Deserialize;

use super::model::PatternRecord;
use crate::error::{KiResult, KeyIdentError};

/// 远程模式源配置（支持自定义顺序，顺序即去重优先级）
#[derive(Debug, Clone)]
pub struct RemoteSource {
    /// 数据源名称（用于日志与报告输出）
    pub name: String,
    /// 原始URL
    pub url: String,
    /// 文档结构类型（区分数组型和键值映射型JSON）
    pub schema: SourceSchema,
}

impl RemoteSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>, schema: SourceSchema) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            schema,
        }
    }
}

/// 数据源文档结构类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSchema {
    /// JSON数组，每个元素带小写 name/regex 字段（secrets-patterns-db）
    NamedList,
    /// JSON对象，各 value 带大写 Name/Regex 字段（truffleHog）
    KeyedMap,
}

/// 内置远程数据源（按优先级排序）
pub fn default_sources() -> Vec<RemoteSource> {
    vec![
        RemoteSource::new(
            "secrets-patterns-db",
            "https://raw.githubusercontent.com/mazen160/secrets-patterns-db/main/secrets.json",
            SourceSchema::NamedList,
        ),
        RemoteSource::new(
            "trufflehog",
            "https://raw.githubusercontent.com/dxa4481/truffleHogRegexes/master/truffleHogRegexes/regexes.json",
            SourceSchema::KeyedMap,
        ),
    ]
}

// ======== 各结构类型对应的原始条目 ========

#[derive(Debug, Deserialize)]
struct NamedListEntry {
    name: String,
    regex: String,
}

#[derive(Debug, Deserialize)]
struct KeyedMapEntry {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Regex")]
    regex: String,
}

impl SourceSchema {
    /// 将原始JSON文档归一化为统一的模式记录列表
    pub fn normalize(self, source_name: &str, raw: &[u8]) -> KiResult<Vec<PatternRecord>> {
        match self {
            SourceSchema::NamedList => {
                let entries: Vec<NamedListEntry> = serde_json::from_slice(raw)
                    .map_err(|e| schema_error(source_name, &e))?;

                Ok(entries
                    .into_iter()
                    .map(|entry| PatternRecord::new(entry.name, entry.regex))
                    .collect())
            }
            SourceSchema::KeyedMap => {
                // BTreeMap保证按键排序迭代，刷新结果跨进程确定
                let entries: BTreeMap<String, KeyedMapEntry> = serde_json::from_slice(raw)
                    .map_err(|e| schema_error(source_name, &e))?;

                Ok(entries
                    .into_values()
                    .map(|entry| PatternRecord::new(entry.name, entry.regex))
                    .collect())
            }
        }
    }
}

fn schema_error(source_name: &str, e: &serde_json::Error) -> KeyIdentError {
    KeyIdentError::SourceSchemaError(format!("[{}] 文档不符合预期结构：{}", source_name, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_named_list() {
        // 测试场景：secrets-patterns-db 的数组结构，小写字段
        let raw = br#"[
            {"name": "AWS Access Key", "regex": "AKIA[0-9A-Z]{16}", "confidence": "high"},
            {"name": "Slack Token", "regex": "xox[baprs]-[0-9a-zA-Z]{10,48}"}
        ]"#;

        let records = SourceSchema::NamedList.normalize("secrets-patterns-db", raw).unwrap();
        assert_eq!(
            records,
            vec![
                PatternRecord::new("AWS Access Key", "AKIA[0-9A-Z]{16}"),
                PatternRecord::new("Slack Token", "xox[baprs]-[0-9a-zA-Z]{10,48}"),
            ]
        );
    }

    #[test]
    fn test_normalize_keyed_map_sorted_by_key() {
        // 测试场景：truffleHog 的键值映射结构，大写 Name/Regex 字段，按键排序迭代
        let raw = br#"{
            "Zulip": {"Name": "Zulip", "Regex": "zulip-[0-9a-f]{32}"},
            "Asana": {"Name": "Asana", "Regex": "asana-[0-9a-f]{32}"}
        }"#;

        let records = SourceSchema::KeyedMap.normalize("trufflehog", raw).unwrap();
        assert_eq!(
            records,
            vec![
                PatternRecord::new("Asana", "asana-[0-9a-f]{32}"),
                PatternRecord::new("Zulip", "zulip-[0-9a-f]{32}"),
            ]
        );
    }

    #[test]
    fn test_normalize_rejects_wrong_shape() {
        // 测试场景：字段缺失或文档形状不符，应返回 SourceSchemaError
        let missing_field = br#"[{"name": "NoRegexHere"}]"#;
        let err = SourceSchema::NamedList
            .normalize("secrets-patterns-db", missing_field)
            .unwrap_err();
        assert!(matches!(err, KeyIdentError::SourceSchemaError(_)));

        let wrong_shape = br#"[1, 2, 3]"#;
        let err = SourceSchema::KeyedMap.normalize("trufflehog", wrong_shape).unwrap_err();
        assert!(matches!(err, KeyIdentError::SourceSchemaError(_)));
    }
}
