//! 全局错误类型定义

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum KeyIdentError {
    // 模式库相关错误
    #[error("模式库加载失败：{0}")]
    PatternLoadError(String),
    #[error("模式缓存读取失败：{0}")]
    CacheReadError(String),
    #[error("数据源结构解析失败：{0}")]
    SourceSchemaError(String),

    // 编译相关错误
    #[error("正则编译失败：{0}")]
    RegexCompileError(#[from] RegexError),

    // 网络相关错误
    #[error("网络请求失败：{0}")]
    HttpError(#[from] reqwest::Error),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type KiResult<T> = Result<T, KeyIdentError>;
