//! ユーティリティモジュール

pub mod log_trace;
pub mod query;
pub mod storage;
