//! ベンチマーク結果のレポート

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// ベンチマークの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BenchKind {
    Movegen,
    Mate1,
    Mate3,
}

/// 1局面分の計測結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchEntry {
    pub name: String,
    pub sfen: String,
    pub iterations: u32,
    pub elapsed_sec: f64,
    /// 1秒あたりの呼び出し回数
    pub calls_per_sec: f64,
    /// 生成した手の数（指し手生成）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_moves: Option<usize>,
    /// 詰め手（詰み判定、詰まなければ `None`）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mate_move: Option<String>,
}

/// ベンチマーク全体のレポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchReport {
    pub kind: BenchKind,
    /// 作成時刻（RFC 3339）
    pub created_at: String,
    pub entries: Vec<BenchEntry>,
}

impl BenchReport {
    pub fn new(kind: BenchKind) -> Self {
        Self { kind, created_at: Local::now().to_rfc3339(), entries: Vec::new() }
    }

    pub fn total_elapsed_sec(&self) -> f64 {
        self.entries.iter().map(|e| e.elapsed_sec).sum()
    }

    /// JSON で書き出す
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }
}
