//! ベンチマーク設定

use std::path::PathBuf;

use anyhow::{Result, bail};

/// コマンドライン引数から作るベンチマーク設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// 1局面あたりの呼び出し回数
    pub iterations: u32,
    /// 局面ファイル（`None` なら既定の局面集）
    pub sfens: Option<PathBuf>,
    /// JSON レポートの出力先
    pub json: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self { iterations: 1, sfens: None, json: None }
    }
}

impl BenchConfig {
    pub fn new(iterations: u32, sfens: Option<PathBuf>, json: Option<PathBuf>) -> Result<Self> {
        if iterations == 0 {
            bail!("--iterations must be >= 1");
        }
        Ok(Self { iterations, sfens, json })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_iterations() {
        assert!(BenchConfig::new(0, None, None).is_err());
        let config = BenchConfig::new(3, None, Some(PathBuf::from("out.json"))).unwrap();
        assert_eq!(config.iterations, 3);
        assert_eq!(config.json.as_deref(), Some(std::path::Path::new("out.json")));
    }
}
