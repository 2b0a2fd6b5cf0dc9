//! 局面ファイルの読み込みと既定の局面集
//!
//! 局面ファイルは1行1局面で、`名前 | SFEN` または SFEN のみを書く。
//! 空行と `#` で始まる行は読み飛ばす。

use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tsumi_core::{Position, SFEN_HIRATE};

/// いわゆる「指し手生成祭り」局面
pub const SFEN_FESTIVAL: &str =
    "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w RGgsn5p 1";

/// 詰み判定ベンチマーク用の問題集
const CHECKMATE_PROBLEMS: [&str; 11] = [
    "4+R4/4n4/4S4/4k4/4p4/4NL3/9/9/8K b RBGSNLPb3g2sn2l16p 1",
    "4kp3/4g4/9/2N1N4/9/5L3/9/9/4+R3K b RBGSNLPb2g3sn2l16p 1",
    "4B3S/9/6+Rpk/8p/9/9/9/9/8K b RBGSNLP3g2s3n3l15p 1",
    "2S6/9/2kp+R3+R/9/9/2N6/9/9/8K b BGSNLPb3g2s2n3l16p 1",
    "4g2B+R/2Spk4/9/9/2N6/9/9/9/5L2K b RBGSNLP2g2s2n2l16p 1",
    "8S/9/6+Rpk/8p/9/9/9/9/8K b RBGSNLPb3g2s3n3l15p 1",
    "4g4/2Spk4/9/4B4/2N6/9/9/9/5L2K b RBGSNLPr2g2s2n2l16p 1",
    "4g4/1bSpk1S2/9/9/2N6/5L3/9/9/8K b 2rb3g2s3n3l17p 1",
    "4g4/3pk4/9/4B4/2N6/5L3/9/9/8K b RBGSNLPr2g3s2n2l16p 1",
    SFEN_HIRATE,
    SFEN_FESTIVAL,
];

/// 名前つきの局面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedPosition {
    pub name: String,
    pub sfen: String,
}

impl NamedPosition {
    pub fn new(name: impl Into<String>, sfen: impl Into<String>) -> Self {
        Self { name: name.into(), sfen: sfen.into() }
    }

    /// SFEN を解析して局面を作る
    pub fn position(&self) -> Result<Position> {
        Position::from_sfen(&self.sfen)
            .with_context(|| format!("invalid sfen for {}: {}", self.name, self.sfen))
    }
}

/// 指し手生成ベンチマークの既定局面（平手初期局面と指し手生成祭り局面）
pub fn movegen_positions() -> Vec<NamedPosition> {
    vec![NamedPosition::new("startpos", SFEN_HIRATE), NamedPosition::new("festival", SFEN_FESTIVAL)]
}

/// 詰み判定ベンチマークの既定局面
pub fn checkmate_problems() -> Vec<NamedPosition> {
    CHECKMATE_PROBLEMS
        .iter()
        .enumerate()
        .map(|(i, sfen)| NamedPosition::new(format!("problem{}", i + 1), *sfen))
        .collect()
}

/// 1行を解析する（`default_name` は名前の省略時に使う）
pub fn parse_position_line(line: &str, default_name: &str) -> Result<NamedPosition> {
    let (name, sfen) = match line.split_once('|') {
        Some((name, sfen)) => (name.trim(), sfen.trim()),
        None => (default_name, line.trim()),
    };
    if name.is_empty() {
        bail!("empty position name");
    }
    if sfen.is_empty() {
        bail!("missing sfen for {name}");
    }
    let named = NamedPosition::new(name, sfen);
    named.position()?;
    Ok(named)
}

/// 局面ファイルの内容を読む
pub fn read_positions<R: BufRead>(reader: R, source: &str) -> Result<Vec<NamedPosition>> {
    let mut positions = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {source}"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let default_name = format!("line{}", idx + 1);
        let parsed = parse_position_line(trimmed, &default_name)
            .with_context(|| format!("invalid position on line {} of {source}", idx + 1))?;
        positions.push(parsed);
    }
    if positions.is_empty() {
        bail!("no usable positions found in {source}");
    }
    Ok(positions)
}

/// 局面ファイルを開いて読む
pub fn load_positions(path: &Path) -> Result<Vec<NamedPosition>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_positions(BufReader::new(file), &path.display().to_string())
}
