//! 指し手生成・詰み判定のベンチマークと静かな手の一覧の出力
//!
//! 出力はいずれも `out` に書き、計測結果は `BenchReport` として返す。

use std::hint::black_box;
use std::io::Write;
use std::time::Instant;

use anyhow::Result;
use log::{debug, info};
use tsumi_core::{
    Move, MoveCategory, MoveList, generate, is_mate_in_one_ply, is_mate_in_three_plies,
    quiet_catalog,
};

use crate::config::BenchConfig;
use crate::positions::NamedPosition;
use crate::report::{BenchEntry, BenchKind, BenchReport};

/// 計測時間の下限（秒）
const MIN_ELAPSED_SEC: f64 = 0.001;

fn elapsed_sec(start: Instant) -> f64 {
    start.elapsed().as_secs_f64().max(MIN_ELAPSED_SEC)
}

/// 詰み判定の手数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatePly {
    One,
    Three,
}

impl MatePly {
    fn name(self) -> &'static str {
        match self {
            MatePly::One => "mate1",
            MatePly::Three => "mate3",
        }
    }

    fn kind(self) -> BenchKind {
        match self {
            MatePly::One => BenchKind::Mate1,
            MatePly::Three => BenchKind::Mate3,
        }
    }
}

/// 指し手生成（`NonEvasions`）のベンチマーク
pub fn bench_movegen(
    config: &BenchConfig,
    positions: &[NamedPosition],
    out: &mut impl Write,
) -> Result<BenchReport> {
    info!("bench-movegen: {} positions x {} iterations", positions.len(), config.iterations);
    let mut report = BenchReport::new(BenchKind::Movegen);
    writeln!(out, "Start Move Generation Benchmark!\n")?;

    for named in positions {
        let pos = named.position()?;
        writeln!(out, "Position={}", pos.to_sfen())?;

        let mut moves = MoveList::new();
        let start = Instant::now();
        for _ in 0..config.iterations {
            moves.clear();
            generate(black_box(&pos), MoveCategory::NonEvasions, &mut moves);
        }
        let elapsed = elapsed_sec(start);
        let speed = f64::from(config.iterations) / elapsed;

        writeln!(out, "Iterations Finished.")?;
        writeln!(
            out,
            "Iteration={}, Time={elapsed:.3}sec, Speed={speed:.0}times/sec.",
            config.iterations
        )?;
        for m in moves.iter() {
            write!(out, "{m} ")?;
        }
        writeln!(out, "\n")?;
        debug!("{}: {} moves", named.name, moves.len());

        report.entries.push(BenchEntry {
            name: named.name.clone(),
            sfen: named.sfen.clone(),
            iterations: config.iterations,
            elapsed_sec: elapsed,
            calls_per_sec: speed,
            num_moves: Some(moves.len()),
            mate_move: None,
        });
    }
    Ok(report)
}

/// 詰み判定のベンチマーク
pub fn bench_mate(
    config: &BenchConfig,
    positions: &[NamedPosition],
    ply: MatePly,
    out: &mut impl Write,
) -> Result<BenchReport> {
    info!("bench-{}: {} positions x {} iterations", ply.name(), positions.len(), config.iterations);
    let mut report = BenchReport::new(ply.kind());

    for (i, named) in positions.iter().enumerate() {
        let mut pos = named.position()?;
        write!(out, "[{}] {} => ", i + 1, named.sfen)?;

        let mut mate_move = None;
        let start = Instant::now();
        for _ in 0..config.iterations {
            mate_move = match ply {
                MatePly::One => is_mate_in_one_ply(black_box(&mut pos)),
                MatePly::Three => {
                    let result = is_mate_in_three_plies(black_box(&mut pos));
                    result.is_mate.then_some(result.mate_move)
                }
            };
        }
        let elapsed = elapsed_sec(start);
        let speed = f64::from(config.iterations) / elapsed;

        match mate_move {
            Some(m) => writeln!(out, "checkmate {m}")?,
            None => writeln!(out, "nomate")?,
        }
        writeln!(
            out,
            "Iteration={}, Time={elapsed:.3}sec, Speed={:.0}Kcalls/sec.\n",
            config.iterations,
            speed / 1000.0
        )?;

        report.entries.push(BenchEntry {
            name: named.name.clone(),
            sfen: named.sfen.clone(),
            iterations: config.iterations,
            elapsed_sec: elapsed,
            calls_per_sec: speed,
            num_moves: None,
            mate_move: mate_move.map(Move::to_usi),
        });
    }
    Ok(report)
}

/// 静かな手の一覧を1行1手（8桁の16進数）で書き出す
pub fn write_quiet_catalog(out: &mut impl Write) -> Result<usize> {
    let catalog = quiet_catalog();
    for value in catalog.values() {
        writeln!(out, "{value:08x}")?;
    }
    info!("compute-all-quiets: {} moves", catalog.len());
    Ok(catalog.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::positions::{checkmate_problems, movegen_positions};

    fn run_to_string<F>(f: F) -> (String, BenchReport)
    where
        F: FnOnce(&mut Vec<u8>) -> Result<BenchReport>,
    {
        let mut out = Vec::new();
        let report = f(&mut out).unwrap();
        (String::from_utf8(out).unwrap(), report)
    }

    #[test]
    fn test_bench_movegen_output() {
        let config = BenchConfig::default();
        let (text, report) =
            run_to_string(|out| bench_movegen(&config, &movegen_positions(), out));
        assert!(text.starts_with("Start Move Generation Benchmark!\n\nPosition=lnsgkgsnl/"));
        assert_eq!(text.matches("Iterations Finished.").count(), 2);
        assert!(text.contains("Iteration=1, Time="));
        assert!(text.contains("7g7f "));
        let counts: Vec<_> = report.entries.iter().map(|e| e.num_moves).collect();
        assert_eq!(counts, vec![Some(30), Some(207)]);
    }

    #[test]
    fn test_bench_mate1_output() {
        let config = BenchConfig::default();
        let problems = checkmate_problems();
        let (text, report) =
            run_to_string(|out| bench_mate(&config, &problems[..2], MatePly::One, out));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("[1] {} => checkmate 5c6d+", problems[0].sfen));
        assert!(lines[1].starts_with("Iteration=1, Time="));
        assert!(lines[1].ends_with("Kcalls/sec."));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], format!("[2] {} => checkmate 5d6b+", problems[1].sfen));
        assert_eq!(report.entries[1].mate_move.as_deref(), Some("5d6b+"));
    }

    #[test]
    fn test_bench_mate3_nomate() {
        let config = BenchConfig::default();
        let problems = checkmate_problems();
        let (text, report) =
            run_to_string(|out| bench_mate(&config, &problems[7..8], MatePly::Three, out));
        assert!(text.starts_with(&format!("[1] {} => nomate\n", problems[7].sfen)));
        assert_eq!(report.kind, BenchKind::Mate3);
        assert_eq!(report.entries[0].mate_move, None);
    }

    #[test]
    fn test_quiet_catalog_dump() {
        let mut out = Vec::new();
        assert_eq!(write_quiet_catalog(&mut out).unwrap(), 15356);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 15356);
        assert_eq!(lines[0], "00010203");
        assert_eq!(lines[lines.len() - 1], "001e284f");
    }
}
