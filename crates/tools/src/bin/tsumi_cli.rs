/// tsumi-core のベンチマーク・解析コマンド
///
/// 使い方:
///   # 指し手生成のベンチマーク（平手初期局面と指し手生成祭り局面）
///   tsumi-cli bench-movegen --iterations 1000000
///
///   # 1手詰め・3手詰めのベンチマーク（詰将棋問題集）
///   tsumi-cli bench-mate1 --iterations 100000
///   tsumi-cli bench-mate3 --iterations 1000 --sfens problems.txt
///
///   # 結果を JSON でも書き出す
///   tsumi-cli --json report.json bench-mate1
///
///   # 静かな手の一覧を出力
///   tsumi-cli compute-all-quiets > quiets.txt
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use tools::bench::{MatePly, bench_mate, bench_movegen, write_quiet_catalog};
use tools::config::BenchConfig;
use tools::positions::{NamedPosition, checkmate_problems, load_positions, movegen_positions};
use tools::report::BenchReport;

#[derive(Parser)]
#[command(name = "tsumi-cli", about = "指し手生成・詰み判定のベンチマーク")]
struct Cli {
    /// ベンチマーク結果を JSON で書き出すパス
    #[arg(long, global = true)]
    json: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 指し手生成（NonEvasions）のベンチマーク
    BenchMovegen(BenchArgs),
    /// 1手詰めのベンチマーク
    BenchMate1(BenchArgs),
    /// 3手詰めのベンチマーク
    BenchMate3(BenchArgs),
    /// 静かな手の一覧を 8桁の16進数で1行ずつ出力
    ComputeAllQuiets,
}

#[derive(Args)]
struct BenchArgs {
    /// 1局面あたりの呼び出し回数
    #[arg(long, default_value_t = 1)]
    iterations: u32,

    /// 局面ファイル（`名前 | SFEN` 形式、`#` はコメント）
    #[arg(long)]
    sfens: Option<PathBuf>,
}

fn resolve_positions(
    config: &BenchConfig,
    defaults: fn() -> Vec<NamedPosition>,
) -> Result<Vec<NamedPosition>> {
    match &config.sfens {
        Some(path) => load_positions(path),
        None => Ok(defaults()),
    }
}

fn write_report(config: &BenchConfig, report: &BenchReport) -> Result<()> {
    info!("total {:.3}sec", report.total_elapsed_sec());
    if let Some(path) = &config.json {
        report.write_json(path)?;
        info!("report written to {}", path.display());
    }
    Ok(())
}

fn run_mate(
    args: BenchArgs,
    json: Option<PathBuf>,
    ply: MatePly,
    out: &mut impl Write,
) -> Result<()> {
    let config = BenchConfig::new(args.iterations, args.sfens, json)?;
    let positions = resolve_positions(&config, checkmate_problems)?;
    let report = bench_mate(&config, &positions, ply, out)?;
    write_report(&config, &report)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Command::BenchMovegen(args) => {
            let config = BenchConfig::new(args.iterations, args.sfens, cli.json)?;
            let positions = resolve_positions(&config, movegen_positions)?;
            let report = bench_movegen(&config, &positions, &mut out)?;
            write_report(&config, &report)?;
        }
        Command::BenchMate1(args) => run_mate(args, cli.json, MatePly::One, &mut out)?,
        Command::BenchMate3(args) => run_mate(args, cli.json, MatePly::Three, &mut out)?,
        Command::ComputeAllQuiets => {
            write_quiet_catalog(&mut out)?;
        }
    }

    out.flush().context("failed to flush stdout")
}
