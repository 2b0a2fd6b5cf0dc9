//! tsumi-core のベンチマーク・解析ツール群
//!
//! - `config`: ベンチマーク設定
//! - `positions`: 局面ファイルと既定の局面集
//! - `report`: JSON で書き出すベンチマーク結果
//! - `bench`: 各ベンチマークと静かな手の一覧の出力

pub mod bench;
pub mod config;
pub mod positions;
pub mod report;
