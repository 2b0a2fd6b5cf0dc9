//! 指し手生成モジュール
//!
//! - `generate`: 種別（`MoveCategory`）ごとの合法手生成
//! - `generate_checks`: 王手になる合法手の生成（詰み判定で使用）
//! - `Position::is_legal` / `Position::move_from_usi`
//! - `perft`: 生成器の検証用

mod checks;
mod generator;
mod legal;
mod movelist;
mod types;

pub use checks::generate_checks;
pub use generator::{generate, generate_moves, perft};
pub use movelist::{MAX_MOVES, MoveList};
pub use types::MoveCategory;
