//! # tsumi-core
//!
//! 将棋の合法手生成と短手数の詰み判定ライブラリ。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Color, Square, Piece, Move, Hand, etc.）
//! - `bitboard`: ビットボード演算と利きテーブル
//! - `position`: 局面表現、SFEN、do_move/undo_move
//! - `movegen`: 種別ごとの合法手生成、王手生成
//! - `quiet`: 静かな手の一覧
//! - `mate`: 1手詰め・3手詰め
//!
//! ## 使用例
//!
//! ```
//! use tsumi_core::{MoveCategory, Position, generate_moves, is_mate_in_one_ply};
//!
//! let mut pos =
//!     Position::from_sfen("4k4/9/4P4/9/9/9/9/9/4K4 b G 1").unwrap();
//! assert!(!generate_moves(&pos, MoveCategory::All).is_empty());
//! let mate = is_mate_in_one_ply(&mut pos).unwrap();
//! assert_eq!(mate.to_usi(), "G*5b");
//! ```

// 基本型
pub mod types;

// 盤面表現
pub mod bitboard;
pub mod position;

// 合法手生成
pub mod movegen;
pub mod quiet;

// 詰み判定
pub mod mate;

pub use mate::{Mate3Line, Mate3Result, is_mate_in_one_ply, is_mate_in_three_plies};
pub use movegen::{MoveCategory, MoveList, generate, generate_checks, generate_moves, perft};
pub use position::{Position, SFEN_HIRATE, SfenError};
pub use quiet::{QuietCatalog, quiet_catalog};
pub use types::{Color, Move, MoveParseError, Piece, PieceType, Square};
