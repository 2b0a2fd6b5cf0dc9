//! 詰み判定モジュール
//!
//! - `is_mate_in_one_ply`: 1手詰め
//! - `is_mate_in_three_plies`: 3手詰め
//!
//! どちらも局面を一時的に進めて調べ、戻してから返る。
//! 攻め方が王手されている局面や玉のない局面では常に「詰みなし」を返す。

mod mate1;
mod mate3;

pub use mate1::is_mate_in_one_ply;
pub use mate3::{Mate3Line, Mate3Result, is_mate_in_three_plies};
