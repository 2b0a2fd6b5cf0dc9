//! 局面状態（StateInfo）
//!
//! do_move のたびに新しい状態を積み、undo_move で1つ前に戻す。
//! 保持するのは王手・pin 情報など盤面から再計算できる派生情報と、
//! 巻き戻しに必要な取った駒だけ。

use crate::bitboard::Bitboard;
use crate::types::{Color, Move, Piece, PieceType};

/// 局面状態
#[derive(Clone)]
pub struct StateInfo {
    /// 手番側の玉に王手している駒
    pub checkers: Bitboard,
    /// 各手番の玉と敵の遠方駒の間に1枚だけある駒（先後問わず）[Color]
    pub blockers_for_king: [Bitboard; Color::NUM],
    /// 手番 c の玉を狙う相手の遠方駒のうち、間の1枚が c 自身の駒であるもの [Color]
    pub pinners: [Bitboard; Color::NUM],
    /// 手番側がその駒種を置けば相手玉に王手となる升 [PieceType]
    pub check_squares: [Bitboard; PieceType::NUM + 1],
    /// 直前の指し手で取った駒
    pub captured_piece: Piece,
    /// 直前の指し手
    pub last_move: Move,
    /// 1つ前の状態
    pub previous: Option<Box<StateInfo>>,
}

impl StateInfo {
    /// 空の状態を生成
    pub fn new() -> Self {
        StateInfo {
            checkers: Bitboard::EMPTY,
            blockers_for_king: [Bitboard::EMPTY; Color::NUM],
            pinners: [Bitboard::EMPTY; Color::NUM],
            check_squares: [Bitboard::EMPTY; PieceType::NUM + 1],
            captured_piece: Piece::NONE,
            last_move: Move::NONE,
            previous: None,
        }
    }

    /// 積まれている過去の状態の数
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cur = self.previous.as_deref();
        while let Some(st) = cur {
            depth += 1;
            cur = st.previous.as_deref();
        }
        depth
    }
}

impl Default for StateInfo {
    fn default() -> Self {
        Self::new()
    }
}
