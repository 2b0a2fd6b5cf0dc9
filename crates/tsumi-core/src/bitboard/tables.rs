//! 利きテーブルとBitboardマスク
//!
//! 近接駒の利きは先手視点の移動量（筋, 段）で定義し、後手は段方向を反転して作る。
//! 段の負方向が先手の「前」。

use crate::types::{Color, File, Rank, Square};

use super::Bitboard;

/// 筋のBitboard
pub static FILE_BB: [Bitboard; File::NUM] = init_file_bb();

/// 段のBitboard
pub static RANK_BB: [Bitboard; Rank::NUM] = init_rank_bb();

/// 歩の利き [Color][Square]
pub static PAWN_EFFECT: [[Bitboard; Square::NUM]; Color::NUM] = step_effects(&[(0, -1)]);

/// 桂の利き [Color][Square]
pub static KNIGHT_EFFECT: [[Bitboard; Square::NUM]; Color::NUM] =
    step_effects(&[(1, -2), (-1, -2)]);

/// 銀の利き [Color][Square]
pub static SILVER_EFFECT: [[Bitboard; Square::NUM]; Color::NUM] =
    step_effects(&[(0, -1), (1, -1), (-1, -1), (1, 1), (-1, 1)]);

/// 金の利き [Color][Square]
pub static GOLD_EFFECT: [[Bitboard; Square::NUM]; Color::NUM] =
    step_effects(&[(0, -1), (1, -1), (-1, -1), (1, 0), (-1, 0), (0, 1)]);

/// 王の利き [Square]
pub static KING_EFFECT: [Bitboard; Square::NUM] =
    step_effects(&[(0, -1), (1, -1), (-1, -1), (1, 0), (-1, 0), (0, 1), (1, 1), (-1, 1)])[0];

/// 敵陣（成れる段）[Color]
pub static PROMOTION_ZONE_BB: [Bitboard; Color::NUM] = [
    rank_range_bb(Color::Black, Rank::Rank1, Rank::Rank3),
    rank_range_bb(Color::White, Rank::Rank1, Rank::Rank3),
];

// === 初期化関数 ===

const fn init_file_bb() -> [Bitboard; File::NUM] {
    let mut result = [Bitboard::EMPTY; File::NUM];
    let mut sq = 0u8;
    while sq < 81 {
        let file = (sq / 9) as usize;
        result[file] = result[file].or(square_bb_const(sq));
        sq += 1;
    }
    result
}

const fn init_rank_bb() -> [Bitboard; Rank::NUM] {
    let mut result = [Bitboard::EMPTY; Rank::NUM];
    let mut sq = 0u8;
    while sq < 81 {
        let rank = (sq % 9) as usize;
        result[rank] = result[rank].or(square_bb_const(sq));
        sq += 1;
    }
    result
}

/// 先手視点の移動量一覧から、両手番の近接利きテーブルを作る
const fn step_effects(deltas: &[(i8, i8)]) -> [[Bitboard; Square::NUM]; Color::NUM] {
    let mut result = [[Bitboard::EMPTY; Square::NUM]; Color::NUM];
    let mut sq = 0u8;
    while sq < 81 {
        let file = (sq / 9) as i8;
        let rank = (sq % 9) as i8;
        let mut i = 0;
        while i < deltas.len() {
            let (df, dr) = deltas[i];
            // 先手
            result[0][sq as usize] = result[0][sq as usize].or(offset_bb(file + df, rank + dr));
            // 後手（段方向のみ反転）
            result[1][sq as usize] = result[1][sq as usize].or(offset_bb(file + df, rank - dr));
            i += 1;
        }
        sq += 1;
    }
    result
}

const fn offset_bb(file: i8, rank: i8) -> Bitboard {
    if file < 0 || file > 8 || rank < 0 || rank > 8 {
        Bitboard::EMPTY
    } else {
        square_bb_const((file * 9 + rank) as u8)
    }
}

const fn square_bb_const(sq: u8) -> Bitboard {
    Bitboard::from_square(Square::from_u8_unchecked(sq))
}

/// 手番側から見た段の範囲 [from, to] のBitboard
///
/// `Rank::Rank1` が相手陣の一番奥（先手なら1段目、後手なら9段目）。
pub const fn rank_range_bb(color: Color, from: Rank, to: Rank) -> Bitboard {
    let mut result = Bitboard::EMPTY;
    let mut sq = 0u8;
    while sq < 81 {
        let rank = Square::from_u8_unchecked(sq).rank().relative(color) as u8;
        if rank >= from as u8 && rank <= to as u8 {
            result = result.or(square_bb_const(sq));
        }
        sq += 1;
    }
    result
}

// === 利き取得関数 ===

/// 歩の利きを取得
#[inline]
pub fn pawn_effect(color: Color, sq: Square) -> Bitboard {
    PAWN_EFFECT[color.index()][sq.index()]
}

/// 桂の利きを取得
#[inline]
pub fn knight_effect(color: Color, sq: Square) -> Bitboard {
    KNIGHT_EFFECT[color.index()][sq.index()]
}

/// 銀の利きを取得
#[inline]
pub fn silver_effect(color: Color, sq: Square) -> Bitboard {
    SILVER_EFFECT[color.index()][sq.index()]
}

/// 金の利きを取得
#[inline]
pub fn gold_effect(color: Color, sq: Square) -> Bitboard {
    GOLD_EFFECT[color.index()][sq.index()]
}

/// 王の利きを取得
#[inline]
pub fn king_effect(sq: Square) -> Bitboard {
    KING_EFFECT[sq.index()]
}

/// 敵陣のBitboard
#[inline]
pub fn promotion_zone_bb(color: Color) -> Bitboard {
    PROMOTION_ZONE_BB[color.index()]
}
