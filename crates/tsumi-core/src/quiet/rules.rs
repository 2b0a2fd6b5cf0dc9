//! 駒種ごとの静かな手の条件表

use crate::bitboard::{Bitboard, rank_range_bb};
use crate::types::{Color, PieceType, Rank};

/// 静かな手の条件
///
/// `origins` の升から、空の盤面での利きのうち `destinations` に入る升へ
/// 不成で動く手が静かな手。`promotes` が立っている駒種は成る手も含む。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuietRule {
    /// 移動元として認める升
    pub origins: Bitboard,
    /// 移動先として認める升
    pub destinations: Bitboard,
    /// 成る手も静かな手として扱うか
    pub promotes: bool,
}

impl QuietRule {
    /// どこからどこへでも不成で動ける
    const ANYWHERE: QuietRule =
        QuietRule { origins: Bitboard::ALL, destinations: Bitboard::ALL, promotes: false };

    /// 指定した駒の条件を取得
    #[inline]
    pub fn of(color: Color, pt: PieceType) -> QuietRule {
        QUIET_RULES[color.index()][pt.index() - 1]
    }
}

/// 相対段 lo..=hi
const fn ranks(color: Color, lo: Rank, hi: Rank) -> Bitboard {
    rank_range_bb(color, lo, hi)
}

/// 駒種ごとの条件
///
/// 歩・角・飛は成れるなら成るのが常に得なので、不成は敵陣の外だけ。
/// 香は2段目、桂は1-2段目の不成を除く（1段目の香は行き所がない）。
/// 銀は成・不成のどちらも静かな手になりうる。
const fn rule(color: Color, pt: PieceType) -> QuietRule {
    match pt {
        PieceType::Pawn => QuietRule {
            origins: Bitboard::ALL,
            destinations: ranks(color, Rank::Rank4, Rank::Rank9),
            promotes: false,
        },
        PieceType::Lance | PieceType::Knight => QuietRule {
            origins: Bitboard::ALL,
            destinations: ranks(color, Rank::Rank3, Rank::Rank9),
            promotes: false,
        },
        PieceType::Bishop | PieceType::Rook => {
            let outside_zone = ranks(color, Rank::Rank4, Rank::Rank9);
            QuietRule { origins: outside_zone, destinations: outside_zone, promotes: false }
        }
        PieceType::Silver => QuietRule { promotes: true, ..QuietRule::ANYWHERE },
        _ => QuietRule::ANYWHERE,
    }
}

const fn rules_for(color: Color) -> [QuietRule; PieceType::NUM] {
    let mut table = [QuietRule::ANYWHERE; PieceType::NUM];
    let mut i = 0;
    while i < PieceType::NUM {
        table[i] = rule(color, PieceType::ALL[i]);
        i += 1;
    }
    table
}

/// 静かな手の条件表 [Color][PieceType - 1]
static QUIET_RULES: [[QuietRule; PieceType::NUM]; Color::NUM] =
    [rules_for(Color::Black), rules_for(Color::White)];

/// 駒打ちの打ち先（行き所のない升を除く）
pub fn drop_destinations(color: Color, pt: PieceType) -> Bitboard {
    match pt {
        PieceType::Pawn | PieceType::Lance => ranks(color, Rank::Rank2, Rank::Rank9),
        PieceType::Knight => ranks(color, Rank::Rank3, Rank::Rank9),
        _ => Bitboard::ALL,
    }
}
