//! 駒（Piece）
//!
//! 内部表現は 5bit のラッパー。
//! - bit 0-3: `PieceType`（1..=14）。0 は `Piece::NONE` のみで使用される。
//! - bit 4: `Color`（0 = Black, 1 = White）。

use super::{Color, PieceType};

/// 駒（先後の区別あり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Piece(u8);

impl Piece {
    /// 駒なし
    pub const NONE: Piece = Piece(0);

    // 先手の駒
    pub const B_PAWN: Piece = Piece(1);
    pub const B_LANCE: Piece = Piece(2);
    pub const B_KNIGHT: Piece = Piece(3);
    pub const B_SILVER: Piece = Piece(4);
    pub const B_BISHOP: Piece = Piece(5);
    pub const B_ROOK: Piece = Piece(6);
    pub const B_GOLD: Piece = Piece(7);
    pub const B_KING: Piece = Piece(8);
    pub const B_PRO_PAWN: Piece = Piece(9);
    pub const B_PRO_LANCE: Piece = Piece(10);
    pub const B_PRO_KNIGHT: Piece = Piece(11);
    pub const B_PRO_SILVER: Piece = Piece(12);
    pub const B_HORSE: Piece = Piece(13);
    pub const B_DRAGON: Piece = Piece(14);

    // 後手の駒（+16）
    pub const W_PAWN: Piece = Piece(17);
    pub const W_LANCE: Piece = Piece(18);
    pub const W_KNIGHT: Piece = Piece(19);
    pub const W_SILVER: Piece = Piece(20);
    pub const W_BISHOP: Piece = Piece(21);
    pub const W_ROOK: Piece = Piece(22);
    pub const W_GOLD: Piece = Piece(23);
    pub const W_KING: Piece = Piece(24);
    pub const W_PRO_PAWN: Piece = Piece(25);
    pub const W_PRO_LANCE: Piece = Piece(26);
    pub const W_PRO_KNIGHT: Piece = Piece(27);
    pub const W_PRO_SILVER: Piece = Piece(28);
    pub const W_HORSE: Piece = Piece(29);
    pub const W_DRAGON: Piece = Piece(30);

    /// ColorとPieceTypeから生成
    #[inline]
    pub const fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece(piece_type as u8 | ((color as u8) << 4))
    }

    /// 内部値から生成（不正な値は NONE）
    #[inline]
    pub const fn from_raw(raw: u8) -> Piece {
        match PieceType::from_u8(raw & 0x0F) {
            Some(_) if raw < 32 => Piece(raw),
            _ => Piece::NONE,
        }
    }

    /// 駒種を取得
    ///
    /// `NONE` に対して呼んではならない（debug ビルドで検出）。
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        debug_assert!(self.0 != 0, "piece_type() called on Piece::NONE");
        match PieceType::from_u8(self.0 & 0x0F) {
            Some(pt) => pt,
            None => PieceType::Pawn,
        }
    }

    /// 手番を取得
    #[inline]
    pub const fn color(self) -> Color {
        if (self.0 >> 4) & 1 == 0 { Color::Black } else { Color::White }
    }

    /// 駒がないか
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// 駒があるか
    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    /// 成り駒を返す
    #[inline]
    pub const fn promote(self) -> Option<Piece> {
        match self.piece_type().promote() {
            Some(pt) => Some(Piece::new(self.color(), pt)),
            None => None,
        }
    }

    /// 生駒を返す
    #[inline]
    pub const fn unpromote(self) -> Piece {
        Piece::new(self.color(), self.piece_type().unpromote())
    }

    /// インデックス（0-30、0は無効）
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// 盤上に現れ得る全ての駒（先手14種 → 後手14種）
    pub fn all() -> impl Iterator<Item = Piece> {
        Color::ALL
            .into_iter()
            .flat_map(|c| PieceType::ALL.into_iter().map(move |pt| Piece::new(c, pt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_new() {
        assert_eq!(Piece::new(Color::Black, PieceType::Pawn), Piece::B_PAWN);
        assert_eq!(Piece::new(Color::White, PieceType::Pawn), Piece::W_PAWN);
        assert_eq!(Piece::new(Color::White, PieceType::Dragon), Piece::W_DRAGON);
        assert_eq!(Piece::B_DRAGON.piece_type(), PieceType::Dragon);
        assert_eq!(Piece::W_KING.color(), Color::White);
    }

    #[test]
    fn test_piece_from_raw() {
        assert_eq!(Piece::from_raw(0), Piece::NONE);
        assert_eq!(Piece::from_raw(17), Piece::W_PAWN);
        assert_eq!(Piece::from_raw(15), Piece::NONE);
        assert_eq!(Piece::from_raw(31), Piece::NONE);
    }

    #[test]
    fn test_piece_promote() {
        assert_eq!(Piece::B_PAWN.promote(), Some(Piece::B_PRO_PAWN));
        assert_eq!(Piece::W_BISHOP.promote(), Some(Piece::W_HORSE));
        assert_eq!(Piece::B_GOLD.promote(), None);
        assert_eq!(Piece::W_HORSE.unpromote(), Piece::W_BISHOP);
    }

    #[test]
    fn test_piece_all() {
        let all: Vec<_> = Piece::all().collect();
        assert_eq!(all.len(), 28);
        assert_eq!(all[0], Piece::B_PAWN);
        assert_eq!(all[27], Piece::W_DRAGON);
    }
}
