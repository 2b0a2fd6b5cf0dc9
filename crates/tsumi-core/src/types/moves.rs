//! 指し手（Move）

use std::fmt;

use thiserror::Error;

use super::{Piece, PieceType, Square};

/// USI 文字列から指し手への変換エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move string too short: {0:?}")]
    TooShort(String),
    #[error("invalid square in move: {0:?}")]
    InvalidSquare(String),
    #[error("invalid drop piece in move: {0:?}")]
    InvalidDropPiece(String),
    #[error("unexpected trailing characters in move: {0:?}")]
    Trailing(String),
    #[error("not a legal move in this position: {0:?}")]
    Illegal(String),
}

/// 指し手（32bit）
///
/// 下位16bit（YaneuraOu互換）:
/// - bit 0-6:  移動先 (to)
/// - bit 7-13: 移動元 (from) / 駒打ちの場合はPieceType
/// - bit 14:   駒打ちフラグ
/// - bit 15:   成りフラグ
///
/// 上位16bit:
/// - bit 16-20: 移動後の駒 (moved_piece_after)
///
/// 指し手生成器・詰み判定が返す指し手は常に駒情報を持つ。
/// USI から復元した直後の指し手は駒情報を持たないので、
/// 局面と照合する場合は `Position::move_from_usi` を使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Move(u32);

impl Move {
    /// 無効な指し手
    pub const NONE: Move = Move(0);

    const TO_MASK: u32 = 0x007F; // bit 0-6
    const FROM_MASK: u32 = 0x3F80; // bit 7-13
    const FROM_SHIFT: u32 = 7;
    const DROP_FLAG: u32 = 0x4000; // bit 14
    const PROMOTE_FLAG: u32 = 0x8000; // bit 15
    const LOWER_16BIT_MASK: u32 = 0xFFFF;
    const PIECE_SHIFT: u32 = 16;

    /// 移動の指し手を生成（駒情報なし）
    #[inline]
    pub const fn new_move(from: Square, to: Square, promote: bool) -> Move {
        let mut m = (to.raw() as u32) | ((from.raw() as u32) << Self::FROM_SHIFT);
        if promote {
            m |= Self::PROMOTE_FLAG;
        }
        Move(m)
    }

    /// 移動の指し手を生成（駒情報あり）
    ///
    /// `moved_piece_after` は移動後の駒（成りなら成った後の駒）。
    #[inline]
    pub const fn new_move_with_piece(
        from: Square,
        to: Square,
        promote: bool,
        moved_piece_after: Piece,
    ) -> Move {
        Move::new_move(from, to, promote).with_piece(moved_piece_after)
    }

    /// 駒打ちの指し手を生成（駒情報なし）
    #[inline]
    pub const fn new_drop(piece_type: PieceType, to: Square) -> Move {
        Move((to.raw() as u32) | ((piece_type as u32) << Self::FROM_SHIFT) | Self::DROP_FLAG)
    }

    /// 駒打ちの指し手を生成（駒情報あり）
    #[inline]
    pub const fn new_drop_with_piece(piece_type: PieceType, to: Square, piece: Piece) -> Move {
        Move::new_drop(piece_type, to).with_piece(piece)
    }

    /// 移動先を取得
    #[inline]
    pub const fn to(self) -> Square {
        Square::from_u8_unchecked((self.0 & Self::TO_MASK) as u8)
    }

    /// 移動元を取得（駒打ちに対しては無効）
    #[inline]
    pub const fn from(self) -> Square {
        debug_assert!(!self.is_drop(), "from() called on drop move");
        Square::from_u8_unchecked(((self.0 & Self::FROM_MASK) >> Self::FROM_SHIFT) as u8)
    }

    /// 打つ駒種を取得（駒打ちでない場合は無効）
    #[inline]
    pub const fn drop_piece_type(self) -> PieceType {
        debug_assert!(self.is_drop());
        match PieceType::from_u8(((self.0 & Self::FROM_MASK) >> Self::FROM_SHIFT) as u8) {
            Some(pt) => pt,
            None => PieceType::Pawn,
        }
    }

    /// 移動後の駒（成りなら成った後の駒、駒打ちなら打った駒）
    ///
    /// 駒情報が設定されていない場合は `Piece::NONE`。
    #[inline]
    pub const fn moved_piece_after(self) -> Piece {
        Piece::from_raw((self.0 >> Self::PIECE_SHIFT) as u8)
    }

    /// 駒情報が設定されているかどうか
    #[inline]
    pub const fn has_piece_info(self) -> bool {
        (self.0 >> Self::PIECE_SHIFT) != 0
    }

    /// 駒情報を設定して新しいMoveを返す
    #[inline]
    pub const fn with_piece(self, piece: Piece) -> Move {
        Move((self.0 & Self::LOWER_16BIT_MASK) | ((piece.raw() as u32) << Self::PIECE_SHIFT))
    }

    /// 駒情報を落とした下位16bitだけの指し手
    #[inline]
    pub const fn without_piece(self) -> Move {
        Move(self.0 & Self::LOWER_16BIT_MASK)
    }

    /// 駒打ちかどうか
    #[inline]
    pub const fn is_drop(self) -> bool {
        (self.0 & Self::DROP_FLAG) != 0
    }

    /// 成りかどうか
    #[inline]
    pub const fn is_promote(self) -> bool {
        (self.0 & Self::PROMOTE_FLAG) != 0
    }

    /// 無効な指し手かどうか
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// 有効な指し手かどうか
    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    /// u32に変換
    #[inline]
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// u32からMoveを生成（検証なし）
    #[inline]
    pub const fn from_u32(value: u32) -> Move {
        Move(value)
    }

    /// u32からMoveを生成（範囲チェック付き）
    ///
    /// 移動先・移動元が盤外、打ち駒が手駒にならない駒種、
    /// 駒打ちと成りが同時に立っている、上位bitに不正な駒がある場合は `None`。
    pub const fn from_u32_checked(value: u32) -> Option<Move> {
        let to = value & Self::TO_MASK;
        let from = (value & Self::FROM_MASK) >> Self::FROM_SHIFT;
        if to >= Square::NUM as u32 {
            return None;
        }
        if (value & Self::DROP_FLAG) != 0 {
            if (value & Self::PROMOTE_FLAG) != 0 {
                return None;
            }
            if from == 0 || from > PieceType::Gold as u32 {
                return None;
            }
        } else if from >= Square::NUM as u32 || from == to {
            return None;
        }
        let piece = value >> Self::PIECE_SHIFT;
        if piece != 0 && Piece::from_raw(piece as u8).raw() as u32 != piece {
            return None;
        }
        Some(Move(value))
    }

    /// USI形式の文字列に変換
    pub fn to_usi(self) -> String {
        if self.is_none() {
            return "none".to_string();
        }
        self.to_string()
    }

    /// USI形式の文字列からMoveに変換（駒情報なし）
    pub fn from_usi(s: &str) -> Result<Move, MoveParseError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() < 4 {
            return Err(MoveParseError::TooShort(s.to_string()));
        }
        let square_at = |i: usize| -> Result<Square, MoveParseError> {
            let text: String = chars[i..i + 2].iter().collect();
            Square::from_usi(&text).ok_or_else(|| MoveParseError::InvalidSquare(s.to_string()))
        };

        // 駒打ち（"P*7f" 形式）
        if chars[1] == '*' {
            let pt = PieceType::from_usi_char(chars[0])
                .filter(|pt| *pt != PieceType::King)
                .ok_or_else(|| MoveParseError::InvalidDropPiece(s.to_string()))?;
            if chars.len() > 4 {
                return Err(MoveParseError::Trailing(s.to_string()));
            }
            return Ok(Move::new_drop(pt, square_at(2)?));
        }

        // 通常の移動（"7g7f" または "7g7f+" 形式）
        let from = square_at(0)?;
        let to = square_at(2)?;
        let promote = match chars.get(4) {
            None => false,
            Some('+') if chars.len() == 5 => true,
            Some(_) => return Err(MoveParseError::Trailing(s.to_string())),
        };
        Ok(Move::new_move(from, to, promote))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_drop() {
            let pt_char = self.drop_piece_type().to_usi_char().unwrap_or('?');
            write!(f, "{pt_char}*{}", self.to())
        } else {
            let promote = if self.is_promote() { "+" } else { "" };
            write!(f, "{}{}{promote}", self.from(), self.to())
        }
    }
}
