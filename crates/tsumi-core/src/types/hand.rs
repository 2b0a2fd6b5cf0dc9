//! 手駒（Hand）

use super::PieceType;

/// 手駒（32bit packed）
///
/// ビット配置:
/// - bit 0-4:   歩 (5bit, 最大18枚)
/// - bit 5-7:   香 (3bit, 最大4枚)
/// - bit 8-10:  桂 (3bit, 最大4枚)
/// - bit 11-13: 銀 (3bit, 最大4枚)
/// - bit 14-16: 金 (3bit, 最大4枚)
/// - bit 17-18: 角 (2bit, 最大2枚)
/// - bit 19-20: 飛 (2bit, 最大2枚)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Hand(u32);

impl Hand {
    /// 空の手駒
    pub const EMPTY: Hand = Hand(0);

    /// 指定駒種の枚数を取得
    #[inline]
    pub const fn count(self, pt: PieceType) -> u32 {
        let (shift, mask) = Self::shift_mask(pt);
        (self.0 >> shift) & mask
    }

    /// 指定駒種を持っているか
    #[inline]
    pub const fn has(self, pt: PieceType) -> bool {
        self.count(pt) > 0
    }

    /// 1枚追加
    #[inline]
    pub const fn add(self, pt: PieceType) -> Hand {
        let (shift, _) = Self::shift_mask(pt);
        debug_assert!(self.count(pt) < Self::max_count(pt), "hand overflow");
        Hand(self.0 + (1 << shift))
    }

    /// 1枚減らす
    #[inline]
    pub const fn sub(self, pt: PieceType) -> Hand {
        debug_assert!(self.has(pt));
        let (shift, _) = Self::shift_mask(pt);
        Hand(self.0 - (1 << shift))
    }

    /// 指定枚数をセット（フィールド幅を超える分は切り捨て）
    #[inline]
    pub const fn set(self, pt: PieceType, count: u32) -> Hand {
        let (shift, mask) = Self::shift_mask(pt);
        Hand((self.0 & !(mask << shift)) | ((count & mask) << shift))
    }

    /// 指定駒種の1組あたりの枚数（手駒に持てる上限）
    ///
    /// ビット幅ではなく実際の駒数。手駒にならない駒種は 0。
    #[inline]
    pub const fn max_count(pt: PieceType) -> u32 {
        match pt {
            PieceType::Pawn => 18,
            PieceType::Lance | PieceType::Knight | PieceType::Silver | PieceType::Gold => 4,
            PieceType::Bishop | PieceType::Rook => 2,
            _ => 0,
        }
    }

    /// 空かどうか
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    const fn shift_mask(pt: PieceType) -> (u32, u32) {
        match pt {
            PieceType::Pawn => (0, 0x1F),
            PieceType::Lance => (5, 0x07),
            PieceType::Knight => (8, 0x07),
            PieceType::Silver => (11, 0x07),
            PieceType::Gold => (14, 0x07),
            PieceType::Bishop => (17, 0x03),
            PieceType::Rook => (19, 0x03),
            // King, 成駒は手駒にならない
            _ => (0, 0),
        }
    }
}
