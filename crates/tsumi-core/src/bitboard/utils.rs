//! Bitboard ユーティリティ関数

/// 64bit整数の最上位ビット位置を返す
///
/// `x == 0` の場合は 0 を返す。
#[inline(always)]
pub fn msb64(x: u64) -> u32 {
    if x == 0 { 0 } else { 63 - x.leading_zeros() }
}
