//! ビットボードモジュール
//!
//! 81マスの盤面を128bitで表現し、高速なビット演算を提供する。
//!
//! - `Bitboard`: 128bit盤面表現
//! - 近接駒の利きテーブルと段・筋マスク（コンパイル時生成）
//! - 遠方駒の利き計算、2マス間・直線テーブル（初回使用時に生成）

mod core;
mod sliders;
mod tables;
mod utils;

pub use core::{Bitboard, BitboardIter};
pub use sliders::*;
pub use tables::*;
