//! 静かな手の一覧
//!
//! 盤上の配置によらない、駒を取らず・成りの損もない手を全列挙する。
//! 空の盤面だけを見るので駒取りは含まれず、盤上の局面に対する
//! 合法性の判定には使えない（評価関数の学習用テーブル作成で使う）。

mod rules;

use std::sync::OnceLock;

use log::debug;

use crate::bitboard::{max_effect, promotion_zone_bb};
use crate::types::{Color, Move, Piece, PieceType};

pub use rules::{QuietRule, drop_destinations};

/// 静かな手の一覧（u32 値の昇順）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuietCatalog {
    values: Vec<u32>,
}

impl QuietCatalog {
    /// 条件表から一覧を作る
    pub fn build() -> Self {
        let mut values = Vec::new();

        // 1. 不成の移動
        for color in Color::ALL {
            for pt in PieceType::ALL {
                let rule = QuietRule::of(color, pt);
                let pc = Piece::new(color, pt);
                for from in rule.origins {
                    for to in max_effect(pt, color, from) & rule.destinations {
                        values.push(Move::new_move_with_piece(from, to, false, pc).to_u32());
                    }
                }
            }
        }

        // 2. 成る移動（from か to が敵陣）
        for color in Color::ALL {
            for pt in PieceType::ALL {
                let rule = QuietRule::of(color, pt);
                if !rule.promotes {
                    continue;
                }
                let Some(promoted_pc) = Piece::new(color, pt).promote() else {
                    continue;
                };
                let zone = promotion_zone_bb(color);
                for from in rule.origins {
                    let effect = max_effect(pt, color, from) & rule.destinations;
                    let targets = if zone.contains(from) { effect } else { effect & zone };
                    for to in targets {
                        values.push(Move::new_move_with_piece(from, to, true, promoted_pc).to_u32());
                    }
                }
            }
        }

        // 3. 駒打ち
        for color in Color::ALL {
            for pt in PieceType::HAND_PIECES {
                let pc = Piece::new(color, pt);
                for to in drop_destinations(color, pt) {
                    values.push(Move::new_drop_with_piece(pt, to, pc).to_u32());
                }
            }
        }

        values.sort_unstable();
        debug_assert!(values.windows(2).all(|w| w[0] < w[1]), "duplicate quiet move");
        debug!("quiet catalog built: {} moves", values.len());
        QuietCatalog { values }
    }

    /// u32 値の昇順の一覧
    #[inline]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// 手の数
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 空かどうか
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 一覧に含まれるか（駒情報つきの指し手で照合する）
    pub fn contains(&self, m: Move) -> bool {
        self.values.binary_search(&m.to_u32()).is_ok()
    }

    /// 指し手として列挙
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.values.iter().map(|&v| Move::from_u32(v))
    }
}

static QUIET_CATALOG: OnceLock<QuietCatalog> = OnceLock::new();

/// 静かな手の一覧（初回呼び出し時に構築）
pub fn quiet_catalog() -> &'static QuietCatalog {
    QUIET_CATALOG.get_or_init(QuietCatalog::build)
}
