//! 王手生成
//!
//! 全合法手を作ってから絞るのではなく、王手になる移動先だけを直接列挙する。
//!
//! 生成順序:
//! 1. 相手玉に対する blocker になっている自駒（開き王手候補）
//! 2. それ以外の駒による直接王手
//! 3. 駒打ちによる王手（歩・香・桂・銀・金・角・飛）

use crate::bitboard::{Bitboard, line_bb, piece_effect, promotion_zone_bb};
use crate::position::Position;
use crate::types::{Move, Piece, PieceType, Square};

use super::generator::{add_legal, dead_square_bb, generate_moves_from_sq, pawn_drop_mask};
use super::movelist::MoveList;

/// 1つの駒から直接王手となる移動手を生成
///
/// 成り: 利き ∩ 成った駒種の王手升、不成: 利き ∩ 元の駒種の王手升 をそれぞれ独立に見る。
fn generate_direct_checks_from_sq(
    pos: &Position,
    list: &mut MoveList,
    from: Square,
    target: Bitboard,
) {
    let pc = pos.piece_on(from);
    let pt = pc.piece_type();
    let us = pc.color();
    let effect = piece_effect(pt, us, from, pos.occupied()) & target;
    if effect.is_empty() {
        return;
    }

    if let (Some(promoted_pt), Some(promoted_pc)) = (pt.promote(), pc.promote()) {
        let zone = promotion_zone_bb(us);
        let promo_dst = effect & pos.check_squares(promoted_pt);
        let promo_dst = if zone.contains(from) { promo_dst } else { promo_dst & zone };
        for to in promo_dst {
            add_legal(pos, list, Move::new_move_with_piece(from, to, true, promoted_pc));
        }
    }

    let non_promo_dst = effect & pos.check_squares(pt) & !dead_square_bb(us, pt);
    for to in non_promo_dst {
        add_legal(pos, list, Move::new_move_with_piece(from, to, false, pc));
    }
}

/// 王手になる合法手を `list` に追加する
pub fn generate_checks(pos: &Position, list: &mut MoveList) {
    let us = pos.side_to_move();
    let them = !us;
    let Some(them_king) = pos.king_square(them) else {
        return;
    };
    let target = !pos.pieces_c(us);

    // 1. 開き王手候補
    let blockers = pos.blockers_for_king(them) & pos.pieces_c(us);
    for from in blockers {
        let pin_line = line_bb(them_king, from);
        let effect = piece_effect(pos.piece_on(from).piece_type(), us, from, pos.occupied());
        // 直線から外れれば必ず開き王手
        generate_moves_from_sq(pos, list, from, effect & target & !pin_line);
        // 直線上に残る手は直接王手のみ
        generate_direct_checks_from_sq(pos, list, from, target & pin_line);
    }

    // 2. 直接王手
    let others = pos.pieces_c(us) & !blockers & !pos.pieces_pt(PieceType::King);
    for from in others {
        generate_direct_checks_from_sq(pos, list, from, target);
    }

    // 3. 駒打ち王手
    let hand = pos.hand(us);
    let empties = pos.empties();
    for pt in PieceType::HAND_PIECES {
        if !hand.has(pt) {
            continue;
        }
        let mut to_bb = pos.check_squares(pt) & empties & !dead_square_bb(us, pt);
        if pt == PieceType::Pawn {
            to_bb &= pawn_drop_mask(pos, us);
        }
        let dropped_pc = Piece::new(us, pt);
        for to in to_bb {
            add_legal(pos, list, Move::new_drop_with_piece(pt, to, dropped_pc));
        }
    }
}
