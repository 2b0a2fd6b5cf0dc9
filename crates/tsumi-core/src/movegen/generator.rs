//! 指し手生成器
//!
//! 駒種ごとに移動先候補（target）を絞って疑似合法手を作り、
//! `Position::is_legal` を通った手だけを `MoveList` に積む。

use crate::bitboard::{
    Bitboard, FILE_BB, between_bb, king_effect, piece_effect, promotion_zone_bb, rank_range_bb,
};
use crate::position::Position;
use crate::types::{Color, File, Move, Piece, PieceType, Rank, Square};

use super::movelist::MoveList;
use super::types::MoveCategory;

/// 歩・香が行き所のなくなる段（相対1段目）[Color]
static RANK1_BB: [Bitboard; Color::NUM] = [
    rank_range_bb(Color::Black, Rank::Rank1, Rank::Rank1),
    rank_range_bb(Color::White, Rank::Rank1, Rank::Rank1),
];

/// 桂が行き所のなくなる段（相対1-2段目）[Color]
static RANK12_BB: [Bitboard; Color::NUM] = [
    rank_range_bb(Color::Black, Rank::Rank1, Rank::Rank2),
    rank_range_bb(Color::White, Rank::Rank1, Rank::Rank2),
];

/// 行き所のない駒になる升
///
/// 不成の移動先と駒打ちの打ち先から除く。
#[inline]
pub(super) fn dead_square_bb(us: Color, pt: PieceType) -> Bitboard {
    match pt {
        PieceType::Pawn | PieceType::Lance => RANK1_BB[us.index()],
        PieceType::Knight => RANK12_BB[us.index()],
        _ => Bitboard::EMPTY,
    }
}

/// 二歩にならない升
pub(super) fn pawn_drop_mask(pos: &Position, us: Color) -> Bitboard {
    let mut mask = Bitboard::ALL;
    for file in File::ALL {
        if pos.has_pawn_on_file(us, file) {
            mask &= !FILE_BB[file.index()];
        }
    }
    mask
}

/// 合法なら追加
#[inline]
pub(super) fn add_legal(pos: &Position, list: &mut MoveList, m: Move) {
    if pos.is_legal(m) {
        list.push(m);
    }
}

// ============================================================================
// 駒の移動
// ============================================================================

/// 1つの駒から target への移動手を生成（成り・不成の分岐込み）
///
/// 成れるなら成りを、行き所のなくならない升なら不成も生成する。
pub(super) fn generate_moves_from_sq(
    pos: &Position,
    list: &mut MoveList,
    from: Square,
    targets: Bitboard,
) {
    let pc = pos.piece_on(from);
    let Some(promoted_pc) = pc.promote() else {
        for to in targets {
            add_legal(pos, list, Move::new_move_with_piece(from, to, false, pc));
        }
        return;
    };

    let us = pc.color();
    let zone = promotion_zone_bb(us);
    // from か to が敵陣なら成れる
    let promo_targets = if zone.contains(from) { targets } else { targets & zone };
    let dead = dead_square_bb(us, pc.piece_type());

    for to in targets {
        if promo_targets.contains(to) {
            add_legal(pos, list, Move::new_move_with_piece(from, to, true, promoted_pc));
        }
        if !dead.contains(to) {
            add_legal(pos, list, Move::new_move_with_piece(from, to, false, pc));
        }
    }
}

/// 指定した駒群の移動手を生成
fn generate_piece_moves(pos: &Position, list: &mut MoveList, pieces: Bitboard, target: Bitboard) {
    let us = pos.side_to_move();
    let occupied = pos.occupied();
    for from in pieces {
        let pt = pos.piece_on(from).piece_type();
        let attacks = piece_effect(pt, us, from, occupied) & target;
        generate_moves_from_sq(pos, list, from, attacks);
    }
}

/// 玉以外の駒の移動手を生成
///
/// 生成順は 歩・香・桂・銀、角と飛、金相当と馬・龍。
fn generate_non_king_moves(pos: &Position, list: &mut MoveList, target: Bitboard) {
    let us = pos.side_to_move();
    for pt in [PieceType::Pawn, PieceType::Lance, PieceType::Knight, PieceType::Silver] {
        generate_piece_moves(pos, list, pos.pieces(us, pt), target);
    }
    let bishops_rooks = pos.pieces(us, PieceType::Bishop) | pos.pieces(us, PieceType::Rook);
    generate_piece_moves(pos, list, bishops_rooks, target);
    let ghd = (pos.golds() | pos.pieces_pt(PieceType::Horse) | pos.pieces_pt(PieceType::Dragon))
        & pos.pieces_c(us);
    generate_piece_moves(pos, list, ghd, target);
}

/// 玉の移動手を生成
fn generate_king_moves(pos: &Position, list: &mut MoveList, target: Bitboard) {
    if let Some(ksq) = pos.king_square(pos.side_to_move()) {
        generate_moves_from_sq(pos, list, ksq, king_effect(ksq) & target);
    }
}

// ============================================================================
// 駒打ち
// ============================================================================

/// 駒打ちを生成（歩・香・桂・銀・金・角・飛の順）
fn generate_drops(pos: &Position, list: &mut MoveList, target: Bitboard) {
    let us = pos.side_to_move();
    let hand = pos.hand(us);
    if hand.is_empty() {
        return;
    }

    let target = target & pos.empties();
    for pt in PieceType::HAND_PIECES {
        if !hand.has(pt) {
            continue;
        }
        let mut to_bb = target & !dead_square_bb(us, pt);
        if pt == PieceType::Pawn {
            to_bb &= pawn_drop_mask(pos, us);
        }
        let dropped_pc = Piece::new(us, pt);
        for to in to_bb {
            // 打ち歩詰めは is_legal で弾く
            add_legal(pos, list, Move::new_drop_with_piece(pt, to, dropped_pc));
        }
    }
}

// ============================================================================
// 局面別の生成
// ============================================================================

/// 王手されていないときの全合法手
fn generate_non_evasions(pos: &Position, list: &mut MoveList) {
    let target = !pos.pieces_c(pos.side_to_move());
    generate_non_king_moves(pos, list, target);
    generate_king_moves(pos, list, target);
    generate_drops(pos, list, pos.empties());
}

/// 王手回避手
///
/// 玉の移動、王手駒の取り、合駒（移動・駒打ち）。両王手なら玉の移動のみ。
fn generate_evasions(pos: &Position, list: &mut MoveList) {
    let us = pos.side_to_move();
    let them = !us;
    let Some(ksq) = pos.king_square(us) else {
        return;
    };
    let checkers = pos.checkers();
    debug_assert!(checkers.is_not_empty());

    // 王手駒の利き（玉を除いた盤面で計算し、玉が利きの延長上に逃げる手を除く）
    let occ_without_king = pos.occupied() ^ Bitboard::from_square(ksq);
    let mut checker_attacks = Bitboard::EMPTY;
    for sq in checkers {
        let pt = pos.piece_on(sq).piece_type();
        checker_attacks |= piece_effect(pt, them, sq, occ_without_king);
    }

    let king_targets = king_effect(ksq) & !pos.pieces_c(us) & !checker_attacks;
    generate_moves_from_sq(pos, list, ksq, king_targets);

    if checkers.more_than_one() {
        return;
    }

    let checker_sq = checkers.lsb_unchecked();
    let between = between_bb(checker_sq, ksq);
    generate_non_king_moves(pos, list, between | Bitboard::from_square(checker_sq));
    generate_drops(pos, list, between);
}

/// 駒を取る手かどうか
#[inline]
fn is_capture(pos: &Position, m: Move) -> bool {
    !m.is_drop() && pos.piece_on(m.to()).is_some()
}

/// 指定種別の合法手を `list` に追加する
///
/// 同じ局面に対しては常に同じ順序で同じ手を返す。
pub fn generate(pos: &Position, category: MoveCategory, list: &mut MoveList) {
    let in_check = pos.in_check();
    match category {
        MoveCategory::NonEvasions => {
            if !in_check {
                generate_non_evasions(pos, list);
            }
        }
        MoveCategory::Evasions => {
            if in_check {
                generate_evasions(pos, list);
            }
        }
        MoveCategory::All => {
            if in_check {
                generate_evasions(pos, list);
            } else {
                generate_non_evasions(pos, list);
            }
        }
        MoveCategory::Captures => {
            if in_check {
                let mut evasions = MoveList::new();
                generate_evasions(pos, &mut evasions);
                for &m in evasions.iter().filter(|&&m| is_capture(pos, m)) {
                    list.push(m);
                }
            } else {
                let target = pos.pieces_c(!pos.side_to_move());
                generate_non_king_moves(pos, list, target);
                generate_king_moves(pos, list, target);
            }
        }
        MoveCategory::Drops => {
            if !in_check {
                generate_drops(pos, list, pos.empties());
            } else if let Some(ksq) = pos.king_square(pos.side_to_move()) {
                let checkers = pos.checkers();
                if !checkers.more_than_one() {
                    generate_drops(pos, list, between_bb(checkers.lsb_unchecked(), ksq));
                }
            }
        }
    }
}

/// 指定種別の合法手を新しいリストで返す
pub fn generate_moves(pos: &Position, category: MoveCategory) -> MoveList {
    let mut list = MoveList::new();
    generate(pos, category, &mut list);
    list
}

/// 合法手の木の末端数を数える（生成器の検証用）
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let list = generate_moves(pos, MoveCategory::All);
    if depth == 1 {
        return list.len() as u64;
    }

    let mut nodes = 0;
    for &m in list.iter() {
        let gives_check = pos.gives_check(m);
        pos.do_move(m, gives_check);
        nodes += perft(pos, depth - 1);
        pos.undo_move(m);
    }
    nodes
}
