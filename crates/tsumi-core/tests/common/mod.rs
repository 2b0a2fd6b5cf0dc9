//! 統合テスト共通の局面集と、生成器に頼らない参照実装

#![allow(dead_code)]

use tsumi_core::bitboard::piece_effect;
use tsumi_core::types::Rank;
use tsumi_core::{
    Color, Move, MoveCategory, Piece, PieceType, Position, SFEN_HIRATE, Square, generate_moves,
};

/// 詰将棋の問題集（番号, SFEN）
pub const PROBLEMS: [(usize, &str); 11] = [
    (1, "4+R4/4n4/4S4/4k4/4p4/4NL3/9/9/8K b RBGSNLPb3g2sn2l16p 1"),
    (2, "4kp3/4g4/9/2N1N4/9/5L3/9/9/4+R3K b RBGSNLPb2g3sn2l16p 1"),
    (3, "4B3S/9/6+Rpk/8p/9/9/9/9/8K b RBGSNLP3g2s3n3l15p 1"),
    (4, "2S6/9/2kp+R3+R/9/9/2N6/9/9/8K b BGSNLPb3g2s2n3l16p 1"),
    (5, "4g2B+R/2Spk4/9/9/2N6/9/9/9/5L2K b RBGSNLP2g2s2n2l16p 1"),
    (6, "8S/9/6+Rpk/8p/9/9/9/9/8K b RBGSNLPb3g2s3n3l15p 1"),
    (7, "4g4/2Spk4/9/4B4/2N6/9/9/9/5L2K b RBGSNLPr2g2s2n2l16p 1"),
    (8, "4g4/1bSpk1S2/9/9/2N6/5L3/9/9/8K b 2rb3g2s3n3l17p 1"),
    (9, "4g4/3pk4/9/4B4/2N6/5L3/9/9/8K b RBGSNLPr2g3s2n2l16p 1"),
    (10, SFEN_HIRATE),
    (11, SFEN_FESTIVAL),
];

/// 合法手の多い実戦の中盤局面
pub const SFEN_FESTIVAL: &str =
    "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w RGgsn5p 1";

pub fn position(sfen: &str) -> Position {
    Position::from_sfen(sfen).unwrap_or_else(|e| panic!("invalid sfen {sfen}: {e}"))
}

pub fn usi_moves(moves: &[Move]) -> Vec<String> {
    moves.iter().map(|m| m.to_usi()).collect()
}

pub fn sorted_u32(moves: &[Move]) -> Vec<u32> {
    let mut v: Vec<u32> = moves.iter().map(|m| m.to_u32()).collect();
    v.sort_unstable();
    v
}

/// 行き所のない升か（相対段で判定）
fn is_dead_square(us: Color, pt: PieceType, to: Square) -> bool {
    let rank = to.rank().relative(us);
    match pt {
        PieceType::Pawn | PieceType::Lance => rank == Rank::Rank1,
        PieceType::Knight => rank == Rank::Rank1 || rank == Rank::Rank2,
        _ => false,
    }
}

/// 利きに沿った全ての手を作り、実際に指して自玉が取られないものだけを残す
///
/// 歩打ちは指した後に相手の合法手がなければ打ち歩詰めとして除く。
pub fn reference_legal_moves(pos: &Position) -> Vec<Move> {
    let us = pos.side_to_move();
    let them = !us;
    let mut candidates = Vec::new();

    for from in pos.pieces_c(us) {
        let pc = pos.piece_on(from);
        let pt = pc.piece_type();
        let targets = piece_effect(pt, us, from, pos.occupied()) & !pos.pieces_c(us);
        for to in targets {
            let captured = pos.piece_on(to);
            if !captured.is_none() && captured.piece_type() == PieceType::King {
                continue;
            }
            if let Some(promoted) = pc.promote()
                && (from.rank().can_promote(us) || to.rank().can_promote(us))
            {
                candidates.push(Move::new_move_with_piece(from, to, true, promoted));
            }
            if !is_dead_square(us, pt, to) {
                candidates.push(Move::new_move_with_piece(from, to, false, pc));
            }
        }
    }

    let hand = pos.hand(us);
    for pt in PieceType::HAND_PIECES {
        if !hand.has(pt) {
            continue;
        }
        for to in pos.empties() {
            if is_dead_square(us, pt, to) {
                continue;
            }
            if pt == PieceType::Pawn && pos.has_pawn_on_file(us, to.file()) {
                continue;
            }
            candidates.push(Move::new_drop_with_piece(pt, to, Piece::new(us, pt)));
        }
    }

    let mut scratch = pos.clone();
    candidates
        .into_iter()
        .filter(|&m| {
            let gives_check = scratch.gives_check(m);
            scratch.do_move(m, gives_check);
            let king_safe =
                scratch.king_square(us).is_none_or(|k| !scratch.is_attacked_by(k, them));
            let drop_pawn_mate = king_safe
                && m.is_drop()
                && m.drop_piece_type() == PieceType::Pawn
                && scratch.in_check()
                && generate_moves(&scratch, MoveCategory::All).is_empty();
            scratch.undo_move(m);
            king_safe && !drop_pawn_mate
        })
        .collect()
}
