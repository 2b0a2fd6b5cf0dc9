//! 合法性判定
//!
//! 生成器が作った疑似合法手（駒の利きに沿った手）について、
//! 自殺手・pin・王手放置・二歩・打ち歩詰めを判定する。

use crate::bitboard::{Bitboard, between_bb, king_effect, line_bb, pawn_effect};
use crate::position::Position;
use crate::types::{Move, MoveParseError, PieceType, Square};

use super::generator::generate_moves;
use super::types::MoveCategory;

impl Position {
    /// 疑似合法手が合法かどうか
    pub fn is_legal(&self, m: Move) -> bool {
        let us = self.side_to_move();
        let to = m.to();

        if m.is_drop() {
            if self.piece_on(to).is_some() || !self.hand(us).has(m.drop_piece_type()) {
                return false;
            }
            if !self.resolves_check(to) {
                return false;
            }
            return m.drop_piece_type() != PieceType::Pawn || self.is_legal_pawn_drop(to);
        }

        let from = m.from();
        let to_pc = self.piece_on(to);
        // 自駒・敵玉は取れない
        if to_pc.is_some() && (to_pc.color() == us || to_pc.piece_type() == PieceType::King) {
            return false;
        }

        let Some(ksq) = self.king_square(us) else {
            return true;
        };

        if from == ksq {
            // 玉を除いた盤面で移動先に敵の利きがないこと
            let occ = self.occupied() ^ Bitboard::from_square(from);
            return (self.attackers_to_occ(to, occ) & self.pieces_c(!us)).is_empty();
        }

        if !self.resolves_check(to) {
            return false;
        }

        // pinされた駒は玉との直線上しか動けない
        if self.pinned_pieces(us).contains(from) {
            return line_bb(ksq, from).contains(to);
        }

        true
    }

    /// 玉以外の駒が to に来ることで王手が解消されるか（王手されていなければ常に真）
    fn resolves_check(&self, to: Square) -> bool {
        let checkers = self.checkers();
        if checkers.is_empty() {
            return true;
        }
        if checkers.more_than_one() {
            return false;
        }
        let Some(ksq) = self.king_square(self.side_to_move()) else {
            return true;
        };
        let checker_sq = checkers.lsb_unchecked();
        to == checker_sq || between_bb(checker_sq, ksq).contains(to)
    }

    /// 歩打ちの合法性（二歩・打ち歩詰め）
    fn is_legal_pawn_drop(&self, to: Square) -> bool {
        let us = self.side_to_move();
        if self.has_pawn_on_file(us, to.file()) {
            return false;
        }

        match self.king_square(!us) {
            Some(them_king) if pawn_effect(us, to).contains(them_king) => {
                !self.is_pawn_drop_mate(to, them_king)
            }
            _ => true,
        }
    }

    /// 玉頭への歩打ちが詰みになるか
    ///
    /// 歩を取る手（玉以外は pin を考慮、玉は歩に利きがなければ取れる）と
    /// 玉の逃げ道がすべてなければ打ち歩詰め。
    fn is_pawn_drop_mate(&self, to: Square, them_king: Square) -> bool {
        let us = self.side_to_move();
        let them = !us;
        let occ_with_pawn = self.occupied() | Bitboard::from_square(to);

        // 歩に自駒の利きがなければ玉で取れる
        if (self.attackers_to_occ(to, occ_with_pawn) & self.pieces_c(us)).is_empty() {
            return false;
        }

        // 玉以外の駒で取れるか
        let capturers = self.attackers_to_occ(to, occ_with_pawn)
            & self.pieces_c(them)
            & !self.pieces_pt(PieceType::King);
        let pinned = self.pinned_pieces(them);
        for from in capturers {
            if !pinned.contains(from) || line_bb(them_king, from).contains(to) {
                return false;
            }
        }

        // 玉の逃げ道
        let occ = occ_with_pawn ^ Bitboard::from_square(them_king);
        let escapes = king_effect(them_king) & !self.pieces_c(them) & !Bitboard::from_square(to);
        for king_to in escapes {
            if (self.attackers_to_occ(king_to, occ) & self.pieces_c(us)).is_empty() {
                return false;
            }
        }

        true
    }

    /// USI形式の指し手をこの局面の合法手（駒情報つき）に変換
    pub fn move_from_usi(&self, text: &str) -> Result<Move, MoveParseError> {
        let parsed = Move::from_usi(text)?;
        generate_moves(self, MoveCategory::All)
            .iter()
            .copied()
            .find(|m| m.without_piece() == parsed)
            .ok_or_else(|| MoveParseError::Illegal(text.to_string()))
    }
}
