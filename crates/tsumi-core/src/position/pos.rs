//! 局面（Position）

use std::fmt;

use crate::bitboard::{
    Bitboard, FILE_BB, between_bb, bishop_effect, dragon_effect, gold_effect, horse_effect,
    king_effect, knight_effect, lance_effect, line_bb, pawn_effect, rook_effect, silver_effect,
};
use crate::types::{Color, File, Hand, Move, Piece, PieceType, Square};

use super::state::StateInfo;

/// 将棋の局面
///
/// 詰将棋の局面を扱うため、玉のない手番があってもよい。
/// その手番について王手・pin・王手升の情報は常に空になる。
#[derive(Clone)]
pub struct Position {
    // === 盤面 ===
    /// 各マスの駒 [Square]
    pub(super) board: [Piece; Square::NUM],
    /// 駒種別Bitboard [PieceType]
    pub(super) by_type: [Bitboard; PieceType::NUM + 1],
    /// 先後別Bitboard
    pub(super) by_color: [Bitboard; Color::NUM],

    // === 手駒 ===
    /// 手駒 [Color]
    pub(super) hand: [Hand; Color::NUM],

    // === 状態 ===
    /// 現在の状態
    pub(super) state: Box<StateInfo>,
    /// 手数（SFEN の手数欄）
    pub(super) game_ply: i32,
    /// 手番
    pub(super) side_to_move: Color,
    /// 玉の位置 [Color]
    pub(super) king_square: [Option<Square>; Color::NUM],
}

impl Position {
    // ========== 局面設定 ==========

    /// 空の局面を生成
    pub fn new() -> Self {
        Position {
            board: [Piece::NONE; Square::NUM],
            by_type: [Bitboard::EMPTY; PieceType::NUM + 1],
            by_color: [Bitboard::EMPTY; Color::NUM],
            hand: [Hand::EMPTY; Color::NUM],
            state: Box::new(StateInfo::new()),
            game_ply: 1,
            side_to_move: Color::Black,
            king_square: [None; Color::NUM],
        }
    }

    // ========== 盤面アクセス ==========

    /// 指定マスの駒を取得
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Piece {
        self.board[sq.index()]
    }

    /// 全駒のBitboard（占有）
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.by_color[Color::Black.index()] | self.by_color[Color::White.index()]
    }

    /// 空きマスのBitboard
    #[inline]
    pub fn empties(&self) -> Bitboard {
        !self.occupied()
    }

    /// 指定駒種のBitboard
    #[inline]
    pub fn pieces_pt(&self, pt: PieceType) -> Bitboard {
        self.by_type[pt as usize]
    }

    /// 指定手番の駒のBitboard
    #[inline]
    pub fn pieces_c(&self, c: Color) -> Bitboard {
        self.by_color[c.index()]
    }

    /// 指定手番・駒種のBitboard
    #[inline]
    pub fn pieces(&self, c: Color, pt: PieceType) -> Bitboard {
        self.by_color[c.index()] & self.by_type[pt as usize]
    }

    /// 金と同じ動きをする駒（金、と、成香、成桂、成銀）
    #[inline]
    pub fn golds(&self) -> Bitboard {
        self.pieces_pt(PieceType::Gold)
            | self.pieces_pt(PieceType::ProPawn)
            | self.pieces_pt(PieceType::ProLance)
            | self.pieces_pt(PieceType::ProKnight)
            | self.pieces_pt(PieceType::ProSilver)
    }

    /// 角・馬
    #[inline]
    pub fn bishops_horses(&self) -> Bitboard {
        self.pieces_pt(PieceType::Bishop) | self.pieces_pt(PieceType::Horse)
    }

    /// 飛・龍
    #[inline]
    pub fn rooks_dragons(&self) -> Bitboard {
        self.pieces_pt(PieceType::Rook) | self.pieces_pt(PieceType::Dragon)
    }

    /// 手駒を取得
    #[inline]
    pub fn hand(&self, c: Color) -> Hand {
        self.hand[c.index()]
    }

    /// 玉の位置を取得（玉がなければNone）
    #[inline]
    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.king_square[c.index()]
    }

    /// 手番を取得
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// 手数を取得
    #[inline]
    pub fn game_ply(&self) -> i32 {
        self.game_ply
    }

    /// 現在の状態を取得
    #[inline]
    pub fn state(&self) -> &StateInfo {
        &self.state
    }

    /// 指定筋に指定手番の歩があるか（二歩判定用）
    #[inline]
    pub fn has_pawn_on_file(&self, c: Color, file: File) -> bool {
        (self.pieces(c, PieceType::Pawn) & FILE_BB[file.index()]).is_not_empty()
    }

    // ========== 利き計算 ==========

    /// 指定マスに利いている駒（全手番）
    pub fn attackers_to(&self, sq: Square) -> Bitboard {
        self.attackers_to_occ(sq, self.occupied())
    }

    /// 指定マスに利いている駒（占有指定）
    ///
    /// 各駒種の利きを sq から逆向きに求め、その位置にある駒を集める。
    pub fn attackers_to_occ(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let golds = self.golds();
        let mut result = Bitboard::EMPTY;
        for c in Color::ALL {
            let them = !c;
            let step = (pawn_effect(them, sq) & self.pieces_pt(PieceType::Pawn))
                | (knight_effect(them, sq) & self.pieces_pt(PieceType::Knight))
                | (silver_effect(them, sq) & self.pieces_pt(PieceType::Silver))
                | (gold_effect(them, sq) & golds)
                | (lance_effect(them, sq, occupied) & self.pieces_pt(PieceType::Lance));
            result |= step & self.pieces_c(c);
        }

        // 先後対称な利き
        result
            | (king_effect(sq)
                & (self.pieces_pt(PieceType::King)
                    | self.pieces_pt(PieceType::Horse)
                    | self.pieces_pt(PieceType::Dragon)))
            | (bishop_effect(sq, occupied) & self.bishops_horses())
            | (rook_effect(sq, occupied) & self.rooks_dragons())
    }

    /// 指定マスに利いている指定手番の駒
    #[inline]
    pub fn attackers_to_c(&self, sq: Square, c: Color) -> Bitboard {
        self.attackers_to_occ(sq, self.occupied()) & self.pieces_c(c)
    }

    /// 指定手番の駒が指定マスに利いているか
    #[inline]
    pub fn is_attacked_by(&self, sq: Square, c: Color) -> bool {
        self.attackers_to_c(sq, c).is_not_empty()
    }

    /// 自玉と敵の遠方駒の間にある唯一の駒
    #[inline]
    pub fn blockers_for_king(&self, c: Color) -> Bitboard {
        self.state.blockers_for_king[c.index()]
    }

    /// 手番 c の駒を pin している相手の遠方駒
    #[inline]
    pub fn pinners(&self, c: Color) -> Bitboard {
        self.state.pinners[c.index()]
    }

    /// 自玉に pin されている駒
    #[inline]
    pub fn pinned_pieces(&self, c: Color) -> Bitboard {
        self.blockers_for_king(c) & self.pieces_c(c)
    }

    /// 王手している駒
    #[inline]
    pub fn checkers(&self) -> Bitboard {
        self.state.checkers
    }

    /// 王手されているか
    #[inline]
    pub fn in_check(&self) -> bool {
        self.state.checkers.is_not_empty()
    }

    /// 指定駒種で王手となる升
    #[inline]
    pub fn check_squares(&self, pt: PieceType) -> Bitboard {
        self.state.check_squares[pt as usize]
    }

    /// 直前の指し手で取った駒
    #[inline]
    pub fn captured_piece(&self) -> Piece {
        self.state.captured_piece
    }

    /// 直前の指し手
    #[inline]
    pub fn last_move(&self) -> Move {
        self.state.last_move
    }

    // ========== 内部操作 ==========

    /// 盤面に駒を置く
    pub(super) fn put_piece(&mut self, pc: Piece, sq: Square) {
        debug_assert!(self.board[sq.index()].is_none());
        self.board[sq.index()] = pc;
        self.by_type[pc.piece_type() as usize].set(sq);
        self.by_color[pc.color().index()].set(sq);
    }

    /// 盤面から駒を取り除く
    fn remove_piece(&mut self, sq: Square) {
        let pc = self.board[sq.index()];
        debug_assert!(pc.is_some());
        self.board[sq.index()] = Piece::NONE;
        self.by_type[pc.piece_type() as usize].clear(sq);
        self.by_color[pc.color().index()].clear(sq);
    }

    /// pin駒とpinしている駒を更新
    pub(super) fn update_blockers_and_pinners(&mut self) {
        let occupied = self.occupied();
        for c in Color::ALL {
            let mut blockers = Bitboard::EMPTY;
            let mut pinners = Bitboard::EMPTY;

            if let Some(ksq) = self.king_square(c) {
                let them = !c;
                // 駒がないものとして玉から逆向きに敵の遠方駒を探す
                let snipers = (lance_effect(c, ksq, Bitboard::EMPTY)
                    & self.pieces(them, PieceType::Lance))
                    | (bishop_effect(ksq, Bitboard::EMPTY)
                        & self.bishops_horses()
                        & self.pieces_c(them))
                    | (rook_effect(ksq, Bitboard::EMPTY)
                        & self.rooks_dragons()
                        & self.pieces_c(them));

                for sniper_sq in snipers {
                    let between = between_bb(ksq, sniper_sq) & occupied;
                    if between.is_not_empty() && !between.more_than_one() {
                        blockers |= between;
                        if (between & self.pieces_c(c)).is_not_empty() {
                            pinners.set(sniper_sq);
                        }
                    }
                }
            }

            self.state.blockers_for_king[c.index()] = blockers;
            self.state.pinners[c.index()] = pinners;
        }
    }

    /// 王手マスを更新
    pub(super) fn update_check_squares(&mut self) {
        let them = !self.side_to_move;
        let mut squares = [Bitboard::EMPTY; PieceType::NUM + 1];

        if let Some(ksq) = self.king_square(them) {
            let occupied = self.occupied();
            let gold = gold_effect(them, ksq);
            squares[PieceType::Pawn as usize] = pawn_effect(them, ksq);
            squares[PieceType::Lance as usize] = lance_effect(them, ksq, occupied);
            squares[PieceType::Knight as usize] = knight_effect(them, ksq);
            squares[PieceType::Silver as usize] = silver_effect(them, ksq);
            squares[PieceType::Bishop as usize] = bishop_effect(ksq, occupied);
            squares[PieceType::Rook as usize] = rook_effect(ksq, occupied);
            squares[PieceType::Gold as usize] = gold;
            // 玉で王手はない
            squares[PieceType::ProPawn as usize] = gold;
            squares[PieceType::ProLance as usize] = gold;
            squares[PieceType::ProKnight as usize] = gold;
            squares[PieceType::ProSilver as usize] = gold;
            squares[PieceType::Horse as usize] = horse_effect(ksq, occupied);
            squares[PieceType::Dragon as usize] = dragon_effect(ksq, occupied);
        }

        self.state.check_squares = squares;
    }

    /// 手番側の玉への王手駒を計算し直す
    pub(super) fn compute_checkers(&self) -> Bitboard {
        let us = self.side_to_move;
        match self.king_square(us) {
            Some(ksq) => self.attackers_to_c(ksq, !us),
            None => Bitboard::EMPTY,
        }
    }

    // ========== 指し手実行 ==========

    /// 指し手を実行
    ///
    /// `gives_check` は `self.gives_check(m)` の結果を渡す。
    pub fn do_move(&mut self, m: Move, gives_check: bool) {
        debug_assert_eq!(gives_check, self.gives_check(m), "gives_check mismatch: {m}");
        let us = self.side_to_move;
        let them = !us;

        let mut new_state = Box::new(StateInfo::new());
        self.game_ply += 1;

        if m.is_drop() {
            let pt = m.drop_piece_type();
            self.hand[us.index()] = self.hand[us.index()].sub(pt);
            self.put_piece(Piece::new(us, pt), m.to());
        } else {
            let from = m.from();
            let to = m.to();
            let pc = self.piece_on(from);
            let captured = self.piece_on(to);

            if captured.is_some() {
                debug_assert!(captured.piece_type() != PieceType::King, "king captured: {m}");
                self.remove_piece(to);
                // 手駒に追加（成駒は生駒に戻す）
                let captured_pt = captured.piece_type().unpromote();
                self.hand[us.index()] = self.hand[us.index()].add(captured_pt);
            }
            new_state.captured_piece = captured;

            self.remove_piece(from);
            let moved_pc = if m.is_promote() { pc.promote().unwrap_or(pc) } else { pc };
            self.put_piece(moved_pc, to);

            if pc.piece_type() == PieceType::King {
                self.king_square[us.index()] = Some(to);
            }
        }

        self.side_to_move = them;
        new_state.last_move = m;
        let old_state = std::mem::replace(&mut self.state, new_state);
        self.state.previous = Some(old_state);

        self.state.checkers = if gives_check { self.compute_checkers() } else { Bitboard::EMPTY };
        self.update_blockers_and_pinners();
        self.update_check_squares();
    }

    /// 指し手を戻す
    ///
    /// 直前に `do_move` した指し手を渡す。
    pub fn undo_move(&mut self, m: Move) {
        debug_assert_eq!(self.state.last_move, m, "undo_move with a different move");
        self.side_to_move = !self.side_to_move;
        self.game_ply -= 1;
        let us = self.side_to_move;

        if m.is_drop() {
            let pt = m.drop_piece_type();
            self.remove_piece(m.to());
            self.hand[us.index()] = self.hand[us.index()].add(pt);
        } else {
            let from = m.from();
            let to = m.to();
            let moved_pc = self.piece_on(to);
            let original_pc = if m.is_promote() { moved_pc.unpromote() } else { moved_pc };

            self.remove_piece(to);
            self.put_piece(original_pc, from);

            if original_pc.piece_type() == PieceType::King {
                self.king_square[us.index()] = Some(from);
            }

            let captured = self.state.captured_piece;
            if captured.is_some() {
                self.put_piece(captured, to);
                let captured_pt = captured.piece_type().unpromote();
                self.hand[us.index()] = self.hand[us.index()].sub(captured_pt);
            }
        }

        match self.state.previous.take() {
            Some(previous) => self.state = previous,
            None => debug_assert!(false, "undo_move without a matching do_move"),
        }
    }

    /// 王手になるかどうか
    ///
    /// 直接王手（動いた駒が玉に利く）と開き王手（遠方駒の前から退く）を判定する。
    pub fn gives_check(&self, m: Move) -> bool {
        let to = m.to();

        if m.is_drop() {
            return self.check_squares(m.drop_piece_type()).contains(to);
        }

        let from = m.from();
        let pc = self.piece_on(from);
        let pt = pc.piece_type();
        let moved_pt = if m.is_promote() { pt.promote().unwrap_or(pt) } else { pt };
        if self.check_squares(moved_pt).contains(to) {
            return true;
        }

        // 開き王手：fromが相手玉に対するblockerで、移動後に直線上から外れる
        let them = !self.side_to_move;
        match self.king_square(them) {
            Some(ksq) => {
                self.blockers_for_king(them).contains(from) && !line_bb(ksq, from).contains(to)
            }
            None => false,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sfen())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position").field("sfen", &self.to_sfen()).finish()
    }
}
