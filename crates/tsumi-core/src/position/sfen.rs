//! SFEN形式の解析・出力

use thiserror::Error;

use crate::types::{Color, File, Hand, Piece, PieceType, Rank, Square};

use super::pos::Position;

/// 平手初期局面のSFEN
pub const SFEN_HIRATE: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

/// SFENパースエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SfenError {
    /// 盤面の形式が不正
    #[error("invalid board: {0}")]
    Board(String),
    /// 手番の形式が不正
    #[error("invalid side to move: {0}")]
    SideToMove(String),
    /// 手駒の形式が不正
    #[error("invalid hand: {0}")]
    Hand(String),
    /// 手数の形式が不正
    #[error("invalid ply: {0}")]
    Ply(String),
    /// 同じ手番の玉が2枚以上ある
    #[error("more than one king for {0:?}")]
    DuplicateKing(Color),
    /// 盤上と手駒を合わせて1組の駒数を超えている
    #[error("too many pieces of {0:?}")]
    TooManyPieces(PieceType),
}

/// 手駒の出力順（飛角金銀桂香歩）
const HAND_ORDER: [PieceType; 7] = [
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Gold,
    PieceType::Silver,
    PieceType::Knight,
    PieceType::Lance,
    PieceType::Pawn,
];

impl Position {
    /// SFEN文字列から局面を生成
    pub fn from_sfen(sfen: &str) -> Result<Position, SfenError> {
        let mut pos = Position::new();
        pos.set_sfen(sfen)?;
        Ok(pos)
    }

    /// SFEN文字列から局面を設定
    ///
    /// 先頭の `sfen ` は読み飛ばす。手数欄は省略でき、省略時は 1。
    /// 失敗した場合、局面は空の状態になる。
    pub fn set_sfen(&mut self, sfen: &str) -> Result<(), SfenError> {
        *self = Position::new();

        let sfen = sfen.trim();
        let sfen = sfen.strip_prefix("sfen ").unwrap_or(sfen);
        let parts: Vec<&str> = sfen.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(SfenError::Board(format!(
                "expected at least 3 fields, got {}",
                parts.len()
            )));
        }

        let result = self.parse_fields(&parts);
        if result.is_err() {
            *self = Position::new();
        }
        result
    }

    fn parse_fields(&mut self, parts: &[&str]) -> Result<(), SfenError> {
        self.parse_board(parts[0])?;

        self.side_to_move = match parts[1] {
            "b" => Color::Black,
            "w" => Color::White,
            other => {
                return Err(SfenError::SideToMove(format!("expected 'b' or 'w', got '{other}'")));
            }
        };

        self.parse_hand(parts[2])?;
        self.check_piece_counts()?;

        self.game_ply = match parts.get(3) {
            Some(ply) => ply.parse().map_err(|_| SfenError::Ply(ply.to_string()))?,
            None => 1,
        };

        self.update_blockers_and_pinners();
        self.update_check_squares();
        self.state.checkers = self.compute_checkers();
        Ok(())
    }

    /// 現局面のSFEN文字列を取得
    pub fn to_sfen(&self) -> String {
        let mut result = String::new();

        for (i, rank) in Rank::ALL.into_iter().enumerate() {
            if i > 0 {
                result.push('/');
            }
            let mut empty_count = 0;
            for file in File::ALL.into_iter().rev() {
                let pc = self.piece_on(Square::new(file, rank));
                if pc.is_none() {
                    empty_count += 1;
                    continue;
                }
                if empty_count > 0 {
                    result.push_str(&empty_count.to_string());
                    empty_count = 0;
                }
                result.push_str(&piece_to_sfen(pc));
            }
            if empty_count > 0 {
                result.push_str(&empty_count.to_string());
            }
        }

        result.push(' ');
        result.push(self.side_to_move.to_sfen_char());

        result.push(' ');
        let hand_str = self.hand_to_sfen();
        result.push_str(if hand_str.is_empty() { "-" } else { &hand_str });

        result.push(' ');
        result.push_str(&self.game_ply.to_string());
        result
    }

    /// 盤面部分をパース
    fn parse_board(&mut self, board_str: &str) -> Result<(), SfenError> {
        let ranks: Vec<&str> = board_str.split('/').collect();
        if ranks.len() != Rank::NUM {
            return Err(SfenError::Board(format!("expected 9 ranks, got {}", ranks.len())));
        }

        for (rank, rank_str) in Rank::ALL.into_iter().zip(ranks) {
            // 9筋から1筋へ向かって読む
            let mut remaining = File::NUM;
            let mut promoted = false;

            for c in rank_str.chars() {
                if c == '+' {
                    if promoted {
                        return Err(SfenError::Board(format!("double '+' in rank '{rank_str}'")));
                    }
                    promoted = true;
                    continue;
                }

                if let Some(digit) = c.to_digit(10) {
                    if promoted || digit == 0 || digit as usize > remaining {
                        return Err(SfenError::Board(format!("bad square count in '{rank_str}'")));
                    }
                    remaining -= digit as usize;
                    continue;
                }

                if remaining == 0 {
                    return Err(SfenError::Board(format!("too many pieces in '{rank_str}'")));
                }
                let pc = sfen_char_to_piece(c, promoted)?;
                let file = File::ALL[remaining - 1];
                let sq = Square::new(file, rank);

                if pc.piece_type() == PieceType::King {
                    let color = pc.color();
                    if self.king_square[color.index()].is_some() {
                        return Err(SfenError::DuplicateKing(color));
                    }
                    self.king_square[color.index()] = Some(sq);
                }
                self.put_piece(pc, sq);

                promoted = false;
                remaining -= 1;
            }

            if promoted || remaining != 0 {
                return Err(SfenError::Board(format!("rank '{rank_str}' does not cover 9 files")));
            }
        }

        Ok(())
    }

    /// 手駒部分をパース
    fn parse_hand(&mut self, hand_str: &str) -> Result<(), SfenError> {
        if hand_str == "-" {
            return Ok(());
        }

        let mut count: Option<u32> = None;
        for c in hand_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                let n = count.unwrap_or(0) * 10 + digit;
                if n > 99 {
                    return Err(SfenError::Hand(format!("count too large in '{hand_str}'")));
                }
                count = Some(n);
                continue;
            }

            let (color, pt) = sfen_hand_char_to_piece(c)?;
            let n = count.take().unwrap_or(1);
            let hand = self.hand[color.index()];
            let total = hand.count(pt) + n;
            if n == 0 || total > Hand::max_count(pt) {
                return Err(SfenError::Hand(format!("bad count {n} for '{c}'")));
            }
            self.hand[color.index()] = hand.set(pt, total);
        }

        if count.is_some() {
            return Err(SfenError::Hand(format!("trailing count in '{hand_str}'")));
        }
        Ok(())
    }

    /// 盤上と両者の手駒を合わせた枚数が駒種ごとに1組を超えないか
    fn check_piece_counts(&self) -> Result<(), SfenError> {
        for pt in HAND_ORDER {
            let on_board = self
                .occupied()
                .into_iter()
                .filter(|&sq| self.piece_on(sq).piece_type().unpromote() == pt)
                .count() as u32;
            let in_hand: u32 = Color::ALL.iter().map(|c| self.hand[c.index()].count(pt)).sum();
            if on_board + in_hand > Hand::max_count(pt) {
                return Err(SfenError::TooManyPieces(pt));
            }
        }
        Ok(())
    }

    /// 手駒をSFEN文字列に変換（先手→後手、飛角金銀桂香歩の順）
    fn hand_to_sfen(&self) -> String {
        let mut result = String::new();
        for color in Color::ALL {
            let hand = self.hand[color.index()];
            for pt in HAND_ORDER {
                let cnt = hand.count(pt);
                if cnt == 0 {
                    continue;
                }
                if cnt > 1 {
                    result.push_str(&cnt.to_string());
                }
                let c = pt.to_usi_char().unwrap_or('?');
                result.push(if color == Color::White { c.to_ascii_lowercase() } else { c });
            }
        }
        result
    }
}

/// 駒をSFEN文字列に変換
fn piece_to_sfen(pc: Piece) -> String {
    let pt = pc.piece_type();
    let c = pt.unpromote().to_usi_char().unwrap_or('?');
    let c = if pc.color() == Color::White { c.to_ascii_lowercase() } else { c };
    if pt.is_promoted() { format!("+{c}") } else { c.to_string() }
}

/// SFEN文字を駒に変換
fn sfen_char_to_piece(c: char, promoted: bool) -> Result<Piece, SfenError> {
    let color = if c.is_ascii_uppercase() { Color::Black } else { Color::White };
    let base_pt = PieceType::from_usi_char(c.to_ascii_uppercase())
        .ok_or_else(|| SfenError::Board(format!("unknown piece '{c}'")))?;

    let pt = if promoted {
        base_pt.promote().ok_or_else(|| SfenError::Board(format!("cannot promote '{c}'")))?
    } else {
        base_pt
    };

    Ok(Piece::new(color, pt))
}

/// SFEN手駒文字を駒種に変換
fn sfen_hand_char_to_piece(c: char) -> Result<(Color, PieceType), SfenError> {
    let color = if c.is_ascii_uppercase() { Color::Black } else { Color::White };
    match PieceType::from_usi_char(c.to_ascii_uppercase()) {
        Some(PieceType::King) | None => Err(SfenError::Hand(format!("unknown hand piece '{c}'"))),
        Some(pt) => Ok((color, pt)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hirate() {
        let pos = Position::from_sfen(SFEN_HIRATE).unwrap();

        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.game_ply(), 1);
        assert_eq!(pos.piece_on(Square::SQ_99), Piece::B_LANCE);
        assert_eq!(pos.piece_on(Square::new(File::File8, Rank::Rank8)), Piece::B_BISHOP);
        assert_eq!(pos.piece_on(Square::new(File::File2, Rank::Rank8)), Piece::B_ROOK);
        assert_eq!(pos.piece_on(Square::new(File::File7, Rank::Rank3)), Piece::W_PAWN);
        assert_eq!(pos.king_square(Color::Black), Some(Square::new(File::File5, Rank::Rank9)));
        assert_eq!(pos.king_square(Color::White), Some(Square::new(File::File5, Rank::Rank1)));
        assert!(pos.hand(Color::Black).is_empty());
        assert_eq!(pos.occupied().count(), 40);
        assert!(!pos.in_check());
    }

    #[test]
    fn test_sfen_roundtrip() {
        let test_cases = [
            SFEN_HIRATE,
            "8l/1l+R2P3/p2pBG1pp/kps1p4/Nn1P2G2/P1P1P2PP/1PS6/1KSG3+r1/LN2+p3L w Sbgn3p 124",
            "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w RGgsn5p 1",
            "4k4/9/9/9/9/9/9/9/9 b 2R2B4G4S4N4L18P 1",
        ];

        for sfen in test_cases {
            let pos = Position::from_sfen(sfen).unwrap();
            assert_eq!(pos.to_sfen(), sfen, "SFEN roundtrip failed for: {sfen}");
        }
    }

    #[test]
    fn test_sfen_optional_prefix_and_ply() {
        let pos = Position::from_sfen("sfen 4k4/9/9/9/9/9/9/9/4K4 w 2P").unwrap();
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.game_ply(), 1);
        assert_eq!(pos.hand(Color::Black).count(PieceType::Pawn), 2);
    }

    #[test]
    fn test_sfen_check_state() {
        // 先手番、先手玉5九に後手金5八から王手
        let pos = Position::from_sfen("4k4/9/9/9/9/9/9/4g4/4K4 b - 1").unwrap();
        assert!(pos.in_check());
        assert_eq!(pos.checkers().count(), 1);
    }

    #[test]
    fn test_sfen_without_king() {
        let pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/9 b G 1").unwrap();
        assert_eq!(pos.king_square(Color::Black), None);
        assert!(!pos.in_check());
    }

    #[test]
    fn test_sfen_errors() {
        assert!(matches!(Position::from_sfen("invalid"), Err(SfenError::Board(_))));
        assert!(matches!(
            Position::from_sfen("4k4/9/9/9/9/9/9/9 b - 1"),
            Err(SfenError::Board(_))
        ));
        assert!(matches!(
            Position::from_sfen("4k5/9/9/9/9/9/9/9/4K4 b - 1"),
            Err(SfenError::Board(_))
        ));
        assert!(matches!(
            Position::from_sfen("4k4/9/9/9/4+G4/9/9/9/4K4 b - 1"),
            Err(SfenError::Board(_))
        ));
        assert!(matches!(
            Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 x - 1"),
            Err(SfenError::SideToMove(_))
        ));
        assert!(matches!(
            Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b K 1"),
            Err(SfenError::Hand(_))
        ));
        assert!(matches!(
            Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b 3R 1"),
            Err(SfenError::Hand(_))
        ));
        assert!(matches!(
            Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 w 19p 1"),
            Err(SfenError::Hand(_))
        ));
        assert!(matches!(
            Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b - x"),
            Err(SfenError::Ply(_))
        ));
        assert_eq!(
            Position::from_sfen("4k4/9/9/9/9/9/9/9/3KK4 b - 1").unwrap_err(),
            SfenError::DuplicateKing(Color::Black)
        );
    }

    #[test]
    fn test_sfen_piece_set_limit() {
        // 盤上の飛と手駒の飛で3枚
        assert_eq!(
            Position::from_sfen("4k4/4R4/9/9/9/9/9/9/4K4 w 2r 1").unwrap_err(),
            SfenError::TooManyPieces(PieceType::Rook)
        );
        // 成駒は生駒として数える
        assert_eq!(
            Position::from_sfen("4k4/9/9/9/9/9/9/+P8/4K4 b 9P9p 1").unwrap_err(),
            SfenError::TooManyPieces(PieceType::Pawn)
        );
        // ちょうど1組なら受け付ける
        assert!(Position::from_sfen("4k4/4R4/9/9/9/9/9/9/4K4 w r 1").is_ok());
    }

    #[test]
    fn test_capture_with_full_hand_keeps_other_fields() {
        // 後手が残りの歩をすべて持った状態で5二の歩を取る
        let mut pos = Position::from_sfen("4k4/4P4/9/9/9/9/9/9/4K4 w 17p 1").unwrap();
        let m = pos.move_from_usi("5a5b").unwrap();
        pos.do_move(m, pos.gives_check(m));
        let hand = pos.hand(Color::White);
        assert_eq!(hand.count(PieceType::Pawn), 18);
        assert_eq!(hand.count(PieceType::Lance), 0);
        assert_eq!(pos.to_sfen(), "9/4k4/9/9/9/9/9/9/4K4 b 18p 2");
    }

    #[test]
    fn test_piece_to_sfen() {
        assert_eq!(piece_to_sfen(Piece::B_PAWN), "P");
        assert_eq!(piece_to_sfen(Piece::W_PAWN), "p");
        assert_eq!(piece_to_sfen(Piece::B_PRO_PAWN), "+P");
        assert_eq!(piece_to_sfen(Piece::W_HORSE), "+b");
    }
}
