//! 1手詰め判定

use crate::movegen::{MoveCategory, MoveList, generate, generate_checks};
use crate::position::Position;
use crate::types::{Color, Move};

/// 詰み判定を行える局面か（両方の玉がある）
///
/// 攻め方が王手されていても判定する。王手を解消しない手は
/// `generate_checks` が合法手として生成しない。
#[inline]
pub(super) fn can_attack(pos: &Position) -> bool {
    Color::ALL.iter().all(|&c| pos.king_square(c).is_some())
}

/// 王手を掛けられている手番側に合法手が1つもないか
#[inline]
pub(super) fn is_checkmated(pos: &Position) -> bool {
    debug_assert!(pos.in_check());
    let mut evasions = MoveList::new();
    generate(pos, MoveCategory::Evasions, &mut evasions);
    evasions.is_empty()
}

/// 王手 `m` を指した後に相手が詰んでいるか（局面は元に戻す）
#[inline]
pub(super) fn is_mate_after_check(pos: &mut Position, m: Move) -> bool {
    pos.do_move(m, true);
    let mate = is_checkmated(pos);
    pos.undo_move(m);
    mate
}

/// 1手詰めの詰め手を返す
///
/// 王手になる合法手だけを試し、相手の応手がなくなる手を探す。
/// 打ち歩詰めは合法手として生成されないので詰め手にならない。
pub fn is_mate_in_one_ply(pos: &mut Position) -> Option<Move> {
    if !can_attack(pos) {
        return None;
    }

    let mut checks = MoveList::new();
    generate_checks(pos, &mut checks);
    checks.iter().copied().find(|&m| is_mate_after_check(pos, m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::SFEN_HIRATE;

    fn mate1(sfen: &str) -> Option<String> {
        let mut pos = Position::from_sfen(sfen).unwrap();
        let result = is_mate_in_one_ply(&mut pos).map(|m| m.to_usi());
        assert_eq!(pos.to_sfen(), Position::from_sfen(sfen).unwrap().to_sfen());
        result
    }

    #[test]
    fn test_head_gold_mate() {
        assert_eq!(mate1("4k4/9/4P4/9/9/9/9/9/4K4 b G 1").as_deref(), Some("G*5b"));
    }

    #[test]
    fn test_no_mate() {
        assert_eq!(mate1("4k4/9/9/9/9/9/9/9/4K4 b G 1"), None);
        assert_eq!(mate1("4k4/9/4P4/9/9/9/9/9/4K4 b S 1"), None);
        assert_eq!(mate1(SFEN_HIRATE), None);
    }

    #[test]
    fn test_pawn_drop_mate_is_not_a_mate() {
        // 1二歩打ちなら詰むが打ち歩詰めの反則
        assert_eq!(mate1("8k/9/6N2/6NN1/9/9/9/9/4K4 b P 1"), None);
        // 同じ形で香なら詰み
        assert_eq!(mate1("8k/9/6N2/6NN1/9/9/9/9/4K4 b L 1").as_deref(), Some("L*1b"));
    }

    #[test]
    fn test_mate_while_in_check() {
        // 8三の金から王手されているが、8四の飛で金を取って成れば詰み
        let sfen = "g8/1k1G5/1g7/1RK1n4/9/9/9/3R5/9 b B 1";
        assert!(Position::from_sfen(sfen).unwrap().in_check());
        assert_eq!(mate1(sfen).as_deref(), Some("8d8c+"));
        // 王手を解消できない王手は詰め手にならない
        assert_eq!(mate1("4k4/9/4P4/9/9/9/9/4r4/4K4 b G 1"), None);
    }

    #[test]
    fn test_fails_closed_without_king() {
        assert_eq!(mate1("9/9/4P4/9/9/9/9/9/4K4 b G 1"), None);
        assert_eq!(mate1("4k4/9/4P4/9/9/9/9/9/9 b G 1"), None);
    }
}
