//! 3手詰め判定

use crate::movegen::{MoveCategory, MoveList, generate, generate_checks};
use crate::position::Position;
use crate::types::Move;

use super::mate1::{can_attack, is_mate_in_one_ply};

/// 3手詰めの応手と詰め手の一例
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mate3Line {
    /// 2手目（玉方の応手）
    pub defense: Move,
    /// 3手目（応手に対する詰め手）
    pub mate: Move,
}

/// 3手詰め判定の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mate3Result {
    /// 3手以内に詰むか
    pub is_mate: bool,
    /// 初手（詰まない場合は `Move::NONE`）
    pub mate_move: Move,
    /// 初手に対する応手と詰め手（初手で応手がなくなる場合と詰まない場合は `None`）
    pub continuation: Option<Mate3Line>,
}

impl Mate3Result {
    /// 詰みなし
    pub const NO_MATE: Mate3Result =
        Mate3Result { is_mate: false, mate_move: Move::NONE, continuation: None };
}

/// 王手 `m` に対するすべての応手に1手詰めがあるか
///
/// 詰む場合は最初の応手とその詰め手を返す（応手がなければ `Some(None)`）。
fn refute_all_defenses(pos: &mut Position, m: Move) -> Option<Option<Mate3Line>> {
    pos.do_move(m, true);

    let mut defenses = MoveList::new();
    generate(pos, MoveCategory::Evasions, &mut defenses);

    let mut line = None;
    let mut escaped = false;
    for &defense in defenses.iter() {
        let gives_check = pos.gives_check(defense);
        pos.do_move(defense, gives_check);
        let mate = is_mate_in_one_ply(pos);
        pos.undo_move(defense);

        match mate {
            Some(mate) => {
                line.get_or_insert(Mate3Line { defense, mate });
            }
            None => {
                escaped = true;
                break;
            }
        }
    }

    pos.undo_move(m);
    (!escaped).then_some(line)
}

/// 3手詰めを判定する
///
/// 初手・3手目は王手だけ、2手目は全ての王手回避手を調べる。
/// 初手で応手がなくなる（1手詰め）場合も詰みとして返す。
pub fn is_mate_in_three_plies(pos: &mut Position) -> Mate3Result {
    if !can_attack(pos) {
        return Mate3Result::NO_MATE;
    }

    let mut checks = MoveList::new();
    generate_checks(pos, &mut checks);
    for &m in checks.iter() {
        if let Some(continuation) = refute_all_defenses(pos, m) {
            return Mate3Result { is_mate: true, mate_move: m, continuation };
        }
    }
    Mate3Result::NO_MATE
}
