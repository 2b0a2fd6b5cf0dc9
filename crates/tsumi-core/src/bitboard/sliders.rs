//! 遠方駒（香、角、飛、馬、龍）の利き計算
//!
//! 方向ごとの「盤端までの射線」を保持し、射線上の最も近い駒で打ち切る。
//! 升のインデックスは `筋 * 9 + 段` なので、1方向に進む間インデックスは単調に変化する。
//! 増加方向なら最下位ビット、減少方向なら最上位ビットが最も近い駒になる。

use std::sync::OnceLock;

use log::debug;

use crate::types::{Color, PieceType, Square};

use super::{Bitboard, gold_effect, king_effect, knight_effect, pawn_effect, silver_effect};

/// 射線の方向（筋の増分, 段の増分）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum Direction {
    /// 段の負方向（先手の前）
    Up,
    /// 段の正方向（後手の前）
    Down,
    /// 筋の正方向
    Left,
    /// 筋の負方向
    Right,
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl Direction {
    const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::LeftUp,
        Direction::LeftDown,
        Direction::RightUp,
        Direction::RightDown,
    ];

    const ROOK: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    const BISHOP: [Direction; 4] =
        [Direction::LeftUp, Direction::LeftDown, Direction::RightUp, Direction::RightDown];

    const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (1, 0),
            Direction::Right => (-1, 0),
            Direction::LeftUp => (1, -1),
            Direction::LeftDown => (1, 1),
            Direction::RightUp => (-1, -1),
            Direction::RightDown => (-1, 1),
        }
    }

    /// この方向へ進むとインデックスが増えるか
    const fn ascending(self) -> bool {
        let (df, dr) = self.delta();
        df * 9 + dr > 0
    }
}

struct RayTable {
    /// [Direction][Square] 起点を含まない盤端までの射線
    rays: [[Bitboard; Square::NUM]; 8],
    /// [sq1 * 81 + sq2] 両端を含まない2マス間
    between: Vec<Bitboard>,
    /// [sq1 * 81 + sq2] 2マスを通る直線（盤端から盤端まで）
    line: Vec<Bitboard>,
}

static RAY_TABLE: OnceLock<RayTable> = OnceLock::new();

fn ray_table() -> &'static RayTable {
    RAY_TABLE.get_or_init(RayTable::new)
}

impl RayTable {
    fn new() -> Self {
        let mut rays = [[Bitboard::EMPTY; Square::NUM]; 8];
        for dir in Direction::ALL {
            for sq in Square::all() {
                rays[dir as usize][sq.index()] = walk(sq, dir);
            }
        }

        let mut between = vec![Bitboard::EMPTY; Square::NUM * Square::NUM];
        let mut line = vec![Bitboard::EMPTY; Square::NUM * Square::NUM];
        for sq1 in Square::all() {
            for dir in Direction::ALL {
                let opposite = Direction::ALL
                    .into_iter()
                    .find(|d| d.delta() == (-dir.delta().0, -dir.delta().1))
                    .unwrap_or(dir);
                let full = rays[dir as usize][sq1.index()]
                    | rays[opposite as usize][sq1.index()]
                    | Bitboard::from_square(sq1);
                for sq2 in rays[dir as usize][sq1.index()] {
                    let idx = sq1.index() * Square::NUM + sq2.index();
                    between[idx] = rays[dir as usize][sq1.index()]
                        & rays[opposite as usize][sq2.index()];
                    line[idx] = full;
                }
            }
        }

        debug!("slider ray tables initialized");
        RayTable { rays, between, line }
    }
}

fn walk(sq: Square, dir: Direction) -> Bitboard {
    let (df, dr) = dir.delta();
    let mut result = Bitboard::EMPTY;
    let mut file = sq.file() as i8 + df;
    let mut rank = sq.rank() as i8 + dr;
    while (0..=8).contains(&file) && (0..=8).contains(&rank) {
        result.set(Square::from_u8_unchecked((file * 9 + rank) as u8));
        file += df;
        rank += dr;
    }
    result
}

/// 1方向の利き（最初に当たった駒のマスを含む）
#[inline]
fn ray_effect(table: &RayTable, dir: Direction, sq: Square, occupied: Bitboard) -> Bitboard {
    let ray = table.rays[dir as usize][sq.index()];
    let blockers = ray & occupied;
    if blockers.is_empty() {
        return ray;
    }
    let nearest = if dir.ascending() { blockers.lsb_unchecked() } else { blockers.msb_unchecked() };
    ray ^ table.rays[dir as usize][nearest.index()]
}

/// 香の利きを計算
///
/// # Arguments
/// * `color` - 先手/後手
/// * `sq` - 駒の位置
/// * `occupied` - 盤上の駒があるマスのBitboard
#[inline]
pub fn lance_effect(color: Color, sq: Square, occupied: Bitboard) -> Bitboard {
    let dir = match color {
        Color::Black => Direction::Up,
        Color::White => Direction::Down,
    };
    ray_effect(ray_table(), dir, sq, occupied)
}

/// 角の利きを計算
#[inline]
pub fn bishop_effect(sq: Square, occupied: Bitboard) -> Bitboard {
    let table = ray_table();
    Direction::BISHOP
        .into_iter()
        .fold(Bitboard::EMPTY, |acc, dir| acc | ray_effect(table, dir, sq, occupied))
}

/// 飛車の利きを計算
#[inline]
pub fn rook_effect(sq: Square, occupied: Bitboard) -> Bitboard {
    let table = ray_table();
    Direction::ROOK
        .into_iter()
        .fold(Bitboard::EMPTY, |acc, dir| acc | ray_effect(table, dir, sq, occupied))
}

/// 馬の利きを計算（角の利き + 王の利き）
#[inline]
pub fn horse_effect(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_effect(sq, occupied) | king_effect(sq)
}

/// 龍の利きを計算（飛車の利き + 王の利き）
#[inline]
pub fn dragon_effect(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_effect(sq, occupied) | king_effect(sq)
}

/// 駒種・手番・位置・占有から利きを計算
#[inline]
pub fn piece_effect(pt: PieceType, color: Color, sq: Square, occupied: Bitboard) -> Bitboard {
    match pt {
        PieceType::Pawn => pawn_effect(color, sq),
        PieceType::Lance => lance_effect(color, sq, occupied),
        PieceType::Knight => knight_effect(color, sq),
        PieceType::Silver => silver_effect(color, sq),
        PieceType::Bishop => bishop_effect(sq, occupied),
        PieceType::Rook => rook_effect(sq, occupied),
        PieceType::Gold
        | PieceType::ProPawn
        | PieceType::ProLance
        | PieceType::ProKnight
        | PieceType::ProSilver => gold_effect(color, sq),
        PieceType::King => king_effect(sq),
        PieceType::Horse => horse_effect(sq, occupied),
        PieceType::Dragon => dragon_effect(sq, occupied),
    }
}

/// 空の盤面での利き（盤上の駒を無視した最大の利き）
#[inline]
pub fn max_effect(pt: PieceType, color: Color, sq: Square) -> Bitboard {
    piece_effect(pt, color, sq, Bitboard::EMPTY)
}

/// 2マス間のBitboard（両端を含まない、直線上にない場合は空）
#[inline]
pub fn between_bb(sq1: Square, sq2: Square) -> Bitboard {
    ray_table().between[sq1.index() * Square::NUM + sq2.index()]
}

/// 2マスを通る直線上のBitboard（直線上にない場合は空）
#[inline]
pub fn line_bb(sq1: Square, sq2: Square) -> Bitboard {
    ray_table().line[sq1.index() * Square::NUM + sq2.index()]
}
