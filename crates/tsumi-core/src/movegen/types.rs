//! 指し手生成の種別

use std::fmt;

/// 生成する指し手の種別
///
/// どの種別でも生成されるのは合法手だけ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveCategory {
    /// 王手されていないときの全合法手（王手中は空）
    NonEvasions,
    /// 王手回避手（王手されていないときは空）
    Evasions,
    /// 相手の駒を取る合法手
    Captures,
    /// 駒打ちの合法手（王手中は合駒のみ）
    Drops,
    /// 全合法手
    All,
}

impl MoveCategory {
    /// 全ての種別
    pub const ALL: [MoveCategory; 5] = [
        MoveCategory::NonEvasions,
        MoveCategory::Evasions,
        MoveCategory::Captures,
        MoveCategory::Drops,
        MoveCategory::All,
    ];

    /// 表示名
    pub const fn name(self) -> &'static str {
        match self {
            MoveCategory::NonEvasions => "non-evasions",
            MoveCategory::Evasions => "evasions",
            MoveCategory::Captures => "captures",
            MoveCategory::Drops => "drops",
            MoveCategory::All => "all",
        }
    }
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
