//! 筋（File）
//!
//! 内部値は 1筋 = 0 ... 9筋 = 8。USI では数字 '1'..'9' で書き、
//! SFEN の盤面は各段を 9筋から 1筋の順に並べる。

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum File {
    File1 = 0,
    File2 = 1,
    File3 = 2,
    File4 = 3,
    File5 = 4,
    File6 = 5,
    File7 = 6,
    File8 = 7,
    File9 = 8,
}

impl File {
    pub const NUM: usize = 9;

    /// 1筋から9筋の順
    pub const ALL: [File; File::NUM] = [
        File::File1,
        File::File2,
        File::File3,
        File::File4,
        File::File5,
        File::File6,
        File::File7,
        File::File8,
        File::File9,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// USI の筋文字
    #[inline]
    pub const fn to_usi_char(self) -> char {
        (b'1' + self as u8) as char
    }

    /// USI の筋文字を読む（'1'..='9' 以外は `None`）
    #[inline]
    pub const fn from_usi_char(c: char) -> Option<File> {
        match c {
            '1'..='9' => Some(File::ALL[c as usize - '1' as usize]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usi_chars_follow_file_order() {
        let chars: String = File::ALL.iter().map(|f| f.to_usi_char()).collect();
        assert_eq!(chars, "123456789");
        for file in File::ALL {
            assert_eq!(File::from_usi_char(file.to_usi_char()), Some(file));
        }
    }

    #[test]
    fn test_from_usi_char_rejects_non_digits() {
        for c in ['0', 'a', '五', ' '] {
            assert_eq!(File::from_usi_char(c), None, "{c:?}");
        }
    }
}
