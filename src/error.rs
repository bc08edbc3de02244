use std::fmt;

use crate::model::{Seat, Tnum, Type};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MahjongError {
    /// 牌種・数字が定義域外
    InvalidTile { suit: Type, rank: Tnum },
    /// 牌文字列のパースエラー
    Parse { input: String, message: String },
    /// 面子として成立しない牌の組み合わせ
    InvalidMeld { message: String },
    /// 現在の状態で提供されていない操作の要求 (状態は変化しない)
    IllegalOperation { seat: Seat, message: String },
    /// ルール設定の読み込み失敗
    Config { message: String },
}

impl MahjongError {
    pub(crate) fn illegal(seat: Seat, message: impl Into<String>) -> Self {
        MahjongError::IllegalOperation {
            seat,
            message: message.into(),
        }
    }

    pub(crate) fn meld(message: impl Into<String>) -> Self {
        MahjongError::InvalidMeld {
            message: message.into(),
        }
    }

    pub(crate) fn parse(input: &str, message: impl Into<String>) -> Self {
        MahjongError::Parse {
            input: input.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for MahjongError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MahjongError::InvalidTile { suit, rank } => {
                write!(f, "Invalid tile: suit={}, rank={}", suit, rank)
            }
            MahjongError::Parse { input, message } => {
                write!(f, "Parse error on '{}': {}", input, message)
            }
            MahjongError::InvalidMeld { message } => {
                write!(f, "Invalid meld: {}", message)
            }
            MahjongError::IllegalOperation { seat, message } => {
                write!(f, "Illegal operation by seat {}: {}", seat, message)
            }
            MahjongError::Config { message } => {
                write!(f, "Config error: {}", message)
            }
        }
    }
}

impl std::error::Error for MahjongError {}

impl From<serde_json::Error> for MahjongError {
    fn from(e: serde_json::Error) -> Self {
        MahjongError::Config {
            message: e.to_string(),
        }
    }
}

pub type Res<T = ()> = Result<T, MahjongError>;
