// 手牌の和了判定,役や点数計算を行うモジュール
mod evaluate;
mod fu;
mod parse;
mod point;
mod win;
mod yaku;

pub use self::{
    evaluate::{evaluate_hand, Evaluation},
    fu::calc_fu,
    parse::{decompose, is_complete, Decomposition, Decompositions, HandShape},
    point::{PointInfo, PointSummary, Points},
    win::{is_tenpai, tenpai_discards, winning_tiles},
    yaku::{Yaku, YakuContext, YakuKind, YakuValue, YAKU_LIST},
};
