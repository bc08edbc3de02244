use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::yaku::{YakuKind, YakuValue};
use crate::model::*;
use crate::util::misc::to_next_unit;

pub type Points = (Point, Point, Point); // (ロンの支払い, ツモ・子の支払い, ツモ・親の支払い)

fn ceil(n: Point) -> Point {
    to_next_unit(n, 100)
}

// 符 x 2^(翻+2) (桁あふれは飽和)
fn calc_raw_point(fu: usize, fan: usize) -> Point {
    let e = fan + 2;
    if e >= 62 {
        return if fu == 0 { 0 } else { Point::MAX };
    }
    (fu as Point).saturating_mul(1 << e)
}

fn calc_capped_point(fu: usize, fan: usize) -> Point {
    match fan {
        13.. => YAKUMAN,   // 数え役満
        11.. => SANBAIMAN, // 三倍満
        8.. => BAIMAN,     // 倍満
        6.. => HANEMAN,    // 跳満
        5 => MANGAN,       // 満貫
        _ => MANGAN.min(ceil(calc_raw_point(fu, fan))),
    }
}

// 点数計算結果
// 比較は(基本点, 翻数, 符)の順で行う (複数の解釈から最高点を選ぶ際に使用)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointInfo {
    pub fu: usize,
    pub fan: usize,             // ドラを除く翻数 (通常ルールの役満は倍数)
    pub dora: usize,
    pub ura_dora: usize,
    pub red_dora: usize,
    pub yakus: Vec<YakuValue>,  // 成立した役 (通常ルールで役満がある場合は役満のみ)
    pub is_yakuman: bool,
    pub sky_mode: bool,         // 青天井
    pub base_point: Point,      // 基本点 (0は無役)
    pub total_fan: usize,       // ドラを含む翻数
}

impl PointInfo {
    pub fn new(
        fu: usize,
        mut yakus: Vec<YakuValue>,
        dora: usize,
        ura_dora: usize,
        red_dora: usize,
        sky_mode: bool,
    ) -> Self {
        let yakuman: usize = yakus
            .iter()
            .filter(|y| y.kind == YakuKind::Yakuman)
            .map(|y| y.value)
            .sum();
        let normal: usize = yakus
            .iter()
            .filter(|y| y.kind == YakuKind::Normal)
            .map(|y| y.value)
            .sum();
        let n_dora = dora + ura_dora + red_dora;

        let mut pi = Self {
            fu,
            fan: 0,
            dora,
            ura_dora,
            red_dora,
            yakus: vec![],
            is_yakuman: yakuman != 0,
            sky_mode,
            base_point: 0,
            total_fan: 0,
        };
        if yakus.is_empty() {
            return pi; // 無役
        }

        if sky_mode {
            // 役満も翻数に換算して合算
            pi.fan = normal + yakuman * YAKUMAN_BASE_FAN;
            pi.total_fan = pi.fan + n_dora;
            pi.base_point = ceil(calc_raw_point(fu, pi.total_fan));
        } else if yakuman != 0 {
            // 役満がある場合は通常役とドラを数えない
            yakus.retain(|y| y.kind == YakuKind::Yakuman);
            pi.fan = yakuman;
            pi.total_fan = yakuman;
            pi.base_point = YAKUMAN.saturating_mul(yakuman as Point);
        } else {
            pi.fan = normal;
            pi.total_fan = normal + n_dora;
            pi.base_point = calc_capped_point(fu, pi.total_fan);
        }
        pi.yakus = yakus;
        pi
    }

    pub fn from_summary(s: &PointSummary) -> Self {
        Self::new(
            s.fu,
            s.yakus.clone(),
            s.dora,
            s.ura_dora,
            s.red_dora,
            s.sky_mode,
        )
    }

    pub fn summary(&self) -> PointSummary {
        PointSummary {
            fu: self.fu,
            yakus: self.yakus.clone(),
            sky_mode: self.sky_mode,
            dora: self.dora,
            ura_dora: self.ura_dora,
            red_dora: self.red_dora,
        }
    }

    // 役が1つ以上あり和了可能
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.base_point > 0
    }

    // 支払い (ロン, ツモ・子の支払い, ツモ・親の支払い) 親の和了の場合ツモ・親の支払いは0
    pub fn payments(&self, is_dealer: bool) -> Points {
        let b = self.base_point;
        if is_dealer {
            (ceil(b.saturating_mul(6)), ceil(b.saturating_mul(2)), 0)
        } else {
            (ceil(b.saturating_mul(4)), ceil(b), ceil(b.saturating_mul(2)))
        }
    }

    pub fn title(&self) -> String {
        if self.sky_mode || !self.is_valid() {
            return String::new();
        }
        if self.is_yakuman {
            return match self.fan {
                1 => "役満".to_string(),
                2 => "二倍役満".to_string(),
                3 => "三倍役満".to_string(),
                n => format!("{}倍役満", n),
            };
        }
        match self.base_point {
            MANGAN => "満貫",
            HANEMAN => "跳満",
            BAIMAN => "倍満",
            SANBAIMAN => "三倍満",
            YAKUMAN => "数え役満",
            _ => "",
        }
        .to_string()
    }

    fn key(&self) -> (Point, usize, usize) {
        (self.base_point, self.total_fan, self.fu)
    }
}

impl PartialEq for PointInfo {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PointInfo {}

impl PartialOrd for PointInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PointInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for PointInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}符{}飜 {}点", self.fu, self.total_fan, self.base_point)?;
        for y in &self.yakus {
            write!(f, " {}", y)?;
        }
        Ok(())
    }
}

// 点数の再計算に必要な情報のみを保持 (通信・記録用)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSummary {
    pub fu: usize,
    pub yakus: Vec<YakuValue>,
    pub sky_mode: bool,
    pub dora: usize,
    pub ura_dora: usize,
    pub red_dora: usize,
}

#[cfg(test)]
fn normal(name: &str, value: usize) -> YakuValue {
    YakuValue {
        name: name.to_string(),
        value,
        kind: YakuKind::Normal,
    }
}

#[cfg(test)]
fn yakuman(name: &str, value: usize) -> YakuValue {
    YakuValue {
        name: name.to_string(),
        value,
        kind: YakuKind::Yakuman,
    }
}

#[test]
fn test_capped_point() {
    // 30符4飜: 1920 -> 2000 (満貫未満の切り上げ)
    let p = PointInfo::new(30, vec![normal("立直", 1)], 3, 0, 0, false);
    assert_eq!(p.total_fan, 4);
    assert_eq!(p.base_point, 2000);
    assert_eq!(p.payments(false), (8000, 2000, 4000));

    // 30符1飜: 基本点240は100点単位に切り上げ
    let p = PointInfo::new(30, vec![normal("立直", 1)], 0, 0, 0, false);
    assert_eq!(p.base_point, 300);
    assert_eq!(p.payments(false), (1200, 300, 600));
    assert_eq!(p.payments(true), (1800, 600, 0));

    // 5飜は符によらず満貫
    for fu in [20, 30, 110] {
        let p = PointInfo::new(fu, vec![normal("清一色", 5)], 0, 0, 0, false);
        assert_eq!(p.base_point, MANGAN);
        assert_eq!(p.title(), "満貫");
    }

    let p = PointInfo::new(40, vec![normal("清一色", 6)], 7, 0, 0, false);
    assert_eq!(p.base_point, YAKUMAN);
    assert_eq!(p.title(), "数え役満");
}

#[test]
fn test_yakuman_point() {
    let ys = vec![normal("立直", 1), yakuman("四暗刻単騎", 2)];
    let p = PointInfo::new(50, ys.clone(), 3, 1, 0, false);
    assert!(p.is_yakuman);
    assert_eq!(p.base_point, YAKUMAN * 2);
    assert_eq!(p.yakus.len(), 1);
    assert_eq!(p.title(), "二倍役満");

    // 青天井: 役満は13飜換算でドラも加算
    let p = PointInfo::new(50, ys, 3, 1, 0, true);
    assert_eq!(p.fan, 1 + 26);
    assert_eq!(p.total_fan, 31);
    assert_eq!(p.base_point, 50 << 33);
    assert_eq!(p.yakus.len(), 2);
    assert_eq!(p.title(), "");
}

#[test]
fn test_sky_point() {
    let p = PointInfo::new(30, vec![normal("立直", 1)], 3, 0, 0, true);
    assert_eq!(p.base_point, 2000);
    let p = PointInfo::new(30, vec![normal("立直", 1)], 200, 0, 0, true);
    assert_eq!(p.base_point, Point::MAX);
    assert_eq!(p.payments(false).0, Point::MAX);
}

#[test]
fn test_no_yaku() {
    let p = PointInfo::new(40, vec![], 5, 2, 1, false);
    assert!(!p.is_valid());
    assert_eq!(p.base_point, 0);
    assert_eq!(p.total_fan, 0);
    assert_eq!(p.payments(false), (0, 0, 0));
}

#[test]
fn test_point_order_and_summary() {
    let a = PointInfo::new(30, vec![normal("立直", 1)], 0, 0, 0, false);
    let b = PointInfo::new(40, vec![normal("立直", 1)], 0, 0, 0, false);
    let c = PointInfo::new(30, vec![normal("立直", 1)], 1, 0, 0, false);
    assert!(a < b && b < c);

    let s = c.summary();
    let json = serde_json::to_string(&s).unwrap();
    let s2: PointSummary = serde_json::from_str(&json).unwrap();
    let d = PointInfo::from_summary(&s2);
    assert_eq!(d.base_point, c.base_point);
    assert_eq!(d.total_fan, c.total_fan);
}
