use serde::{Deserialize, Serialize};

use super::fu::calc_fu;
use super::parse::{decompose, Decomposition};
use super::point::PointInfo;
use super::yaku::YakuContext;
use crate::control::common::{count_dora, count_red_dora};
use crate::model::*;

// 和了形の評価結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub decomposition: Decomposition,
    pub point: PointInfo,
}

// 和了形である場合,最も高得点となる解釈のSome(Evaluation)を返却
// 和了形でない場合,Noneを返却
// 和了形でも無役の場合はpoint.is_valid()がfalseとなる
// この関数は本場,供託を計算しない
pub fn evaluate_hand(
    hand: &TileTable,           // 手牌(鳴き以外, ロンの場合でも和了牌を含む)
    melds: &[ExposedMeld],      // 副露
    winning_tile: Tile,         // 和了牌
    status: &GameStatus,        // 和了時の状況 (ツモ/ロン,場風,自風,特殊条件役)
    doras: &[Tile],             // ドラ表示牌 (注:ドラそのものではない)
    ura_doras: &[Tile],         // 裏ドラ表示牌
    options: &ScoringOptions,
) -> Option<Evaluation> {
    let is_open = melds.iter().any(|m| m.is_open());
    let n_dora = count_dora(hand, melds, doras);
    let n_red_dora = count_red_dora(hand, melds);
    let n_ura_dora = if status.riichi || status.double_riichi {
        count_dora(hand, melds, ura_doras)
    } else {
        0
    };

    let mut best: Option<Evaluation> = None;
    for dec in decompose(hand, melds, winning_tile, status.is_drawn) {
        let ctx = YakuContext::new(hand, &dec, winning_tile, is_open, status, options);
        let yakus = ctx.calc_yaku();
        let fu = calc_fu(&ctx);
        let point = PointInfo::new(fu, yakus, n_dora, n_ura_dora, n_red_dora, options.sky_mode);

        // 和了形に複数の解釈が可能な場合,最も得点の高いものを採用 (同点は先に見つかったもの)
        if best.as_ref().map_or(true, |b| point > b.point) {
            best = Some(Evaluation {
                decomposition: dec,
                point,
            });
        }
    }

    best
}

#[cfg(test)]
fn eval(exp: &str, win: &str, melds: &[&str], status: GameStatus, doras: &str) -> Option<Evaluation> {
    use crate::control::common::tiles_to_tile_table;
    use crate::control::string::{exposed_meld_from_string, tiles_from_string};

    let hand = tiles_to_tile_table(&tiles_from_string(exp).unwrap());
    let melds: Vec<ExposedMeld> = melds
        .iter()
        .map(|m| exposed_meld_from_string(m).unwrap())
        .collect();
    let wt = tiles_from_string(win).unwrap()[0];
    let doras = tiles_from_string(doras).unwrap();
    evaluate_hand(&hand, &melds, wt, &status, &doras, &[], &ScoringOptions::default())
}

#[test]
fn test_evaluate_best_interpretation() {
    // 二盃口+断幺九 と 七対子+断幺九 では二盃口の解釈を採用
    let st = GameStatus {
        riichi: true,
        ..Default::default()
    };
    let ev = eval("m223344p556677s88", "s8", &[], st, "").unwrap();
    let names: Vec<&str> = ev.point.yakus.iter().map(|y| y.name.as_str()).collect();
    assert!(names.contains(&"二盃口"));
    assert!(!names.contains(&"七対子"));
    assert!(ev.point.is_valid());
}

#[test]
fn test_evaluate_dora() {
    let st = GameStatus {
        is_drawn: true,
        ..Default::default()
    };
    // 門前ツモ + 断幺九, ドラ1(p0) + 赤1
    let ev = eval("m234678p406s23455", "s4", &[], st, "p4").unwrap();
    assert_eq!(ev.point.dora, 1);
    assert_eq!(ev.point.red_dora, 1);
    assert_eq!(ev.point.total_fan, ev.point.fan + 2);
}

#[test]
fn test_evaluate_no_yaku() {
    // 副露ありで役なし
    let st = GameStatus::default();
    let ev = eval("m123p456s78999", "s9", &["z3+33"], st, "z2").unwrap();
    assert!(!ev.point.is_valid());
    assert_eq!(ev.point.base_point, 0);

    // 和了形でない
    assert!(eval("m123p456s7899z12", "z2", &[], st, "").is_none());
}
