use proptest::prelude::*;

use mahjong_table::control::common::tiles_to_tile_table;
use mahjong_table::control::wall::create_wall;
use mahjong_table::control::{RoundController, RoundSetup};
use mahjong_table::hand::*;
use mahjong_table::model::*;

fn normal(name: &str, value: usize) -> YakuValue {
    YakuValue {
        name: name.to_string(),
        value,
        kind: YakuKind::Normal,
    }
}

fn yakuman(name: &str, value: usize) -> YakuValue {
    YakuValue {
        name: name.to_string(),
        value,
        kind: YakuKind::Yakuman,
    }
}

fn arb_tile() -> impl Strategy<Value = Tile> {
    (0..TYPE, 1..TNUM).prop_filter_map("honor rank", |(ti, ni)| Tile::new(ti, ni).ok())
}

fn arb_meld() -> impl Strategy<Value = Meld> {
    prop_oneof![
        (0..TZ, 1..=7usize).prop_map(|(ti, ni)| Meld::run(Tile::new(ti, ni).unwrap())),
        arb_tile().prop_map(Meld::triplet),
    ]
}

// 4面子1雀頭の手牌 (同じ牌は4枚まで) と和了牌のindex
fn arb_complete_hand() -> impl Strategy<Value = (Vec<Tile>, usize)> {
    (prop::collection::vec(arb_meld(), 4), arb_tile(), 0..14usize).prop_filter_map(
        "more than 4 copies",
        |(melds, pair, wi)| {
            let mut tiles: Vec<Tile> = melds.iter().flat_map(|m| m.tiles()).collect();
            tiles.push(pair);
            tiles.push(pair);
            let tt = tiles_to_tile_table(&tiles);
            if tt.iter().flatten().any(|&n| n > TILE) {
                return None;
            }
            tiles.sort();
            Some((tiles, wi))
        },
    )
}

fn arb_yakus() -> impl Strategy<Value = Vec<YakuValue>> {
    prop_oneof![
        prop::collection::vec((1..=6usize).prop_map(|v| normal("役", v)), 1..4),
        (1..=2usize).prop_map(|v| vec![yakuman("役満", v), normal("役", 1)]),
    ]
}

proptest! {
    // どの解釈も手牌の牌をちょうど使い切る
    #[test]
    fn decomposition_conserves_tiles((tiles, wi) in arb_complete_hand(), is_drawn in any::<bool>()) {
        let tt = tiles_to_tile_table(&tiles);
        let wt = tiles[wi];
        let mut n = 0;
        for dec in decompose(&tt, &[], wt, is_drawn) {
            prop_assert_eq!(dec.tiles(), tiles.clone());
            prop_assert!(dec.winning_meld().contains(wt));
            n += 1;
        }
        prop_assert!(n > 0);
        prop_assert!(is_complete(&tt, &[], wt));
    }

    // ドラが増えて基本点が下がることはない
    #[test]
    fn base_point_monotonic_in_dora(
        fu in (2..=11usize).prop_map(|n| n * 10),
        yakus in arb_yakus(),
        dora in 0..20usize,
        sky_mode in any::<bool>(),
    ) {
        let p0 = PointInfo::new(fu, yakus.clone(), dora, 0, 0, sky_mode);
        let p1 = PointInfo::new(fu, yakus.clone(), dora + 1, 0, 0, sky_mode);
        let p2 = PointInfo::new(fu, yakus, dora, 1, 1, sky_mode);
        prop_assert!(p0.base_point <= p1.base_point);
        prop_assert!(p0.base_point <= p2.base_point);
        prop_assert!(p0.base_point % 100 == 0 || p0.base_point == Point::MAX);
    }

    // 記録用の要約から同じ点数を再計算できる
    #[test]
    fn summary_round_trip(
        fu in (2..=11usize).prop_map(|n| n * 10),
        yakus in arb_yakus(),
        dora in 0..5usize,
        ura_dora in 0..5usize,
        red_dora in 0..4usize,
        sky_mode in any::<bool>(),
    ) {
        let p = PointInfo::new(fu, yakus, dora, ura_dora, red_dora, sky_mode);
        let summary = p.summary();
        let json = serde_json::to_string(&summary).unwrap();
        let q = PointInfo::from_summary(&serde_json::from_str(&json).unwrap());
        prop_assert_eq!(p.base_point, q.base_point);
        prop_assert_eq!(p.total_fan, q.total_fan);
        prop_assert_eq!(q.summary(), summary);
    }

    // 役がなければドラがあっても0点
    #[test]
    fn no_yaku_is_zero(
        fu in (2..=11usize).prop_map(|n| n * 10),
        dora in 0..10usize,
        ura_dora in 0..5usize,
        red_dora in 0..4usize,
        sky_mode in any::<bool>(),
    ) {
        let p = PointInfo::new(fu, vec![], dora, ura_dora, red_dora, sky_mode);
        prop_assert_eq!(p.base_point, 0);
        prop_assert!(!p.is_valid());
        prop_assert!(p.title().is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    // 提示された操作をランダムに選んで1局を進めても点数と供託の合計は保存される
    #[test]
    fn random_round_conserves_points(seed in any::<u64>(), pick in any::<u64>()) {
        let rule = Rule::default();
        let setup = RoundSetup::first(&rule);
        let total = rule.initial_score * SEAT as Point;
        let wall = create_wall(seed, rule.red5).unwrap();
        let mut rc = RoundController::new(rule, setup, wall, vec![]).unwrap();
        rc.start().unwrap();

        let mut counter = pick;
        for _ in 0..1000 {
            let phase = rc.get_stage().phase.clone();
            match phase {
                Phase::AwaitingDraw(s) => {
                    rc.draw(s).unwrap();
                }
                Phase::AwaitingDiscard(_) | Phase::AwaitingClaims(_) => {
                    let choices: Vec<(Seat, Action)> = rc
                        .pending_offers()
                        .iter()
                        .map(|o| {
                            counter = counter.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                            let a = &o.actions[(counter >> 33) as usize % o.actions.len()];
                            (o.seat, a.clone())
                        })
                        .collect();
                    prop_assert!(!choices.is_empty());
                    for (s, act) in choices {
                        if matches!(phase, Phase::AwaitingDiscard(_)) {
                            rc.turn_action(s, act).unwrap();
                        } else {
                            rc.call_action(s, act).unwrap();
                        }
                    }
                }
                Phase::RoundEnd(_) => break,
                Phase::Dealing => unreachable!(),
            }

            let stg = rc.get_stage();
            let sum: Point = stg.get_scores().iter().sum();
            prop_assert_eq!(sum + stg.riichi_sticks as Point * RIICHI_STICK, total);
        }

        prop_assert!(matches!(rc.get_stage().phase, Phase::RoundEnd(_)));
        prop_assert!(rc.next_setup().is_some());
    }
}

#[test]
fn test_sky_mode_base_point() {
    // 30符4飜 = 1920 -> 2000
    let p = PointInfo::new(30, vec![normal("立直", 1)], 3, 0, 0, true);
    assert_eq!(p.total_fan, 4);
    assert_eq!(p.base_point, 2000);
    assert_eq!(p.title(), "");
}

#[test]
fn test_capped_thresholds() {
    let base = |fan| PointInfo::new(30, vec![normal("役", fan)], 0, 0, 0, false).base_point;
    assert_eq!(base(5), MANGAN);
    assert_eq!(base(6), HANEMAN);
    assert_eq!(base(8), BAIMAN);
    assert_eq!(base(11), SANBAIMAN);
    assert_eq!(base(13), YAKUMAN);

    // 役満があれば通常役とドラは数えない
    let p = PointInfo::new(30, vec![yakuman("国士無双", 2), normal("立直", 1)], 5, 0, 0, false);
    assert_eq!(p.base_point, YAKUMAN * 2);
    assert_eq!(p.yakus.len(), 1);
}
