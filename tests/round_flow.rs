use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use mahjong_table::control::string::tiles_from_string;
use mahjong_table::control::wall::*;
use mahjong_table::control::{RoundController, RoundSetup};
use mahjong_table::listener::{EventPrinter, Listener};
use mahjong_table::model::*;
use mahjong_table::MahjongError;

// 通知されたイベントをすべて記録
#[derive(Debug, Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Event>>>);

impl Listener for Recorder {
    fn notify_event(&mut self, _stg: &Stage, event: &Event) {
        self.0.lock().unwrap().push(event.clone());
    }
}

fn t(s: &str) -> Tile {
    Tile::from_symbol(s).unwrap()
}

fn ts(s: &str) -> Vec<Tile> {
    tiles_from_string(s).unwrap()
}

// 配牌,ツモ,ドラ表示牌を固定した牌山 (赤5なし)
fn scripted_wall(hands: [&str; SEAT], draws: &str, dora_indicator: &str) -> Vec<Tile> {
    let hands = hands.map(ts);
    let draws = ts(draws);
    let mut wall = create_wall_with(1, 0, &hands, &draws).unwrap();
    let d = t(dora_indicator);
    let i = (WALL_DRAWS + draws.len()..WALL)
        .chain(WALL_DORA + 1..WALL_HANDS)
        .find(|&i| wall[i] == d)
        .unwrap();
    wall.swap(WALL_DORA, i);
    wall
}

// 裏ドラ表示牌を固定 (ドラ表示牌,配牌,ツモは変更しない)
fn set_ura_indicator(wall: &mut [Tile], n_draws: usize, indicator: &str) {
    let u = t(indicator);
    let i = (WALL_DRAWS + n_draws..WALL)
        .chain(WALL_URA_DORA..WALL_HANDS)
        .find(|&i| wall[i] == u)
        .unwrap();
    wall.swap(WALL_URA_DORA, i);
}

fn no_red_rule() -> Rule {
    Rule {
        red5: 0,
        ..Default::default()
    }
}

fn new_round(rule: Rule, setup: RoundSetup, wall: Vec<Tile>) -> (RoundController, Recorder) {
    let rec = Recorder::default();
    let rc = RoundController::new(rule, setup, wall, vec![Box::new(rec.clone())]).unwrap();
    (rc, rec)
}

// ツモ牌をそのまま打牌
fn draw_discard(rc: &mut RoundController, seat: Seat, tile: &str) -> Vec<Event> {
    let evs = rc.draw(seat).unwrap();
    assert!(matches!(&evs[0], Event::Deal(d) if d.seat == seat && d.tile == t(tile)));
    rc.turn_action(seat, Action::discard(t(tile))).unwrap()
}

fn last_phase(evs: &[Event]) -> Option<Phase> {
    evs.iter().rev().find_map(|e| match e {
        Event::Offer(o) => Some(o.phase.clone()),
        _ => None,
    })
}

// 座席1はm3をチー可能,座席2はm3をポン可能
const CLAIM_HANDS: [&str; SEAT] = [
    "p1479s1479z12345",
    "m24p258s258z12367",
    "m33p369s369z14567",
    "m5678p2345s12345",
];

fn claim_round() -> (RoundController, Recorder) {
    let rule = no_red_rule();
    let setup = RoundSetup::first(&rule);
    let wall = scripted_wall(CLAIM_HANDS, "m3z7", "m1");
    let (mut rc, rec) = new_round(rule, setup, wall);
    rc.start().unwrap();
    rc.draw(0).unwrap();
    let evs = rc.turn_action(0, Action::discard(t("m3"))).unwrap();
    assert_eq!(last_phase(&evs), Some(Phase::AwaitingClaims(0)));
    (rc, rec)
}

#[test]
fn test_pong_beats_chow() {
    let (mut rc, rec) = claim_round();
    let offers: Vec<Offer> = rc.pending_offers().into_iter().cloned().collect();
    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0].seat, 1);
    assert!(offers[0].contains(&Action::chow(ts("m24"))));
    assert_eq!(offers[1].seat, 2);
    assert!(offers[1].contains(&Action::pong(ts("m33"))));
    assert!(!offers[1].has_type(ActionType::Chow));
    assert!(offers.iter().all(|o| o.contains(&Action::skip())));

    // 全員の応答が揃うまで確定しない
    assert!(rc.call_action(1, Action::chow(ts("m24"))).unwrap().is_empty());
    assert_eq!(rc.get_stage().phase, Phase::AwaitingClaims(0));
    assert_eq!(rc.pending_offers().len(), 1);

    let evs = rc.call_action(2, Action::pong(ts("m33"))).unwrap();
    match &evs[0] {
        Event::Resolve(e) => {
            assert_eq!(e.chosen, ActionType::Pong);
            assert_eq!(e.winners, vec![2]);
            assert_eq!(e.target, (0, t("m3")));
            let seats: Vec<Seat> = e.responses.iter().map(|(s, _)| *s).collect();
            assert_eq!(seats, vec![1, 2]);
        }
        e => panic!("unexpected event: {:?}", e),
    }
    assert!(matches!(&evs[1], Event::Meld(m) if m.seat == 2 && m.action == ActionType::Pong));
    assert_eq!(last_phase(&evs), Some(Phase::AwaitingDiscard(2)));

    let stg = rc.get_stage();
    assert_eq!(stg.players[2].melds.len(), 1);
    assert!(!stg.players[2].is_menzen);
    assert_eq!(stg.players[1].count_tile(t("m2")), 1);
    assert_eq!(stg.players[0].discards[0].meld, Some(2));

    // 鳴いた後はツモなしで打牌のみ
    let offers = rc.pending_offers();
    assert!(offers[0].actions.iter().all(|a| a.ty == ActionType::Discard));
    let evs = rc.turn_action(2, Action::discard(t("z1"))).unwrap();
    assert_eq!(last_phase(&evs), Some(Phase::AwaitingDraw(3)));

    let evs = rc.draw(3).unwrap();
    assert!(matches!(&evs[0], Event::Deal(d) if d.tile == t("z7")));

    let n = rec.0.lock().unwrap().len();
    assert_eq!(n, rc.get_stage().step);
}

#[test]
fn test_all_skip() {
    // 座席3はm3待ち (一気通貫) なので3人全員に提示される
    let mut hands = CLAIM_HANDS;
    hands[3] = "m12p123456789s99";
    let rule = no_red_rule();
    let setup = RoundSetup::first(&rule);
    let wall = scripted_wall(hands, "m3z7", "m1");
    let (mut rc, _rec) = new_round(rule, setup, wall);
    rc.start().unwrap();
    rc.draw(0).unwrap();
    rc.turn_action(0, Action::discard(t("m3"))).unwrap();

    let seats: Vec<Seat> = rc.pending_offers().iter().map(|o| o.seat).collect();
    assert_eq!(seats, vec![1, 2, 3]);
    assert!(rc.pending_offers()[2].contains(&Action::rong()));

    assert!(rc.call_action(3, Action::skip()).unwrap().is_empty());
    assert!(rc.call_action(2, Action::skip()).unwrap().is_empty());
    let evs = rc.call_action(1, Action::skip()).unwrap();
    assert_eq!(evs.len(), 2);
    match &evs[0] {
        Event::Resolve(e) => {
            assert_eq!(e.chosen, ActionType::Skip);
            assert!(e.winners.is_empty());
            assert_eq!(e.responses.len(), 3);
        }
        e => panic!("unexpected event: {:?}", e),
    }
    assert_eq!(last_phase(&evs), Some(Phase::AwaitingDraw(1)));
    assert!(rc.pending_offers().is_empty());

    let evs = rc.draw(1).unwrap();
    assert!(matches!(&evs[0], Event::Deal(d) if d.seat == 1 && d.tile == t("z7")));
    let stg = rc.get_stage();
    assert_eq!(stg.players[0].discards[0].meld, None);
    // ロンを見逃した座席は同巡内フリテン
    assert!(stg.players[3].is_furiten_other);
    assert!(!stg.players[3].is_furiten);
}

#[test]
fn test_illegal_call() {
    let (mut rc, rec) = claim_round();
    let step = rc.get_stage().step;
    let n_events = rec.0.lock().unwrap().len();

    // 提示されていない座席,提示されていない操作,ツモ番の操作
    assert!(matches!(
        rc.call_action(3, Action::skip()),
        Err(MahjongError::IllegalOperation { seat: 3, .. })
    ));
    assert!(rc.call_action(1, Action::pong(ts("m24"))).is_err());
    assert!(rc.turn_action(1, Action::discard(t("m2"))).is_err());
    assert!(rc.draw(1).is_err());

    // 鳴きとツモ番の操作の取り違え
    match rc.call_action(1, Action::discard(t("m2"))) {
        Err(MahjongError::IllegalOperation { seat: 1, message }) => {
            assert!(message.starts_with("not a call action"))
        }
        r => panic!("unexpected result: {:?}", r),
    }
    match rc.turn_action(0, Action::skip()) {
        Err(MahjongError::IllegalOperation { seat: 0, message }) => {
            assert!(message.starts_with("not a turn action"))
        }
        r => panic!("unexpected result: {:?}", r),
    }

    rc.call_action(1, Action::skip()).unwrap();
    assert!(rc.call_action(1, Action::skip()).is_err()); // 応答済み

    assert_eq!(rc.get_stage().step, step);
    assert_eq!(rec.0.lock().unwrap().len(), n_events);
    assert_eq!(rc.get_stage().phase, Phase::AwaitingClaims(0));
}

// 座席0のs1に座席1(平和一気通貫)と座席2(一気通貫東)がロン可能
const RON_HANDS: [&str; SEAT] = [
    "m1479p1479z23456",
    "m123456789p11s23",
    "p123456789s1z111",
    "m2358s456789z777",
];

fn ron_round(rule: Rule, setup: RoundSetup) -> (RoundController, Recorder) {
    let wall = scripted_wall(RON_HANDS, "s1", "z5");
    let rec = Recorder::default();
    let listeners: Vec<Box<dyn Listener>> = vec![Box::new(rec.clone()), Box::new(EventPrinter::new())];
    let mut rc = RoundController::new(rule, setup, wall, listeners).unwrap();
    rc.start().unwrap();
    rc.draw(0).unwrap();
    let evs = rc.turn_action(0, Action::discard(t("s1"))).unwrap();
    assert_eq!(last_phase(&evs), Some(Phase::AwaitingClaims(0)));
    (rc, rec)
}

#[test]
fn test_multi_ron() {
    let rule = no_red_rule();
    let setup = RoundSetup::first(&rule);
    let (mut rc, _rec) = ron_round(rule, setup);

    let seats: Vec<Seat> = rc.pending_offers().iter().map(|o| o.seat).collect();
    assert_eq!(seats, vec![1, 2]);
    assert!(rc.pending_offers()[0].contains(&Action::chow(ts("s23"))));

    assert!(rc.call_action(2, Action::rong()).unwrap().is_empty());
    let evs = rc.call_action(1, Action::rong()).unwrap();
    assert_eq!(evs.len(), 2);
    match &evs[0] {
        Event::Resolve(e) => {
            assert_eq!(e.chosen, ActionType::Rong);
            assert_eq!(e.winners, vec![1, 2]);
        }
        e => panic!("unexpected event: {:?}", e),
    }
    let Event::Win(win) = &evs[1] else {
        panic!("unexpected event: {:?}", evs[1]);
    };
    assert_eq!(win.contexts.len(), 2);

    // 平和一気通貫 30符3飜
    let c1 = &win.contexts[0];
    assert_eq!((c1.seat, c1.from), (1, 0));
    assert_eq!((c1.point.fu, c1.point.total_fan), (30, 3));
    assert_eq!(c1.payments.0, 4000);
    assert_eq!(c1.hand.len(), 13);
    assert_eq!(c1.winning_tile, t("s1"));

    // 一気通貫東 40符3飜
    let c2 = &win.contexts[1];
    assert_eq!((c2.point.fu, c2.point.total_fan), (40, 3));
    assert_eq!(c2.payments.0, 5200);

    assert_eq!(win.delta_scores, [-9200, 4000, 5200, 0]);
    assert_eq!(win.scores, [25000; SEAT]);

    let stg = rc.get_stage();
    assert_eq!(stg.phase, Phase::RoundEnd(RoundEnd::Win(vec![1, 2])));
    assert_eq!(stg.get_scores(), [15800, 29000, 30200, 25000]);

    let next = rc.next_setup().unwrap();
    assert_eq!((next.round, next.dealer, next.honba), (0, 1, 0));
    assert_eq!(next.scores, stg.get_scores());

    // 局終了後の操作はすべて不正
    assert!(rc.draw(1).is_err());
    assert!(rc.timeout(3).is_err());
}

#[test]
fn test_head_bump_with_honba() {
    let rule = Rule {
        allow_multi_ron: false,
        ..no_red_rule()
    };
    let setup = RoundSetup {
        honba: 2,
        riichi_sticks: 1,
        ..RoundSetup::first(&rule)
    };
    let (mut rc, _rec) = ron_round(rule, setup);
    assert!(!rc.get_rule().allow_multi_ron);

    rc.call_action(1, Action::rong()).unwrap();
    let evs = rc.call_action(2, Action::rong()).unwrap();
    let Event::Win(win) = &evs[1] else {
        panic!("unexpected event: {:?}", evs[1]);
    };
    // 放銃者に近い座席1のみ和了 本場と供託も座席1
    assert_eq!(win.contexts.len(), 1);
    assert_eq!(win.contexts[0].seat, 1);
    assert_eq!(win.delta_scores, [-4600, 5600, 0, 0]);
    assert_eq!(rc.get_stage().riichi_sticks, 0);

    let next = rc.next_setup().unwrap();
    assert_eq!((next.dealer, next.honba, next.riichi_sticks), (1, 0, 0));
}

#[test]
fn test_timeout() {
    let rule = no_red_rule();
    let bonus = rule.bonus_turn_time_ms;
    let setup = RoundSetup::first(&rule);
    let wall = scripted_wall(CLAIM_HANDS, "m3z7", "m1");
    let (mut rc, _rec) = new_round(rule, setup, wall);
    rc.start().unwrap();
    rc.draw(0).unwrap();

    // ツモ番のタイムアウトはツモ切り
    let evs = rc.timeout(0).unwrap();
    assert!(matches!(&evs[0], Event::Discard(d) if d.tile == t("m3") && d.is_drawn));
    assert_eq!(rc.get_stage().players[0].bonus_time_ms, 0);
    assert_eq!(rc.get_stage().players[1].bonus_time_ms, bonus);

    // 持ち時間が残っている間は何も起きない
    assert!(rc.expire_overdue(Instant::now()).unwrap().is_empty());

    let evs = rc
        .expire_overdue(Instant::now() + Duration::from_secs(3600))
        .unwrap();
    match &evs[0] {
        Event::Resolve(e) => {
            assert_eq!(e.chosen, ActionType::Skip);
            assert!(e.responses.iter().all(|(_, a)| *a == Action::skip()));
            assert_eq!(e.responses.len(), 2);
        }
        e => panic!("unexpected event: {:?}", e),
    }
    assert_eq!(last_phase(&evs), Some(Phase::AwaitingDraw(1)));
    assert_eq!(rc.get_stage().players[1].bonus_time_ms, 0);
    assert!(rc.timeout(1).is_err()); // ツモ待ちにタイムアウトはない
}

#[test]
fn test_added_kong_dora_after_discard() {
    let hands = [
        "p1479s1479z12345",
        "m24p258s258z11367",
        "m33p369s369z24567",
        "m5678p2345s12345",
    ];
    let rule = no_red_rule();
    let setup = RoundSetup::first(&rule);
    let wall = scripted_wall(hands, "m9m1m1m1z1", "m8");
    let (mut rc, _rec) = new_round(rule, setup, wall.clone());
    rc.start().unwrap();

    rc.draw(0).unwrap();
    rc.turn_action(0, Action::discard(t("z1"))).unwrap();
    let evs = rc.call_action(1, Action::pong(ts("z11"))).unwrap();
    assert_eq!(last_phase(&evs), Some(Phase::AwaitingDiscard(1)));
    let evs = rc.turn_action(1, Action::discard(t("z3"))).unwrap();
    assert_eq!(last_phase(&evs), Some(Phase::AwaitingDraw(2)));
    for s in [2, 3, 0] {
        rc.draw(s).unwrap();
        let evs = rc.timeout(s).unwrap();
        assert!(matches!(&evs[0], Event::Discard(d) if d.tile == t("m1")));
    }

    rc.draw(1).unwrap();
    let kong = Action::added_kong(t("z1"));
    assert!(rc.pending_offers()[0].contains(&kong));
    let evs = rc.turn_action(1, kong).unwrap();
    assert!(matches!(&evs[0], Event::Meld(m) if m.action == ActionType::AddedKong && m.meld.is_added()));
    assert!(matches!(&evs[1], Event::Deal(d) if d.is_replacement && d.tile == wall[WALL_REPLACEMENT]));
    assert_eq!(last_phase(&evs), Some(Phase::AwaitingDiscard(1)));

    // 加槓の槓ドラは打牌後
    let stg = rc.get_stage();
    assert_eq!(stg.doras.len(), 1);
    assert_eq!(stg.n_kan, 1);
    assert_eq!(stg.wall_count, WALL - WALL_DRAWS - 6);
    assert!(stg.players[1].melds[0].is_kong());

    let evs = rc.timeout(1).unwrap();
    assert!(matches!(&evs[0], Event::Discard(_)));
    assert!(matches!(&evs[1], Event::Dora(d) if d.tile == wall[WALL_DORA + 1]));
    assert_eq!(rc.get_stage().doras.len(), 2);
}

#[test]
fn test_exhaustive_draw() {
    for seed in 0..4 {
        let rule = Rule::default();
        let setup = RoundSetup::first(&rule);
        let wall = create_wall(seed, rule.red5).unwrap();
        let (mut rc, rec) = new_round(rule, setup, wall);
        rc.start().unwrap();

        // ツモ切りと鳴きのスキップのみで進行
        loop {
            let phase = rc.get_stage().phase.clone();
            match phase {
                Phase::AwaitingDraw(s) => {
                    rc.draw(s).unwrap();
                }
                Phase::AwaitingDiscard(s) => {
                    rc.timeout(s).unwrap();
                }
                Phase::AwaitingClaims(_) => {
                    let seats: Vec<Seat> = rc.pending_offers().iter().map(|o| o.seat).collect();
                    for s in seats {
                        rc.call_action(s, Action::skip()).unwrap();
                    }
                }
                Phase::RoundEnd(_) => break,
                Phase::Dealing => panic!("round not started"),
            }
        }

        let events = rec.0.lock().unwrap();
        let n_deal = events.iter().filter(|e| matches!(e, Event::Deal(_))).count();
        assert_eq!(n_deal, WALL - WALL_DRAWS);
        let Some(Event::Draw(draw)) = events.last() else {
            panic!("round did not end with a draw");
        };
        assert_eq!(draw.delta_scores.iter().sum::<Point>(), 0);
        for s in 0..SEAT {
            assert_eq!(draw.tenpais[s], !draw.hands[s].is_empty());
            let expected: &[Point] = if draw.tenpais[s] { &[0, 1000, 1500, 3000] } else { &[0, -1000, -1500, -3000] };
            assert!(expected.contains(&draw.delta_scores[s]));
        }

        let stg = rc.get_stage();
        assert_eq!(stg.wall_count, 0);
        let next = rc.next_setup().unwrap();
        assert_eq!(next.honba, 1);
        assert_eq!(next.dealer, if draw.tenpais[0] { 0 } else { 1 });
    }
}

// s1,s4待ちの平和一気通貫
const PINFU_ITTSU: &str = "m123456789p11s23";
const TSUMO_OTHERS: [&str; 3] = ["m1479p2479s1479z2", "p123456789s5z111", "m2358s568z223344"];

#[test]
fn test_tsumo_dealer() {
    let rule = no_red_rule();
    let setup = RoundSetup {
        honba: 1,
        riichi_sticks: 1,
        ..RoundSetup::first(&rule)
    };
    let [b, c, d] = TSUMO_OTHERS;
    let wall = scripted_wall([PINFU_ITTSU, b, c, d], "s4", "z5");
    let (mut rc, rec) = new_round(rule, setup, wall);
    rc.start().unwrap();
    rc.draw(0).unwrap();
    assert!(rc.pending_offers()[0].contains(&Action::tsumo()));

    let evs = rc.turn_action(0, Action::tsumo()).unwrap();
    assert_eq!(evs.len(), 1);
    let Event::Win(win) = &evs[0] else {
        panic!("unexpected event: {:?}", evs[0]);
    };
    // 天和 役満のみ採用
    let c = &win.contexts[0];
    assert_eq!((c.seat, c.from), (0, 0));
    assert!(c.point.is_yakuman);
    assert!(c.point.yakus.iter().all(|y| y.name == "天和"));
    assert_eq!(c.point.base_point, YAKUMAN);
    assert_eq!(c.payments.1, 16000);
    assert_eq!(c.score(), 48000);
    assert_eq!(c.winning_tile, t("s4"));
    assert_eq!(c.hand.len(), 13);
    // 本場は1人100点,供託は和了者
    assert_eq!(win.delta_scores, [49300, -16100, -16100, -16100]);

    let stg = rc.get_stage();
    assert_eq!(stg.phase, Phase::RoundEnd(RoundEnd::Win(vec![0])));
    assert_eq!(stg.riichi_sticks, 0);
    assert!(matches!(rec.0.lock().unwrap().last(), Some(Event::Win(_))));

    // 親の和了は連荘
    let next = rc.next_setup().unwrap();
    assert_eq!((next.round, next.dealer, next.honba, next.riichi_sticks), (0, 0, 2, 0));
    assert_eq!(next.scores, [74300, 8900, 8900, 8900]);
}

#[test]
fn test_tsumo_non_dealer() {
    let rule = no_red_rule();
    let setup = RoundSetup {
        honba: 1,
        ..RoundSetup::first(&rule)
    };
    let [b, c, d] = TSUMO_OTHERS;
    let mut wall = scripted_wall([b, PINFU_ITTSU, c, d], "z7z7z7z7z6s4", "z5");
    set_ura_indicator(&mut wall, 6, "z5");
    let (mut rc, _rec) = new_round(rule, setup, wall);
    rc.start().unwrap();
    draw_discard(&mut rc, 0, "z7");

    // 第1巡の副露のないリーチはダブルリーチ
    rc.draw(1).unwrap();
    let riichi = Action::riichi(t("z7"));
    assert!(rc.pending_offers()[0].contains(&riichi));
    let evs = rc.turn_action(1, riichi).unwrap();
    assert!(matches!(&evs[0], Event::Discard(d) if d.is_riichi && d.is_drawn));
    let pl = &rc.get_stage().players[1];
    assert!(pl.is_riichi && pl.is_double_riichi && pl.is_ippatsu);
    assert_eq!(pl.score, 25000); // 宣言牌が通るまで供託なし

    draw_discard(&mut rc, 2, "z7");
    let stg = rc.get_stage();
    assert_eq!((stg.players[1].score, stg.riichi_sticks), (24000, 1));
    draw_discard(&mut rc, 3, "z7");
    draw_discard(&mut rc, 0, "z6");

    // リーチ後はツモ切りとツモ和了のみ
    rc.draw(1).unwrap();
    let offer = rc.pending_offers()[0].clone();
    assert!(offer.contains(&Action::tsumo()));
    assert!(offer.contains(&Action::discard(t("s4"))));
    assert!(!offer.contains(&Action::discard(t("m1"))));
    assert!(!offer.has_type(ActionType::Riichi));
    assert!(rc.turn_action(1, Action::discard(t("m1"))).is_err());

    let evs = rc.turn_action(1, Action::tsumo()).unwrap();
    let Event::Win(win) = &evs[0] else {
        panic!("unexpected event: {:?}", evs[0]);
    };
    let c = &win.contexts[0];
    let names: Vec<&str> = c.point.yakus.iter().map(|y| y.name.as_str()).collect();
    for name in ["両立直", "一発", "門前清自摸和", "平和", "一気通貫"] {
        assert!(names.contains(&name), "{:?}", names);
    }
    assert!(!names.contains(&"立直"));
    assert_eq!((c.point.fu, c.point.total_fan), (20, 7));
    assert_eq!((c.point.dora, c.point.ura_dora), (0, 0));
    assert_eq!(c.point.base_point, HANEMAN);
    assert_eq!(win.ura_doras, vec![t("z5")]);
    assert_eq!(win.delta_scores, [-6100, 13300, -3100, -3100]);

    let stg = rc.get_stage();
    assert_eq!(stg.get_scores(), [18900, 37300, 21900, 21900]);
    let next = rc.next_setup().unwrap();
    assert_eq!((next.dealer, next.honba, next.riichi_sticks), (1, 0, 0));
}

// 座席3のs4に両立直の座席1(平和一気通貫)と座席2(一気通貫)がロン 裏ドラ表示牌はp9
#[test]
fn test_ura_dora_for_nearest_winner() {
    let hands = ["m1479p2479s1479z2", PINFU_ITTSU, "p123456789s56z11", "m2358s568z223344"];
    for all_ura in [true, false] {
        let rule = Rule {
            ura_dora_for_all_winners: all_ura,
            ..no_red_rule()
        };
        let setup = RoundSetup::first(&rule);
        let mut wall = scripted_wall(hands, "z7z7z7s4", "z5");
        set_ura_indicator(&mut wall, 4, "p9");
        let (mut rc, _rec) = new_round(rule, setup, wall);
        rc.start().unwrap();
        draw_discard(&mut rc, 0, "z7");
        for s in [1, 2] {
            rc.draw(s).unwrap();
            rc.turn_action(s, Action::riichi(t("z7"))).unwrap();
        }
        draw_discard(&mut rc, 3, "s4");
        assert_eq!(rc.get_stage().riichi_sticks, 2);
        let seats: Vec<Seat> = rc.pending_offers().iter().map(|o| o.seat).collect();
        assert_eq!(seats, vec![1, 2]);

        rc.call_action(2, Action::rong()).unwrap();
        let evs = rc.call_action(1, Action::rong()).unwrap();
        let Event::Win(win) = &evs[1] else {
            panic!("unexpected event: {:?}", evs[1]);
        };
        assert_eq!(win.ura_doras, vec![t("p9")]);
        let (c1, c2) = (&win.contexts[0], &win.contexts[1]);
        assert_eq!((c1.seat, c2.seat), (1, 2));

        // 座席1: 両立直一発平和一気通貫 裏2 倍満 (供託2本も座席1)
        assert_eq!((c1.point.ura_dora, c1.point.base_point), (2, BAIMAN));
        if all_ura {
            // 座席2: 両立直一発一気通貫 裏1 跳満
            assert_eq!((c2.point.ura_dora, c2.point.base_point), (1, HANEMAN));
            assert_eq!(win.delta_scores, [0, 18000, 12000, -28000]);
        } else {
            assert_eq!((c2.point.ura_dora, c2.point.base_point), (0, MANGAN));
            assert_eq!(win.delta_scores, [0, 18000, 8000, -24000]);
        }
    }
}

#[test]
fn test_robbing_added_kong() {
    let hands = ["m1478p2479s1479z2", "m99p358s258z13456", "m12345678p123s99", "m2358s568z223344"];
    let rule = no_red_rule();
    let setup = RoundSetup::first(&rule);
    let wall = scripted_wall(hands, "m9z7z7z7m9", "z5");
    let (mut rc, _rec) = new_round(rule, setup, wall);
    rc.start().unwrap();

    // 座席2のロンを見逃して座席1がポン
    draw_discard(&mut rc, 0, "m9");
    let seats: Vec<Seat> = rc.pending_offers().iter().map(|o| o.seat).collect();
    assert_eq!(seats, vec![1, 2]);
    rc.call_action(2, Action::skip()).unwrap();
    rc.call_action(1, Action::pong(ts("m99"))).unwrap();
    rc.turn_action(1, Action::discard(t("z1"))).unwrap();
    for s in [2, 3, 0] {
        draw_discard(&mut rc, s, "z7");
    }
    assert!(!rc.get_stage().players[2].is_furiten_other);

    // 加槓に対してはロンのみ提示
    rc.draw(1).unwrap();
    let evs = rc.turn_action(1, Action::added_kong(t("m9"))).unwrap();
    assert!(matches!(&evs[0], Event::Meld(m) if m.action == ActionType::AddedKong));
    assert_eq!(last_phase(&evs), Some(Phase::AwaitingClaims(1)));
    let offers = rc.pending_offers();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].seat, 2);
    assert_eq!(offers[0].actions.len(), 2);
    assert!(offers[0].contains(&Action::skip()) && offers[0].contains(&Action::rong()));

    let evs = rc.call_action(2, Action::rong()).unwrap();
    match &evs[0] {
        Event::Resolve(e) => {
            assert_eq!(e.target, (1, t("m9")));
            assert_eq!(e.chosen, ActionType::Rong);
        }
        e => panic!("unexpected event: {:?}", e),
    }
    let Event::Win(win) = &evs[1] else {
        panic!("unexpected event: {:?}", evs[1]);
    };
    let c = &win.contexts[0];
    assert_eq!((c.seat, c.from), (2, 1));
    let names: Vec<&str> = c.point.yakus.iter().map(|y| y.name.as_str()).collect();
    assert_eq!(names.len(), 3);
    assert!(["槍槓", "平和", "一気通貫"].iter().all(|n| names.contains(n)));
    assert_eq!((c.point.fu, c.point.total_fan, c.point.base_point), (30, 4, 2000));
    assert_eq!(win.delta_scores, [0, -8000, 8000, 0]);

    // 槍槓された槓は成立せず,槓ドラもめくらない
    let stg = rc.get_stage();
    assert_eq!(stg.n_kan, 0);
    assert_eq!(stg.doras.len(), 1);
    assert!(!evs.iter().any(|e| matches!(e, Event::Dora(_) | Event::Deal(_))));
    let next = rc.next_setup().unwrap();
    assert_eq!((next.dealer, next.honba), (1, 0));
}
