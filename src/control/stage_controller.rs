use super::common::*;
use crate::hand::winning_tiles;
use crate::listener::Listener;
use crate::model::*;

// イベントをStageに適用し,リスナーに通知する
// Stageの変更はすべてイベントを経由して行う (bonus_time_msのみ例外)
#[derive(Debug)]
pub struct StageController {
    stage: Stage,
    listeners: Vec<Box<dyn Listener>>,
    emitted: Vec<Event>, // 呼び出し元に返却する未回収のイベント
}

impl StageController {
    pub fn new(listeners: Vec<Box<dyn Listener>>) -> Self {
        Self {
            stage: Stage::default(),
            listeners,
            emitted: vec![],
        }
    }

    #[inline]
    pub fn get_stage(&self) -> &Stage {
        &self.stage
    }

    pub fn set_bonus_time(&mut self, seat: Seat, ms: u64) {
        self.stage.players[seat].bonus_time_ms = ms;
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.emitted)
    }

    pub fn handle_event(&mut self, event: Event) {
        {
            let stg = &mut self.stage;
            match &event {
                Event::New(e) => event_new(stg, e),
                Event::Deal(e) => event_deal(stg, e),
                Event::Discard(e) => event_discard(stg, e),
                Event::Meld(e) => event_meld(stg, e),
                Event::Dora(e) => event_dora(stg, e),
                Event::Offer(e) => event_offer(stg, e),
                Event::Resolve(_) => {}
                Event::Win(e) => event_win(stg, e),
                Event::Draw(e) => event_draw(stg, e),
            }
            update_after_turn_action(stg, &event);
            stg.step += 1;
        }

        for a in &mut self.listeners {
            a.notify_event(&self.stage, &event);
        }
        self.emitted.push(event);
    }
}

// [Event]
fn event_new(stg: &mut Stage, event: &EventNew) {
    *stg = Stage::default();
    stg.round = event.round;
    stg.dealer = event.dealer;
    stg.honba = event.honba;
    stg.riichi_sticks = event.riichi_sticks;
    stg.turn = event.dealer;
    stg.wall_count = event.wall_count;
    stg.doras = event.doras.clone();

    for s in 0..SEAT {
        let pl = &mut stg.players[s];
        pl.seat = s;
        pl.score = event.scores[s];
        pl.is_menzen = true;
        for &t in &event.hands[s] {
            inc_tile(&mut pl.hand, t);
        }
        pl.winning_tiles = winning_tiles(&pl.hand, &pl.melds);
    }
}

fn event_deal(stg: &mut Stage, event: &EventDeal) {
    let s = event.seat;
    let t = event.tile;

    update_after_discard_completed(stg);

    if stg.players[s].is_rinshan {
        // 槍槓リーチ一発を考慮して加槓の成立が確定したタイミングで一発フラグをリセット
        disable_ippatsu(stg);
    }
    stg.last_tile = None;

    stg.turn = s;
    stg.wall_count -= 1;
    if event.is_replacement {
        stg.n_kan += 1; // 槍槓されずに嶺上牌をツモった時点で槓が成立
    }

    let pl = &mut stg.players[s];
    pl.drawn = Some(t);
    inc_tile(&mut pl.hand, t);
    if !pl.is_riichi {
        pl.is_furiten_other = false; // リーチ中でなければ見逃しフリテンを解除
    }
}

fn event_discard(stg: &mut Stage, event: &EventDiscard) {
    let s = event.seat;
    let t = event.tile;
    let is_first = stg.is_first_uninterrupted_turn(s);
    stg.turn = s;

    let pl = &mut stg.players[s];
    assert!(count_tile(&pl.hand, t) > 0, "{} not found in hand", t);
    pl.is_rinshan = false;
    if event.is_riichi {
        assert!(pl.riichi.is_none());
        pl.riichi = Some(pl.discards.len());
        pl.is_riichi = true;
        pl.is_ippatsu = true;
        pl.is_double_riichi = is_first;
        stg.last_riichi = Some(s);
    } else {
        pl.is_ippatsu = false;
    }

    pl.discards.push(Discard {
        step: stg.step,
        tile: t,
        is_drawn: event.is_drawn,
        meld: None,
    });
    dec_tile(&mut pl.hand, t);

    stg.last_tile = Some((s, ActionType::Discard, t));
}

fn event_meld(stg: &mut Stage, event: &EventMeld) {
    // リーチ一発や槍槓, フリテンなどに必要な前処理
    update_after_discard_completed(stg);
    if event.action != ActionType::AddedKong {
        disable_ippatsu(stg); // 加槓の場合は槍槓リーチ一発があるので一旦スルー
    }

    let s = event.seat;
    let m = &event.meld;
    stg.turn = s;
    let mut consumed = m.tiles().to_vec();
    match event.action {
        ActionType::Chow | ActionType::Pong | ActionType::Kong => {
            let Some((prev_s, _, t)) = stg.last_tile else {
                panic!("no tile to claim for {:?}", event.action);
            };
            if let Some(i) = consumed.iter().position(|&x| x == t) {
                consumed.remove(i);
            }
            if let Some(d) = stg.players[prev_s].discards.last_mut() {
                d.meld = Some(s);
            }
            let pl = &mut stg.players[s];
            pl.is_menzen = false;
            pl.melds.push(m.clone());
            if event.action == ActionType::Kong {
                pl.is_rinshan = true;
            }
            stg.last_tile = None;
        }
        ActionType::ConcealedKong => {
            let pl = &mut stg.players[s];
            pl.is_rinshan = true;
            pl.melds.push(m.clone());
            stg.last_tile = None;
        }
        ActionType::AddedKong => {
            let extra = m.extra().unwrap_or_else(|| panic!("added kong without extra tile: {}", m));
            consumed = vec![extra];
            let pl = &mut stg.players[s];
            pl.is_rinshan = true;
            let Some(old) = pl.melds.iter_mut().find(|x| x.meld() == m.meld()) else {
                panic!("no pong for {}", m);
            };
            *old = m.clone();
            stg.last_tile = Some((s, ActionType::AddedKong, extra)); // 槍槓+フリテン用
        }
        _ => panic!("invalid meld action: {:?}", event.action),
    }

    let pl = &mut stg.players[s];
    for &t in &consumed {
        dec_tile(&mut pl.hand, t);
    }
}

fn event_dora(stg: &mut Stage, event: &EventDora) {
    stg.doras.push(event.tile);
}

fn event_offer(stg: &mut Stage, event: &EventOffer) {
    stg.phase = event.phase.clone();
    for o in &event.offers {
        stg.players[o.seat].bonus_time_ms = o.bonus_time_ms;
    }
}

fn event_win(stg: &mut Stage, event: &EventWin) {
    update_scores(stg, &event.delta_scores);
    stg.riichi_sticks = 0;
    let seats = event.contexts.iter().map(|ctx| ctx.seat).collect();
    stg.phase = Phase::RoundEnd(RoundEnd::Win(seats));
}

fn event_draw(stg: &mut Stage, event: &EventDraw) {
    update_after_discard_completed(stg);
    update_scores(stg, &event.delta_scores);
    stg.phase = Phase::RoundEnd(RoundEnd::Draw(event.draw_type));
}

// [Utility]
fn disable_ippatsu(stg: &mut Stage) {
    for s in 0..SEAT {
        stg.players[s].is_ippatsu = false;
    }
}

fn update_after_turn_action(stg: &mut Stage, event: &Event) {
    // ツモってきた牌と捨て牌が異なる場合,和了牌を更新
    // 暗槓,加槓も実質的に河に一枚捨てるのと同じことに注意
    let (seat, tile) = match event {
        Event::Discard(e) => (e.seat, Some(e.tile)),
        Event::Meld(e) => match e.action {
            ActionType::ConcealedKong => (e.seat, None), // 待ちが変わる可能性があるため常に更新
            ActionType::AddedKong => (e.seat, e.meld.extra()),
            _ => return,
        },
        _ => return,
    };

    let pl = &mut stg.players[seat];
    let same = match (pl.drawn, tile) {
        (Some(d), Some(t)) => d.to_normal() == t.to_normal(),
        _ => false,
    };
    if !same {
        pl.winning_tiles = winning_tiles(&pl.hand, &pl.melds);
        let furiten = pl
            .discards
            .iter()
            .any(|d| pl.winning_tiles.contains(&d.tile.to_normal()));
        pl.is_furiten = (pl.is_riichi && pl.is_furiten) || furiten;
    }
    pl.drawn = None;
}

fn update_after_discard_completed(stg: &mut Stage) {
    // 他のプレイヤーの捨て牌,または加槓した牌の見逃しフリテン
    if let Some((s, ActionType::Discard | ActionType::AddedKong, t)) = stg.last_tile {
        let t = t.to_normal();
        for s2 in 0..SEAT {
            let pl = &mut stg.players[s2];
            if pl.winning_tiles.contains(&t) {
                if s2 == s || pl.is_riichi {
                    pl.is_furiten = true; // 自分で和了牌を捨てた場合とリーチ後の見逃しはフリテン
                } else {
                    pl.is_furiten_other = true;
                }
            }
        }
    }

    // リーチがロンされずに成立した場合の供託への点棒追加
    if let Some(s) = stg.last_riichi.take() {
        stg.players[s].score -= RIICHI_STICK;
        stg.riichi_sticks += 1;
    }
}

fn update_scores(stg: &mut Stage, points: &[Point; SEAT]) {
    for s in 0..SEAT {
        stg.players[s].score = stg.players[s].score.saturating_add(points[s]);
    }
}

#[cfg(test)]
fn new_event(hands: [&str; SEAT]) -> Event {
    use super::string::tiles_from_string;
    let hands = hands.map(|h| tiles_from_string(h).unwrap());
    Event::new(0, 0, 0, 0, vec![Tile(TZ, 1)], [25000; SEAT], hands, 70)
}

#[test]
fn test_riichi_stick_and_furiten() {
    let mut ctrl = StageController::new(vec![]);
    ctrl.handle_event(new_event([
        "m123456789p11s11",
        "m123456789s23z11",
        "m11p23s23z1234567",
        "z1234567s456789",
    ]));
    assert_eq!(ctrl.get_stage().players[0].winning_tiles, vec![Tile(TP, 1), Tile(TS, 1)]);

    // 座席0がツモ切りリーチ
    ctrl.handle_event(Event::deal(0, Tile(TP, 9), false));
    ctrl.handle_event(Event::discard(0, Tile(TP, 9), true, true));
    let stg = ctrl.get_stage();
    assert!(stg.players[0].is_riichi && stg.players[0].is_double_riichi);
    assert_eq!(stg.players[0].score, 25000); // 宣言牌が通るまで供託なし

    ctrl.handle_event(Event::deal(1, Tile(TP, 1), false));
    let stg = ctrl.get_stage();
    assert_eq!(stg.players[0].score, 24000);
    assert_eq!(stg.riichi_sticks, 1);

    // 座席1が座席0の和了牌を切って通過 => 座席0はリーチ中のためフリテン
    ctrl.handle_event(Event::discard(1, Tile(TP, 1), true, false));
    assert!(!ctrl.get_stage().players[0].is_furiten);
    ctrl.handle_event(Event::deal(2, Tile(TM, 9), false));
    let stg = ctrl.get_stage();
    assert!(stg.players[0].is_furiten);
    assert!(!stg.players[1].is_furiten && !stg.players[1].is_furiten_other);
    assert!(stg.players[0].is_ippatsu);
    assert_eq!(ctrl.take_events().len(), 6);
    assert!(ctrl.take_events().is_empty());
}

#[test]
fn test_meld_updates_stage() {
    use super::string::tiles_from_string;
    let mut ctrl = StageController::new(vec![]);
    ctrl.handle_event(new_event(["m1", "z11", "", ""]));
    ctrl.handle_event(Event::deal(0, Tile(TZ, 1), false));
    ctrl.handle_event(Event::discard(0, Tile(TZ, 1), true, false));

    let m = ExposedMeld::pong([Tile(TZ, 1), Tile(TZ, 1)], Tile(TZ, 1), MeldSide::Left).unwrap();
    ctrl.handle_event(Event::meld(1, ActionType::Pong, m));
    let stg = ctrl.get_stage();
    assert_eq!(stg.turn, 1);
    assert!(!stg.players[1].is_menzen);
    assert_eq!(stg.players[1].hand_len(), 0);
    assert_eq!(stg.players[0].discards[0].meld, Some(1));
    assert_eq!(tiles_from_tile_table(&stg.players[0].hand), tiles_from_string("m1").unwrap());
}

#[test]
fn test_kong_counted_on_replacement() {
    let mut ctrl = StageController::new(vec![]);
    ctrl.handle_event(new_event(["m1", "z11m2", "", ""]));
    ctrl.handle_event(Event::deal(0, Tile(TZ, 1), false));
    ctrl.handle_event(Event::discard(0, Tile(TZ, 1), true, false));
    let m = ExposedMeld::pong([Tile(TZ, 1), Tile(TZ, 1)], Tile(TZ, 1), MeldSide::Left).unwrap();
    ctrl.handle_event(Event::meld(1, ActionType::Pong, m.clone()));
    ctrl.handle_event(Event::discard(1, Tile(TM, 2), false, false));
    ctrl.handle_event(Event::deal(1, Tile(TZ, 1), false));

    // 加槓の宣言だけでは槓は成立しない (槍槓の可能性)
    ctrl.handle_event(Event::meld(1, ActionType::AddedKong, m.add_to_kong(Tile(TZ, 1)).unwrap()));
    let stg = ctrl.get_stage();
    assert_eq!(stg.n_kan, 0);
    assert_eq!(stg.last_tile, Some((1, ActionType::AddedKong, Tile(TZ, 1))));

    ctrl.handle_event(Event::deal(1, Tile(TM, 3), true));
    let stg = ctrl.get_stage();
    assert_eq!(stg.n_kan, 1);
    assert!(stg.players[1].is_rinshan);
    assert_eq!(stg.players[1].hand_len(), 1);
}
