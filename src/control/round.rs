use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::common::*;
use super::possible_actions::*;
use super::stage_controller::StageController;
use super::wall::*;
use crate::error::{MahjongError, Res};
use crate::hand::Evaluation;
use crate::listener::Listener;
use crate::model::*;

use ActionType::*;

// 局の開始条件 (局の終了時には次局の開始条件を生成する)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSetup {
    pub round: usize,
    pub dealer: Seat,
    pub honba: usize,
    pub riichi_sticks: usize,
    pub scores: [Point; SEAT],
}

impl RoundSetup {
    // 東1局0本場
    pub fn first(rule: &Rule) -> Self {
        Self {
            round: 0,
            dealer: 0,
            honba: 0,
            riichi_sticks: 0,
            scores: [rule.initial_score; SEAT],
        }
    }

    fn change_dealer(&mut self) {
        self.dealer += 1;
        if self.dealer == SEAT {
            self.dealer = 0;
            self.round += 1;
        }
    }
}

// 1局分の状態遷移を管理する
// 各操作は状態遷移で発生したイベントを返却し,同時に登録されたリスナーに通知する
// 要求された操作が現在の状態で提示されていない場合はIllegalOperationを返却し,状態は変化しない
#[derive(Debug)]
pub struct RoundController {
    rule: Rule,
    opts: ScoringOptions,
    setup: RoundSetup,
    ctrl: StageController,
    wall: Vec<Tile>,
    n_deal: usize,                  // ツモ山から引いた枚数 (嶺上牌を除く)
    melding: Option<Action>,        // 直前のチー,ポン (喰い替えの判定用)
    kan_dora: Option<Tile>,         // 明槓,加槓の槓ドラ (打牌後にめくる)
    pending: Vec<Offer>,            // 現在の提示
    responses: Vec<(Seat, Action)>, // 鳴き・ロンの応答 (全員揃うまで保留)
    offered_at: Instant,
    generation: usize,              // 提示を更新するごとに+1
    next_setup: Option<RoundSetup>,
}

impl RoundController {
    pub fn new(
        rule: Rule,
        setup: RoundSetup,
        wall: Vec<Tile>,
        listeners: Vec<Box<dyn Listener>>,
    ) -> Res<Self> {
        if wall.len() != WALL {
            return Err(MahjongError::Config {
                message: format!("wall must have {} tiles: {}", WALL, wall.len()),
            });
        }
        Ok(Self {
            opts: rule.scoring_options(),
            rule,
            setup,
            ctrl: StageController::new(listeners),
            wall,
            n_deal: 0,
            melding: None,
            kan_dora: None,
            pending: vec![],
            responses: vec![],
            offered_at: Instant::now(),
            generation: 0,
            next_setup: None,
        })
    }

    #[inline]
    pub fn get_stage(&self) -> &Stage {
        self.ctrl.get_stage()
    }

    #[inline]
    pub fn get_rule(&self) -> &Rule {
        &self.rule
    }

    // 応答待ちの提示 (応答済みの座席は含まない)
    pub fn pending_offers(&self) -> Vec<&Offer> {
        self.pending
            .iter()
            .filter(|o| !self.has_responded(o.seat))
            .collect()
    }

    // 局終了後に確定する次局の開始条件
    pub fn next_setup(&self) -> Option<&RoundSetup> {
        self.next_setup.as_ref()
    }

    // 配牌 Dealing -> AwaitingDraw(親)
    pub fn start(&mut self) -> Res<Vec<Event>> {
        if self.get_stage().phase != Phase::Dealing {
            return Err(self.illegal(self.setup.dealer, "round already started"));
        }

        let mut hands: [Vec<Tile>; SEAT] = Default::default();
        for s in 0..SEAT {
            let i = WALL_HANDS + s * HAND;
            hands[s] = self.wall[i..i + HAND].to_vec();
        }
        let su = &self.setup;
        let event = Event::new(
            su.round,
            su.dealer,
            su.honba,
            su.riichi_sticks,
            vec![self.wall[WALL_DORA]],
            su.scores,
            hands,
            WALL - WALL_DRAWS,
        );
        self.ctrl.handle_event(event);
        for s in 0..SEAT {
            self.ctrl.set_bonus_time(s, self.rule.bonus_turn_time_ms);
        }
        debug!(
            "round {} dealer {} honba {} started",
            su.round, su.dealer, su.honba
        );

        self.offer(Phase::AwaitingDraw(self.setup.dealer), vec![]);
        Ok(self.ctrl.take_events())
    }

    // ツモ AwaitingDraw(seat) -> AwaitingDiscard(seat)
    // 牌山が残っていない場合は流局
    pub fn draw(&mut self, seat: Seat) -> Res<Vec<Event>> {
        if self.get_stage().phase != Phase::AwaitingDraw(seat) {
            return Err(self.illegal(seat, "not waiting for a draw by this seat"));
        }

        if self.get_stage().wall_count == 0 {
            self.exhaustive_draw();
        } else {
            let t = self.wall[WALL_DRAWS + self.n_deal];
            self.n_deal += 1;
            debug!("seat {} draws {}", seat, t);
            self.ctrl.handle_event(Event::deal(seat, t, false));
            self.offer_turn_actions(seat);
        }
        Ok(self.ctrl.take_events())
    }

    // ツモ番の操作 (打牌,リーチ,ツモ和了,暗槓,加槓)
    pub fn turn_action(&mut self, seat: Seat, act: Action) -> Res<Vec<Event>> {
        if act.ty.is_call() {
            return Err(self.illegal(seat, format!("not a turn action: {}", act)));
        }
        if self.get_stage().phase != Phase::AwaitingDiscard(seat) {
            return Err(self.illegal(seat, format!("not this seat's turn: {}", act)));
        }
        if !self.is_offered(seat, &act) {
            return Err(self.illegal(seat, format!("action not offered: {}", act)));
        }

        self.consume_time(seat, Instant::now());
        self.do_turn_action(seat, act)?;
        Ok(self.ctrl.take_events())
    }

    // 他家の打牌(加槓)に対する応答 (スキップ,チー,ポン,明槓,ロン)
    // 提示したすべての座席が応答するまで結果は確定しない
    pub fn call_action(&mut self, seat: Seat, act: Action) -> Res<Vec<Event>> {
        if !act.ty.is_call() {
            return Err(self.illegal(seat, format!("not a call action: {}", act)));
        }
        if !matches!(self.get_stage().phase, Phase::AwaitingClaims(_)) {
            return Err(self.illegal(seat, format!("no claim window: {}", act)));
        }
        if self.has_responded(seat) {
            return Err(self.illegal(seat, "already responded"));
        }
        if !self.is_offered(seat, &act) {
            return Err(self.illegal(seat, format!("action not offered: {}", act)));
        }

        self.consume_time(seat, Instant::now());
        self.respond(seat, act)?;
        Ok(self.ctrl.take_events())
    }

    // 持ち時間切れ 鳴き・ロンはスキップ,ツモ番はツモ切り(鳴き後は提示された先頭の牌)として扱う
    pub fn timeout(&mut self, seat: Seat) -> Res<Vec<Event>> {
        self.expire(seat)?;
        Ok(self.ctrl.take_events())
    }

    // nowの時点で持ち時間を使い切った座席をすべてタイムアウトさせる
    pub fn expire_overdue(&mut self, now: Instant) -> Res<Vec<Event>> {
        let base = Duration::from_millis(self.rule.base_turn_time_ms);
        let elapsed = now.saturating_duration_since(self.offered_at);
        let overdue: Vec<Seat> = self
            .pending_offers()
            .iter()
            .filter(|o| elapsed >= base + Duration::from_millis(o.bonus_time_ms))
            .map(|o| o.seat)
            .collect();

        let generation = self.generation;
        for s in overdue {
            // 先のタイムアウトで局面が進んだ場合,残りの座席は新しい提示の対象
            if self.generation != generation {
                break;
            }
            self.expire(s)?;
        }
        Ok(self.ctrl.take_events())
    }

    // [Turn Action]
    fn do_turn_action(&mut self, seat: Seat, act: Action) -> Res {
        debug!("seat {} turn action {}", seat, act);
        match act.ty {
            Discard | Riichi => {
                let t = act.tiles[0];
                let is_drawn = self.get_stage().players[seat].drawn == Some(t);
                self.melding = None;
                self.ctrl
                    .handle_event(Event::discard(seat, t, is_drawn, act.ty == Riichi));
                self.flush_kan_dora();
                self.offer_calls(seat, t, false);
            }
            Tsumo => self.win_by_tsumo(seat)?,
            ConcealedKong => {
                let ts = &act.tiles;
                let m = ExposedMeld::concealed_kong([ts[0], ts[1], ts[2], ts[3]])?;
                self.ctrl.handle_event(Event::meld(seat, ConcealedKong, m));
                self.flush_kan_dora();
                // 暗槓の槓ドラは嶺上牌のツモ前
                let kd = self.next_dora_indicator();
                self.ctrl.handle_event(Event::dora(kd));
                self.deal_replacement(seat);
                self.offer_turn_actions(seat);
            }
            AddedKong => {
                let t = act.tiles[0];
                let pong = self.get_stage().players[seat]
                    .melds
                    .iter()
                    .find(|m| m.is_open() && !m.is_kong() && m.meld() == Meld::triplet(t))
                    .cloned()
                    .ok_or_else(|| MahjongError::illegal(seat, format!("no pong for {}", t)))?;
                let m = pong.add_to_kong(t)?;
                self.ctrl.handle_event(Event::meld(seat, AddedKong, m));
                self.flush_kan_dora();
                self.offer_calls(seat, t, true); // 槍槓
            }
            _ => return Err(self.illegal(seat, format!("not a turn action: {}", act))),
        }
        Ok(())
    }

    fn offer_turn_actions(&mut self, seat: Seat) {
        let acts = calc_possible_turn_actions(self.get_stage(), seat, self.melding.as_ref(), &self.opts);
        self.offer(Phase::AwaitingDiscard(seat), vec![(seat, acts)]);
    }

    // 打牌(加槓)に対する他家の操作を提示 誰も操作できない場合はそのまま次へ進む
    fn offer_calls(&mut self, seat: Seat, tile: Tile, is_chankan: bool) {
        let offers = calc_possible_call_actions(self.get_stage(), seat, tile, is_chankan, &self.opts);
        if !offers.is_empty() {
            self.offer(Phase::AwaitingClaims(seat), offers);
        } else if is_chankan {
            self.complete_added_kong(seat);
        } else {
            self.pass_turn(seat);
        }
    }

    fn pass_turn(&mut self, seat: Seat) {
        if self.get_stage().wall_count == 0 {
            self.exhaustive_draw();
        } else {
            self.offer(Phase::AwaitingDraw(next_seat(seat)), vec![]);
        }
    }

    // 加槓が成立 (槍槓なし) 嶺上牌をツモり,槓ドラは打牌後
    fn complete_added_kong(&mut self, seat: Seat) {
        self.kan_dora = Some(self.next_dora_indicator());
        self.deal_replacement(seat);
        self.offer_turn_actions(seat);
    }

    fn deal_replacement(&mut self, seat: Seat) {
        let n_kan = self.get_stage().n_kan;
        assert!(n_kan < MAX_KAN);
        let t = self.wall[WALL_REPLACEMENT + n_kan];
        self.ctrl.handle_event(Event::deal(seat, t, true));
    }

    fn next_dora_indicator(&self) -> Tile {
        self.wall[WALL_DORA + self.get_stage().doras.len()]
    }

    fn flush_kan_dora(&mut self) {
        if let Some(kd) = self.kan_dora.take() {
            self.ctrl.handle_event(Event::dora(kd));
        }
    }

    // [Call Action]
    fn respond(&mut self, seat: Seat, act: Action) -> Res {
        debug!("seat {} responds {}", seat, act);
        self.responses.push((seat, act));
        if self.responses.len() == self.pending.len() {
            self.resolve_claims()?;
        }
        Ok(())
    }

    // 全員の応答が揃った時点で優先順位に従って確定
    // ロン(複数可) > 明槓,ポン > チー > 全員スキップ
    fn resolve_claims(&mut self) -> Res {
        let Some((from, ty, tile)) = self.get_stage().last_tile else {
            panic!("claim window without a target tile");
        };
        let is_chankan = ty == AddedKong;
        let mut responses = std::mem::take(&mut self.responses);
        responses.sort_by_key(|&(s, _)| calc_seat_offset(from, s));
        self.pending.clear();

        let mut rons: Vec<Seat> = responses
            .iter()
            .filter(|(_, a)| a.ty == Rong)
            .map(|&(s, _)| s)
            .collect();
        if !rons.is_empty() {
            if !self.rule.allow_multi_ron {
                rons.truncate(1); // 頭ハネ
            }
            self.ctrl
                .handle_event(Event::resolve((from, tile), Rong, rons.clone(), responses));
            return self.win_by_rong(from, tile, &rons, is_chankan);
        }

        // 同じ優先度の鳴きが複数の座席から選択されることはない
        let best = responses
            .iter()
            .filter(|(_, a)| a.ty != Skip)
            .max_by_key(|(_, a)| a.ty.call_priority())
            .cloned();
        match best {
            Some((s, act)) => {
                self.ctrl
                    .handle_event(Event::resolve((from, tile), act.ty, vec![s], responses));
                self.apply_call(s, from, tile, act)?;
            }
            None => {
                self.ctrl
                    .handle_event(Event::resolve((from, tile), Skip, vec![], responses));
                if is_chankan {
                    self.complete_added_kong(from);
                } else {
                    self.pass_turn(from);
                }
            }
        }
        Ok(())
    }

    fn apply_call(&mut self, seat: Seat, from: Seat, tile: Tile, act: Action) -> Res {
        let side = MeldSide::from_seats(seat, from);
        let ts = &act.tiles;
        match act.ty {
            Chow | Pong => {
                let m = if act.ty == Chow {
                    ExposedMeld::chow([ts[0], ts[1]], tile)?
                } else {
                    ExposedMeld::pong([ts[0], ts[1]], tile, side)?
                };
                self.ctrl.handle_event(Event::meld(seat, act.ty, m));
                self.melding = Some(act);
            }
            Kong => {
                let m = ExposedMeld::kong([ts[0], ts[1], ts[2]], tile, side)?;
                self.ctrl.handle_event(Event::meld(seat, Kong, m));
                self.melding = None;
                self.kan_dora = Some(self.next_dora_indicator());
                self.deal_replacement(seat);
            }
            _ => return Err(self.illegal(seat, format!("not a call: {}", act))),
        }
        self.offer_turn_actions(seat);
        Ok(())
    }

    // [Offer]
    fn offer(&mut self, phase: Phase, offers: Vec<(Seat, Vec<Action>)>) {
        let stg = self.get_stage();
        let offers: Vec<Offer> = offers
            .into_iter()
            .map(|(seat, actions)| Offer {
                seat,
                actions,
                bonus_time_ms: stg.players[seat].bonus_time_ms,
            })
            .collect();
        self.pending = offers.clone();
        self.responses.clear();
        self.offered_at = Instant::now();
        self.generation += 1;
        self.ctrl.handle_event(Event::offer(phase, offers));
    }

    fn is_offered(&self, seat: Seat, act: &Action) -> bool {
        self.pending.iter().any(|o| o.seat == seat && o.contains(act))
    }

    fn has_responded(&self, seat: Seat) -> bool {
        self.responses.iter().any(|&(s, _)| s == seat)
    }

    // 基本時間を超えた分を追加持ち時間から差し引く
    fn consume_time(&mut self, seat: Seat, now: Instant) {
        let elapsed = now.saturating_duration_since(self.offered_at).as_millis() as u64;
        let over = elapsed.saturating_sub(self.rule.base_turn_time_ms);
        let bonus = self.get_stage().players[seat].bonus_time_ms.saturating_sub(over);
        self.ctrl.set_bonus_time(seat, bonus);
    }

    fn expire(&mut self, seat: Seat) -> Res {
        let phase = self.get_stage().phase.clone();
        match phase {
            Phase::AwaitingClaims(_) if self.pending.iter().any(|o| o.seat == seat) && !self.has_responded(seat) => {
                info!("seat {} timed out: skip", seat);
                self.ctrl.set_bonus_time(seat, 0);
                self.respond(seat, Action::skip())
            }
            Phase::AwaitingDiscard(s) if s == seat => {
                let drawn = self.get_stage().players[seat].drawn;
                let act = match drawn {
                    Some(t) => Action::discard(t),
                    None => self
                        .pending
                        .iter()
                        .flat_map(|o| o.actions.iter())
                        .find(|a| a.ty == Discard)
                        .cloned()
                        .ok_or_else(|| MahjongError::illegal(seat, "no discard offered"))?,
                };
                info!("seat {} timed out: {}", seat, act);
                self.ctrl.set_bonus_time(seat, 0);
                self.do_turn_action(seat, act)
            }
            _ => Err(self.illegal(seat, "nothing to time out")),
        }
    }

    // [Round End]
    fn ura_doras(&self) -> Vec<Tile> {
        let n = self.get_stage().doras.len();
        self.wall[WALL_URA_DORA..WALL_URA_DORA + n].to_vec()
    }

    fn win_by_tsumo(&mut self, seat: Seat) -> Res {
        let ura_doras = self.ura_doras();
        let stg = self.get_stage();
        let ev = evaluate_tsumo(stg, seat, &ura_doras, &self.opts)
            .ok_or_else(|| MahjongError::illegal(seat, "no winning hand"))?;

        let is_dealer = stg.is_dealer(seat);
        let payments = ev.point.payments(is_dealer);
        let (_, non_dealer, dealer) = payments;
        let honba = stg.honba as Point * HONBA_RON / 3;

        let mut d_scores = [0; SEAT];
        for s in 0..SEAT {
            if s == seat {
                continue;
            }
            let p = if stg.is_dealer(s) { dealer } else { non_dealer }.saturating_add(honba);
            d_scores[s] -= p;
            d_scores[seat] = d_scores[seat].saturating_add(p);
        }
        d_scores[seat] = d_scores[seat].saturating_add(stg.riichi_sticks as Point * RIICHI_STICK);

        let pl = &stg.players[seat];
        let wt = pl.drawn.ok_or_else(|| MahjongError::illegal(seat, "no drawn tile"))?;
        let mut h = pl.hand;
        dec_tile(&mut h, wt);
        let ctx = WinContext {
            seat,
            from: seat,
            hand: tiles_from_tile_table(&h),
            winning_tile: wt,
            melds: pl.melds.clone(),
            is_dealer,
            decomposition: ev.decomposition,
            title: ev.point.title(),
            point: ev.point,
            payments,
            delta_scores: d_scores,
        };
        debug!("seat {} tsumo: {}", seat, ctx.point);

        let event = Event::win(vec![ctx], stg.doras.clone(), ura_doras, stg.get_scores(), d_scores);
        self.ctrl.handle_event(event);
        self.finish_round(&[seat], false);
        Ok(())
    }

    fn win_by_rong(&mut self, from: Seat, tile: Tile, winners: &[Seat], is_chankan: bool) -> Res {
        let ura_doras = self.ura_doras();
        let stg = self.get_stage();
        let opts = self.opts;
        let all_ura = self.rule.ura_dora_for_all_winners;

        // 和了者ごとの評価は互いに独立しているので並列に行う
        let evals: Vec<Option<Evaluation>> = std::thread::scope(|sc| {
            let handles: Vec<_> = winners
                .iter()
                .enumerate()
                .map(|(i, &s)| {
                    let ura: &[Tile] = if i == 0 || all_ura { &ura_doras } else { &[] };
                    sc.spawn(move || evaluate_rong(stg, s, tile, is_chankan, ura, &opts))
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        });

        let mut ctxs = vec![];
        let mut total = [0 as Point; SEAT];
        for (i, (&s, ev)) in winners.iter().zip(evals).enumerate() {
            let ev = ev.ok_or_else(|| MahjongError::illegal(s, "no winning hand"))?;
            let is_dealer = stg.is_dealer(s);
            let payments = ev.point.payments(is_dealer);

            let mut d_scores = [0 as Point; SEAT];
            let mut p = payments.0;
            if i == 0 {
                // 本場,供託は放銃者に一番近い和了者
                p = p.saturating_add(stg.honba as Point * HONBA_RON);
                d_scores[s] = d_scores[s].saturating_add(stg.riichi_sticks as Point * RIICHI_STICK);
            }
            d_scores[from] -= p;
            d_scores[s] = d_scores[s].saturating_add(p);
            for x in 0..SEAT {
                total[x] = total[x].saturating_add(d_scores[x]);
            }

            let pl = &stg.players[s];
            let ctx = WinContext {
                seat: s,
                from,
                hand: tiles_from_tile_table(&pl.hand),
                winning_tile: tile,
                melds: pl.melds.clone(),
                is_dealer,
                decomposition: ev.decomposition,
                title: ev.point.title(),
                point: ev.point,
                payments,
                delta_scores: d_scores,
            };
            debug!("seat {} rong from {}: {}", s, from, ctx.point);
            ctxs.push(ctx);
        }

        let event = Event::win(ctxs, stg.doras.clone(), ura_doras, stg.get_scores(), total);
        self.ctrl.handle_event(event);
        self.finish_round(winners, false);
        Ok(())
    }

    fn exhaustive_draw(&mut self) {
        let stg = self.get_stage();
        let mut tenpais = [false; SEAT];
        let mut hands: [Vec<Tile>; SEAT] = Default::default();
        for s in 0..SEAT {
            let pl = &stg.players[s];
            tenpais[s] = !pl.winning_tiles.is_empty();
            if tenpais[s] {
                hands[s] = tiles_from_tile_table(&pl.hand);
            }
        }

        // 聴牌料 (不聴罰符3000点を聴牌者で分配)
        let n_tenpai = tenpais.iter().filter(|&&t| t).count();
        let (pay, recv) = match n_tenpai {
            1 => (1000, 3000),
            2 => (1500, 1500),
            3 => (3000, 1000),
            _ => (0, 0), // 全員聴牌 or 全員ノーテン
        };
        let mut d_scores = [0; SEAT];
        for s in 0..SEAT {
            d_scores[s] = if tenpais[s] { recv } else { -pay };
        }
        debug!("exhaustive draw: tenpai {:?}", tenpais);

        let is_dealer_tenpai = tenpais[stg.dealer];
        self.ctrl
            .handle_event(Event::draw(DrawType::Exhaustive, tenpais, hands, d_scores));
        self.finish_round(&[], is_dealer_tenpai);
    }

    // 次局の開始条件を確定
    fn finish_round(&mut self, winners: &[Seat], is_dealer_tenpai: bool) {
        self.pending.clear();
        self.responses.clear();

        let stg = self.get_stage();
        let mut next = RoundSetup {
            round: stg.round,
            dealer: stg.dealer,
            honba: stg.honba,
            riichi_sticks: stg.riichi_sticks,
            scores: stg.get_scores(),
        };
        let is_dealer_win = winners.contains(&stg.dealer);
        if winners.is_empty() {
            // 流局: 本場を積み,親が聴牌していなければ親流れ
            next.honba += 1;
            if !is_dealer_tenpai {
                next.change_dealer();
            }
        } else if is_dealer_win {
            next.honba += 1; // 連荘
        } else {
            next.honba = 0;
            next.change_dealer();
        }
        self.next_setup = Some(next);
    }

    fn illegal(&self, seat: Seat, message: impl Into<String>) -> MahjongError {
        let e = MahjongError::illegal(seat, message);
        warn!("{} (phase: {:?})", e, self.get_stage().phase);
        e
    }
}

#[cfg(test)]
fn new_round(hands: [&str; SEAT], draws: &str) -> RoundController {
    use super::string::tiles_from_string;
    let hands = hands.map(|h| tiles_from_string(h).unwrap());
    let draws = tiles_from_string(draws).unwrap();
    let wall = create_wall_with(0, 0, &hands, &draws).unwrap();
    let rule = Rule {
        red5: 0,
        ..Default::default()
    };
    let setup = RoundSetup::first(&rule);
    RoundController::new(rule, setup, wall, vec![]).unwrap()
}

#[test]
fn test_illegal_operations() {
    let mut rc = new_round([""; SEAT], "m1");
    assert!(rc.draw(0).is_err()); // 配牌前
    assert!(RoundController::new(Rule::default(), RoundSetup::first(&Rule::default()), vec![], vec![]).is_err());

    rc.start().unwrap();
    assert!(rc.start().is_err());
    assert_eq!(
        rc.draw(1).unwrap_err(),
        MahjongError::IllegalOperation {
            seat: 1,
            message: "not waiting for a draw by this seat".to_string(),
        }
    );
    assert!(rc.turn_action(0, Action::discard(Tile(TM, 1))).is_err());

    let evs = rc.draw(0).unwrap();
    assert!(matches!(evs[0], Event::Deal(_)));
    assert!(matches!(evs[1], Event::Offer(_)));
    let step = rc.get_stage().step;

    // 手牌にない牌,鳴きの応答,他家のツモ
    let missing = (0..TYPE)
        .flat_map(|ti| (1..TNUM).map(move |ni| Tile(ti, ni)))
        .filter(|t| t.0 != TZ || t.1 <= DR)
        .find(|&t| rc.get_stage().players[0].count_tile(t) == 0)
        .unwrap();
    assert!(rc.turn_action(0, Action::discard(missing)).is_err());
    assert!(rc.call_action(1, Action::skip()).is_err());
    assert!(rc.draw(1).is_err());
    assert_eq!(rc.get_stage().step, step);
    assert_eq!(rc.get_stage().phase, Phase::AwaitingDiscard(0));

    assert!(rc.turn_action(0, Action::discard(Tile(TM, 1))).is_ok());
    assert!(rc.next_setup().is_none());
}

#[test]
fn test_concealed_kong() {
    let mut rc = new_round(["m123p456s789z1112", "", "", ""], "z1");
    rc.start().unwrap();
    rc.draw(0).unwrap();

    let kong = Action::concealed_kong(vec![Tile(TZ, 1); 4]);
    assert!(rc.pending_offers()[0].contains(&kong));
    let evs = rc.turn_action(0, kong).unwrap();
    assert!(matches!(evs[0], Event::Meld(_)));
    assert!(matches!(evs[1], Event::Dora(_)));
    match &evs[2] {
        Event::Deal(e) => assert!(e.is_replacement),
        e => panic!("unexpected event: {:?}", e),
    }
    assert!(matches!(evs[3], Event::Offer(_)));

    let stg = rc.get_stage();
    assert_eq!(stg.n_kan, 1);
    assert_eq!(stg.doras, vec![rc.wall[WALL_DORA], rc.wall[WALL_DORA + 1]]);
    assert_eq!(stg.wall_count, WALL - WALL_DRAWS - 2);
    assert_eq!(stg.players[0].drawn, Some(rc.wall[WALL_REPLACEMENT]));
    assert_eq!(stg.phase, Phase::AwaitingDiscard(0));
    assert!(stg.players[0].is_menzen);
}

#[test]
fn test_round_setup() {
    let rule = Rule::default();
    let mut su = RoundSetup::first(&rule);
    assert_eq!(su.scores, [25000; SEAT]);
    for _ in 0..SEAT {
        su.change_dealer();
    }
    assert_eq!((su.round, su.dealer), (1, 0));
}
