use super::common::*;
use crate::hand::{evaluate_hand, tenpai_discards, winning_tiles, Evaluation};
use crate::model::*;

// 和了判定に使用する状況 (組み合わせ以外の役)
pub fn calc_game_status(stg: &Stage, seat: Seat, is_drawn: bool, is_chankan: bool) -> GameStatus {
    let pl = &stg.players[seat];
    let is_last = stg.wall_count == 0;
    GameStatus {
        prevalent_wind: stg.get_prevalent_wind(),
        seat_wind: stg.get_seat_wind(seat),
        is_drawn,
        turn: pl.discards.len() + 1,
        no_calls: stg.players.iter().all(|p| p.melds.is_empty()),
        riichi: pl.is_riichi,
        double_riichi: pl.is_double_riichi,
        ippatsu: pl.is_ippatsu,
        haitei: is_drawn && is_last && !pl.is_rinshan,
        houtei: !is_drawn && is_last && !is_chankan,
        rinshan: is_drawn && pl.is_rinshan,
        chankan: is_chankan,
    }
}

// ツモ和了の評価 (役なしはNone)
pub fn evaluate_tsumo(stg: &Stage, seat: Seat, ura_doras: &[Tile], opts: &ScoringOptions) -> Option<Evaluation> {
    let pl = &stg.players[seat];
    let wt = pl.drawn?;
    let st = calc_game_status(stg, seat, true, false);
    evaluate_hand(&pl.hand, &pl.melds, wt, &st, &stg.doras, ura_doras, opts)
        .filter(|ev| ev.point.is_valid())
}

// ロン和了の評価 (役なしはNone) 手牌に和了牌を加えて評価する
pub fn evaluate_rong(
    stg: &Stage,
    seat: Seat,
    tile: Tile,
    is_chankan: bool,
    ura_doras: &[Tile],
    opts: &ScoringOptions,
) -> Option<Evaluation> {
    let pl = &stg.players[seat];
    let mut hand = pl.hand;
    inc_tile(&mut hand, tile);
    let st = calc_game_status(stg, seat, false, is_chankan);
    evaluate_hand(&hand, &pl.melds, tile, &st, &stg.doras, ura_doras, opts).filter(|ev| ev.point.is_valid())
}

// [Turn Action Check]
// ツモ番のプレイヤーが可能な操作の一覧
// melding: 直前にチー,ポンを行った場合はその操作 (ツモ牌がなく,槓やツモ和了はできない)
pub fn calc_possible_turn_actions(
    stg: &Stage,
    seat: Seat,
    melding: Option<&Action>,
    opts: &ScoringOptions,
) -> Vec<Action> {
    let mut acts = check_discard(stg, seat, melding);
    if melding.is_none() {
        acts.append(&mut check_riichi(stg, seat));
        acts.append(&mut check_concealed_kong(stg, seat));
        acts.append(&mut check_added_kong(stg, seat));
        acts.append(&mut check_tsumo(stg, seat, opts));
    }
    acts
}

fn check_discard(stg: &Stage, seat: Seat, melding: Option<&Action>) -> Vec<Action> {
    let pl = &stg.players[seat];
    if pl.is_riichi {
        // リーチ後はツモ切りのみ
        return pl.drawn.map(Action::discard).into_iter().collect();
    }

    let prohibited = melding.map(calc_prohibited_discards).unwrap_or_default();
    let mut tiles = tiles_from_tile_table(&pl.hand);
    tiles.dedup();
    tiles
        .into_iter()
        .filter(|t| !prohibited.contains(t))
        .map(Action::discard)
        .collect()
}

fn check_riichi(stg: &Stage, seat: Seat) -> Vec<Action> {
    let pl = &stg.players[seat];
    if stg.wall_count < SEAT || pl.is_riichi || !pl.is_menzen || pl.score < RIICHI_STICK {
        return vec![];
    }

    tenpai_discards(&pl.hand, &pl.melds)
        .into_iter()
        .map(|(d, _)| Action::riichi(d))
        .collect()
}

fn check_tsumo(stg: &Stage, seat: Seat, opts: &ScoringOptions) -> Vec<Action> {
    // 和了形と役の有無のみを判定するので裏ドラは不要
    if evaluate_tsumo(stg, seat, &[], opts).is_some() {
        vec![Action::tsumo()]
    } else {
        vec![]
    }
}

fn can_kong(stg: &Stage) -> bool {
    stg.wall_count > 0 && stg.n_kan < MAX_KAN
}

fn check_concealed_kong(stg: &Stage, seat: Seat) -> Vec<Action> {
    if !can_kong(stg) {
        return vec![];
    }

    let pl = &stg.players[seat];
    let mut acts = vec![];
    if pl.is_riichi {
        // リーチ中でも待ちが変わらない暗槓は可能 (ツモ牌のみ)
        let Some(d) = pl.drawn else {
            return vec![];
        };
        let t = d.to_normal();
        if pl.hand[t.0][t.1] != TILE {
            return vec![];
        }
        let mut h = pl.hand;
        dec_tile(&mut h, d);
        let before = winning_tiles(&h, &pl.melds);

        let Some(ks) = pick_tiles(&pl.hand, t, TILE).pop() else {
            return vec![];
        };
        let Ok(kong) = ExposedMeld::concealed_kong([ks[0], ks[1], ks[2], ks[3]]) else {
            return vec![];
        };
        let mut h = pl.hand;
        for &k in &ks {
            dec_tile(&mut h, k);
        }
        let mut melds = pl.melds.clone();
        melds.push(kong);
        if !before.is_empty() && winning_tiles(&h, &melds) == before {
            acts.push(Action::concealed_kong(ks));
        }
    } else {
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                if pl.hand[ti][ni] == TILE {
                    for ks in pick_tiles(&pl.hand, Tile(ti, ni), TILE) {
                        acts.push(Action::concealed_kong(ks));
                    }
                }
            }
        }
    }

    acts
}

fn check_added_kong(stg: &Stage, seat: Seat) -> Vec<Action> {
    let pl = &stg.players[seat];
    if !can_kong(stg) || pl.is_riichi {
        return vec![];
    }

    let mut acts = vec![];
    for m in &pl.melds {
        if m.is_open() && !m.is_kong() && m.meld().kind() == MeldKind::Triplet {
            for t in tiles_with_red5(&pl.hand, m.meld().anchor()) {
                acts.push(Action::added_kong(t));
            }
        }
    }
    acts
}

// [Call Action Check]
// ツモ番のプレイヤーが打牌(加槓)を行ったあとに,他のプレイヤーが可能な操作の一覧
// スキップ以外の操作がない座席は含まない
// is_chankan: 加槓に対する応答 (ロンのみ)
pub fn calc_possible_call_actions(
    stg: &Stage,
    turn: Seat,
    tile: Tile,
    is_chankan: bool,
    opts: &ScoringOptions,
) -> Vec<(Seat, Vec<Action>)> {
    let mut res = vec![];
    for i in 1..SEAT {
        let s = (turn + i) % SEAT;
        let mut acts = vec![];
        if !is_chankan {
            if i == 1 {
                acts.append(&mut check_chow(stg, s, tile));
            }
            acts.append(&mut check_pong(stg, s, tile));
            acts.append(&mut check_kong(stg, s, tile));
        }
        acts.append(&mut check_rong(stg, s, tile, is_chankan, opts));

        if !acts.is_empty() {
            acts.insert(0, Action::skip());
            res.push((s, acts));
        }
    }
    res
}

fn can_call(stg: &Stage, seat: Seat) -> bool {
    // 河底牌は鳴けない
    stg.wall_count > 0 && !stg.players[seat].is_riichi
}

fn check_chow(stg: &Stage, seat: Seat, tile: Tile) -> Vec<Action> {
    let d = tile.to_normal();
    if !can_call(stg, seat) || !d.is_suit() {
        return vec![];
    }

    // l2 l1 d r1 r2 の3通りの組み合わせ
    let h = &stg.players[seat].hand;
    let n = d.1;
    let mut pairs: Vec<(Tnum, Tnum)> = vec![];
    if n >= 3 {
        pairs.push((n - 2, n - 1));
    }
    if (2..=8).contains(&n) {
        pairs.push((n - 1, n + 1));
    }
    if n <= 7 {
        pairs.push((n + 1, n + 2));
    }

    let mut acts = vec![];
    for (a, b) in pairs {
        for ta in pick_tiles(h, Tile(d.0, a), 1) {
            for tb in pick_tiles(h, Tile(d.0, b), 1) {
                acts.push(Action::chow(vec![ta[0], tb[0]]));
            }
        }
    }
    acts.retain(|act| has_discard_after(h, act));
    acts
}

fn check_pong(stg: &Stage, seat: Seat, tile: Tile) -> Vec<Action> {
    if !can_call(stg, seat) {
        return vec![];
    }
    let h = &stg.players[seat].hand;
    pick_tiles(h, tile, 2)
        .into_iter()
        .map(Action::pong)
        .filter(|act| has_discard_after(h, act))
        .collect()
}

// 喰い替えの禁止により打牌できる牌がなくなる鳴きは不可
fn has_discard_after(hand: &TileTable, act: &Action) -> bool {
    let mut h = *hand;
    for &t in &act.tiles {
        dec_tile(&mut h, t);
    }
    let prohibited = calc_prohibited_discards(act);
    tiles_from_tile_table(&h).iter().any(|t| !prohibited.contains(t))
}

fn check_kong(stg: &Stage, seat: Seat, tile: Tile) -> Vec<Action> {
    if !can_call(stg, seat) || !can_kong(stg) {
        return vec![];
    }
    let t = tile.to_normal();
    if stg.players[seat].hand[t.0][t.1] != 3 {
        return vec![];
    }
    pick_tiles(&stg.players[seat].hand, t, 3)
        .into_iter()
        .map(Action::kong)
        .collect()
}

fn check_rong(stg: &Stage, seat: Seat, tile: Tile, is_chankan: bool, opts: &ScoringOptions) -> Vec<Action> {
    let pl = &stg.players[seat];
    if pl.is_furiten || pl.is_furiten_other {
        return vec![];
    }
    if !pl.winning_tiles.contains(&tile.to_normal()) {
        return vec![];
    }
    if evaluate_rong(stg, seat, tile, is_chankan, &[], opts).is_some() {
        vec![Action::rong()]
    } else {
        vec![]
    }
}

// 鳴き後の組み換え(喰い替え)で捨てられない牌
pub fn calc_prohibited_discards(act: &Action) -> Vec<Tile> {
    let mut v = vec![];
    match act.ty {
        ActionType::Chow => {
            // 赤5が混じっている可能性を考慮
            let (t0, t1) = (act.tiles[0].to_normal(), act.tiles[1].to_normal());
            let ti = t0.0;
            let s = t0.1.min(t1.1);
            let b = t0.1.max(t1.1);
            if s + 1 == b {
                // 両面・辺張: 鳴いた牌と筋の牌
                if s > 1 {
                    v.push(Tile(ti, s - 1));
                }
                if b < 9 {
                    v.push(Tile(ti, b + 1));
                }
            } else {
                // 嵌張: 鳴いた牌
                v.push(Tile(ti, s + 1));
            }
        }
        ActionType::Pong => v.push(act.tiles[0].to_normal()),
        _ => return vec![],
    }

    if let Some(t) = v.iter().find(|t| t.is_suit() && t.1 == 5) {
        v.push(Tile(t.0, 0));
    }
    v
}

#[cfg(test)]
fn stage_with(hands: [&str; SEAT]) -> Stage {
    use super::string::tiles_from_string;
    let mut stg = Stage {
        wall_count: 50,
        ..Default::default()
    };
    for s in 0..SEAT {
        let pl = &mut stg.players[s];
        pl.seat = s;
        pl.score = 25000;
        pl.is_menzen = true;
        pl.hand = tiles_to_tile_table(&tiles_from_string(hands[s]).unwrap());
        pl.winning_tiles = winning_tiles(&pl.hand, &pl.melds);
    }
    stg
}

#[test]
fn test_call_actions() {
    let stg = stage_with(["m1", "m2340p11", "m33p55z7", "m23406z11"]);
    let acts = calc_possible_call_actions(&stg, 0, Tile(TM, 3), false, &ScoringOptions::default());

    // 下家はチーの2通り, 対面はポン, 上家は無し
    let (s1, a1) = &acts[0];
    assert_eq!(*s1, 1);
    assert_eq!(a1[0], Action::skip());
    assert!(a1.contains(&Action::chow(vec![Tile(TM, 2), Tile(TM, 4)])));
    assert!(a1.contains(&Action::chow(vec![Tile(TM, 4), Tile(TM, 0)])));
    let (s2, a2) = &acts[1];
    assert_eq!(*s2, 2);
    assert_eq!(a2, &vec![Action::skip(), Action::pong(vec![Tile(TM, 3), Tile(TM, 3)])]);
    assert_eq!(acts.len(), 2);

    // 槍槓はロンのみ
    let acts = calc_possible_call_actions(&stg, 0, Tile(TM, 3), true, &ScoringOptions::default());
    assert!(acts.is_empty());
}

#[test]
fn test_rong_and_furiten() {
    let mut stg = stage_with(["z1", "m123456789p11z22", "", ""]);
    let opts = ScoringOptions::default();
    // 一気通貫で役あり
    let acts = calc_possible_call_actions(&stg, 0, Tile(TZ, 2), false, &opts);
    assert!(acts[0].1.contains(&Action::rong()));

    stg.players[1].is_furiten = true;
    let acts = calc_possible_call_actions(&stg, 0, Tile(TZ, 2), false, &opts);
    assert!(!acts[0].1.contains(&Action::rong()));
}

#[test]
fn test_turn_actions() {
    use super::string::tiles_from_string;
    let mut stg = stage_with(["m1112345678999p1", "", "", ""]);
    stg.players[0].drawn = Some(Tile(TP, 1));
    let opts = ScoringOptions::default();
    let acts = calc_possible_turn_actions(&stg, 0, None, &opts);
    assert!(acts.contains(&Action::discard(Tile(TP, 1))));
    assert!(acts.contains(&Action::riichi(Tile(TP, 1))));
    assert!(!acts.iter().any(|a| a.ty == ActionType::Tsumo));

    // 暗槓と九蓮宝燈のツモ
    let mut stg = stage_with(["m11112345678999", "", "", ""]);
    stg.players[0].drawn = Some(Tile(TM, 1));
    let acts = calc_possible_turn_actions(&stg, 0, None, &opts);
    assert!(acts.contains(&Action::tsumo()));
    assert!(acts.contains(&Action::concealed_kong(tiles_from_string("m1111").unwrap())));

    // 鳴き後は喰い替えの牌を切れない
    let melding = Action::chow(vec![Tile(TM, 4), Tile(TM, 5)]);
    let acts = calc_possible_turn_actions(&stg, 0, Some(&melding), &opts);
    assert!(!acts.contains(&Action::discard(Tile(TM, 3))));
    assert!(!acts.contains(&Action::discard(Tile(TM, 6))));
    assert!(acts.contains(&Action::discard(Tile(TM, 7))));
    assert!(!acts.iter().any(|a| a.ty != ActionType::Discard));
}

#[test]
fn test_prohibited_discards() {
    let v = calc_prohibited_discards(&Action::chow(vec![Tile(TP, 3), Tile(TP, 4)]));
    assert_eq!(v, vec![Tile(TP, 2), Tile(TP, 5), Tile(TP, 0)]);
    let v = calc_prohibited_discards(&Action::chow(vec![Tile(TS, 7), Tile(TS, 9)]));
    assert_eq!(v, vec![Tile(TS, 8)]);
    let v = calc_prohibited_discards(&Action::pong(vec![Tile(TZ, 1), Tile(TZ, 1)]));
    assert_eq!(v, vec![Tile(TZ, 1)]);
}

#[test]
fn test_call_leaving_no_discard() {
    // 鳴いた後の手牌が喰い替えの牌のみになるチーは提示しない
    let stg = stage_with(["", "m234", "m11z1", ""]);
    let acts = calc_possible_call_actions(&stg, 0, Tile(TM, 1), false, &ScoringOptions::default());
    assert_eq!(acts.len(), 1);
    assert_eq!(acts[0].0, 2);
    assert!(acts[0].1.contains(&Action::pong(vec![Tile(TM, 1), Tile(TM, 1)])));
}
