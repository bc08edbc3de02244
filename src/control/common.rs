use crate::model::*;

#[inline]
pub fn calc_seat_offset(base_seat: Seat, target_seat: Seat) -> Seat {
    (target_seat + SEAT - base_seat) % SEAT
}

#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    (seat + 1) % SEAT
}

// TileTable
pub fn count_tile(tt: &TileTable, t: Tile) -> usize {
    if t.1 == 5 {
        tt[t.0][t.1] - tt[t.0][0]
    } else {
        tt[t.0][t.1]
    }
}

pub fn inc_tile(tt: &mut TileTable, tile: Tile) {
    let t = tile;
    tt[t.0][t.1] += 1;
    if t.1 == 0 {
        // 0は赤5のフラグなので本来の5をたてる
        tt[t.0][5] += 1;
    }
}

pub fn dec_tile(tt: &mut TileTable, tile: Tile) {
    let t = tile;
    tt[t.0][t.1] -= 1;
    if t.1 == 0 {
        tt[t.0][5] -= 1;
    }
    assert!(tt[t.0][5] >= tt[t.0][0], "broken tile table at {}", t);
}

pub fn tiles_from_tile_table(tt: &TileTable) -> Vec<Tile> {
    let mut hand = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            for c in 0..tt[ti][ni] {
                if ti != TZ && ni == 5 && c < tt[ti][0] {
                    hand.push(Tile(ti, 0)); // 赤5
                } else {
                    hand.push(Tile(ti, ni));
                }
            }
        }
    }
    hand
}

pub fn tiles_to_tile_table(tiles: &[Tile]) -> TileTable {
    let mut tt = TileTable::default();
    for &t in tiles {
        inc_tile(&mut tt, t);
    }
    tt
}

// 手牌の枚数 (赤5の重複を除く)
pub fn count_tiles(tt: &TileTable) -> usize {
    tt.iter().map(|tr| tr[1..].iter().sum::<usize>()).sum()
}

// ドラ表示牌のリストを受け取ってドラ評価値のテーブルを返却
pub fn create_dora_table(doras: &[Tile]) -> TileTable {
    let mut dt = TileTable::default();
    for d in doras {
        let t = d.dora_from_indicator();
        dt[t.0][t.1] += 1;
    }
    dt
}

// ドラ表示牌によるのドラの数を勘定
pub fn count_dora(hand: &TileTable, melds: &[ExposedMeld], doras: &[Tile]) -> usize {
    let dt = create_dora_table(doras);
    let mut n_dora = 0;

    for ti in 0..TYPE {
        for ni in 1..TNUM {
            n_dora += dt[ti][ni] * hand[ti][ni];
        }
    }

    for m in melds {
        for t in m.tiles() {
            let t = t.to_normal();
            n_dora += dt[t.0][t.1];
        }
    }

    n_dora
}

// 赤ドラの数を勘定
pub fn count_red_dora(hand: &TileTable, melds: &[ExposedMeld]) -> usize {
    let mut n = hand[TM][0] + hand[TP][0] + hand[TS][0];
    for m in melds {
        n += m.tiles().iter().filter(|t| t.is_red5()).count();
    }
    n
}

// 手牌にある牌tの実体 (5の場合は通常5と赤5を区別して返却)
pub fn tiles_with_red5(tt: &TileTable, t: Tile) -> Vec<Tile> {
    let t = t.to_normal();
    if tt[t.0][t.1] == 0 {
        return vec![];
    }

    let Tile(ti, ni) = t;
    let tr = tt[ti];
    if ni != 5 {
        return vec![t]; // 5ではない場合
    }
    if tr[0] == 0 {
        return vec![t]; // 通常5しかない場合
    }
    if tr[0] == tr[5] {
        return vec![Tile(ti, 0)]; // 赤5しかない場合
    }
    vec![t, Tile(ti, 0)] // 通常5と赤5の両方がある場合
}

// 手牌から牌tをn枚取り出す組み合わせ (赤5を含むかどうかで区別)
pub fn pick_tiles(tt: &TileTable, t: Tile, n: usize) -> Vec<Vec<Tile>> {
    let t = t.to_normal();
    let total = tt[t.0][t.1];
    if total < n {
        return vec![];
    }
    if t.is_honor() || t.1 != 5 {
        return vec![vec![t; n]];
    }

    let red = tt[t.0][0];
    let normal = total - red;
    let mut res = vec![];
    for r in 0..=red.min(n) {
        if n - r > normal {
            continue;
        }
        let mut v = vec![Tile(t.0, 0); r];
        v.extend(std::iter::repeat(t).take(n - r));
        v.sort();
        res.push(v);
    }
    res
}

#[test]
fn test_tiletable() {
    use super::string::tiles_from_string;
    let hand = tiles_from_string("p34777s1230567z66").unwrap();
    let tt = tiles_to_tile_table(&hand);
    assert_eq!(tt[TS][5], 2);
    assert_eq!(count_tile(&tt, Tile(TS, 5)), 1);
    assert_eq!(count_tiles(&tt), hand.len());
    assert_eq!(tiles_from_tile_table(&tt), hand);
    assert_eq!(tiles_with_red5(&tt, Tile(TS, 5)), vec![Tile(TS, 5), Tile(TS, 0)]);
    assert_eq!(pick_tiles(&tt, Tile(TS, 5), 2).len(), 1);
    assert_eq!(pick_tiles(&tt, Tile(TS, 5), 1).len(), 2);
}

#[test]
fn test_count_dora() {
    use super::string::tiles_from_string;
    let hand = tiles_to_tile_table(&tiles_from_string("m11p406z77").unwrap());
    let doras = tiles_from_string("m9p4z6").unwrap();
    assert_eq!(count_dora(&hand, &[], &doras), 2 + 1 + 2);
    assert_eq!(count_red_dora(&hand, &[]), 1);
    assert_eq!(calc_seat_offset(3, 1), 2);
    assert_eq!(next_seat(3), 0);
}
