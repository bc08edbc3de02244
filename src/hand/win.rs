use super::parse::is_complete;
use crate::control::common::{dec_tile, inc_tile, tiles_from_tile_table};
use crate::model::*;

// 聴牌形(14 - 3 * 副露数 - 1 枚)の手牌に対して和了牌となる牌の一覧を返却
// 手牌で4枚使い切っている牌は含まない
pub fn winning_tiles(hand: &TileTable, melds: &[ExposedMeld]) -> Vec<Tile> {
    let mut res = vec![];
    let mut h = *hand;
    for ti in 0..TYPE {
        let max = if ti == TZ { DR } else { 9 };
        for ni in 1..=max {
            if h[ti][ni] >= TILE {
                continue;
            }
            let t = Tile(ti, ni);
            h[ti][ni] += 1;
            if is_complete(&h, melds, t) {
                res.push(t);
            }
            h[ti][ni] -= 1;
        }
    }
    res
}

#[inline]
pub fn is_tenpai(hand: &TileTable, melds: &[ExposedMeld]) -> bool {
    !winning_tiles(hand, melds).is_empty()
}

// ツモ後(14 - 3 * 副露数 枚)の手牌に対して聴牌となる打牌と,その場合の和了牌の一覧を返却
// 通常5と赤5は別の打牌として扱う
pub fn tenpai_discards(hand: &TileTable, melds: &[ExposedMeld]) -> Vec<(Tile, Vec<Tile>)> {
    let mut candidates = tiles_from_tile_table(hand);
    candidates.dedup();

    let mut res = vec![];
    let mut h = *hand;
    for d in candidates {
        dec_tile(&mut h, d);
        let wts = winning_tiles(&h, melds);
        inc_tile(&mut h, d);
        if !wts.is_empty() {
            res.push((d, wts));
        }
    }
    res
}

#[cfg(test)]
fn table(exp: &str) -> TileTable {
    use crate::control::common::tiles_to_tile_table;
    use crate::control::string::tiles_from_string;
    tiles_to_tile_table(&tiles_from_string(exp).unwrap())
}

#[test]
fn test_winning_tiles() {
    use crate::control::string::tiles_from_string;
    // 純正九蓮宝燈の9面待ち
    let wts = winning_tiles(&table("m1112345678999"), &[]);
    assert_eq!(wts, tiles_from_string("m123456789").unwrap());

    // 国士無双13面待ち
    let wts = winning_tiles(&table("m19p19s19z1234567"), &[]);
    assert_eq!(wts.len(), 13);

    // 七対子の単騎 + 4枚使いの牌は待ちにならない
    let wts = winning_tiles(&table("m1122p3344s5566z7"), &[]);
    assert_eq!(wts, tiles_from_string("z7").unwrap());
    assert!(winning_tiles(&table("m1111p2233s4455z7"), &[]).is_empty());

    // 副露あり
    let wts = winning_tiles(&table("m2345"), &[]);
    assert!(wts.is_empty()); // 枚数不足
}

#[test]
fn test_tenpai_discards() {
    use crate::control::string::{exposed_meld_from_string, tiles_from_string};
    let melds = vec![
        exposed_meld_from_string("z1+11").unwrap(),
        exposed_meld_from_string("p7+89").unwrap(),
        exposed_meld_from_string("s3+33").unwrap(),
    ];
    let td = tenpai_discards(&table("m23p55z7"), &melds);
    let discards: Vec<Tile> = td.iter().map(|(d, _)| *d).collect();
    assert_eq!(discards, tiles_from_string("z7").unwrap());
    assert_eq!(td[0].1, tiles_from_string("m14").unwrap());
    assert!(is_tenpai(&table("m23z77"), &melds));
    assert!(!is_tenpai(&table("m29z77"), &melds));

    // 赤5と通常5は別の打牌
    let td = tenpai_discards(&table("m123456789p05s111"), &[]);
    let discards: Vec<Tile> = td.iter().map(|(d, _)| *d).collect();
    assert!(discards.contains(&Tile(TP, 0)));
    assert!(discards.contains(&Tile(TP, 5)));
    let (_, wts) = td.iter().find(|(d, _)| *d == Tile(TP, 0)).unwrap();
    assert_eq!(wts, &vec![Tile(TP, 5)]);
}
