use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::control::common::count_tiles;
use crate::model::*;

// 和了形の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandShape {
    Standard,        // 4面子1雀頭
    SevenPairs,      // 七対子
    ThirteenOrphans, // 国士無双 (12種の単独牌 + 1対子)
}

// 和了形の解釈の1つ
// meldsは手牌部分(昇順)の後に副露を並べたもの. winning_meldは和了牌で完成した面子のindex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    pub melds: Vec<Meld>,
    pub shape: HandShape,
    pub winning_meld: Index,
}

impl Decomposition {
    pub fn winning_meld(&self) -> Meld {
        self.melds[self.winning_meld]
    }

    pub fn pair(&self) -> Option<Meld> {
        self.melds.iter().copied().find(|m| m.kind() == MeldKind::Pair)
    }

    // 構成牌の一覧 (槓子は4枚)
    pub fn tiles(&self) -> Vec<Tile> {
        let mut v: Vec<Tile> = self.melds.iter().flat_map(|m| m.tiles()).collect();
        v.sort();
        v
    }
}

// 和了形の解釈を列挙する
// hand: 鳴き以外の手牌 (和了牌を含む), melds: 副露
// 和了形でない場合は空のイテレータを返却
pub fn decompose(
    hand: &TileTable,
    melds: &[ExposedMeld],
    winning_tile: Tile,
    is_drawn: bool,
) -> Decompositions {
    let mut rest = *hand;
    for tr in rest.iter_mut() {
        tr[0] = 0; // 赤5は通常の5として扱う
    }
    let exposed: Vec<Meld> = melds.iter().map(|m| m.meld()).collect();

    let mut it = Decompositions {
        stack: vec![],
        pending: VecDeque::new(),
        seen: HashSet::new(),
        exposed,
        winning_tile: winning_tile.to_normal(),
        is_drawn,
    };

    if melds.len() > 4 || count_tiles(&rest) + melds.len() * 3 != 14 {
        return it;
    }
    if rest[winning_tile.0][winning_tile.to_normal().1] == 0 {
        return it;
    }

    if melds.is_empty() {
        if let Some(ms) = parse_seven_pairs(&rest) {
            it.push_variants(ms, HandShape::SevenPairs);
        }
        if let Some(ms) = parse_thirteen_orphans(&rest) {
            it.push_variants(ms, HandShape::ThirteenOrphans);
        }
    }

    it.stack.push(Frame {
        rest,
        melds: vec![],
        has_pair: false,
    });
    it
}

// 和了形であるかどうか
pub fn is_complete(hand: &TileTable, melds: &[ExposedMeld], winning_tile: Tile) -> bool {
    decompose(hand, melds, winning_tile, true).next().is_some()
}

// 探索途中の状態
#[derive(Debug, Clone)]
struct Frame {
    rest: TileTable,  // 未使用の牌 (赤5は計上しない)
    melds: Vec<Meld>, // 取り出し済みの面子
    has_pair: bool,
}

// 通常形を深さ優先で探索する遅延イテレータ
// 最小の牌から刻子,順子,雀頭の順に取り出し,行き詰まれば別の取り出し方に戻る
#[derive(Debug)]
pub struct Decompositions {
    stack: Vec<Frame>,
    pending: VecDeque<Decomposition>, // 1つの分割から和了面子の選び方ごとに生成した候補
    seen: HashSet<Vec<Meld>>,         // 返却済みの分割 (取り出し順違いの重複除去)
    exposed: Vec<Meld>,
    winning_tile: Tile,
    is_drawn: bool,
}

impl Decompositions {
    // 和了牌を含む面子それぞれについて候補を生成
    fn push_variants(&mut self, mut melds: Vec<Meld>, shape: HandShape) {
        melds.sort();
        if !self.seen.insert(melds.clone()) {
            return;
        }

        let mut done: Vec<Meld> = vec![];
        for i in 0..melds.len() {
            let m = melds[i];
            if !m.contains(self.winning_tile) || done.contains(&m) {
                continue;
            }
            done.push(m);

            let mut ms = melds.clone();
            if !self.is_drawn && m.kind() == MeldKind::Triplet {
                ms[i] = m.opened(); // ロンで完成した刻子は明刻扱い
            }
            ms.extend(self.exposed.iter().copied());
            self.pending.push_back(Decomposition {
                melds: ms,
                shape,
                winning_meld: i,
            });
        }
    }

    fn expand(&mut self, frame: Frame) {
        let Some(t) = first_tile(&frame.rest) else {
            let n_sets = 4 - self.exposed.len();
            if frame.has_pair && frame.melds.len() == n_sets + 1 {
                self.push_variants(frame.melds, HandShape::Standard);
            }
            return;
        };

        let Tile(ti, ni) = t;
        let cnt = frame.rest[ti][ni];
        let mut children = vec![];

        // 刻子
        if cnt >= 3 {
            let mut f = frame.clone();
            f.rest[ti][ni] -= 3;
            f.melds.push(Meld::triplet(t));
            children.push(f);
        }

        // 順子
        if t.is_suit() && ni <= 7 && frame.rest[ti][ni + 1] > 0 && frame.rest[ti][ni + 2] > 0 {
            let mut f = frame.clone();
            f.rest[ti][ni] -= 1;
            f.rest[ti][ni + 1] -= 1;
            f.rest[ti][ni + 2] -= 1;
            f.melds.push(Meld::run(t));
            children.push(f);
        }

        // 雀頭
        if cnt >= 2 && !frame.has_pair {
            let mut f = frame;
            f.rest[ti][ni] -= 2;
            f.melds.push(Meld::pair(t));
            f.has_pair = true;
            children.push(f);
        }

        // 刻子から先に探索
        while let Some(f) = children.pop() {
            self.stack.push(f);
        }
    }
}

impl Iterator for Decompositions {
    type Item = Decomposition;

    fn next(&mut self) -> Option<Decomposition> {
        loop {
            if let Some(d) = self.pending.pop_front() {
                return Some(d);
            }
            let frame = self.stack.pop()?;
            self.expand(frame);
        }
    }
}

fn first_tile(tt: &TileTable) -> Option<Tile> {
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if tt[ti][ni] != 0 {
                return Some(Tile(ti, ni));
            }
        }
    }
    None
}

// 七対子 (同種4枚は2対子とみなさない)
fn parse_seven_pairs(tt: &TileTable) -> Option<Vec<Meld>> {
    let mut res = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            match tt[ti][ni] {
                0 => {}
                2 => res.push(Meld::pair(Tile(ti, ni))),
                _ => return None,
            }
        }
    }
    if res.len() == 7 {
        Some(res)
    } else {
        None
    }
}

// 国士無双
fn parse_thirteen_orphans(tt: &TileTable) -> Option<Vec<Meld>> {
    let mut res = vec![];
    let mut has_pair = false;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            let t = Tile(ti, ni);
            let cnt = tt[ti][ni];
            if !t.is_terminal_or_honor() || (ti == TZ && ni > DR) {
                if cnt != 0 {
                    return None;
                }
                continue;
            }
            match cnt {
                1 => res.push(Meld::single(t)),
                2 if !has_pair => {
                    res.push(Meld::pair(t));
                    has_pair = true;
                }
                _ => return None,
            }
        }
    }
    if has_pair && res.len() == 13 {
        Some(res)
    } else {
        None
    }
}

#[cfg(test)]
fn parse_hand(exp: &str, win: &str, melds: &[&str], is_drawn: bool) -> Vec<Decomposition> {
    use crate::control::common::tiles_to_tile_table;
    use crate::control::string::{exposed_meld_from_string, tiles_from_string};
    let hand = tiles_to_tile_table(&tiles_from_string(exp).unwrap());
    let melds: Vec<ExposedMeld> = melds
        .iter()
        .map(|m| exposed_meld_from_string(m).unwrap())
        .collect();
    let wt = tiles_from_string(win).unwrap()[0];
    decompose(&hand, &melds, wt, is_drawn).collect()
}

#[test]
fn test_decompose_standard() {
    // m123123123: 順子3つと刻子3つの2通りの分割
    let ds = parse_hand("m123123123p55z111", "p5", &[], true);
    let partitions: HashSet<Vec<Meld>> = ds.iter().map(|d| d.melds.clone()).collect();
    assert_eq!(partitions.len(), 2);
    for d in &ds {
        assert_eq!(d.shape, HandShape::Standard);
        assert_eq!(d.winning_meld().kind(), MeldKind::Pair);
        assert_eq!(d.tiles().len(), 14);
    }
}

#[test]
fn test_decompose_wait_variants() {
    // m23444: m4はm234とm44のどちらも完成させる
    let ds = parse_hand("m23444p123s789z111", "m4", &[], false);
    let kinds: Vec<MeldKind> = ds.iter().map(|d| d.winning_meld().kind()).collect();
    assert!(kinds.contains(&MeldKind::Pair));
    assert!(kinds.contains(&MeldKind::Run));

    // ロンで完成した刻子は明刻
    let ds = parse_hand("m111p123s789z11122", "z1", &[], false);
    assert_eq!(ds.len(), 1);
    let d = &ds[0];
    assert!(d.winning_meld().is_open());
    assert_eq!(d.winning_meld(), Meld::triplet(Tile(TZ, 1)));
}

#[test]
fn test_decompose_special() {
    let ds = parse_hand("m1199p2255s3377z11", "z1", &[], true);
    assert_eq!(ds.len(), 1);
    assert_eq!(ds[0].shape, HandShape::SevenPairs);

    // 二盃口形は七対子と通常形の両方
    let ds = parse_hand("m112233p445566z11", "z1", &[], true);
    let shapes: HashSet<HandShape> = ds.iter().map(|d| d.shape).collect();
    assert!(shapes.contains(&HandShape::SevenPairs));
    assert!(shapes.contains(&HandShape::Standard));

    let ds = parse_hand("m19p19s19z12345677", "z7", &[], false);
    assert_eq!(ds.len(), 1);
    assert_eq!(ds[0].shape, HandShape::ThirteenOrphans);
    assert_eq!(ds[0].melds.len(), 13);
    assert_eq!(ds[0].winning_meld().kind(), MeldKind::Pair);
}

#[test]
fn test_decompose_with_melds() {
    let ds = parse_hand("m123p406z77", "z7", &["s5+55", "z1111"], true);
    assert_eq!(ds.len(), 1);
    let d = &ds[0];
    assert_eq!(d.melds.len(), 5);
    assert!(d.melds[3].is_open());
    assert!(d.melds[4].is_quad() && !d.melds[4].is_open());
    assert_eq!(d.tiles().len(), 15);

    // 副露がある場合は七対子にならない
    assert!(parse_hand("m1199p22s33", "s3", &["z1+11"], true).is_empty());
}

#[test]
fn test_decompose_incomplete() {
    assert!(parse_hand("m1234p123s789z1122", "z2", &[], true).is_empty());
    assert!(parse_hand("m123", "m1", &[], true).is_empty());
    assert!(!is_complete(
        &crate::control::common::tiles_to_tile_table(
            &crate::control::string::tiles_from_string("m1112345678999p1").unwrap()
        ),
        &[],
        Tile(TP, 1)
    ));
}
