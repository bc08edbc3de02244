use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::*;
use crate::error::{MahjongError, Res};

// 定義順がそのまま同じ牌を起点とする面子の並び順になる
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MeldKind {
    Triplet, // 刻子 (槓子を含む)
    Run,     // 順子
    Pair,    // 対子 (雀頭)
    Single,  // 単独の牌 (国士無双)
}

// 面子は不変. 鳴きや加槓による変化は新しい値を生成して表現する.
// 同値性とハッシュは種別と起点の牌のみで判定 (副露・槓子のフラグは無視)
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct Meld {
    anchor: Tile,
    kind: MeldKind,
    open: bool,
    quad: bool,
}

impl Meld {
    pub fn new(anchor: Tile, kind: MeldKind) -> Self {
        let anchor = anchor.to_normal();
        if kind == MeldKind::Run {
            assert!(
                anchor.is_suit() && anchor.1 <= 7,
                "invalid run anchor: {}",
                anchor
            );
        }
        Self {
            anchor,
            kind,
            open: false,
            quad: false,
        }
    }

    #[inline]
    pub fn triplet(t: Tile) -> Self {
        Self::new(t, MeldKind::Triplet)
    }

    #[inline]
    pub fn run(t: Tile) -> Self {
        Self::new(t, MeldKind::Run)
    }

    #[inline]
    pub fn pair(t: Tile) -> Self {
        Self::new(t, MeldKind::Pair)
    }

    #[inline]
    pub fn single(t: Tile) -> Self {
        Self::new(t, MeldKind::Single)
    }

    // 副露した面子として複製
    #[inline]
    pub fn opened(self) -> Self {
        Self { open: true, ..self }
    }

    // 刻子を槓子に昇格した面子を返却
    pub fn into_quad(self) -> Self {
        assert!(self.kind == MeldKind::Triplet, "only a triplet can be a quad");
        Self { quad: true, ..self }
    }

    #[inline]
    pub fn anchor(&self) -> Tile {
        self.anchor
    }

    #[inline]
    pub fn kind(&self) -> MeldKind {
        self.kind
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[inline]
    pub fn is_quad(&self) -> bool {
        self.kind == MeldKind::Triplet && self.quad
    }

    #[inline]
    pub fn suit(&self) -> Type {
        self.anchor.0
    }

    pub fn last(&self) -> Tile {
        match self.kind {
            MeldKind::Triplet | MeldKind::Pair | MeldKind::Single => self.anchor,
            MeldKind::Run => self.anchor.next().next(),
        }
    }

    pub fn contains(&self, tile: Tile) -> bool {
        let t = tile.to_normal();
        t.0 == self.anchor.0 && self.anchor.1 <= t.1 && t.1 <= self.last().1
    }

    pub fn len(&self) -> usize {
        match self.kind {
            MeldKind::Single => 1,
            MeldKind::Pair => 2,
            MeldKind::Run => 3,
            MeldKind::Triplet => {
                if self.quad {
                    4
                } else {
                    3
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    // 構成する牌を先頭から順に列挙 (赤5は区別しない)
    pub fn tiles(&self) -> MeldTiles {
        MeldTiles {
            next: self.anchor,
            step: if self.kind == MeldKind::Run { 1 } else { 0 },
            remaining: self.len(),
        }
    }

    // 么九牌を含む (チャンタ判定用)
    pub fn has_terminal_or_honor(&self) -> bool {
        self.kind != MeldKind::Single
            && (self.anchor.is_terminal_or_honor() || self.last().is_terminal_or_honor())
    }

    // 么九牌のみで構成
    pub fn is_all_terminal_or_honor(&self) -> bool {
        self.kind != MeldKind::Single
            && self.anchor.is_terminal_or_honor()
            && self.last().is_terminal_or_honor()
    }

    // 老頭牌を含む (純チャン判定用)
    pub fn has_terminal(&self) -> bool {
        self.kind != MeldKind::Single && (self.anchor.is_terminal() || self.last().is_terminal())
    }

    // 老頭牌のみで構成
    pub fn is_all_terminal(&self) -> bool {
        self.kind != MeldKind::Single && self.anchor.is_terminal() && self.last().is_terminal()
    }
}

impl PartialEq for Meld {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.anchor == other.anchor
    }
}

impl Eq for Meld {}

impl Hash for Meld {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.anchor.hash(state);
        self.kind.hash(state);
    }
}

impl PartialOrd for Meld {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Meld {
    fn cmp(&self, other: &Self) -> Ordering {
        self.anchor
            .cmp(&other.anchor)
            .then_with(|| self.kind.cmp(&other.kind))
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ['m', 'p', 's', 'z'][self.anchor.0])?;
        for t in self.tiles() {
            write!(f, "{}", t.1)?;
        }
        if self.open {
            write!(f, "+")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

// 面子の構成牌のイテレータ 状態は起点と残り枚数のみでcloneすれば先頭からやり直せる
#[derive(Debug, Clone)]
pub struct MeldTiles {
    next: Tile,
    step: usize,
    remaining: usize,
}

impl Iterator for MeldTiles {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.remaining == 0 {
            return None;
        }
        let t = self.next;
        self.remaining -= 1;
        if self.remaining != 0 {
            self.next = Tile(t.0, t.1 + self.step);
        }
        Some(t)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for MeldTiles {}

// [ExposedMeld]
// 鳴きの相手の方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldSide {
    Left,     // 上家
    Opposite, // 対面
    Right,    // 下家
    Own,      // 自身 (暗槓)
}

impl MeldSide {
    // seatから見たfromの方向
    pub fn from_seats(seat: Seat, from: Seat) -> Self {
        match (from + SEAT - seat) % SEAT {
            0 => MeldSide::Own,
            1 => MeldSide::Right,
            2 => MeldSide::Opposite,
            _ => MeldSide::Left,
        }
    }
}

// 副露 (暗槓を含む)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposedMeld {
    meld: Meld,
    tiles: Vec<Tile>,    // 手牌から出た牌 + 鳴いた牌 (赤5を区別)
    claimed: Tile,       // 鳴いた牌 (暗槓の場合は先頭の牌)
    side: MeldSide,      // 鳴いた相手
    extra: Option<Tile>, // 加槓で追加した牌
}

impl ExposedMeld {
    pub fn chow(consumed: [Tile; 2], claimed: Tile) -> Res<Self> {
        let mut ts = vec![consumed[0], consumed[1], claimed];
        ts.sort();
        let ns: Vec<Tile> = ts.iter().map(|t| t.to_normal()).collect();
        if !ns[0].is_suit()
            || ns.iter().any(|t| t.0 != ns[0].0)
            || ns[0].1 > 7
            || ns[1] != ns[0].next()
            || ns[2] != ns[1].next()
        {
            return Err(MahjongError::meld(format!("not a run: {:?}", ts)));
        }
        Ok(Self {
            meld: Meld::run(ns[0]).opened(),
            tiles: ts,
            claimed,
            side: MeldSide::Left,
            extra: None,
        })
    }

    pub fn pong(consumed: [Tile; 2], claimed: Tile, side: MeldSide) -> Res<Self> {
        Self::same_tiles(&consumed, claimed)?;
        let mut ts = vec![consumed[0], consumed[1], claimed];
        ts.sort();
        Ok(Self {
            meld: Meld::triplet(claimed).opened(),
            tiles: ts,
            claimed,
            side,
            extra: None,
        })
    }

    pub fn kong(consumed: [Tile; 3], claimed: Tile, side: MeldSide) -> Res<Self> {
        Self::same_tiles(&consumed, claimed)?;
        let mut ts = vec![consumed[0], consumed[1], consumed[2], claimed];
        ts.sort();
        Ok(Self {
            meld: Meld::triplet(claimed).opened().into_quad(),
            tiles: ts,
            claimed,
            side,
            extra: None,
        })
    }

    pub fn concealed_kong(tiles: [Tile; 4]) -> Res<Self> {
        Self::same_tiles(&tiles[1..], tiles[0])?;
        let mut ts = tiles.to_vec();
        ts.sort();
        Ok(Self {
            meld: Meld::triplet(tiles[0]).into_quad(),
            tiles: ts,
            claimed: tiles[0],
            side: MeldSide::Own,
            extra: None,
        })
    }

    // ポンを加槓した新しい副露を返却
    pub fn add_to_kong(&self, extra: Tile) -> Res<Self> {
        if self.meld.kind() != MeldKind::Triplet || self.meld.is_quad() || !self.meld.is_open() {
            return Err(MahjongError::meld(format!("cannot add to {}", self.meld)));
        }
        if extra.to_normal() != self.meld.anchor() {
            return Err(MahjongError::meld(format!(
                "{} does not match {}",
                extra, self.meld
            )));
        }
        let mut tiles = self.tiles.clone();
        tiles.push(extra);
        tiles.sort();
        Ok(Self {
            meld: self.meld.into_quad(),
            tiles,
            claimed: self.claimed,
            side: self.side,
            extra: Some(extra),
        })
    }

    fn same_tiles(tiles: &[Tile], t: Tile) -> Res {
        if tiles.iter().all(|x| x.to_normal() == t.to_normal()) {
            Ok(())
        } else {
            Err(MahjongError::meld(format!(
                "tiles differ: {:?} and {}",
                tiles, t
            )))
        }
    }

    #[inline]
    pub fn meld(&self) -> Meld {
        self.meld
    }

    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[inline]
    pub fn claimed(&self) -> Tile {
        self.claimed
    }

    #[inline]
    pub fn side(&self) -> MeldSide {
        self.side
    }

    #[inline]
    pub fn extra(&self) -> Option<Tile> {
        self.extra
    }

    #[inline]
    pub fn is_added(&self) -> bool {
        self.extra.is_some()
    }

    #[inline]
    pub fn is_kong(&self) -> bool {
        self.meld.is_quad()
    }

    // 暗槓以外の副露
    #[inline]
    pub fn is_open(&self) -> bool {
        self.meld.is_open()
    }
}

impl fmt::Display for ExposedMeld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{:?}", self.meld, self.claimed, self.side)
    }
}

#[test]
fn test_meld_basic() {
    let r = Meld::run(Tile(TP, 3));
    assert_eq!(r.last(), Tile(TP, 5));
    assert!(r.contains(Tile(TP, 0))); // 赤5
    assert!(!r.contains(Tile(TP, 6)));
    assert!(!r.contains(Tile(TS, 4)));
    let ts: Vec<Tile> = r.tiles().collect();
    assert_eq!(ts, vec![Tile(TP, 3), Tile(TP, 4), Tile(TP, 5)]);
    assert_eq!(r.tiles().len(), 3);

    let it = Meld::triplet(Tile(TZ, DR)).into_quad().tiles();
    assert_eq!(it.clone().count(), 4);
    assert_eq!(it.count(), 4); // cloneからやり直せる
    assert_eq!(Meld::single(Tile(TM, 1)).tiles().count(), 1);
}

#[test]
fn test_meld_equality_ignores_flags() {
    let a = Meld::triplet(Tile(TM, 2));
    let b = a.opened().into_quad();
    assert_eq!(a, b);
    assert!(!a.is_open() && b.is_open() && b.is_quad());
    assert_ne!(a, Meld::pair(Tile(TM, 2)));

    let mut v = vec![
        Meld::pair(Tile(TM, 1)),
        Meld::run(Tile(TM, 1)),
        Meld::triplet(Tile(TM, 1)),
        Meld::single(Tile(TM, 1)),
    ];
    v.sort();
    let kinds: Vec<MeldKind> = v.iter().map(|m| m.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            MeldKind::Triplet,
            MeldKind::Run,
            MeldKind::Pair,
            MeldKind::Single
        ]
    );
}

#[test]
fn test_meld_terminal_predicates() {
    assert!(Meld::run(Tile(TS, 7)).has_terminal());
    assert!(!Meld::run(Tile(TS, 7)).is_all_terminal());
    assert!(Meld::triplet(Tile(TZ, WE)).is_all_terminal_or_honor());
    assert!(!Meld::triplet(Tile(TZ, WE)).has_terminal());
    assert!(!Meld::single(Tile(TM, 1)).has_terminal_or_honor());
}

#[test]
fn test_exposed_meld() {
    let c = ExposedMeld::chow([Tile(TM, 4), Tile(TM, 0)], Tile(TM, 3)).unwrap();
    assert_eq!(c.meld(), Meld::run(Tile(TM, 3)));
    assert_eq!(c.tiles(), &[Tile(TM, 3), Tile(TM, 4), Tile(TM, 0)]);
    assert!(ExposedMeld::chow([Tile(TM, 4), Tile(TM, 7)], Tile(TM, 3)).is_err());
    assert!(ExposedMeld::chow([Tile(TZ, 1), Tile(TZ, 2)], Tile(TZ, 3)).is_err());

    let p = ExposedMeld::pong([Tile(TZ, DW), Tile(TZ, DW)], Tile(TZ, DW), MeldSide::Right).unwrap();
    assert!(!p.is_kong() && !p.is_added());
    let k = p.add_to_kong(Tile(TZ, DW)).unwrap();
    assert!(k.is_kong() && k.is_added() && k.is_open());
    assert_eq!(k.tiles().len(), 4);
    assert!(k.add_to_kong(Tile(TZ, DW)).is_err());
    assert!(p.add_to_kong(Tile(TZ, DG)).is_err());

    let a = ExposedMeld::concealed_kong([Tile(TS, 5), Tile(TS, 5), Tile(TS, 0), Tile(TS, 5)]).unwrap();
    assert!(a.is_kong() && !a.is_open());
    assert!(a.add_to_kong(Tile(TS, 5)).is_err());
    assert_eq!(MeldSide::from_seats(1, 0), MeldSide::Left);
    assert_eq!(MeldSide::from_seats(1, 3), MeldSide::Opposite);
    assert_eq!(MeldSide::from_seats(1, 2), MeldSide::Right);
}
