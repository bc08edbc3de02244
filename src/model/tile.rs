use serde::{de, ser};

use super::*;
use crate::error::{MahjongError, Res};

// 赤5は数字部分を0として表現する (手牌テーブル上は5としても計上)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile(pub(crate) Type, pub(crate) Tnum); // (type index, number index)

impl Tile {
    pub fn new(suit: Type, rank: Tnum) -> Res<Self> {
        let valid = match suit {
            TM | TP | TS => rank <= 9,
            TZ => (WE..=DR).contains(&rank),
            _ => false,
        };
        if valid {
            Ok(Self(suit, rank))
        } else {
            Err(MahjongError::InvalidTile { suit, rank })
        }
    }

    pub fn from_symbol(s: &str) -> Res<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(MahjongError::parse(s, "tile symbol must be 2 chars"));
        }
        let ti = match chars[0] {
            'm' => TM,
            'p' => TP,
            's' => TS,
            'z' => TZ,
            c => return Err(MahjongError::parse(s, format!("invalid tile type char: {}", c))),
        };
        let ni = chars[1]
            .to_digit(10)
            .ok_or_else(|| MahjongError::parse(s, "invalid tile number char"))?;
        Self::new(ti, ni as Tnum)
    }

    #[inline]
    pub fn suit(&self) -> Type {
        self.0
    }

    #[inline]
    pub fn rank(&self) -> Tnum {
        self.1
    }

    // 赤5の場合,通常の5を返却. それ以外の場合はコピーをそのまま返却.
    #[inline]
    pub fn to_normal(self) -> Self {
        if self.1 == 0 {
            Self(self.0, 5)
        } else {
            self
        }
    }

    #[inline]
    pub fn is_red5(&self) -> bool {
        self.0 != TZ && self.1 == 0
    }

    // 同じ種類の次の牌 (9や字牌に対して呼び出してはならない)
    #[inline]
    pub fn next(self) -> Self {
        let t = self.to_normal();
        assert!(t.is_suit() && t.1 < 9, "no next tile for {}", self);
        Self(t.0, t.1 + 1)
    }

    // 数牌
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.0 != TZ
    }

    // 字牌
    #[inline]
    pub fn is_honor(&self) -> bool {
        self.0 == TZ
    }

    // 1,9牌
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.0 != TZ && (self.1 == 1 || self.1 == 9)
    }

    // 么九牌
    #[inline]
    pub fn is_terminal_or_honor(&self) -> bool {
        self.0 == TZ || self.1 == 1 || self.1 == 9
    }

    // 中張牌
    #[inline]
    pub fn is_simple(&self) -> bool {
        !self.is_terminal_or_honor()
    }

    // 風牌
    #[inline]
    pub fn is_wind(&self) -> bool {
        self.0 == TZ && self.1 <= WN
    }

    // 三元牌
    #[inline]
    pub fn is_dragon(&self) -> bool {
        self.0 == TZ && DW <= self.1 && self.1 <= DR
    }

    // 緑一色の構成牌 (索子の23468と發)
    #[inline]
    pub fn is_green(&self) -> bool {
        match self.0 {
            TS => matches!(self.to_normal().1, 2 | 3 | 4 | 6 | 8),
            TZ => self.1 == DG,
            _ => false,
        }
    }

    // ドラ表示牌が指すドラ
    pub fn dora_from_indicator(self) -> Self {
        let t = self.to_normal();
        let ni = if t.is_honor() {
            match t.1 {
                WN => WE,
                DR => DW,
                i => i + 1,
            }
        } else {
            match t.1 {
                9 => 1,
                i => i + 1,
            }
        };
        Self(t.0, ni)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ['m', 'p', 's', 'z'][self.0], self.1)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.0 != other.0 {
            return self.0.cmp(&other.0);
        }

        // 赤5は通常の5の直前 (4.5相当) として比較
        let key = |n: Tnum| if n == 0 { 9 } else { n * 2 };
        key(self.1).cmp(&key(other.1))
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Tile::from_symbol(v).map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

// [TileTable]
// hand[ti][ni]: 牌の枚数. 赤5は[ti][0]と[ti][5]の両方に計上する.
pub type TileRow = [usize; TNUM];
pub type TileTable = [TileRow; TYPE];

#[test]
fn test_tile_domain() {
    assert!(Tile::new(TM, 9).is_ok());
    assert!(Tile::new(TP, 0).is_ok()); // 赤5
    assert_eq!(
        Tile::new(TZ, 8),
        Err(MahjongError::InvalidTile { suit: TZ, rank: 8 })
    );
    assert!(Tile::new(TZ, 0).is_err());
    assert!(Tile::new(4, 1).is_err());
    assert!(Tile::from_symbol("s10").is_err());
    assert_eq!(Tile::from_symbol("z7").unwrap(), Tile(TZ, DR));
}

#[test]
fn test_tile_order_and_predicates() {
    let m4 = Tile(TM, 4);
    let m0 = Tile(TM, 0);
    let m5 = Tile(TM, 5);
    assert!(m4 < m0 && m0 < m5);
    assert!(Tile(TM, 9) < Tile(TP, 1));
    assert_eq!(m4.next(), m5);
    assert_eq!(m0.next(), Tile(TM, 6));
    assert!(Tile(TS, 1).is_terminal());
    assert!(Tile(TZ, WE).is_terminal_or_honor() && !Tile(TZ, WE).is_terminal());
    assert!(Tile(TP, 0).is_simple() && !Tile(TS, 9).is_simple());
    assert!(Tile(TZ, DG).is_green() && Tile(TS, 8).is_green() && !Tile(TS, 5).is_green());
}

#[test]
fn test_dora_indicator() {
    assert_eq!(Tile(TM, 9).dora_from_indicator(), Tile(TM, 1));
    assert_eq!(Tile(TP, 0).dora_from_indicator(), Tile(TP, 6));
    assert_eq!(Tile(TZ, WN).dora_from_indicator(), Tile(TZ, WE));
    assert_eq!(Tile(TZ, DR).dora_from_indicator(), Tile(TZ, DW));
    assert_eq!(Tile(TZ, DW).dora_from_indicator(), Tile(TZ, DG));
}

#[test]
#[should_panic]
fn test_next_past_nine() {
    let _ = Tile(TS, 9).next();
}

#[test]
fn test_tile_serde() {
    let t = Tile(TP, 0);
    let s = serde_json::to_string(&t).unwrap();
    assert_eq!(s, "\"p0\"");
    let t2: Tile = serde_json::from_str(&s).unwrap();
    assert_eq!(t, t2);
    assert!(serde_json::from_str::<Tile>("\"z9\"").is_err());
}
