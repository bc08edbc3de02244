use super::*;
use crate::control::common::tiles_from_tile_table;
use crate::util::misc::vec_to_string;

// 捨て牌
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discard {
    pub step: usize,          // 打牌時のstage.step
    pub tile: Tile,           // 捨てた牌
    pub is_drawn: bool,       // ツモ切り
    pub meld: Option<Seat>,   // 他家に鳴かれた場合はその座席
}

impl fmt::Display for Discard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = if self.is_drawn { "*" } else { "" };
        write!(f, "{}{}", self.tile, m)
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct Player {
    pub seat: Seat,               // 座席番号
    pub score: Point,             // 得点
    pub hand: TileTable,          // 手牌(4x10の配列)
    pub drawn: Option<Tile>,      // ツモ牌
    pub melds: Vec<ExposedMeld>,  // 副露一覧
    pub riichi: Option<Index>,    // リーチ宣言牌のdiscardsにおけるindex
    pub discards: Vec<Discard>,   // 捨て牌一覧
    pub bonus_time_ms: u64,       // 残りの追加持ち時間

    // 聴牌
    pub winning_tiles: Vec<Tile>, // 聴牌時の和了牌
    pub is_furiten: bool,         // 自分の捨て牌によるフリテン
    pub is_furiten_other: bool,   // 他家の捨て牌の見逃しによるフリテン

    // 条件役用のフラグ 天和,地和,海底など和了のタイミングで発生する役はここに含まない
    pub is_menzen: bool,          // 門前 (暗槓のみの場合を含む)
    pub is_riichi: bool,          // リーチ (ダブルリーチを含む)
    pub is_double_riichi: bool,   // ダブルリーチ
    pub is_ippatsu: bool,         // 一発 立直後にセットして次の打牌または他家の鳴きでfalseをセット
    pub is_rinshan: bool,         // 槓の操作中にtrueをセット 打牌でfalseをセット
}

impl Player {
    // 赤5は通常の5と区別して数える
    pub fn count_tile(&self, t: Tile) -> usize {
        let h = &self.hand;
        if t.1 == 5 {
            h[t.0][t.1] - h[t.0][0]
        } else {
            h[t.0][t.1]
        }
    }

    // 手牌の枚数 (赤5の重複を除く)
    pub fn hand_len(&self) -> usize {
        self.hand.iter().map(|tr| tr[1..].iter().sum::<usize>()).sum()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hand = tiles_from_tile_table(&self.hand);
        let drawn = if let Some(d) = self.drawn {
            d.to_string()
        } else {
            "None".to_string()
        };
        writeln!(
            f,
            "seat: {}, score: {}, riichi: {:?}, drawn: {}",
            self.seat, self.score, self.riichi, drawn,
        )?;
        writeln!(
            f,
            "furiten: {}, furiten_other: {}, rinshan: {}, winning_tiles: {:?}",
            self.is_furiten, self.is_furiten_other, self.is_rinshan, self.winning_tiles,
        )?;
        writeln!(f, "hand: {}", vec_to_string(&hand))?;
        writeln!(f, "melds: {}", vec_to_string(&self.melds))?;
        write!(f, "discards: {}", vec_to_string(&self.discards))
    }
}

#[test]
fn test_player_display() {
    use crate::control::common::inc_tile;
    let mut pl = Player::default();
    for t in [Tile(TM, 5), Tile(TM, 0), Tile(TZ, 7)] {
        inc_tile(&mut pl.hand, t);
    }
    pl.drawn = Some(Tile(TZ, 7));
    let s = pl.to_string();
    assert!(s.contains("hand: [m0, m5, z7]"));
    assert!(s.contains("drawn: z7"));
}
