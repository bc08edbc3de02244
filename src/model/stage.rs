use super::*;
use crate::util::misc::vec_to_string;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEnd {
    Win(Vec<Seat>), // 和了者 (ツモ|ロン|ダブロン|トリロン)
    Draw(DrawType),
}

// 局の進行状態
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum Phase {
    Dealing,                // 配牌前
    AwaitingDraw(Seat),     // ツモ待ち
    AwaitingDiscard(Seat),  // ツモ番の操作待ち (打牌,槓,ツモ和了)
    AwaitingClaims(Seat),   // 打牌(加槓)したプレイヤー以外の鳴き・ロンの応答待ち
    RoundEnd(RoundEnd),     // 局終了
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Dealing
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct Stage {
    pub round: usize,                                // 場 (東:0, 南:1, 西:2, 北:3)
    pub dealer: Seat,                                // 親の座席
    pub honba: usize,                                // 本場
    pub riichi_sticks: usize,                        // リーチ棒の供託
    pub turn: Seat,                                  // ツモ番のプレイヤーの座席
    pub step: usize,                                 // イベントを処理する毎に+1する
    pub wall_count: usize,                           // 牌山(嶺上牌を除く)の残り枚数
    pub doras: Vec<Tile>,                            // ドラ表示牌
    pub last_tile: Option<(Seat, ActionType, Tile)>, // 他家にロンされる可能性のある牌(打牌,加槓)
    pub n_kan: usize,                                // この局で成立した槓の回数 (嶺上牌のツモ時に加算)
    pub last_riichi: Option<Seat>,                   // 宣言牌が通過していないリーチ (供託は通過後)
    pub phase: Phase,
    pub players: [Player; SEAT],
}

impl Stage {
    #[inline]
    pub fn is_dealer(&self, seat: Seat) -> bool {
        seat == self.dealer
    }

    #[inline]
    pub fn get_prevalent_wind(&self) -> Tnum {
        self.round % SEAT + 1 // WE | WS | WW | WN
    }

    #[inline]
    pub fn get_seat_wind(&self, seat: Seat) -> Tnum {
        (seat + SEAT - self.dealer) % SEAT + 1 // WE | WS | WW | WN
    }

    pub fn get_scores(&self) -> [Point; SEAT] {
        let mut scores = [0; SEAT];
        for s in 0..SEAT {
            scores[s] = self.players[s].score;
        }
        scores
    }

    // 誰も鳴いておらずseatがまだ打牌していない (ダブルリーチ,天和,地和の判定用)
    pub fn is_first_uninterrupted_turn(&self, seat: Seat) -> bool {
        self.players[seat].discards.is_empty() && self.players.iter().all(|pl| pl.melds.is_empty())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "round: {}, dealer: {}, honba: {}, riichi_sticks: {}, phase: {:?}",
            self.round, self.dealer, self.honba, self.riichi_sticks, self.phase,
        )?;
        writeln!(
            f,
            "turn: {}, wall_count: {}, doras: {}, last_tile: {:?}",
            self.turn,
            self.wall_count,
            vec_to_string(&self.doras),
            self.last_tile,
        )?;

        let boader = "-".repeat(80);
        write!(f, "{}", boader)?;
        for p in &self.players {
            writeln!(f)?;
            writeln!(f, "{}", p)?;
            write!(f, "{}", boader)?;
        }
        writeln!(f)
    }
}

#[test]
fn test_winds() {
    let stg = Stage {
        round: 1,
        dealer: 2,
        ..Default::default()
    };
    assert_eq!(stg.get_prevalent_wind(), WS);
    assert_eq!(stg.get_seat_wind(2), WE);
    assert_eq!(stg.get_seat_wind(3), WS);
    assert_eq!(stg.get_seat_wind(1), WN);
    assert!(stg.is_first_uninterrupted_turn(0));
}
