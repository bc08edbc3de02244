use super::*;
use crate::hand::{Decomposition, PointInfo, Points};

// 和了時の状況 (組み合わせ以外で成立する役や符の判定に使用)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub prevalent_wind: Tnum, // 場風 (東: 1, 南: 2, 西: 3, 北: 4)
    pub seat_wind: Tnum,      // 自風 (同上)
    pub is_drawn: bool,       // ツモ和了
    pub turn: usize,          // 和了者の巡目 (打牌数+1)
    pub no_calls: bool,       // この局で副露(暗槓を含む)が一度もない
    pub riichi: bool,
    pub double_riichi: bool,
    pub ippatsu: bool,
    pub haitei: bool,  // 海底撈月
    pub houtei: bool,  // 河底撈魚
    pub rinshan: bool, // 嶺上開花
    pub chankan: bool, // 槍槓
}

// 既定値は東場東家,第1巡以外の通常の状況
impl Default for GameStatus {
    fn default() -> Self {
        Self {
            prevalent_wind: WE,
            seat_wind: WE,
            is_drawn: false,
            turn: 2,
            no_calls: true,
            riichi: false,
            double_riichi: false,
            ippatsu: false,
            haitei: false,
            houtei: false,
            rinshan: false,
            chankan: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinContext {
    pub seat: Seat,                   // 和了者
    pub from: Seat,                   // 放銃者 (ツモの場合は和了者自身)
    pub hand: Vec<Tile>,              // 和了手牌(鳴きと和了牌は含まない)
    pub winning_tile: Tile,           // 和了牌
    pub melds: Vec<ExposedMeld>,      // 副露
    pub is_dealer: bool,
    pub decomposition: Decomposition, // 採用された面子構成
    pub point: PointInfo,             // 点数計算結果
    pub title: String,                // 満貫, 跳満, ...
    pub payments: Points,             // 支払い得点の内訳
    pub delta_scores: [Point; SEAT],  // この和了による点数変動 (本場,供託を含む)
}

impl WinContext {
    // 本場,供託を除いた和了点
    pub fn score(&self) -> Point {
        let p = &self.payments;
        if self.from != self.seat {
            p.0
        } else if self.is_dealer {
            p.1 * 3
        } else {
            p.1 * 2 + p.2
        }
    }
}
