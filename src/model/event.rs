use super::*;

// 状態遷移ごとに外部(表示層,通信層)へ通知するイベント
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    New(EventNew),         // 局開始
    Deal(EventDeal),       // ツモ
    Discard(EventDiscard), // 打牌
    Meld(EventMeld),       // 鳴き,槓
    Dora(EventDora),       // 新ドラ
    Offer(EventOffer),     // 各座席への選択可能な操作の提示
    Resolve(EventResolve), // 鳴き・ロン応答の集計結果
    Win(EventWin),         // 局終了 (和了)
    Draw(EventDraw),       // 局終了 (流局)
}

impl Event {
    #[inline]
    pub fn new(
        round: usize,
        dealer: Seat,
        honba: usize,
        riichi_sticks: usize,
        doras: Vec<Tile>,
        scores: [Point; SEAT],
        hands: [Vec<Tile>; SEAT],
        wall_count: usize,
    ) -> Self {
        Self::New(EventNew {
            round,
            dealer,
            honba,
            riichi_sticks,
            doras,
            scores,
            hands,
            wall_count,
        })
    }

    #[inline]
    pub fn deal(seat: Seat, tile: Tile, is_replacement: bool) -> Self {
        Self::Deal(EventDeal {
            seat,
            tile,
            is_replacement,
        })
    }

    #[inline]
    pub fn discard(seat: Seat, tile: Tile, is_drawn: bool, is_riichi: bool) -> Self {
        Self::Discard(EventDiscard {
            seat,
            tile,
            is_drawn,
            is_riichi,
        })
    }

    #[inline]
    pub fn meld(seat: Seat, action: ActionType, meld: ExposedMeld) -> Self {
        Self::Meld(EventMeld { seat, action, meld })
    }

    #[inline]
    pub fn dora(tile: Tile) -> Self {
        Self::Dora(EventDora { tile })
    }

    #[inline]
    pub fn offer(phase: Phase, offers: Vec<Offer>) -> Self {
        Self::Offer(EventOffer { phase, offers })
    }

    #[inline]
    pub fn resolve(
        target: (Seat, Tile),
        chosen: ActionType,
        winners: Vec<Seat>,
        responses: Vec<(Seat, Action)>,
    ) -> Self {
        Self::Resolve(EventResolve {
            target,
            chosen,
            winners,
            responses,
        })
    }

    #[inline]
    pub fn win(
        contexts: Vec<WinContext>,
        doras: Vec<Tile>,
        ura_doras: Vec<Tile>,
        scores: [Point; SEAT],
        delta_scores: [Point; SEAT],
    ) -> Self {
        Self::Win(EventWin {
            contexts,
            doras,
            ura_doras,
            scores,
            delta_scores,
        })
    }

    #[inline]
    pub fn draw(
        draw_type: DrawType,
        tenpais: [bool; SEAT],
        hands: [Vec<Tile>; SEAT],
        delta_scores: [Point; SEAT],
    ) -> Self {
        Self::Draw(EventDraw {
            draw_type,
            tenpais,
            hands,
            delta_scores,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventNew {
    pub round: usize,             // 場風
    pub dealer: Seat,             // 親
    pub honba: usize,             // 本場
    pub riichi_sticks: usize,     // 供託(リーチ棒)
    pub doras: Vec<Tile>,         // ドラ表示牌
    pub scores: [Point; SEAT],    // 各プレイヤーの所持点
    pub hands: [Vec<Tile>; SEAT], // 各プレイヤーの配牌(13枚)
    pub wall_count: usize,        // 牌山残り枚数
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDeal {
    pub seat: Seat,
    pub tile: Tile,           // ツモ牌
    pub is_replacement: bool, // 嶺上牌
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDiscard {
    pub seat: Seat,
    pub tile: Tile,
    pub is_drawn: bool,  // ツモ切り
    pub is_riichi: bool, // リーチ宣言
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMeld {
    pub seat: Seat,
    pub action: ActionType, // Chow | Pong | Kong | ConcealedKong | AddedKong
    pub meld: ExposedMeld,  // 生成された副露 (加槓の場合は更新後)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDora {
    pub tile: Tile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventOffer {
    pub phase: Phase,
    pub offers: Vec<Offer>, // 操作を待っている座席のみ
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResolve {
    pub target: (Seat, Tile),           // (打牌または加槓した座席, 対象の牌)
    pub chosen: ActionType,             // 採用された操作 (全員スキップの場合はSkip)
    pub winners: Vec<Seat>,             // 操作が採用された座席 (ロンの場合は複数)
    pub responses: Vec<(Seat, Action)>, // 各座席の応答 (タイムアウトはSkip)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventWin {
    pub contexts: Vec<WinContext>,   // 放銃者から近い順
    pub doras: Vec<Tile>,            // ドラ表示牌
    pub ura_doras: Vec<Tile>,        // 裏ドラ表示牌
    pub scores: [Point; SEAT],       // 変化前のスコア
    pub delta_scores: [Point; SEAT], // scores + delta_scores = new_scores
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraw {
    pub draw_type: DrawType,
    pub tenpais: [bool; SEAT],
    pub hands: [Vec<Tile>; SEAT],    // 聴牌していたプレイヤーの手牌 (ノーテンは空の配列)
    pub delta_scores: [Point; SEAT], // 聴牌料による点数変動
}

// 流局の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawType {
    Exhaustive, // 荒牌平局
}
