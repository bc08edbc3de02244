use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionType {
    // Call Actions: 他家の打牌(加槓)に対する操作
    // 配列は鳴きにより手牌から消失する牌のリスト 標的の牌はstage.last_tileを参照する
    Skip,  // 鳴き,ロンのスキップ
    Chow,  // チー
    Pong,  // ポン
    Kong,  // 明槓
    Rong,  // ロン

    // Turn Actions: ツモ番の操作
    Discard,       // 打牌
    Riichi,        // リーチ宣言牌の打牌
    ConcealedKong, // 暗槓
    AddedKong,     // 加槓
    Tsumo,         // ツモ和了
}

impl ActionType {
    // 同一の打牌に複数の鳴きが選択された場合の優先度 (大きいほど優先)
    pub fn call_priority(self) -> usize {
        match self {
            ActionType::Rong => 3,
            ActionType::Kong | ActionType::Pong => 2,
            ActionType::Chow => 1,
            _ => 0,
        }
    }

    #[inline]
    pub fn is_call(self) -> bool {
        matches!(
            self,
            ActionType::Skip
                | ActionType::Chow
                | ActionType::Pong
                | ActionType::Kong
                | ActionType::Rong
        )
    }
}

// Vec<Tile>は操作により手牌からなくなる牌
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub ty: ActionType,
    pub tiles: Vec<Tile>,
}

impl Action {
    #[inline]
    pub fn new(ty: ActionType, mut tiles: Vec<Tile>) -> Self {
        tiles.sort();
        Self { ty, tiles }
    }

    #[inline]
    pub fn skip() -> Self {
        Self::new(ActionType::Skip, vec![])
    }

    #[inline]
    pub fn discard(t: Tile) -> Self {
        Self::new(ActionType::Discard, vec![t])
    }

    #[inline]
    pub fn riichi(t: Tile) -> Self {
        Self::new(ActionType::Riichi, vec![t])
    }

    #[inline]
    pub fn concealed_kong(v: Vec<Tile>) -> Self {
        assert!(v.len() == 4);
        Self::new(ActionType::ConcealedKong, v)
    }

    #[inline]
    pub fn added_kong(t: Tile) -> Self {
        Self::new(ActionType::AddedKong, vec![t])
    }

    #[inline]
    pub fn tsumo() -> Self {
        Self::new(ActionType::Tsumo, vec![])
    }

    #[inline]
    pub fn chow(v: Vec<Tile>) -> Self {
        assert!(v.len() == 2);
        Self::new(ActionType::Chow, v)
    }

    #[inline]
    pub fn pong(v: Vec<Tile>) -> Self {
        assert!(v.len() == 2);
        Self::new(ActionType::Pong, v)
    }

    #[inline]
    pub fn kong(v: Vec<Tile>) -> Self {
        assert!(v.len() == 3);
        Self::new(ActionType::Kong, v)
    }

    #[inline]
    pub fn rong() -> Self {
        Self::new(ActionType::Rong, vec![])
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.ty, self.tiles)
    }
}

// 各座席に提示する選択可能な操作の一覧
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub seat: Seat,
    pub actions: Vec<Action>,
    pub bonus_time_ms: u64, // 残りの持ち時間(基本時間を超えた分はここから消費)
}

impl Offer {
    pub fn contains(&self, act: &Action) -> bool {
        self.actions.contains(act)
    }

    // 牌の指定を問わず種別のみで判定
    pub fn has_type(&self, ty: ActionType) -> bool {
        self.actions.iter().any(|a| a.ty == ty)
    }
}

#[test]
fn test_action_priority() {
    assert!(ActionType::Rong.call_priority() > ActionType::Kong.call_priority());
    assert_eq!(
        ActionType::Kong.call_priority(),
        ActionType::Pong.call_priority()
    );
    assert!(ActionType::Pong.call_priority() > ActionType::Chow.call_priority());
    assert!(ActionType::Chow.call_priority() > ActionType::Skip.call_priority());
    assert!(ActionType::Skip.is_call() && !ActionType::Discard.is_call());
    // 牌の順序は正規化される
    assert_eq!(
        Action::pong(vec![Tile(TM, 5), Tile(TM, 0)]),
        Action::pong(vec![Tile(TM, 0), Tile(TM, 5)])
    );
}
