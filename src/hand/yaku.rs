use std::fmt;

use serde::{Deserialize, Serialize};

use super::parse::{Decomposition, HandShape};
use crate::model::*;

// 役の区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YakuKind {
    Normal,  // 通常役 (valueは翻数)
    Yakuman, // 役満 (valueは役満の倍数)
}

// 成立した役
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YakuValue {
    pub name: String,
    pub value: usize,
    pub kind: YakuKind,
}

impl fmt::Display for YakuValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            YakuKind::Normal => write!(f, "{}({}飜)", self.name, self.value),
            YakuKind::Yakuman => write!(f, "{}(役満x{})", self.name, self.value),
        }
    }
}

#[derive(Debug)]
pub struct YakuContext<'a> {
    hand: &'a TileTable,       // 元々の手牌(鳴きは含まない) 九蓮宝燈の判定などに使用
    dec: &'a Decomposition,    // 鳴きを含むすべての面子
    pair_tile: Option<Tile>,   // 雀頭の牌 (国士無双は和了面子によらず対子)
    winning_tile: Tile,        // 上がり牌
    is_open: bool,             // 鳴きの有無 (暗槓は含まない)
    status: &'a GameStatus,    // 組み合わせ以外による役 外部から設定を行う
    options: &'a ScoringOptions,
    counts: Counts,            // 面子や牌種別のカウント
    iipeikou_count: usize,     // 一盃口, 二盃口用
    yakuhai_check: TileRow,    // 役牌面子のカウント(雀頭は含まない)
}

impl<'a> YakuContext<'a> {
    pub fn new(
        hand: &'a TileTable,
        dec: &'a Decomposition,
        winning_tile: Tile,
        is_open: bool,
        status: &'a GameStatus,
        options: &'a ScoringOptions,
    ) -> Self {
        let pair_tile = dec.pair().map(|m| m.anchor());
        let counts = count_type(&dec.melds);
        let iipeikou_count = count_iipeikou(&dec.melds);
        let yakuhai_check = check_yakuhai(&dec.melds);

        Self {
            hand,
            dec,
            pair_tile,
            winning_tile: winning_tile.to_normal(),
            is_open,
            status,
            options,
            counts,
            iipeikou_count,
            yakuhai_check,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[inline]
    pub fn decomposition(&self) -> &Decomposition {
        self.dec
    }

    #[inline]
    pub fn status(&self) -> &GameStatus {
        self.status
    }

    #[inline]
    pub fn winning_tile(&self) -> Tile {
        self.winning_tile
    }

    // 成立した役を役一覧の定義順で返却 (役満と通常役の取捨は点数計算側で行う)
    pub fn calc_yaku(&self) -> Vec<YakuValue> {
        let mut res = vec![];
        for y in YAKU_LIST {
            if !(y.func)(self) {
                continue;
            }
            let value = if self.is_open { y.fan_open } else { y.fan_close };
            if value == 0 {
                continue; // 食い下がりなし (門前限定)
            }
            res.push(YakuValue {
                name: y.name.to_string(),
                value,
                kind: y.kind,
            });
        }
        res
    }
}

#[derive(Debug, Default)]
struct Counts {
    shuntsu: usize,      // 暗順子
    koutsu: usize,       // 暗刻
    chii: usize,         // 明順子
    pon: usize,          // 明刻 (ロンで完成した刻子を含む)
    minkan: usize,
    ankan: usize,
    single: usize,       // 国士無双の単独牌
    shuntsu_total: usize, // shuntsu + chii
    koutsu_total: usize,  // koutsu + pon + minkan + ankan
    ankou_total: usize,   // koutsu + ankan
    kantsu_total: usize,  // minkan + ankan
    tis: [usize; TYPE],   // tile Type Indices counts
}

fn count_type(melds: &[Meld]) -> Counts {
    let mut cnt = Counts::default();
    for m in melds {
        match (m.kind(), m.is_open(), m.is_quad()) {
            (MeldKind::Pair, _, _) => {}
            (MeldKind::Single, _, _) => cnt.single += 1,
            (MeldKind::Run, false, _) => cnt.shuntsu += 1,
            (MeldKind::Run, true, _) => cnt.chii += 1,
            (MeldKind::Triplet, false, false) => cnt.koutsu += 1,
            (MeldKind::Triplet, true, false) => cnt.pon += 1,
            (MeldKind::Triplet, true, true) => cnt.minkan += 1,
            (MeldKind::Triplet, false, true) => cnt.ankan += 1,
        }

        cnt.tis[m.suit()] += 1;
    }
    cnt.shuntsu_total = cnt.shuntsu + cnt.chii;
    cnt.koutsu_total = cnt.koutsu + cnt.pon + cnt.minkan + cnt.ankan;
    cnt.ankou_total = cnt.koutsu + cnt.ankan;
    cnt.kantsu_total = cnt.minkan + cnt.ankan;

    cnt
}

fn count_iipeikou(melds: &[Meld]) -> usize {
    let mut n = 0;
    let mut shuntsu = TileTable::default();
    for m in melds {
        if m.kind() == MeldKind::Run {
            let t = m.anchor();
            shuntsu[t.0][t.1] += 1;
            if shuntsu[t.0][t.1] % 2 == 0 {
                n += 1;
            }
        }
    }
    n
}

fn check_yakuhai(melds: &[Meld]) -> TileRow {
    let mut tr = TileRow::default();
    for m in melds {
        if m.kind() == MeldKind::Triplet && m.anchor().is_honor() {
            tr[m.anchor().1] += 1;
        }
    }
    tr
}

pub struct Yaku {
    pub name: &'static str,
    pub func: fn(&YakuContext<'_>) -> bool,
    pub fan_close: usize, // 鳴きなしの翻 (役満の場合は倍数)
    pub fan_open: usize,  // 鳴きありの翻(食い下がり) 0は門前限定
    pub kind: YakuKind,
}

impl fmt::Debug for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {:?})",
            self.name, self.fan_close, self.fan_open, self.kind
        )
    }
}

macro_rules! yaku {
    ($n: expr, $f: expr, $c: expr, $o: expr) => {
        Yaku {
            name: $n,
            func: $f,
            fan_close: $c,
            fan_open: $o,
            kind: YakuKind::Normal,
        }
    };
}

macro_rules! yakuman {
    ($n: expr, $f: expr, $c: expr, $o: expr) => {
        Yaku {
            name: $n,
            func: $f,
            fan_close: $c,
            fan_open: $o,
            kind: YakuKind::Yakuman,
        }
    };
}

pub static YAKU_LIST: &[Yaku] = &[
    // 特殊条件
    yaku!("立直", is_riichi, 1, 0),
    yaku!("両立直", is_double_riichi, 2, 0),
    yaku!("一発", is_ippatsu, 1, 0),
    yaku!("門前清自摸和", is_menzentsumo, 1, 0),
    yaku!("海底摸月", is_haitei, 1, 1),
    yaku!("河底撈魚", is_houtei, 1, 1),
    yaku!("嶺上開花", is_rinshan, 1, 1),
    yaku!("槍槓", is_chankan, 1, 1),
    // 面子構成
    yaku!("断幺九", is_tanyao, 1, 1),
    yaku!("平和", is_pinfu, 1, 0),
    yaku!("一盃口", is_iipeikou, 1, 0),
    yaku!("二盃口", is_ryanpeikou, 3, 0),
    yaku!("場風", is_bakaze, 1, 1),
    yaku!("自風", is_jikaze, 1, 1),
    yaku!("白", is_haku, 1, 1),
    yaku!("發", is_hatsu, 1, 1),
    yaku!("中", is_chun, 1, 1),
    yaku!("一気通貫", is_ittsu, 2, 1),
    yaku!("三色同順", is_sanshoku_doujun, 2, 1),
    yaku!("三色同刻", is_sanshoku_doukou, 2, 2),
    yaku!("混全帯幺九", is_chanta, 2, 1),
    yaku!("純全帯幺九", is_junchan, 3, 2),
    yaku!("混老頭", is_honroutou, 2, 2),
    yaku!("対々和", is_toitoi, 2, 2),
    yaku!("三暗刻", is_sanankou, 2, 2),
    yaku!("三槓子", is_sankantsu, 2, 2),
    yaku!("混一色", is_honitsu, 3, 2),
    yaku!("清一色", is_chinitsu, 6, 5),
    yaku!("小三元", is_shousangen, 2, 2),
    yaku!("七対子", is_chiitoitsu, 2, 0),
    // 役満
    yakuman!("国士無双", is_kokushi, 1, 0),
    yakuman!("国士無双十三面待ち", is_kokushi_13, 2, 0),
    yakuman!("四暗刻", is_suuankou, 1, 0),
    yakuman!("四暗刻単騎", is_suuankou_tanki, 2, 0),
    yakuman!("大三元", is_daisangen, 1, 1),
    yakuman!("小四喜", is_shousuushii, 1, 1),
    yakuman!("大四喜", is_daisuushii, 2, 2),
    yakuman!("字一色", is_tsuuiisou, 1, 1),
    yakuman!("清老頭", is_chinroutou, 1, 1),
    yakuman!("緑一色", is_ryuuiisou, 1, 1),
    yakuman!("九蓮宝燈", is_chuuren, 1, 0),
    yakuman!("純正九蓮宝燈", is_junsei_chuuren, 2, 0),
    yakuman!("四槓子", is_suukantsu, 1, 1),
    yakuman!("天和", is_tenhou, 1, 0),
    yakuman!("地和", is_chiihou, 1, 0),
];

// 役の優先順位 =================================================================
// 以下の役は排他的(包含関係)であり,判定関数の条件で右側のみが成立する
//     立直, 両立直
//     一盃口, 二盃口
//     混全帯幺九, 純全帯幺九
//     混老頭, 清老頭 (清老頭は役満のため混老頭とは点数計算側で排他)
//     混一色, 清一色
//     三暗刻, 四暗刻, 四暗刻単騎
//     三槓子, 四槓子
//     小四喜, 大四喜
//     九蓮宝燈, 純正九蓮宝燈
//     国士無双, 国士無双十三面待ち

// 立直
fn is_riichi(ctx: &YakuContext<'_>) -> bool {
    ctx.status.riichi && !ctx.status.double_riichi
}

// 両立直
fn is_double_riichi(ctx: &YakuContext<'_>) -> bool {
    ctx.status.double_riichi
}

// 一発
fn is_ippatsu(ctx: &YakuContext<'_>) -> bool {
    ctx.status.ippatsu && (ctx.status.riichi || ctx.status.double_riichi)
}

// 門前清自摸和
fn is_menzentsumo(ctx: &YakuContext<'_>) -> bool {
    ctx.status.is_drawn && !ctx.is_open
}

// 海底摸月
fn is_haitei(ctx: &YakuContext<'_>) -> bool {
    ctx.status.haitei && ctx.status.is_drawn && !ctx.status.rinshan
}

// 河底撈魚
fn is_houtei(ctx: &YakuContext<'_>) -> bool {
    ctx.status.houtei && !ctx.status.is_drawn
}

// 嶺上開花
fn is_rinshan(ctx: &YakuContext<'_>) -> bool {
    ctx.status.rinshan && ctx.status.is_drawn
}

// 槍槓
fn is_chankan(ctx: &YakuContext<'_>) -> bool {
    ctx.status.chankan && !ctx.status.is_drawn
}

// 断幺九
fn is_tanyao(ctx: &YakuContext<'_>) -> bool {
    if ctx.is_open && !ctx.options.open_tanyao {
        return false;
    }
    ctx.dec.melds.iter().all(|m| !m.has_terminal_or_honor() && m.kind() != MeldKind::Single)
}

// 平和
pub(super) fn is_pinfu(ctx: &YakuContext<'_>) -> bool {
    if ctx.counts.shuntsu != 4 || ctx.is_open {
        return false;
    }

    if let Some(pt) = ctx.pair_tile {
        if is_yakuhai_tile(ctx, pt) {
            return false;
        }
    }

    is_ryanmen(ctx.dec.winning_meld(), ctx.winning_tile)
}

// 一盃口
fn is_iipeikou(ctx: &YakuContext<'_>) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 1
}

// 二盃口
fn is_ryanpeikou(ctx: &YakuContext<'_>) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 2
}

// 場風
fn is_bakaze(ctx: &YakuContext<'_>) -> bool {
    ctx.yakuhai_check[ctx.status.prevalent_wind] == 1
}

// 自風
fn is_jikaze(ctx: &YakuContext<'_>) -> bool {
    ctx.yakuhai_check[ctx.status.seat_wind] == 1
}

// 白
fn is_haku(ctx: &YakuContext<'_>) -> bool {
    ctx.yakuhai_check[DW] == 1
}

// 發
fn is_hatsu(ctx: &YakuContext<'_>) -> bool {
    ctx.yakuhai_check[DG] == 1
}

// 中
fn is_chun(ctx: &YakuContext<'_>) -> bool {
    ctx.yakuhai_check[DR] == 1
}

// 一気通貫
fn is_ittsu(ctx: &YakuContext<'_>) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    for ti in 0..TZ {
        let mut f147 = [false; 3];
        for m in &ctx.dec.melds {
            let t = m.anchor();
            if m.kind() == MeldKind::Run && t.0 == ti {
                match t.1 {
                    1 | 4 | 7 => f147[t.1 / 3] = true,
                    _ => {}
                }
            }
        }
        if f147[0] && f147[1] && f147[2] {
            return true;
        }
    }

    false
}

// 三色同順
fn is_sanshoku_doujun(ctx: &YakuContext<'_>) -> bool {
    is_sanshoku(ctx, MeldKind::Run, ctx.counts.shuntsu_total)
}

// 三色同刻
fn is_sanshoku_doukou(ctx: &YakuContext<'_>) -> bool {
    is_sanshoku(ctx, MeldKind::Triplet, ctx.counts.koutsu_total)
}

// 混全帯幺九
fn is_chanta(ctx: &YakuContext<'_>) -> bool {
    ctx.counts.shuntsu_total != 0 && is_outside_hand(ctx) && ctx.counts.tis[TZ] != 0
}

// 純全帯幺九
fn is_junchan(ctx: &YakuContext<'_>) -> bool {
    ctx.counts.shuntsu_total != 0 && is_outside_hand(ctx) && ctx.counts.tis[TZ] == 0
}

// 混老頭
fn is_honroutou(ctx: &YakuContext<'_>) -> bool {
    ctx.counts.shuntsu_total == 0
        && ctx.counts.single == 0
        && ctx.counts.tis[TZ] != 0
        && ctx.counts.tis[TZ] != ctx.dec.melds.len()
        && ctx.dec.melds.iter().all(|m| m.is_all_terminal_or_honor())
}

// 対々和
fn is_toitoi(ctx: &YakuContext<'_>) -> bool {
    ctx.counts.koutsu_total == 4
}

// 三暗刻
fn is_sanankou(ctx: &YakuContext<'_>) -> bool {
    ctx.counts.ankou_total == 3
}

// 三槓子
fn is_sankantsu(ctx: &YakuContext<'_>) -> bool {
    ctx.counts.kantsu_total == 3
}

// 混一色
fn is_honitsu(ctx: &YakuContext<'_>) -> bool {
    n_suits(ctx) == 1 && ctx.counts.tis[TZ] > 0
}

// 清一色
fn is_chinitsu(ctx: &YakuContext<'_>) -> bool {
    n_suits(ctx) == 1 && ctx.counts.tis[TZ] == 0
}

// 小三元
fn is_shousangen(ctx: &YakuContext<'_>) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 2 && ctx.pair_tile.map_or(false, |t| t.is_dragon())
}

// 七対子
fn is_chiitoitsu(ctx: &YakuContext<'_>) -> bool {
    ctx.dec.shape == HandShape::SevenPairs
}

// 国士無双
fn is_kokushi(ctx: &YakuContext<'_>) -> bool {
    ctx.dec.shape == HandShape::ThirteenOrphans
        && ctx.dec.winning_meld().kind() != MeldKind::Pair
}

// 国士無双十三面待ち
fn is_kokushi_13(ctx: &YakuContext<'_>) -> bool {
    ctx.dec.shape == HandShape::ThirteenOrphans
        && ctx.dec.winning_meld().kind() == MeldKind::Pair
}

// 四暗刻
fn is_suuankou(ctx: &YakuContext<'_>) -> bool {
    ctx.counts.ankou_total == 4 && ctx.dec.winning_meld().kind() != MeldKind::Pair
}

// 四暗刻単騎
fn is_suuankou_tanki(ctx: &YakuContext<'_>) -> bool {
    ctx.counts.ankou_total == 4 && ctx.dec.winning_meld().kind() == MeldKind::Pair
}

// 大三元
fn is_daisangen(ctx: &YakuContext<'_>) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 3
}

// 小四喜
fn is_shousuushii(ctx: &YakuContext<'_>) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[WE] + yc[WS] + yc[WW] + yc[WN] == 3 && ctx.pair_tile.map_or(false, |t| t.is_wind())
}

// 大四喜
fn is_daisuushii(ctx: &YakuContext<'_>) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[WE] + yc[WS] + yc[WW] + yc[WN] == 4
}

// 字一色
fn is_tsuuiisou(ctx: &YakuContext<'_>) -> bool {
    ctx.counts.tis[TZ] == ctx.dec.melds.len()
}

// 清老頭
fn is_chinroutou(ctx: &YakuContext<'_>) -> bool {
    ctx.counts.single == 0 && ctx.dec.melds.iter().all(|m| m.is_all_terminal())
}

// 緑一色
fn is_ryuuiisou(ctx: &YakuContext<'_>) -> bool {
    ctx.dec
        .melds
        .iter()
        .all(|m| m.kind() != MeldKind::Single && m.tiles().all(|t| t.is_green()))
}

// 九蓮宝燈
fn is_chuuren(ctx: &YakuContext<'_>) -> bool {
    let wt = ctx.winning_tile;
    let cnt = ctx.hand[wt.0][wt.1];
    is_chuuren_shape(ctx) && (cnt == 1 || cnt == 3)
}

// 純正九蓮宝燈 (和了牌を除いた形が1112345678999)
fn is_junsei_chuuren(ctx: &YakuContext<'_>) -> bool {
    let wt = ctx.winning_tile;
    let cnt = ctx.hand[wt.0][wt.1];
    is_chuuren_shape(ctx) && (cnt == 2 || cnt == 4)
}

// 四槓子
fn is_suukantsu(ctx: &YakuContext<'_>) -> bool {
    ctx.counts.kantsu_total == 4
}

// 天和
fn is_tenhou(ctx: &YakuContext<'_>) -> bool {
    is_first_draw(ctx) && ctx.status.seat_wind == WE
}

// 地和
fn is_chiihou(ctx: &YakuContext<'_>) -> bool {
    is_first_draw(ctx) && ctx.status.seat_wind != WE
}

// 共通処理 ====================================================================

// 副露のない第1巡のツモ
fn is_first_draw(ctx: &YakuContext<'_>) -> bool {
    ctx.status.is_drawn && ctx.status.turn == 1 && ctx.status.no_calls
}

fn is_yakuhai_tile(ctx: &YakuContext<'_>, t: Tile) -> bool {
    t.is_dragon()
        || (t.is_wind() && (t.1 == ctx.status.prevalent_wind || t.1 == ctx.status.seat_wind))
}

// 両面待ち
pub(crate) fn is_ryanmen(m: Meld, wt: Tile) -> bool {
    if m.kind() != MeldKind::Run {
        return false;
    }
    let a = m.anchor();
    let wt = wt.to_normal();
    (wt == a && a.1 != 7) || (wt == m.last() && a.1 != 1)
}

fn is_sanshoku(ctx: &YakuContext<'_>, kind: MeldKind, total: usize) -> bool {
    if total < 3 {
        return false;
    }

    for ni in 1..TNUM {
        let mut mps = [false; 3];
        for m in &ctx.dec.melds {
            let t = m.anchor();
            if m.kind() == kind && t.is_suit() && t.1 == ni {
                mps[t.0] = true;
            }
        }
        if mps[0] && mps[1] && mps[2] {
            return true;
        }
    }

    false
}

// 全ての面子,雀頭に么九牌を含む
fn is_outside_hand(ctx: &YakuContext<'_>) -> bool {
    ctx.dec.shape == HandShape::Standard
        && ctx.dec.melds.iter().all(|m| m.has_terminal_or_honor())
}

// 使用している数牌の種類数
fn n_suits(ctx: &YakuContext<'_>) -> usize {
    let tis = &ctx.counts.tis;
    (0..TZ).filter(|&ti| tis[ti] > 0).count()
}

// 九蓮宝燈(純正を含む) 門前で1種の数牌のみ,1112345678999+1枚
fn is_chuuren_shape(ctx: &YakuContext<'_>) -> bool {
    if ctx.is_open || ctx.dec.shape != HandShape::Standard || ctx.counts.kantsu_total != 0 {
        return false;
    }
    if n_suits(ctx) != 1 || ctx.counts.tis[TZ] != 0 {
        return false;
    }

    let ti = ctx.dec.melds[0].suit();
    let h = &ctx.hand[ti];
    if h[1] < 3 || h[9] < 3 {
        return false;
    }
    (2..9).all(|ni| h[ni] != 0)
}

#[cfg(test)]
fn yaku_names(exp: &str, win: &str, melds: &[&str], status: GameStatus) -> Vec<String> {
    use super::parse::decompose;
    use crate::control::common::tiles_to_tile_table;
    use crate::control::string::{exposed_meld_from_string, tiles_from_string};

    let hand = tiles_to_tile_table(&tiles_from_string(exp).unwrap());
    let melds: Vec<ExposedMeld> = melds
        .iter()
        .map(|m| exposed_meld_from_string(m).unwrap())
        .collect();
    let is_open = melds.iter().any(|m| m.is_open());
    let wt = tiles_from_string(win).unwrap()[0];
    let opts = ScoringOptions::default();

    // 最も役の多い解釈を採用
    let mut best: Vec<String> = vec![];
    for dec in decompose(&hand, &melds, wt, status.is_drawn) {
        let ctx = YakuContext::new(&hand, &dec, wt, is_open, &status, &opts);
        let names: Vec<String> = ctx.calc_yaku().into_iter().map(|y| y.name).collect();
        if names.len() > best.len() {
            best = names;
        }
    }
    best
}

#[test]
fn test_yaku_pinfu_tanyao() {
    let st = GameStatus {
        is_drawn: true,
        ..Default::default()
    };
    let names = yaku_names("m234678p234s23455", "s4", &[], st);
    assert!(names.contains(&"平和".to_string()));
    assert!(names.contains(&"断幺九".to_string()));
    assert!(names.contains(&"門前清自摸和".to_string()));
    assert!(names.contains(&"三色同順".to_string()));

    // 嵌張待ちは平和にならない
    let names = yaku_names("m234567p234s67899", "s7", &[], GameStatus::default());
    assert!(!names.contains(&"平和".to_string()));
}

#[test]
fn test_yaku_exclusive() {
    let st = GameStatus::default();
    // 混一色と清一色は同時に成立しない
    let names = yaku_names("m1112345678999m5", "m5", &[], st);
    assert!(names.contains(&"純正九蓮宝燈".to_string()));
    assert!(!names.contains(&"九蓮宝燈".to_string()));
    let names = yaku_names("m11123455678z111", "m8", &[], st);
    assert!(names.contains(&"混一色".to_string()));
    assert!(!names.contains(&"清一色".to_string()));
    let names = yaku_names("m11123455678999", "m8", &[], st);
    assert!(names.contains(&"清一色".to_string()));
    assert!(!names.contains(&"混一色".to_string()));
}

#[test]
fn test_yaku_chuuren() {
    let st = GameStatus::default();
    // 1112345678999の9面待ちからm9で和了
    let names = yaku_names("m11123456789999", "m9", &[], st);
    assert!(names.contains(&"純正九蓮宝燈".to_string()));
    assert!(!names.contains(&"九蓮宝燈".to_string()));
    // 1112345678899の状態からm5で和了
    let names = yaku_names("m11123456788999", "m5", &[], st);
    assert!(names.contains(&"九蓮宝燈".to_string()));
    assert!(!names.contains(&"純正九蓮宝燈".to_string()));
}

#[test]
fn test_yaku_open_hand() {
    let st = GameStatus::default();
    let names = yaku_names("m234p567s23455", "s4", &["z5+55"], st);
    assert_eq!(names, vec!["白".to_string()]);

    // 門前限定役は副露で消える, 食い下がりの役は残る
    let names = yaku_names("p123456789s55", "s5", &["s2+34"], st);
    assert_eq!(names, vec!["一気通貫".to_string()]);
}

#[test]
fn test_yaku_yakuman() {
    let st = GameStatus::default();
    let names = yaku_names("m19p19s19z12345677", "z7", &[], st);
    assert_eq!(names, vec!["国士無双十三面待ち".to_string()]);
    let names = yaku_names("m19p19s19z12345677", "m1", &[], st);
    assert_eq!(names, vec!["国士無双".to_string()]);

    let st = GameStatus {
        is_drawn: true,
        ..Default::default()
    };
    let names = yaku_names("m111p999s222z33355", "z5", &[], st);
    assert!(names.contains(&"四暗刻単騎".to_string()));
    assert!(!names.contains(&"四暗刻".to_string()));

    let names = yaku_names("z11122233344455", "z5", &[], st);
    assert!(names.contains(&"大四喜".to_string()));
    assert!(names.contains(&"字一色".to_string()));
}

#[test]
fn test_yaku_first_draw() {
    let has = |names: &[String], name: &str| names.iter().any(|n| n == name);
    let st = GameStatus {
        is_drawn: true,
        turn: 1,
        ..Default::default()
    };
    let names = yaku_names("m123456789p11s234", "s4", &[], st);
    assert!(has(&names, "天和") && !has(&names, "地和"));

    let st = GameStatus { seat_wind: WS, ..st };
    let names = yaku_names("m123456789p11s234", "s4", &[], st);
    assert!(has(&names, "地和") && !has(&names, "天和"));

    // 暗槓を含む副露があれば第1巡でも不成立
    let names = yaku_names("m123456789p11s234", "s4", &[], GameStatus { no_calls: false, ..st });
    assert!(!has(&names, "地和"));
    let names = yaku_names("m123456789p11s234", "s4", &[], GameStatus { turn: 2, ..st });
    assert!(!has(&names, "地和"));
}
