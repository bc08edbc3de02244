use super::parse::HandShape;
use super::yaku::{is_pinfu, is_ryanmen, YakuContext};
use crate::model::*;

// 符計算
pub fn calc_fu(ctx: &YakuContext<'_>) -> usize {
    let dec = ctx.decomposition();
    let st = ctx.status();
    match dec.shape {
        HandShape::SevenPairs => return 25,
        HandShape::ThirteenOrphans => return 30, // 役満のため点数には影響しない
        HandShape::Standard => {}
    }
    if is_pinfu(ctx) {
        return if st.is_drawn { 20 } else { 30 };
    }

    // 副底
    let mut fu = 20;

    // 和了り方
    fu += if st.is_drawn {
        2 // ツモ
    } else if !ctx.is_open() {
        10 // 門前ロン
    } else {
        0
    };

    // 面子, 雀頭
    for m in &dec.melds {
        let t = m.anchor();
        match m.kind() {
            MeldKind::Pair => {
                if t.is_dragon() {
                    fu += 2;
                }
                if t.is_wind() && t.1 == st.prevalent_wind {
                    fu += 2;
                }
                if t.is_wind() && t.1 == st.seat_wind {
                    fu += 2;
                }
            }
            MeldKind::Triplet => {
                let mut n = 2; // 明刻の中張牌
                if t.is_terminal_or_honor() {
                    n *= 2;
                }
                if !m.is_open() {
                    n *= 2;
                }
                if m.is_quad() {
                    n *= 4;
                }
                fu += n;
            }
            MeldKind::Run | MeldKind::Single => {}
        }
    }

    // 待ちの形 (嵌張,辺張,単騎)
    let wm = dec.winning_meld();
    let wt = ctx.winning_tile();
    match wm.kind() {
        MeldKind::Pair => fu += 2,
        MeldKind::Run if !is_ryanmen(wm, wt) => fu += 2,
        _ => {}
    }

    // 喰い平和形
    if fu == 20 {
        return 30;
    }

    (fu + 9) / 10 * 10 // １の位は切り上げ
}

#[cfg(test)]
fn fu_of(exp: &str, win: &str, melds: &[&str], is_drawn: bool) -> usize {
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
    let st = GameStatus {
        is_drawn,
        prevalent_wind: WE,
        seat_wind: WS,
        ..Default::default()
    };
    let opts = ScoringOptions::default();
    decompose(&hand, &melds, wt, is_drawn)
        .map(|dec| {
            let ctx = YakuContext::new(&hand, &dec, wt, is_open, &st, &opts);
            calc_fu(&ctx)
        })
        .max()
        .unwrap()
}

#[test]
fn test_fu() {
    // 平和
    assert_eq!(fu_of("m234678p234s23455", "s4", &[], true), 20);
    assert_eq!(fu_of("m234678p234s23455", "s4", &[], false), 30);
    // 七対子
    assert_eq!(fu_of("m1199p2255s3377z11", "z1", &[], false), 25);
    // 門前ロン 20+10, 暗刻(中張)4, 嵌張2 => 36 -> 40
    assert_eq!(fu_of("m222p123s456789z33", "s5", &[], false), 40);
    // 喰い平和形は30符
    assert_eq!(fu_of("m234p567s23455", "s4", &["m6+78"], false), 30);
    // ツモ2, 暗槓(么九)32, 場風の雀頭2, 単騎2 => 58 -> 60
    assert_eq!(fu_of("m234p567s234z11", "z1", &["z5555"], true), 60);
    // ロンで完成した刻子は明刻: 20+10+2(明刻中張)+8(暗刻么九) => 40
    assert_eq!(fu_of("m555p999s234678z33", "m5", &[], false), 40);
}
