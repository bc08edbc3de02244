use crate::error::{MahjongError, Res};
use crate::model::*;

pub fn tile_type_from_char(ch: char) -> Option<Type> {
    match ch {
        'm' => Some(TM),
        'p' => Some(TP),
        's' => Some(TS),
        'z' => Some(TZ),
        _ => None,
    }
}

pub fn tile_type_to_char(ti: Type) -> char {
    match ti {
        TM => 'm',
        TP => 'p',
        TS => 's',
        TZ => 'z',
        _ => panic!("invalid tile type index: {ti}"),
    }
}

// "m123p406z77" 形式の文字列を牌のリストに変換 (0は赤5)
pub fn tiles_from_string(exp: &str) -> Res<Vec<Tile>> {
    let mut tiles = vec![];
    let mut ti = None;
    for ch in exp.chars() {
        match ch {
            'm' | 'p' | 's' | 'z' => ti = tile_type_from_char(ch),
            '0'..='9' => {
                let Some(ti) = ti else {
                    return Err(MahjongError::parse(exp, "tile number before tile type"));
                };
                let ni = ch as usize - '0' as usize;
                tiles.push(Tile::new(ti, ni)?);
            }
            ' ' => {}
            _ => return Err(MahjongError::parse(exp, format!("invalid char: '{}'", ch))),
        }
    }
    Ok(tiles)
}

pub fn tiles_to_string(tiles: &[Tile]) -> String {
    let mut res = String::new();
    let mut last_ti = None;
    for t in tiles {
        if last_ti != Some(t.0) {
            last_ti = Some(t.0);
            res.push(tile_type_to_char(t.0));
        }
        res.push_str(&t.1.to_string());
    }
    res
}

// 副露の文字列表現
//   チー: "m3+45" ('+'の直前が鳴いた牌, 常に上家から)
//   ポン,明槓: 鳴いた牌の位置で相手を表す 先頭:上家, 2番目:対面, 3番目:下家
//     例: "z5+55" 上家からポン, "m55+55" 対面から明槓
//   暗槓: "s5055" ('+'なし)
//   加槓: "p5+55+5" (2つ目の'+'が加槓で追加した牌)
pub fn exposed_meld_from_string(exp: &str) -> Res<ExposedMeld> {
    let mut ti = None;
    let mut tiles = vec![];
    let mut marks = vec![]; // '+'が付いた牌のindex
    for ch in exp.chars() {
        match ch {
            'm' | 'p' | 's' | 'z' => {
                if ti.is_some() {
                    return Err(MahjongError::parse(exp, "multiple tile types in a meld"));
                }
                ti = tile_type_from_char(ch);
            }
            '+' => {
                if tiles.is_empty() {
                    return Err(MahjongError::parse(exp, "invalid '+' prefix"));
                }
                marks.push(tiles.len() - 1);
            }
            '0'..='9' => {
                let Some(ti) = ti else {
                    return Err(MahjongError::parse(exp, "tile number before tile type"));
                };
                tiles.push(Tile::new(ti, ch as usize - '0' as usize)?);
            }
            _ => return Err(MahjongError::parse(exp, format!("invalid char: '{}'", ch))),
        }
    }

    let others = |skip: &[usize]| -> Vec<Tile> {
        tiles
            .iter()
            .enumerate()
            .filter(|(i, _)| !skip.contains(i))
            .map(|(_, &t)| t)
            .collect()
    };
    let side_at = |pos: usize| match pos {
        0 => MeldSide::Left,
        1 => MeldSide::Opposite,
        _ => MeldSide::Right,
    };
    let is_run = tiles.len() == 3 && tiles[0].to_normal() != tiles[1].to_normal();

    let res = match (tiles.len(), marks.len()) {
        (3, 1) if is_run => {
            let c = others(&marks);
            ExposedMeld::chow([c[0], c[1]], tiles[marks[0]])
        }
        (3, 1) => {
            let c = others(&marks);
            ExposedMeld::pong([c[0], c[1]], tiles[marks[0]], side_at(marks[0]))
        }
        (4, 1) => {
            let c = others(&marks);
            ExposedMeld::kong([c[0], c[1], c[2]], tiles[marks[0]], side_at(marks[0]))
        }
        (4, 0) => ExposedMeld::concealed_kong([tiles[0], tiles[1], tiles[2], tiles[3]]),
        (4, 2) => {
            let c = others(&marks);
            ExposedMeld::pong([c[0], c[1]], tiles[marks[0]], side_at(marks[0]))
                .and_then(|m| m.add_to_kong(tiles[marks[1]]))
        }
        _ => return Err(MahjongError::parse(exp, "invalid meld")),
    };
    res.map_err(|e| MahjongError::parse(exp, e.to_string()))
}

pub fn exposed_meld_to_string(m: &ExposedMeld) -> String {
    let meld = m.meld();
    let mut res = String::new();
    res.push(tile_type_to_char(meld.suit()));
    if !m.is_open() {
        for t in m.tiles() {
            res.push_str(&t.1.to_string());
        }
        return res;
    }

    // 鳴いた牌以外 (加槓の牌は末尾)
    let mut rest: Vec<Tile> = m.tiles().to_vec();
    for x in std::iter::once(m.claimed()).chain(m.extra()) {
        if let Some(p) = rest.iter().position(|&t| t == x) {
            rest.remove(p);
        }
    }
    let pos = match m.side() {
        MeldSide::Left | MeldSide::Own => 0,
        MeldSide::Opposite => 1,
        MeldSide::Right => rest.len(),
    };
    for (i, t) in rest.iter().enumerate() {
        if i == pos {
            res.push_str(&format!("{}+", m.claimed().1));
        }
        res.push_str(&t.1.to_string());
    }
    if pos == rest.len() {
        res.push_str(&format!("{}+", m.claimed().1));
    }
    if let Some(e) = m.extra() {
        res.push_str(&format!("{}+", e.1));
    }
    res
}

#[test]
fn test_tiles_to_string() {
    let hand_str = "p34777s1230567z66";
    let hand = tiles_from_string(hand_str).unwrap();
    assert_eq!(hand.len(), 14);
    assert_eq!(tiles_to_string(&hand), hand_str);
    assert!(tiles_from_string("1m").is_err());
    assert!(tiles_from_string("z8").is_err());
    assert!(tiles_from_string("m1x").is_err());
}

#[test]
fn test_exposed_meld_string() {
    let m = exposed_meld_from_string("m3+45").unwrap();
    assert_eq!(m.meld(), Meld::run(Tile(TM, 3)));
    assert_eq!(m.side(), MeldSide::Left);

    let m = exposed_meld_from_string("z55+5").unwrap();
    assert_eq!(m.side(), MeldSide::Opposite);
    assert_eq!(exposed_meld_to_string(&m), "z55+5");

    let m = exposed_meld_from_string("s5055").unwrap();
    assert!(m.is_kong() && !m.is_open());

    let m = exposed_meld_from_string("p5+55+0").unwrap();
    assert!(m.is_added());
    assert_eq!(m.extra(), Some(Tile(TP, 0)));
    assert_eq!(exposed_meld_to_string(&m), "p5+550+");

    assert!(exposed_meld_from_string("m1+35").is_err());
    assert!(exposed_meld_from_string("m12").is_err());
}
