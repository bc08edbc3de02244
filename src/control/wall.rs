use rand::prelude::*;

use crate::error::{MahjongError, Res};
use crate::model::*;

// 牌山の並び
//   [0, 5)   ドラ表示牌
//   [5, 10)  裏ドラ表示牌
//   [10, 14) 嶺上牌
//   [14, 66) 配牌 (座席0から13枚ずつ)
//   [66, )   ツモ山 (最初の牌は親の14枚目)
pub const WALL_DORA: usize = 0;
pub const WALL_URA_DORA: usize = WALL_DORA + DEAD_WALL_DORA;
pub const WALL_REPLACEMENT: usize = WALL_URA_DORA + DEAD_WALL_DORA;
pub const WALL_HANDS: usize = WALL_REPLACEMENT + DEAD_WALL_REPLACEMENT;
pub const WALL_DRAWS: usize = WALL_HANDS + HAND * SEAT;

// 赤5をn_red5枚含む136枚の牌 (未シャッフル)
fn all_tiles(n_red5: usize) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(WALL);
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if ti == TZ && ni > DR {
                break;
            }
            for n in 0..TILE {
                let ni2 = if ti != TZ && ni == 5 && n < n_red5 {
                    0 // 赤5
                } else {
                    ni
                };
                tiles.push(Tile(ti, ni2));
            }
        }
    }
    tiles
}

fn check_red5(n_red5: usize) -> Res {
    if n_red5 > TILE {
        return Err(MahjongError::Config {
            message: format!("red5 must be <= {}: {}", TILE, n_red5),
        });
    }
    Ok(())
}

pub fn create_wall(seed: u64, n_red5: usize) -> Res<Vec<Tile>> {
    check_red5(n_red5)?;
    let mut wall = all_tiles(n_red5);
    let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(seed);
    wall.shuffle(&mut rng);
    Ok(wall)
}

// 配牌とツモ山の先頭を指定した牌山を生成 指定がない場所はシード値に従ってランダムに配置
// 赤5は通常の5とは別の牌として在庫から取り除く
pub fn create_wall_with(
    seed: u64,
    n_red5: usize,
    hands: &[Vec<Tile>; SEAT],
    draws: &[Tile],
) -> Res<Vec<Tile>> {
    check_red5(n_red5)?;
    if let Some(h) = hands.iter().find(|h| h.len() > HAND) {
        return Err(MahjongError::Config {
            message: format!("too many tiles in a hand: {}", h.len()),
        });
    }
    if draws.len() > WALL - WALL_DRAWS {
        return Err(MahjongError::Config {
            message: format!("too many draws: {}", draws.len()),
        });
    }

    let mut stock = all_tiles(n_red5);
    for &t in hands.iter().flatten().chain(draws) {
        match stock.iter().position(|&x| x == t) {
            Some(i) => {
                stock.swap_remove(i);
            }
            None => {
                return Err(MahjongError::Config {
                    message: format!("no more {} in the wall", t),
                })
            }
        }
    }

    let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(seed);
    stock.shuffle(&mut rng);

    let mut wall = Vec::with_capacity(WALL);
    move_tiles(&mut stock, &mut wall, WALL_HANDS);
    for h in hands {
        wall.extend_from_slice(h);
        move_tiles(&mut stock, &mut wall, HAND - h.len());
    }
    wall.extend_from_slice(draws);
    let n = stock.len();
    move_tiles(&mut stock, &mut wall, n);

    assert!(wall.len() == WALL);
    Ok(wall)
}

fn move_tiles(source: &mut Vec<Tile>, target: &mut Vec<Tile>, count: usize) {
    let n = source.len() - count;
    target.extend(source.drain(n..));
}

#[test]
fn test_create_wall() {
    use super::common::tiles_to_tile_table;
    let wall = create_wall(0, 1).unwrap();
    assert_eq!(wall.len(), WALL);
    let tt = tiles_to_tile_table(&wall);
    assert_eq!(tt[TM][0], 1);
    assert_eq!(tt[TP][5], 4);
    assert_eq!(tt[TZ][DR], 4);

    // 同じシード値からは同じ牌山
    assert_eq!(wall, create_wall(0, 1).unwrap());
    assert_ne!(wall, create_wall(1, 1).unwrap());
    assert!(create_wall(0, 5).is_err());
}

#[test]
fn test_create_wall_with() {
    use super::string::tiles_from_string;
    let hands = [
        tiles_from_string("m1112345678999").unwrap(),
        tiles_from_string("p0").unwrap(),
        vec![],
        vec![],
    ];
    let draws = tiles_from_string("m5z1").unwrap();
    let wall = create_wall_with(7, 1, &hands, &draws).unwrap();
    assert_eq!(wall.len(), WALL);
    assert_eq!(&wall[WALL_HANDS..WALL_HANDS + HAND], &hands[0][..]);
    assert_eq!(wall[WALL_HANDS + HAND], Tile(TP, 0));
    assert_eq!(&wall[WALL_DRAWS..WALL_DRAWS + 2], &draws[..]);
    assert!(!wall[WALL_HANDS + HAND + 1..WALL_DRAWS].contains(&Tile(TP, 0)));

    // 在庫にない牌
    let hands = [tiles_from_string("z11111").unwrap(), vec![], vec![], vec![]];
    assert!(create_wall_with(0, 1, &hands, &[]).is_err());
}
