// 型エイリアス
pub type Seat = usize; // 座席
pub type Type = usize; // 牌の種別部分 (萬子,筒子,索子,字牌)
pub type Tnum = usize; // 牌の数字部分 (1~9, 0:赤5 の10種)
pub type Index = usize; // その他Index
pub type Point = i64; // 点数

// Number
pub const SEAT: usize = 4; // 座席の数
pub const TYPE: usize = 4; // 牌の種別部分の数 (萬子,筒子,索子,字牌)
pub const TNUM: usize = 10; // 牌の数字部分の数 (1~9, 0:赤5 の10種)
pub const TILE: usize = 4; // 同種の牌の数

// Type Index
pub const TM: usize = 0; // Type: Manzu (萬子)
pub const TP: usize = 1; // Type: Pinzu (筒子)
pub const TS: usize = 2; // Type: Souzu (索子)
pub const TZ: usize = 3; // Type: Zihai (字牌)

// Tnum Index
pub const WE: usize = 1; // Wind:    East  (東)
pub const WS: usize = 2; // Wind:    South (南)
pub const WW: usize = 3; // Wind:    West  (西)
pub const WN: usize = 4; // Wind:    North (北)
pub const DW: usize = 5; // Dragon:  White (白)
pub const DG: usize = 6; // Dragon:  Green (發)
pub const DR: usize = 7; // Dragon:  Red   (中)

// 牌山
pub const WALL: usize = 136; // 牌の総数
pub const DEAD_WALL_DORA: usize = 5; // ドラ表示牌の最大数
pub const DEAD_WALL_REPLACEMENT: usize = 4; // 嶺上牌
pub const HAND: usize = 13; // 配牌の枚数
pub const MAX_KAN: usize = 4; // 1局で可能な槓の回数

// 基本点 (子の満貫 = 2000 * 4)
pub const MANGAN: Point = 2000;
pub const HANEMAN: Point = 3000;
pub const BAIMAN: Point = 4000;
pub const SANBAIMAN: Point = 6000;
pub const YAKUMAN: Point = 8000;
pub const YAKUMAN_BASE_FAN: usize = 13; // 青天井ルールで役満1倍に相当する翻数

// 供託
pub const RIICHI_STICK: Point = 1000;
pub const HONBA_RON: Point = 300;
