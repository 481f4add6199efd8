// 型エイリアス
pub type Seat = usize; // 座席
pub type Kind = usize; // 牌の種類 (0~33) 同種の牌は同じ値
pub type Type = usize; // 牌の種別部分 (萬子,筒子,索子,字牌)
pub type Tnum = usize; // 牌の数字部分 (1~9, 0:赤5)
pub type Index = usize; // その他Index
pub type Score = i32; // 点数の授受

// Number
pub const SEAT: usize = 4; // 座席の数
pub const TYPE: usize = 4; // 牌の種別部分の数 (萬子,筒子,索子,字牌)
pub const TILE: usize = 4; // 同種の牌の数
pub const KIND_COUNT: usize = 34; // 牌の種類の数
pub const TILE_COUNT: usize = KIND_COUNT * TILE; // 牌の総数 (=136)
pub const HAND_SIZE: usize = 13; // 配牌の枚数
pub const WIN_SIZE: usize = 14; // 和了判定時の手牌の枚数 (副露は3枚として計算)
pub const DEAL_COUNT: usize = HAND_SIZE * SEAT + 1; // 配牌で使用する牌の数 (親の14枚目を含む)

// Type Index
pub const TM: usize = 0; // Type: Manzu (萬子)
pub const TP: usize = 1; // Type: Pinzu (筒子)
pub const TS: usize = 2; // Type: Souzu (索子)
pub const TZ: usize = 3; // Type: Zihai (字牌)

// Tnum Index (字牌)
pub const WE: usize = 1; // Wind:    East  (東)
pub const WS: usize = 2; // Wind:    South (南)
pub const WW: usize = 3; // Wind:    West  (西)
pub const WN: usize = 4; // Wind:    North (北)
pub const DW: usize = 5; // Doragon: White (白)
pub const DG: usize = 6; // Doragon: Green (發)
pub const DR: usize = 7; // Doragon: Red   (中)
