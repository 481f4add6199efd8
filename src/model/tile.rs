use serde::ser;

use super::*;

// 牌の識別子 (0~135)
// id / 4 が牌の種類(Kind), id % 4 が同種の牌の何枚目かを表す
// 数牌の5で id % 4 == 0 のものは赤5
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(pub u8);

impl Tile {
    pub fn new(id: usize) -> Option<Self> {
        if id < TILE_COUNT {
            Some(Self(id as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn id(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn kind(self) -> Kind {
        self.id() / TILE
    }

    #[inline]
    pub fn copy_index(self) -> usize {
        self.id() % TILE
    }

    // 赤5
    #[inline]
    pub fn is_red5(self) -> bool {
        is_suit_kind(self.kind()) && kind_number(self.kind()) == 5 && self.copy_index() == 0
    }

    #[inline]
    pub fn tile_type(self) -> Type {
        kind_type(self.kind())
    }

    // 数字部分 赤5は0
    #[inline]
    pub fn tnum(self) -> Tnum {
        if self.is_red5() {
            0
        } else {
            kind_number(self.kind())
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ['m', 'p', 's', 'z'][self.tile_type()], self.tnum())
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self, self.0)
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

// [Kind]

#[inline]
pub fn kind_type(k: Kind) -> Type {
    k / 9
}

// 1~9 (字牌は 1:東 ~ 7:中)
#[inline]
pub fn kind_number(k: Kind) -> Tnum {
    k % 9 + 1
}

#[inline]
pub fn kind_of(ti: Type, ni: Tnum) -> Kind {
    ti * 9 + ni - 1
}

// 数牌
#[inline]
pub fn is_suit_kind(k: Kind) -> bool {
    kind_type(k) != TZ
}

// 么九牌
#[inline]
pub fn is_end_kind(k: Kind) -> bool {
    !is_suit_kind(k) || kind_number(k) == 1 || kind_number(k) == 9
}

// 順子の先頭になれる牌 (数牌の1~7)
#[inline]
pub fn can_start_sequence(k: Kind) -> bool {
    is_suit_kind(k) && kind_number(k) <= 7
}

// 么九牌13種
pub fn end_kinds() -> Vec<Kind> {
    (0..KIND_COUNT).filter(|&k| is_end_kind(k)).collect()
}

// 全136枚を識別子順に返却
pub fn all_tiles() -> impl Iterator<Item = Tile> {
    (0..TILE_COUNT as u8).map(Tile)
}

// "0 1 2" や "0,1,2" のような識別子の列を牌に変換
pub fn tiles_from_ids(exp: &str) -> Result<Vec<Tile>, String> {
    let mut tiles = vec![];
    for s in exp.split(|c: char| c == ',' || c.is_whitespace()) {
        if s.is_empty() {
            continue;
        }
        let id: usize = s
            .parse()
            .map_err(|e| format!("invalid tile id '{}': {}", s, e))?;
        tiles.push(Tile::new(id).ok_or_else(|| format!("tile id out of range: {}", id))?);
    }
    Ok(tiles)
}

// "m123p055z11" のような文字列を牌に変換 (0は赤5)
pub fn tiles_from_string(exp: &str) -> Result<Vec<Tile>, String> {
    alloc_tiles_from_string(exp, &mut [false; TILE_COUNT])
}

// 同種の牌は未使用(used[id] == false)の識別子を小さい順に割り当てる
pub fn alloc_tiles_from_string(exp: &str, used: &mut [bool; TILE_COUNT]) -> Result<Vec<Tile>, String> {
    let mut tiles = vec![];
    let mut ti = None;
    for c in exp.chars() {
        match c {
            'm' => ti = Some(TM),
            'p' => ti = Some(TP),
            's' => ti = Some(TS),
            'z' => ti = Some(TZ),
            '0'..='9' => {
                let ti = ti.ok_or("tile number before tile type")?;
                let ni = c.to_digit(10).unwrap_or(0) as usize;
                let (kind, copies) = if ti == TZ {
                    if !(WE..=DR).contains(&ni) {
                        return Err(format!("invalid honor tile: z{}", ni));
                    }
                    (kind_of(ti, ni), 0..TILE)
                } else {
                    match ni {
                        0 => (kind_of(ti, 5), 0..1), // 赤5
                        5 => (kind_of(ti, 5), 1..TILE),
                        _ => (kind_of(ti, ni), 0..TILE),
                    }
                };
                let id = copies
                    .map(|c| kind * TILE + c)
                    .find(|&id| !used[id])
                    .ok_or_else(|| format!("too many tiles: {}", Tile((kind * TILE) as u8)))?;
                used[id] = true;
                tiles.push(Tile(id as u8));
            }
            _ => {
                return Err(format!("invalid char: '{}'", c));
            }
        }
    }
    Ok(tiles)
}

#[test]
fn test_tile_catalog() {
    assert_eq!(Tile(0).to_string(), "m1");
    assert_eq!(Tile(16).to_string(), "m0"); // 赤5
    assert_eq!(Tile(17).to_string(), "m5");
    assert_eq!(Tile(35).to_string(), "m9");
    assert_eq!(Tile(52).to_string(), "p0");
    assert_eq!(Tile(88).to_string(), "s0");
    assert_eq!(Tile(108).to_string(), "z1");
    assert_eq!(Tile(135).to_string(), "z7");

    assert_eq!(kind_of(TZ, WE), 27);
    assert_eq!(kind_of(TZ, DR), 33);
    assert_eq!(kind_of(TS, 9), 26);
    assert!(!can_start_sequence(kind_of(TM, 8)));
    assert!(can_start_sequence(kind_of(TP, 7)));
    assert!(!can_start_sequence(kind_of(TZ, WS)));

    let ends = end_kinds();
    assert_eq!(ends.len(), 13);
    assert!(ends.contains(&kind_of(TZ, DG)));

    let reds: Vec<Tile> = all_tiles().filter(|t| t.is_red5()).collect();
    assert_eq!(reds, vec![Tile(16), Tile(52), Tile(88)]);
}

#[test]
fn test_tiles_from_ids() {
    let tiles = tiles_from_ids("0, 1 2,135").unwrap();
    assert_eq!(tiles, vec![Tile(0), Tile(1), Tile(2), Tile(135)]);
    assert!(tiles_from_ids("136").is_err());
    assert!(tiles_from_ids("x").is_err());
}

#[test]
fn test_tiles_from_string() {
    let tiles = tiles_from_string("m1055z11").unwrap();
    assert_eq!(
        tiles,
        vec![Tile(0), Tile(16), Tile(17), Tile(18), Tile(108), Tile(109)]
    );
    assert!(tiles_from_string("z8").is_err());
    assert!(tiles_from_string("1m").is_err());
    assert!(tiles_from_string("m11111").is_err());
    assert!(tiles_from_string("m00").is_err());
}
