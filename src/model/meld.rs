use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MeldType {
    Chi,
    Pon,
    Minkan,
    Kakan,
    Ankan,
}

// 副露 (鳴きの処理は未実装のため,現状では外部から与えられた場合のみ存在する)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meld {
    pub meld_type: MeldType,
    pub tiles: Vec<Tile>,
    pub calling_tile: Tile, // 鳴いた牌
    pub from: Seat,         // 鳴いた牌の持ち主 (暗槓の場合は自分)
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: Vec<String> = self.tiles.iter().map(|t| t.to_string()).collect();
        write!(f, "{:?}({})<{}", self.meld_type, s.join("|"), self.from)
    }
}

#[test]
fn test_meld_display() {
    let m = Meld {
        meld_type: MeldType::Pon,
        tiles: vec![Tile(108), Tile(109), Tile(110)],
        calling_tile: Tile(110),
        from: 2,
    };
    assert_eq!(m.to_string(), "Pon(z1|z1|z1)<2");
}
