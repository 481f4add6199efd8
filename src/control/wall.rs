use rand::prelude::*;
use sha2::{Digest, Sha256};

use crate::error::{EngineError, EngineResult};
use crate::model::*;

// 牌山
// 先頭から配牌・ツモを行う 嶺上牌とドラ表示牌は枚数のみ管理
#[derive(Debug, Clone)]
pub struct Wall {
    tiles: Vec<Tile>,                  // 牌山全体 (=136)
    drawn: usize,                      // 配牌とツモで使用した枚数
    pub dora_indicator_count: usize,   // 公開済みのドラ表示牌の数
    pub replacement_tile_count: usize, // 嶺上牌をツモった回数
    fingerprint: String,               // 配牌後の残り牌山のハッシュ値
}

impl Wall {
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut tiles: Vec<Tile> = all_tiles().collect();
        tiles.shuffle(rng);
        Self::with_tiles(tiles)
    }

    // 外部から与えられた並びで牌山を生成 (テスト・再現用)
    pub fn from_permutation(tiles: Vec<Tile>) -> EngineResult<Self> {
        if tiles.len() != TILE_COUNT {
            return Err(EngineError::Validation(format!(
                "wall must have {} tiles, got {}",
                TILE_COUNT,
                tiles.len()
            )));
        }
        let mut seen = [false; TILE_COUNT];
        for t in &tiles {
            if seen[t.id()] {
                return Err(EngineError::Validation(format!(
                    "duplicated tile in wall: {:?}",
                    t
                )));
            }
            seen[t.id()] = true;
        }
        Ok(Self::with_tiles(tiles))
    }

    // 作為的な牌山を生成 指定がない場所はシード値に従ってランダムに埋める
    // hands: 各プレイヤーの配牌 (最大13枚), deals: ツモ山 (最初の牌は親の14枚目)
    pub fn arranged(hands: &[&str; SEAT], deals: &str, seed: u64) -> Result<Self, String> {
        let mut used = [false; TILE_COUNT];
        let mut hs = vec![];
        for h in hands {
            let tiles = alloc_tiles_from_string(h, &mut used)?;
            if tiles.len() > HAND_SIZE {
                return Err(format!("too many tiles in hand: {}", h));
            }
            hs.push(tiles);
        }
        let deals = alloc_tiles_from_string(deals, &mut used)?;

        // 余った牌をランダムにシャッフル
        let mut remain: Vec<Tile> = all_tiles().filter(|t| !used[t.id()]).collect();
        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(seed);
        remain.shuffle(&mut rng);

        let mut tiles = vec![];
        for h in hs {
            let n = HAND_SIZE - h.len();
            tiles.extend(h);
            move_tiles(&mut remain, &mut tiles, n);
        }
        tiles.extend(deals);
        tiles.append(&mut remain);

        Self::from_permutation(tiles).map_err(|e| e.to_string())
    }

    fn with_tiles(tiles: Vec<Tile>) -> Self {
        let fingerprint = fingerprint_of(&tiles[DEAL_COUNT..]);
        Self {
            tiles,
            drawn: 0,
            dora_indicator_count: 0,
            replacement_tile_count: 0,
            fingerprint,
        }
    }

    // 配牌 各プレイヤーに13枚ずつ配った後,親(seat0)に14枚目を配る
    pub fn deal(&mut self) -> [Vec<Tile>; SEAT] {
        let mut hands: [Vec<Tile>; SEAT] = Default::default();
        let mut cursor = 0;
        for h in hands.iter_mut() {
            *h = self.tiles[cursor..cursor + HAND_SIZE].to_vec();
            cursor += HAND_SIZE;
        }
        hands[0].push(self.tiles[cursor]);

        self.drawn = DEAL_COUNT;
        self.dora_indicator_count = 1;
        self.replacement_tile_count = 0;
        hands
    }

    // ツモ 牌山が尽きている場合は呼び出し側の誤り
    pub fn draw(&mut self) -> EngineResult<Tile> {
        if self.is_exhausted() {
            return Err(EngineError::Exhausted);
        }
        let t = self.tiles[self.drawn];
        self.drawn += 1;
        Ok(t)
    }

    #[inline]
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        TILE_COUNT - self.drawn
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.drawn >= TILE_COUNT
    }

    #[inline]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    // 配牌で使用しなかった部分 (ハッシュ値の対象)
    #[inline]
    pub fn undealt_tail(&self) -> &[Tile] {
        &self.tiles[DEAL_COUNT..]
    }
}

fn move_tiles(source: &mut Vec<Tile>, target: &mut Vec<Tile>, count: usize) {
    for _ in 0..count {
        if let Some(t) = source.pop() {
            target.push(t);
        }
    }
}

// 牌の文字列表現("m1p0z7"...)を連結したもののSHA-256
pub fn fingerprint_of(tiles: &[Tile]) -> String {
    let data: String = tiles.iter().map(|t| t.to_string()).collect();
    format!("{:x}", Sha256::digest(data.as_bytes()))
}

// 局終了後に公開された牌山がハッシュ値と一致するかを検証
pub fn verify_fingerprint(tail: &[Tile], fingerprint: &str) -> bool {
    fingerprint_of(tail) == fingerprint.to_lowercase()
}

#[cfg(test)]
fn sorted_wall() -> Wall {
    Wall::from_permutation(all_tiles().collect()).unwrap()
}

#[test]
fn test_deal() {
    let mut wall = sorted_wall();
    let hands = wall.deal();
    assert_eq!(hands[0].len(), 14);
    assert_eq!(hands[1].len(), 13);
    assert_eq!(hands[0][0], Tile(0));
    assert_eq!(hands[0][13], Tile(52));
    assert_eq!(hands[1][0], Tile(13));
    assert_eq!(hands[3][12], Tile(51));
    assert_eq!(wall.drawn(), 53);
    assert_eq!(wall.remaining(), 83);
    assert_eq!(wall.dora_indicator_count, 1);

    assert_eq!(wall.draw().unwrap(), Tile(53));
    assert_eq!(wall.drawn(), 54);
}

#[test]
fn test_draw_until_exhausted() {
    let mut wall = sorted_wall();
    wall.deal();
    for _ in DEAL_COUNT..TILE_COUNT {
        assert!(wall.draw().is_ok());
    }
    assert!(wall.is_exhausted());
    assert_eq!(wall.draw(), Err(EngineError::Exhausted));
    assert_eq!(wall.drawn(), TILE_COUNT);
}

#[test]
fn test_arranged_wall() {
    let hands = ["m123", "", "p111z11", ""];
    let mut wall = Wall::arranged(&hands, "z7s0", 0).unwrap();
    let hs = wall.deal();
    assert_eq!(&hs[0][..3], &tiles_from_string("m123").unwrap()[..]);
    assert_eq!(hs[0][13].to_string(), "z7");
    assert_eq!(hs[2][4].to_string(), "z1");
    assert_eq!(hs[3].len(), HAND_SIZE);
    assert_eq!(wall.draw().unwrap(), Tile(88));

    assert!(Wall::arranged(&["m11111", "", "", ""], "", 0).is_err());
    assert!(Wall::arranged(&["m11112222333344", "", "", ""], "", 0).is_err());
}

#[test]
fn test_from_permutation() {
    let mut tiles: Vec<Tile> = all_tiles().collect();
    tiles.pop();
    assert!(Wall::from_permutation(tiles.clone()).is_err());
    tiles.push(Tile(0));
    assert!(Wall::from_permutation(tiles).is_err());
}

#[test]
fn test_fingerprint() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let mut wall = Wall::shuffled(&mut rng);
    let fp = wall.fingerprint().to_string();
    assert_eq!(fp.len(), 64);

    // 配牌・ツモで変化しない
    wall.deal();
    wall.draw().unwrap();
    assert_eq!(wall.fingerprint(), fp);
    assert!(verify_fingerprint(wall.undealt_tail(), &fp));
    assert!(verify_fingerprint(wall.undealt_tail(), &fp.to_uppercase()));

    let mut tail = wall.undealt_tail().to_vec();
    tail.swap(0, 1);
    assert!(tail[0].kind() == tail[1].kind() || !verify_fingerprint(&tail, &fp));

    assert_eq!(
        fingerprint_of(&[]),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        // 任意の並びで配牌と残りの牌山が136枚を重複なく分割する
        #[test]
        fn deal_partitions_all_tiles(seed in any::<u64>()) {
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            let mut wall = Wall::shuffled(&mut rng);
            let hands = wall.deal();
            prop_assert_eq!(hands[0].len(), HAND_SIZE + 1);
            for h in &hands[1..] {
                prop_assert_eq!(h.len(), HAND_SIZE);
            }

            let mut seen = [false; TILE_COUNT];
            let rest = wall.undealt_tail().to_vec();
            for t in hands.iter().flatten().chain(rest.iter()) {
                prop_assert!(!seen[t.id()]);
                seen[t.id()] = true;
            }
            prop_assert!(seen.iter().all(|&b| b));
        }
    }
}
