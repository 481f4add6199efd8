use super::*;
use crate::error::{EngineError, EngineResult};
use crate::util::misc::{vec_count, vec_to_string};

#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    pub seat: Seat,               // 座席番号
    pub hand: Vec<Tile>,          // 手牌 (ツモ直後とロン判定時は14枚)
    pub discards: Vec<Tile>,      // 捨て牌一覧
    pub discard_to: Vec<Seat>,    // 捨て牌がどの河に置かれたか (鳴かれた場合は鳴いたプレイヤー)
    pub melds: Vec<Meld>,         // 副露一覧
    pub riichi_eligible: bool,    // リーチ可能な点数を持っているか
    pub riichi: Option<Index>,    // リーチ宣言牌のdiscardsにおけるindex
}

impl PlayerState {
    pub fn new(seat: Seat, hand: Vec<Tile>) -> Self {
        Self {
            seat,
            hand,
            ..Default::default()
        }
    }

    #[inline]
    pub fn draw(&mut self, tile: Tile) {
        self.hand.push(tile);
    }

    // 手牌のindex番目の牌を捨てる 範囲外の場合は状態を変更せずにエラー
    pub fn discard(&mut self, index: Index) -> EngineResult<Tile> {
        if index >= self.hand.len() {
            return Err(EngineError::Validation(format!(
                "discard index {} out of range (hand size: {})",
                index,
                self.hand.len()
            )));
        }
        let tile = self.hand.remove(index);
        self.discards.push(tile);
        self.discard_to.push(self.seat);
        Ok(tile)
    }

    // 手牌に1枚加えたもののコピー (ロン・ツモの判定用)
    pub fn hand_with(&self, tile: Tile) -> Vec<Tile> {
        let mut hand = self.hand.clone();
        hand.push(tile);
        hand
    }

    // 副露を3枚として数えた手牌の枚数 打牌待ちでは14, それ以外では13
    #[inline]
    pub fn effective_tile_count(&self) -> usize {
        self.hand.len() + 3 * self.melds.len()
    }

    // 自分の河に残っている捨て牌
    pub fn river(&self) -> Vec<Tile> {
        self.discards
            .iter()
            .zip(self.discard_to.iter())
            .filter(|(_, to)| **to == self.seat)
            .map(|(t, _)| *t)
            .collect()
    }

    pub fn has_discarded_kind(&self, k: Kind) -> bool {
        self.discards.iter().any(|t| t.kind() == k)
    }

    // 手牌と副露に含まれる同種の牌の枚数
    pub fn count_kind(&self, k: Kind) -> usize {
        let n_hand = self.hand.iter().filter(|t| t.kind() == k).count();
        let n_meld: usize = self
            .melds
            .iter()
            .map(|m| m.tiles.iter().filter(|t| t.kind() == k).count())
            .sum();
        n_hand + n_meld
    }

    // 次の打牌をリーチ宣言牌として記録
    pub fn mark_riichi(&mut self) {
        self.riichi = Some(self.discards.len());
    }

    // 河におけるリーチ宣言牌の表示位置 (1始まり)
    // -1: リーチしていない
    // -2: 宣言牌以降の捨て牌がすべて鳴かれて河に残っていない
    pub fn riichi_display(&self) -> i32 {
        let r = match self.riichi {
            Some(r) => r,
            None => return -1,
        };

        let shown = (r..self.discard_to.len()).find(|&i| self.discard_to[i] == self.seat);
        match shown {
            Some(t) => vec_count(&self.discard_to[..=t], &self.seat) as i32,
            None => -2,
        }
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "seat: {}, riichi: {:?}, riichi_eligible: {}",
            self.seat, self.riichi, self.riichi_eligible,
        )?;
        writeln!(f, "hand: {}", vec_to_string(&self.hand))?;
        writeln!(f, "melds: {}", vec_to_string(&self.melds))?;
        write!(f, "discards: {}", vec_to_string(&self.river()))
    }
}

#[test]
fn test_discard() {
    let hand = vec![Tile(0), Tile(4), Tile(8)];
    let mut pl = PlayerState::new(2, hand);
    assert!(pl.discard(3).is_err());
    assert_eq!(pl.hand.len(), 3);

    assert_eq!(pl.discard(1).unwrap(), Tile(4));
    assert_eq!(pl.hand, vec![Tile(0), Tile(8)]);
    assert_eq!(pl.discards, vec![Tile(4)]);
    assert_eq!(pl.discard_to, vec![2]);
    assert!(pl.has_discarded_kind(1));
    assert_eq!(pl.hand_with(Tile(5)).len(), 3);
    assert_eq!(pl.hand.len(), 2);
}

#[test]
fn test_river_and_riichi_display() {
    let mut pl = PlayerState::new(1, vec![]);
    assert_eq!(pl.riichi_display(), -1);

    pl.discards = vec![Tile(0), Tile(4), Tile(8), Tile(12)];
    pl.discard_to = vec![1, 3, 1, 1];
    assert_eq!(pl.river(), vec![Tile(0), Tile(8), Tile(12)]);

    // 宣言牌が河に残っている
    pl.riichi = Some(2);
    assert_eq!(pl.riichi_display(), 2);

    // 宣言牌が鳴かれた場合は次の河の牌が宣言牌扱い
    pl.riichi = Some(1);
    assert_eq!(pl.riichi_display(), 2);

    pl.discard_to = vec![1, 1, 0, 2];
    pl.riichi = Some(2);
    assert_eq!(pl.riichi_display(), -2);
}

#[test]
fn test_mark_riichi() {
    let mut pl = PlayerState::new(0, vec![Tile(0), Tile(1)]);
    pl.mark_riichi();
    pl.discard(0).unwrap();
    assert_eq!(pl.riichi, Some(0));
    assert_eq!(pl.riichi_display(), 1);
}
