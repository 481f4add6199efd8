use std::fmt;

use serde::Serialize;

use super::win::evaluate_win;
use crate::model::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Readiness {
    NotReady, // ノーテン
    Ready,    // 聴牌
    Furiten,  // 聴牌 (振聴)
}

impl Readiness {
    #[inline]
    pub fn is_ready(self) -> bool {
        self != Readiness::NotReady
    }
}

// 聴牌判定 流局時の精算に使用する
pub trait TenpaiJudge: fmt::Debug {
    fn readiness(&self, player: &PlayerState) -> Readiness;
}

// 聴牌判定未実装 常にノーテンを返却
#[derive(Debug, Default)]
pub struct NoTenpai;

impl TenpaiJudge for NoTenpai {
    fn readiness(&self, _player: &PlayerState) -> Readiness {
        Readiness::NotReady
    }
}

// 全34種の牌を1枚ずつ加えて和了形になるかを調べる
#[derive(Debug, Default)]
pub struct WaitScanTenpai;

impl TenpaiJudge for WaitScanTenpai {
    fn readiness(&self, player: &PlayerState) -> Readiness {
        let waits = calc_win_kinds(player);
        if waits.is_empty() {
            Readiness::NotReady
        } else if waits.iter().any(|&k| player.has_discarded_kind(k)) {
            Readiness::Furiten
        } else {
            Readiness::Ready
        }
    }
}

// 和了牌の種類の一覧 13枚(副露含む)の手牌でない場合は空
// 自分で4枚使っている牌は和了牌に含めない
pub fn calc_win_kinds(player: &PlayerState) -> Vec<Kind> {
    if player.effective_tile_count() != HAND_SIZE {
        return vec![];
    }

    (0..KIND_COUNT)
        .filter(|&k| player.count_kind(k) < TILE)
        .filter(|&k| {
            let hand = player.hand_with(Tile((k * TILE) as u8));
            evaluate_win(&hand, &player.melds).is_some()
        })
        .collect()
}

pub fn create_tenpai_judge(name: &str) -> Result<Box<dyn TenpaiJudge>, String> {
    match name {
        "none" => Ok(Box::new(NoTenpai)),
        "scan" => Ok(Box::new(WaitScanTenpai)),
        _ => Err(format!("unknown tenpai judge: {}", name)),
    }
}

#[test]
fn test_calc_win_kinds() {
    let pl = PlayerState::new(0, tiles_from_string("m1112345678999").unwrap());
    // 九蓮宝燈は9種待ち
    assert_eq!(calc_win_kinds(&pl), (0..9).collect::<Vec<Kind>>());

    let pl = PlayerState::new(0, tiles_from_string("m1199p2288s33z557").unwrap());
    assert_eq!(calc_win_kinds(&pl), vec![kind_of(TZ, DR)]);

    // m1の単騎待ちは5枚目が存在しないので待ちにならない
    let pl = PlayerState::new(0, tiles_from_string("m1111p123s456z111").unwrap());
    assert!(calc_win_kinds(&pl).is_empty());

    let pl = PlayerState::new(0, tiles_from_string("m1199p2288s33z557").unwrap()[..12].to_vec());
    assert!(calc_win_kinds(&pl).is_empty());
}

#[test]
fn test_readiness() {
    let mut pl = PlayerState::new(3, tiles_from_string("m123456789p11s13").unwrap());
    assert_eq!(NoTenpai.readiness(&pl), Readiness::NotReady);
    assert_eq!(WaitScanTenpai.readiness(&pl), Readiness::Ready);

    // 待ち牌 (s2) を捨てている
    pl.discards.push(Tile(76));
    pl.discard_to.push(3);
    assert_eq!(WaitScanTenpai.readiness(&pl), Readiness::Furiten);
    assert!(Readiness::Furiten.is_ready());

    let pl = PlayerState::new(1, tiles_from_string("m147p147s147z1234").unwrap());
    assert_eq!(WaitScanTenpai.readiness(&pl), Readiness::NotReady);

    assert!(create_tenpai_judge("scan").is_ok());
    assert!(create_tenpai_judge("oracle").is_err());
}
