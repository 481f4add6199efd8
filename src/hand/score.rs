use std::fmt;

use super::win::WinShape;
use crate::model::*;

// 点数計算に必要な和了の情報
#[derive(Debug)]
pub struct WinContext<'a> {
    pub seat: Seat,
    pub dealer: Seat,
    pub prevailing_wind: usize,
    pub shape: WinShape,
    pub hand: &'a [Tile], // 和了牌を含む14枚(副露を除く)
    pub melds: &'a [Meld],
    pub is_tsumo: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreResult {
    pub minipoints: usize, // 符
    pub points: Score,     // 和了点 (ツモの場合は全員からの支払いの合計)
}

pub trait Scorer: fmt::Debug {
    fn score(&self, ctx: &WinContext<'_>) -> ScoreResult;
}

// 符計算・点数計算未実装 固定値を返却
#[derive(Debug, Default)]
pub struct PlaceholderScorer;

impl Scorer for PlaceholderScorer {
    fn score(&self, ctx: &WinContext<'_>) -> ScoreResult {
        if !ctx.is_tsumo {
            return ScoreResult {
                minipoints: 2,
                points: 1,
            };
        }

        let mut points = 10;
        if ctx.seat == ctx.dealer {
            points += points / 2;
        }
        ScoreResult {
            minipoints: 5,
            points,
        }
    }
}

// [点数の授受]

// ロン 放銃者が和了者全員分を支払う
pub fn ron_payments(wins: &[(Seat, Score)], discarder: Seat) -> [Score; SEAT] {
    let mut res = [0; SEAT];
    for &(s, points) in wins {
        res[s] += points;
        res[discarder] -= points;
    }
    res
}

// ツモ 親は子の倍を支払う(受け取る)
// 和了者は実際に支払われた点数の合計を受け取る
pub fn tsumo_payments(total: Score, winner: Seat, dealer: Seat) -> [Score; SEAT] {
    let mut res = [0; SEAT];
    let unit = if winner == dealer { total / 3 } else { total / 4 };
    for s in 0..SEAT {
        if s == winner {
            continue;
        }
        let pay = if s == dealer { unit * 2 } else { unit };
        res[s] -= pay;
        res[winner] += pay;
    }
    res
}

// 荒牌流局 ノーテン罰符 (場に3000点)
pub fn exhaustive_draw_payments(ready: &[bool; SEAT]) -> [Score; SEAT] {
    let n_ready = ready.iter().filter(|&&r| r).count();
    let (gain, loss) = match n_ready {
        1 => (3000, -1000),
        2 => (1500, -1500),
        3 => (1000, -3000),
        _ => (0, 0), // 全員ノーテン or 全員聴牌
    };

    let mut res = [0; SEAT];
    for s in 0..SEAT {
        res[s] = if ready[s] { gain } else { loss };
    }
    res
}

#[test]
fn test_placeholder_scorer() {
    let hand = tiles_from_string("m123456789p406z11").unwrap();
    let mut ctx = WinContext {
        seat: 1,
        dealer: 0,
        prevailing_wind: 0,
        shape: WinShape::Standard,
        hand: &hand,
        melds: &[],
        is_tsumo: false,
    };
    assert_eq!(PlaceholderScorer.score(&ctx).points, 1);
    ctx.is_tsumo = true;
    assert_eq!(PlaceholderScorer.score(&ctx).points, 10);
    ctx.seat = 0;
    assert_eq!(PlaceholderScorer.score(&ctx), ScoreResult { minipoints: 5, points: 15 });
}

#[test]
fn test_payments() {
    assert_eq!(ron_payments(&[(2, 8000)], 1), [0, -8000, 8000, 0]);
    assert_eq!(ron_payments(&[(0, 1000), (3, 2000)], 2), [1000, 0, -3000, 2000]);

    // 子のツモ 親が倍払い
    assert_eq!(tsumo_payments(8000, 2, 0), [-4000, -2000, 4000 + 2000 * 2, -2000]);
    // 親のツモ 子が均等に払う
    assert_eq!(tsumo_payments(12000, 0, 0), [12000, -4000, -4000, -4000]);
    for total in [10, 15, 1000, 7700] {
        for winner in 0..SEAT {
            assert_eq!(tsumo_payments(total, winner, 0).iter().sum::<Score>(), 0);
        }
    }

    assert_eq!(exhaustive_draw_payments(&[false; 4]), [0; 4]);
    assert_eq!(exhaustive_draw_payments(&[true; 4]), [0; 4]);
    assert_eq!(
        exhaustive_draw_payments(&[false, true, false, false]),
        [-1000, 3000, -1000, -1000]
    );
    assert_eq!(
        exhaustive_draw_payments(&[true, false, true, false]),
        [1500, -1500, 1500, -1500]
    );
    assert_eq!(
        exhaustive_draw_payments(&[true, true, false, true]),
        [1000, 1000, -3000, 1000]
    );
}
