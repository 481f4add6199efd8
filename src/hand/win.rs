use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::model::*;

// 和了形の種類 (判定順)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WinShape {
    SevenPairs,      // 七対子
    ThirteenOrphans, // 国士無双
    Standard,        // 4面子1雀頭
}

impl WinShape {
    // 点数計算側に渡す仮の役番号 通常形は役判定未実装のため空
    pub fn yaku_codes(self) -> Vec<u32> {
        match self {
            WinShape::SevenPairs => vec![200],
            WinShape::ThirteenOrphans => vec![800],
            WinShape::Standard => vec![],
        }
    }
}

// 副露を3枚として14枚になっていない手牌は和了判定の対象外
pub fn check_win_size(hand: &[Tile], melds: &[Meld]) -> EngineResult<()> {
    let n = hand.len() + 3 * melds.len();
    if n != WIN_SIZE {
        return Err(EngineError::Internal(format!(
            "unexpected hand size for win check: {} tiles + {} melds",
            hand.len(),
            melds.len()
        )));
    }
    Ok(())
}

// 和了形であれば該当する形を返却
// 和了していないのは通常の結果なのでエラーにはしない
pub fn evaluate_win(hand: &[Tile], melds: &[Meld]) -> Option<WinShape> {
    if check_win_size(hand, melds).is_err() {
        return None;
    }

    let mut kinds: Vec<Kind> = hand.iter().map(|t| t.kind()).collect();
    kinds.sort_unstable();

    if is_seven_pairs_win(&kinds, melds) {
        Some(WinShape::SevenPairs)
    } else if is_thirteen_orphans_win(&kinds, melds) {
        Some(WinShape::ThirteenOrphans)
    } else if is_standard_win(&kinds, SEAT - melds.len(), 1) {
        Some(WinShape::Standard)
    } else {
        None
    }
}

fn count_kinds(kinds: &[Kind]) -> [usize; KIND_COUNT] {
    let mut cnts = [0; KIND_COUNT];
    for &k in kinds {
        cnts[k] += 1;
    }
    cnts
}

// 七対子 14枚の前提ですべての種類が2枚ずつなら7種類になる
pub fn is_seven_pairs_win(kinds: &[Kind], melds: &[Meld]) -> bool {
    if !melds.is_empty() || kinds.len() != WIN_SIZE {
        return false;
    }
    count_kinds(kinds).iter().all(|&n| n == 0 || n == 2)
}

// 国士無双 么九牌以外を含まず13種すべてが揃っている
pub fn is_thirteen_orphans_win(kinds: &[Kind], melds: &[Meld]) -> bool {
    if !melds.is_empty() || kinds.len() != WIN_SIZE {
        return false;
    }
    if kinds.iter().any(|&k| !is_end_kind(k)) {
        return false;
    }
    let cnts = count_kinds(kinds);
    end_kinds().iter().all(|&k| cnts[k] != 0)
}

// 通常形 (再帰)
// kinds: 種類順にソート済みの残り牌
// m: 残りの面子の数, q: 残りの雀頭の数
pub fn is_standard_win(kinds: &[Kind], m: usize, q: usize) -> bool {
    if kinds.len() != 3 * m + 2 * q {
        return false;
    }
    if m == 0 && q == 0 {
        return true;
    }

    // 刻子
    if m > 0 && kinds[0] == kinds[1] && kinds[0] == kinds[2] && is_standard_win(&kinds[3..], m - 1, q)
    {
        return true;
    }

    // 雀頭
    if q == 1 && kinds[0] == kinds[1] && is_standard_win(&kinds[2..], m, 0) {
        return true;
    }

    // 順子
    if m == 0 {
        return false;
    }
    let k = kinds[0];
    if !can_start_sequence(k) {
        return false;
    }
    let i = match kinds.iter().position(|&x| x == k + 1) {
        Some(i) => i,
        None => return false,
    };
    let j = match kinds[i + 1..].iter().position(|&x| x == k + 2) {
        Some(j) => i + 1 + j,
        None => return false,
    };
    let rest: Vec<Kind> = kinds
        .iter()
        .enumerate()
        .filter(|&(n, _)| n != 0 && n != i && n != j)
        .map(|(_, &x)| x)
        .collect();
    is_standard_win(&rest, m - 1, q)
}

#[cfg(test)]
fn ids(v: &[u8]) -> Vec<Tile> {
    v.iter().map(|&i| Tile(i)).collect()
}

#[test]
fn test_standard_decomposition() {
    let hand = ids(&[0, 1, 2, 4, 5, 6, 8, 9, 10, 12, 13, 14, 16, 17]);
    let mut kinds: Vec<Kind> = hand.iter().map(|t| t.kind()).collect();
    kinds.sort_unstable();
    assert!(is_standard_win(&kinds, 4, 1));
    assert_eq!(evaluate_win(&hand, &[]), Some(WinShape::Standard));

    // 0,0 を雀頭として取り直す必要がある形
    let hand = ids(&[0, 1, 2, 4, 8, 12, 16, 20, 21, 24, 28, 32, 33, 34]);
    assert_eq!(evaluate_win(&hand, &[]), Some(WinShape::Standard));

    let hand = ids(&[0, 1, 2, 4, 8, 12, 16, 20, 24, 28, 32, 33, 34, 40]);
    let mut kinds: Vec<Kind> = hand.iter().map(|t| t.kind()).collect();
    kinds.sort_unstable();
    assert!(!is_standard_win(&kinds, 4, 1));
    assert_eq!(evaluate_win(&hand, &[]), None);
}

#[test]
fn test_standard_edge_cases() {
    // 字牌の順子は不可
    let hand = tiles_from_string("z123456m123p11s999").unwrap();
    assert_eq!(evaluate_win(&hand, &[]), None);
    // 8から始まる順子やスートを跨ぐ順子は不可 (m8 m9 p1)
    let hand = tiles_from_string("m89p1s123456789z11").unwrap();
    assert_eq!(evaluate_win(&hand, &[]), None);

    let hand = tiles_from_string("m123456789p406z11").unwrap();
    assert_eq!(evaluate_win(&hand, &[]), Some(WinShape::Standard));
    let hand = tiles_from_string("m111222333p789z77").unwrap();
    assert_eq!(evaluate_win(&hand, &[]), Some(WinShape::Standard));
}

#[test]
fn test_standard_with_melds() {
    let meld = Meld {
        meld_type: MeldType::Pon,
        tiles: tiles_from_string("z555").unwrap(),
        calling_tile: Tile(126),
        from: 1,
    };
    let hand = tiles_from_string("m123p456s78999").unwrap();
    assert_eq!(hand.len(), 11);
    assert_eq!(evaluate_win(&hand, &[meld.clone()]), Some(WinShape::Standard));

    // 対子のみでは副露ありの和了形にならない
    let hand = tiles_from_string("m1199p22s3344z5").unwrap();
    assert!(check_win_size(&hand, &[meld.clone()]).is_ok());
    assert_eq!(evaluate_win(&hand, &[meld]), None);

    // 枚数が合わない
    assert!(check_win_size(&hand, &[]).is_err());
    assert_eq!(evaluate_win(&hand, &[]), None);
}

#[test]
fn test_seven_pairs() {
    let hand = tiles_from_string("m1199p2288s33z5577").unwrap();
    assert_eq!(evaluate_win(&hand, &[]), Some(WinShape::SevenPairs));
    assert_eq!(WinShape::SevenPairs.yaku_codes(), vec![200]);

    // 4枚使いは対子2つとみなさない
    let hand = tiles_from_string("m1111p2288s33z5577").unwrap();
    assert_eq!(evaluate_win(&hand, &[]), None);

    // 七対子と通常形の両方に取れる形は七対子として返す
    let hand = tiles_from_string("m112233p445566z11").unwrap();
    assert_eq!(evaluate_win(&hand, &[]), Some(WinShape::SevenPairs));
}

#[test]
fn test_thirteen_orphans() {
    let hand = tiles_from_string("m19p19s19z12345677").unwrap();
    assert_eq!(evaluate_win(&hand, &[]), Some(WinShape::ThirteenOrphans));
    assert_eq!(WinShape::ThirteenOrphans.yaku_codes(), vec![800]);

    let hand = tiles_from_string("m119p19s19z1234567").unwrap();
    assert_eq!(evaluate_win(&hand, &[]), Some(WinShape::ThirteenOrphans));

    // 14枚目が么九牌でない
    let hand = tiles_from_string("m159p19s19z1234567").unwrap();
    assert_eq!(evaluate_win(&hand, &[]), None);
    // 么九牌が1種欠けている
    let hand = tiles_from_string("m19p19s19z12345666").unwrap();
    assert_eq!(evaluate_win(&hand, &[]), None);
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;
    use rand::prelude::*;

    use super::*;

    const HANDS: [&str; 7] = [
        "m123456789p406z11",
        "m111222333p789z77",
        "m1199p2288s33z5577",
        "m19p19s19z12345677",
        "m123p456s78999z111",
        "m12345p11s4567z123",
        "m112233p445566z11",
    ];

    proptest! {
        #[test]
        fn evaluation_ignores_tile_order(seed in any::<u64>(), idx in 0..HANDS.len()) {
            let hand = tiles_from_string(HANDS[idx]).unwrap();
            let expected = evaluate_win(&hand, &[]);
            let mut shuffled = hand.clone();
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            shuffled.shuffle(&mut rng);
            prop_assert_eq!(evaluate_win(&shuffled, &[]), expected);
        }

        // 判定結果として七対子と通常形が同時に返ることはない
        #[test]
        fn seven_pairs_takes_priority(seed in any::<u64>(), idx in 0..HANDS.len()) {
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            let mut wall: Vec<Tile> = all_tiles().collect();
            wall.shuffle(&mut rng);
            let hands = [tiles_from_string(HANDS[idx]).unwrap(), wall[..WIN_SIZE].to_vec()];
            for hand in &hands {
                let mut kinds: Vec<Kind> = hand.iter().map(|t| t.kind()).collect();
                kinds.sort_unstable();
                let shape = evaluate_win(hand, &[]);
                if is_seven_pairs_win(&kinds, &[]) {
                    prop_assert_eq!(shape, Some(WinShape::SevenPairs));
                } else if shape == Some(WinShape::Standard) {
                    prop_assert!(is_standard_win(&kinds, 4, 1));
                }
            }
        }
    }
}
