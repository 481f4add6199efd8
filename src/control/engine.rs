use super::wall::Wall;
use crate::error::{EngineError, EngineResult};
use crate::hand::*;
use crate::model::*;
use crate::util::misc::vec_to_string;
use crate::{debug, error, info};

use Phase::*;

const DEALER: Seat = 0; // 配牌で14枚目を受け取るプレイヤー

// 局の状態 TurnEngineのみが変更する
#[derive(Debug, Clone)]
pub struct Round {
    pub prevailing_wind: usize,
    pub remaining_dealer: usize,
    pub wall: Wall,
    pub players: [PlayerState; SEAT],
    pub turn: Seat,               // 打牌・ツモ和了の判断を行うプレイヤー (ロン待ちの間は放銃者)
    pub phase: Phase,             // 入力待ちの種類
    pub last_tile: Option<Tile>,  // 直前の打牌またはツモ牌
    pub win_list: Vec<Seat>,      // last_tileでロン可能なプレイヤー (座席順)
    pub is_over: bool,            // 局終了済み
}

#[derive(Debug)]
pub struct TurnEngine {
    round: Round,
    tenpai: Box<dyn TenpaiJudge>,
    scorer: Box<dyn Scorer>,
}

impl TurnEngine {
    // 配牌を行い,最初の応答(親の打牌またはツモ和了の選択)を返却
    pub fn start(
        req: &StartRequest,
        mut wall: Wall,
        tenpai: Box<dyn TenpaiJudge>,
        scorer: Box<dyn Scorer>,
    ) -> EngineResult<(Self, Response)> {
        if req.prevailing_wind >= SEAT {
            return Err(EngineError::Validation(format!(
                "prevailing_wind invalid: {}",
                req.prevailing_wind
            )));
        }
        if req.remaining_dealer >= SEAT {
            return Err(EngineError::Validation(format!(
                "remaining_dealer invalid: {}",
                req.remaining_dealer
            )));
        }

        let mut hands = wall.deal();
        let last_tile = hands[DEALER].last().copied();
        let players = std::array::from_fn(|s| {
            let mut pl = PlayerState::new(s, std::mem::take(&mut hands[s]));
            pl.riichi_eligible = req.riichi[s];
            pl
        });

        let round = Round {
            prevailing_wind: req.prevailing_wind,
            remaining_dealer: req.remaining_dealer,
            wall,
            players,
            turn: DEALER,
            phase: AwaitingDiscard,
            last_tile,
            win_list: vec![],
            is_over: false,
        };
        info!("round start: fingerprint {}", round.wall.fingerprint());

        let mut engine = Self {
            round,
            tenpai,
            scorer,
        };
        let res = engine.offer_after_draw()?;
        Ok((engine, res))
    }

    #[inline]
    pub fn round(&self) -> &Round {
        &self.round
    }

    // 入力を1つ処理して次の応答を返却
    // 回復可能なエラーの場合は状態を変更しない
    pub fn next(&mut self, intent: Intent) -> EngineResult<Response> {
        if self.round.is_over {
            return Err(EngineError::ProtocolState("round is already over".into()));
        }

        let res = match (self.round.phase, intent) {
            (AwaitingDiscard, Intent::Discard(i)) => self.on_discard(i),
            (AwaitingRonDecision, Intent::Decide(v)) => self.on_ron_decision(&v),
            (AwaitingTsumoDecision, Intent::Decide(v)) => self.on_tsumo_decision(&v),
            (p @ (AwaitingCall | AwaitingAbortDecision | AwaitingRiichiDecision), _) => Err(
                EngineError::Internal(format!("{:?} is not implemented", p)),
            ),
            (p, i) => Err(EngineError::ProtocolState(format!(
                "{} is not acceptable in {:?}",
                i.name(),
                p
            ))),
        };

        if let Err(e) = &res {
            if e.is_fatal() {
                error!("round aborted: {}", e);
                self.round.is_over = true;
            }
        }
        res
    }

    fn on_discard(&mut self, index: Index) -> EngineResult<Response> {
        let turn = self.round.turn;
        self.check_tile_count(turn, WIN_SIZE)?;

        let tile = self.round.players[turn].discard(index)?;
        self.round.last_tile = Some(tile);
        debug!("seat{} discard {}", turn, tile);

        let players = &self.round.players;
        self.round.win_list = (0..SEAT)
            .filter(|&s| s != turn)
            .filter(|&s| evaluate_win(&players[s].hand_with(tile), &players[s].melds).is_some())
            .collect();

        if !self.round.win_list.is_empty() {
            debug!("ron candidates: {}", vec_to_string(&self.round.win_list));
            self.round.phase = AwaitingRonDecision;
            let players = self
                .round
                .win_list
                .iter()
                .map(|&id| ActingPlayer {
                    id,
                    can_discard: None,
                })
                .collect();
            return Ok(self.action_response(players));
        }

        self.advance()
    }

    fn on_ron_decision(&mut self, oks: &[bool]) -> EngineResult<Response> {
        let n = self.round.win_list.len();
        if oks.len() != n {
            return Err(EngineError::Validation(format!(
                "decision count {} does not match ron candidates {}",
                oks.len(),
                n
            )));
        }

        let winners: Vec<Seat> = self
            .round
            .win_list
            .iter()
            .zip(oks.iter())
            .filter(|(_, ok)| **ok)
            .map(|(s, _)| *s)
            .collect();

        if winners.is_empty() {
            debug!("every ron candidate passed");
            self.round.win_list.clear();
            return self.advance();
        }
        self.end_ron(&winners)
    }

    fn on_tsumo_decision(&mut self, oks: &[bool]) -> EngineResult<Response> {
        if oks.len() != 1 {
            return Err(EngineError::Validation(format!(
                "tsumo decision must have exactly 1 element, got {}",
                oks.len()
            )));
        }

        if oks[0] {
            return self.end_tsumo();
        }

        // ツモ和了しない場合は同じプレイヤーが打牌
        debug!("seat{} declined tsumo", self.round.turn);
        self.round.phase = AwaitingDiscard;
        Ok(self.discard_response())
    }

    // 流局判定の後,次のプレイヤーがツモ
    fn advance(&mut self) -> EngineResult<Response> {
        if self.round.wall.is_exhausted() {
            return self.end_exhaustive_draw();
        }

        let turn = (self.round.turn + 1) % SEAT;
        self.round.turn = turn;
        let tile = self.round.wall.draw()?;
        self.round.players[turn].draw(tile);
        self.round.last_tile = Some(tile);
        debug!(
            "seat{} draw {} (remaining: {})",
            turn,
            tile,
            self.round.wall.remaining()
        );

        self.offer_after_draw()
    }

    // ツモ番のプレイヤーが和了形ならツモ和了の選択,そうでなければ打牌
    fn offer_after_draw(&mut self) -> EngineResult<Response> {
        let turn = self.round.turn;
        self.check_tile_count(turn, WIN_SIZE)?;

        let pl = &self.round.players[turn];
        if evaluate_win(&pl.hand, &pl.melds).is_some() {
            debug!("seat{} can tsumo", turn);
            self.round.phase = AwaitingTsumoDecision;
            let players = vec![ActingPlayer {
                id: turn,
                can_discard: None,
            }];
            return Ok(self.action_response(players));
        }

        self.round.phase = AwaitingDiscard;
        Ok(self.discard_response())
    }

    fn end_ron(&mut self, winners: &[Seat]) -> EngineResult<Response> {
        let rd = &self.round;
        let discarder = rd.turn;
        let tile = rd
            .last_tile
            .ok_or_else(|| EngineError::Internal("ron without discarded tile".into()))?;

        let mut results: [PlayerResult; SEAT] = Default::default();
        let mut wins = vec![];
        for &s in winners {
            let pl = &rd.players[s];
            let hand = pl.hand_with(tile);
            let shape = evaluate_win(&hand, &pl.melds).ok_or_else(|| {
                EngineError::Internal(format!("seat{} is not a winning hand", s))
            })?;
            let sr = self.scorer.score(&WinContext {
                seat: s,
                dealer: DEALER,
                prevailing_wind: rd.prevailing_wind,
                shape,
                hand: &hand,
                melds: &pl.melds,
                is_tsumo: false,
            });
            results[s] = PlayerResult {
                win: Some(WinType::Ron),
                shape: Some(shape),
                yaku: shape.yaku_codes(),
                minipoints: sr.minipoints,
                ..Default::default()
            };
            wins.push((s, sr.points));
        }

        let scores = ron_payments(&wins, discarder);
        for s in 0..SEAT {
            results[s].score = scores[s];
        }
        info!(
            "ron: winners {} discarder seat{} scores {:?}",
            vec_to_string(winners),
            discarder,
            scores
        );
        Ok(self.end_response(EndReason::Ron, results))
    }

    fn end_tsumo(&mut self) -> EngineResult<Response> {
        let rd = &self.round;
        let winner = rd.turn;
        let pl = &rd.players[winner];
        let shape = evaluate_win(&pl.hand, &pl.melds).ok_or_else(|| {
            EngineError::Internal(format!("seat{} is not a winning hand", winner))
        })?;
        let sr = self.scorer.score(&WinContext {
            seat: winner,
            dealer: DEALER,
            prevailing_wind: rd.prevailing_wind,
            shape,
            hand: &pl.hand,
            melds: &pl.melds,
            is_tsumo: true,
        });

        let scores = tsumo_payments(sr.points, winner, DEALER);
        let mut results: [PlayerResult; SEAT] = Default::default();
        for s in 0..SEAT {
            results[s].score = scores[s];
        }
        results[winner].win = Some(WinType::Tsumo);
        results[winner].shape = Some(shape);
        results[winner].yaku = shape.yaku_codes();
        results[winner].minipoints = sr.minipoints;
        info!("tsumo: winner seat{} scores {:?}", winner, scores);
        Ok(self.end_response(EndReason::Tsumo, results))
    }

    // 荒牌流局 聴牌者の人数に応じてノーテン罰符を精算
    fn end_exhaustive_draw(&mut self) -> EngineResult<Response> {
        let readiness = self.readiness();
        let ready = readiness.map(|r| r.is_ready());
        let scores = exhaustive_draw_payments(&ready);

        let mut results: [PlayerResult; SEAT] = Default::default();
        for s in 0..SEAT {
            results[s].readiness = Some(readiness[s]);
            results[s].score = scores[s];
        }
        info!("exhaustive draw: readiness {:?} scores {:?}", readiness, scores);
        Ok(self.end_response(EndReason::ExhaustiveDraw, results))
    }

    fn readiness(&self) -> [Readiness; SEAT] {
        let players = &self.round.players;
        std::array::from_fn(|s| self.tenpai.readiness(&players[s]))
    }

    // 手牌と副露(3枚換算)の合計枚数の検査
    fn check_tile_count(&self, seat: Seat, expected: usize) -> EngineResult<()> {
        let n = self.round.players[seat].effective_tile_count();
        if n != expected {
            return Err(EngineError::Internal(format!(
                "seat{} has {} tiles (expected: {})",
                seat, n, expected
            )));
        }
        Ok(())
    }

    // [Response]

    fn discard_response(&self) -> Response {
        let turn = self.round.turn;
        let n = self.round.players[turn].hand.len();
        let players = vec![ActingPlayer {
            id: turn,
            can_discard: Some(vec![true; n]),
        }];
        self.action_response(players)
    }

    fn action_response(&self, players: Vec<ActingPlayer>) -> Response {
        Response::Action {
            table: self.table_view(false),
            action: ActionRequest {
                phase: self.round.phase,
                players,
            },
        }
    }

    fn end_response(&mut self, reason: EndReason, players: [PlayerResult; SEAT]) -> Response {
        self.round.is_over = true;
        Response::End {
            table: self.table_view(true),
            end: RoundEnd { reason, players },
        }
    }

    fn table_view(&self, reveal_wall: bool) -> TableView {
        let rd = &self.round;
        let readiness = self.readiness();
        let players = rd
            .players
            .iter()
            .map(|pl| PlayerView {
                hand: pl.hand.clone(),
                river: pl.river(),
                readiness: readiness[pl.seat],
                riichi: pl.riichi_display(),
                melds: pl.melds.clone(),
            })
            .collect();

        TableView {
            fingerprint: rd.wall.fingerprint().to_string(),
            wall_count: rd.wall.drawn(),
            dora_indicator_count: rd.wall.dora_indicator_count,
            replacement_tile_count: rd.wall.replacement_tile_count,
            players,
            wall: if reveal_wall {
                Some(rd.wall.tiles().to_vec())
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
fn start_engine(hands: &[&str; SEAT], deals: &str) -> (TurnEngine, Response) {
    let wall = Wall::arranged(hands, deals, 1).unwrap();
    TurnEngine::start(
        &StartRequest::default(),
        wall,
        Box::new(NoTenpai),
        Box::new(PlaceholderScorer),
    )
    .unwrap()
}

#[cfg(test)]
fn action_of(res: &Response) -> &ActionRequest {
    match res {
        Response::Action { action, .. } => action,
        Response::End { .. } => panic!("unexpected round end"),
    }
}

#[cfg(test)]
fn end_of(res: &Response) -> &RoundEnd {
    match res {
        Response::End { end, .. } => end,
        Response::Action { .. } => panic!("round is not over"),
    }
}

#[cfg(test)]
fn scores_of(end: &RoundEnd) -> [Score; SEAT] {
    std::array::from_fn(|s| end.players[s].score)
}

#[cfg(test)]
const RON_HANDS: [&str; SEAT] = [
    "m147p147s147z1236",
    "m1199p2288s33z557", // z7待ち (七対子)
    "m258p258s258z1234",
    "m369p369s369z1234",
];

#[test]
fn test_start() {
    let (engine, res) = start_engine(&RON_HANDS, "z7m9");
    let act = action_of(&res);
    assert_eq!(act.phase, AwaitingDiscard);
    assert_eq!(act.players.len(), 1);
    assert_eq!(act.players[0].id, 0);
    assert_eq!(act.players[0].can_discard, Some(vec![true; 14]));

    let rd = engine.round();
    assert_eq!(rd.wall.drawn(), DEAL_COUNT);
    assert_eq!(rd.players[0].hand.len(), 14);
    assert_eq!(rd.last_tile.map(|t| t.to_string()), Some("z7".to_string()));
    for s in 1..SEAT {
        assert_eq!(rd.players[s].hand.len(), 13);
    }

    if let Response::Action { table, .. } = &res {
        assert_eq!(table.wall_count, DEAL_COUNT);
        assert_eq!(table.fingerprint, rd.wall.fingerprint());
        assert!(table.wall.is_none());
        assert_eq!(table.players[2].riichi, -1);
    }
}

#[test]
fn test_start_validation() {
    let wall = Wall::arranged(&RON_HANDS, "", 1).unwrap();
    let req = StartRequest {
        prevailing_wind: 4,
        ..Default::default()
    };
    let res = TurnEngine::start(&req, wall.clone(), Box::new(NoTenpai), Box::new(PlaceholderScorer));
    assert!(matches!(res, Err(EngineError::Validation(_))));

    let req = StartRequest {
        prevailing_wind: 1,
        remaining_dealer: 3,
        riichi: [true, false, true, false],
    };
    let (engine, _) =
        TurnEngine::start(&req, wall, Box::new(NoTenpai), Box::new(PlaceholderScorer)).unwrap();
    assert_eq!(engine.round().prevailing_wind, 1);
    assert!(engine.round().players[2].riichi_eligible);
    assert!(!engine.round().players[3].riichi_eligible);
}

#[test]
fn test_ron() {
    let (mut engine, _) = start_engine(&RON_HANDS, "z7m9");

    let res = engine.next(Intent::Discard(13)).unwrap();
    let act = action_of(&res);
    assert_eq!(act.phase, AwaitingRonDecision);
    assert_eq!(act.players.len(), 1);
    assert_eq!(act.players[0].id, 1);
    assert_eq!(act.players[0].can_discard, None);
    assert_eq!(engine.round().win_list, vec![1]);
    assert_eq!(engine.round().players[0].discards.len(), 1);
    assert_eq!(engine.round().players[0].hand.len(), 13);

    let res = engine.next(Intent::Decide(vec![true])).unwrap();
    let end = end_of(&res);
    assert_eq!(end.reason, EndReason::Ron);
    assert_eq!(end.players[1].win, Some(WinType::Ron));
    assert_eq!(end.players[1].shape, Some(WinShape::SevenPairs));
    assert_eq!(end.players[1].yaku, vec![200]);
    assert_eq!(end.players[1].minipoints, 2);
    assert_eq!(end.players[0].win, None);
    assert_eq!(scores_of(end), [-1, 1, 0, 0]);
    if let Response::End { table, .. } = &res {
        assert_eq!(table.wall.as_ref().map(|w| w.len()), Some(TILE_COUNT));
    }

    assert!(matches!(
        engine.next(Intent::Decide(vec![true])),
        Err(EngineError::ProtocolState(_))
    ));
}

#[test]
fn test_ron_passed() {
    let (mut engine, _) = start_engine(&RON_HANDS, "z7m9");
    engine.next(Intent::Discard(13)).unwrap();

    // ロンを見送った場合は通常通り次のプレイヤーがツモ
    let res = engine.next(Intent::Decide(vec![false])).unwrap();
    let act = action_of(&res);
    assert_eq!(act.phase, AwaitingDiscard);
    assert_eq!(act.players[0].id, 1);
    assert_eq!(act.players[0].can_discard.as_ref().map(|v| v.len()), Some(14));

    let rd = engine.round();
    assert_eq!(rd.turn, 1);
    assert_eq!(rd.wall.drawn(), DEAL_COUNT + 1);
    assert_eq!(rd.last_tile.map(|t| t.to_string()), Some("m9".to_string()));
    assert!(rd.win_list.is_empty());
}

#[test]
fn test_multiple_ron_candidates() {
    let hands = [
        "m258p369s147z1236",
        "m1199p2288s33z557", // z7待ち (七対子)
        "m369p147s258z1234",
        "m123456789p11z77", // z7待ち (通常形)
    ];
    let (mut engine, _) = start_engine(&hands, "z7");
    let res = engine.next(Intent::Discard(13)).unwrap();
    let act = action_of(&res);
    assert_eq!(act.phase, AwaitingRonDecision);
    let ids: Vec<Seat> = act.players.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3]);

    // 応答数の不一致と種類違いの入力は状態を変更しない
    assert!(matches!(
        engine.next(Intent::Decide(vec![true])),
        Err(EngineError::Validation(_))
    ));
    assert!(matches!(
        engine.next(Intent::Discard(0)),
        Err(EngineError::ProtocolState(_))
    ));
    assert_eq!(engine.round().phase, AwaitingRonDecision);
    assert_eq!(engine.round().win_list, vec![1, 3]);

    let mut engine2 = TurnEngine {
        round: engine.round().clone(),
        tenpai: Box::new(NoTenpai),
        scorer: Box::new(PlaceholderScorer),
    };

    let res = engine.next(Intent::Decide(vec![false, true])).unwrap();
    let end = end_of(&res);
    assert_eq!(end.players[1].win, None);
    assert_eq!(end.players[3].win, Some(WinType::Ron));
    assert_eq!(end.players[3].shape, Some(WinShape::Standard));
    assert!(end.players[3].yaku.is_empty());
    assert_eq!(scores_of(end), [-1, 0, 0, 1]);

    // ダブロン
    let res = engine2.next(Intent::Decide(vec![true, true])).unwrap();
    assert_eq!(scores_of(end_of(&res)), [-2, 1, 0, 1]);
}

#[test]
fn test_tsumo() {
    let (mut engine, _) = start_engine(&RON_HANDS, "z4z7");
    let res = engine.next(Intent::Discard(13)).unwrap();
    let act = action_of(&res);
    assert_eq!(act.phase, AwaitingTsumoDecision);
    assert_eq!(act.players.len(), 1);
    assert_eq!(act.players[0].id, 1);
    assert_eq!(engine.round().players[1].hand.len(), 14);

    assert!(matches!(
        engine.next(Intent::Decide(vec![true, true])),
        Err(EngineError::Validation(_))
    ));

    let res = engine.next(Intent::Decide(vec![true])).unwrap();
    let end = end_of(&res);
    assert_eq!(end.reason, EndReason::Tsumo);
    assert_eq!(end.players[1].win, Some(WinType::Tsumo));
    assert_eq!(end.players[1].shape, Some(WinShape::SevenPairs));
    assert_eq!(end.players[1].minipoints, 5);
    // 子のツモ 親は倍払い
    assert_eq!(scores_of(end), [-4, 8, -2, -2]);
}

#[test]
fn test_tsumo_declined() {
    let (mut engine, _) = start_engine(&RON_HANDS, "z4z7");
    engine.next(Intent::Discard(13)).unwrap();
    let hand = engine.round().players[1].hand.clone();

    let res = engine.next(Intent::Decide(vec![false])).unwrap();
    let act = action_of(&res);
    assert_eq!(act.phase, AwaitingDiscard);
    assert_eq!(act.players[0].id, 1);
    assert_eq!(act.players[0].can_discard, Some(vec![true; 14]));
    assert_eq!(engine.round().turn, 1);
    assert_eq!(engine.round().players[1].hand, hand);

    assert!(matches!(
        engine.next(Intent::Decide(vec![true])),
        Err(EngineError::ProtocolState(_))
    ));
    assert!(matches!(
        engine.next(Intent::Discard(14)),
        Err(EngineError::Validation(_))
    ));
    assert_eq!(engine.round().players[1].hand, hand);

    engine.next(Intent::Discard(0)).unwrap();
    assert_eq!(engine.round().turn, 2);
}

#[test]
fn test_dealer_tsumo_at_start() {
    let (mut engine, res) = start_engine(&["m123456789p11z77", "", "", ""], "z7");
    let act = action_of(&res);
    assert_eq!(act.phase, AwaitingTsumoDecision);
    assert_eq!(act.players[0].id, 0);

    let res = engine.next(Intent::Decide(vec![true])).unwrap();
    assert_eq!(scores_of(end_of(&res)), [15, -5, -5, -5]);
}

#[test]
fn test_unimplemented_phase_is_fatal() {
    let (mut engine, _) = start_engine(&RON_HANDS, "z7");
    engine.round.phase = AwaitingCall;
    assert!(matches!(
        engine.next(Intent::Decide(vec![])),
        Err(EngineError::Internal(_))
    ));
    assert!(engine.round().is_over);
    assert!(matches!(
        engine.next(Intent::Discard(0)),
        Err(EngineError::ProtocolState(_))
    ));
}

#[test]
fn test_broken_hand_is_fatal() {
    let (mut engine, _) = start_engine(&RON_HANDS, "z7");
    engine.round.players[0].hand.pop();
    assert!(matches!(
        engine.next(Intent::Discard(0)),
        Err(EngineError::Internal(_))
    ));
    assert!(engine.round().is_over);
}

// 全員が和了を見送り,ツモ切りを続けた場合の局の終了
#[cfg(test)]
fn play_until_end(engine: &mut TurnEngine, mut res: Response) -> RoundEnd {
    for _ in 0..1000 {
        let intent = match &res {
            Response::End { end, .. } => return end.clone(),
            Response::Action { action, .. } => match action.phase {
                AwaitingDiscard => {
                    let turn = engine.round().turn;
                    Intent::Discard(engine.round().players[turn].hand.len() - 1)
                }
                _ => Intent::Decide(vec![false; action.players.len()]),
            },
        };
        res = engine.next(intent).unwrap();
    }
    panic!("round did not end");
}

#[test]
fn test_exhaustive_draw() {
    let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(42);
    let wall = Wall::shuffled(&mut rng);
    let (mut engine, res) = TurnEngine::start(
        &StartRequest::default(),
        wall,
        Box::new(NoTenpai),
        Box::new(PlaceholderScorer),
    )
    .unwrap();

    let end = play_until_end(&mut engine, res);
    assert_eq!(end.reason, EndReason::ExhaustiveDraw);
    assert_eq!(scores_of(&end), [0; SEAT]);
    for p in &end.players {
        assert_eq!(p.readiness, Some(Readiness::NotReady));
        assert_eq!(p.win, None);
    }
    assert_eq!(engine.round().wall.drawn(), TILE_COUNT);
    assert!(engine.round().is_over);
}

#[test]
fn test_exhaustive_draw_with_ready_player() {
    // 全員ツモ切り seat1のみs2待ちの聴牌を維持する
    let hands = [
        "m147p147s147z1234",
        "m123456789p11s13",
        "m258p258s258z1234",
        "m369p369s369z1234",
    ];
    let wall = Wall::arranged(&hands, "", 5).unwrap();
    let (mut engine, res) = TurnEngine::start(
        &StartRequest::default(),
        wall,
        Box::new(WaitScanTenpai),
        Box::new(PlaceholderScorer),
    )
    .unwrap();

    let end = play_until_end(&mut engine, res);
    assert_eq!(end.reason, EndReason::ExhaustiveDraw);
    for s in [0, 2, 3] {
        assert_eq!(end.players[s].readiness, Some(Readiness::NotReady));
    }
    // 待ち牌をツモ切りしていれば振聴 どちらも聴牌として精算
    assert!(end.players[1].readiness.map_or(false, |r| r.is_ready()));
    assert_eq!(scores_of(&end), [-1000, 3000, -1000, -1000]);
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        // 流局時の精算は聴牌者の人数によらず0になる
        #[test]
        fn exhaustive_draw_is_zero_sum(seed in any::<u64>()) {
            let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(seed);
            let wall = Wall::shuffled(&mut rng);
            let (mut engine, res) = TurnEngine::start(
                &StartRequest::default(),
                wall,
                Box::new(WaitScanTenpai),
                Box::new(PlaceholderScorer),
            )
            .unwrap();

            let end = play_until_end(&mut engine, res);
            prop_assert_eq!(end.reason, EndReason::ExhaustiveDraw);
            let scores = scores_of(&end);
            prop_assert_eq!(scores.iter().sum::<Score>(), 0);

            let ready = end.players.clone().map(|p| p.readiness.map_or(false, |r| r.is_ready()));
            prop_assert_eq!(scores, exhaustive_draw_payments(&ready));
        }
    }

    #[test]
    fn exhaustive_draw_payments_are_zero_sum() {
        for bits in 0..16u32 {
            let ready: [bool; SEAT] = std::array::from_fn(|s| bits & (1 << s) != 0);
            let scores = exhaustive_draw_payments(&ready);
            assert_eq!(scores.iter().sum::<Score>(), 0, "{:?}", ready);
        }
    }
}
