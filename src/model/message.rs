use super::*;
use crate::error::{EngineError, EngineResult};
use crate::hand::{Readiness, WinShape};

// [Request]

// 局開始時の設定 (最初の1行)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartRequest {
    pub prevailing_wind: usize,  // 場風 (0:東 ~ 3:北)
    pub remaining_dealer: usize, // 連荘数
    #[serde(default)]
    pub riichi: [bool; SEAT], // リーチ可能な点数を持っているか
}

// 手番ごとの入力 JSON配列の各要素
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TurnRequest {
    #[serde(default)]
    pub discard: Option<i64>, // 負の値は範囲外のindexとして扱う
    #[serde(default)]
    pub ok: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Discard(Index),  // 手牌のindex番目を打牌
    Decide(Vec<bool>), // 和了するかどうか (ロン候補者の順, ツモは1要素)
}

impl Intent {
    // 打牌は1要素のみ, 応答はすべての要素がokを持つ
    pub fn from_requests(reqs: &[TurnRequest]) -> EngineResult<Self> {
        if reqs.is_empty() {
            return Err(EngineError::Validation("empty request".into()));
        }

        if reqs.iter().all(|r| r.discard.is_some() && r.ok.is_none()) {
            if reqs.len() != 1 {
                return Err(EngineError::Validation(format!(
                    "discard request must have exactly 1 element, got {}",
                    reqs.len()
                )));
            }
            let d = reqs[0].discard.unwrap_or_default();
            let index = Index::try_from(d).map_err(|_| {
                EngineError::Validation(format!("discard index {} out of range", d))
            })?;
            return Ok(Intent::Discard(index));
        }

        let oks: Option<Vec<bool>> = reqs
            .iter()
            .map(|r| if r.discard.is_none() { r.ok } else { None })
            .collect();
        oks.map(Intent::Decide).ok_or_else(|| {
            EngineError::Validation("each element must have either 'discard' or 'ok'".into())
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Intent::Discard(_) => "discard",
            Intent::Decide(_) => "decision",
        }
    }
}

// [Response]

// 入力待ちの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    AwaitingDiscard,        // 打牌
    AwaitingCall,           // 鳴き (未実装)
    AwaitingRonDecision,    // ロン
    AwaitingAbortDecision,  // 九種九牌 (未実装)
    AwaitingRiichiDecision, // リーチ (未実装)
    AwaitingTsumoDecision,  // ツモ
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Response {
    Action { table: TableView, action: ActionRequest },
    End { table: TableView, end: RoundEnd },
}

impl Response {
    pub fn is_end(&self) -> bool {
        matches!(self, Response::End { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionRequest {
    pub phase: Phase,
    pub players: Vec<ActingPlayer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActingPlayer {
    pub id: Seat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_discard: Option<Vec<bool>>, // 手牌の各牌を打牌可能かどうか
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndReason {
    Ron,
    Tsumo,
    ExhaustiveDraw, // 荒牌流局
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WinType {
    Ron,
    Tsumo,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundEnd {
    pub reason: EndReason,
    pub players: [PlayerResult; SEAT],
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerResult {
    pub win: Option<WinType>,
    pub readiness: Option<Readiness>, // 流局時のみ
    pub shape: Option<WinShape>,
    pub yaku: Vec<u32>,
    pub minipoints: usize,
    pub score: Score, // 点数の増減
}

// 卓の状態 すべての応答に付与する
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub fingerprint: String,
    pub wall_count: usize, // 配牌・ツモで使用した枚数
    pub dora_indicator_count: usize,
    pub replacement_tile_count: usize,
    pub players: Vec<PlayerView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall: Option<Vec<Tile>>, // 局終了時のみ公開
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub hand: Vec<Tile>,
    pub river: Vec<Tile>,
    pub readiness: Readiness,
    pub riichi: i32,
    pub melds: Vec<Meld>,
}

// 入力エラー時の応答 再送信を待つ (致命的なエラーの場合は局を終了)
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: i32,
    pub error_string: String,
}

impl From<&EngineError> for ErrorResponse {
    fn from(e: &EngineError) -> Self {
        Self {
            error: e.code(),
            error_string: e.to_string(),
        }
    }
}

#[test]
fn test_intent_from_requests() {
    let req: Vec<TurnRequest> = serde_json::from_str(r#"[{"discard": 3}]"#).unwrap();
    assert_eq!(Intent::from_requests(&req), Ok(Intent::Discard(3)));

    let req: Vec<TurnRequest> =
        serde_json::from_str(r#"[{"ok": true}, {"ok": false}]"#).unwrap();
    assert_eq!(
        Intent::from_requests(&req),
        Ok(Intent::Decide(vec![true, false]))
    );

    for s in [
        r#"[]"#,
        r#"[{"discard": 1}, {"discard": 2}]"#,
        r#"[{"discard": 1, "ok": true}]"#,
        r#"[{"ok": true}, {}]"#,
        r#"[{"discard": -1}]"#,
    ] {
        let req: Vec<TurnRequest> = serde_json::from_str(s).unwrap();
        assert!(
            matches!(Intent::from_requests(&req), Err(EngineError::Validation(_))),
            "{}",
            s
        );
    }
}

#[test]
fn test_start_request() {
    let req: StartRequest =
        serde_json::from_str(r#"{"prevailing_wind": 1, "remaining_dealer": 2}"#).unwrap();
    assert_eq!(req.prevailing_wind, 1);
    assert_eq!(req.riichi, [false; SEAT]);
}
