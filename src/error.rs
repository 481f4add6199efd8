use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// 入力値の形式・範囲の誤り (打牌index, 応答数の不一致など) 再送信で回復可能
    Validation(String),
    /// 現在の局面で受け付けられない種類の入力 再送信で回復可能
    ProtocolState(String),
    /// 牌山が尽きた状態でのツモ
    Exhausted,
    /// 内部状態の不整合 局を続行してはならない
    Internal(String),
    /// リクエスト行のJSONとしての解釈失敗
    Json(String),
}

impl EngineError {
    // 局を中断すべきエラーかどうか
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::Exhausted | EngineError::Internal(_))
    }

    // 応答のerrorフィールドに設定する値
    pub fn code(&self) -> i32 {
        match self {
            EngineError::Exhausted | EngineError::Internal(_) => -1,
            EngineError::Json(_) => -2,
            EngineError::Validation(_) => -3,
            EngineError::ProtocolState(_) => -4,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Validation(message) => write!(f, "invalid value: {}", message),
            EngineError::ProtocolState(message) => write!(f, "unexpected request: {}", message),
            EngineError::Exhausted => write!(f, "no tile left in the wall"),
            EngineError::Internal(message) => write!(f, "internal error: {}", message),
            EngineError::Json(message) => write!(f, "json error: {}", message),
        }
    }
}

impl std::error::Error for EngineError {}

pub type EngineResult<T> = Result<T, EngineError>;

#[test]
fn test_error_classes() {
    let e = EngineError::Validation("discard index out of range".into());
    assert!(!e.is_fatal());
    assert_eq!(e.code(), -3);
    assert_eq!(e.to_string(), "invalid value: discard index out of range");

    assert!(!EngineError::ProtocolState("".into()).is_fatal());
    assert!(EngineError::Exhausted.is_fatal());
    assert!(EngineError::Internal("".into()).is_fatal());
    assert_eq!(EngineError::Json("".into()).code(), -2);
}
