// 手牌の和了判定・聴牌判定・点数の授受を行うモジュール
mod score;
mod tenpai;
mod win;

pub use self::{
    score::{
        exhaustive_draw_payments, ron_payments, tsumo_payments, PlaceholderScorer, ScoreResult,
        Scorer, WinContext,
    },
    tenpai::{calc_win_kinds, create_tenpai_judge, NoTenpai, Readiness, TenpaiJudge, WaitScanTenpai},
    win::{
        check_win_size, evaluate_win, is_seven_pairs_win, is_standard_win,
        is_thirteen_orphans_win, WinShape,
    },
};
