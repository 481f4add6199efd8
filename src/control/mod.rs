// 牌山の管理と局の進行を行うモジュール
mod engine;
mod wall;

pub use self::{
    engine::{Round, TurnEngine},
    wall::{fingerprint_of, verify_fingerprint, Wall},
};
