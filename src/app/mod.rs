// mainから直接呼び出すアプリケーションの動作モード(S, V)のモジュール

mod referee;
mod verify;

pub use referee::RefereeApp;
pub use verify::VerifyApp;
