// 麻雀のデータモデル
mod define;
mod meld;
mod message;
mod player;
mod tile;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use define::*;
pub use meld::*;
pub use message::*;
pub use player::*;
pub use tile::*;
