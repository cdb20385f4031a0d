// src/components/mod.rs

// カードエンティティにくっつけるデータ部品たち！
pub mod card;
pub mod game_state;
pub mod selection;
pub mod stack;

pub use card::{Card, CardColor, Rank, Suit};
pub use game_state::{GameState, GameStatus};
pub use selection::Selected;
pub use stack::{StackInfo, StackType};
