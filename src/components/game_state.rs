// src/components/game_state.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;

/// ゲーム全体の現在の状態を表す列挙型だよ！🏆
///
/// `Dealing → Playing → Won` の一方通行。`Won` から抜けるのは新しいゲームを始めたときだけ！
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// カードを配っている最中
    Dealing,
    /// ゲームが進行中の状態。手を指せるのはここだけ
    Playing,
    /// 勝利！🏆
    Won,
}

/// ゲーム状態を保持するコンポーネント。
///
/// ゲーム用の特別なエンティティに 1 つだけくっつけて、
/// どのシステムからでも今の状態と手数を参照・更新できるようにするんだ💡
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    pub move_count: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self { status: GameStatus::Dealing, move_count: 0 }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for GameState {}
