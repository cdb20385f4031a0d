// src/config/game_config.rs
//! 1 ゲーム分の設定 (モード選択画面で選ぶもの) だよ。

use serde::{Deserialize, Serialize};

use super::rules::{EASY_DRAW_COUNT, HARD_DRAW_COUNT, INFINITE_UNDO_BUDGET, MAX_UNDO};

/// ゲーム開始時の設定。
///
/// JS 側からは `{"easy_mode": true}` みたいな JSON で渡せるよ。書かなかった項目はデフォルト値！
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// イージー: 1 枚ずつめくる & 捨て札のどのカードでも選べる
    pub easy_mode: bool,
    /// アンドゥ無制限 (実際は INFINITE_UNDO_BUDGET 回)
    pub infinite_undo: bool,
    /// 乱数シード。Some なら配り方とリロールの並びが再現できる
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new(easy_mode: bool, infinite_undo: bool) -> Self {
        Self { easy_mode, infinite_undo, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid game config JSON: {}", e))
    }

    pub fn draw_count(&self) -> usize {
        if self.easy_mode {
            EASY_DRAW_COUNT
        } else {
            HARD_DRAW_COUNT
        }
    }

    pub fn undo_budget(&self) -> u32 {
        if self.infinite_undo {
            INFINITE_UNDO_BUDGET
        } else {
            MAX_UNDO
        }
    }
}
