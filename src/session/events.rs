// src/session/events.rs
//! セッションから描画側へ流す通知と、描画側から来るクリック先。

use serde::{Deserialize, Serialize};

use crate::components::StackType;
use crate::ecs::Entity;
use crate::theme::Theme;

/// 入力レイヤーが一度だけ解決したクリック先。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickTarget {
    /// カード (エンティティ ID) がクリックされた
    Card(Entity),
    /// カードが無い場所 (空の列・空の組札スロット・空の山札の「⟳」) がクリックされた
    Stack(StackType),
}

/// 描画側が `drain_events` で受け取る通知。コアは描画のことは何も知らない！
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// 新しいゲームが配られた
    GameStarted { easy_mode: bool, remaining_undo: u32 },
    /// これらのゾーンの中身が変わったので描き直してね
    ZonesChanged { stacks: Vec<StackType> },
    SelectionChanged { selected: Vec<Entity> },
    MoveCountChanged { moves: u32 },
    UndoApplied { remaining_undo: u32 },
    /// 画面に出すメッセージ (アンドゥできない理由など)
    Notification { message: String },
    Won { moves: u32, time_seconds: f64 },
    ThemeChanged { theme: Theme },
}
