// src/logic/outcome.rs
//! 手を指した結果・アンドゥの結果を表す型だよ。
//!
//! ルール違反はエラーじゃなくて「ただの値」。状態は一切変わらず、UI が好きなら表示するだけ！

use serde::{Deserialize, Serialize};
use std::fmt;

/// 手が却下された理由。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// 裏向きのカードはクリックしても何も起きない
    FaceDownCard,
    /// 山札が空 (リロールを使ってね)
    EmptyStock,
    /// 山札が残っているのにリロールしようとした
    StockNotEmpty,
    /// 捨て札が空でリロールするものが無い
    WasteEmpty,
    NothingSelected,
    /// 組札・空き組札へは 1 枚ずつしか動かせない
    NotSingleCard,
    IllegalTableauMove,
    IllegalFoundationMove,
    /// ハードモードでは捨て札の一番上しか選べない
    WasteCardNotSelectable,
    /// 「空のゾーン」としてクリックされたのに中身があった
    TargetNotEmpty,
    /// 選んだカードと同じゾーンへは動かせない
    SameStack,
    /// 上に別のカードが乗っている (山札・組札の一番上以外)
    BuriedCard,
    /// 勝利後は新しいゲームを始めるまで何もできない
    GameFinished,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::FaceDownCard => "card is face down",
            RejectReason::EmptyStock => "stock is empty",
            RejectReason::StockNotEmpty => "stock is not empty yet",
            RejectReason::WasteEmpty => "waste is empty",
            RejectReason::NothingSelected => "nothing is selected",
            RejectReason::NotSingleCard => "only a single card can go there",
            RejectReason::IllegalTableauMove => "run does not fit on that pile",
            RejectReason::IllegalFoundationMove => "card does not fit on that foundation",
            RejectReason::WasteCardNotSelectable => "only the top waste card can be selected",
            RejectReason::TargetNotEmpty => "target is not empty",
            RejectReason::SameStack => "selection is already there",
            RejectReason::BuriedCard => "card is covered by another card",
            RejectReason::GameFinished => "game is already won",
        };
        f.write_str(text)
    }
}

/// カードのクリック・空きゾーンのクリックの結果。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// 手が成立した (スナップショット保存 & 手数 +1 済み)
    Moved,
    /// 手が成立して、そのままゲームクリア！🏆
    Won { moves: u32, time_seconds: f64 },
    /// 選択状態だけが変わった (手数は増えない)
    SelectionChanged,
    Rejected(RejectReason),
}

impl MoveOutcome {
    pub fn is_move(&self) -> bool {
        matches!(self, MoveOutcome::Moved | MoveOutcome::Won { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, MoveOutcome::Rejected(_))
    }
}

/// アンドゥの結果。「履歴が無い」と「回数切れ」は別のメッセージで伝える。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UndoOutcome {
    Applied,
    NoHistory,
    LimitReached,
    GameFinished,
}

impl UndoOutcome {
    /// 画面に出すメッセージ。成功時は None。
    pub fn message(&self) -> Option<&'static str> {
        match self {
            UndoOutcome::Applied => None,
            UndoOutcome::NoHistory => Some("No more actions to undo."),
            UndoOutcome::LimitReached => Some("Undo limit reached."),
            UndoOutcome::GameFinished => Some("Game is already won."),
        }
    }
}
