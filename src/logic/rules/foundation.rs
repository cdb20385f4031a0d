//! 組札 (Foundation) へのカード移動ルールを定義するよ。
//!
//! スロットにはスートが決まっていない。最初に置いた A のスートがそのスロットのスートになって、
//! 以降は「一番上と同じスート」で判定するから、固定の対応表はいらないんだ。

use log::debug;

use super::common::is_one_rank_below;
use crate::components::card::{Card, Rank};

/// `moving` を一番上が `target_top` の組札スロットに置けるか。
///
/// - 空のスロット: A だけ
/// - そうでなければ同じスートで、ちょうど 1 つ上のランク
pub fn can_move_to_foundation(moving: &Card, target_top: Option<&Card>) -> bool {
    let result = match target_top {
        None => moving.rank == Rank::Ace,
        Some(top) => moving.suit == top.suit && is_one_rank_below(top, moving),
    };
    debug!(
        "[Foundation Rule] {} onto {}: {}",
        moving,
        target_top.map_or_else(|| "empty slot".to_string(), |c| c.to_string()),
        result
    );
    result
}
