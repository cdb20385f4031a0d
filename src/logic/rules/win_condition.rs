//! ゲームの勝利条件判定ロジックを定義するよ。

use crate::components::card::{Card, Rank};
use crate::config::rules::{DECK_SIZE, FOUNDATION_COUNT};

/// 組札の一番上が 4 つとも K なら勝ち！🏆
///
/// 組札は A から順にしか積めないので、一番上が K ならそのスロットは A..K 全部そろってる。
pub fn check_win_condition(foundation_tops: &[Option<Card>]) -> bool {
    foundation_tops
        .iter()
        .flatten()
        .filter(|card| card.rank == Rank::King)
        .count()
        == FOUNDATION_COUNT
}

/// 組札にあるカードの枚数で判定する版。上と同じ結果になるはず！
pub fn check_win_condition_by_count(foundation_card_count: usize) -> bool {
    foundation_card_count == DECK_SIZE
}
