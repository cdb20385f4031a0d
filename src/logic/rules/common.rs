//! ルール判定で共通して使うヘルパー関数や型を置くよ。

use crate::components::card::Card;

pub use crate::components::card::CardColor;

/// `lower` が `upper` のちょうど 1 つ下のランクか (例: 7 と 8)。
pub fn is_one_rank_below(lower: &Card, upper: &Card) -> bool {
    lower.rank.value() + 1 == upper.rank.value()
}

/// 2 枚の色が違うか (赤と黒)。
pub fn colors_differ(a: &Card, b: &Card) -> bool {
    a.color() != b.color()
}
