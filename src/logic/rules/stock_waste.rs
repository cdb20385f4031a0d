//! 山札 (Stock) と捨て札 (Waste) に関するルールを定義するよ。

use crate::config::rules::{EASY_WASTE_VISIBLE, HARD_WASTE_VISIBLE, SELECTABLE_WASTE_DEPTH};

/// ストック（山札）からウェスト（捨て札）にカードをめくれるかチェックする。
pub fn can_deal_from_stock(stock_is_empty: bool) -> bool {
    !stock_is_empty
}

/// ストックが空のときに、ウェストのカードをストックに戻せる (リロール) かチェックする。
pub fn can_reset_stock_from_waste(stock_is_empty: bool, waste_is_empty: bool) -> bool {
    stock_is_empty && !waste_is_empty
}

/// 実際にめくる枚数。ハードモードで残りが 3 枚未満ならあるだけめくる。
pub fn cards_to_draw(stock_len: usize, draw_count: usize) -> usize {
    stock_len.min(draw_count)
}

/// 捨て札の上から何枚が表に見えているか。
pub fn visible_waste_count(easy_mode: bool) -> usize {
    if easy_mode {
        EASY_WASTE_VISIBLE
    } else {
        HARD_WASTE_VISIBLE
    }
}

/// 捨て札のカードを選べるか。`depth_from_top` は一番上が 0。
///
/// 見えている枚数に関係なく、選べるのは一番上の 1 枚だけ。下に埋もれたカードは絶対に取れない。
pub fn can_select_waste_card(easy_mode: bool, depth_from_top: usize) -> bool {
    depth_from_top < visible_waste_count(easy_mode).min(SELECTABLE_WASTE_DEPTH)
}
