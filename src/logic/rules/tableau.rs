//! 場札 (Tableau) へのカード移動ルールを定義するよ。

use log::debug;

use super::common::{colors_differ, is_one_rank_below};
use crate::components::card::{Card, Rank};

/// ランの一番下のカード `moving_bottom` を、場札の一番上 `target_top` に重ねられるか。
///
/// - 場札が空なら K だけ (ランの残りは一緒についてくる)
/// - そうでなければ「色違い」かつ「ちょうど 1 つ小さいランク」
pub fn can_move_to_tableau(moving_bottom: &Card, target_top: Option<&Card>) -> bool {
    match target_top {
        Some(top) => {
            let colors_different = colors_differ(moving_bottom, top);
            let rank_is_one_less = is_one_rank_below(moving_bottom, top);
            debug!(
                "[Tableau Rule] {} onto {}: colors different = {}, rank one less = {}",
                moving_bottom, top, colors_different, rank_is_one_less
            );
            colors_different && rank_is_one_less
        }
        None => {
            let is_king = moving_bottom.rank == Rank::King;
            debug!("[Tableau Rule] {} onto empty pile: is king = {}", moving_bottom, is_king);
            is_king
        }
    }
}
