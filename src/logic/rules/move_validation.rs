// src/logic/rules/move_validation.rs
//! カード移動の全体的な妥当性チェックを行う。World から必要な値を読んでルール関数に渡すだけ。

use log::debug;

use super::{foundation, tableau};
use crate::components::stack::StackType;
use crate::ecs::{Entity, World};
use crate::logic::zones::{card_of, top_card};

/// `moving_bottom` (ランの一番下のカード) を `target_stack` に移動できるか検証する。
pub fn is_move_valid(world: &World, moving_bottom: Entity, target_stack: StackType) -> bool {
    target_stack.assert_in_range();
    let moving = card_of(world, moving_bottom);
    let target_top = top_card(world, target_stack);

    match target_stack {
        StackType::Tableau(_) => tableau::can_move_to_tableau(&moving, target_top.as_ref()),
        StackType::Foundation(_) => foundation::can_move_to_foundation(&moving, target_top.as_ref()),
        StackType::Stock | StackType::Waste => {
            // 山札・捨て札への直接移動は許可されない
            debug!("[Rules Validation] Moving to {:?} is not allowed.", target_stack);
            false
        }
    }
}
