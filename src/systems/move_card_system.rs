// src/systems/move_card_system.rs
//! 選択中のカードを場札・組札へ動かす手。
//!
//! `plan_*` はルールチェックだけ (World は読むだけ)、`apply_transfer` が実際に動かす。

use log::{debug, info};

use crate::components::{Card, StackType};
use crate::ecs::{Entity, World};
use crate::logic::outcome::RejectReason;
use crate::logic::rules::is_move_valid;
use crate::logic::zones::{
    card_of, cards_in_stack, compact_stack, push_onto_stack, selected_cards, selected_stack, stack_of, top_card,
    top_card_entity,
};
use crate::systems::move_plan::MovePlan;

/// 選択中のランを場札 `pile_index` に動かす手を計画する。
///
/// 列が空ならランの一番下が K のときだけ OK (上に乗ってるカードも一緒に動く)。
/// 空でなければ「色違い かつ ちょうど 1 つ下」。
///
/// # パニック
/// `pile_index` が 0..7 の外ならパニック！
pub fn plan_move_to_tableau(world: &World, pile_index: u8) -> Result<MovePlan, RejectReason> {
    let to = StackType::Tableau(pile_index);
    to.assert_in_range();

    let (cards, from) = current_selection(world)?;
    if from == to {
        return Err(RejectReason::SameStack);
    }
    if !is_move_valid(world, cards[0], to) {
        debug!("{} cannot go onto {:?} ({:?})", card_of(world, cards[0]), to, top_card(world, to));
        return Err(RejectReason::IllegalTableauMove);
    }
    Ok(MovePlan::Transfer { cards, from, to })
}

/// 選択中の 1 枚を組札スロット `slot` に動かす手を計画する。
///
/// 空スロットには A だけ、埋まってるスロットには同じスートで 1 つ上のカードだけ。
///
/// # パニック
/// `slot` が 0..4 の外ならパニック！
pub fn plan_move_to_foundation(world: &World, slot: u8) -> Result<MovePlan, RejectReason> {
    let to = StackType::Foundation(slot);
    to.assert_in_range();

    let (cards, from) = current_selection(world)?;
    if cards.len() != 1 {
        return Err(RejectReason::NotSingleCard);
    }
    if from == to {
        return Err(RejectReason::SameStack);
    }
    if !is_move_valid(world, cards[0], to) {
        debug!("{} cannot go onto {:?} ({:?})", card_of(world, cards[0]), to, top_card(world, to));
        return Err(RejectReason::IllegalFoundationMove);
    }
    Ok(MovePlan::Transfer { cards, from, to })
}

fn current_selection(world: &World) -> Result<(Vec<Entity>, StackType), RejectReason> {
    let cards = selected_cards(world);
    match selected_stack(world) {
        Some(from) if !cards.is_empty() => Ok((cards, from)),
        _ => Err(RejectReason::NothingSelected),
    }
}

/// カードを `from` から `to` の上に (順番そのままで) 積み替える。
///
/// 元が場札なら、残った一番上のカードを表向きにするよ。
///
/// # パニック
/// `cards` のどれかが `from` に無ければパニック (呼び出し側のバグ)。
pub(crate) fn apply_transfer(world: &mut World, cards: &[Entity], from: StackType, to: StackType) {
    for &entity in cards {
        let actual = stack_of(world, entity).stack_type;
        assert_eq!(actual, from, "entity {} is in {:?}, not {:?}", entity, actual, from);
    }

    for &entity in cards {
        push_onto_stack(world, entity, to);
    }
    compact_stack(world, from);

    if from.is_tableau() {
        if let Some(new_top) = top_card_entity(world, from) {
            if let Some(card) = world.get_component_mut::<Card>(new_top) {
                if !card.is_face_up {
                    card.is_face_up = true;
                    debug!("revealed {} on {:?}", card, from);
                }
            }
        }
    }
    info!(
        "🃏 Moved {} card(s) {:?} -> {:?} ({} left in source)",
        cards.len(),
        from,
        to,
        cards_in_stack(world, from).len()
    );
}
