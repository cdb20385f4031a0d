// src/systems/stock_system.rs
//! 山札 (Stock) と捨て札 (Waste) の間を行き来する手。

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Card, StackType};
use crate::ecs::World;
use crate::logic::outcome::RejectReason;
use crate::logic::rules::{can_deal_from_stock, can_reset_stock_from_waste, cards_to_draw};
use crate::logic::zones::{cards_in_stack, push_onto_stack, stack_len};
use crate::systems::move_plan::MovePlan;

/// 山札からめくる手を計画する。`draw_count` はモードで決まる (ハード 3 / イージー 1)。
pub fn plan_draw(world: &World, draw_count: usize) -> Result<MovePlan, RejectReason> {
    let stock_len = stack_len(world, StackType::Stock);
    if !can_deal_from_stock(stock_len == 0) {
        return Err(RejectReason::EmptyStock);
    }
    Ok(MovePlan::Draw { count: cards_to_draw(stock_len, draw_count) })
}

/// 捨て札を山札に戻す手を計画する。山札が空っぽのときだけ！
pub fn plan_reroll(world: &World) -> Result<MovePlan, RejectReason> {
    let stock_empty = stack_len(world, StackType::Stock) == 0;
    let waste_empty = stack_len(world, StackType::Waste) == 0;
    if !stock_empty {
        return Err(RejectReason::StockNotEmpty);
    }
    if !can_reset_stock_from_waste(stock_empty, waste_empty) {
        return Err(RejectReason::WasteEmpty);
    }
    Ok(MovePlan::Reroll)
}

/// 山札の上 `count` 枚を、並び順を保ったまま表向きで捨て札の上に積む。
/// 元の山札の一番上が、新しい捨て札の一番上になるよ。
pub(crate) fn apply_draw(world: &mut World, count: usize) {
    let stock = cards_in_stack(world, StackType::Stock);
    assert!(count <= stock.len(), "cannot draw {} cards from a stock of {}", count, stock.len());

    let drawn = &stock[stock.len() - count..];
    for &entity in drawn {
        if let Some(card) = world.get_component_mut::<Card>(entity) {
            card.is_face_up = true;
        }
        push_onto_stack(world, entity, StackType::Waste);
    }
    debug!("drew {} card(s), {} left in stock", count, stock.len() - count);
}

/// 捨て札を全部シャッフルして、裏向きで山札へ。捨て札は空になる。
pub(crate) fn apply_reroll<R: Rng + ?Sized>(world: &mut World, rng: &mut R) {
    let mut waste = cards_in_stack(world, StackType::Waste);
    waste.shuffle(rng);
    for &entity in &waste {
        if let Some(card) = world.get_component_mut::<Card>(entity) {
            card.is_face_up = false;
        }
        push_onto_stack(world, entity, StackType::Stock);
    }
    info!("♻️ Rerolled {} waste cards back into the stock", waste.len());
}
