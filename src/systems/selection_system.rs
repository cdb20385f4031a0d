// src/systems/selection_system.rs
//! カードの選択 (Selected マーカー) を付けたり外したりするシステム。
//!
//! 守る約束: 選択は常に 1 つのゾーンだけ。場札なら末尾に連続したラン、捨て札・組札なら 1 枚。

use log::debug;

use crate::components::{Selected, StackType};
use crate::ecs::{Entity, World};
use crate::logic::outcome::RejectReason;
use crate::logic::rules::can_select_waste_card;
use crate::logic::zones::{card_of, cards_in_stack, is_selected, selected_cards, stack_of, top_card_entity};

/// 選択をどう変えたか。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected { count: usize },
    Cleared,
}

/// 全ゾーンの選択を外す。
pub fn clear_selection(world: &mut World) {
    for entity in world.get_all_entities_with_component::<Selected>() {
        world.remove_component::<Selected>(entity);
    }
}

/// 指定ゾーンの選択だけを外す。
pub fn clear_selection_in(world: &mut World, stack_type: StackType) {
    for entity in cards_in_stack(world, stack_type) {
        if is_selected(world, entity) {
            world.remove_component::<Selected>(entity);
        }
    }
}

/// カードをクリックしたときの選択トグル。
///
/// - 裏向きのカードは選べない
/// - 選択中のカードならそのゾーンの選択を外す
/// - 場札ならクリックしたカードから一番上までのランを選ぶ
/// - 捨て札はどちらのモードでも一番上の 1 枚だけ
/// - 組札は一番上の 1 枚だけ
///
/// 新しく選ぶときは、ほかのゾーンの選択は先に全部外れるよ。
pub fn toggle_selection(world: &mut World, entity: Entity, easy_mode: bool) -> Result<SelectionChange, RejectReason> {
    let card = card_of(world, entity);
    let stack_type = stack_of(world, entity).stack_type;

    if !card.is_face_up {
        return Err(RejectReason::FaceDownCard);
    }
    if is_selected(world, entity) {
        clear_selection_in(world, stack_type);
        debug!("selection cleared in {:?}", stack_type);
        return Ok(SelectionChange::Cleared);
    }

    let is_top = top_card_entity(world, stack_type) == Some(entity);
    let run = match stack_type {
        StackType::Tableau(_) => run_from(world, entity, stack_type),
        StackType::Waste => {
            let depth = depth_from_top(world, entity, stack_type);
            if !can_select_waste_card(easy_mode, depth) {
                debug!("waste card {} is {} below the top", entity, depth);
                return Err(RejectReason::WasteCardNotSelectable);
            }
            vec![entity]
        }
        StackType::Foundation(_) => {
            if !is_top {
                return Err(RejectReason::BuriedCard);
            }
            vec![entity]
        }
        StackType::Stock => return Err(RejectReason::BuriedCard),
    };

    clear_selection(world);
    let count = run.len();
    for member in run {
        world.add_component(member, Selected);
    }
    debug!("selected {} card(s) in {:?}", count, stack_type);
    Ok(SelectionChange::Selected { count })
}

/// `entity` から一番上までの連続したカード。ランの途中に裏向きがあったらバグ！
fn run_from(world: &World, entity: Entity, stack_type: StackType) -> Vec<Entity> {
    let cards = cards_in_stack(world, stack_type);
    let start = match cards.iter().position(|&e| e == entity) {
        Some(index) => index,
        None => panic!("entity {} is not in {:?}", entity, stack_type),
    };
    let run = cards[start..].to_vec();
    assert!(
        run.iter().all(|&e| card_of(world, e).is_face_up),
        "face-down card inside a face-up run in {:?}",
        stack_type
    );
    run
}

/// ゾーンの一番上から数えて何枚目か (一番上が 0)。
fn depth_from_top(world: &World, entity: Entity, stack_type: StackType) -> usize {
    match cards_in_stack(world, stack_type).iter().rev().position(|&e| e == entity) {
        Some(depth) => depth,
        None => panic!("entity {} is not in {:?}", entity, stack_type),
    }
}

/// 今の選択が約束どおりか。場札なら末尾に連続したラン、それ以外なら 1 枚だけ。
pub fn selection_is_consistent(world: &World) -> bool {
    let selected = selected_cards(world);
    let Some(&first) = selected.first() else {
        return true;
    };
    let stack_type = stack_of(world, first).stack_type;
    if selected.iter().any(|&e| stack_of(world, e).stack_type != stack_type) {
        return false;
    }
    if !stack_type.is_tableau() {
        return selected.len() == 1;
    }
    let cards = cards_in_stack(world, stack_type);
    cards.len() >= selected.len() && cards[cards.len() - selected.len()..] == selected[..]
}
