// src/logic/zones.rs
//! World からゾーン (山札・捨て札・場札・組札) の中身を取り出すヘルパーたち。
//!
//! ゾーンそのものは「StackInfo を持つカードの集まり」でしかないので、
//! 並び順は毎回 `position_in_stack` でソートして作るよ。

use itertools::Itertools;

use crate::components::{Card, Selected, StackInfo, StackType};
use crate::config::rules::FOUNDATION_COUNT;
use crate::ecs::{Entity, World};

/// カードエンティティの Card コンポーネント。無ければ不変条件違反なのでパニック！
pub fn card_of(world: &World, entity: Entity) -> Card {
    match world.get_component::<Card>(entity) {
        Some(card) => *card,
        None => panic!("entity {} has no Card component", entity),
    }
}

/// カードエンティティの StackInfo。無ければパニック。
pub fn stack_of(world: &World, entity: Entity) -> StackInfo {
    match world.get_component::<StackInfo>(entity) {
        Some(info) => *info,
        None => panic!("entity {} has no StackInfo component", entity),
    }
}

/// 指定ゾーンのカードを下から上の順で返す。
pub fn cards_in_stack(world: &World, stack_type: StackType) -> Vec<Entity> {
    world
        .get_all_entities_with_component::<StackInfo>()
        .into_iter()
        .filter_map(|entity| {
            world
                .get_component::<StackInfo>(entity)
                .filter(|info| info.stack_type == stack_type)
                .map(|info| (entity, info.position_in_stack))
        })
        .sorted_by_key(|(_, position)| *position)
        .map(|(entity, _)| entity)
        .collect()
}

pub fn stack_len(world: &World, stack_type: StackType) -> usize {
    cards_in_stack(world, stack_type).len()
}

/// 指定ゾーンの一番上のカードのエンティティ。
pub fn top_card_entity(world: &World, stack_type: StackType) -> Option<Entity> {
    cards_in_stack(world, stack_type).last().copied()
}

pub fn top_card(world: &World, stack_type: StackType) -> Option<Card> {
    top_card_entity(world, stack_type).map(|entity| card_of(world, entity))
}

/// 組札 4 スロットの一番上のカード (空なら None)。
pub fn foundation_tops(world: &World) -> [Option<Card>; FOUNDATION_COUNT] {
    let mut tops = [None; FOUNDATION_COUNT];
    for (index, slot) in tops.iter_mut().enumerate() {
        *slot = top_card(world, StackType::Foundation(index as u8));
    }
    tops
}

/// 選択中のカードをゾーン内の順番 (下から上) で返す。
pub fn selected_cards(world: &World) -> Vec<Entity> {
    world
        .get_all_entities_with_component::<Selected>()
        .into_iter()
        .map(|entity| (entity, stack_of(world, entity)))
        .sorted_by_key(|(_, info)| (info.stack_type, info.position_in_stack))
        .map(|(entity, _)| entity)
        .collect()
}

/// 選択中のカードがあるゾーン。
pub fn selected_stack(world: &World) -> Option<StackType> {
    selected_cards(world)
        .first()
        .map(|entity| stack_of(world, *entity).stack_type)
}

pub fn is_selected(world: &World, entity: Entity) -> bool {
    world.has_component::<Selected>(entity)
}

/// カードをゾーンの一番上に積む。`position_in_stack` は今の枚数になる。
pub fn push_onto_stack(world: &mut World, entity: Entity, stack_type: StackType) {
    let position = stack_len(world, stack_type) as u8;
    world.add_component(entity, StackInfo::new(stack_type, position));
}

/// ゾーンの `position_in_stack` を 0.. に詰め直す。カードを抜いた後に呼ぶよ。
pub fn compact_stack(world: &mut World, stack_type: StackType) {
    for (position, entity) in cards_in_stack(world, stack_type).into_iter().enumerate() {
        if let Some(info) = world.get_component_mut::<StackInfo>(entity) {
            info.position_in_stack = position as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Rank, Suit};

    fn world_with_cards(cards: &[(Suit, Rank, StackType, u8)]) -> (World, Vec<Entity>) {
        let mut world = World::new();
        world.register_component::<Card>();
        world.register_component::<StackInfo>();
        world.register_component::<Selected>();
        let entities = cards
            .iter()
            .map(|&(suit, rank, stack, pos)| {
                let entity = world.create_entity();
                world.add_component(entity, Card::new(suit, rank, true));
                world.add_component(entity, StackInfo::new(stack, pos));
                entity
            })
            .collect();
        (world, entities)
    }

    #[test]
    fn cards_are_ordered_by_position() {
        let (world, e) = world_with_cards(&[
            (Suit::Heart, Rank::Two, StackType::Tableau(0), 2),
            (Suit::Spade, Rank::Nine, StackType::Tableau(0), 0),
            (Suit::Club, Rank::Four, StackType::Waste, 0),
            (Suit::Diamond, Rank::Jack, StackType::Tableau(0), 1),
        ]);
        assert_eq!(cards_in_stack(&world, StackType::Tableau(0)), vec![e[1], e[3], e[0]]);
        assert_eq!(top_card_entity(&world, StackType::Tableau(0)), Some(e[0]));
        assert_eq!(top_card_entity(&world, StackType::Tableau(1)), None);
        assert_eq!(stack_len(&world, StackType::Waste), 1);
    }

    #[test]
    fn foundation_tops_reads_each_slot() {
        let (world, _) = world_with_cards(&[
            (Suit::Heart, Rank::Ace, StackType::Foundation(2), 0),
            (Suit::Heart, Rank::Two, StackType::Foundation(2), 1),
        ]);
        let tops = foundation_tops(&world);
        assert_eq!(tops[0], None);
        assert_eq!(tops[2].map(|c| c.rank), Some(Rank::Two));
    }

    #[test]
    fn push_and_compact_keep_positions_dense() {
        let (mut world, e) = world_with_cards(&[
            (Suit::Heart, Rank::Five, StackType::Tableau(1), 0),
            (Suit::Spade, Rank::Four, StackType::Tableau(1), 1),
            (Suit::Heart, Rank::Three, StackType::Tableau(1), 2),
        ]);
        push_onto_stack(&mut world, e[1], StackType::Tableau(2));
        compact_stack(&mut world, StackType::Tableau(1));

        assert_eq!(stack_of(&world, e[2]).position_in_stack, 1);
        assert_eq!(stack_of(&world, e[1]), StackInfo::new(StackType::Tableau(2), 0));
    }

    #[test]
    fn selected_cards_follow_stack_order() {
        let (mut world, e) = world_with_cards(&[
            (Suit::Heart, Rank::Five, StackType::Tableau(4), 1),
            (Suit::Spade, Rank::Six, StackType::Tableau(4), 0),
        ]);
        world.add_component(e[0], Selected);
        world.add_component(e[1], Selected);
        assert_eq!(selected_cards(&world), vec![e[1], e[0]]);
        assert_eq!(selected_stack(&world), Some(StackType::Tableau(4)));
        assert!(is_selected(&world, e[0]));
    }

    #[test]
    #[should_panic(expected = "has no Card component")]
    fn missing_card_component_panics() {
        let mut world = World::new();
        world.register_component::<Card>();
        let entity = world.create_entity();
        card_of(&world, entity);
    }
}
