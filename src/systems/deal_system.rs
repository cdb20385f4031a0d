// src/systems/deal_system.rs

use log::info;
use rand::Rng;

use crate::components::{Card, GameState, GameStatus, Selected, StackInfo, StackType};
use crate::ecs::{Entity, World};
use crate::logic::deck::{create_standard_deck, deal_layout, shuffle_deck};

// === 初期カード配置システム！ ===
// ゲーム開始時に、山札と7つの場札にカードを配る役割を担うシステムだよ。
#[derive(Default)]
pub struct DealInitialCardsSystem;

impl DealInitialCardsSystem {
    /// ゲームの初期カード配置を実行する関数だよ！ 🎉
    ///
    /// # 処理の流れ
    /// 1. ゲーム状態を `Dealing` にして、前のゲームのカードエンティティがあればお掃除🧹
    /// 2. 新しいデッキ (52枚、全部裏向き) を作ってシャッフル
    /// 3. 場札: 列 i に i+1 枚 (一番上だけ表向き)、残り 24 枚は裏向きで山札へ
    /// 4. 1 枚ごとにエンティティを作って `Card` と `StackInfo` をくっつける
    /// 5. ゲーム状態を `Playing` にする
    ///
    /// # パニック
    /// `register_card_components` を呼ぶ前の World だとパニック！
    pub fn execute<R: Rng + ?Sized>(&self, world: &mut World, game_entity: Entity, rng: &mut R) {
        assert!(
            world.is_registered::<Card>() && world.is_registered::<StackInfo>(),
            "card components are not registered; call register_card_components first"
        );
        set_status(world, game_entity, GameStatus::Dealing);

        let existing_cards = world.get_all_entities_with_component::<Card>();
        if !existing_cards.is_empty() {
            info!("🧹 Removing {} card entities from the previous game", existing_cards.len());
            for entity in existing_cards {
                world.destroy_entity(entity);
            }
        }

        let mut deck = create_standard_deck();
        shuffle_deck(&mut deck, rng);
        let layout = deal_layout(deck);

        for (pile_index, pile) in layout.piles.into_iter().enumerate() {
            spawn_stack(world, StackType::Tableau(pile_index as u8), pile);
        }
        let stock_len = layout.stock.len();
        spawn_stack(world, StackType::Stock, layout.stock);
        info!("🃏 Dealt 28 tableau cards and {} stock cards", stock_len);

        if let Some(state) = world.get_component_mut::<GameState>(game_entity) {
            state.move_count = 0;
        }
        set_status(world, game_entity, GameStatus::Playing);
    }
}

/// 必要なコンポーネント型を World に登録する。何回呼んでも大丈夫。
pub fn register_card_components(world: &mut World) {
    world.register_component::<Card>();
    world.register_component::<StackInfo>();
    world.register_component::<Selected>();
    world.register_component::<GameState>();
}

fn spawn_stack(world: &mut World, stack_type: StackType, cards: Vec<Card>) {
    for (position, card) in cards.into_iter().enumerate() {
        let entity = world.create_entity();
        world.add_component(entity, card);
        world.add_component(entity, StackInfo::new(stack_type, position as u8));
    }
}

fn set_status(world: &mut World, game_entity: Entity, status: GameStatus) {
    match world.get_component_mut::<GameState>(game_entity) {
        Some(state) => state.status = status,
        None => panic!("game entity {} has no GameState component", game_entity),
    }
}
