// src/systems/win_condition_system.rs
use log::{info, warn};

use crate::components::{GameState, GameStatus, StackType};
use crate::ecs::{System, World};
use crate::logic::rules::{check_win_condition, check_win_condition_by_count};
use crate::logic::zones::{foundation_tops, stack_len};

/// ゲームの勝利条件をチェックするシステムだよ！🏆🎉
///
/// 組札 4 スロットの一番上が全部 K なら勝ち。組札には A から順にしか積めないので、
/// K が乗っている = そのスロットは A..K が揃ってる、ってことになるんだ。
#[derive(Default)]
pub struct WinConditionSystem;

impl WinConditionSystem {
    pub fn new() -> Self {
        Self
    }

    /// 今の World が勝利条件を満たしているか。
    pub fn is_won(&self, world: &World) -> bool {
        check_win_condition(&foundation_tops(world))
    }
}

impl System for WinConditionSystem {
    /// 勝利条件をチェックして、`Playing` 中なら `Won` にするよ！
    fn run(&mut self, world: &mut World) {
        let Some(game_entity) = world.get_all_entities_with_component::<GameState>().first().copied() else {
            warn!("WinConditionSystem: GameState が見つかりません！");
            return;
        };
        let playing = world
            .get_component::<GameState>(game_entity)
            .map_or(false, |state| state.status == GameStatus::Playing);
        if !playing || !self.is_won(world) {
            return;
        }

        let foundation_cards: usize = StackType::all()
            .filter(|zone| zone.is_foundation())
            .map(|zone| stack_len(world, zone))
            .sum();
        debug_assert!(check_win_condition_by_count(foundation_cards), "4 kings but {} foundation cards", foundation_cards);

        if let Some(state) = world.get_component_mut::<GameState>(game_entity) {
            state.status = GameStatus::Won;
            info!("🏆 WinConditionSystem: 勝利条件達成！ {} 手でクリア", state.move_count);
        }
    }
}
