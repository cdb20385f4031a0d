// src/session/mod.rs
//! 1 ゲーム分のセッション。World・アンドゥ・タイマー・テーマを全部ここで持つよ。
//!
//! 描画側はクリック先を `ClickTarget` に解決して渡すだけ。結果は戻り値の
//! `MoveOutcome` と、`drain_events` で取れる `SessionEvent` で受け取ってね。

pub mod events;
pub mod timer;
pub mod undo;

#[cfg(test)]
mod tests;

use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::components::{GameState, GameStatus, StackType};
use crate::config::GameConfig;
use crate::ecs::{Entity, System, World};
use crate::logic::outcome::{MoveOutcome, RejectReason, UndoOutcome};
use crate::logic::zones::{card_of, is_selected, selected_cards, stack_len, stack_of, top_card_entity};
use crate::scores::{ScoreError, ScoreRecord, ScoreStore};
use crate::systems::move_card_system::{plan_move_to_foundation, plan_move_to_tableau};
use crate::systems::selection_system::{self, SelectionChange};
use crate::systems::stock_system::{plan_draw, plan_reroll};
use crate::systems::{register_card_components, DealInitialCardsSystem, MovePlan, WinConditionSystem};
use crate::theme::{BorderStyle, Theme, ThemeState};

pub use events::{ClickTarget, SessionEvent};
pub use timer::ElapsedTimer;
pub use undo::{GameSnapshot, SnapshotCard, UndoStack};

/// セッションコントローラー。
///
/// 手は全部 `commit` を通る: 計画済みの手だけが来て、
/// スナップショット保存 → 適用 → 手数 +1 → 勝利判定 の順で必ず処理されるよ。
pub struct Session {
    world: World,
    game_entity: Entity,
    config: GameConfig,
    rng: StdRng,
    undo_stack: UndoStack,
    timer: ElapsedTimer,
    theme: ThemeState,
    win_system: WinConditionSystem,
    events: Vec<SessionEvent>,
}

impl Session {
    /// 新しいセッションを作って、すぐに 1 ゲーム目を配る。
    pub fn new(config: GameConfig) -> Self {
        let mut world = World::new();
        register_card_components(&mut world);
        let game_entity = world.create_entity();
        world.add_component(game_entity, GameState::new());

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut session = Self {
            world,
            game_entity,
            undo_stack: UndoStack::new(config.undo_budget()),
            config,
            rng,
            timer: ElapsedTimer::new(),
            theme: ThemeState::new(),
            win_system: WinConditionSystem::new(),
            events: Vec::new(),
        };
        session.new_game();
        session
    }

    /// 同じ設定で配り直す。履歴・手数・タイマーは全部リセット (テーマはそのまま)。
    pub fn new_game(&mut self) {
        DealInitialCardsSystem.execute(&mut self.world, self.game_entity, &mut self.rng);
        self.undo_stack = UndoStack::new(self.config.undo_budget());
        self.timer = ElapsedTimer::new();
        self.events.clear();

        info!(
            "🎮 New game (easy_mode: {}, undo budget: {})",
            self.config.easy_mode,
            self.undo_stack.remaining_undo()
        );
        self.events.push(SessionEvent::GameStarted {
            easy_mode: self.config.easy_mode,
            remaining_undo: self.undo_stack.remaining_undo(),
        });
        self.events.push(SessionEvent::ZonesChanged { stacks: StackType::all().collect() });
        self.events.push(SessionEvent::MoveCountChanged { moves: 0 });
    }

    // --- 入力 ---

    pub fn handle_click(&mut self, target: ClickTarget) -> MoveOutcome {
        match target {
            ClickTarget::Card(entity) => self.handle_card_activation(entity),
            ClickTarget::Stack(stack_type) => self.handle_empty_zone_activation(stack_type),
        }
    }

    /// カードがクリックされたとき。どのゾーンのどのカードかで、めくる・選ぶ・動かすを振り分ける。
    ///
    /// # パニック
    /// カードじゃないエンティティを渡すとパニック。
    pub fn handle_card_activation(&mut self, entity: Entity) -> MoveOutcome {
        if let Err(reason) = self.ensure_playing() {
            return reject(reason);
        }
        let stack_type = stack_of(&self.world, entity).stack_type;
        let is_top = top_card_entity(&self.world, stack_type) == Some(entity);

        match stack_type {
            StackType::Stock if is_top => self.draw_from_stash(),
            StackType::Stock => reject(RejectReason::BuriedCard),
            StackType::Waste => self.select_run(entity),
            StackType::Tableau(pile_index) => {
                if !card_of(&self.world, entity).is_face_up {
                    return reject(RejectReason::FaceDownCard);
                }
                if is_top && !is_selected(&self.world, entity) && !selected_cards(&self.world).is_empty() {
                    self.move_selection_to_pile(pile_index)
                } else {
                    self.select_run(entity)
                }
            }
            StackType::Foundation(slot) => {
                if !is_top {
                    return reject(RejectReason::BuriedCard);
                }
                if !is_selected(&self.world, entity) && !selected_cards(&self.world).is_empty() {
                    self.move_selection_to_foundation(slot)
                } else {
                    self.select_run(entity)
                }
            }
        }
    }

    /// カードが無い場所がクリックされたとき。
    ///
    /// 空の列なら K のランを、空の組札スロットなら A を動かす。空の山札 (⟳) ならリロール。
    ///
    /// # パニック
    /// 列・スロット番号が範囲外ならパニック。
    pub fn handle_empty_zone_activation(&mut self, stack_type: StackType) -> MoveOutcome {
        stack_type.assert_in_range();
        if let Err(reason) = self.ensure_playing() {
            return reject(reason);
        }
        let occupied = stack_len(&self.world, stack_type) > 0;
        match stack_type {
            StackType::Stock => self.reroll_waste_to_stash(),
            _ if occupied => reject(RejectReason::TargetNotEmpty),
            StackType::Tableau(pile_index) => self.move_selection_to_pile(pile_index),
            StackType::Foundation(slot) => self.move_selection_to_foundation(slot),
            StackType::Waste => reject(RejectReason::WasteEmpty),
        }
    }

    // --- 手 ---

    pub fn draw_from_stash(&mut self) -> MoveOutcome {
        let plan = self.ensure_playing().and_then(|_| plan_draw(&self.world, self.config.draw_count()));
        self.commit(plan)
    }

    pub fn reroll_waste_to_stash(&mut self) -> MoveOutcome {
        let plan = self.ensure_playing().and_then(|_| plan_reroll(&self.world));
        self.commit(plan)
    }

    pub fn move_selection_to_pile(&mut self, pile_index: u8) -> MoveOutcome {
        let plan = self.ensure_playing().and_then(|_| plan_move_to_tableau(&self.world, pile_index));
        self.commit(plan)
    }

    pub fn move_selection_to_foundation(&mut self, slot: u8) -> MoveOutcome {
        let plan = self.ensure_playing().and_then(|_| plan_move_to_foundation(&self.world, slot));
        self.commit(plan)
    }

    /// 選択のトグル。手数もアンドゥ履歴も変わらないよ。
    pub fn select_run(&mut self, entity: Entity) -> MoveOutcome {
        if let Err(reason) = self.ensure_playing() {
            return reject(reason);
        }
        match selection_system::toggle_selection(&mut self.world, entity, self.config.easy_mode) {
            Ok(change) => {
                debug_assert!(selection_system::selection_is_consistent(&self.world));
                if let SelectionChange::Selected { count } = change {
                    debug!("{} card(s) selected from {}", count, entity);
                }
                self.push_selection_event();
                MoveOutcome::SelectionChanged
            }
            Err(reason) => reject(reason),
        }
    }

    /// 計画済みの手を確定させる。計画が却下なら何も変わらない。
    fn commit(&mut self, plan: Result<MovePlan, RejectReason>) -> MoveOutcome {
        let plan = match plan {
            Ok(plan) => plan,
            Err(reason) => return reject(reason),
        };

        self.undo_stack.push(GameSnapshot::capture(&self.world));
        plan.apply(&mut self.world, &mut self.rng);
        let moves = {
            let state = self.game_state_mut();
            state.move_count += 1;
            state.move_count
        };
        self.win_system.run(&mut self.world);

        self.events.push(SessionEvent::ZonesChanged { stacks: plan.touched_stacks() });
        self.push_selection_event();
        self.events.push(SessionEvent::MoveCountChanged { moves });

        if self.status() == GameStatus::Won {
            self.timer.stop();
            let time_seconds = self.timer.elapsed_seconds();
            info!("🏆 Won in {} moves, {:.2}s", moves, time_seconds);
            self.events.push(SessionEvent::Won { moves, time_seconds });
            return MoveOutcome::Won { moves, time_seconds };
        }
        MoveOutcome::Moved
    }

    /// 一手戻す。履歴が無い・回数切れのときはメッセージを出すだけで何も変わらない。
    pub fn undo(&mut self) -> UndoOutcome {
        if self.status() != GameStatus::Playing {
            return self.notify_undo(UndoOutcome::GameFinished);
        }
        let snapshot = match self.undo_stack.pop_for_undo() {
            Ok(snapshot) => snapshot,
            Err(outcome) => return self.notify_undo(outcome),
        };

        snapshot.restore(&mut self.world);
        let moves = {
            let state = self.game_state_mut();
            state.move_count = state.move_count.saturating_sub(1);
            state.move_count
        };
        info!("↩️ Undo applied ({} left)", self.undo_stack.remaining_undo());

        self.events.push(SessionEvent::ZonesChanged { stacks: StackType::all().collect() });
        self.push_selection_event();
        self.events.push(SessionEvent::MoveCountChanged { moves });
        self.events.push(SessionEvent::UndoApplied { remaining_undo: self.undo_stack.remaining_undo() });
        UndoOutcome::Applied
    }

    fn notify_undo(&mut self, outcome: UndoOutcome) -> UndoOutcome {
        if let Some(message) = outcome.message() {
            debug!("undo refused: {}", message);
            self.events.push(SessionEvent::Notification { message: message.to_string() });
        }
        outcome
    }

    // --- 時間とテーマ ---

    /// 経過時間と虹色アニメーションを進める。
    pub fn tick(&mut self, dt_seconds: f64) {
        self.timer.tick(dt_seconds);
        self.theme.tick(dt_seconds);
    }

    pub fn change_theme(&mut self) -> Theme {
        let theme = self.theme.change_theme();
        info!("🎨 Theme changed to {:?}", theme);
        self.events.push(SessionEvent::ThemeChanged { theme });
        theme
    }

    pub fn border_style(&self, selected: bool) -> BorderStyle {
        self.theme.border_style(selected)
    }

    /// そのカードを描くときの枠線。
    pub fn card_border_style(&self, entity: Entity) -> BorderStyle {
        self.theme.border_style(is_selected(&self.world, entity))
    }

    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    /// たまった通知を全部取り出す。
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // --- 読み取り ---

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.game_state().status
    }

    pub fn move_count(&self) -> u32 {
        self.game_state().move_count
    }

    pub fn remaining_undo(&self) -> u32 {
        self.undo_stack.remaining_undo()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.timer.elapsed_seconds()
    }

    /// 今の盤面の値コピー。
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.world)
    }

    /// クリアしていれば (手数, 秒数)。
    pub fn final_score(&self) -> Option<(u32, f64)> {
        (self.status() == GameStatus::Won).then(|| (self.move_count(), self.elapsed_seconds()))
    }

    /// クリア記録を保存先に送る。保存に失敗してもゲームの状態は何も変わらない。
    pub fn submit_score(&self, store: &mut dyn ScoreStore, player_name: &str) -> Result<ScoreRecord, ScoreError> {
        let (moves, time_seconds) = self.final_score().ok_or(ScoreError::GameNotWon)?;
        let record = ScoreRecord::new(player_name, moves, time_seconds)?;
        if let Err(e) = store.save(record.clone()) {
            error!("Failed to save score for {}: {}", record.player_name, e);
            return Err(e);
        }
        info!("🏅 Saved score: {} / {} moves / {:.2}s", record.player_name, moves, time_seconds);
        Ok(record)
    }

    // --- 内部 ---

    fn ensure_playing(&self) -> Result<(), RejectReason> {
        match self.status() {
            GameStatus::Playing => Ok(()),
            GameStatus::Dealing | GameStatus::Won => Err(RejectReason::GameFinished),
        }
    }

    fn game_state(&self) -> &GameState {
        match self.world.get_component::<GameState>(self.game_entity) {
            Some(state) => state,
            None => panic!("game entity {} lost its GameState", self.game_entity),
        }
    }

    fn game_state_mut(&mut self) -> &mut GameState {
        let game_entity = self.game_entity;
        match self.world.get_component_mut::<GameState>(game_entity) {
            Some(state) => state,
            None => panic!("game entity {} lost its GameState", game_entity),
        }
    }

    fn push_selection_event(&mut self) {
        self.events.push(SessionEvent::SelectionChanged { selected: selected_cards(&self.world) });
    }
}

fn reject(reason: RejectReason) -> MoveOutcome {
    debug!("move rejected: {}", reason);
    MoveOutcome::Rejected(reason)
}
