// src/session/undo.rs
//! 盤面のスナップショットとアンドゥスタック。

use serde::{Deserialize, Serialize};

use crate::components::{Card, StackInfo, StackType};
use crate::config::rules::{FOUNDATION_COUNT, TABLEAU_COUNT};
use crate::ecs::{Entity, World};
use crate::logic::outcome::UndoOutcome;
use crate::logic::zones::{card_of, cards_in_stack};
use crate::systems::selection_system::clear_selection;

/// スナップショットの中の 1 枚。どのエンティティが、どんな値 (表裏込み) だったか。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotCard {
    pub entity: Entity,
    pub card: Card,
}

/// ある瞬間の全ゾーンの中身の値コピーだよ📸
///
/// 描画とは無関係なただのデータ。一度スタックに積んだら二度と書き換えない。
/// 各 Vec は下から上の順。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub piles: Vec<Vec<SnapshotCard>>,
    pub stash: Vec<SnapshotCard>,
    pub waste: Vec<SnapshotCard>,
    pub foundation: Vec<Vec<SnapshotCard>>,
}

impl GameSnapshot {
    /// World から今の盤面を写し取る。
    pub fn capture(world: &World) -> Self {
        let zone = |stack_type| {
            cards_in_stack(world, stack_type)
                .into_iter()
                .map(|entity| SnapshotCard { entity, card: card_of(world, entity) })
                .collect::<Vec<_>>()
        };
        Self {
            piles: (0..TABLEAU_COUNT as u8).map(|i| zone(StackType::Tableau(i))).collect(),
            stash: zone(StackType::Stock),
            waste: zone(StackType::Waste),
            foundation: (0..FOUNDATION_COUNT as u8).map(|i| zone(StackType::Foundation(i))).collect(),
        }
    }

    /// ゾーンの中身 (下から上)。
    ///
    /// # パニック
    /// 列・スロット番号が範囲外ならパニック。
    pub fn zone(&self, stack_type: StackType) -> &[SnapshotCard] {
        stack_type.assert_in_range();
        match stack_type {
            StackType::Tableau(i) => &self.piles[i as usize],
            StackType::Foundation(i) => &self.foundation[i as usize],
            StackType::Stock => &self.stash,
            StackType::Waste => &self.waste,
        }
    }

    /// 組札 4 スロットの一番上 (空なら None)。
    pub fn foundation_tops(&self) -> [Option<Card>; FOUNDATION_COUNT] {
        let mut tops = [None; FOUNDATION_COUNT];
        for (slot, cards) in tops.iter_mut().zip(&self.foundation) {
            *slot = cards.last().map(|snapshot| snapshot.card);
        }
        tops
    }

    pub fn card_count(&self) -> usize {
        StackType::all().map(|stack_type| self.zone(stack_type).len()).sum()
    }

    /// スナップショットの盤面を World に書き戻す。選択は全部外れるよ。
    ///
    /// # パニック
    /// スナップショットに載ってないカードが World にあったらパニック (別ゲームのスナップショット)。
    pub fn restore(&self, world: &mut World) {
        let live_cards = world.get_all_entities_with_component::<Card>().len();
        assert_eq!(
            live_cards,
            self.card_count(),
            "snapshot holds {} cards but the world has {}",
            self.card_count(),
            live_cards
        );

        for stack_type in StackType::all() {
            for (position, snapshot) in self.zone(stack_type).iter().enumerate() {
                assert!(world.is_entity_alive(snapshot.entity), "snapshot card {} no longer exists", snapshot.entity);
                world.add_component(snapshot.entity, snapshot.card);
                world.add_component(snapshot.entity, StackInfo::new(stack_type, position as u8));
            }
        }
        clear_selection(world);
    }
}

/// アンドゥ用のスナップショット置き場。
///
/// `remaining_undo` はアンドゥするたびに 1 減る。無限アンドゥモードでも
/// 本当に無限じゃなくて、絶対に使い切らない大きな数 (9999) が入ってるだけ。
#[derive(Debug, Clone)]
pub struct UndoStack {
    states: Vec<GameSnapshot>,
    remaining_undo: u32,
}

impl UndoStack {
    pub fn new(budget: u32) -> Self {
        Self { states: Vec::new(), remaining_undo: budget }
    }

    pub fn push(&mut self, snapshot: GameSnapshot) {
        self.states.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn remaining_undo(&self) -> u32 {
        self.remaining_undo
    }

    /// 一番新しいスナップショットを取り出して、残り回数を 1 減らす。
    ///
    /// 履歴が空なら `NoHistory`、回数切れなら `LimitReached` (この順でチェック)。
    /// どちらの場合も何も変わらないよ。
    pub fn pop_for_undo(&mut self) -> Result<GameSnapshot, UndoOutcome> {
        if self.states.is_empty() {
            return Err(UndoOutcome::NoHistory);
        }
        if self.remaining_undo == 0 {
            return Err(UndoOutcome::LimitReached);
        }
        match self.states.pop() {
            Some(snapshot) => {
                self.remaining_undo -= 1;
                Ok(snapshot)
            }
            None => Err(UndoOutcome::NoHistory),
        }
    }
}
