// src/systems/move_plan.rs

use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::components::StackType;
use crate::ecs::{Entity, World};
use crate::systems::{move_card_system, selection_system, stock_system};

/// 検証済みの「これからやる手」だよ。
///
/// `plan_*` 関数が World を読むだけで作って、セッションがスナップショットを取ってから
/// `apply` する。作られた時点でルール上は合法なことが保証されてる！
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MovePlan {
    /// 山札の上から `count` 枚を表向きにして捨て札へ
    Draw { count: usize },
    /// 捨て札を全部シャッフルして裏向きで山札へ戻す
    Reroll,
    /// `cards` (下から上の順) を `from` から `to` へ
    Transfer { cards: Vec<Entity>, from: StackType, to: StackType },
}

impl MovePlan {
    /// この手で中身が変わるゾーン。描画側への通知に使うよ。
    pub fn touched_stacks(&self) -> Vec<StackType> {
        match self {
            MovePlan::Draw { .. } | MovePlan::Reroll => vec![StackType::Stock, StackType::Waste],
            MovePlan::Transfer { from, to, .. } => vec![*from, *to],
        }
    }

    /// 計画を World に適用する。選択は必ず全部解除されるよ。
    pub fn apply<R: Rng + ?Sized>(&self, world: &mut World, rng: &mut R) {
        debug!("applying {:?}", self);
        selection_system::clear_selection(world);
        match self {
            MovePlan::Draw { count } => stock_system::apply_draw(world, *count),
            MovePlan::Reroll => stock_system::apply_reroll(world, rng),
            MovePlan::Transfer { cards, from, to } => {
                move_card_system::apply_transfer(world, cards, *from, *to)
            }
        }
    }
}
