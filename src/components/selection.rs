// src/components/selection.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;

/// 「このカードは今選択されてるよ」っていう目印コンポーネント✨
///
/// 選択されたカードは必ず 1 つのゾーンの末尾に連続して並ぶ (場札のランか、
/// 捨て札・組札の 1 枚)。その約束は `SelectionSystem` が守るよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selected;

impl Component for Selected {}
