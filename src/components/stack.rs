// src/components/stack.rs

use serde::{Deserialize, Serialize};

use crate::config::rules::{FOUNDATION_COUNT, TABLEAU_COUNT};
use crate::ecs::component::Component;

/// カードが存在する場所（ゾーン）の種類を示す Enum だよ。
///
/// 入力レイヤーはクリックされたものを一度だけこのタグに解決して、
/// あとはエンジンにそのまま渡すんだ。「このカードはどこ？」って毎回探し回らなくて済む！
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StackType {
    /// 場札 (Tableau)。列番号 0-6。
    Tableau(u8),
    /// 組札 (Foundation)。スロット番号 0-3。スートは最初に置かれた A で決まる。
    Foundation(u8),
    /// 山札 (Stock)。全部裏向き。
    Stock,
    /// 山札からめくったカードを置く場所 (Waste)。
    Waste,
}

impl StackType {
    /// 盤面の全ゾーン (場札7 + 組札4 + 山札 + 捨て札)。
    pub fn all() -> impl Iterator<Item = StackType> {
        (0..TABLEAU_COUNT as u8)
            .map(StackType::Tableau)
            .chain((0..FOUNDATION_COUNT as u8).map(StackType::Foundation))
            .chain([StackType::Stock, StackType::Waste])
    }

    pub fn is_tableau(self) -> bool {
        matches!(self, StackType::Tableau(_))
    }

    pub fn is_foundation(self) -> bool {
        matches!(self, StackType::Foundation(_))
    }

    /// 列番号・スロット番号が盤面の範囲内か。
    pub fn is_in_range(self) -> bool {
        match self {
            StackType::Tableau(index) => (index as usize) < TABLEAU_COUNT,
            StackType::Foundation(index) => (index as usize) < FOUNDATION_COUNT,
            StackType::Stock | StackType::Waste => true,
        }
    }

    /// インデックスが範囲外ならプログラムのバグなのでパニック！
    pub fn assert_in_range(self) {
        if self.is_in_range() {
            return;
        }
        match self {
            StackType::Tableau(index) => panic!("tableau index {} out of range (0..{})", index, TABLEAU_COUNT),
            StackType::Foundation(index) => {
                panic!("foundation index {} out of range (0..{})", index, FOUNDATION_COUNT)
            }
            StackType::Stock | StackType::Waste => {}
        }
    }
}

/// カードがどのゾーンの何番目にあるかを持つコンポーネントだよ。
/// `position_in_stack` は下から数えて 0 始まり。一番大きいのが「一番上 (top)」！
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackInfo {
    pub stack_type: StackType,
    pub position_in_stack: u8,
}

impl StackInfo {
    pub fn new(stack_type: StackType, position_in_stack: u8) -> Self {
        Self { stack_type, position_in_stack }
    }
}

impl Component for StackInfo {}
