// src/ecs/entity.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity（エンティティ）は、ゲームに登場する「モノ」を表すただの識別子（ID）だよ！
///
/// このクレートでは 52 枚のカード 1 枚 1 枚と、ゲーム全体の状態を持つ特別なエンティティが
/// それぞれ Entity になるんだ。
/// 同じスート・同じランクのカードでも、クリックされた「その 1 枚」を区別できるのは
/// この ID のおかげ！✨
///
/// - PartialEq, Eq, PartialOrd, Ord, Hash: 比較したり HashMap のキーにしたり
/// - Clone, Copy: ただの数字なので気軽にコピー
/// - Serialize, Deserialize: JS 側に状態を渡すときに JSON にする
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Entity(pub usize);

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
