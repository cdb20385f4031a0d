// src/ecs/system.rs

use crate::ecs::world::World;

/// System（システム）トレイトだよ！
///
/// システムはゲームのロジック（ルールや振る舞い）を実行する役割。
/// `run` は World の中のコンポーネントを読んだり書き換えたりするよ。
/// 今は勝利判定みたいに「毎手ごとに無条件で走らせたい」ものがこれを実装してる。
pub trait System {
    fn run(&mut self, world: &mut World);
}
