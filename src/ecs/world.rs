// src/ecs/world.rs

// === Rust 標準ライブラリからのインポート ===
// Any / TypeId: コンポーネントストレージを型に関係なく保持するために使う。
use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::ecs::component::Component;
use crate::ecs::entity::Entity;

/// コンポーネントストレージとその操作をまとめた内部的な構造体だよ！✨
/// `World` の `component_stores` で型情報を隠蔽しつつ、
/// 型ごとの削除を安全に行えるようにするんだ。
struct ComponentStoreEntry {
    /// 実際のデータ (`HashMap<Entity, T>`) を `Box<dyn Any>` で型消去したもの。
    storage: Box<dyn Any>,
    /// `storage` から指定エンティティのコンポーネントを消すお掃除関数🧹
    remover: fn(&mut Box<dyn Any>, Entity),
}

/// ゲーム世界の全てのエンティティとコンポーネントを管理する中心的な構造体 (自作ECSのコア！)。
pub struct World {
    /// 現在生存しているエンティティIDのセット。
    entities: HashSet<Entity>,
    /// 次に生成するエンティティに割り当てるID。
    next_entity_id: usize,
    /// TypeId ごとのストレージ。
    component_stores: HashMap<TypeId, ComponentStoreEntry>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// 新しい空の World を作成するよ。
    pub fn new() -> Self {
        World {
            entities: HashSet::new(),
            next_entity_id: 0,
            component_stores: HashMap::new(),
        }
    }

    /// 新しいエンティティを生成して返す。ID は 0 からの連番！
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.insert(entity);
        debug!("World: created entity {}", entity);
        entity
    }

    /// 指定されたエンティティが存在するかどうか。
    pub fn is_entity_alive(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// 生きているエンティティの数。
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// エンティティを削除する。くっついていたコンポーネントも全種類お掃除されるよ！🧹
    ///
    /// 存在しないエンティティなら `false`。
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.entities.remove(&entity) {
            warn!("World: attempted to destroy non-existent entity {}", entity);
            return false;
        }
        for entry in self.component_stores.values_mut() {
            (entry.remover)(&mut entry.storage, entity);
        }
        debug!("World: destroyed entity {}", entity);
        true
    }

    /// 新しい型のコンポーネントを登録する。同じ型を二回登録しても何も起きないよ。
    pub fn register_component<T: Component>(&mut self) {
        let type_id = TypeId::of::<T>();
        if self.component_stores.contains_key(&type_id) {
            return;
        }
        debug!("World: registering component type {}", std::any::type_name::<T>());

        let remover: fn(&mut Box<dyn Any>, Entity) = |storage_any, entity| {
            if let Some(storage) = storage_any.downcast_mut::<HashMap<Entity, T>>() {
                storage.remove(&entity);
            } else {
                panic!(
                    "World: storage for {} has the wrong type in remover",
                    std::any::type_name::<T>()
                );
            }
        };

        let entry = ComponentStoreEntry {
            storage: Box::new(HashMap::<Entity, T>::new()),
            remover,
        };
        self.component_stores.insert(type_id, entry);
    }

    /// 型 T が登録済みかどうか。
    pub fn is_registered<T: Component>(&self) -> bool {
        self.component_stores.contains_key(&TypeId::of::<T>())
    }

    fn storage<T: Component>(&self) -> Option<&HashMap<Entity, T>> {
        self.component_stores
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.storage.downcast_ref::<HashMap<Entity, T>>())
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut HashMap<Entity, T>> {
        self.component_stores
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.storage.downcast_mut::<HashMap<Entity, T>>())
    }

    /// エンティティにコンポーネントを追加 (既にあれば上書き) する。
    ///
    /// # パニック
    /// `register_component::<T>()` を呼び忘れているとパニックするよ。
    /// 死んでいるエンティティへの追加は無視される。
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) {
        if !self.is_entity_alive(entity) {
            warn!("World: ignoring component for dead entity {}", entity);
            return;
        }
        match self.storage_mut::<T>() {
            Some(storage) => {
                storage.insert(entity, component);
            }
            None => panic!(
                "World: component type {} not registered! Call register_component first.",
                std::any::type_name::<T>()
            ),
        }
    }

    /// コンポーネントへの参照を取得する (読み取り専用)。
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>().and_then(|storage| storage.get(&entity))
    }

    /// コンポーネントへの可変参照を取得する。
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>().and_then(|storage| storage.get_mut(&entity))
    }

    /// コンポーネントを取り外して返す。
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.storage_mut::<T>().and_then(|storage| storage.remove(&entity))
    }

    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    /// 型 T のコンポーネントを持つ全エンティティを ID 順で返すよ。
    /// HashMap の反復順は毎回変わるので、ソートして結果を安定させてる！
    pub fn get_all_entities_with_component<T: Component>(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = match self.storage::<T>() {
            Some(storage) => storage
                .keys()
                .copied()
                .filter(|entity| self.entities.contains(entity))
                .collect(),
            None => Vec::new(),
        };
        entities.sort();
        entities
    }
}

#[cfg(test)]
#[path = "world_tests.rs"]
mod world_tests;
