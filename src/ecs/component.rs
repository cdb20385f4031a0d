// src/ecs/component.rs

/// Component（コンポーネント）トレイトだよ！
///
/// 構造体がエンティティにくっつけられる「データ部品」であることを示すマーカー。
/// 中身は空でOK！ `World::register_component` で登録した型だけが使えるよ。
/// `Debug` はログに出すため、`'static` は `Any` で型消去して保存するために必要！
pub trait Component: std::fmt::Debug + 'static {}
