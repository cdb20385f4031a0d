// src/app/mod.rs
//! ブラウザ (JS) 側との窓口。GameApp と、描画用の状態 JSON を作るモジュールだよ！

pub mod game_app;
pub mod state_getter;

pub use game_app::GameApp;
