// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

// 自分で作ったモジュールたち！ これでコードを整理してるんだ。
pub mod app;
pub mod components;
pub mod config;
pub mod ecs;
pub mod logger;
pub mod logic;
pub mod scores;
pub mod session;
pub mod systems;
pub mod theme;

pub use app::GameApp;
pub use config::GameConfig;
pub use logic::outcome::{MoveOutcome, RejectReason, UndoOutcome};
pub use session::{ClickTarget, Session, SessionEvent};

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
#[wasm_bindgen(start)]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
    if logger::init().is_ok() {
        log::info!("Panic hook and logger set!");
    }
}
