// src/app/game_app.rs

use log::{error, info, warn};
use wasm_bindgen::prelude::*;

use crate::app::state_getter;
use crate::components::{Card, StackType};
use crate::config::rules::{DEFAULT_LEADERBOARD_LIMIT, RAINBOW_TICK_HZ, TIMER_TICK_HZ};
use crate::config::GameConfig;
use crate::ecs::Entity;
use crate::scores::{MemoryScoreStore, ScoreStore};
use crate::session::{ClickTarget, Session};

// --- ブラウザから使うゲーム全体のアプリケーション ---
// 中身は Session をひとつ持ってるだけ。JS とのやりとりは全部 JSON 文字列だよ。
#[wasm_bindgen]
pub struct GameApp {
    session: Session,
    scores: MemoryScoreStore,
    /// 前回 tick した時刻 (ms)。最初の tick までは None
    last_tick_ms: Option<f64>,
}

#[wasm_bindgen]
impl GameApp {
    /// モード選択画面で選んだ設定で新しいゲームを始める。
    #[wasm_bindgen(constructor)]
    pub fn new(easy_mode: bool, infinite_undo: bool) -> Self {
        info!("GameApp: 初期化中... (easy_mode: {}, infinite_undo: {})", easy_mode, infinite_undo);
        Self::with_config(GameConfig::new(easy_mode, infinite_undo))
    }

    /// `{"easy_mode": true, "seed": 42}` みたいな JSON の設定から作る。
    pub fn from_config_json(config_json: &str) -> Result<GameApp, JsValue> {
        let config = GameConfig::from_json(config_json).map_err(|e| {
            error!("GameApp: {}", e);
            JsValue::from_str(&e)
        })?;
        Ok(Self::with_config(config))
    }

    /// 同じ設定で配り直す。
    pub fn new_game(&mut self) {
        self.session.new_game();
        self.last_tick_ms = None;
    }

    /// カードのクリック。結果 (`MoveOutcome`) を JSON で返す。
    pub fn handle_card_click(&mut self, entity_id: usize) -> Result<String, JsValue> {
        let entity = Entity(entity_id);
        if !self.session.world().has_component::<Card>(entity) {
            warn!("GameApp: entity {} is not a card", entity);
            return Err(JsValue::from_str(&format!("entity {} is not a card", entity_id)));
        }
        let outcome = self.session.handle_click(ClickTarget::Card(entity));
        to_json(&outcome)
    }

    /// カードが無い場所のクリック。`stack_json` は `{"Tableau":3}` や `"Stock"` の形。
    pub fn handle_stack_click(&mut self, stack_json: &str) -> Result<String, JsValue> {
        let stack_type: StackType = serde_json::from_str(stack_json).map_err(|e| {
            let error_msg = format!("Invalid stack JSON '{}': {}", stack_json, e);
            error!("GameApp: {}", error_msg);
            JsValue::from_str(&error_msg)
        })?;
        if !stack_type.is_in_range() {
            return Err(JsValue::from_str(&format!("stack {:?} is out of range", stack_type)));
        }
        let outcome = self.session.handle_click(ClickTarget::Stack(stack_type));
        to_json(&outcome)
    }

    /// 一手戻す。結果 (`UndoOutcome`) を JSON で返す。
    pub fn undo(&mut self) -> Result<String, JsValue> {
        let outcome = self.session.undo();
        to_json(&outcome)
    }

    /// `requestAnimationFrame` などから呼ぶ。前回からの経過時間だけタイマーを進める。
    pub fn tick(&mut self) {
        let now_ms = js_sys::Date::now();
        if let Some(last_ms) = self.last_tick_ms {
            self.session.tick((now_ms - last_ms) / 1000.0);
        }
        self.last_tick_ms = Some(now_ms);
    }

    /// 経過秒数を直接渡して進める版。
    pub fn tick_seconds(&mut self, dt_seconds: f64) {
        self.session.tick(dt_seconds);
    }

    /// 次のテーマへ。新しいテーマ名の JSON を返す。
    pub fn change_theme(&mut self) -> Result<String, JsValue> {
        let theme = self.session.change_theme();
        to_json(&theme)
    }

    /// 盤面全体の JSON。
    pub fn get_state_json(&self) -> Result<String, JsValue> {
        state_getter::get_table_state_json(&self.session).map_err(|e| JsValue::from_str(&e))
    }

    /// たまったイベントを全部取り出して JSON 配列で返す。
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        let events = self.session.drain_events();
        to_json(&events)
    }

    /// クリア記録を保存する。名前が短すぎる・長すぎる、まだクリアしてない、はエラー。
    pub fn save_score(&mut self, player_name: &str) -> Result<(), JsValue> {
        self.session
            .submit_score(&mut self.scores, player_name)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// 上位 `limit` 件 (0 ならデフォルトの 10 件) の JSON。
    pub fn top_scores_json(&self, limit: usize) -> Result<String, JsValue> {
        let limit = if limit == 0 { DEFAULT_LEADERBOARD_LIMIT } else { limit };
        to_json(&self.scores.top(limit))
    }

    /// localStorage などに置いておいた記録を読み込む。
    pub fn load_scores_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.scores = MemoryScoreStore::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        info!("GameApp: loaded {} score records", self.scores.len());
        Ok(())
    }

    pub fn export_scores_json(&self) -> Result<String, JsValue> {
        self.scores.to_json().map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// 経過時間表示の更新間隔 (ms)。
    pub fn timer_interval_ms() -> f64 {
        1000.0 / TIMER_TICK_HZ
    }

    /// 虹色アニメーションの更新間隔 (ms)。
    pub fn rainbow_interval_ms() -> f64 {
        1000.0 / RAINBOW_TICK_HZ
    }
}

impl GameApp {
    fn with_config(config: GameConfig) -> Self {
        let session = Session::new(config);
        info!("GameApp: 初期化完了。");
        Self { session, scores: MemoryScoreStore::new(), last_tick_ms: None }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| {
        let error_msg = format!("Failed to serialize: {}", e);
        error!("GameApp: {}", error_msg);
        JsValue::from_str(&error_msg)
    })
}
