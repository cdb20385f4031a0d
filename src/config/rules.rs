// src/config/rules.rs
//! クロンダイクのルールに関する定数を定義するよ！
//! 列の数、山札から何枚めくるか、アンドゥの回数など。

pub const DECK_SIZE: usize = 52; // 標準デッキの枚数
pub const TABLEAU_COUNT: usize = 7; // 場札の列数
pub const FOUNDATION_COUNT: usize = 4; // 組札のスロット数
pub const STOCK_SIZE_AFTER_DEAL: usize = DECK_SIZE - 28; // 1+2+...+7 を配った残り

pub const HARD_DRAW_COUNT: usize = 3; // ハードモードで一度にめくる最大枚数
pub const EASY_DRAW_COUNT: usize = 1; // イージーモードは 1 枚ずつ
pub const HARD_WASTE_VISIBLE: usize = 3; // ハードモードで表に見えている捨て札の枚数
pub const EASY_WASTE_VISIBLE: usize = 1;
pub const SELECTABLE_WASTE_DEPTH: usize = 1; // 見えている捨て札のうち、選べるのは一番上だけ

pub const MAX_UNDO: u32 = 3; // 通常モードのアンドゥ回数
pub const INFINITE_UNDO_BUDGET: u32 = 9999; // 「無限」アンドゥの番兵値。1 ゲームで使い切ることはない

pub const TIMER_TICK_HZ: f64 = 60.0; // 経過時間表示の更新頻度
pub const RAINBOW_TICK_HZ: f64 = 120.0; // レインボーテーマの色更新頻度
pub const RAINBOW_WAVE_SPEED: f64 = 0.2; // 1 秒で色相環を何周するか
pub const RAINBOW_WAVE_LENGTH: f64 = 0.2; // 端から端のカードまでの位相差

pub const PLAYER_NAME_MIN_LEN: usize = 4; // スコア登録時の名前の長さ
pub const PLAYER_NAME_MAX_LEN: usize = 16;
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;
