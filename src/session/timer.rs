// src/session/timer.rs

use serde::Serialize;

/// 経過時間カウンター⏱️
///
/// 外から `tick(dt)` で進める (ホスト側は 60Hz くらいで呼ぶ想定)。
/// 手の処理には一切関係ない、見るだけの値だよ。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElapsedTimer {
    elapsed_seconds: f64,
    running: bool,
}

impl Default for ElapsedTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl ElapsedTimer {
    /// 動いている状態で 0 秒から始まる。
    pub fn new() -> Self {
        Self { elapsed_seconds: 0.0, running: true }
    }

    /// 動いていれば `dt_seconds` 進める。負の値は無視。
    pub fn tick(&mut self, dt_seconds: f64) {
        if self.running && dt_seconds > 0.0 {
            self.elapsed_seconds += dt_seconds;
        }
    }

    /// 止める。勝ったときに呼ばれて、そこから先の tick は無視されるよ。
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }
}

/// `Time: 00:01:05.25` みたいな表示用の文字列。
pub fn format_elapsed(seconds: f64) -> String {
    let total = seconds.max(0.0);
    let hours = (total / 3600.0).floor();
    let minutes = ((total - hours * 3600.0) / 60.0).floor();
    let secs = total - hours * 3600.0 - minutes * 60.0;
    format!("Time: {:02}:{:02}:{:05.2}", hours as u64, minutes as u64, secs)
}
