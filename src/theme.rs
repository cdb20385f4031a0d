// src/theme.rs
//! 見た目のテーマ🎨 (枠線スタイルと虹色アニメーション)。
//!
//! 手の処理には一切影響しない。セッションが持っていて、描画側が問い合わせるだけ。

use serde::{Deserialize, Serialize};

use crate::config::rules::{RAINBOW_WAVE_LENGTH, RAINBOW_WAVE_SPEED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Default,
    Ascii,
    Rainbow,
}

impl Theme {
    /// Default → Ascii → Rainbow → Default の順に切り替わる。
    pub fn next(self) -> Theme {
        match self {
            Theme::Default => Theme::Ascii,
            Theme::Ascii => Theme::Rainbow,
            Theme::Rainbow => Theme::Default,
        }
    }
}

/// カードの枠線の描き方。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderStyle {
    Rounded,
    Ascii,
    Heavy,
}

/// セッションごとのテーマ状態。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ThemeState {
    theme: Theme,
    /// 虹色アニメーションが始まってからの秒数
    rainbow_elapsed: f64,
}

impl ThemeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// 次のテーマへ。Rainbow に入るたびにアニメーションは最初から。
    pub fn change_theme(&mut self) -> Theme {
        self.theme = self.theme.next();
        self.rainbow_elapsed = 0.0;
        self.theme
    }

    /// 選択中のカードは必ず太枠。それ以外は ASCII テーマなら ASCII、ほかは角丸。
    pub fn border_style(&self, selected: bool) -> BorderStyle {
        if selected {
            return BorderStyle::Heavy;
        }
        match self.theme {
            Theme::Default | Theme::Rainbow => BorderStyle::Rounded,
            Theme::Ascii => BorderStyle::Ascii,
        }
    }

    /// Rainbow テーマのときだけアニメーションを進める (120Hz くらいで呼ばれる想定)。
    pub fn tick(&mut self, dt_seconds: f64) {
        if self.theme == Theme::Rainbow && dt_seconds > 0.0 {
            self.rainbow_elapsed += dt_seconds;
        }
    }

    /// 今のカード `count` 枚分の色。Rainbow 以外なら空っぽ。
    pub fn palette(&self, count: usize) -> Vec<String> {
        if self.theme != Theme::Rainbow {
            return Vec::new();
        }
        rainbow_palette(self.rainbow_elapsed, count)
    }
}

/// 色相環の `phase` (0.0..1.0) の位置の色を `#rrggbb` で返す。彩度 100%、明度 50%。
pub fn rainbow_color(phase: f64) -> String {
    let hue = (360.0 * phase.rem_euclid(1.0)).floor();
    let lightness = 0.5;
    let saturation = 1.0;

    let h = hue / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0_f64).abs()) * saturation;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_byte = |value: f64| ((value + m) * 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", to_byte(r), to_byte(g), to_byte(b))
}

/// 虹の波。カード i の位相は `elapsed * 速さ + (i / (count - 1)) * 波長`。
pub fn rainbow_palette(elapsed_seconds: f64, count: usize) -> Vec<String> {
    let denominator = count.saturating_sub(1).max(1) as f64;
    (0..count)
        .map(|i| {
            let position = i as f64 / denominator;
            rainbow_color((elapsed_seconds * RAINBOW_WAVE_SPEED + position * RAINBOW_WAVE_LENGTH) % 1.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_cycles_through_three_states() {
        let mut state = ThemeState::new();
        assert_eq!(state.theme(), Theme::Default);
        assert_eq!(state.change_theme(), Theme::Ascii);
        assert_eq!(state.change_theme(), Theme::Rainbow);
        assert_eq!(state.change_theme(), Theme::Default);
    }

    #[test]
    fn border_style_per_theme() {
        let mut state = ThemeState::new();
        assert_eq!(state.border_style(false), BorderStyle::Rounded);
        assert_eq!(state.border_style(true), BorderStyle::Heavy);
        state.change_theme();
        assert_eq!(state.border_style(false), BorderStyle::Ascii);
        assert_eq!(state.border_style(true), BorderStyle::Heavy);
        state.change_theme();
        assert_eq!(state.border_style(false), BorderStyle::Rounded);
    }

    #[test]
    fn rainbow_colors_follow_hue() {
        assert_eq!(rainbow_color(0.0), "#ff0000");
        assert_eq!(rainbow_color(0.25), "#7fff00");
        assert_eq!(rainbow_color(0.5), "#00ffff");
        println!("虹色テスト、成功！🌈");
    }

    #[test]
    fn palette_only_in_rainbow_theme() {
        let mut state = ThemeState::new();
        assert!(state.palette(52).is_empty());
        state.change_theme();
        state.change_theme();
        state.tick(0.5);
        let colors = state.palette(52);
        assert_eq!(colors.len(), 52);
        assert_eq!(colors[0], rainbow_color(0.1));
        assert_eq!(rainbow_palette(0.0, 1), vec![rainbow_color(0.0)]);
    }
}
