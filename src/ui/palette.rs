use ratatui::style::Color;
use std::str::FromStr;

// 終端機沒有內建名稱的常見顏色
const EXTRA_COLORS: [(&str, Color); 9] = [
    ("grey", Color::Gray),
    ("orange", Color::Rgb(255, 165, 0)),
    ("purple", Color::Rgb(128, 0, 128)),
    ("violet", Color::Rgb(238, 130, 238)),
    ("pink", Color::Rgb(255, 192, 203)),
    ("brown", Color::Rgb(165, 42, 42)),
    ("beige", Color::Rgb(245, 245, 220)),
    ("turquoise", Color::Rgb(64, 224, 208)),
    ("navy", Color::Rgb(0, 0, 128)),
];

/// 顏色名稱 → 終端機顏色；無法辨識時回傳 `None`
pub fn parse_color(name: &str) -> Option<Color> {
    let normalized: String = name
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect();

    if let Some((_, color)) = EXTRA_COLORS.iter().find(|(known, _)| *known == normalized) {
        return Some(*color);
    }
    Color::from_str(&normalized).ok()
}

/// 在指定底色上可讀的前景色
pub fn contrast_fg(background: Color) -> Color {
    match background {
        Color::Rgb(r, g, b) => {
            let luminance = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
            if luminance < 140.0 {
                Color::White
            } else {
                Color::Black
            }
        }
        Color::Black
        | Color::Red
        | Color::Green
        | Color::Blue
        | Color::Magenta
        | Color::DarkGray => Color::White,
        _ => Color::Black,
    }
}
