use crate::config::LayoutConfig;
use crate::text_metrics;
use crate::theme::Theme;

/// Width of a caption's text at the theme font size.
pub(super) fn caption_text_width(text: &str, theme: &Theme, config: &LayoutConfig) -> f32 {
    let measured = if config.fast_text_metrics {
        None
    } else {
        text_metrics::measure_text_width(text, theme.font_size, &theme.font_family)
    };
    measured.unwrap_or_else(|| estimate_text_width(text, theme.font_size))
}

pub(super) fn estimate_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

// Average advances of a humanist sans at 1px, close enough for box sizing.
fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.306,
        '.' | ',' | ':' | ';' | '|' | '!' | '(' | ')' | '[' | ']' | '\'' => 0.321,
        'i' | 'j' | 'l' | 'I' => 0.25,
        'f' | 't' | 'r' => 0.34,
        'm' | 'w' => 0.84,
        'M' | 'W' => 0.93,
        '0'..='9' => 0.6,
        'a'..='z' => 0.56,
        'A'..='Z' => 0.68,
        '-' | '_' => 0.45,
        '@' => 1.0,
        _ if ch.is_ascii() => 0.55,
        _ => 0.9,
    }
}
