//! Label helpers for the on-screen feedback messages.

/// Speed indicator text, e.g. `Speed: 1.25x` or `Speed: 2x`.
pub fn speed_label(rate: f64) -> String {
    format!("Speed: {rate}x")
}

/// Volume feedback text with the level rounded to a whole percent.
pub fn volume_label(volume: f64) -> String {
    format!("Volume: {}%", (volume * 100.0).round() as i64)
}

/// Seek feedback text such as `+5s` or `-5s`.
pub fn seek_label(delta_secs: f64) -> String {
    if delta_secs >= 0.0 {
        format!("+{delta_secs}s")
    } else {
        format!("{delta_secs}s")
    }
}

pub fn mute_label(muted: bool) -> &'static str {
    if muted {
        "Muted"
    } else {
        "Unmuted"
    }
}

/// Strip the `Now playing:` prefix the page puts in front of the track title.
pub fn clean_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let title = trimmed
        .strip_prefix("Now playing:")
        .unwrap_or(trimmed)
        .trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_label_drops_trailing_zero() {
        assert_eq!(speed_label(1.0), "Speed: 1x");
        assert_eq!(speed_label(0.25), "Speed: 0.25x");
        assert_eq!(speed_label(1.75), "Speed: 1.75x");
    }

    #[test]
    fn volume_label_rounds() {
        assert_eq!(volume_label(0.5), "Volume: 50%");
        assert_eq!(volume_label(0.30000000000000004), "Volume: 30%");
        assert_eq!(volume_label(1.0), "Volume: 100%");
    }

    #[test]
    fn seek_label_signs() {
        assert_eq!(seek_label(5.0), "+5s");
        assert_eq!(seek_label(-5.0), "-5s");
    }

    #[test]
    fn clean_title_strips_prefix() {
        assert_eq!(
            clean_title("  Now playing:  song.mp3 \n").as_deref(),
            Some("song.mp3")
        );
        assert_eq!(clean_title("movie.mkv").as_deref(), Some("movie.mkv"));
        assert_eq!(clean_title("Now playing:   "), None);
    }
}
