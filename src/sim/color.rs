//! Player colours

/// Selectable character colours
pub const PALETTE: [(&str, u32); 12] = [
    ("Red", 0xff0000),
    ("Blue", 0x0000ff),
    ("Green", 0x00ff00),
    ("Pink", 0xff69b4),
    ("Orange", 0xffa500),
    ("Yellow", 0xffff00),
    ("Black", 0x000000),
    ("White", 0xffffff),
    ("Purple", 0x800080),
    ("Cyan", 0x00ffff),
    ("Lime", 0x32cd32),
    ("Brown", 0x8b4513),
];

/// Colours handed out to lobby players by index
pub const LOBBY_COLORS: [u32; 10] = [
    0xff0000, 0x0000ff, 0x00ff00, 0xff69b4, 0xffa500, 0xffff00, 0x000000, 0xffffff, 0x800080,
    0x00ffff,
];

/// Colours darker than this get an outline so they stay visible
pub const OUTLINE_THRESHOLD: f32 = 0.3;

pub fn available_colors() -> &'static [(&'static str, u32)] {
    &PALETTE
}

/// Lobby colour for the player at `index` (cycles)
pub fn lobby_color(index: usize) -> u32 {
    LOBBY_COLORS[index % LOBBY_COLORS.len()]
}

/// Perceived brightness in 0..=1
pub fn brightness(color: u32) -> f32 {
    let r = ((color >> 16) & 0xff) as f32;
    let g = ((color >> 8) & 0xff) as f32;
    let b = (color & 0xff) as f32;
    (0.299 * r + 0.587 * g + 0.114 * b) / 255.0
}

pub fn needs_outline(color: u32) -> bool {
    brightness(color) < OUTLINE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness() {
        assert_eq!(brightness(0x000000), 0.0);
        assert!((brightness(0xffffff) - 1.0).abs() < 1e-4);
        assert!(needs_outline(0x000000));
        assert!(needs_outline(0x0000ff));
        assert!(!needs_outline(0xffff00));
        // Purple sits just below the threshold
        assert!(needs_outline(0x800080));
    }

    #[test]
    fn test_color_cycles() {
        assert_eq!(lobby_color(0), 0xff0000);
        assert_eq!(lobby_color(10), 0xff0000);
        assert_eq!(lobby_color(9), 0x00ffff);
        assert_eq!(available_colors().len(), 12);
    }
}
