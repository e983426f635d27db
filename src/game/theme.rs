use ratatui::style::Color;
use std::fmt;

/// Color scheme used for drawing the snake
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Theme {
    /// Green, fading from the head towards the tail
    #[default]
    Classic,

    /// Cycling hues along the body, shifting every frame.  Temporary; see
    /// [`crate::consts::RAINBOW_DURATION`].
    Rainbow,
}

impl Theme {
    /// Degrees of hue between consecutive segments in the rainbow theme
    const RAINBOW_SEGMENT_SHIFT: u64 = 24;

    /// Degrees of hue the rainbow theme shifts per frame
    const RAINBOW_FRAME_SHIFT: u64 = 6;

    /// Amount of green lost per segment in the classic theme
    const CLASSIC_FADE_STEP: usize = 8;

    /// Minimum amount of green in the classic theme
    const CLASSIC_MIN_GREEN: u8 = 112;

    /// Return the color of the snake segment at `index` (0 being the head)
    /// as of the given frame
    pub(crate) fn segment_color(self, index: usize, frame: u64) -> Color {
        match self {
            Theme::Classic => {
                let fade = u8::try_from(index.saturating_mul(Self::CLASSIC_FADE_STEP))
                    .unwrap_or(u8::MAX);
                let green = u8::MAX.saturating_sub(fade).max(Self::CLASSIC_MIN_GREEN);
                Color::Rgb(32, green, 32)
            }
            Theme::Rainbow => {
                let index = u64::try_from(index).unwrap_or(u64::MAX);
                let hue = index
                    .wrapping_mul(Self::RAINBOW_SEGMENT_SHIFT)
                    .wrapping_add(frame.wrapping_mul(Self::RAINBOW_FRAME_SHIFT))
                    % 360;
                hue_to_rgb(u16::try_from(hue).unwrap_or(0))
            }
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Rainbow => "RAINBOW!",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Convert a hue in degrees to a fully-saturated, full-brightness color
fn hue_to_rgb(hue: u16) -> Color {
    let hue = hue % 360;
    let rising = u8::try_from(u32::from(hue % 60) * 255 / 60).unwrap_or(u8::MAX);
    let falling = u8::MAX - rising;
    match hue / 60 {
        0 => Color::Rgb(255, rising, 0),
        1 => Color::Rgb(falling, 255, 0),
        2 => Color::Rgb(0, 255, rising),
        3 => Color::Rgb(0, falling, 255),
        4 => Color::Rgb(rising, 0, 255),
        _ => Color::Rgb(255, 0, falling),
    }
}
