//! Color ramps shared by the window and the PNG export.

/// Plain RGB triple, converted to egui or plotters colors at draw time.
pub type Rgb = [u8; 3];

pub const OUTLINE: Rgb = [0, 0, 0];
pub const SINGLE_BAR: Rgb = [65, 171, 93];

/// Diverging red-yellow-green ramp, low to high sustainability.
const RED_YELLOW_GREEN: [Rgb; 11] = [
    [165, 0, 38],
    [215, 48, 39],
    [244, 109, 67],
    [253, 174, 97],
    [254, 224, 139],
    [255, 255, 191],
    [217, 239, 139],
    [166, 217, 106],
    [102, 189, 99],
    [26, 152, 80],
    [0, 104, 55],
];

/// Sequential yellow-green ramp used for region groups.
const YELLOW_GREEN: [Rgb; 9] = [
    [255, 255, 229],
    [247, 252, 185],
    [217, 240, 163],
    [173, 221, 142],
    [120, 198, 121],
    [65, 171, 93],
    [35, 132, 67],
    [0, 104, 55],
    [0, 69, 41],
];

fn sample(stops: &[Rgb], t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let pos = t * (stops.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = (lower + 1).min(stops.len() - 1);
    let frac = pos - lower as f64;

    let mut out = [0u8; 3];
    for (i, channel) in out.iter_mut().enumerate() {
        let a = stops[lower][i] as f64;
        let b = stops[upper][i] as f64;
        *channel = (a + (b - a) * frac).round() as u8;
    }
    out
}

/// Linear color scale from `min` to `max` over the red-yellow-green ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    /// Scale spanning the given values; `None` if there are none.
    pub fn spanning(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self { min: v, max: v }),
            Some(s) => Some(Self {
                min: s.min.min(v),
                max: s.max.max(v),
            }),
        })
    }

    /// Position of `value` in the scale, 0.0 at `min` and 1.0 at `max`.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            0.5
        } else {
            (value - self.min) / span
        }
    }

    pub fn color(&self, value: f64) -> Rgb {
        sample(&RED_YELLOW_GREEN, self.normalize(value))
    }

    /// Evenly spaced (value, color) pairs for drawing a legend strip.
    pub fn stops(&self, count: usize) -> Vec<(f64, Rgb)> {
        let count = count.max(2);
        (0..count)
            .map(|i| {
                let t = i as f64 / (count - 1) as f64;
                let value = self.min + (self.max - self.min) * t;
                (value, sample(&RED_YELLOW_GREEN, t))
            })
            .collect()
    }
}

/// `n` distinct colors from the yellow-green ramp, skipping the palest end.
pub fn group_colors(n: usize) -> Vec<Rgb> {
    (0..n)
        .map(|i| sample(&YELLOW_GREEN, (i + 1) as f64 / n as f64 * 0.85 + 0.15))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_ends_map_to_ramp_ends() {
        let scale = ColorScale { min: 0.2, max: 0.8 };
        assert_eq!(scale.color(0.2), RED_YELLOW_GREEN[0]);
        assert_eq!(scale.color(0.8), RED_YELLOW_GREEN[10]);
        assert_eq!(scale.color(0.5), RED_YELLOW_GREEN[5]);
    }

    #[test]
    fn out_of_range_values_clamp_to_ramp_ends() {
        let scale = ColorScale { min: 0.0, max: 1.0 };
        assert_eq!(scale.color(-3.0), RED_YELLOW_GREEN[0]);
        assert_eq!(scale.color(1.4), RED_YELLOW_GREEN[10]);
    }

    #[test]
    fn spanning_finds_bounds() {
        let scale = ColorScale::spanning([0.4, 0.1, 0.9]).unwrap();
        assert_eq!(scale, ColorScale { min: 0.1, max: 0.9 });
        assert!(ColorScale::spanning(std::iter::empty()).is_none());
    }

    #[test]
    fn flat_scale_uses_the_middle() {
        let scale = ColorScale { min: 0.5, max: 0.5 };
        assert_eq!(scale.normalize(0.5), 0.5);
    }

    #[test]
    fn group_colors_are_distinct() {
        let colors = group_colors(5);
        assert_eq!(colors.len(), 5);
        for pair in colors.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }
}
