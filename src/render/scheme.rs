/// Number of entries in an expanded colour ramp.
pub const RAMP_LEN: usize = 256;

/// Named colour ramps for mapping density to colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scheme {
    /// Dark translucent red through orange and yellow to opaque white.
    #[default]
    AlphaFire,
    /// Blue, cyan, green, yellow, red; opaque except the faintest band.
    Classic,
}

// (position, straight rgba), positions strictly increasing from 0.0 to 1.0.
type Stop = (f32, [u8; 4]);

const ALPHA_FIRE_STOPS: &[Stop] = &[
    (0.0, [64, 0, 0, 16]),
    (0.25, [160, 16, 0, 96]),
    (0.5, [235, 90, 0, 170]),
    (0.75, [255, 200, 40, 225]),
    (1.0, [255, 255, 240, 255]),
];

const CLASSIC_STOPS: &[Stop] = &[
    (0.0, [0, 0, 160, 96]),
    (0.15, [0, 0, 255, 255]),
    (0.35, [0, 255, 255, 255]),
    (0.55, [0, 255, 0, 255]),
    (0.75, [255, 255, 0, 255]),
    (1.0, [255, 0, 0, 255]),
];

impl Scheme {
    fn stops(self) -> &'static [Stop] {
        match self {
            Self::AlphaFire => ALPHA_FIRE_STOPS,
            Self::Classic => CLASSIC_STOPS,
        }
    }

    pub fn ramp(self) -> ColorRamp {
        ColorRamp::from_stops(self.stops())
    }
}

/// A gradient expanded into a fixed lookup table. Index 0 is the coldest colour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorRamp {
    lut: [[u8; 4]; RAMP_LEN],
}

impl ColorRamp {
    fn from_stops(stops: &[Stop]) -> Self {
        let mut lut = [[0u8; 4]; RAMP_LEN];
        for (i, slot) in lut.iter_mut().enumerate() {
            let t = i as f32 / (RAMP_LEN - 1) as f32;
            *slot = interpolate(stops, t);
        }
        Self { lut }
    }

    /// Colour for a density in `[0, 1]`; out-of-range values are clamped.
    pub fn sample(&self, density: f32) -> [u8; 4] {
        let d = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        let idx = (d * (RAMP_LEN - 1) as f32).round() as usize;
        self.lut[idx.min(RAMP_LEN - 1)]
    }
}

fn interpolate(stops: &[Stop], t: f32) -> [u8; 4] {
    let Some(&(_, first)) = stops.first() else {
        return [0; 4];
    };
    let mut prev = (0.0, first);
    for &(pos, rgba) in stops {
        if t <= pos {
            let span = pos - prev.0;
            let f = if span > 0.0 { (t - prev.0) / span } else { 1.0 };
            let mut out = [0u8; 4];
            for (c, o) in out.iter_mut().enumerate() {
                let a = f32::from(prev.1[c]);
                let b = f32::from(rgba[c]);
                *o = (a + (b - a) * f).round().clamp(0.0, 255.0) as u8;
            }
            return out;
        }
        prev = (pos, rgba);
    }
    prev.1
}
