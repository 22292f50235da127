use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random points spread over a `width` × `height` area with packed 0xRRGGBB colors.
pub struct DemoData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub colors: Vec<u32>,
}

impl DemoData {
    pub fn generate(count: usize, width: f64, height: f64, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut x = Vec::with_capacity(count);
        let mut y = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        for _ in 0..count {
            x.push(rng.gen_range(0.0..width.max(1.0)));
            y.push(rng.gen_range(0.0..height.max(1.0)));
            colors.push(rng.gen_range(0..=0xFF_FFFF));
        }

        Self { x, y, colors }
    }
}
