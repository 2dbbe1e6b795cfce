/// Perlin-noise terrain, an alternative to the cave automaton.
///
/// Uses the classic fixed permutation table, so the output depends only on
/// the parameters: no RNG is involved.
use crate::cave::TileGrid;
use crate::config::NoiseParams;
use crate::entities::Tile;

/// Ken Perlin's canonical 256-entry permutation, indexed modulo 256.
#[rustfmt::skip]
const PERM: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

fn perm(i: usize) -> usize {
    PERM[i & 255] as usize
}

fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product with one of four diagonal gradients.
fn grad(hash: usize, x: f64, y: f64) -> f64 {
    match hash & 3 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        _ => -x - y,
    }
}

/// Single-octave 2D Perlin noise.
pub fn perlin2d(x: f64, y: f64) -> f64 {
    let xi = (x.floor() as i64 & 255) as usize;
    let yi = (y.floor() as i64 & 255) as usize;
    let xf = x - x.floor();
    let yf = y - y.floor();

    let bl = perm(perm(xi) + yi);
    let br = perm(perm(xi + 1) + yi);
    let tl = perm(perm(xi) + yi + 1);
    let tr = perm(perm(xi + 1) + yi + 1);

    let u = fade(xf);
    let v = fade(yf);

    let bottom = lerp(grad(bl, xf, yf), grad(br, xf - 1.0, yf), u);
    let top = lerp(grad(tl, xf, yf - 1.0), grad(tr, xf - 1.0, yf - 1.0), u);
    lerp(bottom, top, v)
}

/// Sum of `octaves` layers, normalised by total amplitude.
pub fn fractal_perlin2d(x: f64, y: f64, octaves: u32, persistence: f64) -> f64 {
    let mut total = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;
    let mut max_value = 0.0;
    for _ in 0..octaves {
        total += perlin2d(x * frequency, y * frequency) * amplitude;
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= 2.0;
    }
    if max_value == 0.0 {
        0.0
    } else {
        total / max_value
    }
}

#[derive(Clone, Copy, Debug)]
pub struct NoiseGrid {
    pub params: NoiseParams,
}

impl NoiseGrid {
    pub fn new(params: NoiseParams) -> Self {
        Self { params }
    }

    pub fn generate(&self, width: usize, height: usize) -> TileGrid {
        let p = self.params;
        let mut grid = TileGrid::filled(width, height, Tile::Floor);
        for ty in 0..height {
            for tx in 0..width {
                let n = fractal_perlin2d(tx as f64 * p.scale, ty as f64 * p.scale, p.octaves, p.persistence);
                if n < p.wall_below {
                    grid.set(tx, ty, Tile::Wall);
                }
            }
        }
        grid.force_border_walls();
        grid
    }
}
