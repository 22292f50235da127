use core::ops::Mul;

use crate::coords::Vec2;

/// 3×3 homogeneous matrix for 2-D affine transforms.
///
/// Storage is row-major; points are column vectors, so `a * b` applies `b`
/// first. The builder methods ([`translate`](Self::translate),
/// [`rotate`](Self::rotate), [`scale`](Self::scale)) post-multiply, which means
/// `Mat3::identity().translate(..).rotate(..).scale(..)` applies the scale
/// first and the translation last.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3 {
    m: [[f64; 3]; 3],
}

impl Mat3 {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    #[inline]
    pub const fn translation(dx: f64, dy: f64) -> Self {
        Self {
            m: [[1.0, 0.0, dx], [0.0, 1.0, dy], [0.0, 0.0, 1.0]],
        }
    }

    /// Counter-clockwise rotation in a +Y-up frame.
    #[inline]
    pub fn rotation(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            m: [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    #[inline]
    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            m: [[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Maps the pixel rectangle `[0, width] × [0, height]` (origin top-left)
    /// onto clip space `[-1, 1]²`, flipping Y so pixel row 0 lands on clip +1.
    #[inline]
    pub fn projection(width: f64, height: f64) -> Self {
        Self {
            m: [
                [2.0 / width, 0.0, -1.0],
                [0.0, -2.0 / height, 1.0],
                [0.0, 0.0, 1.0],
            ],
        }
    }

    #[inline]
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        self * Self::translation(dx, dy)
    }

    #[inline]
    pub fn rotate(self, radians: f64) -> Self {
        self * Self::rotation(radians)
    }

    #[inline]
    pub fn scale(self, sx: f64, sy: f64) -> Self {
        self * Self::scaling(sx, sy)
    }

    pub fn multiply(self, rhs: Mat3) -> Self {
        let a = &self.m;
        let b = &rhs.m;
        let mut out = [[0.0f64; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = a[r][0] * b[0][c] + a[r][1] * b[1][c] + a[r][2] * b[2][c];
            }
        }
        Self { m: out }
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse via the adjugate. Returns `None` for singular or non-finite input.
    pub fn invert(&self) -> Option<Mat3> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let m = &self.m;
        let inv_det = 1.0 / det;

        let adj = [
            [
                m[1][1] * m[2][2] - m[1][2] * m[2][1],
                m[0][2] * m[2][1] - m[0][1] * m[2][2],
                m[0][1] * m[1][2] - m[0][2] * m[1][1],
            ],
            [
                m[1][2] * m[2][0] - m[1][0] * m[2][2],
                m[0][0] * m[2][2] - m[0][2] * m[2][0],
                m[0][2] * m[1][0] - m[0][0] * m[1][2],
            ],
            [
                m[1][0] * m[2][1] - m[1][1] * m[2][0],
                m[0][1] * m[2][0] - m[0][0] * m[2][1],
                m[0][0] * m[1][1] - m[0][1] * m[1][0],
            ],
        ];

        let mut out = [[0.0f64; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = adj[r][c] * inv_det;
            }
        }
        Some(Self { m: out })
    }

    /// Applies the matrix to `(p.x, p.y, 1)` and divides by the resulting `w`.
    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        let m = &self.m;
        let x = m[0][0] * p.x + m[0][1] * p.y + m[0][2];
        let y = m[1][0] * p.x + m[1][1] * p.y + m[1][2];
        let w = m[2][0] * p.x + m[2][1] * p.y + m[2][2];
        if w == 1.0 || w == 0.0 {
            Vec2::new(x, y)
        } else {
            Vec2::new(x / w, y / w)
        }
    }

    /// Element-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Mat3, eps: f64) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }

    /// Column-major layout with each column padded to 16 bytes, matching a
    /// WGSL `mat3x3<f32>` inside a uniform buffer.
    pub fn to_gpu_columns(&self) -> [[f32; 4]; 3] {
        let m = &self.m;
        [
            [m[0][0] as f32, m[1][0] as f32, m[2][0] as f32, 0.0],
            [m[0][1] as f32, m[1][1] as f32, m[2][1] as f32, 0.0],
            [m[0][2] as f32, m[1][2] as f32, m[2][2] as f32, 0.0],
        ]
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Mat3 {
    type Output = Mat3;
    #[inline]
    fn mul(self, rhs: Mat3) -> Mat3 {
        self.multiply(rhs)
    }
}
