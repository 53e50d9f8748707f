//! Walks the square cross-section of the cube's four vertical faces.
//!
//! A body ring on the cube side is a loop around the square `|x| <= 1, |z| <= 1`
//! at a fixed height. The loop starts just above the `+X` face midpoint and runs
//! counter to the `x -> z` rotation, the same direction the sphere ring's azimuth
//! grows in, so that index `j` on both sides lands in the same sector:
//!
//! ```text
//!  +X (upper half) -> corner(+X,+Z) -> +Z -> corner(-X,+Z) -> -X
//!  -> corner(-X,-Z) -> -Z -> corner(+X,-Z) -> +X (lower half)
//! ```

use std::f32::consts::FRAC_1_SQRT_2;

use crate::glm;

use super::SamplePoint;

/// distance between neighbouring samples along a side face, for resolution `n`
pub fn edge_step(n: usize) -> f32 {
    2.0 / (2 * n - 1) as f32
}

/// number of samples in one body ring, on both the sphere and the cube side
pub const fn body_ring_len(n: usize) -> usize {
    8 * n - 4
}

/// height of body ring `i`, stepping down from the top face
pub fn body_ring_height(n: usize, i: usize) -> f32 {
    1.0 - edge_step(n) * (1 + i) as f32
}

/// one straight run of samples along a face, or a single corner sample
#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    origin: [f32; 2],
    step: [f32; 2],
    count: usize,
    normal: [f32; 2],
}

impl Segment {
    fn face(origin: [f32; 2], step: [f32; 2], count: usize, normal: [f32; 2]) -> Self {
        Self {
            origin,
            step,
            count,
            normal,
        }
    }

    fn corner(x: f32, z: f32) -> Self {
        Self {
            origin: [x, z],
            step: [0.0, 0.0],
            count: 1,
            normal: [x * FRAC_1_SQRT_2, z * FRAC_1_SQRT_2],
        }
    }

    /// `(x, z)` of the `k`th sample of this segment
    fn at(&self, k: usize) -> [f32; 2] {
        let k = k as f32;
        [
            self.origin[0] + k * self.step[0],
            self.origin[1] + k * self.step[1],
        ]
    }
}

const SEGMENTS: usize = 9;

fn segments(n: usize) -> [Segment; SEGMENTS] {
    let dd = edge_step(n);
    let half = n - 1;
    let full = 2 * n - 2;

    [
        Segment::face([1.0, dd / 2.0], [0.0, dd], half, [1.0, 0.0]),
        Segment::corner(1.0, 1.0),
        Segment::face([1.0 - dd, 1.0], [-dd, 0.0], full, [0.0, 1.0]),
        Segment::corner(-1.0, 1.0),
        Segment::face([-1.0, 1.0 - dd], [0.0, -dd], full, [-1.0, 0.0]),
        Segment::corner(-1.0, -1.0),
        Segment::face([-1.0 + dd, -1.0], [dd, 0.0], full, [0.0, -1.0]),
        Segment::corner(1.0, -1.0),
        Segment::face([1.0, -1.0 + dd], [0.0, dd], half, [1.0, 0.0]),
    ]
}

/// Iterator over the cube-side samples of one body ring.
///
/// Yields exactly [`body_ring_len`] points.
#[derive(Debug, Clone)]
pub struct SideWalk {
    y: f32,
    segments: [Segment; SEGMENTS],
    segment: usize,
    step: usize,
    remaining: usize,
}

impl SideWalk {
    pub fn new(n: usize, y: f32) -> Self {
        let segments = segments(n);
        let remaining = segments.iter().map(|s| s.count).sum();
        debug_assert_eq!(remaining, body_ring_len(n));

        Self {
            y,
            segments,
            segment: 0,
            step: 0,
            remaining,
        }
    }
}

impl Iterator for SideWalk {
    type Item = SamplePoint;

    fn next(&mut self) -> Option<Self::Item> {
        // skip exhausted segments; faces are empty when n == 1
        while self.segment < SEGMENTS && self.step >= self.segments[self.segment].count {
            self.segment += 1;
            self.step = 0;
        }
        let seg = self.segments.get(self.segment)?;

        let [x, z] = seg.at(self.step);
        let [nx, nz] = seg.normal;
        self.step += 1;
        self.remaining -= 1;

        Some(SamplePoint {
            pos: glm::vec3(x, self.y, z),
            normal: glm::vec3(nx, 0.0, nz),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SideWalk {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn segment_counts_sum_to_ring_len() {
        for n in 1..64 {
            let total: usize = segments(n).iter().map(|s| s.count).sum();
            // two half faces, three full faces, four corners
            assert_eq!(2 * (n - 1) + 3 * (2 * n - 2) + 4, total);
            assert_eq!(body_ring_len(n), total);
            assert_eq!(body_ring_len(n), SideWalk::new(n, 0.0).count());
        }
    }

    #[test]
    fn walk_stays_on_the_side_faces() {
        for n in [1, 2, 3, 7, 60] {
            for p in SideWalk::new(n, 0.25) {
                let m = p.pos.x.abs().max(p.pos.z.abs());
                assert_relative_eq!(m, 1.0, epsilon = 1e-5);
                assert!(p.pos.x.abs() <= 1.0 + 1e-5);
                assert!(p.pos.z.abs() <= 1.0 + 1e-5);
                assert_eq!(p.pos.y, 0.25);
            }
        }
    }

    #[test]
    fn walk_is_symmetric_around_the_start() {
        let n = 5;
        let dd = edge_step(n);
        let pts: Vec<_> = SideWalk::new(n, 0.0).collect();

        let first = pts.first().unwrap();
        let last = pts.last().unwrap();
        assert_relative_eq!(first.pos.z, dd / 2.0, epsilon = 1e-6);
        assert_relative_eq!(last.pos.z, -dd / 2.0, epsilon = 1e-6);
        assert_eq!(first.pos.x, 1.0);
        assert_eq!(last.pos.x, 1.0);
    }

    #[test]
    fn corners_get_unit_diagonal_normals() {
        let n = 4;
        let corners: Vec<_> = SideWalk::new(n, 0.0)
            .filter(|p| p.pos.x.abs() == 1.0 && p.pos.z.abs() == 1.0)
            .collect();
        assert_eq!(corners.len(), 4);
        for c in corners {
            assert_relative_eq!(c.normal.magnitude(), 1.0, epsilon = 1e-6);
            assert_relative_eq!(c.normal.x, c.pos.x * FRAC_1_SQRT_2);
            assert_relative_eq!(c.normal.z, c.pos.z * FRAC_1_SQRT_2);
        }
    }

    #[test]
    fn unit_resolution_is_corners_only() {
        let pts: Vec<_> = SideWalk::new(1, 0.0).map(|p| (p.pos.x, p.pos.z)).collect();
        assert_eq!(
            pts,
            vec![(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)]
        );
    }

    #[test]
    fn ring_heights_are_symmetric() {
        let n = 6;
        let rings = 2 * n - 2;
        for i in 0..rings {
            let top = body_ring_height(n, i);
            let bottom = body_ring_height(n, rings - 1 - i);
            assert_relative_eq!(top, -bottom, epsilon = 1e-6);
            assert!(top.abs() < 1.0);
        }
    }
}
