//! Sphere-to-cube morph point cloud.
//!
//! [`generate`] samples a sphere in latitude rings and pairs every sample with a
//! point on the surface of the unit cube, so that blending each pair linearly
//! turns the sphere into the cube. The rings fall into three bands:
//!
//! - top cap: `n` rings of `8i + 4` points, projected onto the `y = 1` face
//! - body: `2n - 2` rings of `8n - 4` points, walked around the side faces
//! - bottom cap: the top cap mirrored onto the `y = -1` face
//!
//! The sphere circumscribes the cube, so every cube corner lies on it.

mod side;

use std::f32::consts::PI;

use crate::glm::{self, Vec3};

pub use side::{body_ring_height, body_ring_len, SideWalk};

/// number of `f32`s one [`MorphVertex`] occupies in the vertex buffer
pub const FLOATS_PER_RECORD: usize = 12;

/// largest resolution accepted from configuration
pub const MAX_RESOLUTION: u32 = 1024;

/// radius of the sphere through the corners of the unit cube
pub fn sphere_radius() -> f32 {
    3.0f32.sqrt()
}

/// a position with its normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub pos: Vec3,
    pub normal: Vec3,
}

/// One paired sample: where a point sits on the sphere and where it sits on the cube.
///
/// Field order is the vertex attribute order.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct MorphVertex {
    pub sphere_pos: [f32; 3],
    pub sphere_normal: [f32; 3],
    pub cube_pos: [f32; 3],
    pub cube_normal: [f32; 3],
}

impl MorphVertex {
    fn new(sphere: SamplePoint, cube: SamplePoint) -> Self {
        Self {
            sphere_pos: sphere.pos.into(),
            sphere_normal: sphere.normal.into(),
            cube_pos: cube.pos.into(),
            cube_normal: cube.normal.into(),
        }
    }

    pub fn sphere(&self) -> SamplePoint {
        SamplePoint {
            pos: self.sphere_pos.into(),
            normal: self.sphere_normal.into(),
        }
    }

    pub fn cube(&self) -> SamplePoint {
        SamplePoint {
            pos: self.cube_pos.into(),
            normal: self.cube_normal.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Top,
    Body,
    Bottom,
}

/// where one latitude ring lives in the record list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring {
    pub band: Band,
    pub index: usize,
    pub start: usize,
    pub len: usize,
}

/// points in cap ring `i`
pub const fn cap_ring_len(i: usize) -> usize {
    8 * i + 4
}

/// total number of records generated for `resolution`
///
/// both caps hold `sum(8i + 4) = 4n^2` points, the body `(2n - 2)(8n - 4)`
pub const fn point_count(resolution: u32) -> usize {
    let n = resolution as usize;
    2 * 4 * n * n + (2 * n - 2) * body_ring_len(n)
}

/// The generated point cloud. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphGeometry {
    resolution: u32,
    records: Vec<MorphVertex>,
    rings: Vec<Ring>,
}

impl MorphGeometry {
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn records(&self) -> &[MorphVertex] {
        &self.records
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// records of ring `index` in `band`
    pub fn ring(&self, band: Band, index: usize) -> Option<&[MorphVertex]> {
        self.rings
            .iter()
            .find(|r| r.band == band && r.index == index)
            .map(|r| &self.records[r.start..r.start + r.len])
    }

    pub fn sphere_points(&self) -> impl Iterator<Item = SamplePoint> + '_ {
        self.records.iter().map(MorphVertex::sphere)
    }

    pub fn cube_points(&self) -> impl Iterator<Item = SamplePoint> + '_ {
        self.records.iter().map(MorphVertex::cube)
    }

    /// flat `[sphere_pos, sphere_normal, cube_pos, cube_normal]*` float stream
    pub fn interleaved(&self) -> Vec<f32> {
        let mut ret = Vec::with_capacity(self.records.len() * FLOATS_PER_RECORD);
        for r in &self.records {
            ret.extend_from_slice(&r.sphere_pos);
            ret.extend_from_slice(&r.sphere_normal);
            ret.extend_from_slice(&r.cube_pos);
            ret.extend_from_slice(&r.cube_normal);
        }
        ret
    }
}

/// accumulates rings of paired samples in buffer order
struct Builder {
    radius: f32,
    records: Vec<MorphVertex>,
    rings: Vec<Ring>,
}

impl Builder {
    fn with_capacity(points: usize) -> Self {
        Self {
            radius: sphere_radius(),
            records: Vec::with_capacity(points),
            rings: Vec::new(),
        }
    }

    /// Adds one ring whose sphere side sits at polar angle `phi` and whose cube side
    /// comes from `cube`, called once per sphere sample in azimuth order.
    fn ring(
        &mut self,
        band: Band,
        index: usize,
        len: usize,
        phi: f32,
        mut cube: impl FnMut(&SamplePoint) -> SamplePoint,
    ) {
        let start = self.records.len();
        for j in 0..len {
            let unit = sphere_sample(phi, azimuth(j, len));
            let c = cube(&unit);
            let sphere = SamplePoint {
                pos: unit.pos * self.radius,
                normal: unit.normal,
            };
            self.records.push(MorphVertex::new(sphere, c));
        }
        log::trace!("{band:?} ring {index}: {len} points at phi {phi}");
        self.rings.push(Ring {
            band,
            index,
            start,
            len,
        });
    }
}

/// `theta_j`, offset half a step so no sample sits on the x axis
fn azimuth(j: usize, count: usize) -> f32 {
    2.0 * PI * (j as f32 + 0.5) / count as f32
}

/// unit sphere sample, y up
fn sphere_sample(phi: f32, theta: f32) -> SamplePoint {
    let s = phi.sin();
    let pos = glm::vec3(s * theta.cos(), phi.cos(), s * theta.sin());
    SamplePoint { pos, normal: pos }
}

/// Projects a unit sphere point of a cap onto the horizontal face `y = face`.
///
/// The point keeps its azimuth; its square "radius" `max(|x|, |z|)` on the face
/// becomes `tan(phi)`, which reaches 1 on the last cap ring. `p.y` is never zero
/// for cap rings.
fn cap_projection(p: &Vec3, face: f32) -> SamplePoint {
    let u = p.x / p.y;
    let v = p.z / p.y;
    let k = face * u.hypot(v) / u.abs().max(v.abs());
    SamplePoint {
        pos: glm::vec3(k * u, face, k * v),
        normal: glm::vec3(0.0, face, 0.0),
    }
}

/// Builds the morph point cloud for `resolution`.
///
/// Deterministic: the same resolution always yields bit-identical records.
///
/// # Panics
///
/// if `resolution` is zero
pub fn generate(resolution: u32) -> MorphGeometry {
    assert!(resolution > 0, "morph resolution must be positive");

    let n = resolution as usize;
    let delta_phi = PI / (4 * n - 2) as f32;
    let mut builder = Builder::with_capacity(point_count(resolution));

    for i in 0..n {
        let phi = delta_phi / 2.0 + i as f32 * delta_phi;
        builder.ring(Band::Top, i, cap_ring_len(i), phi, |p| {
            cap_projection(&p.pos, 1.0)
        });
    }

    for i in 0..2 * n - 2 {
        let phi = delta_phi / 2.0 + (n + i) as f32 * delta_phi;
        let mut walk = SideWalk::new(n, body_ring_height(n, i));
        debug_assert_eq!(walk.len(), body_ring_len(n));
        builder.ring(Band::Body, i, body_ring_len(n), phi, |_| {
            walk.next().expect("side walk yields one point per ring sample")
        });
    }

    for i in 0..n {
        let phi = PI - delta_phi / 2.0 - i as f32 * delta_phi;
        builder.ring(Band::Bottom, i, cap_ring_len(i), phi, |p| {
            cap_projection(&p.pos, -1.0)
        });
    }

    let Builder { records, rings, .. } = builder;
    debug_assert_eq!(records.len(), point_count(resolution));
    log::debug!(
        "generated morph geometry: resolution {resolution}, {} points in {} rings",
        records.len(),
        rings.len()
    );

    MorphGeometry {
        resolution,
        records,
        rings,
    }
}
