use super::Vec3;

/// the corner positions of one triangle
#[derive(Debug)]
pub struct Tri {
    v: [Vec3; 3],
}

impl From<[Vec3; 3]> for Tri {
    fn from(value: [Vec3; 3]) -> Self {
        Self { v: value }
    }
}

impl Tri {
    /// normal scaled by twice the triangle's area, assuming a counter-clockwise
    /// winding order
    pub fn weighted_normal(&self) -> Vec3 {
        let v = &self.v;
        let edge1 = v[1] - v[0];
        let edge2 = v[2] - v[0];
        edge1.cross(&edge2)
    }
}
