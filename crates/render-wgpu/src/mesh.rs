use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Face normal and its corners in counter-clockwise order as seen from
/// outside: bottom-left, bottom-right, top-right, top-left.
type Face = ([f32; 3], [[f32; 3]; 4]);

const P: f32 = 0.5;

#[rustfmt::skip]
const FACES: [Face; 6] = [
    ([0.0, 0.0, 1.0],  [[-P, -P,  P], [ P, -P,  P], [ P,  P,  P], [-P,  P,  P]]),
    ([0.0, 0.0, -1.0], [[ P, -P, -P], [-P, -P, -P], [-P,  P, -P], [ P,  P, -P]]),
    ([1.0, 0.0, 0.0],  [[ P, -P,  P], [ P, -P, -P], [ P,  P, -P], [ P,  P,  P]]),
    ([-1.0, 0.0, 0.0], [[-P, -P, -P], [-P, -P,  P], [-P,  P,  P], [-P,  P, -P]]),
    ([0.0, 1.0, 0.0],  [[-P,  P,  P], [ P,  P,  P], [ P,  P, -P], [-P,  P, -P]]),
    ([0.0, -1.0, 0.0], [[-P, -P, -P], [ P, -P, -P], [ P, -P,  P], [-P, -P,  P]]),
];

/// Texture coordinates with v growing upward; textures are flipped on load
/// to match.
const CORNER_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Unit cube with per-face normals and UVs, 24 vertices and 36 indices.
pub(crate) fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in FACES {
        let base = vertices.len() as u16;
        for (position, uv) in corners.into_iter().zip(CORNER_UVS) {
            vertices.push(Vertex {
                position,
                normal,
                uv,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn sizes() {
        let (vertices, indices) = cube_mesh();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }

    #[test]
    fn triangles_wind_counter_clockwise_from_outside() {
        let (vertices, indices) = cube_mesh();
        for tri in indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(vertices[i as usize].position));
            let winding = (b - a).cross(c - a).normalize();
            let normal = Vec3::from(vertices[tri[0] as usize].normal);
            assert!((winding - normal).length() < 1e-5, "{winding} vs {normal}");
        }
    }

    #[test]
    fn corners_lie_on_their_face() {
        let (vertices, _) = cube_mesh();
        for v in &vertices {
            let offset = Vec3::from(v.position).dot(Vec3::from(v.normal));
            assert!((offset - 0.5).abs() < 1e-6);
        }
    }
}
