use glam::{Mat4, Vec3};

use crate::view::RenderView;

/// World positions of the ten demo cubes.
pub const CUBE_POSITIONS: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

/// Axis every cube is tilted around (normalised before use).
pub const ROTATION_AXIS: Vec3 = Vec3::new(1.0, 0.3, 0.5);

/// Degrees of tilt added per cube index.
const ANGLE_STEP: f32 = 20.0;

/// One placed unit cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeInstance {
    pub position: Vec3,
    pub angle_degrees: f32,
}

impl CubeInstance {
    /// Translate, then rotate about [`ROTATION_AXIS`].
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_axis_angle(ROTATION_AXIS.normalize(), self.angle_degrees.to_radians())
    }
}

/// Spotlight attached to the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    /// Cosine of the cone half-angle.
    pub cut_off: f32,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for SpotLight {
    fn default() -> Self {
        let color = Vec3::ONE;
        Self {
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            cut_off: 12.5_f32.to_radians().cos(),
            ambient: color * 0.3,
            diffuse: color,
            specular: Vec3::ONE,
        }
    }
}

impl SpotLight {
    /// Place the light at the viewer, pointing where the viewer looks.
    pub fn follow(&mut self, view: &RenderView) {
        self.position = view.eye;
        self.direction = view.direction;
    }

    /// Whether `point` falls inside the cone (ignores attenuation).
    pub fn illuminates(&self, point: Vec3) -> bool {
        let to_point = (point - self.position).normalize_or_zero();
        to_point.dot(self.direction) > self.cut_off
    }
}

/// Surface parameters shared by every cube. The diffuse and specular maps
/// are bound by the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self { shininess: 16.0 }
    }
}

/// Everything drawn in a frame apart from the camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub cubes: Vec<CubeInstance>,
    pub light: SpotLight,
    pub material: Material,
    pub clear_color: [f64; 4],
}

impl Default for Scene {
    fn default() -> Self {
        let cubes = CUBE_POSITIONS
            .iter()
            .enumerate()
            .map(|(i, &position)| CubeInstance {
                position,
                angle_degrees: ANGLE_STEP * i as f32,
            })
            .collect();
        Self {
            cubes,
            light: SpotLight::default(),
            material: Material::default(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl Scene {
    /// Per-frame update: re-aim the flashlight.
    pub fn update(&mut self, view: &RenderView) {
        self.light.follow(view);
        tracing::trace!(
            eye = %view.eye,
            lit = self.lit_cubes().count(),
            "flashlight moved"
        );
    }

    /// Cubes whose centre lies inside the flashlight cone.
    pub fn lit_cubes(&self) -> impl Iterator<Item = &CubeInstance> + '_ {
        self.cubes
            .iter()
            .filter(|cube| self.light.illuminates(cube.position))
    }

    pub fn model_matrices(&self) -> impl Iterator<Item = Mat4> + '_ {
        self.cubes.iter().map(CubeInstance::model_matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeview_camera::Camera;

    #[test]
    fn default_scene_layout() {
        let scene = Scene::default();
        assert_eq!(scene.cubes.len(), 10);
        assert_eq!(scene.cubes[0].angle_degrees, 0.0);
        assert_eq!(scene.cubes[9].angle_degrees, 180.0);
        assert_eq!(scene.cubes[3].position, Vec3::new(-3.8, -2.0, -12.3));
        assert_eq!(scene.material.shininess, 16.0);
        assert_eq!(scene.clear_color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn first_cube_is_identity() {
        let scene = Scene::default();
        let model = scene.model_matrices().next().unwrap();
        assert!(model.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn model_matrix_translates_origin_to_position() {
        let cube = CubeInstance {
            position: Vec3::new(2.0, 5.0, -15.0),
            angle_degrees: 20.0,
        };
        let origin = cube.model_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - cube.position).length() < 1e-5);
    }

    #[test]
    fn rotation_keeps_axis_fixed() {
        let cube = CubeInstance {
            position: Vec3::ZERO,
            angle_degrees: 60.0,
        };
        let axis = ROTATION_AXIS.normalize();
        let moved = cube.model_matrix().transform_vector3(axis);
        assert!((moved - axis).length() < 1e-5);
    }

    #[test]
    fn spotlight_defaults() {
        let light = SpotLight::default();
        assert!((light.cut_off - 0.976_296).abs() < 1e-5);
        assert_eq!(light.ambient, Vec3::splat(0.3));
        assert_eq!(light.diffuse, Vec3::ONE);
    }

    #[test]
    fn flashlight_follows_camera() {
        let mut cam = Camera::new();
        cam.process_mouse_movement(300.0, -100.0);
        let view = RenderView::from_camera(&cam, 1920, 1080);
        let mut scene = Scene::default();
        scene.update(&view);
        assert_eq!(scene.light.position, cam.position);
        assert_eq!(scene.light.direction, cam.front());
    }

    #[test]
    fn cone_test() {
        let mut scene = Scene::default();
        scene.update(&RenderView::from_camera(&Camera::new(), 800, 600));
        // Fresh camera at (0,0,3) looking down -Z sees the origin cube.
        assert!(scene.light.illuminates(Vec3::ZERO));
        assert!(!scene.light.illuminates(Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn fresh_camera_lights_only_the_origin_cube() {
        let mut scene = Scene::default();
        scene.update(&RenderView::from_camera(&Camera::new(), 800, 600));
        let lit: Vec<_> = scene.lit_cubes().collect();
        assert_eq!(lit.len(), 1);
        assert_eq!(lit[0].position, Vec3::ZERO);
    }
}
