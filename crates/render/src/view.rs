use cubeview_camera::Camera;
use glam::{Mat4, Vec3};

/// Camera matrices and viewpoint for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    pub view: Mat4,
    /// OpenGL-convention projection, clip z in [-1, 1].
    pub projection: Mat4,
    /// Camera position in world space.
    pub eye: Vec3,
    /// Unit look direction.
    pub direction: Vec3,
    pub fov_degrees: f32,
    pub viewport: (u32, u32),
}

impl RenderView {
    /// Snapshot the camera for a `width` x `height` viewport. A zero height
    /// (minimised window) is treated as one pixel.
    pub fn from_camera(camera: &Camera, width: u32, height: u32) -> Self {
        let height = height.max(1);
        Self {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(width as f32, height as f32),
            eye: camera.position,
            direction: camera.front(),
            fov_degrees: camera.vertical_fov(),
            viewport: (width, height),
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.0 as f32 / self.viewport.1 as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_camera_matrices() {
        let cam = Camera::new();
        let view = RenderView::from_camera(&cam, 1920, 1080);
        assert_eq!(view.view, cam.view_matrix());
        assert_eq!(view.projection, cam.projection_matrix(1920.0, 1080.0));
        assert_eq!(view.eye, cam.position);
        assert_eq!(view.direction, cam.front());
        assert_eq!(view.fov_degrees, 78.0);
    }

    #[test]
    fn zero_height_is_clamped() {
        let view = RenderView::from_camera(&Camera::new(), 640, 0);
        assert_eq!(view.viewport, (640, 1));
        assert!(view.projection.is_finite());
    }

    #[test]
    fn point_ahead_is_inside_clip_volume() {
        let cam = Camera::new();
        let view = RenderView::from_camera(&cam, 800, 600);
        let clip = view.view_projection() * (cam.position + cam.front() * 10.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }
}
