use std::fmt::Write;

use crate::scene::Scene;
use crate::view::RenderView;

/// Renderer-agnostic interface.
///
/// A renderer reads the scene and a view snapshot and produces output. It
/// never mutates the camera; camera state is owned by the input loop.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of `scene` as seen from `view`.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Text renderer for the CLI, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        let (w, h) = view.viewport;
        // Writing into a String cannot fail.
        let _ = writeln!(out, "=== Frame ({w}x{h}, aspect={:.3}) ===", view.aspect());
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) dir=({:.3}, {:.3}, {:.3}) fov={:.1}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.direction.x,
            view.direction.y,
            view.direction.z,
            view.fov_degrees
        );
        let _ = writeln!(out, "View:");
        write_matrix(&mut out, &view.view.to_cols_array_2d());
        let _ = writeln!(out, "Projection:");
        write_matrix(&mut out, &view.projection.to_cols_array_2d());
        let _ = writeln!(
            out,
            "Light: cut_off={:.4} shininess={:.0}",
            scene.light.cut_off, scene.material.shininess
        );
        let lit = scene.lit_cubes().count();
        tracing::debug!("debug frame {w}x{h}: {lit}/{} cubes lit", scene.cubes.len());
        let _ = writeln!(out, "Cubes: {} ({lit} lit)", scene.cubes.len());
        for (i, cube) in scene.cubes.iter().enumerate() {
            let p = cube.position;
            let lit = if scene.light.illuminates(p) { " lit" } else { "" };
            let _ = writeln!(
                out,
                "  [{i}] pos=({:.2}, {:.2}, {:.2}) angle={:.0}{lit}",
                p.x, p.y, p.z, cube.angle_degrees
            );
        }
        out
    }
}

/// Print a column-major matrix row by row.
fn write_matrix(out: &mut String, cols: &[[f32; 4]; 4]) {
    for row in 0..4 {
        let _ = writeln!(
            out,
            "  [{:>9.4} {:>9.4} {:>9.4} {:>9.4}]",
            cols[0][row], cols[1][row], cols[2][row], cols[3][row]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeview_camera::Camera;

    #[test]
    fn debug_renderer_fresh_camera() {
        let cam = Camera::new();
        let view = RenderView::from_camera(&cam, 1920, 1080);
        let mut scene = Scene::default();
        scene.update(&view);
        let output = DebugTextRenderer::new().render(&scene, &view);

        assert!(output.contains("1920x1080"));
        assert!(output.contains("aspect=1.778"));
        assert!(output.contains("eye=(0.00, 0.00, 3.00)"));
        assert!(output.contains("fov=78.0"));
        assert!(output.contains("Cubes: 10 (1 lit)"));
        assert!(output.contains("[0] pos=(0.00, 0.00, 0.00) angle=0 lit"));
    }

    #[test]
    fn projection_rows_printed() {
        let view = RenderView::from_camera(&Camera::new(), 100, 100);
        let output = DebugTextRenderer::new().render(&Scene::default(), &view);
        // Bottom row of a perspective matrix is (0, 0, -1, 0).
        assert!(output.contains("-1.0000"));
        assert_eq!(output.matches("  [").count(), 8 + 10);
    }
}
