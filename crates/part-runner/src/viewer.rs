use tracing::info;

/// What the viewer does with its camera when new parts arrive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CameraPolicy {
    #[default]
    Keep,
    /// Return to the viewer's home view.
    Reset,
    /// Frame the shown parts.
    Center,
}

/// Receives placed parts for display. Nothing is returned to the caller.
pub trait Viewer<G> {
    fn show(&mut self, parts: &[G], camera: CameraPolicy);
}

/// Viewer for headless runs: logs what would have been shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingViewer;

impl<G> Viewer<G> for TracingViewer {
    fn show(&mut self, parts: &[G], camera: CameraPolicy) {
        info!(parts = parts.len(), camera = ?camera, "showing parts");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use part_types::Mesh;

    #[test]
    fn default_policy_keeps_camera() {
        assert_eq!(CameraPolicy::default(), CameraPolicy::Keep);
    }

    #[test]
    fn tracing_viewer_accepts_every_policy() {
        let parts = [Mesh::cuboid(1.0, 1.0, 1.0)];
        let mut viewer = TracingViewer;
        for camera in [CameraPolicy::Keep, CameraPolicy::Reset, CameraPolicy::Center] {
            Viewer::<Mesh>::show(&mut viewer, &parts, camera);
        }
        Viewer::<Mesh>::show(&mut viewer, &[], CameraPolicy::Reset);
    }
}
