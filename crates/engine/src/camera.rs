/// Horizontal follow camera. The view stays put until the target crosses
/// the screen center, then tracks it until half a screen from the world's
/// right edge. Without back-scroll the offset only ever ratchets forward.
#[derive(Debug, Clone)]
pub struct CameraTracker {
    center_screen_x: f32,
    right_border_x: f32,
    back_scroll_allowed: bool,
    last_target_x: f32,
    offset_x: f32,
}

impl CameraTracker {
    pub fn new(viewport_width: f32, world_width: f32, back_scroll_allowed: bool) -> Self {
        let center_screen_x = viewport_width / 2.0;
        Self {
            center_screen_x,
            right_border_x: world_width - center_screen_x,
            back_scroll_allowed,
            last_target_x: 0.0,
            offset_x: 0.0,
        }
    }

    pub fn update(&mut self, target_x: f32) {
        if target_x > self.center_screen_x
            && target_x < self.right_border_x
            && (self.back_scroll_allowed || target_x > self.last_target_x)
        {
            self.offset_x = self.center_screen_x - target_x;
            self.last_target_x = target_x;
        }
    }

    /// World-container translation; zero or negative.
    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    /// World-space x of the viewport's left edge.
    pub fn scroll_x(&self) -> f32 {
        -self.offset_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_until_target_crosses_center() {
        let mut camera = CameraTracker::new(1024.0, 8192.0, false);
        camera.update(100.0);
        camera.update(512.0);
        assert_eq!(camera.offset_x(), 0.0);
        camera.update(600.0);
        assert_eq!(camera.offset_x(), -88.0);
        assert_eq!(camera.scroll_x(), 88.0);
    }

    #[test]
    fn ratchets_forward_only() {
        let mut camera = CameraTracker::new(1024.0, 8192.0, false);
        camera.update(700.0);
        assert_eq!(camera.offset_x(), -188.0);
        camera.update(600.0);
        assert_eq!(camera.offset_x(), -188.0);
        camera.update(750.0);
        assert_eq!(camera.offset_x(), -238.0);
    }

    #[test]
    fn back_scroll_follows_retreat() {
        let mut camera = CameraTracker::new(1024.0, 8192.0, true);
        camera.update(700.0);
        camera.update(600.0);
        assert_eq!(camera.offset_x(), -88.0);
    }

    #[test]
    fn stops_at_world_right_edge() {
        let mut camera = CameraTracker::new(1024.0, 2048.0, false);
        camera.update(1500.0);
        let pinned = camera.offset_x();
        camera.update(1600.0);
        assert_eq!(camera.offset_x(), pinned);
    }
}
