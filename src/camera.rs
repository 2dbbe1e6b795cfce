/// Camera placement. Pure functions of the player position and the window
/// and map sizes, all in world pixels; the simulation never reads these.

fn axis(player: f32, window: f32, map: f32) -> f32 {
    (player - window / 2.0).min(map - window).max(0.0)
}

/// Top-left corner of the visible window, clamped so it never leaves the
/// map. A window larger than the map pins to 0.
pub fn camera_offset(player: (f32, f32), window: (f32, f32), map: (f32, f32)) -> (f32, f32) {
    (
        axis(player.0, window.0, map.0),
        axis(player.1, window.1, map.1),
    )
}

pub fn screen_to_world(screen: (f32, f32), camera: (f32, f32)) -> (f32, f32) {
    (screen.0 + camera.0, screen.1 + camera.1)
}
