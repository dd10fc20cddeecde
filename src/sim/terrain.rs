//! Procedural terrain: a fixed starting platform plus randomly placed ledges
//! stacked upward until they leave the top of the screen.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::FLOOR_OFFSET;

/// Starting platform, relative to the bottom-left of the canvas
pub const START_PLATFORM_X: f32 = 50.0;
pub const START_PLATFORM_WIDTH: f32 = 200.0;
pub const START_PLATFORM_HEIGHT: f32 = 20.0;

/// Ledge width range [min, max)
pub const LEDGE_WIDTH: (f32, f32) = (100.0, 300.0);
/// Ledge thickness range [min, max)
pub const LEDGE_HEIGHT: (f32, f32) = (20.0, 70.0);
/// Extra vertical gap above each ledge's thickness [min, max)
pub const LEDGE_GAP: (f32, f32) = (50.0, 150.0);

/// Ordered obstacle list. Insertion order is the scan order for every
/// hammer and body query, so it is never re-sorted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Terrain {
    pub obstacles: Vec<Rect>,
}

impl Terrain {
    pub fn from_obstacles(obstacles: Vec<Rect>) -> Self {
        Self { obstacles }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rect> {
        self.obstacles.iter()
    }
}

/// Generate a fresh layout for a `width` x `height` canvas
pub fn generate<R: Rng>(width: f32, height: f32, rng: &mut R) -> Terrain {
    let floor_y = height - FLOOR_OFFSET;

    let mut obstacles = vec![Rect::new(
        START_PLATFORM_X,
        floor_y,
        START_PLATFORM_WIDTH,
        START_PLATFORM_HEIGHT,
    )];

    let mut y = floor_y;
    while y > 0.0 {
        let w = rng.random_range(LEDGE_WIDTH.0..LEDGE_WIDTH.1);
        let h = rng.random_range(LEDGE_HEIGHT.0..LEDGE_HEIGHT.1);
        // Narrow canvases pin the ledge to the left edge
        let max_x = (width - w).max(0.0);
        let x = rng.random::<f32>() * max_x;

        obstacles.push(Rect::new(x, y, w, h));

        y -= h + rng.random_range(LEDGE_GAP.0..LEDGE_GAP.1);
    }

    log::debug!(
        "Generated {} obstacles for {}x{} canvas",
        obstacles.len(),
        width,
        height
    );

    Terrain { obstacles }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_start_platform_is_fixed() {
        let mut rng = Pcg32::seed_from_u64(7);
        let terrain = generate(800.0, 600.0, &mut rng);
        assert_eq!(
            terrain.iter().next(),
            Some(&Rect::new(50.0, 500.0, 200.0, 20.0))
        );
        assert!(terrain.len() > 1);
    }

    #[test]
    fn test_ledges_within_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        let terrain = generate(1024.0, 768.0, &mut rng);

        for ledge in terrain.iter().skip(1) {
            assert!(ledge.width >= 100.0 && ledge.width < 300.0);
            assert!(ledge.height >= 20.0 && ledge.height < 70.0);
            assert!(ledge.x >= 0.0 && ledge.right() <= 1024.0 + 1e-3);
        }
    }

    #[test]
    fn test_ledges_climb_to_top() {
        let mut rng = Pcg32::seed_from_u64(3);
        let terrain = generate(800.0, 600.0, &mut rng);
        let ledges: Vec<_> = terrain.iter().skip(1).collect();

        // First ledge shares the floor line, then each step rises by h + [50, 150)
        assert_eq!(ledges[0].y, 500.0);
        for pair in ledges.windows(2) {
            let step = pair[0].y - pair[1].y;
            assert!(step >= pair[0].height + 50.0 - 1e-3);
            assert!(step < pair[0].height + 150.0 + 1e-3);
        }
        // Generation stops once the cursor leaves the top of the screen
        assert!(ledges.iter().all(|l| l.y > 0.0));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = generate(800.0, 600.0, &mut Pcg32::seed_from_u64(99));
        let b = generate(800.0, 600.0, &mut Pcg32::seed_from_u64(99));
        assert_eq!(a.obstacles, b.obstacles);
    }

    #[test]
    fn test_narrow_canvas_pins_left() {
        let mut rng = Pcg32::seed_from_u64(5);
        let terrain = generate(50.0, 400.0, &mut rng);
        assert!(terrain.iter().skip(1).all(|l| l.x == 0.0));
    }
}
