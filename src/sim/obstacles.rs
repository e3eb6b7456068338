//! Obstacle field
//!
//! Obstacles scroll one cell per move along the x axis. They enter on the edge
//! opposite the direction of travel and are dropped once they leave the screen.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::DisplayGeometry;

/// Which way the obstacles are scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Left,
    Right,
}

impl Direction {
    /// Per-move x delta
    #[inline]
    pub fn dx(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Column new obstacles appear in
    pub fn entry_x(self, geometry: &DisplayGeometry) -> i32 {
        match self {
            Direction::Right => geometry.x_min(),
            Direction::Left => geometry.x_max(),
        }
    }
}

/// A single obstacle cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: IVec2,
}

impl Obstacle {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
        }
    }
}

/// All live obstacles, in spawn order
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
        }
    }

    /// Shift every obstacle one cell in `direction`. No clamping.
    pub fn advance(&mut self, direction: Direction) {
        let dx = direction.dx();
        for obstacle in &mut self.obstacles {
            obstacle.pos.x += dx;
        }
    }

    /// Drop obstacles that have scrolled off either side. Returns how many went.
    pub fn prune(&mut self, geometry: &DisplayGeometry) -> usize {
        let before = self.obstacles.len();
        let columns = geometry.x_min()..=geometry.x_max();
        self.obstacles.retain(|o| columns.contains(&o.pos.x));
        before - self.obstacles.len()
    }

    /// Add one obstacle on the entry edge at a random row
    pub fn spawn<R: Rng>(
        &mut self,
        direction: Direction,
        geometry: &DisplayGeometry,
        rng: &mut R,
    ) -> Obstacle {
        let y = rng.random_range(geometry.y_min()..=geometry.y_max());
        let obstacle = Obstacle::new(direction.entry_x(geometry), y);
        self.obstacles.push(obstacle);
        obstacle
    }

    /// True if any obstacle sits exactly on (x, y)
    pub fn collides_with(&self, x: i32, y: i32) -> bool {
        let target = IVec2::new(x, y);
        self.obstacles.iter().any(|o| o.pos == target)
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// True when every obstacle is on screen (holds between moves)
    pub fn within_bounds(&self, geometry: &DisplayGeometry) -> bool {
        self.obstacles.iter().all(|o| geometry.contains(o.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const LCD: DisplayGeometry = DisplayGeometry::new(16, 2);

    fn field_of(cells: &[(i32, i32)]) -> ObstacleField {
        let mut field = ObstacleField::new();
        for &(x, y) in cells {
            field.push(Obstacle::new(x, y));
        }
        field
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Left), Just(Direction::Right)]
    }

    proptest! {
        #[test]
        fn test_advance_moves_x_only(
            cells in prop::collection::vec((-1i32..=16, 0i32..2), 0..24),
            direction in direction_strategy(),
        ) {
            let mut field = field_of(&cells);
            let before: Vec<Obstacle> = field.iter().copied().collect();
            field.advance(direction);

            for (old, new) in before.iter().zip(field.iter()) {
                prop_assert_eq!(new.pos.x - old.pos.x, direction.dx());
                prop_assert_eq!(new.pos.y, old.pos.y);
            }
            prop_assert_eq!(field.len(), before.len());
        }

        #[test]
        fn test_prune_idempotent(
            cells in prop::collection::vec((-1i32..=16, 0i32..2), 0..24),
        ) {
            let mut field = field_of(&cells);
            field.prune(&LCD);
            let once: Vec<Obstacle> = field.iter().copied().collect();

            prop_assert_eq!(field.prune(&LCD), 0);
            let twice: Vec<Obstacle> = field.iter().copied().collect();
            prop_assert_eq!(once, twice);
            prop_assert!(field.within_bounds(&LCD));
        }
    }

    #[test]
    fn test_prune_drops_only_offscreen() {
        let mut field = field_of(&[(-1, 0), (0, 1), (15, 0), (16, 1), (7, 0)]);
        assert_eq!(field.prune(&LCD), 2);
        let xs: Vec<i32> = field.iter().map(|o| o.pos.x).collect();
        assert_eq!(xs, vec![0, 15, 7]);
    }

    #[test]
    fn test_spawn_entry_edges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = ObstacleField::new();

        let entered = field.spawn(Direction::Right, &LCD, &mut rng);
        assert_eq!(entered.pos.x, LCD.x_min());

        let entered = field.spawn(Direction::Left, &LCD, &mut rng);
        assert_eq!(entered.pos.x, LCD.x_max());

        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_spawn_rows_stay_on_screen() {
        let big = DisplayGeometry::new(20, 4);
        let mut rng = Pcg32::seed_from_u64(42);
        let mut field = ObstacleField::new();
        let mut seen = [false; 4];

        for _ in 0..200 {
            let o = field.spawn(Direction::Left, &big, &mut rng);
            assert!(big.contains(o.pos));
            seen[o.pos.y as usize] = true;
        }
        // 200 draws over 4 rows should hit every row
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_collides_with() {
        let empty = ObstacleField::new();
        assert!(!empty.collides_with(0, 0));

        let field = field_of(&[(3, 1), (3, 1), (9, 0)]);
        assert!(field.collides_with(3, 1));
        assert!(field.collides_with(9, 0));
        assert!(!field.collides_with(3, 0));
        assert!(!field.collides_with(9, 1));
    }

    #[test]
    fn test_obstacle_crosses_screen_then_pruned() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = ObstacleField::new();
        field.spawn(Direction::Left, &LCD, &mut rng);

        for _ in 0..LCD.width {
            assert_eq!(field.len(), 1);
            field.advance(Direction::Left);
            field.prune(&LCD);
        }
        assert!(field.is_empty());
    }
}
