use crate::config::{self, GameConfig};
use crate::error::SetupError;
use crate::types::{GameRng, ObjectType, Point};
use log::{info, warn};
use rand::Rng;
use rand::seq::SliceRandom;

// A circular obstacle. Fixed in place once the match starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pillar {
    pub position: Point,
    pub radius: f64,
}

impl Pillar {
    pub fn new(position: Point, radius: f64) -> Self {
        Pillar { position, radius }
    }
}

// The toroidal playing field and the pillars standing on it
#[derive(Debug, Clone)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
    pub pillars: Vec<Pillar>,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Arena {
            width,
            height,
            pillars: Vec::new(),
        }
    }

    /// An arena with room for `objects` tanks and pillars: the smallest
    /// near-square grid of `grid_spacing` cells holding one object each.
    pub fn sized_for(objects: usize, grid_spacing: f64) -> Self {
        let objects = objects.max(1);
        let mut cols = 1;
        while cols * cols < objects {
            cols += 1;
        }
        let rows = objects.div_ceil(cols);
        Self::new(cols as f64 * grid_spacing, rows as f64 * grid_spacing)
    }

    /// Wrap a point back onto the torus
    pub fn wrap(&self, point: Point) -> Point {
        Point::new(
            point.x.rem_euclid(self.width),
            point.y.rem_euclid(self.height),
        )
    }

    /// Shortest vector from `from` to `to` across the wrap, with its squared length
    pub fn displacement(&self, from: Point, to: Point) -> (Point, f64) {
        let axis = |delta: f64, size: f64| {
            let half = size / 2.0;
            if delta > half {
                delta - size
            } else if delta < -half {
                delta + size
            } else {
                delta
            }
        };
        let vector = Point::new(
            axis(to.x - from.x, self.width),
            axis(to.y - from.y, self.height),
        );
        (vector, vector.length_sq())
    }

    /// A uniformly random whole-unit position anywhere on the field
    pub fn random_point(&self, rng: &mut GameRng) -> Point {
        Point::new(
            (rng.r#gen::<f64>() * self.width).floor(),
            (rng.r#gen::<f64>() * self.height).floor(),
        )
    }

    /// Raise `pillar_count` pillars, then find spots for `tank_count` tanks.
    ///
    /// Pillars keep `pillar_to_wall` clear of every edge; tanks may go anywhere.
    /// Every object keeps its radius, the other's radius and the spacing for
    /// the pair clear of everything placed before it, measured straight across
    /// the field rather than over the wrap. Returns tank positions.
    pub fn populate(
        &mut self,
        pillar_count: usize,
        tank_count: usize,
        config: &GameConfig,
        rng: &mut GameRng,
    ) -> Result<Vec<Point>, SetupError> {
        let mut placed: Vec<(Point, f64, ObjectType)> = Vec::new();

        self.pillars.clear();
        for index in 0..pillar_count {
            let spread = config.pillar_max_radius - config.pillar_min_radius;
            let radius = config.pillar_min_radius + (rng.r#gen::<f64>() * spread).floor();
            let margin = config.pillar_to_wall;
            let position = self.find_clear_spot(
                &placed,
                radius,
                ObjectType::Pillar,
                margin,
                rng,
                index,
            )?;
            placed.push((position, radius, ObjectType::Pillar));
            self.pillars.push(Pillar::new(position, radius));
        }

        let tanks = match self.scatter_tanks(&placed, tank_count, config, rng) {
            Ok(tanks) => tanks,
            Err(err) => {
                warn!("{}; falling back to grid placement", err);
                self.grid_tanks(tank_count, config, rng)?
            }
        };

        info!(
            "Arena {}x{}: placed {} pillars and {} tanks",
            self.width, self.height, pillar_count, tank_count
        );
        Ok(tanks)
    }

    // Random spots for every tank, each clear of everything placed before it
    fn scatter_tanks(
        &self,
        pillars: &[(Point, f64, ObjectType)],
        tank_count: usize,
        config: &GameConfig,
        rng: &mut GameRng,
    ) -> Result<Vec<Point>, SetupError> {
        let mut placed = pillars.to_vec();
        let mut tanks = Vec::with_capacity(tank_count);
        for index in 0..tank_count {
            let position = self.find_clear_spot(
                &placed,
                config.tank_radius,
                ObjectType::Tank,
                0.0,
                rng,
                index,
            )?;
            placed.push((position, config.tank_radius, ObjectType::Tank));
            tanks.push(position);
        }
        Ok(tanks)
    }

    /// One tank per grid cell centre, cells taken in shuffled order and
    /// skipping any cell whose centre a pillar crowds.
    fn grid_tanks(
        &self,
        tank_count: usize,
        config: &GameConfig,
        rng: &mut GameRng,
    ) -> Result<Vec<Point>, SetupError> {
        let cols = (self.width / config.grid_spacing).floor() as usize;
        let rows = (self.height / config.grid_spacing).floor() as usize;
        let spacing = config.grid_spacing;
        let half = spacing / 2.0;

        let mut cells: Vec<Point> = (0..rows)
            .flat_map(|row| {
                (0..cols).map(move |col| {
                    Point::new(
                        col as f64 * spacing + half,
                        row as f64 * spacing + half,
                    )
                })
            })
            .filter(|cell| {
                self.pillars.iter().all(|pillar| {
                    let clearance = config.tank_radius
                        + pillar.radius
                        + ObjectType::Tank.spacing(ObjectType::Pillar);
                    cell.distance_sq(pillar.position) > clearance * clearance
                })
            })
            .collect();

        if cells.len() < tank_count {
            return Err(SetupError::PlacementFailed {
                kind: "tank",
                index: cells.len(),
                attempts: config::MAX_PLACEMENT_ATTEMPTS,
            });
        }
        cells.shuffle(rng);
        cells.truncate(tank_count);
        Ok(cells)
    }

    fn find_clear_spot(
        &self,
        placed: &[(Point, f64, ObjectType)],
        radius: f64,
        kind: ObjectType,
        margin: f64,
        rng: &mut GameRng,
        index: usize,
    ) -> Result<Point, SetupError> {
        let span_x = (self.width - 2.0 * margin).max(1.0);
        let span_y = (self.height - 2.0 * margin).max(1.0);

        for _ in 0..config::MAX_PLACEMENT_ATTEMPTS {
            let candidate = Point::new(
                margin + (rng.r#gen::<f64>() * span_x).floor(),
                margin + (rng.r#gen::<f64>() * span_y).floor(),
            );
            let clear = placed.iter().all(|&(other, other_radius, other_kind)| {
                let clearance = radius + other_radius + kind.spacing(other_kind);
                candidate.distance_sq(other) > clearance * clearance
            });
            if clear {
                return Ok(candidate);
            }
        }

        Err(SetupError::PlacementFailed {
            kind: match kind {
                ObjectType::Tank => "tank",
                ObjectType::Pillar => "pillar",
            },
            index,
            attempts: config::MAX_PLACEMENT_ATTEMPTS,
        })
    }
}
