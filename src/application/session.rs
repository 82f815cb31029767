use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::{ResolvedConfig, SessionConfig};
use crate::domain::{Life, Pattern};
use crate::error::Result;
use crate::rendering::{CellStyle, Display, DisplaySurface, Region, draw_life};

/// Session drives the animation: draw the automaton, push it to the
/// display, wait, advance, and reseed when the pattern dies out, freezes
/// or runs for too long.
pub struct Session {
    life: Life,
    region: Region,
    style: CellStyle,
    cell_size: usize,
    origin: (i64, i64),
    percent: u32,
    max_cycles: u32,
    interval: Duration,
    erase: bool,
    rng: StdRng,
    /// Placed in the centre on every (re)seed instead of random cells
    pattern: Option<Pattern>,
    /// Generations since the last (re)seed, starting at 1
    cycle: u32,
    /// Generations since the session started
    pub generation: u64,
    /// Number of times the grid was reseeded after the first seed
    pub reseeds: u64,
    update_timer: Duration,
}

impl Session {
    /// Validate `config` against a surface of the given size and seed the grid.
    pub fn new(
        config: &SessionConfig,
        surface_width: usize,
        surface_height: usize,
    ) -> Result<Self> {
        let ResolvedConfig { rule, style, region_width, region_height, x, y, pattern } =
            config.validate(surface_width, surface_height)?;

        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let life = Life::new(config.width, config.height, rule)?;

        info!(rule = %life.rule(), width = config.width, height = config.height, "session created");
        debug!("Percent coverage is {}", config.percent);
        debug!("Maximum cycles is {}", config.max_cycles);

        let mut session = Self {
            life,
            region: Region::new(region_width, region_height)?,
            style,
            cell_size: config.cell_size,
            origin: (x, y),
            percent: config.percent,
            max_cycles: config.max_cycles,
            interval: config.interval,
            erase: config.erase,
            rng,
            pattern,
            cycle: 1,
            generation: 0,
            reseeds: 0,
            update_timer: Duration::ZERO,
        };
        session.seed()?;
        Ok(session)
    }

    fn seed(&mut self) -> Result<()> {
        match &self.pattern {
            Some(pattern) => pattern.centre_on(&mut self.life),
            None => {
                self.life.seed_with(self.percent, &mut self.rng);
                Ok(())
            }
        }
    }

    pub fn life(&self) -> &Life {
        &self.life
    }

    pub fn life_mut(&mut self) -> &mut Life {
        &mut self.life
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Top-left corner of the display region on the surface
    pub const fn origin(&self) -> (i64, i64) {
        self.origin
    }

    pub const fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Show the first frame, clearing the surface first if configured to.
    pub fn start<S: DisplaySurface>(&mut self, display: &mut Display<S>) -> Result<()> {
        if self.erase {
            display.clear();
        }
        self.render(display)
    }

    /// Draw the current generation and composite it onto `display`.
    pub fn render<S: DisplaySurface>(&mut self, display: &mut Display<S>) -> Result<()> {
        draw_life(&mut self.region, &self.life, self.cell_size, &self.style);
        let (x, y) = self.origin;
        self.region.to_display(display, x, y)
    }

    /// Move to the next generation, or reseed. Returns `true` if it reseeded.
    pub fn advance(&mut self) -> Result<bool> {
        let reseed = if self.cycle >= self.max_cycles {
            true
        } else {
            self.generation += 1;
            !self.life.step()
        };

        if reseed {
            debug!("Restarting with new seed");
            self.seed()?;
            self.reseeds += 1;
            self.cycle = 0;
        }
        self.cycle += 1;
        Ok(reseed)
    }

    /// Update the session by `delta_time` seconds of wall time. Once a full
    /// interval has passed, advance and redraw. Returns whether a new frame
    /// was composited.
    pub fn tick<S: DisplaySurface>(
        &mut self,
        delta_time: f32,
        display: &mut Display<S>,
    ) -> Result<bool> {
        self.update_timer += Duration::from_secs_f32(delta_time.max(0.0));
        if self.update_timer < self.interval {
            return Ok(false);
        }
        self.update_timer = Duration::ZERO;
        debug!("Starting cycle {}", self.cycle);
        self.advance()?;
        self.render(display)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::{MemorySurface, PixelFormat, Rgb};

    fn config() -> SessionConfig {
        SessionConfig::default()
            .with_grid(8, 8)
            .with_cell_size(4)
            .with_rng_seed(11)
            .with_interval(Duration::from_millis(100))
    }

    #[test]
    fn test_seeded_sessions_repeat() {
        let a = Session::new(&config(), 64, 64).unwrap();
        let b = Session::new(&config(), 64, 64).unwrap();
        let cells = |s: &Session| s.life().iter_cells().map(|(_, _, c)| c).collect::<Vec<_>>();
        assert_eq!(cells(&a), cells(&b));
        assert_eq!(a.origin(), (16, 16));
    }

    #[test]
    fn test_max_cycles_forces_reseed() {
        let mut session = Session::new(&config().with_max_cycles(3), 64, 64).unwrap();
        session.life_mut().clear();
        // Blinker keeps changing, so only the cycle limit can reseed it
        for x in 1..=3 {
            session.life_mut().set_cell(x, 4, true).unwrap();
        }

        assert!(!session.advance().unwrap());
        assert!(!session.advance().unwrap());
        assert_eq!(session.cycle(), 3);
        assert!(session.advance().unwrap());
        assert_eq!(session.cycle(), 1);
        assert_eq!(session.reseeds, 1);
        assert_eq!(session.generation, 2);
    }

    #[test]
    fn test_extinction_reseeds() {
        let mut session = Session::new(&config().with_percent(50), 64, 64).unwrap();
        session.life_mut().clear();
        session.life_mut().set_cell(3, 3, true).unwrap();

        assert!(session.advance().unwrap());
        assert_eq!(session.cycle(), 1);
        assert!(session.life().population() > 0);
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let mut session = Session::new(&config(), 64, 64).unwrap();
        let surface = MemorySurface::linear(64, 64, PixelFormat::XRGB8888);
        let mut display = Display::new(surface).unwrap();

        assert!(!session.tick(0.05, &mut display).unwrap());
        assert_eq!(session.generation + session.reseeds, 0);
        assert!(session.tick(0.06, &mut display).unwrap());
        assert_eq!(session.generation + session.reseeds, 1);
    }

    #[test]
    fn test_render_places_region() {
        let config = config().with_position(8, 0).with_percent(100);
        let mut session = Session::new(&config, 64, 64).unwrap();
        let mut display = Display::new(MemorySurface::indexed(64, 64)).unwrap();
        display.surface_mut().set_pixel(0, 0, Rgb::WHITE);

        session.start(&mut display).unwrap();
        let surface = display.surface();
        // Untouched outside the region
        assert_eq!(surface.get_pixel(0, 0), Rgb::WHITE);
        // First cell's border corner
        assert_eq!(surface.get_pixel(8, 0), Rgb::new(0, 255, 255));
    }

    #[test]
    fn test_pattern_seeds_and_reseeds_in_centre() {
        let config = config().with_pattern("block").with_max_cycles(1);
        let mut session = Session::new(&config, 64, 64).unwrap();
        let centre = [(3, 3), (4, 3), (3, 4), (4, 4)];
        let alive = |s: &Session| {
            s.life()
                .iter_cells()
                .filter(|(_, _, c)| c.is_alive())
                .map(|(x, y, _)| (x, y))
                .collect::<Vec<_>>()
        };
        assert_eq!(alive(&session), centre);

        session.life_mut().set_cell(0, 0, true).unwrap();
        assert!(session.advance().unwrap());
        assert_eq!(alive(&session), centre);
        assert_eq!(session.reseeds, 1);
        assert_eq!(session.generation, 0);
    }
}
