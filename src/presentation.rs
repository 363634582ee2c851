//! Presentation boundary
//!
//! The simulation never holds mesh handles. Whatever draws the table
//! implements [`PresentationSink`] and receives plain indices and positions
//! from [`crate::TableSimulation::present`].

use glam::Vec2;

/// Receiver of table state for display
pub trait PresentationSink {
    /// Ball still on the cloth at `pos`
    fn ball_moved(&mut self, ball: usize, pos: Vec2);

    /// Ball sits in `pocket`
    fn ball_pocketed(&mut self, ball: usize, pocket: usize);

    /// Shot charge in [0, 1], for the progress bar
    fn charge_progress(&mut self, _progress: f32) {}
}

/// Sink that writes state to the log at trace level
#[derive(Debug, Default)]
pub struct LogSink {
    /// Number of `present` calls seen (counted on charge updates)
    pub frames: u64,
}

impl PresentationSink for LogSink {
    fn ball_moved(&mut self, ball: usize, pos: Vec2) {
        log::trace!("ball {ball} at ({:.3}, {:.3})", pos.x, pos.y);
    }

    fn ball_pocketed(&mut self, ball: usize, pocket: usize) {
        log::trace!("ball {ball} in pocket {pocket}");
    }

    fn charge_progress(&mut self, progress: f32) {
        self.frames += 1;
        if progress > 0.0 {
            log::trace!("charge {:.0}%", progress * 100.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TableSimulation;
    use crate::consts::*;

    #[derive(Default)]
    struct Recorder {
        moved: Vec<(usize, Vec2)>,
        pocketed: Vec<(usize, usize)>,
        progress: Option<f32>,
    }

    impl PresentationSink for Recorder {
        fn ball_moved(&mut self, ball: usize, pos: Vec2) {
            self.moved.push((ball, pos));
        }

        fn ball_pocketed(&mut self, ball: usize, pocket: usize) {
            self.pocketed.push((ball, pocket));
        }

        fn charge_progress(&mut self, progress: f32) {
            self.progress = Some(progress);
        }
    }

    #[test]
    fn test_present_reports_every_ball() {
        let mut sim = TableSimulation::new();
        sim.init().unwrap();
        sim.set_ball_position(2, Vec2::new(-7.5, 4.0)).unwrap();
        sim.step(1.0 / 60.0).unwrap();
        sim.start_charging().unwrap();
        sim.charge_update(0.5).unwrap();

        let mut recorder = Recorder::default();
        sim.present(&mut recorder).unwrap();
        assert_eq!(recorder.moved.len(), BALL_COUNT - 1);
        assert_eq!(recorder.pocketed, vec![(2, 3)]);
        assert_eq!(recorder.progress, Some(0.5));
    }

    #[test]
    fn test_log_sink_counts_frames() {
        let mut sim = TableSimulation::new();
        sim.init().unwrap();
        let mut sink = LogSink::default();
        sim.present(&mut sink).unwrap();
        sim.present(&mut sink).unwrap();
        assert_eq!(sink.frames, 2);
    }
}
