//! Timed multi-step pattern playback over discrete addressing.
//!
//! A pattern is an ordered list of [`PatternStep`]s, each holding one 5x4
//! intensity grid per panel. Steps are strictly sequential: all non-zero
//! cells of a step are submitted as single-motor bursts, then the calling
//! thread blocks for the step duration plus a settle margin before the next
//! step. The settle margin lets the actuators finish their burst so
//! consecutive steps don't overlap haptically.

use std::time::Duration;

use tracing::debug;
use vestlink_proto::{Panel, GRID_COLS, GRID_ROWS, MAX_INTENSITY};

use crate::error::{ClientError, Result};

/// Default settle margin appended to every step's wait.
pub const DEFAULT_SETTLE_MARGIN: Duration = Duration::from_millis(100);

/// Pacing configuration for [`play_with_config`].
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    /// Extra wait after each step, on top of the step duration.
    pub settle_margin: Duration,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            settle_margin: DEFAULT_SETTLE_MARGIN,
        }
    }
}

/// One time step: an intensity grid per panel, row-major, row 0 at the top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternStep {
    pub front: [[u8; GRID_COLS]; GRID_ROWS],
    pub back: [[u8; GRID_COLS]; GRID_ROWS],
}

impl PatternStep {
    /// A step with every motor off.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set one cell's intensity.
    pub fn set(&mut self, panel: Panel, row: usize, col: usize, intensity: u8) -> &mut Self {
        self.grid_mut(panel)[row][col] = intensity;
        self
    }

    /// Set a whole row to one intensity.
    pub fn set_row(&mut self, panel: Panel, row: usize, intensity: u8) -> &mut Self {
        self.grid_mut(panel)[row] = [intensity; GRID_COLS];
        self
    }

    fn grid_mut(&mut self, panel: Panel) -> &mut [[u8; GRID_COLS]; GRID_ROWS] {
        match panel {
            Panel::Front => &mut self.front,
            Panel::Back => &mut self.back,
        }
    }

    fn grid(&self, panel: Panel) -> &[[u8; GRID_COLS]; GRID_ROWS] {
        match panel {
            Panel::Front => &self.front,
            Panel::Back => &self.back,
        }
    }
}

/// Receiver of single-motor activations; implemented by
/// [`Player`](crate::Player) and by recording sinks in tests.
pub trait MotorSink {
    fn activate(&self, panel: Panel, motor_index: u8, intensity: u8, duration_ms: u32)
        -> Result<()>;
}

/// Play `steps` with default pacing. See [`play_with_config`].
pub fn play<S: MotorSink + ?Sized>(
    sink: &S,
    steps: &[PatternStep],
    step_duration_ms: u32,
) -> Result<()> {
    play_with_config(sink, steps, step_duration_ms, &SequencerConfig::default())
}

/// Play `steps` in order, blocking the calling thread between steps.
///
/// Within a step, front-panel cells are submitted before back-panel cells,
/// in row-major order; zero-intensity cells are skipped entirely (no "off"
/// command exists in the protocol). Completes after the last step's wait
/// has elapsed.
pub fn play_with_config<S: MotorSink + ?Sized>(
    sink: &S,
    steps: &[PatternStep],
    step_duration_ms: u32,
    config: &SequencerConfig,
) -> Result<()> {
    if step_duration_ms == 0 {
        return Err(ClientError::Map(vestlink_proto::MapError::OutOfRange {
            field: "duration",
            value: 0.0,
            min: 1.0,
            max: f64::from(u32::MAX),
        }));
    }
    validate_intensities(steps)?;

    let wait = Duration::from_millis(u64::from(step_duration_ms)) + config.settle_margin;
    for (i, step) in steps.iter().enumerate() {
        debug!(step = i, "submitting pattern step");
        for panel in [Panel::Front, Panel::Back] {
            let grid = step.grid(panel);
            for row in 0..GRID_ROWS {
                for col in 0..GRID_COLS {
                    let intensity = grid[row][col];
                    if intensity == 0 {
                        continue;
                    }
                    let motor_index = (row * GRID_COLS + col) as u8;
                    sink.activate(panel, motor_index, intensity, step_duration_ms)?;
                }
            }
        }
        std::thread::sleep(wait);
    }
    Ok(())
}

/// Reject a pattern up front rather than failing halfway through a step.
fn validate_intensities(steps: &[PatternStep]) -> Result<()> {
    for step in steps {
        for panel in [Panel::Front, Panel::Back] {
            for row in step.grid(panel) {
                for &intensity in row {
                    if intensity > MAX_INTENSITY {
                        return Err(ClientError::Map(vestlink_proto::MapError::OutOfRange {
                            field: "intensity",
                            value: f64::from(intensity),
                            min: 0.0,
                            max: f64::from(MAX_INTENSITY),
                        }));
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Instant;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        calls: Mutex<Vec<(Panel, u8, u8, u32)>>,
    }

    impl MotorSink for RecordingSink {
        fn activate(
            &self,
            panel: Panel,
            motor_index: u8,
            intensity: u8,
            duration_ms: u32,
        ) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((panel, motor_index, intensity, duration_ms));
            Ok(())
        }
    }

    fn fast() -> SequencerConfig {
        SequencerConfig {
            settle_margin: Duration::ZERO,
        }
    }

    /// Wave sweeping down the vest: step i lights row i, full intensity on
    /// the front panel and half on the back.
    fn wave() -> Vec<PatternStep> {
        (0..GRID_ROWS)
            .map(|row| {
                let mut step = PatternStep::empty();
                step.set_row(Panel::Front, row, 100);
                step.set_row(Panel::Back, row, 50);
                step
            })
            .collect()
    }

    #[test]
    fn wave_issues_forty_submissions_in_order() {
        let sink = RecordingSink::default();
        play_with_config(&sink, &wave(), 1, &fast()).unwrap();

        let calls = sink.calls.lock().unwrap();
        // 5 steps x 2 panels x 4 columns.
        assert_eq!(calls.len(), 40);

        for (step, chunk) in calls.chunks(8).enumerate() {
            let base = (step * GRID_COLS) as u8;
            // Front row first, in column order...
            for col in 0..GRID_COLS {
                assert_eq!(chunk[col], (Panel::Front, base + col as u8, 100, 1));
            }
            // ...then the same row on the back panel.
            for col in 0..GRID_COLS {
                assert_eq!(chunk[GRID_COLS + col], (Panel::Back, base + col as u8, 50, 1));
            }
        }
    }

    #[test]
    fn zero_intensity_cells_are_never_submitted() {
        let mut step = PatternStep::empty();
        step.set(Panel::Front, 2, 1, 80);
        step.set(Panel::Back, 4, 3, 1);

        let sink = RecordingSink::default();
        play_with_config(&sink, &[step], 10, &fast()).unwrap();

        let calls = sink.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![(Panel::Front, 9, 80, 10), (Panel::Back, 19, 1, 10)]
        );
    }

    #[test]
    fn empty_steps_send_nothing_but_still_pace() {
        let sink = RecordingSink::default();
        let started = Instant::now();
        play_with_config(
            &sink,
            &[PatternStep::empty(), PatternStep::empty()],
            5,
            &fast(),
        )
        .unwrap();

        assert!(sink.calls.lock().unwrap().is_empty());
        assert!(started.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn zero_step_duration_is_rejected() {
        let sink = RecordingSink::default();
        let err = play_with_config(&sink, &wave(), 0, &fast()).unwrap_err();
        assert!(matches!(err, ClientError::Map(_)));
        assert!(sink.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn over_range_intensity_is_rejected_before_any_submission() {
        let mut first = PatternStep::empty();
        first.set(Panel::Front, 0, 0, 100);
        let mut second = PatternStep::empty();
        second.set(Panel::Back, 1, 1, 101);

        let sink = RecordingSink::default();
        let err = play_with_config(&sink, &[first, second], 10, &fast()).unwrap_err();
        assert!(matches!(err, ClientError::Map(_)));
        assert!(sink.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn settle_margin_extends_the_step_wait() {
        let sink = RecordingSink::default();
        let config = SequencerConfig {
            settle_margin: Duration::from_millis(30),
        };
        let started = Instant::now();
        play_with_config(&sink, &[PatternStep::empty()], 5, &config).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(35));
    }
}
