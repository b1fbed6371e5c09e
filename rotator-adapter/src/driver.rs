use alloc::collections::VecDeque;

use rotator::{Rotator, RotatorOptions, StepOutcome};

use crate::{Easing, Scheduler, Tween};

pub const DEFAULT_STEP_DURATION_MS: u64 = 500;
pub const DEFAULT_FADE_DURATION_MS: u64 = 200;

/// Message posted by the animation clock when an interpolation finishes.
///
/// The two clocks never call into each other directly: `on_frame` only
/// enqueues, and the logic side applies the outcome when it drains the queue
/// via [`Driver::pump`]. This keeps the regeneration/index-reset transition
/// out of the animation path even when frame and tick processing interleave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverEvent {
    StepFinished,
}

/// A framework-neutral driver that wraps a [`rotator::Rotator`] and runs the
/// rotation's two timelines against a host-provided clock:
///
/// - the logic clock: a fixed-interval scheduler that begins one step per
///   tick and applies completed steps ([`Driver::pump`])
/// - the animation clock: per-frame sampling of the in-flight offset tween
///   and the one-shot container fade ([`Driver::on_frame`])
///
/// Hosts with a single render loop can call [`Driver::advance`] once per
/// frame and read layout from the wrapped rotator.
///
/// The driver is live from construction (the scheduler is armed immediately)
/// until [`Driver::shutdown`]; after shutdown every entry point is a no-op,
/// so late frame callbacks or queued completions cannot touch a torn-down
/// widget.
#[derive(Clone, Debug)]
pub struct Driver {
    r: Rotator,
    scheduler: Scheduler,
    step: Option<Tween>,
    fade: Option<Tween>,
    faded_in: bool,
    pending: VecDeque<DriverEvent>,
    step_duration_ms: u64,
    fade_duration_ms: u64,
    easing: Easing,
    live: bool,
}

impl Driver {
    pub fn new(options: RotatorOptions, now_ms: u64) -> Self {
        let mut scheduler = Scheduler::new(options.rotation_interval_ms);
        scheduler.arm(now_ms);
        let driver = Self {
            r: Rotator::new(options),
            scheduler,
            step: None,
            fade: None,
            faded_in: false,
            pending: VecDeque::new(),
            step_duration_ms: DEFAULT_STEP_DURATION_MS,
            fade_duration_ms: DEFAULT_FADE_DURATION_MS,
            easing: Easing::SmoothStep,
            live: true,
        };
        driver.warn_on_slow_step();
        driver
    }

    pub fn with_step_duration_ms(mut self, step_duration_ms: u64) -> Self {
        self.step_duration_ms = step_duration_ms.max(1);
        self.warn_on_slow_step();
        self
    }

    pub fn with_fade_duration_ms(mut self, fade_duration_ms: u64) -> Self {
        self.fade_duration_ms = fade_duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn rotator(&self) -> &Rotator {
        &self.r
    }

    pub fn rotator_mut(&mut self) -> &mut Rotator {
        &mut self.r
    }

    pub fn into_rotator(self) -> Rotator {
        self.r
    }

    pub fn step_duration_ms(&self) -> u64 {
        self.step_duration_ms
    }

    pub fn fade_duration_ms(&self) -> u64 {
        self.fade_duration_ms
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn is_animating(&self) -> bool {
        self.step.is_some()
    }

    /// Cancels the in-flight offset tween, leaving the offset wherever the
    /// last frame sampled it.
    pub fn cancel_animation(&mut self) {
        self.step = None;
    }

    /// Tears the driver down: disarms the scheduler, cancels tweens, and
    /// drops queued completions. Irreversible; every entry point is a no-op
    /// afterwards.
    pub fn shutdown(&mut self) {
        rdebug!("driver shutdown");
        self.live = false;
        self.scheduler.disarm();
        self.step = None;
        self.fade = None;
        self.pending.clear();
    }

    /// Forwards a layout measurement to the engine and, when the last missing
    /// height arrives, starts the one-shot container fade-in.
    pub fn on_measure(&mut self, index: usize, height: f32, now_ms: u64) {
        if !self.live {
            return;
        }
        self.r.record_height(index, height);
        self.maybe_start_fade(now_ms);
    }

    fn maybe_start_fade(&mut self, now_ms: u64) {
        if self.faded_in || !self.r.is_ready() {
            return;
        }
        self.faded_in = true;
        if self.fade_duration_ms > 0 {
            self.fade = Some(Tween::new(
                0.0,
                1.0,
                now_ms,
                self.fade_duration_ms,
                self.easing,
            ));
        }
        rdebug!(fade_duration_ms = self.fade_duration_ms, "fade-in started");
    }

    /// Logic-clock entry point: begins one rotation step.
    ///
    /// Normally invoked through [`Driver::advance`] when the scheduler fires.
    /// A tick that arrives with the previous step still in flight (possible
    /// only when the step duration is not shorter than the interval) settles
    /// that step first so the state machine never skips a completion.
    pub fn on_tick(&mut self, now_ms: u64) {
        if !self.live {
            return;
        }
        if let Some(tween) = self.step.take() {
            rdebug!("tick fired with a step still in flight; settling it");
            self.r.set_scroll_offset(tween.to);
            self.pending.push_back(DriverEvent::StepFinished);
        }
        self.drain_pending();

        let Some(motion) = self.r.begin_step() else {
            return;
        };
        rtrace!(from = motion.from, to = motion.to, now_ms, "step tween start");
        self.step = Some(Tween::new(
            motion.from,
            motion.to,
            now_ms,
            self.step_duration_ms,
            self.easing,
        ));
    }

    /// Animation-clock entry point: samples the in-flight tweens.
    ///
    /// Writes the sampled offset into the engine and returns it. When the
    /// step tween finishes, a [`DriverEvent::StepFinished`] message is queued
    /// for the logic clock instead of completing the step here.
    pub fn on_frame(&mut self, now_ms: u64) -> Option<f32> {
        if !self.live {
            return None;
        }
        if let Some(fade) = self.fade {
            if fade.is_done(now_ms) {
                self.fade = None;
            }
        }

        let tween = self.step?;
        let offset = tween.sample(now_ms);
        self.r.set_scroll_offset(offset);
        if tween.is_done(now_ms) {
            self.step = None;
            self.pending.push_back(DriverEvent::StepFinished);
        }
        Some(offset)
    }

    /// Logic-clock entry point: applies queued step completions.
    ///
    /// Returns the outcome of the last completion applied, if any.
    pub fn pump(&mut self) -> Option<StepOutcome> {
        if !self.live {
            return None;
        }
        self.drain_pending()
    }

    fn drain_pending(&mut self) -> Option<StepOutcome> {
        let mut last = None;
        while let Some(event) = self.pending.pop_front() {
            match event {
                DriverEvent::StepFinished => {
                    if let Some(outcome) = self.r.complete_step() {
                        last = Some(outcome);
                    }
                }
            }
        }
        last
    }

    /// Runs both clocks for one host frame: polls the scheduler, samples the
    /// tweens, and applies completions.
    ///
    /// Returns the outcome of a step completed during this call, if any.
    pub fn advance(&mut self, now_ms: u64) -> Option<StepOutcome> {
        if !self.live {
            return None;
        }
        if self.scheduler.poll(now_ms) {
            self.on_tick(now_ms);
        }
        self.on_frame(now_ms);
        self.pump()
    }

    /// Current container opacity: 0 before readiness, the sampled fade while
    /// it runs, 1 after. The fade plays exactly once per driver.
    pub fn container_opacity(&self, now_ms: u64) -> f32 {
        if let Some(fade) = self.fade {
            return fade.sample(now_ms);
        }
        if self.faded_in {
            1.0
        } else {
            self.r.container_opacity_target()
        }
    }

    /// Reconfigures the wrapped engine, settling any in-flight step and
    /// restarting the scheduler on the new interval.
    pub fn set_options(&mut self, options: RotatorOptions, now_ms: u64) {
        if !self.live {
            return;
        }
        if let Some(tween) = self.step.take() {
            self.r.set_scroll_offset(tween.to);
            self.pending.push_back(DriverEvent::StepFinished);
        }
        self.drain_pending();
        self.scheduler = Scheduler::new(options.rotation_interval_ms);
        self.scheduler.arm(now_ms);
        self.r.set_options(options);
        self.warn_on_slow_step();
    }

    fn warn_on_slow_step(&self) {
        if self.step_duration_ms >= self.scheduler.interval_ms() {
            rwarn!(
                step_duration_ms = self.step_duration_ms,
                rotation_interval_ms = self.scheduler.interval_ms(),
                "step duration is not shorter than the rotation interval; \
                 a step may still be in flight when the next tick fires"
            );
        }
    }
}
