// src/stability.rs
//
// Heuristic divergence control for long unattended runs. This is not an
// error-controlled adaptive integrator; it watches the recorded energy
// samples and shrinks the time step when they misbehave. Kept behind its
// own component so a principled controller could replace it without
// touching the field or energy code.

/// What the run loop should do after the latest energy sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilityAction {
    /// Sample accepted; baseline updated, counter decayed.
    Stable,
    /// Energy rose above the stable baseline: shrink dt by `shrink_factor`.
    Shrink,
    /// Non-finite energy: halve dt and keep going.
    Halve,
    /// Non-finite energy past the recovery bound: abort the run.
    Fatal,
}

#[derive(Debug, Clone)]
pub struct StabilitySettings {
    /// Absolute tolerance above the stable baseline before a rise counts.
    pub energy_tolerance: f64,
    /// Rises are only acted on while the counter is below this bound.
    pub soft_bound: u32,
    /// Non-finite samples beyond this bound abort the run.
    pub fatal_bound: u32,
    /// dt multiplier on a non-finite sample.
    pub halve_factor: f64,
    /// dt multiplier on an energy rise.
    pub shrink_factor: f64,
}

impl Default for StabilitySettings {
    fn default() -> Self {
        Self {
            energy_tolerance: 1e-4,
            soft_bound: 3,
            fatal_bound: 5,
            halve_factor: 0.5,
            shrink_factor: 0.9,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StabilityControl {
    settings: StabilitySettings,
    last_stable_energy: Option<f64>,
    divergence_counter: u32,
}

impl StabilityControl {
    pub fn new(settings: StabilitySettings) -> Self {
        Self {
            settings,
            last_stable_energy: None,
            divergence_counter: 0,
        }
    }

    pub fn settings(&self) -> &StabilitySettings {
        &self.settings
    }

    pub fn divergence_counter(&self) -> u32 {
        self.divergence_counter
    }

    /// Classify the latest energy sample and update the internal state.
    pub fn assess(&mut self, energy: f64) -> StabilityAction {
        if !energy.is_finite() {
            self.divergence_counter += 1;
            if self.divergence_counter > self.settings.fatal_bound {
                return StabilityAction::Fatal;
            }
            return StabilityAction::Halve;
        }

        if let Some(stable) = self.last_stable_energy {
            if energy > stable + self.settings.energy_tolerance
                && self.divergence_counter < self.settings.soft_bound
            {
                self.divergence_counter += 1;
                return StabilityAction::Shrink;
            }
        }

        self.last_stable_energy = Some(energy);
        self.divergence_counter = self.divergence_counter.saturating_sub(1);
        StabilityAction::Stable
    }
}
