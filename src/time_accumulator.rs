use std::time::Duration;

/// Turns variable frame times into a whole number of fixed detection steps.
pub struct TimeAccumulator {
    accumulated_time: Duration,
    frame_number: u64,
    num_steps: u32,
    max_steps: u32,
    update_rate: Duration,
    time_dilation: f64,
}

impl TimeAccumulator {
    pub fn new(update_rate_hz: u32, max_steps: u32) -> Self {
        TimeAccumulator {
            accumulated_time: Duration::from_nanos(0),
            frame_number: 0,
            num_steps: 0,
            max_steps,
            update_rate: Duration::from_secs(1) / update_rate_hz.max(1),
            time_dilation: 1.0,
        }
    }

    pub fn update(&mut self, delta: Duration) {
        self.frame_number += 1;
        let scaled = if self.time_dilation == 1.0 {
            delta
        } else {
            // out of range scaled times saturate and hit the step cap below
            Duration::try_from_secs_f64(delta.as_secs_f64() * self.time_dilation).unwrap_or(Duration::MAX)
        };
        self.accumulated_time = self.accumulated_time.saturating_add(scaled);
        self.num_steps = u32::try_from(self.accumulated_time.as_nanos() / self.update_rate.as_nanos())
            .unwrap_or(u32::MAX);
        if self.num_steps > self.max_steps {
            log::warn!(
                "capping steps {} from time {} accumulated {} at rate {}",
                self.num_steps,
                delta.as_secs_f64(),
                self.accumulated_time.as_secs_f64(),
                self.update_rate.as_secs_f64(),
            );
            self.accumulated_time = Duration::from_nanos(0);
            self.num_steps = self.max_steps;
        } else {
            self.accumulated_time -= self.update_rate * self.num_steps;
        }
    }

    pub fn step_secs(&self) -> f32 {
        self.update_rate.as_secs_f32()
    }

    pub fn num_steps(&self) -> u32 {
        self.num_steps
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn time_dilation(&self) -> f64 {
        self.time_dilation
    }

    pub fn set_time_dilation(&mut self, time_dilation: f64) {
        self.time_dilation = time_dilation.max(0.0);
    }
}
