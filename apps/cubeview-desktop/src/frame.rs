use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Number of frames averaged for the FPS readout.
const HISTORY: usize = 60;

/// Frame delta clock. The first tick yields zero so the camera does not jump
/// on the first frame.
#[derive(Debug)]
pub struct FrameClock {
    last: Option<Instant>,
    timer: FrameTimer,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: None,
            timer: FrameTimer::new(HISTORY),
        }
    }

    /// Seconds since the previous tick.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        if !dt.is_zero() {
            self.timer.record(dt);
        }
        dt.as_secs_f32()
    }

    pub fn fps(&self) -> f32 {
        self.timer.fps()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Rolling average of recent frame times.
#[derive(Debug)]
struct FrameTimer {
    samples: VecDeque<Duration>,
    capacity: usize,
    total: Duration,
}

impl FrameTimer {
    fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            total: Duration::ZERO,
        }
    }

    fn record(&mut self, frame_time: Duration) {
        if self.samples.len() == self.capacity {
            if let Some(oldest) = self.samples.pop_front() {
                self.total -= oldest;
            }
        }
        self.samples.push_back(frame_time);
        self.total += frame_time;
    }

    fn average(&self) -> Option<Duration> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.total / self.samples.len() as u32)
    }

    fn fps(&self) -> f32 {
        match self.average() {
            Some(avg) if !avg.is_zero() => 1.0 / avg.as_secs_f32(),
            _ => 0.0,
        }
    }
}

/// Rate limiter for work that should not run every frame.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True at most once per interval.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        assert_eq!(clock.tick(start), 0.0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn tick_measures_elapsed() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick(start);
        let dt = clock.tick(start + ms(16));
        assert!((dt - 0.016).abs() < 1e-6);
        let dt = clock.tick(start + ms(48));
        assert!((dt - 0.032).abs() < 1e-6);
    }

    #[test]
    fn fps_from_average() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        for i in 0..=10 {
            clock.tick(start + ms(20 * i));
        }
        assert!((clock.fps() - 50.0).abs() < 0.01);
    }

    #[test]
    fn timer_window_rolls() {
        let mut timer = FrameTimer::new(2);
        timer.record(ms(100));
        timer.record(ms(10));
        timer.record(ms(10));
        assert_eq!(timer.average(), Some(ms(10)));
        assert!((timer.fps() - 100.0).abs() < 0.01);
    }

    #[test]
    fn throttle() {
        let mut throttle = Throttle::new(ms(500));
        let start = Instant::now();
        assert!(throttle.ready(start));
        assert!(!throttle.ready(start + ms(100)));
        assert!(!throttle.ready(start + ms(499)));
        assert!(throttle.ready(start + ms(500)));
        assert!(!throttle.ready(start + ms(600)));
    }
}
