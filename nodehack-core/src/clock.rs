use std::time::{Duration, Instant};

pub const DEFAULT_FPS: u32 = 30;

//
// ──────────────────────────────────────────────────────────────
//   TickClock
//
//   Fixed-rate update scheduler driven by the host loop: poll()
//   is called whenever the loop wakes and reports a tick when
//   one is due. At most one tick per poll; a loop that fell
//   behind is re-anchored rather than replaying missed ticks.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct TickClock
{
  fps: u32,
  interval: Option<Duration>,
  last_tick: Instant,
  next_tick: Option<Instant>,
}

impl TickClock
{
  pub fn new(fps: u32, now: Instant) -> Self
  {
    let mut clock = Self { fps: 0, interval: None, last_tick: now, next_tick: None };
    clock.set_fps(fps, now);
    clock
  }

  /// Reschedule. `0` disables ticking entirely.
  pub fn set_fps(&mut self, fps: u32, now: Instant)
  {
    self.fps = fps;
    self.interval = (fps > 0).then(|| Duration::from_secs_f64(1.0 / fps as f64));
    self.last_tick = now;
    self.next_tick = self.interval.map(|interval| now + interval);

    log::debug!("update tick set to {fps} fps");
  }

  pub fn fps(&self) -> u32
  {
    self.fps
  }

  pub fn interval(&self) -> Option<Duration>
  {
    self.interval
  }

  pub fn next_deadline(&self) -> Option<Instant>
  {
    self.next_tick
  }

  /// Elapsed time since the previous tick, if a tick is due at `now`.
  pub fn poll(&mut self, now: Instant) -> Option<Duration>
  {
    let (interval, due) = (self.interval?, self.next_tick?);
    if now < due
    {
      return None;
    }

    let dt = now.saturating_duration_since(self.last_tick);
    self.last_tick = now;

    let next = due + interval;
    self.next_tick = Some(if next <= now { now + interval } else { next });

    Some(dt)
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  fn ms(n: u64) -> Duration
  {
    Duration::from_millis(n)
  }

  #[test]
  fn test_interval_from_fps()
  {
    let clock = TickClock::new(DEFAULT_FPS, Instant::now());
    assert_eq!(clock.fps(), 30);
    assert_eq!(clock.interval(), Some(Duration::from_secs_f64(1.0 / 30.0)));
  }

  #[test]
  fn test_no_tick_before_deadline()
  {
    let start = Instant::now();
    let mut clock = TickClock::new(10, start);

    assert_eq!(clock.poll(start), None);
    assert_eq!(clock.poll(start + ms(99)), None);
    assert_eq!(clock.poll(start + ms(100)), Some(ms(100)));
  }

  #[test]
  fn test_ticks_keep_fixed_cadence()
  {
    let start = Instant::now();
    let mut clock = TickClock::new(10, start);

    // late by 30ms: dt reflects it, but the next deadline stays on the grid
    assert_eq!(clock.poll(start + ms(130)), Some(ms(130)));
    assert_eq!(clock.next_deadline(), Some(start + ms(200)));

    assert_eq!(clock.poll(start + ms(200)), Some(ms(70)));
  }

  #[test]
  fn test_stall_does_not_replay_missed_ticks()
  {
    let start = Instant::now();
    let mut clock = TickClock::new(10, start);

    assert!(clock.poll(start + ms(1000)).is_some());
    assert_eq!(clock.poll(start + ms(1000)), None);
    assert_eq!(clock.next_deadline(), Some(start + ms(1100)));
  }

  #[test]
  fn test_zero_fps_disables_tick()
  {
    let start = Instant::now();
    let mut clock = TickClock::new(30, start);

    clock.set_fps(0, start);
    assert_eq!(clock.interval(), None);
    assert_eq!(clock.next_deadline(), None);
    assert_eq!(clock.poll(start + Duration::from_secs(60)), None);
  }

  #[test]
  fn test_set_fps_reschedules_from_now()
  {
    let start = Instant::now();
    let mut clock = TickClock::new(0, start);

    clock.set_fps(20, start + ms(500));
    assert_eq!(clock.next_deadline(), Some(start + ms(550)));
    assert_eq!(clock.poll(start + ms(550)), Some(ms(50)));
  }
}
