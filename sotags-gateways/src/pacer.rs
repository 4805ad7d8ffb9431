use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use sotags_core::gateways::pacer::{Interrupted, RequestPacer};

/// Blocks the calling thread for the requested delay.
///
/// Waiting threads are woken up immediately when interrupted.
/// Once interrupted the pacer stays interrupted.
#[derive(Debug, Default)]
pub struct SleepPacer {
    interrupted: Mutex<bool>,
    wakeup: Condvar,
}

impl SleepPacer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RequestPacer for SleepPacer {
    fn pause(&self, delay: Duration) -> Result<(), Interrupted> {
        let deadline = Instant::now() + delay;
        let mut interrupted = self.interrupted.lock();
        while !*interrupted {
            if self.wakeup.wait_until(&mut interrupted, deadline).timed_out() {
                break;
            }
        }
        if *interrupted {
            return Err(Interrupted);
        }
        Ok(())
    }

    fn interrupt(&self) {
        *self.interrupted.lock() = true;
        self.wakeup.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    #[test]
    fn pause_for_the_requested_delay() {
        let pacer = SleepPacer::new();
        let started = Instant::now();
        assert!(pacer.pause(Duration::from_millis(20)).is_ok());
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn pause_without_delay() {
        let pacer = SleepPacer::new();
        assert!(pacer.pause(Duration::ZERO).is_ok());
    }

    #[test]
    fn fail_immediately_if_interrupted_before() {
        let pacer = SleepPacer::new();
        pacer.interrupt();
        let started = Instant::now();
        assert!(pacer.pause(Duration::from_secs(60)).is_err());
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn wake_up_when_interrupted_while_waiting() {
        let pacer = Arc::new(SleepPacer::new());
        let interrupter = {
            let pacer = Arc::clone(&pacer);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(50));
                pacer.interrupt();
            })
        };
        let started = Instant::now();
        assert!(pacer.pause(Duration::from_secs(60)).is_err());
        assert!(started.elapsed() < Duration::from_secs(10));
        interrupter.join().unwrap();
    }
}
