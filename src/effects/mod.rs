//! Side effects triggered by hits and misses
//!
//! The tick loop only ever sends; it never waits on lighting. Flashes run on
//! a background worker that restores the previous color after a delay.

pub mod color;

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub use color::{GAMUT_A, GAMUT_B, GAMUT_C, Gamut, XyPoint, rgb_to_xy};

/// Color shown when the ball hits a box
pub const HIT_RGB: [u8; 3] = [0, 0, 128];
/// Color shown when a box reaches the base
pub const ERROR_RGB: [u8; 3] = [128, 0, 0];
pub const HIT_FLASH: Duration = Duration::from_millis(250);
pub const ERROR_FLASH: Duration = Duration::from_millis(1500);

/// Capability handed to the session for reacting to game events
pub trait EffectsNotifier {
    fn notify_hit(&mut self);
    fn notify_miss(&mut self);
}

/// Does nothing (headless play and tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEffects;

impl EffectsNotifier for NoopEffects {
    fn notify_hit(&mut self) {}
    fn notify_miss(&mut self) {}
}

/// Commands understood by the lighting worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingCommand {
    FlashHit { group: u8 },
    FlashError { group: u8 },
    SetLightsOn(bool),
}

/// Minimal lamp control surface
pub trait LightBridge: Send + 'static {
    /// Current color of a light group
    fn group_xy(&mut self, group: u8) -> XyPoint;
    fn set_group_xy(&mut self, group: u8, xy: XyPoint);
    fn set_all_on(&mut self, on: bool);
}

/// Bridge that only logs what it would do
#[derive(Debug, Default)]
pub struct LoggingBridge {
    groups: HashMap<u8, XyPoint>,
}

impl LightBridge for LoggingBridge {
    fn group_xy(&mut self, group: u8) -> XyPoint {
        *self.groups.get(&group).unwrap_or(&XyPoint::WHITE)
    }

    fn set_group_xy(&mut self, group: u8, xy: XyPoint) {
        log::debug!("Light group {group} -> ({:.4}, {:.4})", xy.x, xy.y);
        self.groups.insert(group, xy);
    }

    fn set_all_on(&mut self, on: bool) {
        log::debug!("All lights {}", if on { "on" } else { "off" });
    }
}

/// Fire-and-forget lighting driven by a background worker
pub struct LightingNotifier {
    tx: Option<Sender<LightingCommand>>,
    worker: Option<JoinHandle<()>>,
    group: u8,
}

impl LightingNotifier {
    /// Start the worker; hits and misses flash `group`
    pub fn spawn<B: LightBridge>(bridge: B, group: u8) -> Self {
        let (tx, rx) = mpsc::channel();
        let bridge = Arc::new(Mutex::new(bridge));
        let worker = thread::spawn(move || run_worker(rx, bridge, GAMUT_C));
        Self {
            tx: Some(tx),
            worker: Some(worker),
            group,
        }
    }

    pub fn flash_hit(&self, group: u8) {
        self.send(LightingCommand::FlashHit { group });
    }

    pub fn flash_error(&self, group: u8) {
        self.send(LightingCommand::FlashError { group });
    }

    pub fn set_lights_on(&self, on: bool) {
        self.send(LightingCommand::SetLightsOn(on));
    }

    fn send(&self, command: LightingCommand) {
        let Some(tx) = &self.tx else { return };
        if tx.send(command).is_err() {
            log::warn!("Lighting worker gone, dropped {command:?}");
        }
    }
}

impl EffectsNotifier for LightingNotifier {
    fn notify_hit(&mut self) {
        self.flash_hit(self.group);
    }

    fn notify_miss(&mut self) {
        self.flash_error(self.group);
    }
}

impl Drop for LightingNotifier {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker<B: LightBridge>(rx: Receiver<LightingCommand>, bridge: Arc<Mutex<B>>, gamut: Gamut) {
    for command in rx {
        match command {
            LightingCommand::FlashHit { group } => {
                flash(&bridge, group, rgb_to_xy(HIT_RGB, &gamut), HIT_FLASH)
            }
            LightingCommand::FlashError { group } => {
                flash(&bridge, group, rgb_to_xy(ERROR_RGB, &gamut), ERROR_FLASH)
            }
            LightingCommand::SetLightsOn(on) => match bridge.lock() {
                Ok(mut b) => b.set_all_on(on),
                Err(_) => log::warn!("Light bridge poisoned"),
            },
        }
    }
    log::debug!("Lighting worker stopped");
}

/// Set the flash color now and restore the prior color on a timer thread
fn flash<B: LightBridge>(bridge: &Arc<Mutex<B>>, group: u8, xy: XyPoint, hold: Duration) {
    let prior = {
        let Ok(mut b) = bridge.lock() else {
            log::warn!("Light bridge poisoned");
            return;
        };
        let prior = b.group_xy(group);
        b.set_group_xy(group, xy);
        prior
    };

    let bridge = Arc::clone(bridge);
    thread::spawn(move || {
        thread::sleep(hold);
        if let Ok(mut b) = bridge.lock() {
            b.set_group_xy(group, prior);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[derive(Clone, Default)]
    struct RecordingBridge {
        log: Arc<Mutex<Vec<(u8, XyPoint)>>>,
        on: Arc<Mutex<Option<bool>>>,
    }

    impl LightBridge for RecordingBridge {
        fn group_xy(&mut self, _group: u8) -> XyPoint {
            XyPoint::WHITE
        }

        fn set_group_xy(&mut self, group: u8, xy: XyPoint) {
            self.log.lock().unwrap().push((group, xy));
        }

        fn set_all_on(&mut self, on: bool) {
            *self.on.lock().unwrap() = Some(on);
        }
    }

    fn wait_for(mut done: impl FnMut() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < Duration::from_secs(5) {
            if done() {
                return true;
            }
            thread::sleep(Duration::from_millis(10));
        }
        false
    }

    #[test]
    fn test_flash_hit_sets_then_restores() {
        let bridge = RecordingBridge::default();
        let log = Arc::clone(&bridge.log);
        let mut notifier = LightingNotifier::spawn(bridge, 1);

        notifier.notify_hit();
        assert!(wait_for(|| log.lock().unwrap().len() >= 2));

        let entries = log.lock().unwrap().clone();
        assert_eq!(entries[0], (1, rgb_to_xy(HIT_RGB, &GAMUT_C)));
        assert_eq!(entries[1], (1, XyPoint::WHITE));
    }

    #[test]
    fn test_miss_flashes_error_color() {
        let bridge = RecordingBridge::default();
        let log = Arc::clone(&bridge.log);
        let mut notifier = LightingNotifier::spawn(bridge, 3);

        notifier.notify_miss();
        assert!(wait_for(|| !log.lock().unwrap().is_empty()));
        assert_eq!(log.lock().unwrap()[0], (3, rgb_to_xy(ERROR_RGB, &GAMUT_C)));
    }

    #[test]
    fn test_lights_on() {
        let bridge = RecordingBridge::default();
        let on = Arc::clone(&bridge.on);
        let notifier = LightingNotifier::spawn(bridge, 1);

        notifier.set_lights_on(true);
        assert!(wait_for(|| *on.lock().unwrap() == Some(true)));
    }

    #[test]
    fn test_logging_bridge_remembers_color() {
        let mut bridge = LoggingBridge::default();
        assert_eq!(bridge.group_xy(1), XyPoint::WHITE);
        bridge.set_group_xy(1, GAMUT_C.red);
        assert_eq!(bridge.group_xy(1), GAMUT_C.red);
    }
}
