//! Thread-backed driver for [`TypewriterEngine`] playback.
//!
//! Invariant: teardown-safe scheduling — the worker observes the stop flag
//! before every engine mutation, and [`Player::stop`] joins the worker, so
//! no transition fires after disposal. Exactly one worker exists per
//! player; each tick schedules the next only after completing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::typewriter::{PlaybackSnapshot, TypewriterEngine};

type RenderRequester = Arc<dyn Fn() + Send + Sync>;

pub struct Player {
    engine: Arc<Mutex<TypewriterEngine>>,
    render_requester: Option<RenderRequester>,
    stop_flag: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl Player {
    /// Creates a player and immediately starts playback.
    #[must_use]
    pub fn new(engine: TypewriterEngine, render_requester: Option<RenderRequester>) -> Self {
        let mut player = Self {
            engine: Arc::new(Mutex::new(engine)),
            render_requester,
            stop_flag: Arc::new(AtomicBool::new(false)),
            worker: None,
        };
        player.start();
        player
    }

    pub fn start(&mut self) {
        if self.worker.is_some() {
            return;
        }

        self.stop_flag.store(false, Ordering::SeqCst);

        let engine = Arc::clone(&self.engine);
        let stop_flag = Arc::clone(&self.stop_flag);
        let render_requester = self.render_requester.clone();

        self.worker = Some(thread::spawn(move || loop {
            if stop_flag.load(Ordering::SeqCst) {
                break;
            }

            let delay = {
                let mut engine = lock_unpoisoned(&engine);
                if stop_flag.load(Ordering::SeqCst) {
                    break;
                }
                engine.tick()
            };

            if let Some(requester) = render_requester.as_ref() {
                requester();
            }

            match delay {
                Some(delay) => sleep_observing_stop(&stop_flag, delay),
                None => break,
            }
        }));
    }

    /// Stops playback and joins the worker. After this returns, the engine
    /// state is frozen until `start` or `replay`.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    /// Resets the engine to its initial state and restarts playback.
    pub fn replay(&mut self) {
        self.stop();
        lock_unpoisoned(&self.engine).replay();
        self.start();
    }

    /// True while the worker is attached and playback has not finished.
    pub fn is_playing(&self) -> bool {
        self.worker.is_some() && !lock_unpoisoned(&self.engine).is_finished()
    }

    #[must_use]
    pub fn snapshot(&self) -> PlaybackSnapshot {
        lock_unpoisoned(&self.engine).snapshot()
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.stop();
    }
}

fn sleep_observing_stop(stop_flag: &AtomicBool, delay: Duration) {
    // Sleep in short slices so teardown never waits out a long line pause.
    const SLICE: Duration = Duration::from_millis(25);
    let mut remaining = delay;
    while !remaining.is_zero() {
        if stop_flag.load(Ordering::SeqCst) {
            return;
        }
        let step = remaining.min(SLICE);
        thread::sleep(step);
        remaining = remaining.saturating_sub(step);
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    use crate::pacing::Pacing;
    use crate::script::ScriptLine;
    use crate::typewriter::TypewriterEngine;

    use super::Player;

    fn fast_pacing() -> Pacing {
        Pacing::fixed()
            .with_char_delays(Duration::from_millis(1), Duration::from_millis(1))
            .with_pauses(Duration::from_millis(1), Duration::from_millis(1))
    }

    fn short_engine() -> TypewriterEngine {
        TypewriterEngine::new(
            vec![ScriptLine::command("a"), ScriptLine::log("bb")],
            fast_pacing(),
        )
    }

    fn wait_until_finished(player: &Player) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while player.snapshot().busy {
            assert!(Instant::now() < deadline, "playback should finish promptly");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn player_drives_playback_to_completion_and_requests_renders() {
        let renders = Arc::new(AtomicUsize::new(0));
        let renders_clone = Arc::clone(&renders);
        let requester = Arc::new(move || {
            renders_clone.fetch_add(1, Ordering::SeqCst);
        });

        let player = Player::new(short_engine(), Some(requester));
        wait_until_finished(&player);

        let snapshot = player.snapshot();
        assert_eq!(snapshot.completed_lines.len(), 2);
        assert!(renders.load(Ordering::SeqCst) >= 2);
    }

    #[test]
    fn stop_freezes_the_engine_state() {
        let mut player = Player::new(
            TypewriterEngine::new(vec![ScriptLine::log("a long narrative line")], fast_pacing()),
            None,
        );

        thread::sleep(Duration::from_millis(10));
        player.stop();

        let frozen = player.snapshot();
        thread::sleep(Duration::from_millis(50));
        assert_eq!(player.snapshot(), frozen);
    }

    #[test]
    fn replay_restarts_from_the_beginning() {
        let mut player = Player::new(short_engine(), None);
        wait_until_finished(&player);

        player.replay();
        wait_until_finished(&player);

        let snapshot = player.snapshot();
        assert_eq!(snapshot.completed_lines.len(), 2);
        assert_eq!(snapshot.completed_lines[0].text, "a");
    }

    #[test]
    fn drop_during_playback_joins_cleanly() {
        let player = Player::new(
            TypewriterEngine::new(
                vec![ScriptLine::error("slow boundary line")],
                Pacing::fixed(),
            ),
            None,
        );
        drop(player);
    }
}
