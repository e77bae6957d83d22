use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, trace};

use crate::machine::{Phase, TypingMachine, TypingOptions, TypingSnapshot};

/// Publishing end shared between the session and its driver task. Taken out
/// on teardown so the task can no longer publish, even mid-tick.
type Publisher = Arc<Mutex<Option<watch::Sender<TypingSnapshot>>>>;

/// One animated text instance.
///
/// Must be started from inside a tokio runtime. The driver task keeps at most
/// one timer pending and never outlives the session.
pub struct TypingSession {
    state: watch::Receiver<TypingSnapshot>,
    publisher: Publisher,
    task: Option<JoinHandle<()>>,
}

impl TypingSession {
    pub fn start<I, S>(phrases: I, options: TypingOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_machine(TypingMachine::new(phrases, options))
    }

    pub fn from_machine(machine: TypingMachine) -> Self {
        let (tx, state) = watch::channel(machine.snapshot());
        let publisher: Publisher = Arc::new(Mutex::new(Some(tx)));

        let task = match machine.initial_delay() {
            Some(delay) => Some(tokio::spawn(drive(machine, Arc::clone(&publisher), delay))),
            None => {
                debug!("typing session has nothing to animate");
                release(&publisher);
                None
            }
        };

        Self {
            state,
            publisher,
            task,
        }
    }

    /// Current display string.
    pub fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    pub fn snapshot(&self) -> TypingSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published change.
    pub fn subscribe(&self) -> watch::Receiver<TypingSnapshot> {
        self.state.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Resolves once the session reaches [`Phase::Done`] or is stopped.
    /// Looping sessions only resolve through [`stop`](Self::stop).
    pub async fn finished(&self) -> TypingSnapshot {
        let mut rx = self.state.clone();
        if let Ok(snapshot) = rx.wait_for(|snapshot| snapshot.phase == Phase::Done).await {
            return snapshot.clone();
        }
        let snapshot = rx.borrow().clone();
        snapshot
    }

    /// Cancels the pending timer. The visible text stays where it was.
    pub fn stop(&mut self) {
        release(&self.publisher);
        if let Some(task) = self.task.take() {
            task.abort();
            trace!("typing session stopped");
        }
    }
}

impl Drop for TypingSession {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn drive(mut machine: TypingMachine, publisher: Publisher, mut delay: Duration) {
    loop {
        tokio::time::sleep(delay).await;
        let next = machine.advance();

        {
            let guard = match publisher.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let Some(tx) = guard.as_ref() else {
                return;
            };
            tx.send_replace(machine.snapshot());
        }

        match next {
            Some(next) => delay = next,
            None => break,
        }
    }

    debug!(
        phrase_index = machine.phrase_index(),
        "typing session settled"
    );
    release(&publisher);
}

fn release(publisher: &Publisher) {
    let mut guard = match publisher.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    guard.take();
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
