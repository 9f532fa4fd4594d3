//! Thread-safe wrapper for [`Simulation`] used across behaviour tests.

use coyote::Simulation;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Wrapper that forwards `Send` and `Sync` because access is mutex-guarded.
pub struct ThreadSafeSim(pub Simulation);

impl fmt::Debug for ThreadSafeSim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadSafeSim")
            .field("ticks", &self.0.ticks())
            .finish()
    }
}

impl Deref for ThreadSafeSim {
    type Target = Simulation;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ThreadSafeSim {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// SAFETY: rspec fixtures must implement `Clone + Send + Sync`, and the suites
// run serially. All access to the wrapped simulation is guarded by the mutex,
// so forwarding `Send`/`Sync` is sound for this test-only wrapper.
unsafe impl Send for ThreadSafeSim {}
unsafe impl Sync for ThreadSafeSim {}

/// Shared pointer type for the wrapped simulation.
pub type SharedSim = Arc<Mutex<ThreadSafeSim>>;

/// Wraps a simulation for sharing between rspec blocks.
pub fn share(sim: Simulation) -> SharedSim {
    Arc::new(Mutex::new(ThreadSafeSim(sim)))
}

/// Locks the shared simulation, recovering from a poisoned mutex.
pub fn lock_sim(sim: &SharedSim) -> MutexGuard<'_, ThreadSafeSim> {
    sim.lock().unwrap_or_else(PoisonError::into_inner)
}
