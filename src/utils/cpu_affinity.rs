//! Thread pinning for steadier timings.
//!
//! Linux uses `sched_setaffinity` through libc; elsewhere pinning is a no-op
//! and [`CorePin::core_id`] reports `None`.

use tracing::{debug, warn};

#[cfg(target_os = "linux")]
mod platform {
    /// Saved affinity mask of the calling thread.
    pub struct Saved(libc::cpu_set_t);

    pub fn current_cpu() -> Option<usize> {
        // SAFETY: sched_getcpu has no preconditions.
        let cpu = unsafe { libc::sched_getcpu() };
        (cpu >= 0).then_some(cpu as usize)
    }

    pub fn save() -> Option<Saved> {
        // SAFETY: cpu_set_t is plain data; the kernel fills it in.
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            (libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut set) == 0)
                .then_some(Saved(set))
        }
    }

    pub fn pin(core_id: usize) -> bool {
        // SAFETY: the set is zeroed before use and sized correctly.
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core_id, &mut set);
            libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
        }
    }

    pub fn restore(saved: &Saved) -> bool {
        // SAFETY: the mask came from sched_getaffinity on this thread.
        unsafe {
            libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &saved.0) == 0
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod platform {
    pub struct Saved;

    pub fn current_cpu() -> Option<usize> {
        None
    }
    pub fn save() -> Option<Saved> {
        None
    }
    pub fn pin(_core_id: usize) -> bool {
        false
    }
    pub fn restore(_saved: &Saved) -> bool {
        true
    }
}

/// When the harness pins the measuring thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinStrategy {
    /// Never pin.
    #[default]
    Off,
    /// Pin once for a whole run.
    Global,
    /// Pin around every timed call.
    PerRun,
}

/// RAII guard: pins the current thread to the core it is running on and
/// restores the previous affinity mask on drop.
pub struct CorePin {
    saved: Option<platform::Saved>,
    core: Option<usize>,
}

impl CorePin {
    pub fn current() -> Self {
        let Some(core) = platform::current_cpu() else {
            debug!("current CPU unknown, not pinning");
            return Self::unpinned();
        };
        let Some(saved) = platform::save() else {
            warn!("could not read CPU affinity, not pinning");
            return Self::unpinned();
        };
        if platform::pin(core) {
            Self {
                saved: Some(saved),
                core: Some(core),
            }
        } else {
            warn!(core, "failed to pin thread");
            Self::unpinned()
        }
    }

    fn unpinned() -> Self {
        Self {
            saved: None,
            core: None,
        }
    }

    /// Core the thread is pinned to, if pinning succeeded.
    pub fn core_id(&self) -> Option<usize> {
        self.core
    }
}

impl Drop for CorePin {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            if !platform::restore(&saved) {
                warn!("failed to restore CPU affinity");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_guard_round_trip() {
        let guard = CorePin::current();
        if let Some(core) = guard.core_id() {
            assert_eq!(platform::current_cpu(), Some(core));
        }
        drop(guard);
    }

    #[test]
    fn test_default_strategy_is_off() {
        assert_eq!(PinStrategy::default(), PinStrategy::Off);
    }
}
