//! Clock abstraction for timed samples.
//!
//! By default samples are wall-clock microseconds taken from `Instant`.
//! With the `cpu_cycles` feature they are raw cycle-counter ticks.

/// Opaque start mark returned by [`now`].
#[cfg(not(feature = "cpu_cycles"))]
pub type Stamp = std::time::Instant;

#[cfg(feature = "cpu_cycles")]
pub type Stamp = u64;

/// Take a start mark.
#[cfg(not(feature = "cpu_cycles"))]
#[inline(always)]
pub fn now() -> Stamp {
    std::time::Instant::now()
}

#[cfg(feature = "cpu_cycles")]
#[inline(always)]
pub fn now() -> Stamp {
    crate::utils::cycles::read_cycles()
}

/// Whole units elapsed since `start`.
#[cfg(not(feature = "cpu_cycles"))]
#[inline(always)]
pub fn elapsed(start: Stamp) -> u64 {
    start.elapsed().as_micros() as u64
}

#[cfg(feature = "cpu_cycles")]
#[inline(always)]
pub fn elapsed(start: Stamp) -> u64 {
    crate::utils::cycles::read_cycles().saturating_sub(start)
}

/// Unit name used in CSV headers and summaries.
#[cfg(not(feature = "cpu_cycles"))]
pub const fn unit_name() -> &'static str {
    "us"
}

#[cfg(feature = "cpu_cycles")]
pub const fn unit_name() -> &'static str {
    #[cfg(target_arch = "aarch64")]
    {
        "ticks"
    }
    #[cfg(not(target_arch = "aarch64"))]
    {
        "cycles"
    }
}

/// Time a single call of `f`, returning the sample and the call's result.
#[inline(always)]
pub fn measure<R, F>(f: F) -> (u64, R)
where
    F: FnOnce() -> R,
{
    let start = now();
    let result = f();
    (elapsed(start), result)
}
