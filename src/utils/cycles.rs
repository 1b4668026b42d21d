//! CPU cycle counter used when the `cpu_cycles` feature is enabled.
//!
//! x86_64 reads the TSC, aarch64 the virtual timer counter.

/// Read the current cycle counter.
#[inline(always)]
pub fn read_cycles() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        read_cycles_x86_64()
    }

    #[cfg(target_arch = "aarch64")]
    {
        read_cycles_aarch64()
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        compile_error!("cpu_cycles feature requires x86_64 or aarch64");
    }
}

#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn read_cycles_x86_64() -> u64 {
    use core::arch::x86_64::{_mm_lfence, _rdtsc};
    // SAFETY: LFENCE and RDTSC are available on every x86_64 CPU.
    unsafe {
        // keep the read from being reordered around the timed call
        _mm_lfence();
        let cycles = _rdtsc();
        _mm_lfence();
        cycles
    }
}

#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn read_cycles_aarch64() -> u64 {
    // Fixed-frequency counter, not core cycles, but readable from EL0.
    let val: u64;
    // SAFETY: CNTVCT_EL0 is readable from userspace on all supported kernels.
    unsafe {
        core::arch::asm!("mrs {}, cntvct_el0", out(reg) val);
    }
    val
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cycles_roughly_monotonic() {
        let c1 = read_cycles();
        let c2 = read_cycles();
        assert!(c2 >= c1 || c1 - c2 < 1000);
    }
}
