use std::sync::OnceLock;
use crate::utilities::enums::Kernel;

static BEST_KERNEL : OnceLock<Kernel> = OnceLock::new();

/// True when this build carries the AVX2 reducer and the running CPU can execute it.
#[inline]
pub fn avx2_available() -> bool {
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        std::arch::is_x86_feature_detected!("avx2") && std::arch::is_x86_feature_detected!("fma")
    }
    #[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
    {
        false
    }
}

#[inline(always)]
pub fn detect_best_kernel() -> Kernel {
    *BEST_KERNEL.get_or_init(|| {
        if avx2_available() {
            return Kernel::Avx2;
        }
        Kernel::Scalar
    })
}

/// Resolves `Auto` and reports whether an explicit kernel can run here.
#[inline]
pub fn resolve_kernel(kernel: Kernel) -> Option<Kernel> {
    match kernel {
        Kernel::Auto => Some(detect_best_kernel()),
        Kernel::Scalar => Some(Kernel::Scalar),
        Kernel::Avx2 if avx2_available() => Some(Kernel::Avx2),
        Kernel::Avx2 => None,
    }
}

/// Test guard: returns early from a `Result`-returning check when `$kernel` cannot run.
#[macro_export]
macro_rules! skip_if_unsupported {
    ($kernel:expr, $test_name:expr) => {
        if $crate::utilities::helpers::resolve_kernel($kernel).is_none() {
            eprintln!("[{}] Skipping {:?} test – CPU or build lacks AVX2+FMA", $test_name, $kernel);
            return Ok(());
        }
    };
}
