use log::info;
use wasm_bindgen::JsValue;
use web_sys::js_sys::Reflect;

const BYTES_PER_MB: f64 = 1_048_576.0;

/// High resolution timestamp in milliseconds, or 0 outside a window.
pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Runs `work` and logs how long it took.
pub fn measure_time<R>(name: &str, work: impl FnOnce() -> R) -> R {
    measure_with(now, name, work).0
}

/// Like `measure_time` with an explicit clock; also returns the elapsed milliseconds.
pub fn measure_with<R>(clock: impl Fn() -> f64, name: &str, work: impl FnOnce() -> R) -> (R, f64) {
    let start = clock();
    let result = work();
    let elapsed = clock() - start;
    info!("{} took {} milliseconds", name, elapsed);
    (result, elapsed)
}

/// JS heap usage in whole megabytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryUsage {
    pub used: u64,
    pub total: u64,
    pub limit: u64,
}

impl MemoryUsage {
    pub fn from_bytes(used: f64, total: f64, limit: f64) -> Self {
        let mb = |bytes: f64| (bytes / BYTES_PER_MB).round().max(0.0) as u64;
        Self { used: mb(used), total: mb(total), limit: mb(limit) }
    }
}

/// Reads `performance.memory`, which only Chromium browsers expose.
pub fn memory_usage() -> Option<MemoryUsage> {
    let performance = web_sys::window()?.performance()?;
    let memory = Reflect::get(&performance, &JsValue::from_str("memory")).ok()?;
    if memory.is_undefined() || memory.is_null() {
        return None;
    }
    let read = |key: &str| Reflect::get(&memory, &JsValue::from_str(key)).ok().and_then(|v| v.as_f64());
    Some(MemoryUsage::from_bytes(
        read("usedJSHeapSize")?,
        read("totalJSHeapSize")?,
        read("jsHeapSizeLimit")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn measures_elapsed_time_around_the_work() {
        let clock = Cell::new(100.0);
        let (value, elapsed) = measure_with(
            || clock.get(),
            "attach",
            || {
                clock.set(112.5);
                42
            },
        );
        assert_eq!(value, 42);
        assert_eq!(elapsed, 12.5);
    }

    #[test]
    fn memory_is_rounded_to_megabytes() {
        let usage = MemoryUsage::from_bytes(10.0 * BYTES_PER_MB + 600_000.0, 32.0 * BYTES_PER_MB, 2048.0 * BYTES_PER_MB);
        assert_eq!(usage, MemoryUsage { used: 11, total: 32, limit: 2048 });
    }
}
