/// Get the current time in seconds since the UNIX epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn current_time_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Get the current time in seconds since the UNIX epoch
#[cfg(target_arch = "wasm32")]
pub fn current_time_secs() -> f64 {
    js_sys::Date::now() / 1000.0
}

/// Milliseconds since the UNIX epoch, used to name exported files
pub fn timestamp_millis() -> u64 {
    (current_time_secs() * 1000.0) as u64
}
