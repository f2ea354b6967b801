/// Blocking yes/no prompt. An unavailable window counts as "no".
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Ask twice; both answers must be "yes"
pub fn confirm_twice(first: &str, second: &str) -> bool {
    confirm(first) && confirm(second)
}
