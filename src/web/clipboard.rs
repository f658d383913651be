//! Async clipboard access.

use wasm_bindgen_futures::JsFuture;

/// A failed clipboard write. The UI shows a fixed message; the detail is for
/// whoever is debugging.
#[derive(Debug, Clone)]
pub struct ClipboardError(String);

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "clipboard write failed: {}", self.0)
    }
}

/// Writes `text` to the system clipboard. Fails when no window exists or the
/// page lacks clipboard permission.
pub async fn write_text(text: &str) -> Result<(), ClipboardError> {
    let window = web_sys::window().ok_or_else(|| ClipboardError("no window".into()))?;
    let promise = window.navigator().clipboard().write_text(text);

    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|err| ClipboardError(format!("{err:?}")))
}

#[cfg(test)]
mod tests {
    use super::ClipboardError;

    #[test]
    fn display_carries_the_failure_detail() {
        let err = ClipboardError("NotAllowedError: permission denied".to_string());
        assert_eq!(
            err.to_string(),
            "clipboard write failed: NotAllowedError: permission denied"
        );
    }
}
