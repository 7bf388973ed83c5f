//! Helpers shared by the use cases.

use tokio_util::sync::CancellationToken;

/// Whether an optional token has already fired.
pub(crate) fn is_cancelled(token: &Option<CancellationToken>) -> bool {
    token.as_ref().is_some_and(CancellationToken::is_cancelled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_cancelled() {
        assert!(!is_cancelled(&None));
        let token = CancellationToken::new();
        assert!(!is_cancelled(&Some(token.clone())));
        token.cancel();
        assert!(is_cancelled(&Some(token)));
    }
}
