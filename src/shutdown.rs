use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::errors::{AppError, AppResult};

pub struct Shutdown {
    token: CancellationToken,
}

impl Shutdown {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Cancel on Ctrl+C. The watcher task ends with the runtime.
    pub fn cancel_on_ctrl_c(&self) {
        let token = self.token();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupted; aborting");
                token.cancel();
            }
        });
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `fut` unless the token fires first, which yields `AppError::Cancelled`.
pub async fn cancellable<F, T>(token: &CancellationToken, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    tokio::select! {
        _ = token.cancelled() => Err(AppError::Cancelled),
        r = fut => r,
    }
}
