//! Background request plumbing for the screens.
//!
//! Every backend call runs on its own thread with a private tokio runtime and
//! reports back over a channel that the UI polls once per frame.

use futures::future::{AbortHandle, AbortRegistration, Abortable};
use std::future::Future;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

pub type RequestResult<T> = Result<T, String>;

const WORKER_PANICKED: &str =
    "Something went wrong while processing that request. Please try again.";

/// Run one request to completion on the current thread (non-async caller).
pub fn run_request<T, F>(work: F, tx: Sender<RequestResult<T>>, abort_reg: AbortRegistration)
where
    F: Future<Output = RequestResult<T>>,
{
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            let _ = tx.send(Err(format!("Failed to start async runtime: {}", e)));
            return;
        }
    };

    let outcome = match rt.block_on(Abortable::new(work, abort_reg)) {
        Ok(result) => result,
        Err(_aborted) => Err("Cancelled".to_string()),
    };

    // The receiver is gone if the screen was dropped; the late result is discarded.
    let _ = tx.send(outcome);
}

/// Handle to one outstanding request. Dropping it aborts the request.
pub struct PendingRequest<T> {
    rx: Receiver<RequestResult<T>>,
    abort_handle: AbortHandle,
}

impl<T: Send + 'static> PendingRequest<T> {
    pub fn spawn<F>(work: F) -> Self
    where
        F: Future<Output = RequestResult<T>> + Send + 'static,
    {
        let (tx, rx) = channel::<RequestResult<T>>();
        let (abort_handle, abort_reg) = AbortHandle::new_pair();

        std::thread::spawn(move || {
            let tx_panic = tx.clone();
            let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                run_request(work, tx, abort_reg);
            }));
            if res.is_err() {
                tracing::error!("request worker panicked");
                let _ = tx_panic.send(Err(WORKER_PANICKED.to_string()));
            }
        });

        Self { rx, abort_handle }
    }
}

impl<T> PendingRequest<T> {
    /// Non-blocking check for the result.
    pub fn poll(&self) -> Option<RequestResult<T>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(WORKER_PANICKED.to_string())),
        }
    }

    pub fn cancel(&self) {
        self.abort_handle.abort();
    }
}

impl<T> Drop for PendingRequest<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::wait_for;
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_result_is_delivered() {
        let pending = PendingRequest::spawn(async { Ok::<_, String>(42) });
        assert_eq!(wait_for(|| pending.poll()), Ok(42));
    }

    #[test]
    fn test_cancel_reports_cancelled() {
        let pending = PendingRequest::spawn(async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok::<_, String>(())
        });
        pending.cancel();
        assert_eq!(wait_for(|| pending.poll()), Err("Cancelled".to_string()));
    }

    #[test]
    fn test_panic_becomes_failure() {
        async fn explode() -> RequestResult<()> {
            panic!("boom")
        }

        let pending = PendingRequest::spawn(explode());
        let result = wait_for(|| pending.poll());
        assert_eq!(result, Err(WORKER_PANICKED.to_string()));
    }
}
