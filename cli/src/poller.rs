//! Auto-refresh poller for the query view.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Spawn a task that invokes `tick` immediately and then once per
/// `interval`, until the returned handle is aborted.
///
/// The caller owns the handle and must abort it on every exit path of the
/// view that started it — a live poller must never outlive its view.
/// Aborting also cancels whatever call the current tick had in flight.
pub fn spawn_poller<F, Fut>(interval: Duration, mut tick: F) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);
        loop {
            timer.tick().await;
            tick().await;
        }
    })
}
