// Single-consumer outcome delivery — marshals fetch results from worker
// tasks back to the context that owns the session.

use tokio::sync::mpsc;

use crate::error::LoadError;
use crate::image::DecodedImage;

/// The tagged result of one fetch. `Success(None)` means "clear the image".
#[derive(Debug)]
pub enum Outcome {
    Success(Option<DecodedImage>),
    Failure(LoadError),
}

/// One posted delivery. The sequence number identifies which `load` call
/// produced it; the delivery channel itself imposes no ordering across loads
/// beyond post order.
#[derive(Debug)]
pub struct Delivery {
    pub seq: u64,
    pub outcome: Outcome,
}

/// Posting half, cloned into each fetch task.
#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Delivery>,
}

impl Dispatcher {
    pub fn post(&self, seq: u64, outcome: Outcome) {
        // Send fails only if the session (receiver) is gone; nothing left
        // to deliver to in that case.
        let _ = self.tx.send(Delivery { seq, outcome });
    }
}

/// Receiving half, held by the session and drained on its owning context.
pub struct Deliveries {
    rx: mpsc::UnboundedReceiver<Delivery>,
}

impl Deliveries {
    /// Wait for the next posted delivery.
    pub async fn recv(&mut self) -> Option<Delivery> {
        self.rx.recv().await
    }

    /// Take a delivery if one is already queued.
    pub fn try_recv(&mut self) -> Option<Delivery> {
        self.rx.try_recv().ok()
    }
}

/// Create a connected dispatcher/deliveries pair.
pub fn channel() -> (Dispatcher, Deliveries) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Dispatcher { tx }, Deliveries { rx })
}
