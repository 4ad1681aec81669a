use flume::{Receiver, RecvError, Sender};
use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Error, Debug)]
pub(crate) enum ChannelError {
    #[error("Command receiver disconnected")]
    Disconnected,
    #[error("Response channel closed before a response was sent")]
    ResponseDropped,
}

pub(crate) fn two_way_channel<TIn, TOut>() -> (TwoWaySender<TIn, TOut>, TwoWayReceiver<TIn, TOut>)
{
    let (tx, rx) = flume::unbounded();
    (
        TwoWaySender { tx },
        TwoWayReceiver {
            rx,
            responder: None,
        },
    )
}

#[derive(Debug)]
struct Envelope<TIn, TOut> {
    message: TIn,
    responder: Option<oneshot::Sender<TOut>>,
}

#[derive(Debug)]
pub(crate) struct TwoWaySender<TIn, TOut> {
    tx: Sender<Envelope<TIn, TOut>>,
}

impl<TIn, TOut> Clone for TwoWaySender<TIn, TOut> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<TIn, TOut> TwoWaySender<TIn, TOut> {
    pub(crate) fn send(&self, message: TIn) -> Result<(), ChannelError> {
        self.tx
            .send(Envelope {
                message,
                responder: None,
            })
            .map_err(|_| ChannelError::Disconnected)
    }

    pub(crate) async fn send_async(&self, message: TIn) -> Result<(), ChannelError> {
        self.tx
            .send_async(Envelope {
                message,
                responder: None,
            })
            .await
            .map_err(|_| ChannelError::Disconnected)
    }

    pub(crate) async fn get_response(&self, message: TIn) -> Result<TOut, ChannelError> {
        let (responder, response) = oneshot::channel();
        self.tx
            .send_async(Envelope {
                message,
                responder: Some(responder),
            })
            .await
            .map_err(|_| ChannelError::Disconnected)?;
        response.await.map_err(|_| ChannelError::ResponseDropped)
    }
}

#[derive(Debug)]
pub(crate) struct TwoWayReceiver<TIn, TOut> {
    rx: Receiver<Envelope<TIn, TOut>>,
    // Responder attached to the most recently received message, if any
    responder: Option<oneshot::Sender<TOut>>,
}

impl<TIn, TOut> TwoWayReceiver<TIn, TOut> {
    pub(crate) async fn recv_async(&mut self) -> Result<TIn, RecvError> {
        let envelope = self.rx.recv_async().await?;
        self.responder = envelope.responder;
        Ok(envelope.message)
    }

    /// Answers the last received message. Messages sent without a responder
    /// are silently acknowledged.
    pub(crate) fn respond(&mut self, response: TOut) -> Result<(), TOut> {
        match self.responder.take() {
            Some(responder) => responder.send(response),
            None => Ok(()),
        }
    }
}
