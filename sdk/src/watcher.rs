//! Live notification stream over the websocket log subscription

use crate::{
    error::{GreetingSdkError, Result},
    events::{parse_logs, RegistryEvent},
};
use futures::stream::{Stream, StreamExt};
use solana_client::{
    nonblocking::pubsub_client::PubsubClient,
    rpc_config::{RpcTransactionLogsConfig, RpcTransactionLogsFilter},
    rpc_response::RpcLogsResponse,
};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::{
    ops::ControlFlow,
    pin::Pin,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    task::{Context, Poll},
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// A notification together with the registry and transaction that produced it
#[derive(Debug, Clone)]
pub struct ObservedEvent {
    pub registry: Pubkey,
    pub signature: String,
    pub event: RegistryEvent,
}

/// Watches the transactions that touch one registry account
#[derive(Clone)]
pub struct EventWatcher {
    ws_url: String,
    program_id: Pubkey,
    registry: Pubkey,
    commitment: CommitmentConfig,
    is_running: Arc<AtomicBool>,
}

impl EventWatcher {
    pub fn new(
        ws_url: String,
        program_id: Pubkey,
        registry: Pubkey,
        commitment: CommitmentConfig,
    ) -> Self {
        Self {
            ws_url,
            program_id,
            registry,
            commitment,
            is_running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn registry(&self) -> Pubkey {
        self.registry
    }

    /// Subscribe and start forwarding notifications
    ///
    /// Returns once the subscription is live. Connection and subscription
    /// failures are returned here rather than ending the stream.
    pub async fn start(&self) -> Result<EventStream> {
        if self.is_running.swap(true, Ordering::SeqCst) {
            return Err(GreetingSdkError::Config("Watcher is already running".to_string()));
        }

        info!("Watching registry {} (program {})", self.registry, self.program_id);

        let (tx, rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = oneshot::channel();
        let watcher = self.clone();
        tokio::spawn(async move {
            watcher.watch_logs(tx, ready_tx).await;
            watcher.is_running.store(false, Ordering::SeqCst);
        });

        let subscribed = ready_rx.await.unwrap_or_else(|_| {
            Err(GreetingSdkError::Config("Watcher stopped before subscribing".to_string()))
        });

        match subscribed {
            Ok(()) => Ok(EventStream { receiver: rx }),
            Err(e) => {
                self.is_running.store(false, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    /// Ask the background task to stop after the next log message
    pub fn stop(&self) {
        info!("Stopping registry event watcher");
        self.is_running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }

    async fn connect(&self) -> Result<PubsubClient> {
        PubsubClient::new(&self.ws_url).await.map_err(|e| {
            GreetingSdkError::Config(format!("Failed to connect to {}: {}", self.ws_url, e))
        })
    }

    async fn watch_logs(
        &self,
        sender: mpsc::UnboundedSender<ObservedEvent>,
        ready: oneshot::Sender<Result<()>>,
    ) {
        let pubsub = match self.connect().await {
            Ok(pubsub) => pubsub,
            Err(e) => {
                let _ = ready.send(Err(e));
                return;
            }
        };

        let filter = RpcTransactionLogsFilter::Mentions(vec![self.registry.to_string()]);
        let config = RpcTransactionLogsConfig {
            commitment: Some(self.commitment),
        };

        let (mut logs, unsubscribe) = match pubsub.logs_subscribe(filter, config).await {
            Ok(subscription) => subscription,
            Err(e) => {
                let _ = ready.send(Err(GreetingSdkError::Config(format!(
                    "Failed to subscribe to logs: {}",
                    e
                ))));
                return;
            }
        };

        if ready.send(Ok(())).is_err() {
            unsubscribe().await;
            return;
        }

        while self.is_running() {
            let Some(response) = logs.next().await else {
                warn!("Log stream ended");
                break;
            };

            if self.forward(&response.value, &sender).is_break() {
                break;
            }
        }

        unsubscribe().await;
    }

    /// Send the notifications of one transaction to the stream
    ///
    /// Breaks once the receiving side has gone away.
    fn forward(
        &self,
        response: &RpcLogsResponse,
        sender: &mpsc::UnboundedSender<ObservedEvent>,
    ) -> ControlFlow<()> {
        // Failed transactions roll back and emit nothing
        if response.err.is_some() {
            debug!("Skipping failed transaction {}", response.signature);
            return ControlFlow::Continue(());
        }

        let events = match parse_logs(&self.program_id, &response.logs) {
            Ok(events) => events,
            Err(e) => {
                warn!("Undecodable logs in {}: {}", response.signature, e);
                return ControlFlow::Continue(());
            }
        };

        for event in events {
            let observed = ObservedEvent {
                registry: self.registry,
                signature: response.signature.clone(),
                event,
            };
            if sender.send(observed).is_err() {
                debug!("Event receiver dropped");
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }
}

/// Stream of observed registry notifications
pub struct EventStream {
    receiver: mpsc::UnboundedReceiver<ObservedEvent>,
}

impl Stream for EventStream {
    type Item = ObservedEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::Event;
    use base64::{engine::general_purpose::STANDARD, Engine};
    use greeting_registry::NewGreeting;
    use solana_sdk::transaction::TransactionError;

    fn watcher(registry: Pubkey) -> EventWatcher {
        EventWatcher::new(
            "ws://127.0.0.1:1".to_string(),
            greeting_registry::ID,
            registry,
            CommitmentConfig::confirmed(),
        )
    }

    fn set_greeting_logs(message: &str) -> (NewGreeting, Vec<String>) {
        let event = NewGreeting {
            sender: Pubkey::new_unique(),
            message: message.to_string(),
            timestamp: 1_700_000_000,
        };
        let logs = vec![
            format!("Program {} invoke [1]", greeting_registry::ID),
            format!("Program data: {}", STANDARD.encode(event.data())),
            format!("Program {} success", greeting_registry::ID),
        ];
        (event, logs)
    }

    #[test]
    fn test_forward_tags_registry_and_signature() {
        let registry = Pubkey::new_unique();
        let (event, logs) = set_greeting_logs("hello");
        let (tx, mut rx) = mpsc::unbounded_channel();

        let response = RpcLogsResponse {
            signature: "sig1".to_string(),
            err: None,
            logs,
        };
        assert!(watcher(registry).forward(&response, &tx).is_continue());

        let observed = rx.try_recv().unwrap();
        assert_eq!(observed.registry, registry);
        assert_eq!(observed.signature, "sig1");
        assert_eq!(observed.event, RegistryEvent::NewGreeting(event));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_forward_skips_failed_transaction() {
        let (_, logs) = set_greeting_logs("rolled back");
        let (tx, mut rx) = mpsc::unbounded_channel();

        let response = RpcLogsResponse {
            signature: "sig2".to_string(),
            err: Some(TransactionError::AccountInUse.into()),
            logs,
        };
        assert!(watcher(Pubkey::new_unique()).forward(&response, &tx).is_continue());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_forward_stops_when_receiver_closed() {
        let (_, logs) = set_greeting_logs("nobody listening");
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        let response = RpcLogsResponse {
            signature: "sig3".to_string(),
            err: None,
            logs,
        };
        assert!(watcher(Pubkey::new_unique()).forward(&response, &tx).is_break());
    }

    #[tokio::test]
    async fn test_start_reports_connection_failure() {
        let watcher = watcher(Pubkey::new_unique());

        assert!(matches!(watcher.start().await, Err(GreetingSdkError::Config(_))));
        assert!(!watcher.is_running());
    }
}
