//! Build instruction queue
//!
//! The request path must never wait on a build, so enqueueing is a
//! `try_send`: a full queue drops the instruction and the next request for
//! that account asks again. Instructions for an account already waiting in
//! the queue are coalesced.

use dashmap::DashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::{TryRecvError, TrySendError};

/// Request to (re)build the trees for one account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInstruction {
    pub account_id: String,
    pub raw_config: Vec<u8>,
}

impl BuildInstruction {
    pub fn new(account_id: impl Into<String>, raw_config: impl Into<Vec<u8>>) -> Self {
        Self {
            account_id: account_id.into(),
            raw_config: raw_config.into(),
        }
    }
}

/// What happened to an enqueued instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// Accepted by the queue
    Queued,
    /// An instruction for the same account is already waiting
    Coalesced,
    /// Queue full
    Dropped,
    /// The worker has gone away
    Closed,
}

/// Sending half, held by the request path
#[derive(Debug, Clone)]
pub struct BuildQueue {
    sender: mpsc::Sender<BuildInstruction>,
    pending: Arc<DashSet<String>>,
}

/// Receiving half, held by the tree builder
#[derive(Debug)]
pub struct BuildReceiver {
    receiver: mpsc::Receiver<BuildInstruction>,
    pending: Arc<DashSet<String>>,
}

impl BuildQueue {
    /// Create a queue holding at most `capacity` instructions
    pub fn bounded(capacity: usize) -> (BuildQueue, BuildReceiver) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let pending = Arc::new(DashSet::new());

        (
            BuildQueue {
                sender,
                pending: Arc::clone(&pending),
            },
            BuildReceiver { receiver, pending },
        )
    }

    /// Offer an instruction without blocking
    pub fn enqueue(&self, instruction: BuildInstruction) -> EnqueueOutcome {
        if !self.pending.insert(instruction.account_id.clone()) {
            return EnqueueOutcome::Coalesced;
        }

        match self.sender.try_send(instruction) {
            Ok(()) => EnqueueOutcome::Queued,
            Err(TrySendError::Full(instruction)) => {
                self.pending.remove(&instruction.account_id);
                tracing::warn!(
                    account_id = %instruction.account_id,
                    "build queue full, dropping instruction"
                );
                EnqueueOutcome::Dropped
            }
            Err(TrySendError::Closed(instruction)) => {
                self.pending.remove(&instruction.account_id);
                EnqueueOutcome::Closed
            }
        }
    }

    /// Accounts with an instruction waiting
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl BuildReceiver {
    /// Wait for the next instruction; `None` once every sender is gone
    pub async fn recv(&mut self) -> Option<BuildInstruction> {
        let instruction = self.receiver.recv().await?;
        self.pending.remove(&instruction.account_id);
        Some(instruction)
    }

    /// Take the next instruction if one is waiting
    pub fn try_recv(&mut self) -> Option<BuildInstruction> {
        match self.receiver.try_recv() {
            Ok(instruction) => {
                self.pending.remove(&instruction.account_id);
                Some(instruction)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}
