//! Counting fake transport shared by client and scheduler tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use presenced_common::RpcError;

use crate::transport::PresenceTransport;
use crate::update::PresenceUpdate;

#[derive(Default)]
pub(crate) struct CallCounts {
    opens: AtomicU32,
    sends: AtomicU32,
    closes: AtomicU32,
}

impl CallCounts {
    pub(crate) fn opens(&self) -> u32 {
        self.opens.load(Ordering::SeqCst)
    }

    pub(crate) fn sends(&self) -> u32 {
        self.sends.load(Ordering::SeqCst)
    }

    pub(crate) fn closes(&self) -> u32 {
        self.closes.load(Ordering::SeqCst)
    }
}

pub(crate) struct FakeTransport {
    calls: Arc<CallCounts>,
    fail_open: bool,
    fail_send: bool,
    fail_close: bool,
}

impl FakeTransport {
    pub(crate) fn new() -> (Self, Arc<CallCounts>) {
        Self::build(false, false, false)
    }

    pub(crate) fn failing_open() -> (Self, Arc<CallCounts>) {
        Self::build(true, false, false)
    }

    pub(crate) fn failing_send() -> (Self, Arc<CallCounts>) {
        Self::build(false, true, false)
    }

    pub(crate) fn failing_close() -> (Self, Arc<CallCounts>) {
        Self::build(false, false, true)
    }

    fn build(fail_open: bool, fail_send: bool, fail_close: bool) -> (Self, Arc<CallCounts>) {
        let calls = Arc::new(CallCounts::default());
        (
            Self {
                calls: Arc::clone(&calls),
                fail_open,
                fail_send,
                fail_close,
            },
            calls,
        )
    }
}

impl PresenceTransport for FakeTransport {
    fn open(&mut self, _client_id: &str) -> Result<(), RpcError> {
        self.calls.opens.fetch_add(1, Ordering::SeqCst);
        if self.fail_open {
            return Err(RpcError::Connect("fake transport refused".into()));
        }
        Ok(())
    }

    fn send(&mut self, _update: &PresenceUpdate) -> Result<(), RpcError> {
        self.calls.sends.fetch_add(1, Ordering::SeqCst);
        if self.fail_send {
            return Err(RpcError::Send("fake transport send failure".into()));
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), RpcError> {
        self.calls.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(RpcError::Close("fake transport close failure".into()));
        }
        Ok(())
    }
}
