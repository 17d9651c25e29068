// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory [`BlobHandle`] for exercising `BlobStream` without SQLite.
//!
//! The handle is moved into the stream under test; the paired [`MockProbe`]
//! stays with the test to inject failures and inspect what the stream did,
//! including after the stream is dropped.

use std::sync::{Arc, Mutex, MutexGuard};

use sqlblob_core::{BlobHandle, EngineError};

/// `SQLITE_ERROR`, returned for out-of-range reads and writes.
pub const OUT_OF_RANGE: i32 = 1;

#[derive(Debug, Default)]
struct MockState {
    data: Vec<u8>,
    read_calls: usize,
    write_calls: usize,
    releases: usize,
    fail_next_read: Option<i32>,
    fail_next_write: Option<i32>,
    fail_release: Option<i32>,
}

/// A fixed-size in-memory BLOB cell.
#[derive(Debug)]
pub struct MockBlobHandle {
    state: Arc<Mutex<MockState>>,
}

/// Test-side view of a [`MockBlobHandle`].
#[derive(Debug, Clone)]
pub struct MockProbe {
    state: Arc<Mutex<MockState>>,
}

impl MockBlobHandle {
    /// A handle over `data`, plus the probe that observes it.
    pub fn new(data: Vec<u8>) -> (Self, MockProbe) {
        let state = Arc::new(Mutex::new(MockState {
            data,
            ..MockState::default()
        }));
        (
            Self {
                state: Arc::clone(&state),
            },
            MockProbe { state },
        )
    }

    /// A handle over `len` zero bytes.
    pub fn zeroed(len: usize) -> (Self, MockProbe) {
        Self::new(vec![0; len])
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl BlobHandle for MockBlobHandle {
    fn byte_len(&self) -> u64 {
        self.state().data.len() as u64
    }

    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<(), EngineError> {
        let mut state = self.state();
        state.read_calls += 1;
        if let Some(code) = state.fail_next_read.take() {
            return Err(EngineError::new(code, "injected read failure"));
        }
        let start = offset as usize;
        let src = state
            .data
            .get(start..start + buf.len())
            .ok_or_else(|| EngineError::new(OUT_OF_RANGE, "read out of range"))?;
        buf.copy_from_slice(src);
        Ok(())
    }

    fn write_at(&mut self, data: &[u8], offset: u64) -> Result<(), EngineError> {
        let mut state = self.state();
        state.write_calls += 1;
        if let Some(code) = state.fail_next_write.take() {
            return Err(EngineError::new(code, "injected write failure"));
        }
        let start = offset as usize;
        let dst = state
            .data
            .get_mut(start..start + data.len())
            .ok_or_else(|| EngineError::new(OUT_OF_RANGE, "write out of range"))?;
        dst.copy_from_slice(data);
        Ok(())
    }

    fn release(self) -> Result<(), EngineError> {
        let mut state = self.state();
        state.releases += 1;
        match state.fail_release.take() {
            Some(code) => Err(EngineError::new(code, "injected close failure")),
            None => Ok(()),
        }
    }
}

impl MockProbe {
    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make the next read fail with `code`.
    pub fn fail_next_read(&self, code: i32) {
        self.state().fail_next_read = Some(code);
    }

    /// Make the next write fail with `code`.
    pub fn fail_next_write(&self, code: i32) {
        self.state().fail_next_write = Some(code);
    }

    /// Make the release fail with `code`.
    pub fn fail_release(&self, code: i32) {
        self.state().fail_release = Some(code);
    }

    /// Number of times the handle was released.
    pub fn releases(&self) -> usize {
        self.state().releases
    }

    pub fn read_calls(&self) -> usize {
        self.state().read_calls
    }

    pub fn write_calls(&self) -> usize {
        self.state().write_calls
    }

    /// Current contents of the cell.
    pub fn contents(&self) -> Vec<u8> {
        self.state().data.clone()
    }
}
