// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Lock-free buffer pool for scoped encode buffers.
//!
//! Binary encode calls allocate a scratch buffer per call; this pool reuses
//! those buffers across calls using a crossbeam `ArrayQueue`. The buffer is
//! returned to the pool when the [`PooledBuffer`] guard drops, on every exit
//! path including errors.

use crossbeam_queue::ArrayQueue;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Default buffer capacity (64 KiB), sized for a typical encoded message.
const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Maximum number of buffers kept in the pool.
const MAX_POOL_SIZE: usize = 8;

/// A pooled buffer that returns itself to the pool when dropped.
pub struct PooledBuffer {
    /// The buffer data
    data: Vec<u8>,
    /// Reference to the pool to return to
    pool: Arc<BufferPoolInner>,
}

impl PooledBuffer {
    /// Get a mutable reference to the buffer data.
    #[inline]
    pub fn as_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    /// Get the length of the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the capacity of the buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Clear the buffer, keeping its capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl Drop for PooledBuffer {
    #[inline]
    fn drop(&mut self) {
        let data = std::mem::take(&mut self.data);
        self.pool.return_buffer(data);
    }
}

impl AsRef<[u8]> for PooledBuffer {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl std::fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("len", &self.data.len())
            .field("capacity", &self.data.capacity())
            .finish()
    }
}

/// Inner buffer pool state (shared via Arc).
#[derive(Debug)]
struct BufferPoolInner {
    /// Lock-free queue of available buffers
    queue: ArrayQueue<Vec<u8>>,
    /// Default buffer capacity for new allocations
    default_capacity: usize,
    /// Total number of buffer allocations (for metrics)
    total_allocations: AtomicUsize,
    /// Current pool size (for metrics)
    pool_size: AtomicUsize,
}

impl BufferPoolInner {
    /// Return a buffer to the pool; when the pool is full the buffer is
    /// simply dropped.
    #[inline]
    fn return_buffer(&self, mut buffer: Vec<u8>) {
        buffer.clear();
        if self.queue.push(buffer).is_ok() {
            self.pool_size.fetch_add(1, Ordering::Release);
        }
    }

    /// Take a buffer from the pool, or allocate a new one.
    #[inline]
    fn take_buffer(&self, min_capacity: usize) -> Vec<u8> {
        if let Some(mut buffer) = self.queue.pop() {
            self.pool_size.fetch_sub(1, Ordering::Acquire);
            if buffer.capacity() < min_capacity {
                buffer.reserve(min_capacity - buffer.capacity());
            }
            return buffer;
        }

        self.total_allocations.fetch_add(1, Ordering::Release);
        Vec::with_capacity(min_capacity.max(self.default_capacity))
    }
}

/// Lock-free pool of encode buffers.
///
/// Cloning the pool shares the same inner state, so one pool instance can
/// serve all dispatcher threads without blocking.
///
/// # Example
///
/// ```
/// use uacodec::types::BufferPool;
///
/// let pool = BufferPool::new();
/// let mut buf = pool.acquire(1024);
/// buf.as_mut().extend_from_slice(&[0u8; 100]);
/// // buf returned to pool when it goes out of scope
/// ```
#[derive(Clone, Debug)]
pub struct BufferPool {
    inner: Arc<BufferPoolInner>,
}

impl BufferPool {
    /// Create a new buffer pool with the specified default buffer capacity.
    pub fn with_capacity(default_capacity: usize) -> Self {
        Self {
            inner: Arc::new(BufferPoolInner {
                queue: ArrayQueue::new(MAX_POOL_SIZE),
                default_capacity,
                total_allocations: AtomicUsize::new(0),
                pool_size: AtomicUsize::new(0),
            }),
        }
    }

    /// Create a buffer pool with the 64 KiB default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }

    /// Get a cleared buffer with at least the specified capacity.
    ///
    /// The buffer is automatically returned to the pool when dropped.
    #[inline]
    pub fn acquire(&self, min_capacity: usize) -> PooledBuffer {
        let data = self.inner.take_buffer(min_capacity);
        PooledBuffer {
            data,
            pool: Arc::clone(&self.inner),
        }
    }

    /// Get a buffer with default capacity.
    #[inline]
    pub fn acquire_default(&self) -> PooledBuffer {
        self.acquire(0)
    }

    /// Get the current number of buffers in the pool.
    #[inline]
    pub fn pool_size(&self) -> usize {
        self.inner.pool_size.load(Ordering::Acquire)
    }

    /// Get the total number of buffer allocations (excluding pool reuses).
    #[inline]
    pub fn total_allocations(&self) -> usize {
        self.inner.total_allocations.load(Ordering::Acquire)
    }

    /// Get the default buffer capacity.
    #[inline]
    pub fn default_capacity(&self) -> usize {
        self.inner.default_capacity
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}
