//! Combined stdout/stderr capture.
//!
//! Both streams are pumped by their own task into one shared buffer, so the
//! buffer holds output in roughly the order the child produced it. Ordering
//! between the two streams is best effort: chunks are appended as each read
//! completes, not byte-exact with the child's writes.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;

const CHUNK_SIZE: usize = 8 * 1024;

/// Shared buffer receiving both output streams of a child process.
#[derive(Debug, Clone, Default)]
pub struct CombinedOutput {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CombinedOutput {
    /// Spawn a task copying `reader` into the buffer until EOF or a read error.
    pub fn pump<R>(&self, mut reader: R) -> JoinHandle<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let sink = self.clone();
        tokio::spawn(async move {
            let mut chunk = vec![0u8; CHUNK_SIZE];
            loop {
                match reader.read(&mut chunk).await {
                    Ok(0) => break,
                    Ok(n) => sink.lock().extend_from_slice(&chunk[..n]),
                    Err(e) => {
                        tracing::debug!(error = %e, "Output stream read failed");
                        break;
                    }
                }
            }
        })
    }

    /// Copy of everything captured so far.
    pub fn snapshot(&self) -> Vec<u8> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        // A panicking pump cannot leave the Vec in an invalid state.
        self.buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
