//! Bounded recognizer pool with scoped checkout.

use std::sync::{Condvar, Mutex};

use crate::error::OcrError;

use super::{RecognizedText, TextRecognizer};

/// A fixed set of recognizers shared across callers.
///
/// Checkout is scoped: [`RecognizerPool::lease`] hands out a [`Lease`]
/// that returns its recognizer on drop, on every exit path. The pool
/// never grows, so at most `capacity` recognition passes run at once.
pub struct RecognizerPool<R> {
    workers: Mutex<Vec<R>>,
    available: Condvar,
    capacity: usize,
    min_confidence: f64,
}

impl<R: TextRecognizer> RecognizerPool<R> {
    /// Create a pool over the given recognizers.
    pub fn new(workers: Vec<R>) -> Self {
        let capacity = workers.len();
        Self {
            workers: Mutex::new(workers),
            available: Condvar::new(),
            capacity,
            min_confidence: 0.0,
        }
    }

    /// Reject recognition results below this confidence (0.0 - 100.0).
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Number of recognizers the pool was built with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check out a recognizer, blocking until one is returned.
    ///
    /// Fails only when the pool was built empty, where blocking would
    /// never resolve.
    pub fn lease(&self) -> Result<Lease<'_, R>, OcrError> {
        if self.capacity == 0 {
            return Err(OcrError::PoolExhausted);
        }
        let mut workers = self.workers.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            if let Some(worker) = workers.pop() {
                return Ok(Lease {
                    pool: self,
                    worker: Some(worker),
                });
            }
            workers = self
                .available
                .wait(workers)
                .unwrap_or_else(|e| e.into_inner());
        }
    }

    /// Check out a recognizer without blocking.
    pub fn try_lease(&self) -> Option<Lease<'_, R>> {
        let mut workers = self.workers.lock().unwrap_or_else(|e| e.into_inner());
        workers.pop().map(|worker| Lease {
            pool: self,
            worker: Some(worker),
        })
    }

    /// Lease a recognizer, run one pass, and enforce the confidence
    /// floor.
    pub fn recognize(&self, image: &[u8]) -> Result<RecognizedText, OcrError> {
        let mut lease = self.lease()?;
        let result = lease.recognize(image)?;
        if result.confidence < self.min_confidence {
            return Err(OcrError::Rejected(format!(
                "confidence {:.1} below minimum {:.1}",
                result.confidence, self.min_confidence
            )));
        }
        Ok(result)
    }
}

/// A checked-out recognizer. Returns to its pool when dropped.
pub struct Lease<'a, R> {
    pool: &'a RecognizerPool<R>,
    worker: Option<R>,
}

impl<R: TextRecognizer> TextRecognizer for Lease<'_, R> {
    fn recognize(&mut self, image: &[u8]) -> Result<RecognizedText, OcrError> {
        match self.worker.as_mut() {
            Some(worker) => worker.recognize(image),
            None => Err(OcrError::Recognition(
                "recognizer lease already released".into(),
            )),
        }
    }
}

impl<R> Drop for Lease<'_, R> {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let mut workers = self.pool.workers.lock().unwrap_or_else(|e| e.into_inner());
            workers.push(worker);
            self.pool.available.notify_one();
        }
    }
}
