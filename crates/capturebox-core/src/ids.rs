//! Session IDs and image filenames.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

/// Length of a generated session ID.
pub const SESSION_ID_LEN: usize = 8;

const SESSION_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a short lowercase alphanumeric session ID.
///
/// Uses the thread-local RNG. Good enough to tell casual page renders
/// apart; not suitable as a secret.
#[must_use]
pub fn session_id() -> String {
    let mut rng = rand::rng();
    (0..SESSION_ID_LEN)
        .map(|_| {
            let idx = rng.random_range(0..SESSION_ID_ALPHABET.len());
            char::from(SESSION_ID_ALPHABET[idx])
        })
        .collect()
}

/// Format the filename for an image written at `millis` since the epoch.
#[must_use]
pub fn image_filename(millis: u64) -> String {
    format!("image-{millis}.png")
}

/// Issues image filenames from the wall clock.
///
/// Timestamps handed out by one namer are strictly increasing: when two
/// requests land in the same millisecond (or the clock steps back) the
/// later one gets `last + 1`. Names stay distinct within a process
/// without any lock.
#[derive(Debug, Default)]
pub struct ImageNamer {
    last: AtomicU64,
}

impl ImageNamer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Namer whose first issued timestamp is at least `last + 1`.
    #[cfg(test)]
    pub(crate) fn starting_after(last: u64) -> Self {
        Self {
            last: AtomicU64::new(last),
        }
    }

    /// Next filename, `image-<ms>.png`.
    pub fn next_filename(&self) -> String {
        image_filename(self.issue(now_millis()))
    }

    fn issue(&self, now: u64) -> u64 {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}

fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    #[test]
    fn session_id_is_short_alphanumeric() {
        let id = session_id();
        assert_eq!(id.len(), SESSION_ID_LEN);
        assert!(id.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }

    #[test]
    fn session_ids_vary() {
        let ids: HashSet<String> = (0..50).map(|_| session_id()).collect();
        assert!(ids.len() > 1);
    }

    #[test]
    fn image_filename_format() {
        assert_eq!(image_filename(1_700_000_000_123), "image-1700000000123.png");
    }

    #[test]
    fn issue_follows_clock_when_it_advances() {
        let namer = ImageNamer::new();
        assert_eq!(namer.issue(100), 100);
        assert_eq!(namer.issue(250), 250);
    }

    #[test]
    fn issue_bumps_within_same_millisecond() {
        let namer = ImageNamer::new();
        assert_eq!(namer.issue(100), 100);
        assert_eq!(namer.issue(100), 101);
        assert_eq!(namer.issue(100), 102);
    }

    #[test]
    fn issue_never_goes_backwards() {
        let namer = ImageNamer::new();
        assert_eq!(namer.issue(500), 500);
        assert_eq!(namer.issue(40), 501);
    }

    #[test]
    fn concurrent_names_are_distinct() {
        let namer = Arc::new(ImageNamer::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let namer = Arc::clone(&namer);
                std::thread::spawn(move || {
                    (0..100).map(|_| namer.next_filename()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for name in handle.join().unwrap_or_default() {
                assert!(seen.insert(name), "duplicate filename issued");
            }
        }
        assert_eq!(seen.len(), 400);
    }
}
