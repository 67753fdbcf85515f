//! Fire-and-forget saves on the tokio runtime.

use crate::persistence::{PersistenceError, PersistenceGateway};
use crate::section::{SectionId, SectionSettings};
use futures::future::join_all;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub struct SaveDispatcher {
    gateway: Arc<dyn PersistenceGateway>,
    runtime: Handle,
    seq: AtomicU64,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

impl SaveDispatcher {
    pub fn new(gateway: Arc<dyn PersistenceGateway>, runtime: Handle) -> Self {
        Self {
            gateway,
            runtime,
            seq: AtomicU64::new(0),
            in_flight: Mutex::new(Vec::new()),
        }
    }

    /// Binds to the runtime the caller is running on.
    pub fn current(gateway: Arc<dyn PersistenceGateway>) -> Result<Self, PersistenceError> {
        let runtime = Handle::try_current().map_err(|e| PersistenceError::NoRuntime(e.to_string()))?;
        Ok(Self::new(gateway, runtime))
    }

    /// Issues a save and returns immediately with its sequence number.
    /// Failures are logged; nothing is retried or rolled back.
    pub fn dispatch(&self, section_id: SectionId, settings: SectionSettings) -> u64 {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let gateway = Arc::clone(&self.gateway);

        let task = self.runtime.spawn(async move {
            match gateway.save(&section_id, &settings).await {
                Ok(()) => debug!(section = %section_id, seq, "save completed"),
                Err(e) => warn!(section = %section_id, seq, error = %e, "save failed, local edits kept"),
            }
        });

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.retain(|task| !task.is_finished());
        in_flight.push(task);
        seq
    }

    /// Number of saves issued so far.
    pub fn issued(&self) -> u64 {
        self.seq.load(Ordering::Relaxed)
    }

    /// Waits for every save issued so far.
    pub async fn drain(&self) {
        let tasks = {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *in_flight)
        };
        for result in join_all(tasks).await {
            if let Err(e) = result {
                warn!(error = %e, "save task aborted");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionType;
    use std::time::Duration;

    struct SlowThenFast {
        saved: Mutex<Vec<u64>>,
    }

    #[async_trait::async_trait]
    impl PersistenceGateway for SlowThenFast {
        async fn save(&self, _id: &SectionId, settings: &SectionSettings) -> Result<(), PersistenceError> {
            let marker = match settings {
                SectionSettings::ImageBanner(s) => s.overlay_opacity as u64,
                _ => 0,
            };
            if marker == 1 {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            self.saved.lock().unwrap().push(marker);
            Ok(())
        }
    }

    fn banner(opacity: u8) -> SectionSettings {
        match SectionSettings::defaults(SectionType::ImageBanner) {
            SectionSettings::ImageBanner(mut s) => {
                s.overlay_opacity = opacity;
                SectionSettings::ImageBanner(s)
            }
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn saves_are_not_serialized() {
        let gateway = Arc::new(SlowThenFast {
            saved: Mutex::new(Vec::new()),
        });
        let dispatcher = SaveDispatcher::current(gateway.clone()).unwrap();

        assert_eq!(dispatcher.dispatch(SectionId::from("banner"), banner(1)), 1);
        assert_eq!(dispatcher.dispatch(SectionId::from("banner"), banner(2)), 2);
        dispatcher.drain().await;

        // The later save finished first.
        assert_eq!(*gateway.saved.lock().unwrap(), vec![2, 1]);
        assert_eq!(dispatcher.issued(), 2);
    }

    #[test]
    fn current_requires_runtime() {
        let gateway = Arc::new(SlowThenFast {
            saved: Mutex::new(Vec::new()),
        });
        assert!(matches!(
            SaveDispatcher::current(gateway),
            Err(PersistenceError::NoRuntime(_))
        ));
    }
}
