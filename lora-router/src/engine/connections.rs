//! One-time adapter binding with atomic publication.

use crate::adapters::{BrokerAdapter, GatewayAdapter};
use crate::error::RouterError;
use arc_swap::ArcSwapOption;
use std::sync::{Arc, Mutex};

/// Both adapter boundaries, published as one value so a reader can never
/// observe a half-bound pair.
pub(crate) struct Connections {
    pub(crate) gateway: Arc<dyn GatewayAdapter>,
    pub(crate) broker: Arc<dyn BrokerAdapter>,
}

/// Holder for the engine's single `connect` binding.
///
/// Reads are lock-free snapshots; a handler racing `connect` sees either the
/// fully-bound pair or nothing. The mutex serializes `bind` callers only and
/// is never held across an await point.
pub(crate) struct AdapterBinding {
    slot: ArcSwapOption<Connections>,
    bind_guard: Mutex<()>,
}

impl AdapterBinding {
    pub(crate) fn new() -> Self {
        Self {
            slot: ArcSwapOption::from(None),
            bind_guard: Mutex::new(()),
        }
    }

    /// Binds both adapters, once.
    pub(crate) fn bind(
        &self,
        gateway: Arc<dyn GatewayAdapter>,
        broker: Arc<dyn BrokerAdapter>,
    ) -> Result<(), RouterError> {
        let _guard = self
            .bind_guard
            .lock()
            .expect("adapter binding mutex poisoned");
        if self.slot.load().is_some() {
            return Err(RouterError::BadOptions(
                "adapters already connected".to_string(),
            ));
        }
        self.slot.store(Some(Arc::new(Connections { gateway, broker })));
        Ok(())
    }

    pub(crate) fn load(&self) -> Option<Arc<Connections>> {
        self.slot.load_full()
    }
}

#[cfg(test)]
mod tests {
    use super::AdapterBinding;
    use crate::adapters::{BrokerAdapter, ForwardReport, GatewayAdapter, ListenOptions};
    use crate::codec::{BrokerAddress, GatewayAddress, RoutablePayload};
    use crate::error::{RouterError, RouterErrorKind};
    use crate::router::{DownlinkRouter, UplinkRouter};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Arc;

    struct NoopGateway;

    #[async_trait]
    impl GatewayAdapter for NoopGateway {
        async fn listen(
            &self,
            _router: Arc<dyn UplinkRouter>,
            _options: ListenOptions,
        ) -> Result<(), RouterError> {
            Ok(())
        }

        async fn ack(
            &self,
            _payload: Arc<dyn RoutablePayload>,
            _gateway: &GatewayAddress,
        ) -> Result<(), RouterError> {
            Ok(())
        }
    }

    struct NoopBroker;

    #[async_trait]
    impl BrokerAdapter for NoopBroker {
        async fn listen(
            &self,
            _router: Arc<dyn DownlinkRouter>,
            _options: ListenOptions,
        ) -> Result<(), RouterError> {
            Ok(())
        }

        async fn broadcast(
            &self,
            _payload: Arc<dyn RoutablePayload>,
        ) -> Result<HashSet<BrokerAddress>, RouterError> {
            Ok(HashSet::new())
        }

        async fn forward(
            &self,
            _payload: Arc<dyn RoutablePayload>,
            _brokers: &HashSet<BrokerAddress>,
        ) -> Result<ForwardReport, RouterError> {
            Ok(ForwardReport::new())
        }
    }

    #[test]
    fn load_before_bind_is_none() {
        let binding = AdapterBinding::new();

        assert!(binding.load().is_none());
    }

    #[test]
    fn second_bind_is_rejected_and_first_stays_active() {
        let binding = AdapterBinding::new();

        assert!(binding.bind(Arc::new(NoopGateway), Arc::new(NoopBroker)).is_ok());
        let err = binding
            .bind(Arc::new(NoopGateway), Arc::new(NoopBroker))
            .expect_err("second bind should be rejected");

        assert_eq!(err.kind(), RouterErrorKind::BadOptions);
        assert!(binding.load().is_some());
    }

    #[test]
    fn concurrent_binds_admit_exactly_one() {
        let binding = Arc::new(AdapterBinding::new());

        let successes: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let binding = Arc::clone(&binding);
                    scope.spawn(move || {
                        binding
                            .bind(Arc::new(NoopGateway), Arc::new(NoopBroker))
                            .is_ok() as usize
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().expect("no panic")).sum()
        });

        assert_eq!(successes, 1);
        assert!(binding.load().is_some());
    }
}
