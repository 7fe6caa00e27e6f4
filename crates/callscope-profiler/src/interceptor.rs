//! Call interception and timing.

use std::sync::Arc;
use std::time::Duration;

use callscope_core::Clock;
use time::OffsetDateTime;

use crate::collector::Collector;
use crate::method::{InterfaceDescriptor, MethodId};

/// Routes calls on a wrapped instance through timing.
///
/// Built by [`crate::Profiler::wrap`] and handed to the generated proxy.
/// Which methods are timed is resolved once, when the interceptor is built.
#[derive(Clone)]
pub struct Interceptor {
    /// Identity per method slot, `None` for pass-through methods.
    slots: Arc<[Option<MethodId>]>,
    collector: Arc<Collector>,
    clock: Arc<dyn Clock>,
}

impl Interceptor {
    pub(crate) fn new(
        interface: &'static InterfaceDescriptor,
        collector: Arc<Collector>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let slots = interface
            .methods()
            .iter()
            .map(|method| method.is_profiled().then(|| method.id()))
            .collect();
        Self {
            slots,
            collector,
            clock,
        }
    }

    /// Run `call` as the method in `slot`, timing it if the method is profiled.
    ///
    /// The call's result is returned untouched, including `Err` values. The
    /// duration is recorded even if `call` panics; the panic keeps unwinding.
    #[inline]
    pub fn invoke<R>(&self, slot: usize, call: impl FnOnce() -> R) -> R {
        let Some(method) = self.slots.get(slot).copied().flatten() else {
            return call();
        };

        let guard = CallGuard::start(self, method);
        let result = call();
        drop(guard);
        result
    }

    fn record(&self, method: MethodId, start: OffsetDateTime) {
        let end = self.clock.now();
        let elapsed = Duration::try_from(end - start).unwrap_or_else(|_| {
            tracing::warn!(%method, %start, %end, "Clock went backwards, recording zero");
            Duration::ZERO
        });
        tracing::trace!(%method, ?elapsed, "Recorded call");
        self.collector.record(method, elapsed);
    }
}

/// RAII guard that records the call duration on drop.
struct CallGuard<'a> {
    interceptor: &'a Interceptor,
    method: MethodId,
    start: OffsetDateTime,
}

impl<'a> CallGuard<'a> {
    #[inline]
    fn start(interceptor: &'a Interceptor, method: MethodId) -> Self {
        Self {
            interceptor,
            method,
            start: interceptor.clock.now(),
        }
    }
}

impl Drop for CallGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        self.interceptor.record(self.method, self.start);
    }
}
