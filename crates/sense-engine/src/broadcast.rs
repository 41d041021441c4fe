//! Deliver one event to many observers.
//!
//! The host supplies the candidate observers (everyone outdoors, everyone
//! within some radius); the engine points the context at each in turn,
//! applies each system's pre-filter, propagates and hands successful
//! messages to a [`MessageSink`].

use sense_core::{MessageSink, ObserverId, SystemId};
use sense_strategy::SpatialContext;
use tracing::{debug, warn};

use crate::Engine;

impl Engine {
    /// Propagate the event in `ctx` through `system` to every observer in
    /// `observers` and deliver what they perceive.  Returns the number of
    /// messages delivered.
    pub fn broadcast<I, S>(
        &mut self,
        ctx:       &mut SpatialContext<'_>,
        system:    SystemId,
        observers: I,
        sink:      &mut S,
    ) -> usize
    where
        I: IntoIterator<Item = ObserverId>,
        S: MessageSink + ?Sized,
    {
        self.broadcast_with(ctx, &[system], observers, sink, |_| true)
    }

    /// Like [`broadcast`](Self::broadcast), across several systems and with
    /// a per-observer hook.
    ///
    /// `prepare` runs after the context has been pointed at each observer.
    /// It may adjust the source (a meteor that hangs a fixed height above
    /// whoever is watching) or return `false` to skip the observer.
    pub fn broadcast_with<I, S, P>(
        &mut self,
        ctx:         &mut SpatialContext<'_>,
        systems:     &[SystemId],
        observers:   I,
        sink:        &mut S,
        mut prepare: P,
    ) -> usize
    where
        I: IntoIterator<Item = ObserverId>,
        S: MessageSink + ?Sized,
        P: FnMut(&mut SpatialContext<'_>) -> bool,
    {
        let mut delivered = 0;
        for observer in observers {
            if let Err(e) = ctx.set_observer(observer) {
                warn!(%observer, %e, "broadcast: observer unavailable");
                continue;
            }
            if !prepare(ctx) {
                continue;
            }
            for &system in systems {
                let wanted = match self.system(system) {
                    Some(s) => s.is_enabled() && s.stimulus().should_process_observer(ctx),
                    None => {
                        warn!(%system, "broadcast: unknown system");
                        continue;
                    }
                };
                if !wanted {
                    continue;
                }
                match self.process_stimulus(ctx, system) {
                    Ok(()) => {
                        sink.deliver(observer, ctx.message.as_str());
                        delivered += 1;
                    }
                    Err(e) if e.is_below_threshold() => {
                        if self.is_debug() {
                            debug!(%observer, %system, %e, "broadcast: imperceptible");
                        }
                    }
                    Err(e) => warn!(%observer, %system, %e, "broadcast: propagation failed"),
                }
            }
        }
        delivered
    }
}
