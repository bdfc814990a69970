use phyros_logging::{Error, LoggerBuilder};
use tracing::Dispatch;
use tracing::subscriber::NoSubscriber;

use crate::TracingProvider;

/// Extends [`LoggerBuilder`] with ways to select a [`TracingProvider`].
///
/// All methods go through the builder's ordinary provider selection, so they replace and are
/// replaced by any other `use_*` call.
pub trait TracingBuilderExt {
    /// Uses `dispatch` as the backend, releasing it on shutdown only if `owns_dispatch` is set.
    fn use_tracing(&mut self, dispatch: Dispatch, owns_dispatch: bool) -> &mut Self;

    /// Creates the backend dispatcher with `factory` when the builder is built. The provider owns
    /// the dispatcher.
    fn use_tracing_factory<F>(&mut self, factory: F) -> &mut Self
    where
        F: FnOnce() -> Dispatch + Send + 'static;

    /// Resolves the process-wide default dispatcher when the builder is built.
    ///
    /// Building fails with [`Error::BackendUnavailable`] if no global default dispatcher has been
    /// installed, e.g. with [`tracing::subscriber::set_global_default`]. The global dispatcher is
    /// shared, so the provider never owns it.
    fn use_global_tracing(&mut self) -> &mut Self;
}

impl TracingBuilderExt for LoggerBuilder {
    fn use_tracing(&mut self, dispatch: Dispatch, owns_dispatch: bool) -> &mut Self {
        self.use_provider(TracingProvider::new(dispatch, owns_dispatch))
    }

    fn use_tracing_factory<F>(&mut self, factory: F) -> &mut Self
    where
        F: FnOnce() -> Dispatch + Send + 'static,
    {
        self.use_provider_factory(move || Ok(TracingProvider::from_factory(factory)))
    }

    fn use_global_tracing(&mut self) -> &mut Self {
        self.use_provider_factory(|| {
            let dispatch = global_dispatch().ok_or(Error::BackendUnavailable {
                backend: "tracing",
            })?;
            Ok(TracingProvider::new(dispatch, false))
        })
    }
}

/// Returns the global default dispatcher, or `None` if none was installed.
fn global_dispatch() -> Option<Dispatch> {
    // Without a global default `get_default` falls back to a dispatcher around `NoSubscriber`.
    // A thread-local default would also be returned here, which is fine: it is what the calling
    // thread logs to.
    let dispatch = tracing::dispatcher::get_default(Dispatch::clone);
    (!dispatch.is::<NoSubscriber>()).then_some(dispatch)
}
