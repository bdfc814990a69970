use std::fmt;

use crate::{
    ConsoleOptions, ConsoleProvider, Error, JsonProvider, LogFormat, LogProvider, LoggingConfig,
};

type ProviderFactory = Box<dyn FnOnce() -> Result<Box<dyn LogProvider>, Error> + Send>;

/// Where the built provider comes from.
enum ProviderSource {
    None,
    Instance(Box<dyn LogProvider>),
    Factory(ProviderFactory),
}

/// Selects the single provider a [`LogWriter`](crate::LogWriter) will wrap.
///
/// A provider can be given directly or through a factory that runs when the builder is built.
/// The two are mutually exclusive and the last call wins: configuring one clears the other.
///
/// # Examples
///
/// ```rust
/// use phyros_logging::{LoggerBuilder, MemoryProvider};
///
/// let (provider, _entries) = MemoryProvider::new();
/// let mut builder = LoggerBuilder::new();
/// builder.use_provider(provider);
/// let provider = builder.build().unwrap();
/// ```
///
/// Building without a provider fails:
///
/// ```rust
/// use phyros_logging::{ErrorKind, LoggerBuilder};
///
/// let error = LoggerBuilder::new().build().unwrap_err();
/// assert_eq!(error.kind(), ErrorKind::InvalidState);
/// ```
#[must_use]
pub struct LoggerBuilder {
    source: ProviderSource,
}

impl LoggerBuilder {
    /// Creates a builder with nothing configured.
    pub fn new() -> Self {
        Self {
            source: ProviderSource::None,
        }
    }

    /// Uses `provider` directly, discarding any previously configured provider or factory.
    pub fn use_provider(&mut self, provider: impl LogProvider + 'static) -> &mut Self {
        self.use_boxed_provider(Box::new(provider))
    }

    /// Like [`use_provider`](Self::use_provider) for an already boxed provider.
    pub fn use_boxed_provider(&mut self, provider: Box<dyn LogProvider>) -> &mut Self {
        self.source = ProviderSource::Instance(provider);
        self
    }

    /// Uses `factory` to create the provider on [`build`](Self::build), discarding any previously
    /// configured provider or factory.
    ///
    /// The factory runs at most once, and only if it is still the selected source at build time.
    pub fn use_provider_factory<F, P>(&mut self, factory: F) -> &mut Self
    where
        F: FnOnce() -> Result<P, Error> + Send + 'static,
        P: LogProvider + 'static,
    {
        self.source = ProviderSource::Factory(Box::new(move || {
            let provider: Box<dyn LogProvider> = Box::new(factory()?);
            Ok(provider)
        }));
        self
    }

    /// Selects a console or JSON-lines provider as described by `config`.
    ///
    /// Goes through [`use_provider`](Self::use_provider), so it replaces earlier selections and is
    /// replaced by later ones like any other provider.
    pub fn use_config(&mut self, config: &LoggingConfig) -> &mut Self {
        match config.format {
            LogFormat::Pretty => self.use_provider(ConsoleProvider::new(ConsoleOptions {
                minimum_level: config.minimum_level,
                timestamps: config.timestamps,
                color: config.color,
                ..ConsoleOptions::default()
            })),
            LogFormat::Json => self.use_provider(
                JsonProvider::stdout()
                    .with_minimum_level(config.minimum_level)
                    .with_application(config.application_name.clone())
                    .with_host(config.host_name.clone()),
            ),
        }
    }

    /// Returns `true` if a provider or factory has been configured.
    pub fn is_configured(&self) -> bool {
        !matches!(self.source, ProviderSource::None)
    }

    /// Produces the selected provider.
    ///
    /// Runs the factory if one is selected. Fails with [`Error::NoProviderConfigured`] if neither
    /// a provider nor a factory was configured, and propagates factory failures.
    pub fn build(self) -> Result<Box<dyn LogProvider>, Error> {
        match self.source {
            ProviderSource::None => Err(Error::NoProviderConfigured),
            ProviderSource::Instance(provider) => Ok(provider),
            ProviderSource::Factory(factory) => factory(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            ProviderSource::None => "none",
            ProviderSource::Instance(_) => "provider",
            ProviderSource::Factory(_) => "factory",
        };
        f.debug_struct("LoggerBuilder")
            .field("source", &source)
            .finish()
    }
}
