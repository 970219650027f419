//! Swapping the filter of an installed subscriber.

use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, Registry, layer::Layer};

use crate::error::{LogError, LogResult};

/// Changes the log filter of the installed subscriber.
#[derive(Clone)]
pub struct ReloadHandle {
    filter: tracing_subscriber::reload::Handle<EnvFilter, Registry>,
    /// Directive last applied.
    current_filter: Arc<ArcSwap<String>>,
}

impl ReloadHandle {
    /// Replaces the filter with `directive`.
    ///
    /// # Errors
    ///
    /// [`LogError::Filter`] for a directive that does not parse,
    /// [`LogError::Init`] once the subscriber is gone.
    pub fn reload(&self, directive: &str) -> LogResult<()> {
        let filter = EnvFilter::try_new(directive).map_err(|e| LogError::filter(directive, e))?;
        self.filter
            .reload(filter)
            .map_err(|e| LogError::Init(format!("failed to reload filter: {e}")))?;
        self.current_filter.store(Arc::new(directive.to_owned()));
        Ok(())
    }

    /// Directive currently in effect.
    pub fn current_filter(&self) -> Arc<String> {
        self.current_filter.load_full()
    }
}

impl std::fmt::Debug for ReloadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadHandle")
            .field("current_filter", &self.current_filter.load())
            .finish_non_exhaustive()
    }
}

pub(super) type FilterLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Wraps `filter` in a reload layer when `reloadable`.
pub(super) fn create_filter_layer(
    filter: EnvFilter,
    level: &str,
    reloadable: bool,
) -> (FilterLayer, Option<ReloadHandle>) {
    if reloadable {
        let (layer, handle) = tracing_subscriber::reload::Layer::new(filter);
        let reload_handle = ReloadHandle {
            filter: handle,
            current_filter: Arc::new(ArcSwap::from_pointee(level.to_owned())),
        };
        (Box::new(layer), Some(reload_handle))
    } else {
        (Box::new(filter), None)
    }
}
