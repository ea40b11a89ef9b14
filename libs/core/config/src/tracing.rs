use crate::Environment;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// color-eyre panic and error report hooks, without the env section.
///
/// Only the first call installs anything.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .install();
}

/// Filter used when `RUST_LOG` is unset. The driver is chatty at debug.
fn default_directives(environment: &Environment) -> &'static str {
    match environment {
        Environment::Production => "info,mongodb=warn",
        Environment::Development => "debug,mongodb=info,hyper=info,tower_http=debug",
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// One JSON object per event in production, multi-line pretty output
/// otherwise.
fn output_layer(environment: &Environment) -> BoxedLayer {
    match environment {
        Environment::Production => fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(false)
            .boxed(),
        Environment::Development => fmt::layer()
            .pretty()
            .with_file(false)
            .with_line_number(false)
            .boxed(),
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides [`default_directives`]. The `ErrorLayer` lets eyre
/// reports carry span traces. A second call leaves the first subscriber in
/// place.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)));

    let installed = tracing_subscriber::registry()
        .with(output_layer(environment))
        .with(tracing_error::ErrorLayer::default())
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(environment = ?environment, "Tracing ready");
    }
}
