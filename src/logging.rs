use std::io;

use tracing_subscriber::fmt;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr log subscriber.
///
/// 0 = warn, 1 = debug (hyper/reqwest internals kept at warn), 2+ = trace.
/// `RUST_LOG` wins over the verbosity flag; quiet mode only shows errors.
pub fn init_logging(verbose_level: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        let default = match verbose_level {
            0 => "warn",
            1 => "debug,hyper=warn,hyper_util=warn,reqwest=warn",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    let fmt_layer = fmt::layer().with_target(verbose_level > 1).with_writer(io::stderr);

    Registry::default().with(filter).with(fmt_layer).init();
}
