mod header;
mod logs;
mod metrics;
mod otel;
mod shutdown;

pub use self::header::HeaderInjector;
pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, Status};
pub use self::otel::{Telemetry, TracingContext};
pub use self::shutdown::shutdown_signal;
