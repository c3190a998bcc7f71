pub mod config;
pub mod logging;
pub mod roots;

pub use config::load_config;
pub use logging::init_logging;
pub use roots::probe_root_servers;
