use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Info)
            .filter_module("chaintable", LevelFilter::Debug)
            .format_timestamp_millis()
            .is_test(true)
            .parse_default_env();

        // Avoid panicking if the logger was already initialized elsewhere.
        let _ = builder.try_init();
    });
}
