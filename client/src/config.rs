//! Backend endpoints baked in at build time.
//!
//! `BLUEPRINTS_API_BASE`, `BLUEPRINTS_IO_BASE` and `BLUEPRINTS_STOMP_PATH`
//! are read with `option_env!` when the WASM bundle is compiled; unset or
//! blank values fall back to the local development defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use realtime::Endpoints;

/// Endpoints for this build.
pub fn endpoints() -> Endpoints {
    resolve(
        option_env!("BLUEPRINTS_API_BASE"),
        option_env!("BLUEPRINTS_IO_BASE"),
        option_env!("BLUEPRINTS_STOMP_PATH"),
    )
}

fn resolve(api_base: Option<&str>, io_base: Option<&str>, stomp_path: Option<&str>) -> Endpoints {
    let defaults = Endpoints::default();
    let pick = |value: Option<&str>, fallback: String| {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map_or(fallback, str::to_owned)
    };
    Endpoints {
        api_base: pick(api_base, defaults.api_base),
        io_base: pick(io_base, defaults.io_base),
        stomp_path: pick(stomp_path, defaults.stomp_path),
    }
}
