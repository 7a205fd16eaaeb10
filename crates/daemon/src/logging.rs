// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tracing`/`tracing-subscriber` wiring for the daemon binary: a
//! non-blocking file writer plus an `EnvFilter` defaulting to `info`.

use crate::config::Config;
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn setup_logging(config: &Config) -> std::io::Result<tracing_appender::non_blocking::WorkerGuard> {
    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let dir = config.log_path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = config
        .log_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "jobpiped.log".into());
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}
