//! CLI smoke entry point.
//!
//! # Responsibility
//! - Stand up the full state layer over an in-memory store to verify
//!   `taskflow_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;
use std::sync::Arc;
use taskflow_core::{
    core_version, open_store_in_memory, LogNoticeSink, SqliteAppContext, StoreConfig,
};

fn main() -> ExitCode {
    println!("taskflow_core version={}", core_version());

    let conn = match open_store_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open store: {err}");
            return ExitCode::FAILURE;
        }
    };

    let ctx = match SqliteAppContext::open(&conn, StoreConfig::default(), Arc::new(LogNoticeSink)) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("failed to build app context: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "seed users={} tasks={} unread={}",
        ctx.identity().roster().len(),
        ctx.tasks().tasks().len(),
        ctx.notifications().unread_count()
    );
    ExitCode::SUCCESS
}
