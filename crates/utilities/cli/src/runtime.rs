//! Process setup that has to happen on the main thread.

use eyre::WrapErr;
use tokio::runtime::Runtime;

/// Sets `RUST_BACKTRACE=1` unless the variable is already present.
///
/// Call first thing in a synchronous `main`, before the runtime, the log writer or any other
/// thread exists.
pub fn enable_backtraces() {
    if std::env::var_os("RUST_BACKTRACE").is_none() {
        // SAFETY: the process is still single-threaded, see above.
        unsafe { std::env::set_var("RUST_BACKTRACE", "1") };
    }
}

/// Multi-threaded runtime the deployer's commands are driven on.
pub fn build_runtime() -> eyre::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build tokio runtime")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::runtime::RuntimeFlavor;

    use super::*;

    #[test]
    fn runtime_drives_timers_on_worker_threads() {
        let runtime = build_runtime().unwrap();

        let flavor = runtime.block_on(async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            tokio::runtime::Handle::current().runtime_flavor()
        });
        assert_eq!(flavor, RuntimeFlavor::MultiThread);
    }
}
