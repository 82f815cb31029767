//! Process-wide teardown hook.
//!
//! One hook restores whatever the session changed about the host display
//! (cursor visibility, for one). It is registered once at startup and may be
//! triggered from several exit routes: normal return, drop guard, panic and
//! termination signals. It runs at most once.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

type Hook = Box<dyn Fn() + Send + Sync>;

static HOOK: OnceLock<Hook> = OnceLock::new();
static RAN: AtomicBool = AtomicBool::new(false);
static SIGNALLED: AtomicBool = AtomicBool::new(false);

/// Register the teardown hook. Returns `false` if one was already registered,
/// in which case `hook` is dropped.
pub fn install(hook: impl Fn() + Send + Sync + 'static) -> bool {
    HOOK.set(Box::new(hook)).is_ok()
}

/// Run the hook if it is registered and hasn't run yet.
/// Returns whether this call ran it.
pub fn run() -> bool {
    let Some(hook) = HOOK.get() else {
        return false;
    };
    if RAN.swap(true, Ordering::SeqCst) {
        return false;
    }
    tracing::debug!("running teardown hook");
    hook();
    true
}

/// Also run the hook when the process panics, before the default report.
pub fn run_on_panic() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        run();
        previous(info);
    }));
}

/// Whether a termination signal has arrived. The main loop polls this and
/// winds down through its normal exit path.
pub fn signalled() -> bool {
    SIGNALLED.load(Ordering::SeqCst)
}

/// Record a termination signal. The first one only raises the
/// [`signalled`] flag; a repeat means the main loop is not responding, so
/// the hook runs here. Returns `true` when the process should exit now.
fn on_signal() -> bool {
    if !SIGNALLED.swap(true, Ordering::SeqCst) {
        return false;
    }
    run();
    true
}

/// Watch SIGINT, SIGTERM, SIGHUP and SIGQUIT on a background thread and
/// route them through [`on_signal`].
#[cfg(unix)]
pub fn install_signal_handlers() -> std::io::Result<()> {
    use signal_hook::consts::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP, SIGQUIT])?;
    std::thread::Builder::new()
        .name("signals".to_owned())
        .spawn(move || {
            for signal in signals.forever() {
                tracing::info!(signal, "termination signal received");
                if on_signal() {
                    std::process::exit(128 + signal);
                }
            }
        })?;
    Ok(())
}

/// Runs the hook when dropped, covering early returns and unwinding.
#[must_use = "the hook runs when the guard is dropped"]
pub struct TeardownGuard(());

impl TeardownGuard {
    pub fn new() -> Self {
        Self(())
    }
}

impl Default for TeardownGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TeardownGuard {
    fn drop(&mut self) {
        run();
    }
}
