/// Initialises a logger that is suitable for tests, i.e. its output is captured
/// by the test harness. Returns false when a logger was already installed,
/// which is expected when several tests run in the same process.
pub fn test_logger() -> bool {
    env_logger::builder().is_test(true).try_init().is_ok()
}
