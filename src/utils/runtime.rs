use anyhow::Result;

/// Everything in dayboard runs on one thread. The display tick is the only task besides the
/// command itself.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
