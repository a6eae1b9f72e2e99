// Joseph Prichard
// 4/25/2024
// Threading operations

use std::io;
use std::thread::available_parallelism;
use rayon::ThreadPool;
use tracing::debug;

// one thread unless multithreaded, never more threads than files
pub fn thread_count(multithreaded: bool, file_count: usize) -> io::Result<usize> {
    let threads = if multithreaded {
        file_count.min(available_parallelism()?.get()).max(1)
    } else {
        1
    };
    Ok(threads)
}

pub fn configure_thread_pool(multithreaded: bool, file_count: usize) -> io::Result<ThreadPool> {
    let threads = thread_count(multithreaded, file_count)?;
    debug!("Running with {} threads", threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
