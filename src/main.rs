// Bandwidth report: fills one large local buffer as u8 and as u64 and prints
// the time and throughput of each fill.
//
//   fastfill [SIZE_MIB] [THREADS] [BACKEND]
//
// Defaults to 1024 MiB, 8 threads and the detected backend. Set RUST_LOG=debug
// to see backend selection and advisory results.

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use fastfill::{Backend, FillOptions, Filler};
use tracing::error;
use tracing_subscriber::EnvFilter;

const VAL_U8: u8 = 0xCD;
const VAL_U64: u64 = 1_234_567_890_123_456_789;

struct Args {
    size_mib: usize,
    size_bytes: usize,
    threads: usize,
    backend: Option<Backend>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let size_mib: usize = match args.next() {
        Some(arg) => arg.parse().map_err(|_| format!("invalid size: {arg}"))?,
        None => 1024,
    };
    let size_bytes = size_mib
        .checked_mul(1024 * 1024)
        .ok_or_else(|| format!("size too large: {size_mib} MiB"))?;
    let threads = match args.next() {
        Some(arg) => arg.parse().map_err(|_| format!("invalid thread count: {arg}"))?,
        None => 8,
    };
    let backend = match args.next() {
        Some(arg) => Some(arg.parse().map_err(|err| format!("{err}"))?),
        None => None,
    };

    Ok(Args {
        size_mib,
        size_bytes,
        threads,
        backend,
    })
}

/// Runs `fill` once and returns the achieved bandwidth in GiB/s.
fn benchmark_fill(label: &str, size_bytes: usize, threads: usize, fill: impl FnOnce()) -> f64 {
    println!("[-] Running: {label:<20} | Threads: {threads}");

    let start = Instant::now();
    fill();
    let duration = start.elapsed().as_secs_f64();

    let gib = size_bytes as f64 / (1024.0 * 1024.0 * 1024.0);
    let bandwidth = gib / duration;

    println!("    Time: {:.2} ms | BW: {bandwidth:.2} GiB/s", duration * 1000.0);

    bandwidth
}

/// Spot-checks the first, middle and last element.
fn verify<T: PartialEq + Copy>(data: &[T], value: T) -> bool {
    match (data.first(), data.last()) {
        (Some(&first), Some(&last)) => {
            first == value && last == value && data[data.len() / 2] == value
        }
        _ => true,
    }
}

fn run(args: Args) -> fastfill::Result<()> {
    let mut filler = Filler::new(FillOptions::default().with_workers(args.threads))?;
    if let Some(backend) = args.backend {
        filler = filler.with_backend(backend)?;
    }

    let size_bytes = args.size_bytes;
    let mut results = Vec::new();

    println!(
        "=== Fill benchmark (Size: {} MiB, backend: {}) ===\n",
        args.size_mib,
        filler.backend()
    );

    let mut words = vec![0u64; size_bytes / 8];

    {
        // SAFETY: every bit pattern is a valid u8 and u8 has no alignment requirement.
        let (_, bytes, _) = unsafe { words.align_to_mut::<u8>() };
        let bw = benchmark_fill("Local Uint8", bytes.len(), args.threads, || {
            filler.fill_bytes(&mut *bytes, VAL_U8)
        });
        if !verify(bytes, VAL_U8) {
            println!("    [Error] Verification failed!");
        }
        results.push(("Uint8", bw));
    }

    words.fill(0);
    let bw = benchmark_fill("Local Uint64", size_bytes, args.threads, || {
        filler.fill_words(&mut words, VAL_U64)
    });
    if !verify(&words, VAL_U64) {
        println!("    [Error] Verification failed!");
    }
    results.push(("Uint64", bw));

    println!("\n=== Summary ===");
    println!("{:<10} | {:<15}", "Data Type", "Bandwidth (GiB/s)");
    println!("{}", "-".repeat(30));
    for (dtype, bw) in results {
        println!("{dtype:<10} | {bw:.2}");
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: fastfill [SIZE_MIB] [THREADS] [BACKEND]");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "fill benchmark failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, String> {
        parse_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.size_mib, 1024);
        assert_eq!(args.size_bytes, 1024 << 20);
        assert_eq!(args.threads, 8);
        assert!(args.backend.is_none());
    }

    #[test]
    fn test_explicit_arguments() {
        let args = parse(&["16", "2", "scalar"]).unwrap();
        assert_eq!(args.size_bytes, 16 << 20);
        assert_eq!(args.threads, 2);
        assert_eq!(args.backend, Some(Backend::Scalar));
    }

    #[test]
    fn test_oversized_buffer_is_rejected() {
        let huge = usize::MAX.to_string();
        let err = parse(&[huge.as_str()]).err().unwrap();
        assert!(err.contains("too large"), "{err}");
    }
}
