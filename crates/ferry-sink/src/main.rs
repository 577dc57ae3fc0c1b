use std::io;
use std::path::Path;

use ferry_sink::{Pipeline, SinkConfig, run};
use tracing::info;

fn main() {
    // stdout carries the records, so logs go to stderr.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("FERRY_CONFIG").ok());

    let config = match &config_path {
        Some(path) => SinkConfig::load(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("failed to load config {path}: {e}");
            std::process::exit(1);
        }),
        None => SinkConfig::default(),
    };

    let pipeline = Pipeline::from_config(&config).unwrap_or_else(|e| {
        eprintln!("invalid config: {e}");
        std::process::exit(1);
    });

    info!(
        config = config_path.as_deref().unwrap_or("<default>"),
        processors = ?pipeline.processor_names(),
        cdc = pipeline.has_cdc(),
        "ferry-sink reading records from stdin"
    );

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let stats = run(stdin, &mut stdout, &pipeline).unwrap_or_else(|e| {
        eprintln!("ferry-sink aborted: {e}");
        std::process::exit(1);
    });

    info!(
        processed = stats.processed,
        skipped = stats.skipped,
        failed = stats.failed,
        "ferry-sink finished"
    );
    if stats.failed > 0 {
        std::process::exit(2);
    }
}
