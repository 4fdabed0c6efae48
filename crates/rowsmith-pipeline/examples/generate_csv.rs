use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use rowsmith_export::Exporter;
use rowsmith_generate::{GenerateOptions, Synthesizer};
use rowsmith_pipeline::Pipeline;
use rowsmith_store::{BatchStore, SqliteBatchStore, StoreOptions};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut rows: Option<String> = None;
    let mut out_dir = PathBuf::from("out");

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => out_dir = args.next().map(PathBuf::from).ok_or("missing --out value")?,
            _ => {
                if rows.is_none() {
                    rows = Some(arg);
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let rows = rows.ok_or("usage: generate_csv <ROWS> [--out DIR]")?;
    let store: Arc<dyn BatchStore> = Arc::new(
        SqliteBatchStore::connect(&StoreOptions::new(out_dir.join("database.sqlite"))).await?,
    );
    let exporter = Exporter::new(Arc::clone(&store), out_dir.join("output.csv"));
    let pipeline = Pipeline::new(
        Synthesizer::new(GenerateOptions::default()),
        store,
        exporter,
    );

    let outcome = pipeline.request_generation_text(&rows).await?;
    println!(
        "records={} export={}",
        outcome.record_count,
        outcome.export_path.display()
    );
    Ok(())
}
