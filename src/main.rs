//! Command-line entry point for the UKIRT raw-header ingestion pipeline.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ukirt2caom2::header_store::JsonHeaderStore;
use ukirt2caom2::ingest::{IngestOptions, IngestRaw};
use ukirt2caom2::omp::Omp;
use ukirt2caom2::proposals::Proposals;
use ukirt2caom2::repository::{HttpRepository, Repository};

#[derive(Parser)]
#[command(
    name = "ukirt2caom2",
    about = "Ingest raw UKIRT instrument headers into CAOM-2 observation records"
)]
struct Args {
    /// Instrument to ingest (e.g. ircam, uist).
    instrument: String,

    /// Restrict to one UT date (YYYYMMDD); also overrides the per-document date.
    #[arg(long)]
    date: Option<String>,

    /// Restrict to one observation number; also overrides the sequence number.
    #[arg(long)]
    obs_num: Option<i64>,

    /// Fetch from and write back to the archive repository.
    #[arg(long)]
    use_repo: bool,

    /// Directory to write observation XML files into.
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Also write each record to standard output.
    #[arg(long)]
    dump: bool,

    /// Directory holding the raw header documents.
    #[arg(long, default_value = "headers")]
    headers_dir: Utf8PathBuf,

    /// Base URL of the OMP project-information service.
    #[arg(long, default_value = "https://omp.eao.hawaii.edu/api")]
    omp_url: String,

    /// Base URL of the archive repository (with --use-repo).
    #[arg(long, default_value = "https://archive.cadc.hia.nrc.gc.ca/caom2repo")]
    repo_url: String,

    /// CSV file with the local proposal registry (project_id,title,pi).
    #[arg(long)]
    proposals: Option<Utf8PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let proposals = match &args.proposals {
        Some(path) => {
            Proposals::load(path).with_context(|| format!("loading proposal registry {path}"))?
        }
        None => Proposals::empty(),
    };

    let repository: Option<Box<dyn Repository>> = args
        .use_repo
        .then(|| Box::new(HttpRepository::new(&args.repo_url)) as Box<dyn Repository>);

    let ingest = IngestRaw::new(
        Box::new(JsonHeaderStore::new(args.headers_dir.clone())),
        Box::new(Omp::new(&args.omp_url)),
        Box::new(proposals),
        repository,
    );

    let opts = IngestOptions {
        date: args.date,
        obs_num: args.obs_num,
        use_repo: args.use_repo,
        out_dir: args.out_dir,
        dump: args.dump,
    };

    let num_errors = ingest
        .run(&args.instrument, &opts)
        .context("ingestion run failed")?;

    if num_errors > 0 {
        tracing::warn!("{num_errors} document(s) failed ingestion");
        std::process::exit(1);
    }

    Ok(())
}
