use clap::Parser;
use pokedex_acquire::config::repo_root;
use pokedex_acquire::utils::logger;
use pokedex_acquire::{
    acquire, AcquireError, AcquireOptions, AcquireReport, CliArgs, DownloadOutcome,
    RoboflowClient, Settings,
};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);
    tracing::debug!("CLI args: {:?}", args);

    if let Err(e) = run(&args).await {
        tracing::error!(
            "❌ Acquisition failed: {} (Category: {:?})",
            e,
            e.category()
        );
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(args: &CliArgs) -> Result<(), AcquireError> {
    let settings = Settings::load(&repo_root())?;
    tracing::debug!("Settings: {:?}", settings);

    let options = AcquireOptions {
        overwrite: args.overwrite,
        dry_run: args.dry_run,
    };

    match acquire(&settings, options, RoboflowClient::connect).await? {
        AcquireReport::Finished(DownloadOutcome::Downloaded {
            dataset,
            files,
            bytes,
        }) => {
            println!(
                "✅ Downloaded {} files ({} bytes) to {}",
                files,
                bytes,
                dataset.location.display()
            );
        }
        AcquireReport::Finished(DownloadOutcome::AlreadyPresent { dataset }) => {
            println!(
                "✅ Dataset already present at {}",
                dataset.location.display()
            );
        }
        AcquireReport::Planned {
            version_id,
            location,
            would_download,
        } => {
            println!(
                "🔍 {} -> {} ({})",
                version_id,
                location.display(),
                if would_download { "would download" } else { "already present" }
            );
        }
    }

    Ok(())
}
