use clap::Parser;
use job_digest::domain::ports::WatermarkStore;
use job_digest::utils::{logger, validation::Validate};
use job_digest::{
    AppConfig, CliArgs, DigestEngine, DigestError, DigestPipeline, FileWatermarkStore, Notifier,
    Plan, RunOutcome, SenderCredentials, SmtpMailer, WantedClient,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting job-digest");

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    if args.verbose {
        tracing::debug!("Effective config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    tracing::info!(
        "🎯 Category {} | exactly {} year(s) of experience | up to {} posting(s) per digest",
        config.source.category_id,
        config.filter.experience_years,
        config.delivery.max_batch
    );

    let store = FileWatermarkStore::new(config.state.watermark_path.clone());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be sent or recorded");
        if let Err(e) = dry_run(&config, &store).await {
            fail(&e);
        }
        return Ok(());
    }

    // Credentials are checked before any network activity.
    let credentials = match SenderCredentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => fail(&e),
    };
    let recipient = config
        .delivery
        .recipient
        .clone()
        .unwrap_or_else(|| credentials.address.clone());

    let engine = match build_engine(&config, &credentials, recipient, store) {
        Ok(engine) => engine,
        Err(e) => fail(&e),
    };

    match engine.run_today().await {
        Ok(outcome) => report(&outcome),
        Err(e) => fail(&e),
    }

    Ok(())
}

fn build_engine(
    config: &AppConfig,
    credentials: &SenderCredentials,
    recipient: String,
    store: FileWatermarkStore,
) -> job_digest::Result<DigestEngine<WantedClient, SmtpMailer, FileWatermarkStore>> {
    let pipeline = DigestPipeline::new(WantedClient::new(config)?, config)?;
    let mailer = SmtpMailer::new(&config.delivery, credentials)?;
    Ok(DigestEngine::new(
        pipeline,
        Notifier::new(mailer, recipient),
        store,
    ))
}

async fn dry_run(config: &AppConfig, store: &FileWatermarkStore) -> job_digest::Result<()> {
    let pipeline = DigestPipeline::new(WantedClient::new(config)?, config)?;
    let watermark = store.load().await?;
    let today = chrono::Local::now().date_naive();

    match pipeline.plan(watermark.as_ref(), today).await? {
        Plan::NoEligible { interrupted } => match interrupted {
            Some(status) => println!("❌ No matching postings (listing incomplete: HTTP {})", status),
            None => println!("❌ No matching postings"),
        },
        Plan::UpToDate { checkpoint } => {
            println!("📭 No new postings since {}", checkpoint)
        }
        Plan::Deliver(delivery) => {
            println!(
                "✉️ Would send {} of {} new posting(s); watermark would become {}",
                delivery.digest.posting_count, delivery.unseen, delivery.checkpoint
            );
            println!("Subject: {}", delivery.digest.subject);
            println!("{}", delivery.digest.html);
        }
    }
    Ok(())
}

fn report(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::NoEligible { interrupted: None } => {
            println!("❌ No matching postings");
        }
        RunOutcome::NoEligible {
            interrupted: Some(status),
        } => {
            println!("❌ No matching postings (listing incomplete: HTTP {})", status);
        }
        RunOutcome::UpToDate => println!("📭 No new postings, mail skipped"),
        RunOutcome::Sent {
            count,
            unseen,
            checkpoint,
        } => {
            println!(
                "✅ Sent {} of {} new posting(s); watermark is now {}",
                count, unseen, checkpoint
            );
        }
    }
}

fn fail(e: &DigestError) -> ! {
    if e.exit_code() == 0 {
        tracing::warn!("⚠️ Nothing to do: {}", e);
        eprintln!("⚠️ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(0)
    }

    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code())
}
