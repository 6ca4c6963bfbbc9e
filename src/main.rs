use ig_unfollower::application::services::runner::run;
use ig_unfollower::config::Config;
use ig_unfollower::utils::logger::init_session_logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::new();
    let _guard = init_session_logging(&config.storage.log_dir)?;
    info!("Configuration: {}", config);

    match run(&config).await {
        Ok(report) => {
            info!("Session report: {}", report);
            Ok(())
        }
        Err(e) => {
            error!("Unfollow session aborted: {}", e);
            Err(e.into())
        }
    }
}
