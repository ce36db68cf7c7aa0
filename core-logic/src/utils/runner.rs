use crate::traits::Worker;
use anyhow::Result;
use tokio::signal;
use tokio::task::JoinSet;
use tracing::{error, info, warn, Instrument};

pub struct WorkerRunner;

impl WorkerRunner {
    /// Spawns every worker as an independent task and keeps the process alive
    /// until Ctrl+C. Workers never synchronize with one another.
    pub async fn run_workers(workers: Vec<Box<dyn Worker>>) -> Result<()> {
        let mut set = JoinSet::new();

        let start_time = std::time::Instant::now();
        info!("Starting {} task loops...", workers.len());

        for worker in workers {
            let name = worker.name().to_string();
            let span = tracing::info_span!("worker", task = name.as_str());

            set.spawn(
                async move {
                    worker.run_forever().await;
                    warn!("Task loop {} returned", name);
                }
                .instrument(span),
            );
        }

        let shutdown = async {
            match signal::ctrl_c().await {
                Ok(()) => info!("🛑 Received Ctrl+C. Stopping task loops..."),
                Err(err) => {
                    // Without a signal handler the loops simply run until the process is killed
                    error!("Unable to listen for shutdown signal: {}", err);
                    std::future::pending::<()>().await
                }
            }
        };

        let drain = async {
            while let Some(res) = set.join_next().await {
                if let Err(e) = res {
                    error!("A task loop panicked or failed to join: {:?}", e);
                }
            }
        };

        tokio::select! {
            _ = shutdown => {}
            _ = drain => warn!("All task loops have exited."),
        }

        info!(
            "Shutdown after {:.1}s of runtime.",
            start_time.elapsed().as_secs_f64()
        );

        Ok(())
    }
}
