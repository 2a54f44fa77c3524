// Sync service - Keeps the dashboard state consistent with the remote source
//
// A single tokio task owns the loop: it loads the unit catalog once, then
// reacts to selection commands and a fixed-period interval. Fetches run in
// spawned tasks so a slow response never blocks a selection change or a
// tick; each fetch is tagged with a generation number and late responses
// for a superseded selection are discarded.
use crate::application::catalog_service::CatalogService;
use crate::application::progress_repository::ProgressRepository;
use crate::domain::dashboard::DashboardSnapshot;
use crate::domain::unit::Unit;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to load unit catalog ({0})")]
    CatalogLoad(String),
    #[error("failed to load data")]
    DashboardLoad,
}

/// The one state container shared with the rendering layer. Mutated only
/// by the sync task; readers get it through a watch channel.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub units: Vec<Unit>,
    pub selection: Option<String>,
    pub snapshot: Option<DashboardSnapshot>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            units: Vec::new(),
            selection: None,
            snapshot: None,
            // Loading until the first fetch settles, as the initial view.
            is_loading: true,
            error: None,
        }
    }
}

enum Command {
    SetSelection(String),
    Shutdown,
}

struct FetchOutcome {
    generation: u64,
    result: Result<DashboardSnapshot, SyncError>,
}

/// Public surface of the sync core: a read-only view of the state plus
/// the selection mutator and a clean shutdown path.
pub struct DashboardHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<DashboardState>,
    task: JoinHandle<()>,
}

impl DashboardHandle {
    pub fn state(&self) -> watch::Receiver<DashboardState> {
        self.state.clone()
    }

    pub async fn set_selection(&self, world_id: impl Into<String>) {
        let _ = self
            .commands
            .send(Command::SetSelection(world_id.into()))
            .await;
    }

    pub async fn shutdown(self) {
        let _ = self.commands.send(Command::Shutdown).await;
        let _ = self.task.await;
    }
}

/// Spawns the sync task and returns its handle.
pub fn spawn(repository: Arc<dyn ProgressRepository>, poll_interval: Duration) -> DashboardHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (state_tx, state_rx) = watch::channel(DashboardState::default());
    let task = tokio::spawn(run(repository, poll_interval, cmd_rx, state_tx));

    DashboardHandle {
        commands: cmd_tx,
        state: state_rx,
        task,
    }
}

async fn run(
    repository: Arc<dyn ProgressRepository>,
    poll_interval: Duration,
    mut cmd_rx: mpsc::Receiver<Command>,
    state_tx: watch::Sender<DashboardState>,
) {
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<FetchOutcome>(16);
    let mut generation: u64 = 0;

    // Load the catalog exactly once. A failure here is blocking: no
    // selection is ever set, so the poll guard below skips every tick.
    let catalog_service = CatalogService::new(repository.clone());
    match catalog_service.load_catalog().await {
        Ok(catalog) => {
            let selection = catalog.default_selection();
            state_tx.send_modify(|s| {
                s.units = catalog.units;
                s.selection = selection.clone();
            });
            if let Some(world_id) = selection {
                generation += 1;
                state_tx.send_modify(|s| s.is_loading = true);
                start_fetch(&repository, &outcome_tx, generation, world_id);
            }
        }
        Err(e) => {
            tracing::warn!("catalog load failed: {e:#}");
            state_tx.send_modify(|s| {
                s.is_loading = false;
                s.error = Some(SyncError::CatalogLoad(format!("{e:#}")).to_string());
            });
        }
    }

    let mut ticker = tokio::time::interval(poll_interval);
    // The first tick completes immediately and the initial fetch already
    // went out above; consume it so the next tick lands one period out.
    ticker.tick().await;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(Command::SetSelection(world_id)) => {
                    if state_tx.borrow().selection.as_deref() == Some(world_id.as_str()) {
                        continue;
                    }
                    generation += 1;
                    state_tx.send_modify(|s| {
                        s.selection = Some(world_id.clone());
                        s.is_loading = true;
                    });
                    tracing::debug!("selection changed to {world_id}");
                    start_fetch(&repository, &outcome_tx, generation, world_id);
                    // Fresh full period for the new selection.
                    ticker.reset();
                }
                Some(Command::Shutdown) | None => break,
            },

            _ = ticker.tick() => {
                let selection = state_tx.borrow().selection.clone();
                if let Some(world_id) = selection {
                    state_tx.send_modify(|s| s.is_loading = true);
                    start_fetch(&repository, &outcome_tx, generation, world_id);
                }
            }

            Some(outcome) = outcome_rx.recv() => {
                if outcome.generation != generation {
                    tracing::debug!("discarding response for superseded selection");
                    continue;
                }
                match outcome.result {
                    Ok(snapshot) => state_tx.send_modify(|s| {
                        s.snapshot = Some(snapshot);
                        s.is_loading = false;
                        s.error = None;
                    }),
                    // The previous snapshot stays on display until the
                    // next successful fetch; the catalog is untouched.
                    Err(e) => state_tx.send_modify(|s| {
                        s.is_loading = false;
                        s.error = Some(e.to_string());
                    }),
                }
            }
        }
    }

    tracing::debug!("sync task exiting");
}

fn start_fetch(
    repository: &Arc<dyn ProgressRepository>,
    outcome_tx: &mpsc::Sender<FetchOutcome>,
    generation: u64,
    world_id: String,
) {
    let repository = repository.clone();
    let outcome_tx = outcome_tx.clone();
    tokio::spawn(async move {
        tracing::debug!("fetching dashboard for {world_id}");
        let result = repository
            .fetch_dashboard(&world_id)
            .await
            .map_err(|e| {
                tracing::warn!("dashboard fetch for {world_id} failed: {e:#}");
                SyncError::DashboardLoad
            });
        let _ = outcome_tx.send(FetchOutcome { generation, result }).await;
    });
}
