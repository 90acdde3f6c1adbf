//! Background scheduled tasks for the application.
//!
//! Currently only the tournament status sweeper lives here: it opens
//! registration for scheduled tournaments close to their start time and moves
//! overdue registering tournaments to in-progress. Call `spawn_all` once during
//! startup to launch them.

use crate::services::TournamentService;

/// Spawn all background tasks.
///
/// Notes
/// - Each task is idempotent as implemented in its service and runs on its own schedule.
/// - This function detaches tasks via `tokio::spawn`; it does not block.
pub fn spawn_all(tournament_service: TournamentService) {
    // 每分钟推进一次赛事状态
    {
        let svc = tournament_service.clone();
        tokio::spawn(async move {
            loop {
                match svc.advance_statuses().await {
                    Ok(n) if n > 0 => log::info!("Tournament statuses advanced: {n}"),
                    Ok(_) => {}
                    Err(e) => log::error!("Failed to advance tournament statuses: {e:?}"),
                }
                tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            }
        });
    }
}
