use std::{future::Future, io::Write, sync::Arc};

use anyhow::Result;

use crate::domain::{models::Session, services::SessionCoordinator};

use super::status;

/// Follow the running session live until Ctrl-C. The session keeps running afterwards.
pub async fn watch(coordinator: &SessionCoordinator, out: &mut impl Write) -> Result<()> {
    follow(coordinator, out, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    })
    .await
}

pub(crate) async fn follow(
    coordinator: &SessionCoordinator,
    out: &mut impl Write,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let (tx, mut rx) = tokio::sync::watch::channel(Session::idle());
    let handle = coordinator.attach(Arc::new(move |session: &Session| {
        tx.send_replace(session.clone());
    }));

    if !coordinator.is_running() {
        coordinator.detach(handle);
        return status(coordinator, out);
    }

    writeln!(out, "Watching session. Ctrl-C stops watching, not the session.")?;
    tokio::pin!(shutdown);

    let result = loop {
        let session = rx.borrow_and_update().clone();
        write!(out, "\r{}", session.elapsed_display)?;
        out.flush()?;
        if !session.running {
            break Ok(());
        }

        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
            }
            _ = &mut shutdown => break Ok(()),
        }
    };

    writeln!(out)?;
    coordinator.detach(handle);
    result
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use time::macros::datetime;

    use super::*;
    use crate::{
        adapters::outbound::MemoryKeyValueStore,
        domain::{ports::outbound::ManualClock, services::SessionSnapshotStore},
    };

    fn coordinator() -> (SessionCoordinator, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(datetime!(2024-03-01 09:00:00 UTC)));
        let store = SessionSnapshotStore::new(Arc::new(MemoryKeyValueStore::new()));
        (SessionCoordinator::new(store, clock.clone()), clock)
    }

    #[tokio::test(start_paused = true)]
    async fn follows_ticks_until_shutdown() {
        let (coordinator, clock) = coordinator();
        coordinator.start().unwrap();
        clock.advance(time::Duration::seconds(5));

        let mut buf = Vec::new();
        follow(
            &coordinator,
            &mut buf,
            tokio::time::sleep(Duration::from_millis(2500)),
        )
        .await
        .unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\r00:00:00"), "{text}");
        assert!(text.contains("\r00:00:05"), "{text}");
        assert!(text.ends_with('\n'));
        assert!(coordinator.is_running());
        assert_eq!(coordinator.listener_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_session_prints_status_once() {
        let (coordinator, _) = coordinator();

        let mut buf = Vec::new();
        follow(&coordinator, &mut buf, std::future::pending::<()>())
            .await
            .unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "Not timed in\n");
        assert_eq!(coordinator.listener_count(), 0);
    }
}
