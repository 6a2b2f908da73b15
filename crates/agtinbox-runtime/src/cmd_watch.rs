//! `agtinbox watch`: delta polling loop. Each new event is printed as one
//! JSON line, oldest first. Backlogs larger than `--limit` are drained
//! before waiting for the next tick.

use std::path::Path;

use agtinbox_core::types::{CanonicalEvent, InboxQuery};
use agtinbox_gateway::Paginator;
use tokio::time::{Duration, MissedTickBehavior, interval};

use crate::cli::WatchOpts;
use crate::cmd_page::{PageMode, build_query, fetch_page};

pub async fn cmd_watch(
    paginator: &Paginator,
    data_dir: &Path,
    opts: &WatchOpts,
) -> anyhow::Result<()> {
    let mut query = build_query(&opts.page);
    let mut ticker = interval(Duration::from_millis(opts.interval_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(agent = %query.agent_handle, interval_ms = opts.interval_ms, "watching inbox");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                tracing::info!("received ctrl-c, stopping watch");
                break;
            }
            _ = ticker.tick() => {
                if let Err(e) = poll_tick(paginator, data_dir, &mut query).await {
                    tracing::warn!("poll tick failed: {e:#}");
                }
            }
        }
    }
    Ok(())
}

/// Poll until caught up, printing new events and advancing the cursor.
async fn poll_tick(
    paginator: &Paginator,
    data_dir: &Path,
    query: &mut InboxQuery,
) -> anyhow::Result<()> {
    loop {
        let page = fetch_page(paginator, data_dir, query, PageMode::Delta).await?;
        emit(&page.items)?;
        // Without a cursor the page only anchors the high-water mark; older
        // events are not replayed.
        let caught_up = !page.has_more || query.cursor.is_none();
        query.cursor = page.next_cursor;
        if page.items.is_empty() || caught_up {
            return Ok(());
        }
        tracing::debug!("backlog exceeds limit, draining");
    }
}

fn emit(items: &[CanonicalEvent]) -> anyhow::Result<()> {
    for event in items.iter().rev() {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ARTIFACTS_FILE, COMMENTS_FILE};
    use agtinbox_gateway::cursor;

    fn write_comments(dir: &Path, minutes: &[u32]) {
        let records: Vec<serde_json::Value> = minutes
            .iter()
            .map(|m| {
                serde_json::json!({
                    "id": format!("c{m}"),
                    "artifact_id": "art_1",
                    "author": {"handle": "bob"},
                    "status": "visible",
                    "created_at": format!("2026-03-01T09:{m:02}:00Z")
                })
            })
            .collect();
        std::fs::write(
            dir.join(COMMENTS_FILE),
            serde_json::to_string(&records).expect("serialize"),
        )
        .expect("write comments");
    }

    fn cursor_id(query: &InboxQuery) -> Option<String> {
        query
            .cursor
            .as_deref()
            .and_then(cursor::decode)
            .map(|b| b.id)
    }

    #[tokio::test]
    async fn tick_anchors_then_drains_backlog() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(ARTIFACTS_FILE),
            r#"[{"id":"art_1","owner_handle":"alice"}]"#,
        )
        .expect("write artifacts");
        write_comments(dir.path(), &[1, 2, 3]);

        let paginator = Paginator::default();
        let mut query = InboxQuery {
            agent_handle: "alice".to_owned(),
            cursor: None,
            limit: 2,
        };

        poll_tick(&paginator, dir.path(), &mut query).await.expect("first tick");
        assert_eq!(cursor_id(&query).as_deref(), Some("comment:c3"));

        poll_tick(&paginator, dir.path(), &mut query).await.expect("idle tick");
        assert_eq!(cursor_id(&query).as_deref(), Some("comment:c3"));

        write_comments(dir.path(), &[1, 2, 3, 4, 5, 6, 7]);
        poll_tick(&paginator, dir.path(), &mut query).await.expect("drain tick");
        assert_eq!(cursor_id(&query).as_deref(), Some("comment:c7"));
    }
}
