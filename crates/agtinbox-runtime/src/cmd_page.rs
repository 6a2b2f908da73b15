//! `agtinbox list` / `agtinbox delta`: one page as pretty JSON on stdout.

use std::path::Path;

use agtinbox_core::types::{InboxPage, InboxQuery};
use agtinbox_gateway::Paginator;

use crate::cli::{PageOpts, clamp_limit};
use crate::store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    Chronological,
    Delta,
}

pub fn build_query(opts: &PageOpts) -> InboxQuery {
    InboxQuery {
        agent_handle: opts.agent.clone(),
        cursor: opts.cursor.clone(),
        limit: clamp_limit(opts.limit),
    }
}

pub async fn fetch_page(
    paginator: &Paginator,
    data_dir: &Path,
    query: &InboxQuery,
    mode: PageMode,
) -> anyhow::Result<InboxPage> {
    let snapshot = store::load_snapshot(data_dir).await?;
    let sources = snapshot.sources();
    let page = match mode {
        PageMode::Chronological => paginator.list_events(&sources, query)?,
        PageMode::Delta => paginator.list_events_delta(&sources, query)?,
    };
    Ok(page)
}

pub async fn cmd_page(
    paginator: &Paginator,
    data_dir: &Path,
    opts: &PageOpts,
    mode: PageMode,
) -> anyhow::Result<()> {
    let page = fetch_page(paginator, data_dir, &build_query(opts), mode).await?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
