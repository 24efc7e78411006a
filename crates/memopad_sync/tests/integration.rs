//! Integration tests: controller against the reference server.

use memopad_core::{Document, Page};
use memopad_server::MemoServer;
use memopad_store::{DocumentCache, FileBackend, MemoryBackend};
use memopad_sync::{
    HttpRemote, LoopbackClient, LoopbackServer, MemoSyncController, Notice, SessionState,
    SyncConfig,
};
use std::sync::Arc;
use std::time::Instant;
use tempfile::TempDir;

/// Routes loopback requests to a shared [`MemoServer`].
struct ServerEndpoint {
    server: Arc<MemoServer>,
}

impl LoopbackServer for ServerEndpoint {
    fn handle_get(&self) -> Result<String, String> {
        self.server.handle_get().map_err(|e| e.to_string())
    }

    fn handle_post(&self, body: &str) -> Result<String, String> {
        self.server.handle_post(body).map_err(|e| e.to_string())
    }
}

fn remote_for(server: &Arc<MemoServer>) -> HttpRemote<LoopbackClient<ServerEndpoint>> {
    let endpoint = ServerEndpoint {
        server: Arc::clone(server),
    };
    HttpRemote::new("loopback://memopad", LoopbackClient::new(endpoint))
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn startup_adopts_server_copy() {
    init_tracing();

    let server_doc = Document::from_parts(vec![Page::new("shared", "from server")], 0);
    let server = Arc::new(MemoServer::with_document(server_doc.clone()));

    let mut ctl = MemoSyncController::new(
        SyncConfig::new("loopback://memopad"),
        DocumentCache::new(MemoryBackend::new()),
        remote_for(&server),
    );

    let outcome = ctl.initialize().unwrap();
    assert!(outcome.render);
    assert_eq!(ctl.state(), SessionState::Locked);

    let outcome = ctl.reconcile().unwrap();
    assert_eq!(outcome.notice.unwrap().notice, Notice::Synced);
    assert_eq!(ctl.state(), SessionState::Ready);
    assert_eq!(ctl.document(), &server_doc);
}

#[test]
fn save_reaches_server_and_survives_reopen() {
    let server = Arc::new(MemoServer::new());

    // First session: write a memo and save.
    let mut ctl = MemoSyncController::new(
        SyncConfig::new("loopback://memopad"),
        DocumentCache::new(MemoryBackend::new()),
        remote_for(&server),
    );
    ctl.initialize().unwrap();
    ctl.reconcile().unwrap();
    ctl.edit_title("groceries", Instant::now()).unwrap();
    ctl.edit_body("milk, eggs", Instant::now()).unwrap();
    let outcome = ctl.save_now().unwrap();
    assert_eq!(outcome.notice.unwrap().notice, Notice::Saved);

    assert_eq!(server.document().selected_page().title, "groceries");

    // Second session on another machine: empty cache, pulls from the server.
    let mut other = MemoSyncController::new(
        SyncConfig::new("loopback://memopad"),
        DocumentCache::new(MemoryBackend::new()),
        remote_for(&server),
    );
    other.initialize().unwrap();
    let outcome = other.reconcile().unwrap();
    assert_eq!(outcome.notice.unwrap().notice, Notice::Synced);
    assert_eq!(other.document().selected_page().body, "milk, eggs");
}

#[test]
fn offline_startup_uses_file_cache() {
    let dir = TempDir::new().unwrap();
    let server = Arc::new(MemoServer::new());

    // First session persists to the file cache and the server.
    {
        let cache = DocumentCache::new(FileBackend::open(dir.path()).unwrap());
        let mut ctl = MemoSyncController::new(
            SyncConfig::new("loopback://memopad"),
            cache,
            remote_for(&server),
        );
        ctl.initialize().unwrap();
        ctl.reconcile().unwrap();
        ctl.edit_body("written while online", Instant::now()).unwrap();
        ctl.save_now().unwrap();
    }

    // The server goes dark; a new session still renders the cached memo.
    server.set_fail_reads(true);
    let cache = DocumentCache::new(FileBackend::open(dir.path()).unwrap());
    let mut ctl = MemoSyncController::new(
        SyncConfig::new("loopback://memopad"),
        cache,
        remote_for(&server),
    );

    ctl.initialize().unwrap();
    assert_eq!(ctl.document().selected_page().body, "written while online");

    let outcome = ctl.reconcile().unwrap();
    assert_eq!(outcome.notice.unwrap().notice, Notice::FetchFailed);
    assert_eq!(ctl.state(), SessionState::Ready);
    assert_eq!(ctl.document().selected_page().body, "written while online");
}

#[test]
fn write_outage_keeps_local_then_catches_up() {
    let server = Arc::new(MemoServer::new());
    let mut ctl = MemoSyncController::new(
        SyncConfig::new("loopback://memopad"),
        DocumentCache::new(MemoryBackend::new()),
        remote_for(&server),
    );
    ctl.initialize().unwrap();
    ctl.reconcile().unwrap();

    // Structural mutation during a write outage: silent, locally durable.
    server.set_fail_writes(true);
    let outcome = ctl.add_page().unwrap();
    assert!(outcome.render);
    assert!(outcome.notice.is_none());
    assert_eq!(ctl.document().len(), 2);
    assert_eq!(server.posts_accepted(), 0);

    // Explicit save during the outage reports the failure, keeps state.
    let outcome = ctl.save_now().unwrap();
    assert_eq!(outcome.notice.unwrap().notice, Notice::SaveFailed);
    assert_eq!(ctl.document().len(), 2);

    // Outage ends; the next save replicates the full document.
    server.set_fail_writes(false);
    let outcome = ctl.save_now().unwrap();
    assert_eq!(outcome.notice.unwrap().notice, Notice::Saved);
    assert_eq!(server.document().len(), 2);
}

#[test]
fn two_sessions_last_writer_wins() {
    let server = Arc::new(MemoServer::new());

    let mut first = MemoSyncController::new(
        SyncConfig::new("loopback://memopad"),
        DocumentCache::new(MemoryBackend::new()),
        remote_for(&server),
    );
    first.initialize().unwrap();
    first.reconcile().unwrap();

    let mut second = MemoSyncController::new(
        SyncConfig::new("loopback://memopad"),
        DocumentCache::new(MemoryBackend::new()),
        remote_for(&server),
    );
    second.initialize().unwrap();
    second.reconcile().unwrap();

    first.edit_title("from first", Instant::now()).unwrap();
    first.save_now().unwrap();
    second.edit_title("from second", Instant::now()).unwrap();
    second.save_now().unwrap();

    // Whole-document replication: the later push wins outright.
    assert_eq!(server.document().selected_page().title, "from second");
}

#[test]
fn reconcile_skips_server_copy_after_local_edits() {
    let server = Arc::new(MemoServer::new());
    let mut ctl = MemoSyncController::new(
        SyncConfig::new("loopback://memopad"),
        DocumentCache::new(MemoryBackend::new()),
        remote_for(&server),
    );
    ctl.initialize().unwrap();
    ctl.reconcile().unwrap();

    // Another device replaces the server copy.
    server
        .handle_post(r#"{"pages":[{"title":"other device","body":""}],"currentPage":0}"#)
        .unwrap();

    // This session edits but has not pushed yet (push failing keeps the
    // edited flag set).
    server.set_fail_writes(true);
    ctl.edit_title("typed here", Instant::now()).unwrap();
    ctl.save_now().unwrap();

    let outcome = ctl.reconcile().unwrap();
    assert_eq!(outcome.notice.unwrap().notice, Notice::SyncSkipped);
    assert_eq!(ctl.document().selected_page().title, "typed here");
}
