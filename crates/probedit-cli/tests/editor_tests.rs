//! Editor client tests against a live server on an ephemeral port

use probedit_cli::commands::execute_show;
use probedit_cli::config::OutputFormat;
use probedit_cli::render::render_latex;
use probedit_cli::{Acknowledgment, Editor, EditorState, Formatter};
use probedit_domain::ProblemStore;
use probedit_sdk::ProblemClient;
use probedit_server::handlers::{create_router, AppState};
use probedit_store::SqliteStore;
use tokio::net::TcpListener;

/// Serve a store and return its base URL plus the shared state for inspection
async fn spawn_server(store: SqliteStore) -> (String, AppState<SqliteStore>) {
    let state = AppState::new(store);
    let app = create_router(state.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

fn seeded_store(source: &str, editable: &str) -> SqliteStore {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.insert_problem(source, editable).unwrap();
    store
}

fn stored_editable(state: &AppState<SqliteStore>) -> String {
    state
        .store
        .lock()
        .unwrap()
        .latest_problem()
        .unwrap()
        .unwrap()
        .editable_problem
}

#[tokio::test]
async fn test_load_edit_save_reload() {
    let (url, state) = spawn_server(seeded_store(r"\frac{1}{2}", r"\frac{1}{2}")).await;
    let mut editor = Editor::new(ProblemClient::new(&url));

    assert!(editor.load().await);
    assert_eq!(editor.state().source_problem(), r"\frac{1}{2}");
    assert_eq!(editor.state().rendered_source(), render_latex(r"\frac{1}{2}"));

    editor.edit(r"\tfrac{1}{2}");
    assert_eq!(editor.state().rendered_editable(), render_latex(r"\tfrac{1}{2}"));

    assert_eq!(editor.save().await, Acknowledgment::Saved);
    assert_eq!(stored_editable(&state), r"\tfrac{1}{2}");

    let mut fresh = Editor::new(ProblemClient::new(&url));
    assert!(fresh.load().await);
    assert_eq!(fresh.state().editable_problem(), r"\tfrac{1}{2}");
    assert_eq!(fresh.state().source_problem(), r"\frac{1}{2}");
}

#[tokio::test]
async fn test_load_from_empty_store_keeps_defaults() {
    let (url, _) = spawn_server(SqliteStore::new(":memory:").unwrap()).await;
    let mut editor = Editor::new(ProblemClient::new(&url));

    assert!(!editor.load().await);
    assert_eq!(editor.state(), &EditorState::new());
}

#[tokio::test]
async fn test_unreachable_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut editor = Editor::new(ProblemClient::new(&format!("http://{}", addr)));

    assert!(!editor.load().await, "Load failure is silent");
    assert_eq!(editor.state(), &EditorState::new());

    editor.edit("x");
    assert_eq!(editor.save().await, Acknowledgment::SaveFailed);

    // Still usable afterwards
    editor.edit("y");
    assert_eq!(editor.state().editable_problem(), "y");
}

#[tokio::test]
async fn test_save_to_empty_store_fails() {
    let (url, _) = spawn_server(SqliteStore::new(":memory:").unwrap()).await;
    let mut editor = Editor::new(ProblemClient::new(&url));

    editor.edit("orphan");
    assert_eq!(editor.save().await, Acknowledgment::SaveFailed);
}

#[tokio::test]
async fn test_malformed_latex_saves_verbatim() {
    let (url, state) = spawn_server(seeded_store("x", "x")).await;
    let mut editor = Editor::new(ProblemClient::new(&url));
    editor.load().await;

    editor.edit(r"\frac{a");
    assert_eq!(editor.save().await, Acknowledgment::Saved);
    assert_eq!(stored_editable(&state), r"\frac{a");
}

#[tokio::test]
async fn test_show_prints_latest_problem() {
    let (url, _) = spawn_server(seeded_store("a^2", "b^2")).await;
    let mut editor = Editor::new(ProblemClient::new(&url));
    let formatter = Formatter::new(OutputFormat::Json, false);

    let output = execute_show(&mut editor, &formatter).await.unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["source_problem"], "a^2");
    assert_eq!(value["editable_problem"], "b^2");
}

#[tokio::test]
async fn test_show_with_unreachable_server_prints_empty_state() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut editor = Editor::new(ProblemClient::new(&format!("http://{}", addr)));
    let formatter = Formatter::new(OutputFormat::Json, false);

    let output = execute_show(&mut editor, &formatter).await.unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["source_problem"], "");
    assert_eq!(value["editable_problem"], "");
    assert_eq!(value["rendered_editable"], "");
}
