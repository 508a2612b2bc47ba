mod common;

use std::fs;

use storyline_application::{AppContext, Destination};
use storyline_core::config::DEFAULT_BASE_URL;
use storyline_infrastructure::StoryPaths;
use tempfile::TempDir;

#[tokio::test]
async fn test_fresh_install_routes_to_welcome() {
    let temp_dir = TempDir::new().unwrap();
    let paths = StoryPaths::new(Some(temp_dir.path().to_path_buf()));

    let context = AppContext::from_paths(&paths).unwrap();
    assert_eq!(context.config.base_url, DEFAULT_BASE_URL);

    let mut router = context.router().await;
    assert_eq!(router.next().await, Some(Destination::Welcome));
}

#[tokio::test]
async fn test_persisted_session_routes_to_main() {
    let temp_dir = TempDir::new().unwrap();
    let paths = StoryPaths::new(Some(temp_dir.path().to_path_buf()));

    {
        let context = AppContext::from_paths(&paths).unwrap();
        context
            .users
            .save_session(common::logged_in_session())
            .await
            .unwrap();
    }

    let context = AppContext::from_paths(&paths).unwrap();
    let mut router = context.router().await;
    assert_eq!(router.next().await, Some(Destination::Main));
}

#[tokio::test]
async fn test_config_file_is_honoured() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "base_url = \"http://localhost:8080/v1\"\npage_size = 5\n",
    )
    .unwrap();
    let paths = StoryPaths::new(Some(temp_dir.path().to_path_buf()));

    let context = AppContext::from_paths(&paths).unwrap();
    assert_eq!(context.config.base_url, "http://localhost:8080/v1");
    assert_eq!(context.config.page_size, 5);
}

#[tokio::test]
async fn test_ephemeral_context_keeps_nothing_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let paths = StoryPaths::new(Some(temp_dir.path().to_path_buf()));

    let context = AppContext::ephemeral(&paths).unwrap();
    context
        .users
        .save_session(common::logged_in_session())
        .await
        .unwrap();

    assert!(!temp_dir.path().join("session.json").exists());
}
