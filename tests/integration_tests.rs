// Integration tests - the plugin, navigator and settings working together on a real vault

mod common;

use common::fixtures::{clock, TestVault};
use common::tracing::init_tracing_from_env;
use moodnote::command_registry::CommandRegistry;
use moodnote::config::{JsonFileStore, MemorySettingsStore, MoodnoteConfig};
use moodnote::config_io::{vault_settings_path, ConfigResolver, DirectoryContext};
use moodnote::model::cursor::CursorPosition;
use moodnote::model::workspace::{BufferWorkspace, Editor, Workspace};
use moodnote::navigator::{MonthlyNoteNavigator, NavigationReport};
use moodnote::plugin::{CommandOutcome, MoodnotePlugin, OPEN_TODAY_COMMAND};

fn run(vault: &TestVault, year: i32, month: u32, day: u32) -> (NavigationReport, BufferWorkspace) {
    init_tracing_from_env();
    let time = clock(year, month, day);
    let mut workspace = BufferWorkspace::with_pane(vault.vault.clone());
    let report = MonthlyNoteNavigator::new(vault.vault.as_ref(), time.as_ref())
        .open_today_entry(&mut workspace, &MoodnoteConfig::default())
        .unwrap();
    (report, workspace)
}

/// Empty vault on Thursday 2025-03-13: folder, file and heading are created
#[test]
fn test_first_run_creates_note_with_heading() {
    let vault = TestVault::new().unwrap();
    let (report, mut workspace) = run(&vault, 2025, 3, 13);

    assert!(vault.path("moodnote").is_dir());
    assert_eq!(report.path, "moodnote/2025-03.md");
    assert_eq!(report.created_folders, vec!["moodnote"]);
    assert!(report.created_file);
    assert!(report.heading_inserted);
    assert_eq!(vault.read("moodnote/2025-03.md").unwrap(), "### 13일 (목)\n");
    assert_eq!(report.cursor, Some(CursorPosition::new(0, 11)));

    let pane = workspace.get_leaf(false).unwrap();
    let editor = workspace.editor(pane).unwrap();
    assert_eq!(editor.value(), "### 13일 (목)\n");
    assert_eq!(editor.cursor(), CursorPosition::new(0, 11));
}

#[test]
fn test_existing_entries_put_cursor_after_last_line() {
    let vault = TestVault::new().unwrap();
    let content = "### 13일 (목)\nA\nB\nC\n";
    vault.write("moodnote/2025-03.md", content).unwrap();

    let (report, _) = run(&vault, 2025, 3, 13);

    assert!(report.created_folders.is_empty());
    assert!(!report.created_file);
    assert!(!report.heading_inserted);
    assert_eq!(report.cursor, Some(CursorPosition::new(3, 1)));
    assert_eq!(vault.read("moodnote/2025-03.md").unwrap(), content);
}

#[test]
fn test_new_day_is_appended_after_previous_day() {
    let vault = TestVault::new().unwrap();
    vault
        .write("moodnote/2025-03.md", "### 12일 (수)\nyesterday")
        .unwrap();

    let (report, _) = run(&vault, 2025, 3, 13);

    assert!(report.heading_inserted);
    assert_eq!(
        vault.read("moodnote/2025-03.md").unwrap(),
        "### 12일 (수)\nyesterday\n### 13일 (목)\n"
    );
    assert_eq!(report.cursor, Some(CursorPosition::new(2, 11)));
}

#[test]
fn test_second_run_changes_nothing() {
    let vault = TestVault::new().unwrap();
    let (first, _) = run(&vault, 2025, 3, 13);
    let after_first = vault.read("moodnote/2025-03.md").unwrap();

    let (second, _) = run(&vault, 2025, 3, 13);

    assert_eq!(vault.read("moodnote/2025-03.md").unwrap(), after_first);
    assert!(second.created_folders.is_empty());
    assert!(!second.created_file);
    assert!(!second.heading_inserted);
    assert_eq!(second.cursor, first.cursor);
}

#[test]
fn test_new_month_gets_its_own_file() {
    let vault = TestVault::new().unwrap();
    run(&vault, 2025, 3, 31);
    let (report, _) = run(&vault, 2025, 4, 1);

    assert_eq!(report.path, "moodnote/2025-04.md");
    assert_eq!(vault.read("moodnote/2025-04.md").unwrap(), "### 01일 (화)\n");
    assert_eq!(vault.read("moodnote/2025-03.md").unwrap(), "### 31일 (월)\n");
}

#[test]
fn test_plugin_persists_folder_in_vault_settings() {
    let vault = TestVault::new().unwrap();
    let settings_path = vault_settings_path(vault.root());
    let registry = CommandRegistry::new();

    let mut plugin = MoodnotePlugin::new(
        vault.vault.clone(),
        clock(2025, 3, 13),
        Box::new(JsonFileStore::new(settings_path.clone())),
    );
    plugin.load(&registry).unwrap();
    plugin.set_folder_path("journal/mood").unwrap();

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&settings_path).unwrap()).unwrap();
    assert_eq!(saved["folderPath"], "journal/mood");

    let mut workspace = BufferWorkspace::with_pane(vault.vault.clone());
    let CommandOutcome::Completed(report) = plugin.execute(OPEN_TODAY_COMMAND, &mut workspace)
    else {
        panic!("command failed");
    };
    assert_eq!(report.path, "journal/mood/2025-03.md");
    assert!(vault.path("journal/mood/2025-03.md").is_file());
}

#[test]
fn test_layered_settings_drive_the_plugin() {
    let vault = TestVault::new().unwrap();
    let dir_context = DirectoryContext::for_testing(vault.root());
    std::fs::create_dir_all(&dir_context.config_dir).unwrap();
    std::fs::write(
        dir_context.user_settings_path(),
        r#"{"folderPath": "from-user/", "locale": "en"}"#,
    )
    .unwrap();

    let registry = CommandRegistry::new();
    let mut plugin = MoodnotePlugin::new(
        vault.vault.clone(),
        clock(2025, 3, 13),
        Box::new(ConfigResolver::new(&dir_context, vault.root())),
    );
    plugin.load(&registry).unwrap();

    let mut workspace = BufferWorkspace::with_pane(vault.vault.clone());
    let CommandOutcome::Completed(report) = plugin.execute(OPEN_TODAY_COMMAND, &mut workspace)
    else {
        panic!("command failed");
    };
    assert_eq!(report.path, "from-user/2025-03.md");
    assert_eq!(
        vault.read("from-user/2025-03.md").unwrap(),
        "### 13일 (Thu)\n"
    );
}

#[test]
fn test_failure_leaves_vault_and_posts_notice() {
    let vault = TestVault::new().unwrap();
    // A file where the folder should be makes folder creation impossible.
    vault.write("blocked", "").unwrap();

    let registry = CommandRegistry::new();
    let mut plugin = MoodnotePlugin::new(
        vault.vault.clone(),
        clock(2025, 3, 13),
        Box::new(MemorySettingsStore::with_data(
            serde_json::json!({"folderPath": "blocked/notes"}),
        )),
    );
    plugin.load(&registry).unwrap();

    let mut workspace = BufferWorkspace::with_pane(vault.vault.clone());
    let outcome = plugin.click_ribbon(&registry, 0, &mut workspace);
    assert!(matches!(outcome, CommandOutcome::Failed(_)));
    assert_eq!(plugin.notices().len(), 1);
    assert!(workspace.active_pane().unwrap().file.is_none());
}
