use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracker_core::{AppState, PreferencesSnapshot, TableView};
use tracker_engine::{JobListPresenter, ReqwestBackend};
use tracker_logging::{tracker_debug, tracker_info};

use super::commands::{self, Command, CommandError, RowTarget, HELP};
use super::config::AppConfig;
use super::persistence;
use super::ui::render;

pub async fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let backend = ReqwestBackend::new(config.backend_settings())
        .with_context(|| format!("invalid backend url {:?}", config.base_url))?;
    tracker_info!("Using backend at {}", config.base_url);

    let mut presenter = JobListPresenter::with_state(
        Arc::new(backend),
        AppState::with_debounce(config.debounce()),
    );
    if let Some(snapshot) = persistence::load_preferences(&config.state_dir) {
        presenter.restore_preferences(snapshot);
    }
    let mut saved = presenter.state().preferences_snapshot();

    if config.check_session_on_start {
        // Failures show up as notices.
        let _ = presenter.check_session().await;
    }
    draw(&mut presenter, true);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        let force = tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match commands::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => execute(&mut presenter, command).await,
                    Err(CommandError::Empty) => false,
                    Err(err) => {
                        println!("{err}");
                        false
                    }
                }
            }
            Some(msg) = presenter.next_timer_msg() => {
                presenter.dispatch_local(msg);
                false
            }
        };
        draw(&mut presenter, force);
        saved = save_if_changed(&config, &presenter, saved);
    }

    persistence::save_preferences(&config.state_dir, &presenter.state().preferences_snapshot());
    tracker_info!("Exiting");
    Ok(())
}

/// Runs one command. Returns `true` when the table should be redrawn regardless of changes.
async fn execute(presenter: &mut JobListPresenter, command: Command) -> bool {
    let result = match command {
        Command::Search(criteria) => presenter.submit_search(criteria).await,
        Command::Refresh => presenter.refresh(false).await,
        Command::Filter { field, value } => {
            presenter.set_filter(field, value);
            Ok(())
        }
        Command::ClearFilters => {
            presenter.clear_filters();
            Ok(())
        }
        Command::Sort(column) => {
            presenter.set_sort(column);
            Ok(())
        }
        Command::ShowIgnored(show) => {
            presenter.set_show_ignored(show);
            Ok(())
        }
        Command::Select {
            action,
            target,
            selected,
        } => {
            match resolve_target(&presenter.view().table, &target) {
                Some(url) => presenter.set_selected(action, url, selected),
                None => println!("No selectable job at {target:?}"),
            }
            Ok(())
        }
        Command::Batch => presenter.batch_process().await,
        Command::Login(credentials) => presenter.login(credentials).await,
        Command::Register(credentials) => presenter.register(credentials).await,
        Command::Logout => presenter.logout().await,
        Command::Session => presenter.check_session().await.map(drop),
        Command::Upload(path) => presenter.upload_resume(path).await,
        Command::Show => return true,
        Command::Help => {
            println!("{HELP}");
            return false;
        }
        Command::Quit => return false,
    };
    if let Err(err) = result {
        tracker_debug!("Command ended with {}", err);
    }
    false
}

/// Maps a row number or URL typed by the user to a job URL in the current table.
pub fn resolve_target(table: &TableView, target: &RowTarget) -> Option<String> {
    match target {
        RowTarget::Row(row) => table.rows.get(row.checked_sub(1)?)?.url.clone(),
        RowTarget::Url(url) => table
            .rows
            .iter()
            .find_map(|row| row.url.as_ref().filter(|candidate| *candidate == url))
            .cloned(),
    }
}

fn draw(presenter: &mut JobListPresenter, force: bool) {
    let dirty = presenter.consume_dirty();
    for notice in presenter.take_notices() {
        println!("{}", render::render_notice(&notice));
    }
    if dirty || force {
        let view = presenter.view();
        print!("{}", render::render_table(&view.table));
        println!("{}", render::render_status(&view));
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn save_if_changed(
    config: &AppConfig,
    presenter: &JobListPresenter,
    saved: PreferencesSnapshot,
) -> PreferencesSnapshot {
    let current = presenter.state().preferences_snapshot();
    if current != saved {
        persistence::save_preferences(&config.state_dir, &current);
    }
    current
}
