pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod maps;
pub mod new;
pub mod show;

use anyhow::{Context, Result};
use dialoguer::Input;
use elderease_core::board::EventBoard;
use elderease_core::capability::LocationSelection;
use elderease_core::config::ElderEaseConfig;
use elderease_core::form::SubmitContext;
use elderease_core::slot::FileSlot;
use elderease_core::store::EventStore;
use elderease_core::{Coordinates, EventRecord};
use owo_colors::OwoColorize;
use tracing::debug;

use crate::EventArgs;
use crate::input::{parse_date, parse_time};
use crate::terminal::PromptLocationPicker;

pub fn load_store(config: &ElderEaseConfig) -> EventStore<FileSlot> {
    let slot = config.slot();
    debug!(path = %slot.path().display(), "Loading events");
    EventStore::load(slot).with_save_retries(config.save_retries)
}

pub fn load_board(config: &ElderEaseConfig) -> EventBoard<FileSlot> {
    EventBoard::new(load_store(config), SubmitContext::new(&config.created_by))
}

/// Look up an event, listing what exists when the id is unknown.
pub fn find_event<'a>(store: &'a EventStore<FileSlot>, id: &str) -> Result<&'a EventRecord> {
    match store.get(id) {
        Some(event) => Ok(event),
        None => {
            let available: Vec<_> = store.events().iter().map(|e| e.id.as_str()).collect();
            if available.is_empty() {
                anyhow::bail!("Event '{}' not found. There are no events yet.", id);
            }
            anyhow::bail!(
                "Event '{}' not found. Available: {}",
                id,
                available.join(", ")
            );
        }
    }
}

/// Fill the open form from command-line values, prompting for the ones
/// that weren't given when `interactive` is set. Values that are neither
/// given nor prompted for keep what the form already holds.
pub fn fill_form(
    board: &mut EventBoard<FileSlot>,
    args: EventArgs,
    interactive: bool,
) -> Result<()> {
    let EventArgs {
        title,
        description,
        date,
        time,
        location,
        lat,
        lng,
        max_attendees,
    } = args;

    {
        let fields = board
            .form_mut()
            .fields_mut()
            .context("No event form is open")?;

        let title = resolve(title, interactive, || prompt_text("  Title", &fields.title))?;
        if let Some(title) = title {
            fields.title = title;
        }

        if let Some(description) = resolve(description, interactive, || {
            prompt_text("  Description", &fields.description)
        })? {
            fields.description = description;
        }

        fields.date = match date {
            Some(d) => parse_date(&d)?,
            None if interactive => prompt_with_retry("  Date", &fields.date, parse_date)?,
            None => fields.date.clone(),
        };

        fields.time = match time {
            Some(t) => parse_time(&t)?,
            None if interactive => prompt_with_retry("  Time", &fields.time, parse_time)?,
            None => fields.time.clone(),
        };
    }

    let coordinates = lat.zip(lng).map(|(lat, lng)| Coordinates::new(lat, lng));

    match (location, coordinates) {
        (Some(address), coordinates) => {
            board.form_mut().select_location(LocationSelection {
                address,
                coordinates,
            })?;
        }
        (None, Some(coordinates)) => {
            let address = board
                .form()
                .fields()
                .map(|f| f.location.clone())
                .unwrap_or_default();
            board.form_mut().select_location(LocationSelection {
                address,
                coordinates: Some(coordinates),
            })?;
        }
        (None, None) if interactive => {
            board.pick_location(&mut PromptLocationPicker)?;
        }
        (None, None) => {}
    }

    let fields = board
        .form_mut()
        .fields_mut()
        .context("No event form is open")?;

    match max_attendees {
        Some(max) => fields.set_max_attendees(max),
        None if interactive => {
            let max: u32 = Input::new()
                .with_prompt("  Max attendees")
                .default(fields.max_attendees())
                .validate_with(|n: &u32| if *n >= 1 { Ok(()) } else { Err("At least 1") })
                .interact_text()?;
            fields.set_max_attendees(max);
        }
        None => {}
    }

    Ok(())
}

fn resolve<F>(given: Option<String>, interactive: bool, prompt: F) -> Result<Option<String>>
where
    F: FnOnce() -> Result<String>,
{
    match given {
        Some(value) => Ok(Some(value)),
        None if interactive => prompt().map(Some),
        None => Ok(None),
    }
}

/// Free-text prompt, pre-filled with the current value. Blank answers are
/// allowed so the form's own validation can report them.
fn prompt_text(prompt: &str, current: &str) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if !current.is_empty() {
        input = input.with_initial_text(current);
    }
    Ok(input.interact_text()?)
}

/// Prompt until `parse` accepts the answer (or the answer is blank).
fn prompt_with_retry<F>(prompt: &str, current: &str, parse: F) -> Result<String>
where
    F: Fn(&str) -> Result<String>,
{
    loop {
        let raw = prompt_text(prompt, current)?;
        if raw.trim().is_empty() {
            return Ok(String::new());
        }
        match parse(&raw) {
            Ok(value) => return Ok(value),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elderease_core::capability::RecordingNotifier;
    use elderease_core::form::SubmitOutcome;

    fn temp_config(dir: &tempfile::TempDir) -> ElderEaseConfig {
        ElderEaseConfig {
            data_dir: dir.path().to_path_buf(),
            ..ElderEaseConfig::default()
        }
    }

    fn bingo_args() -> EventArgs {
        EventArgs {
            title: Some("Bingo Night".to_string()),
            description: Some("Weekly bingo".to_string()),
            date: Some("2025-06-01".to_string()),
            time: Some("6pm".to_string()),
            location: Some("Community Hall".to_string()),
            ..EventArgs::default()
        }
    }

    fn create(config: &ElderEaseConfig, args: EventArgs) -> String {
        let mut board = load_board(config);
        board.open_create().unwrap();
        fill_form(&mut board, args, false).unwrap();
        match board.submit(&mut RecordingNotifier::default()) {
            Some(SubmitOutcome::Created(id)) => id,
            other => panic!("expected a created event, got {other:?}"),
        }
    }

    // A directory where the temp file should go makes every save fail
    fn block_saves(config: &ElderEaseConfig) {
        std::fs::create_dir_all(config.slot().path().with_extension("json.tmp")).unwrap();
    }

    #[test]
    fn failed_create_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);
        block_saves(&config);

        let err = new::run(&config, bingo_args()).unwrap_err();

        assert_eq!(err.to_string(), "Event was not created");
        assert!(!config.slot().path().exists());
    }

    #[test]
    fn failed_edit_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);
        let id = create(&config, bingo_args());
        block_saves(&config);

        let args = EventArgs {
            title: Some("Bingo Bonanza".to_string()),
            ..EventArgs::default()
        };
        let err = edit::run(&config, &id, args).unwrap_err();

        assert_eq!(err.to_string(), "Event was not updated");
        assert_eq!(find_event(&load_store(&config), &id).unwrap().title, "Bingo Night");
    }

    #[test]
    fn flag_create_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);

        new::run(&config, bingo_args()).unwrap();
        assert_eq!(load_store(&config).len(), 1);
    }

    #[test]
    fn flags_fill_a_new_event() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);

        let id = create(&config, bingo_args());

        let store = load_store(&config);
        let event = find_event(&store, &id).unwrap();
        assert_eq!(event.title, "Bingo Night");
        assert_eq!(event.time, "18:00");
        assert_eq!(event.max_attendees, 50);
        assert_eq!(event.coordinates, None);
        assert!(config.slot().path().exists());
    }

    #[test]
    fn missing_flags_are_reported_not_prompted() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);
        let mut board = load_board(&config);
        let mut notifier = RecordingNotifier::default();

        board.open_create().unwrap();
        let args = EventArgs {
            title: Some("Bingo Night".to_string()),
            ..EventArgs::default()
        };
        fill_form(&mut board, args, false).unwrap();

        assert!(board.submit(&mut notifier).is_none());
        assert_eq!(notifier.notices[0].message, "Please fill in all required fields");
        assert!(!config.slot().path().exists());
    }

    #[test]
    fn edit_flags_only_touch_given_fields() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);
        let id = create(&config, bingo_args());

        let mut board = load_board(&config);
        board.open_edit(&id).unwrap();
        let args = EventArgs {
            max_attendees: Some(30),
            lat: Some(44.98),
            lng: Some(-93.27),
            ..EventArgs::default()
        };
        fill_form(&mut board, args, false).unwrap();
        board.submit(&mut RecordingNotifier::default()).unwrap();

        let store = load_store(&config);
        let event = find_event(&store, &id).unwrap();
        assert_eq!(event.max_attendees, 30);
        assert_eq!(event.title, "Bingo Night");
        assert_eq!(event.location, "Community Hall");
        assert_eq!(event.coordinates, Some(Coordinates::new(44.98, -93.27)));
    }

    #[test]
    fn new_location_without_coordinates_drops_old_ones() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);
        let id = create(
            &config,
            EventArgs {
                lat: Some(44.98),
                lng: Some(-93.27),
                ..bingo_args()
            },
        );

        let mut board = load_board(&config);
        board.open_edit(&id).unwrap();
        let args = EventArgs {
            location: Some("Library".to_string()),
            ..EventArgs::default()
        };
        fill_form(&mut board, args, false).unwrap();
        board.submit(&mut RecordingNotifier::default()).unwrap();

        let store = load_store(&config);
        let event = find_event(&store, &id).unwrap();
        assert_eq!(event.location, "Library");
        assert_eq!(event.coordinates, None);
    }

    #[test]
    fn unknown_id_lists_available_events() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);

        let empty = load_store(&config);
        let err = find_event(&empty, "nope").unwrap_err();
        assert!(err.to_string().contains("no events yet"));

        let id = create(&config, bingo_args());
        let store = load_store(&config);
        let err = find_event(&store, "nope").unwrap_err();
        assert!(err.to_string().contains(&id));
    }
}
