//! Interactive session hosting all four forms at once.
//!
//! # Refresh protocol
//! Mutation handlers and the query view are decoupled through an explicit
//! pub/sub channel: a `tokio::sync::watch` carrying a monotonically
//! increasing counter. Every successful create/update/delete bumps the
//! counter; the event loop observes the bump, resets the query panel and
//! issues a fresh `list`. The counter carries no payload.
//!
//! # Timers
//! The auto-refresh poller is a spawned task whose handle is owned by the
//! session and aborted on `watch off` and on every exit path, so a live
//! interval never outlives the session. Success banners are cleared by
//! one-shot sleep tasks feeding the same event channel.

use std::time::Duration;

use item_core::{CreateForm, DeleteForm, QueryPanel, UpdateForm};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::api::Api;
use crate::commands::{print_item, print_items};
use crate::poller::spawn_poller;

/// How long success banners stay up before auto-clearing.
const BANNER_CLEAR_DELAY: Duration = Duration::from_millis(3000);

/// Commands accepted at the session prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Help,
    Quit,
    Status,
    List,
    Show(i64),
    WatchOn(Option<u64>),
    WatchOff,
    Create {
        name: String,
        description: String,
        value: String,
    },
    Load(String),
    Set {
        field: String,
        value: String,
    },
    Submit,
    Reset,
    Remove(String),
    Confirm,
    Cancel,
}

/// Parse one prompt line. Id arguments for `load`/`rm` stay raw so the
/// forms' own validation handles non-numeric input.
pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(String::new());
    };
    let rest: Vec<&str> = words.collect();

    match head {
        "help" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        "status" => Ok(ShellCommand::Status),
        "list" => Ok(ShellCommand::List),
        "show" => match rest.first().map(|s| s.parse()) {
            Some(Ok(id)) => Ok(ShellCommand::Show(id)),
            _ => Err("usage: show <id>".to_string()),
        },
        "watch" => match rest.as_slice() {
            ["on"] => Ok(ShellCommand::WatchOn(None)),
            ["on", ms] => ms
                .parse()
                .map(|ms| ShellCommand::WatchOn(Some(ms)))
                .map_err(|_| "usage: watch on [interval-ms]".to_string()),
            ["off"] => Ok(ShellCommand::WatchOff),
            _ => Err("usage: watch on [interval-ms] | watch off".to_string()),
        },
        "create" => match rest.as_slice() {
            [name, description, value] => Ok(ShellCommand::Create {
                name: (*name).to_string(),
                description: (*description).to_string(),
                value: (*value).to_string(),
            }),
            _ => Err("usage: create <name> <description> <value>".to_string()),
        },
        "load" => match rest.as_slice() {
            [id] => Ok(ShellCommand::Load((*id).to_string())),
            _ => Err("usage: load <id>".to_string()),
        },
        "set" => match rest.split_first() {
            Some((field @ (&"name" | &"description" | &"value"), tail)) if !tail.is_empty() => {
                Ok(ShellCommand::Set {
                    field: (*field).to_string(),
                    value: tail.join(" "),
                })
            }
            _ => Err("usage: set name|description|value <text>".to_string()),
        },
        "submit" => Ok(ShellCommand::Submit),
        "reset" => Ok(ShellCommand::Reset),
        "rm" => match rest.as_slice() {
            [id] => Ok(ShellCommand::Remove((*id).to_string())),
            _ => Err("usage: rm <id>".to_string()),
        },
        "confirm" => Ok(ShellCommand::Confirm),
        "cancel" => Ok(ShellCommand::Cancel),
        other => Err(format!("unknown command '{other}', try 'help'")),
    }
}

const HELP: &str = "\
query view:
  list                  refresh and print the collection
  show <id>             select an item and fetch its detail
  watch on [ms]         poll the collection (default 5000 ms)
  watch off             stop polling
create form:
  create <name> <description> <value>
update form:
  load <id>             fetch the original for editing
  set name|description|value <text>
  submit                send the draft (enabled only when dirty)
  reset                 restore the draft from the original
delete form:
  rm <id>               look the item up for confirmation
  confirm               perform the pending delete
  cancel                drop the pending delete
session:
  status                show the state of every form
  quit                  leave the session";

#[derive(Debug)]
enum Event {
    PollTick,
    ClearUpdateBanner,
    ClearDeleteBanner,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Session {
    api: Api,
    create: CreateForm,
    update: UpdateForm,
    delete: DeleteForm,
    panel: QueryPanel,
    poller: Option<JoinHandle<()>>,
    bus: watch::Sender<u64>,
    events: mpsc::UnboundedSender<Event>,
}

pub async fn run(api: Api) -> std::io::Result<()> {
    let (bus, mut bus_rx) = watch::channel(0u64);
    let (events, mut event_rx) = mpsc::unbounded_channel();
    let mut session = Session {
        api,
        create: CreateForm::new(),
        update: UpdateForm::new(),
        delete: DeleteForm::new(),
        panel: QueryPanel::new(),
        poller: None,
        bus,
        events,
    };

    // Initial mount of the query view.
    session.refresh().await;
    session.render_list();
    println!("type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    None => break,
                    Some(line) => {
                        if session.handle_line(&line).await == Flow::Quit {
                            break;
                        }
                    }
                }
            }
            changed = bus_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                // A mutation succeeded somewhere: full reset + re-fetch.
                session.panel.reset();
                session.refresh().await;
                session.render_list();
            }
            Some(event) = event_rx.recv() => {
                session.handle_event(event).await;
            }
        }
    }

    session.stop_poller();
    Ok(())
}

impl Session {
    async fn refresh(&mut self) {
        self.panel.begin_refresh();
        let result = self.api.list().await;
        self.panel.apply_list(result);
    }

    fn render_list(&self) {
        if let Some(err) = self.panel.error() {
            eprintln!("error: {err}");
            return;
        }
        print_items(self.panel.items());
    }

    /// Signal the query view that a mutation succeeded.
    fn bump_refresh(&self) {
        self.bus.send_modify(|counter| *counter += 1);
    }

    fn schedule_banner_clear(&self, event: fn() -> Event) {
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(BANNER_CLEAR_DELAY).await;
            let _ = events.send(event());
        });
    }

    fn stop_poller(&mut self) {
        if let Some(handle) = self.poller.take() {
            handle.abort();
        }
    }

    async fn handle_event(&mut self, event: Event) {
        match event {
            Event::PollTick => {
                self.refresh().await;
                self.render_list();
            }
            Event::ClearUpdateBanner => self.update.clear_success(),
            Event::ClearDeleteBanner => self.delete.clear_success(),
        }
    }

    async fn handle_line(&mut self, line: &str) -> Flow {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(usage) => {
                if !usage.is_empty() {
                    eprintln!("{usage}");
                }
                return Flow::Continue;
            }
        };

        match command {
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => return Flow::Quit,
            ShellCommand::Status => self.print_status(),
            ShellCommand::List => {
                self.refresh().await;
                self.render_list();
            }
            ShellCommand::Show(id) => {
                let id = self.panel.select(id);
                let result = self.api.get(id).await;
                self.panel.apply_detail(result);
                match self.panel.error() {
                    Some(err) => eprintln!("error: {err}"),
                    None => {
                        if let Some(detail) = self.panel.detail() {
                            print_item(detail);
                        }
                    }
                }
            }
            ShellCommand::WatchOn(interval_ms) => self.watch_on(interval_ms),
            ShellCommand::WatchOff => {
                self.panel.set_auto_refresh(false);
                self.stop_poller();
                println!("auto-refresh off");
            }
            ShellCommand::Create {
                name,
                description,
                value,
            } => self.create_item(&name, &description, &value).await,
            ShellCommand::Load(raw_id) => self.load_for_update(&raw_id).await,
            ShellCommand::Set { field, value } => {
                if self.update.original().is_none() {
                    eprintln!("error: no item loaded, use 'load <id>' first");
                } else {
                    match field.as_str() {
                        "name" => self.update.set_name(&value),
                        "description" => self.update.set_description(&value),
                        _ => self.update.set_value(&value),
                    }
                    let state = if self.update.is_dirty() { "dirty" } else { "clean" };
                    println!("draft is {state}");
                }
            }
            ShellCommand::Submit => self.submit_update().await,
            ShellCommand::Reset => {
                self.update.reset();
                println!("draft restored from the original");
            }
            ShellCommand::Remove(raw_id) => self.load_for_delete(&raw_id).await,
            ShellCommand::Confirm => self.confirm_delete().await,
            ShellCommand::Cancel => {
                self.delete.cancel();
                println!("delete cancelled");
            }
        }
        Flow::Continue
    }

    fn watch_on(&mut self, interval_ms: Option<u64>) {
        if let Some(ms) = interval_ms {
            self.panel.set_refresh_interval(Duration::from_millis(ms));
        }
        self.panel.set_auto_refresh(true);

        // Replace, never stack: at most one live poller per session.
        self.stop_poller();
        let events = self.events.clone();
        self.poller = Some(spawn_poller(self.panel.refresh_interval(), move || {
            let events = events.clone();
            async move {
                let _ = events.send(Event::PollTick);
            }
        }));
        println!(
            "auto-refresh on ({} ms interval)",
            self.panel.refresh_interval().as_millis()
        );
    }

    async fn create_item(&mut self, name: &str, description: &str, value: &str) {
        self.create.set_name(name);
        self.create.set_description(description);
        self.create.set_value(value);

        let payload = match self.create.submit() {
            Ok(payload) => payload,
            Err(e) => {
                eprintln!("error: {e}");
                return;
            }
        };
        let result = self.api.create(&payload).await;
        self.create.apply_submit(result);

        if let Some(err) = self.create.error() {
            eprintln!("error: {err}");
        } else if let Some(item) = self.create.last_created() {
            println!("created:");
            print_item(item);
            self.bump_refresh();
        }
    }

    async fn load_for_update(&mut self, raw_id: &str) {
        self.update.set_id_input(raw_id);
        let id = match self.update.begin_lookup() {
            Ok(id) => id,
            Err(e) => {
                eprintln!("error: {e}");
                return;
            }
        };
        let result = self.api.get(id).await;
        self.update.apply_lookup(id, result);

        match self.update.error() {
            Some(err) => eprintln!("error: {err}"),
            None => {
                println!("loaded for editing:");
                if let Some(original) = self.update.original() {
                    print_item(original);
                }
            }
        }
    }

    async fn submit_update(&mut self) {
        let Some((id, patch)) = self.update.submit() else {
            if self.update.original().is_none() {
                eprintln!("error: no item loaded, use 'load <id>' first");
            } else {
                eprintln!("error: no fields differ from the original, nothing to submit");
            }
            return;
        };
        let result = self.api.update(id, &patch).await;
        self.update.apply_submit(result);

        if let Some(err) = self.update.error() {
            eprintln!("error: {err}");
        } else if self.update.success() {
            println!("item {id} updated");
            self.schedule_banner_clear(|| Event::ClearUpdateBanner);
            self.bump_refresh();
        }
    }

    async fn load_for_delete(&mut self, raw_id: &str) {
        self.delete.set_id_input(raw_id);
        let id = match self.delete.begin_lookup() {
            Ok(id) => id,
            Err(e) => {
                eprintln!("error: {e}");
                return;
            }
        };
        let result = self.api.get(id).await;
        self.delete.apply_lookup(id, result);

        match self.delete.error() {
            Some(err) => eprintln!("error: {err}"),
            None => {
                if let Some(item) = self.delete.pending_item() {
                    println!("pending delete ('confirm' to proceed, 'cancel' to drop):");
                    print_item(item);
                }
            }
        }
    }

    async fn confirm_delete(&mut self) {
        let Some(id) = self.delete.confirm() else {
            eprintln!("error: nothing pending, use 'rm <id>' first");
            return;
        };
        let result = self.api.delete(id).await;
        self.delete.apply_delete(result);

        if let Some(err) = self.delete.error() {
            eprintln!("error: {err}");
        } else if self.delete.success() {
            println!("item {id} deleted");
            self.schedule_banner_clear(|| Event::ClearDeleteBanner);
            self.bump_refresh();
        }
    }

    fn print_status(&self) {
        println!(
            "query:  {} item(s), auto-refresh {}",
            self.panel.items().len(),
            if self.panel.auto_refresh() {
                "on"
            } else {
                "off"
            }
        );
        println!(
            "create: name='{}' description='{}' value={}",
            self.create.name(),
            self.create.description(),
            self.create.value()
        );
        match self.update.original() {
            Some(original) => println!(
                "update: item {} loaded, draft {}{}",
                original.id.map_or("-".to_string(), |id| id.to_string()),
                if self.update.is_dirty() { "dirty" } else { "clean" },
                if self.update.success() {
                    ", last update succeeded"
                } else {
                    ""
                }
            ),
            None => println!("update: idle"),
        }
        match self.delete.pending_item() {
            Some(item) => println!(
                "delete: item {} pending confirmation",
                item.id.map_or("-".to_string(), |id| id.to_string())
            ),
            None => println!(
                "delete: idle{}",
                if self.delete.success() {
                    ", last delete succeeded"
                } else {
                    ""
                }
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_commands() {
        assert_eq!(parse_command("list"), Ok(ShellCommand::List));
        assert_eq!(parse_command("show 7"), Ok(ShellCommand::Show(7)));
        assert_eq!(parse_command("watch on"), Ok(ShellCommand::WatchOn(None)));
        assert_eq!(
            parse_command("watch on 1000"),
            Ok(ShellCommand::WatchOn(Some(1000)))
        );
        assert_eq!(parse_command("watch off"), Ok(ShellCommand::WatchOff));
    }

    #[test]
    fn parses_create_with_three_arguments() {
        assert_eq!(
            parse_command("create gauge pressure 5.5"),
            Ok(ShellCommand::Create {
                name: "gauge".to_string(),
                description: "pressure".to_string(),
                value: "5.5".to_string(),
            })
        );
        assert!(parse_command("create gauge").is_err());
    }

    #[test]
    fn set_joins_multi_word_values() {
        assert_eq!(
            parse_command("set description a longer text"),
            Ok(ShellCommand::Set {
                field: "description".to_string(),
                value: "a longer text".to_string(),
            })
        );
        assert!(parse_command("set flavor x").is_err());
        assert!(parse_command("set name").is_err());
    }

    #[test]
    fn load_and_rm_keep_raw_ids_for_form_validation() {
        assert_eq!(
            parse_command("load abc"),
            Ok(ShellCommand::Load("abc".to_string()))
        );
        assert_eq!(
            parse_command("rm 12"),
            Ok(ShellCommand::Remove("12".to_string()))
        );
    }

    #[test]
    fn show_requires_a_numeric_id() {
        assert!(parse_command("show abc").is_err());
        assert!(parse_command("show").is_err());
    }

    #[test]
    fn blank_lines_and_unknown_commands_are_rejected() {
        assert!(parse_command("   ").is_err());
        assert!(parse_command("frobnicate").is_err());
    }
}
