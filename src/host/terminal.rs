use super::commands::{Command, HELP};
use crate::error::ControllerError;
use crate::lists::SpinListDirectory;
use crate::roster::{ConfirmationGate, ControllerEvent, NameListController, StoreMode};
use crate::wheel;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

/// Line source shared between the command loop and the confirmation prompt.
pub type SharedLines<R> = Arc<Mutex<Lines<R>>>;

pub fn shared_lines<R: AsyncBufRead + Unpin>(reader: R) -> SharedLines<R> {
    Arc::new(Mutex::new(reader.lines()))
}

async fn next_line<R>(lines: &SharedLines<R>) -> Option<String>
where
    R: AsyncBufRead + Unpin,
{
    match lines.lock().await.next_line().await {
        Ok(line) => line,
        Err(e) => {
            warn!("Failed to read input: {}", e);
            None
        }
    }
}

/// Asks y/n on the terminal. End of input counts as "no".
pub struct TerminalConfirm<R> {
    lines: SharedLines<R>,
}

impl<R> TerminalConfirm<R> {
    pub fn new(lines: SharedLines<R>) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl<R> ConfirmationGate for TerminalConfirm<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn confirm(&self, prompt: &str) -> bool {
        println!("{} [y/N]", prompt);
        match next_line(&self.lines).await {
            Some(answer) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }
}

pub struct TerminalHost<R> {
    controller: Arc<NameListController>,
    directory: SpinListDirectory,
    lines: SharedLines<R>,
}

impl<R> TerminalHost<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(
        controller: Arc<NameListController>,
        directory: SpinListDirectory,
        lines: SharedLines<R>,
    ) -> Self {
        Self {
            controller,
            directory,
            lines,
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let printer = tokio::spawn(print_events(self.controller.subscribe()));

        match self.controller.mode() {
            StoreMode::Remote(list_id) => println!("Spin list {}", list_id),
            StoreMode::Ephemeral => println!("Temporary wheel, names are not saved"),
        }
        if let Err(e) = self.controller.load().await {
            println!("Could not load names: {}", e);
        }
        println!("Type `help` for a list of commands");

        while let Some(line) = next_line(&self.lines).await {
            if line.trim().is_empty() {
                continue;
            }
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(message) => {
                    println!("{}", message);
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }
            self.dispatch(command).await;
        }

        self.controller.finish_reveal().await;
        printer.abort();
        Ok(())
    }

    async fn dispatch(&self, command: Command) {
        debug!("Dispatching {:?}", command);
        let result = match command {
            Command::Add(value) => self.controller.add(&value).await.map(|_| ()),
            Command::List => {
                self.print_roster().await;
                Ok(())
            }
            Command::Wheel => {
                let roster = self.controller.roster().await;
                for slice in wheel::slices(&roster) {
                    println!("  [{}] {}", slice.background, slice.label);
                }
                Ok(())
            }
            Command::Sort => self.controller.sort_alphabetically().await,
            Command::Shuffle => self.controller.shuffle().await,
            Command::Spin => match self.controller.draw().await {
                Ok(_) => {
                    println!("Spinning...");
                    self.controller.finish_reveal().await;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Command::Remove => self.controller.remove_outcome_name().await.map(|_| ()),
            Command::Dismiss => {
                self.controller.dismiss_outcome().await;
                Ok(())
            }
            Command::Clear => self.controller.clear_all().await.map(|_| ()),
            Command::Lists => self.directory.list_spin_lists().await.map(|lists| {
                if lists.is_empty() {
                    println!("No saved wheels yet");
                }
                for list in lists {
                    println!("  {}  {} (by {})", list.id, list.title, list.user.username);
                }
            }),
            Command::Users => self.directory.list_users().await.map(|users| {
                for user in users {
                    println!("  {}  {}", user.id, user.username);
                }
            }),
            Command::NewUser(username) => self
                .directory
                .create_user(&username)
                .await
                .map(|user| println!("Created user {} ({})", user.username, user.id)),
            Command::NewList { user_id, title } => self
                .directory
                .create_spin_list(&user_id, &title)
                .await
                .map(|list| {
                    println!("Created wheel {}, reopen with: spinwheel {}", list.title, list.id)
                }),
            Command::Help => {
                println!("{}", HELP);
                Ok(())
            }
            Command::Quit => Ok(()),
        };

        match result {
            Ok(()) => {}
            Err(e) if e.is_silent() => debug!("Ignored: {}", e),
            // Store failures are announced through the event stream.
            Err(ControllerError::Store(_)) => {}
            Err(e) => println!("{}", e),
        }
    }

    async fn print_roster(&self) {
        let roster = self.controller.roster().await;
        if roster.is_empty() {
            println!("No names added yet. Add some names to spin the wheel!");
            return;
        }
        for (index, name) in roster.iter().enumerate() {
            println!("  {:>3}. {}", index + 1, name.value);
        }
    }
}

async fn print_events(mut events: broadcast::Receiver<ControllerEvent>) {
    loop {
        match events.recv().await {
            Ok(ControllerEvent::RosterChanged(names)) => {
                println!("{} name(s) on the wheel", names.len())
            }
            Ok(ControllerEvent::OutcomeRevealed(outcome)) => {
                println!("Congratulations! The wheel has selected: {}", outcome.name.value);
                println!("`remove` to take the name off the wheel, `dismiss` to keep it");
            }
            Ok(ControllerEvent::OutcomeDiscarded { .. }) => {
                println!("The names changed while the wheel was spinning, spin again")
            }
            Ok(ControllerEvent::StoreFailed(message)) => println!("Error: {}", message),
            Ok(ControllerEvent::DrawStarted { .. }) | Ok(ControllerEvent::OutcomeCleared) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("Event printer skipped {} events", skipped)
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::GraphQlClient;
    use crate::roster::{AutoConfirm, EphemeralNameStore};
    use std::time::Duration;
    use tokio::io::BufReader;

    #[tokio::test]
    async fn test_confirm_reads_answer() {
        let lines = shared_lines(BufReader::new(&b"yes\nn\n"[..]));
        let gate = TerminalConfirm::new(lines);

        assert!(gate.confirm("Clear?").await);
        assert!(!gate.confirm("Clear?").await);
        // End of input declines.
        assert!(!gate.confirm("Clear?").await);
    }

    #[tokio::test]
    async fn test_scripted_session() {
        let script = "add Ada\nadd Grace\nadd\nsort\nspin\nremove\nlist\nquit\nadd ignored\n";
        let lines = shared_lines(BufReader::new(script.as_bytes()));
        let controller = Arc::new(NameListController::new(
            Arc::new(EphemeralNameStore::new()),
            Arc::new(AutoConfirm(true)),
            Duration::ZERO,
        ));
        // Nothing listens here; directory commands are not part of the script.
        let directory = SpinListDirectory::new(GraphQlClient::new("http://127.0.0.1:59999"));
        let host = TerminalHost::new(controller.clone(), directory, lines);

        host.run().await.unwrap();

        let roster = controller.roster().await;
        assert_eq!(roster.len(), 1);
        assert!(roster[0].value == "Ada" || roster[0].value == "Grace");
        assert!(controller.outcome().await.is_none());
    }

    #[tokio::test]
    async fn test_clear_prompt_shares_input_with_commands() {
        let script = "add X\nadd Y\nclear\nn\nclear\ny\n";
        let lines = shared_lines(BufReader::new(script.as_bytes()));
        let controller = Arc::new(NameListController::new(
            Arc::new(EphemeralNameStore::new()),
            Arc::new(TerminalConfirm::new(lines.clone())),
            Duration::ZERO,
        ));
        let directory = SpinListDirectory::new(GraphQlClient::new("http://127.0.0.1:59999"));
        let host = TerminalHost::new(controller.clone(), directory, lines);

        host.run().await.unwrap();

        assert!(controller.roster().await.is_empty());
    }
}
