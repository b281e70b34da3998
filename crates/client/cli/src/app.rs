//! Line-driven client loop.

use anyhow::Result;
use game_core::{Dodge, MoveTo, Position, Rest, Walk};
use runtime::{Event, MessageEvent, Runtime, RuntimeHandle, StepReport, Topic};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::input::{Command, HELP};
use crate::render;

/// Reads commands from stdin and prints the world after each one.
pub struct CliApp {
    runtime: Runtime,
    handle: RuntimeHandle,
    messages: broadcast::Receiver<Event>,
}

impl CliApp {
    pub fn new(runtime: Runtime) -> Self {
        let handle = runtime.handle();
        let messages = handle.subscribe(Topic::Message);
        Self {
            runtime,
            handle,
            messages,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        self.handle.step().await?;
        self.print_frame(&mut stdout).await?;

        while let Some(line) = lines.next_line().await? {
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(error) => {
                    stdout.write_all(format!("{error}\n").as_bytes()).await?;
                    continue;
                }
            };

            if command == Command::Quit {
                break;
            }
            if let Some(output) = self.execute(command).await? {
                stdout.write_all(format!("{output}\n").as_bytes()).await?;
            }
            self.print_frame(&mut stdout).await?;
        }

        info!("client exiting");
        drop(self.handle);
        self.runtime.shutdown().await?;
        Ok(())
    }

    /// Runs one command, returning any text it produces directly.
    async fn execute(&self, command: Command) -> Result<Option<String>> {
        let report = match command {
            Command::Walk(direction) => self.handle.submit(Walk(direction)).await,
            Command::Dodge(direction) => self.handle.submit(Dodge(direction)).await,
            Command::Rest => self.handle.submit(Rest).await,
            Command::Teleport { x, y } => self.handle.submit(MoveTo { x, y }).await,
            Command::Wait => self.handle.step().await,
            Command::Restart => {
                self.handle.reset().await?;
                self.handle.step().await
            }
            Command::Cursor { x, y } => {
                self.handle.set_cursor(Some(Position::new(x, y))).await?;
                return Ok(None);
            }
            Command::ClearCursor => {
                self.handle.set_cursor(None).await?;
                return Ok(None);
            }
            Command::Look => {
                let view = self.handle.query_view().await?;
                return Ok(Some(render::look(&view)));
            }
            Command::Cycle { x, y } => {
                let kind = self.handle.cycle_tile(x, y).await?;
                return Ok(kind.is_none().then(|| format!("No tile at ({x}, {y})")));
            }
            Command::Help => return Ok(Some(HELP.to_string())),
            Command::Quit => return Ok(None),
        };

        match report {
            Ok(StepReport { awaiting: None, turns }) => {
                Ok(Some(format!("{turns} turns passed without you")))
            }
            Ok(_) => Ok(None),
            Err(runtime::RuntimeError::NoPlayer) => Ok(Some("You are dead. Try \"restart\".".into())),
            Err(error) => {
                warn!(%error, "command failed");
                Ok(Some(error.to_string()))
            }
        }
    }

    async fn print_frame(&mut self, stdout: &mut tokio::io::Stdout) -> Result<()> {
        let mut frame = String::new();
        while let Ok(event) = self.messages.try_recv() {
            if let Event::Message(MessageEvent { text, .. }) = event {
                frame.push_str(&text);
                frame.push('\n');
            }
        }

        let view = self.handle.query_view().await?;
        frame.push_str(&render::map(&view));
        frame.push_str(&render::status(&view));
        frame.push_str("\n> ");

        stdout.write_all(frame.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}
