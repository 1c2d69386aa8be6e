//! Interactive session
//!
//! A line-oriented stand-in for the browser UI. Each command becomes an
//! [`Action`] applied to the current [`SessionState`]; a rejected action
//! prints an error and keeps the previous state.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::colorizer::{colorize_preview, highlight_id};
use codeflow::completion::{request_item, CompletionService};
use codeflow::core::{pad_label, summary_line, truncate_label, Database, ExportFormat};
use codeflow::session::{read_uploads, Action, SessionState};

const PROMPT: &str = "> ";
const NAME_WIDTH: usize = 16;
const SUMMARY_WIDTH: usize = 48;

const HELP: &str = "\
Commands:
  prompt <text>             set the prompt for the next item
  name <text>               name the next item (default: Prompt <n>)
  upload <path>...          add files whose contents are sent with the prompt
  remove <file-id>          drop an uploaded file
  files                     list uploaded files
  create                    request a completion and turn it into an item
  items                     list items (* marks placed ones)
  place <item-id>           put an item on the diagram
  connect <source> <target> connect two placed items
  undo                      remove the most recent connection
  reset                     clear the diagram and all items
  nodes                     list placed nodes with their degree
  edges                     list connections
  preview                   show the flow as it will be exported
  format [ext]              show or choose the export format
  download                  write flow-diagram<ext>
  help                      show this help
  quit                      leave the session";

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// One interactive session
pub struct Repl {
    state: SessionState,
    export_dir: PathBuf,
    color: bool,
}

impl Repl {
    pub fn new(state: SessionState, export_dir: PathBuf, color: bool) -> Self {
        Self {
            state,
            export_dir,
            color,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Read commands until `quit` or end of input
    pub async fn run<S, R, W>(&mut self, service: &S, mut input: R, mut out: W) -> Result<()>
    where
        S: CompletionService + ?Sized,
        R: BufRead,
        W: Write,
    {
        writeln!(out, "codeflow session. Type `help` for commands.")?;
        let mut line = String::new();
        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }
            if self.execute(line.trim_end_matches(['\r', '\n']), service, &mut out).await?
                == Outcome::Quit
            {
                break;
            }
        }
        Ok(())
    }

    /// Run one command line
    pub async fn execute<S, W>(&mut self, line: &str, service: &S, out: &mut W) -> Result<Outcome>
    where
        S: CompletionService + ?Sized,
        W: Write,
    {
        let line = line.trim_start();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();
        debug!(command, arg_count = args.len(), "Session command");

        match command {
            "" => {}
            "prompt" => {
                if self.dispatch(Action::SetPrompt(rest.to_string()), out)? {
                    writeln!(out, "Prompt set ({} chars)", rest.chars().count())?;
                }
            }
            "name" => {
                if self.dispatch(Action::SetPromptName(rest.to_string()), out)? {
                    writeln!(out, "Next item will be named {:?}", rest)?;
                }
            }
            "upload" => self.upload(&args, out).await?,
            "remove" => match args.as_slice() {
                [id] => {
                    if self.dispatch(Action::RemoveUploadedFile { id: id.to_string() }, out)? {
                        writeln!(out, "Removed {}", id)?;
                    }
                }
                _ => writeln!(out, "Usage: remove <file-id>")?,
            },
            "files" => self.list_files(out)?,
            "create" => self.create(service, out).await?,
            "items" => self.list_items(out)?,
            "place" => match args.as_slice() {
                [id] => {
                    let action = Action::PlaceItem {
                        item_id: id.to_string(),
                    };
                    if self.dispatch(action, out)? {
                        writeln!(out, "Placed {}", id)?;
                    }
                }
                _ => writeln!(out, "Usage: place <item-id>")?,
            },
            "connect" => match args.as_slice() {
                [source, target] => {
                    let edges_before = self.state.diagram().edge_count();
                    let action = Action::Connect {
                        source: source.to_string(),
                        target: target.to_string(),
                    };
                    if self.dispatch(action, out)? {
                        if self.state.diagram().edge_count() > edges_before {
                            writeln!(out, "Connected {} -> {}", source, target)?;
                        } else {
                            writeln!(out, "{} -> {} is already connected", source, target)?;
                        }
                    }
                }
                _ => writeln!(out, "Usage: connect <source> <target>")?,
            },
            "undo" => {
                if self.state.diagram().edge_count() == 0 {
                    writeln!(out, "Nothing to undo")?;
                } else if self.dispatch(Action::UndoConnection, out)? {
                    writeln!(out, "Removed the last connection")?;
                }
            }
            "reset" => {
                if self.dispatch(Action::Reset, out)? {
                    writeln!(out, "Diagram and items cleared")?;
                }
            }
            "nodes" => self.list_nodes(out)?,
            "edges" => self.list_edges(out)?,
            "preview" => {
                let preview = self.state.preview();
                if preview.is_empty() {
                    writeln!(out, "(preview is empty; connect some nodes)")?;
                } else if self.color {
                    writeln!(out, "{}", colorize_preview(&preview))?;
                } else {
                    writeln!(out, "{}", preview)?;
                }
            }
            "format" => self.format(&args, out)?,
            "download" => self.download(out)?,
            "help" => writeln!(out, "{}", HELP)?,
            "quit" | "exit" => return Ok(Outcome::Quit),
            other => writeln!(out, "Unknown command: {} (type `help`)", other)?,
        }

        Ok(Outcome::Continue)
    }

    /// Apply an action; on rejection print the error and keep the old state
    fn dispatch<W: Write>(&mut self, action: Action, out: &mut W) -> Result<bool> {
        match self.state.apply(action) {
            Ok(next) => {
                self.state = next;
                Ok(true)
            }
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                Ok(false)
            }
        }
    }

    async fn upload<W: Write>(&mut self, args: &[&str], out: &mut W) -> Result<()> {
        if args.is_empty() {
            writeln!(out, "Usage: upload <path>...")?;
            return Ok(());
        }

        let paths: Vec<PathBuf> = args.iter().map(PathBuf::from).collect();
        for (path, result) in paths.iter().zip(read_uploads(&paths).await) {
            match result {
                Ok(upload) => {
                    let name = upload.name.clone();
                    if self.dispatch(upload.into_action(), out)? {
                        let id = self
                            .state
                            .uploaded_files()
                            .last()
                            .map(|file| file.id.as_str())
                            .unwrap_or_default();
                        writeln!(out, "Uploaded {} as {}", name, id)?;
                    }
                }
                Err(e) => writeln!(out, "Error: {} ({})", e, path.display())?,
            }
        }
        Ok(())
    }

    async fn create<S, W>(&mut self, service: &S, out: &mut W) -> Result<()>
    where
        S: CompletionService + ?Sized,
        W: Write,
    {
        writeln!(out, "Requesting completion...")?;
        out.flush()?;

        match request_item(service, self.state.completion_request()).await {
            Ok(action) => {
                if self.dispatch(action, out)? {
                    if let Some(item) = self.state.items().last() {
                        writeln!(
                            out,
                            "Created {}: {}",
                            highlight_id(&item.id, self.color),
                            item.name
                        )?;
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Item not created");
                writeln!(out, "Error fetching completion response: {}", e)?;
            }
        }
        Ok(())
    }

    fn list_files<W: Write>(&self, out: &mut W) -> Result<()> {
        let files = self.state.uploaded_files();
        if files.is_empty() {
            writeln!(out, "No uploaded files")?;
        }
        for file in files {
            writeln!(
                out,
                "  {}  {}  ({} bytes)",
                highlight_id(&file.id, self.color),
                pad_label(&truncate_label(&file.name, NAME_WIDTH), NAME_WIDTH),
                file.content.len()
            )?;
        }
        Ok(())
    }

    fn list_items<W: Write>(&self, out: &mut W) -> Result<()> {
        let items = self.state.items();
        if items.is_empty() {
            writeln!(out, "No items yet; use `prompt` and `create`")?;
        }
        for item in items {
            let placed = if self.state.diagram().has_node(&item.id) {
                '*'
            } else {
                ' '
            };
            writeln!(
                out,
                "{} {}  {}  {}",
                placed,
                highlight_id(&item.id, self.color),
                pad_label(&truncate_label(&item.name, NAME_WIDTH), NAME_WIDTH),
                truncate_label(summary_line(&item.text), SUMMARY_WIDTH)
            )?;
        }
        Ok(())
    }

    fn list_nodes<W: Write>(&self, out: &mut W) -> Result<()> {
        let diagram = self.state.diagram();
        if diagram.node_count() == 0 {
            writeln!(out, "No nodes placed")?;
        }
        for node in diagram.nodes() {
            writeln!(
                out,
                "  {}  {}  degree {}",
                highlight_id(&node.id, self.color),
                pad_label(&truncate_label(&node.label, NAME_WIDTH), NAME_WIDTH),
                diagram.degree(&node.id)
            )?;
        }
        Ok(())
    }

    fn list_edges<W: Write>(&self, out: &mut W) -> Result<()> {
        let diagram = self.state.diagram();
        if diagram.edge_count() == 0 {
            writeln!(out, "No connections")?;
        }
        for edge in diagram.edges() {
            writeln!(out, "  {} -> {}", edge.source, edge.target)?;
        }
        Ok(())
    }

    fn format<W: Write>(&mut self, args: &[&str], out: &mut W) -> Result<()> {
        match args {
            [] => {
                let selected = self.state.selected_format();
                for format in ExportFormat::all() {
                    let marker = if *format == selected { '*' } else { ' ' };
                    writeln!(out, "{} {:<5} {}", marker, format.extension(), format.language())?;
                }
            }
            [name] => match name.parse::<ExportFormat>() {
                Ok(format) => {
                    if self.dispatch(Action::SelectFormat(format), out)? {
                        writeln!(out, "Export format set to {}", format)?;
                    }
                }
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
            _ => writeln!(out, "Usage: format [ext]")?,
        }
        Ok(())
    }

    fn download<W: Write>(&self, out: &mut W) -> Result<()> {
        let export = self.state.export();
        match export.write_to(&self.export_dir) {
            Ok(path) => writeln!(out, "Saved {}", display_path(&path))?,
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
        Ok(())
    }
}

fn display_path(path: &Path) -> String {
    path.strip_prefix(".")
        .unwrap_or(path)
        .display()
        .to_string()
}
