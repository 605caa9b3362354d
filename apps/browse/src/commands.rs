//! Line commands read from stdin, turned into store intents.

use anyhow::{Context, bail};
use gamehub_catalog::launch::find_by_slug;
use gamehub_catalog::{CatalogStore, LaunchError, RenderAdapter};

pub const HELP: &str = "\
commands:
  search [text]     filter by name or category (empty clears)
  category <id>     select a category (`all` for everything)
  page <n>          go to page n
  next | prev       step through pages
  open <id|slug>    launch a game
  fail <id>         mark a thumbnail as broken
  help              show this text
  quit              exit";

/// Which game `open` refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Id(u64),
    Slug(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Category(String),
    Page(usize),
    Next,
    Prev,
    Open(Target),
    Fail(u64),
    Help,
    Quit,
}

/// Whether the input loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "search" | "s" => Command::Search(rest.to_owned()),
            "category" | "c" => {
                if rest.is_empty() {
                    bail!("usage: category <id>");
                }
                Command::Category(rest.to_owned())
            }
            "page" | "p" => Command::Page(
                rest.parse()
                    .with_context(|| format!("invalid page number {rest:?}"))?,
            ),
            "next" | "n" => Command::Next,
            "prev" => Command::Prev,
            "open" | "o" => match rest {
                "" => bail!("usage: open <id|slug>"),
                r => match r.parse::<u64>() {
                    Ok(id) => Command::Open(Target::Id(id)),
                    Err(_) => Command::Open(Target::Slug(r.to_owned())),
                },
            },
            "fail" => Command::Fail(
                rest.parse()
                    .with_context(|| format!("invalid game id {rest:?}"))?,
            ),
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => bail!("unknown command {other:?}, try `help`"),
        };
        Ok(Some(command))
    }

    /// Runs the command against the store.
    pub fn apply<R: RenderAdapter>(self, store: &mut CatalogStore<R>) -> anyhow::Result<Flow> {
        match self {
            Command::Search(query) => store.set_search_query(&query)?,
            Command::Category(id) => store.set_category(&id)?,
            Command::Page(page) => store.set_page(page)?,
            Command::Next => {
                let page = store.view_state().current_page;
                store.set_page(page + 1)?;
            }
            Command::Prev => {
                let page = store.view_state().current_page;
                store.set_page(page.saturating_sub(1))?;
            }
            Command::Open(target) => {
                let id = match target {
                    Target::Id(id) => id,
                    Target::Slug(slug) => find_by_slug(store.games(), &slug)?.id,
                };
                match store.launch(id) {
                    Ok(()) => {}
                    Err(LaunchError::NotLoaded) => return Err(LaunchError::NotLoaded.into()),
                    // Unknown ids are already on screen as a notice.
                    Err(e) => tracing::debug!(id, "launch failed: {e}"),
                }
            }
            Command::Fail(id) => store.mark_thumbnail_failed(id),
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}
