use crate::error::AppError;

pub const HELP: &str = "\
Commands:
  products | p       show the catalog
  cart | c           show the cart
  search <text>      filter by title (`search` alone clears)
  sort               cycle price sort: none, low to high, high to low
  add <id>           add a product to the cart
  inc <id>           one more of a cart item
  dec <id>           one less of a cart item
  remove <id>        drop a cart item
  retry              reload the catalog
  help               this message
  quit | q           exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Products,
    Cart,
    Search(String),
    Sort,
    Add(u32),
    Inc(u32),
    Dec(u32),
    Remove(u32),
    Retry,
    Help,
    Quit,
}

impl Command {
    /// Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, AppError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match name.to_lowercase().as_str() {
            "products" | "p" => Command::Products,
            "cart" | "c" => Command::Cart,
            "search" | "s" => Command::Search(rest.to_string()),
            "sort" => Command::Sort,
            "add" => Command::Add(parse_id("add", rest)?),
            "inc" | "+" => Command::Inc(parse_id("inc", rest)?),
            "dec" | "-" => Command::Dec(parse_id("dec", rest)?),
            "remove" | "rm" => Command::Remove(parse_id("remove", rest)?),
            "retry" => Command::Retry,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => return Err(AppError::UnknownCommand(name.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_id(command: &'static str, input: &str) -> Result<u32, AppError> {
    input
        .trim_start_matches('#')
        .parse()
        .map_err(|_| AppError::MalformedId {
            command,
            input: input.to_string(),
        })
}
