use crate::core::engine::render;
use crate::core::session::FilterSession;
use crate::domain::model::{InputKind, OperatorId, OutputFormat, PropertyType};
use crate::domain::ports::DataSource;
use crate::utils::error::{ErrorCategory, FilterError, Result};
use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  properties            list properties
  operators             list operators for the selected property
  property <id> | -     select a property (- clears the filter)
  operator <id> | -     select an operator (- clears it)
  input <value> | -     set the input (comma separated for multi-select;
                        an option containing a comma must be entered alone)
  reset                 clear the filter
  filter                show the current filter
  show                  print the table
  help                  show this help
  quit                  exit
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Properties,
    Operators,
    Property(Option<u64>),
    Operator(Option<OperatorId>),
    Input(Option<String>),
    Reset,
    Filter,
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };
        let cleared = arg.is_empty() || arg == "-";

        let command = match name.to_ascii_lowercase().as_str() {
            "properties" => Command::Properties,
            "operators" => Command::Operators,
            "property" if cleared => Command::Property(None),
            "property" => {
                let id = arg.parse().map_err(|_| FilterError::UnknownProperty {
                    id: arg.to_string(),
                })?;
                Command::Property(Some(id))
            }
            "operator" if cleared => Command::Operator(None),
            "operator" => {
                let id = OperatorId::parse(arg).ok_or_else(|| FilterError::UnknownOperator {
                    id: arg.to_string(),
                })?;
                Command::Operator(Some(id))
            }
            "input" if cleared => Command::Input(None),
            "input" => Command::Input(Some(arg.to_string())),
            "reset" | "clear" => Command::Reset,
            "filter" => Command::Filter,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(FilterError::InvalidInput {
                    value: other.to_string(),
                    reason: "unknown command, type `help`".to_string(),
                })
            }
        };

        Ok(Some(command))
    }
}

/// 逐行讀取指令的互動介面。每次狀態變更後重新輸出表格
pub struct Shell<D: DataSource> {
    session: FilterSession<D>,
    format: OutputFormat,
}

impl<D: DataSource> Shell<D> {
    pub fn new(session: FilterSession<D>, format: OutputFormat) -> Self {
        Self { session, format }
    }

    pub fn session(&self) -> &FilterSession<D> {
        &self.session
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        self.print_table(out)?;

        for line in input.lines() {
            let line = line?;
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(out, "❌ {}", e.user_friendly_message())?;
                    continue;
                }
            };

            if command == Command::Quit {
                break;
            }

            match self.execute(&command, out) {
                Ok(()) => {}
                Err(e) if e.category() == ErrorCategory::Interaction => {
                    tracing::debug!("Command {:?} rejected: {}", command, e);
                    writeln!(out, "❌ {}", e.user_friendly_message())?;
                    writeln!(out, "💡 {}", e.recovery_suggestion())?;
                }
                Err(e) => return Err(e),
            }
        }

        out.flush()?;
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, command: &Command, out: &mut W) -> Result<()> {
        match command {
            Command::Properties => self.print_properties(out),
            Command::Operators => self.print_operators(out),
            Command::Property(id) => {
                self.session.select_property(*id)?;
                if let Some(kind) = self.session.input_kind() {
                    writeln!(out, "Input: {}", describe_input(kind))?;
                }
                self.print_table(out)
            }
            Command::Operator(id) => {
                self.session.select_operator(*id)?;
                self.print_table(out)
            }
            Command::Input(raw) => {
                self.session.enter_input(raw.as_slice())?;
                self.print_table(out)
            }
            Command::Reset => {
                self.session.reset()?;
                self.print_table(out)
            }
            Command::Filter => self.print_filter(out),
            Command::Show => self.print_table(out),
            Command::Help => {
                out.write_all(HELP.as_bytes())?;
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    fn print_properties<W: Write>(&self, out: &mut W) -> Result<()> {
        for property in self.session.properties() {
            write!(
                out,
                "{}: {} ({})",
                property.id,
                property.name,
                property.kind.as_str()
            )?;
            if property.kind == PropertyType::Enumerated {
                write!(out, " [{}]", property.values.join(", "))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn print_operators<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.session.filter().property.is_none() {
            writeln!(out, "Select a property first")?;
            return Ok(());
        }

        for operator in self.session.candidate_operators() {
            writeln!(out, "{}: {}", operator.id, operator.text)?;
        }
        Ok(())
    }

    fn print_filter<W: Write>(&self, out: &mut W) -> Result<()> {
        let filter = self.session.filter();
        writeln!(
            out,
            "property: {}",
            filter
                .property
                .as_ref()
                .map(|p| p.name.as_str())
                .unwrap_or("-")
        )?;
        writeln!(
            out,
            "operator: {}",
            filter.operator.as_ref().map(|o| o.id.as_str()).unwrap_or("-")
        )?;
        writeln!(
            out,
            "input: {}",
            filter
                .input
                .as_ref()
                .map(|i| i.to_string())
                .unwrap_or_else(|| "-".to_string())
        )?;
        Ok(())
    }

    fn print_table<W: Write>(&self, out: &mut W) -> Result<()> {
        let rendered = render(&self.session.table(), self.format)?;
        out.write_all(rendered.as_bytes())?;
        Ok(())
    }
}

fn describe_input(kind: InputKind) -> &'static str {
    match kind {
        InputKind::Number => "a number",
        InputKind::SelectMultiple => "one or more options, comma separated",
        InputKind::Text => "free text",
    }
}
