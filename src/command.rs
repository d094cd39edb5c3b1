use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Write,
    /// `w <path>`: write to another file and keep editing that one
    WriteAs(PathBuf),
    Quit,
    ForceQuit,
    WriteQuit,
    AddRow,
    AddColumn,
    ToggleHeader,
    Undo,
    Redo,
    NavigateRow(usize), // 1-based on the command line, stored 0-based
    Unknown(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();

        if let Ok(row_dest) = trimmed.parse::<usize>() {
            return Command::NavigateRow(row_dest.saturating_sub(1));
        }

        if let Some(path) = trimmed.strip_prefix("w ") {
            let path = path.trim();
            if !path.is_empty() {
                return Command::WriteAs(PathBuf::from(path));
            }
        }

        match trimmed {
            "w" => Command::Write,
            "q" => Command::Quit,
            "q!" => Command::ForceQuit,
            "wq" | "x" => Command::WriteQuit,
            "addrow" => Command::AddRow,
            "addcol" => Command::AddColumn,
            "header" => Command::ToggleHeader,
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}
