pub const PROMPT: &str = "Enter command (or \"help\" for options): ";

pub const HELP: &str = "\
    list <stateabbr>
       available anytime
       lists all National Sites in a state
       valid inputs: a two-letter state abbreviation
    nearby <result_number>
       available only if there is an active result set
       lists all Places nearby a given result
       valid inputs: an integer 1-len(result_set_size)
    map
       available only if there is an active result set
       displays the current results on a map
    exit
       exits the program
    help
       lists available commands (these instructions)
";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    List(Option<String>),
    Nearby(Option<String>),
    Map,
    Exit,
    Empty,
    Unknown(String),
}

impl Command {
    /// First word selects the command, second (if any) is its argument.
    /// Anything after that is ignored.
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Command::Empty;
        };
        let argument = words.next().map(str::to_string);

        match command {
            "help" => Command::Help,
            "list" => Command::List(argument),
            "nearby" => Command::Nearby(argument),
            "map" => Command::Map,
            "exit" => Command::Exit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("  list mi  "), Command::List(Some("mi".to_string())));
        assert_eq!(Command::parse("list"), Command::List(None));
        assert_eq!(Command::parse("nearby 3 extra"), Command::Nearby(Some("3".to_string())));
        assert_eq!(Command::parse("map"), Command::Map);
        assert_eq!(Command::parse("exit"), Command::Exit);
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(Command::parse("LIST mi"), Command::Unknown("LIST".to_string()));
    }
}
