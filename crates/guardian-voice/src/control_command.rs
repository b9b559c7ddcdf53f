/// Commands typed on standard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Resume listening after `stop`.
    Start,
    /// Stop listening until `start`.
    Stop,
    /// Print the service status.
    Status,
    /// Shut the service down and exit.
    Quit,
}

impl ControlCommand {
    /// Parse one input line. Case and surrounding whitespace are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "start" => Some(Self::Start),
            "stop" => Some(Self::Stop),
            "status" => Some(Self::Status),
            "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}
