//! Command words — turn `open next show 2 welcome dismiss` into commands.

use pageguide_core::command::Command;


/// Parse a run of command words into the commands they name, in order.
pub fn parse_script(args: &[&str]) -> Result<Vec<Command>, String> {
    let mut commands = Vec::new();
    let mut rest = args;
    while !rest.is_empty() {
        let (cmd, used) = parse_one(rest)?;
        commands.push(cmd);
        rest = &rest[used..];
    }
    Ok(commands)
}


/// Parse the command at the front of `args`. Returns it with the number of
/// words it took.
fn parse_one(args: &[&str]) -> Result<(Command, usize), String> {
    let cmd = match args[0] {
        "status" => Command::Status,
        "open" => Command::Open,
        "close" => Command::Close,
        "toggle" => Command::Toggle,
        "refresh" => Command::Refresh,
        "ready" => Command::Ready,
        "teardown" => Command::Teardown,
        "next" => Command::StepNext,
        "back" | "prev" => Command::StepBack,
        "show" => {
            let index = operand(args, "Usage: pageguide <scene> show <index>")?;
            return Ok((Command::StepShow { index }, 2));
        }
        "select" => {
            let overlay = operand(args, "Usage: pageguide <scene> select <overlay>")?;
            return Ok((Command::OverlaySelect { overlay }, 2));
        }
        "welcome" => return parse_welcome(args).map(|c| (c, 2)),
        "help" => {
            let topic = args.get(1).map(|s| s.to_string());
            let used = if topic.is_some() { 2 } else { 1 };
            return Ok((Command::Help { topic }, used));
        }
        _ => {
            return Err(format!(
                "Unknown command: '{}'. Run 'pageguide help' for usage.",
                args[0]
            ))
        }
    };
    Ok((cmd, 1))
}


fn parse_welcome(args: &[&str]) -> Result<Command, String> {
    match args.get(1) {
        Some(&"dismiss") => Ok(Command::WelcomeDismiss),
        Some(&"ignore") => Ok(Command::WelcomeIgnore),
        Some(&"start") => Ok(Command::WelcomeStart),
        Some(other) => Err(format!("Unknown welcome subcommand: '{}'", other)),
        None => Err("Usage: pageguide <scene> welcome <dismiss|ignore|start>".into()),
    }
}


fn operand<T: std::str::FromStr>(args: &[&str], usage: &str) -> Result<T, String> {
    let raw = args.get(1).ok_or_else(|| usage.to_string())?;
    raw.parse()
        .map_err(|_| format!("'{}' is not a valid number. {}", raw, usage))
}
