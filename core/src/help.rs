//! Help system for PageGuide commands.

pub fn help_text(topic: Option<&str>) -> String {
    match topic {
        None => overview(),
        Some(t) => {
            if let Some(text) = command_help(t) {
                return text;
            }
            if let Some(text) = group_help(t) {
                return text;
            }
            format!("Unknown help topic: '{}'. Run 'pageguide help' for a list of commands.", t)
        }
    }
}


fn overview() -> String {
    "\
pageguide — drive a page guide over a scene file

Usage: pageguide <scene.yaml> [command...]

Guide commands:
  open                        Open the guide and show the first step
  close                       Close the guide
  toggle                      Press the open button
  refresh                     Re-measure every target
  ready                       Signal that the page finished loading
  status                      Print guide state as JSON
  teardown                    Remove the guide from the page

Step commands:
  next                        Go to the next visible step (wraps)
  back                        Go to the previous visible step (wraps)
  show <index>                Show the step at a 0-based index
  select <overlay>            Show the step bound to an overlay

Welcome commands:
  welcome dismiss             Close the welcome and never show it again
  welcome ignore              Close the welcome for now
  welcome start               Close the welcome and open the guide

Run 'pageguide help <command>' for detailed help on a specific command."
        .into()
}


fn group_help(group: &str) -> Option<String> {
    let text = match group {
        "step" => "\
Step commands — move between visible targets

  next
    Show the next visible step. After the last step comes the first.

  back
    Show the previous visible step. Before the first step comes the last.

  show <index>
    Show the step at a 0-based position among visible targets.

  select <overlay>
    Show the step whose overlay has the given handle.",

        "welcome" => "\
Welcome commands — answer the intro dialog

  welcome dismiss
    Close the dialog and remember the dismissal for this page.

  welcome ignore
    Close the dialog; it shows again next time.

  welcome start
    Close the dialog and open the guide.",

        _ => return None,
    };
    Some(text.into())
}


fn command_help(command: &str) -> Option<String> {
    let text = match command {
        "open" => "pageguide open — open the guide\n\nUsage: pageguide <scene> open",
        "close" => "pageguide close — close the guide\n\nUsage: pageguide <scene> close",
        "toggle" => "pageguide toggle — press the open button\n\nUsage: pageguide <scene> toggle",
        "refresh" => "pageguide refresh — re-measure targets\n\nUsage: pageguide <scene> refresh",
        "ready" => "pageguide ready — finish waiting for the page\n\nUsage: pageguide <scene> ready",
        "status" => "pageguide status — print state\n\nUsage: pageguide <scene> status",
        "teardown" => "pageguide teardown — remove the guide\n\nUsage: pageguide <scene> teardown",
        "next" | "step.next" => "pageguide next — next step\n\nUsage: pageguide <scene> next",
        "back" | "step.back" => "pageguide back — previous step\n\nUsage: pageguide <scene> back",
        "show" | "step.show" => "pageguide show — jump to a step\n\nUsage: pageguide <scene> show <index>",
        "select" | "overlay.select" => "pageguide select — jump to an overlay's step\n\nUsage: pageguide <scene> select <overlay>",
        "help" => "pageguide help — show help\n\nUsage: pageguide help [topic]",
        _ => return None,
    };
    Some(text.into())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_lists_groups() {
        let text = help_text(None);
        assert!(text.contains("Guide commands:"));
        assert!(text.contains("Step commands:"));
        assert!(text.contains("Welcome commands:"));
    }

    #[test]
    fn group_help_step() {
        let text = help_text(Some("step"));
        assert!(text.contains("next"));
        assert!(text.contains("show <index>"));
    }

    #[test]
    fn command_help_accepts_dotted_names() {
        assert_eq!(help_text(Some("show")), help_text(Some("step.show")));
        assert!(help_text(Some("show")).contains("Usage:"));
    }

    #[test]
    fn unknown_topic() {
        let text = help_text(Some("bogus"));
        assert!(text.contains("Unknown help topic"));
    }
}
