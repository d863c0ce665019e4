//! Runs scenarios: singly by name, or from an interactive menu.

use crate::context::ScenarioContext;
use crate::error::ScenarioError;
use crate::scenarios::Scenario;

/// Menu entries that end the session.
const QUIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

/// Run one scenario under its title.
///
/// Scenario failures are reported on the console and swallowed so a menu
/// session can continue. Console failures (closed input, broken stdout)
/// are returned.
pub async fn run_scenario(
    scenario: &dyn Scenario,
    ctx: &mut ScenarioContext,
) -> Result<(), ScenarioError> {
    ctx.console.title(scenario.title())?;
    tracing::info!(scenario = scenario.name(), "Running scenario");

    match scenario.run(ctx).await {
        Ok(()) => Ok(()),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            tracing::warn!(scenario = scenario.name(), error = %e, "Scenario failed");
            ctx.console.error(&format!("{} failed: {e}", scenario.title()))
        }
    }
}

/// Show a numbered menu and run the selected scenarios until the user
/// quits or input ends.
pub async fn run_menu(
    scenarios: &[Box<dyn Scenario>],
    ctx: &mut ScenarioContext,
) -> Result<(), ScenarioError> {
    loop {
        ctx.console.title("Partner subscription samples")?;
        for (idx, scenario) in scenarios.iter().enumerate() {
            ctx.console
                .write_line(&format!("{:>2}: {}", idx + 1, scenario.title()))?;
        }

        let choice = match ctx
            .console
            .read_optional_string("Enter the number of the scenario to run (q to quit)")
        {
            Ok(line) => line,
            Err(ScenarioError::InputClosed) => return Ok(()),
            Err(e) => return Err(e),
        };

        let choice = choice.trim();
        if choice.is_empty() || QUIT_WORDS.contains(&choice.to_ascii_lowercase().as_str()) {
            return Ok(());
        }

        let Some(scenario) = select(scenarios, choice) else {
            ctx.console
                .error(&format!("'{choice}' is not a scenario number"))?;
            continue;
        };

        match run_scenario(scenario, ctx).await {
            Ok(()) => {}
            Err(ScenarioError::InputClosed) => return Ok(()),
            Err(e) => return Err(e),
        }
    }
}

/// Resolve a 1-based menu number.
fn select<'a>(scenarios: &'a [Box<dyn Scenario>], choice: &str) -> Option<&'a dyn Scenario> {
    let index = choice.parse::<usize>().ok()?.checked_sub(1)?;
    scenarios.get(index).map(|s| s.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios;

    #[test]
    fn select_is_one_based() {
        let all = scenarios::all();
        assert_eq!(select(&all, "1").map(|s| s.name()), Some("get-subscription"));
        assert_eq!(select(&all, "3").map(|s| s.name()), Some("update-scheduled-change"));
        assert!(select(&all, "0").is_none());
        assert!(select(&all, "4").is_none());
        assert!(select(&all, "two").is_none());
    }
}
