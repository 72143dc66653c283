use anyhow::{Context, Result};
use step_mocker::cli::commands::{MockCommand, ResolveCommand, ValidateCommand};
use step_mocker::cli::output::*;
use step_mocker::cli::{Cli, Command};
use step_mocker::mocker::{resolve_composite_action, resolve_workflow_path};
use step_mocker::{FileSystemStore, MockSpec, StepMocker};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Mock(cmd) => mock_workflow(cmd).await?,
        Command::Validate(cmd) => validate_spec(cmd)?,
        Command::Resolve(cmd) => resolve_paths(cmd).await?,
    }

    Ok(())
}

async fn mock_workflow(cmd: &MockCommand) -> Result<()> {
    let spec = MockSpec::from_file(&cmd.mocks).context("Failed to load mock spec")?;

    println!(
        "{} Loaded {} step identifier(s) from {}",
        INFO,
        style(spec.identifier_count()).cyan(),
        style(cmd.mocks.display()).bold()
    );

    let mocker = StepMocker::new(FileSystemStore::new(), cmd.workflow.clone(), cmd.cwd.clone());

    let plan = match mocker.plan(&spec).await {
        Ok(plan) => plan,
        Err(e) => {
            println!("{} Nothing was written:", CROSS);
            println!("  {}", style(&e).red());
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if plan.workflow().is_reusable() {
        println!("{} {} is a reusable workflow", WARN, style(cmd.workflow.as_str()).bold());
    }

    if cmd.dry_run {
        for (path, contents) in plan.render()? {
            println!("\n{}", format_document(&path, &contents));
        }
        println!("\n{} Dry run: {}", CHECK, format_plan_summary(&plan));
        return Ok(());
    }

    let summary = format_plan_summary(&plan);
    let written = plan
        .commit(mocker.store())
        .await
        .context("Failed to write mocked documents")?;

    for path in &written {
        println!("  {}", style(path.display()).dim());
    }
    println!("{} Mocked {}", CHECK, summary);

    Ok(())
}

fn validate_spec(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating mock spec...", INFO);

    match MockSpec::from_file(&cmd.mocks) {
        Ok(spec) => {
            println!("{} Mock spec is valid!", CHECK);
            println!("  Jobs: {}", style(spec.jobs().count()).cyan());
            println!("  Identifiers: {}", style(spec.identifier_count()).cyan());
            println!("{}", format_spec(&spec));

            if cmd.json {
                let json = serde_json::to_string_pretty(&spec)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    }
}

async fn resolve_paths(cmd: &ResolveCommand) -> Result<()> {
    let store = FileSystemStore::new();
    let workflow_path = resolve_workflow_path(&store, &cmd.cwd, &cmd.workflow).await?;
    println!("{} Workflow: {}", INFO, style(workflow_path.display()).bold());

    if let Some(reference) = &cmd.action {
        let location = resolve_composite_action(&store, &workflow_path, reference).await?;
        println!("{} Action: {}", INFO, style(location.path().display()).bold());
    }

    Ok(())
}
