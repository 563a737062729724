// ABOUTME: Headless generate command.
// ABOUTME: Runs model, app context, test plan, and script steps in order without the TUI.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use seltest_client::{AppContext, SeltestClient, TestPlan, TestPlanRequest};
use std::path::PathBuf;

use super::{backend_error, client_for, GenerateArgs};
use crate::bridge::test_plan_error_message;
use crate::config::Config;
use crate::download;

pub async fn run(config: &Config, args: GenerateArgs) -> Result<()> {
    let context = app_context(&args)?;
    let requirements = requirements(&args).await?;
    let client = client_for(config)?;

    println!("{}", "Selenium Test Generation".bold());
    println!();

    println!("{} Selecting model...", "[1/4]".dimmed());
    let model = choose_model(&client, config, args.model.as_deref()).await?;
    println!("  Model: {}", model.cyan());

    println!(
        "{} Setting app context for {}...",
        "[2/4]".dimmed(),
        context.url
    );
    let ack = client
        .set_app_context(&context)
        .await
        .map_err(|e| backend_error(e, config))?;
    println!("  Pages: {}", ack.app_context.page_list().join(", "));
    if ack.app_context.has_credentials() {
        println!("  Login: with credentials");
    }

    println!(
        "{} Generating test plan from {}...",
        "[3/4]".dimmed(),
        args.codebase.display()
    );
    let codebase = download::read_codebase(&args.codebase).await?;
    let request = TestPlanRequest {
        requirements,
        codebase,
        model_id: Some(model.clone()),
    };
    let plan = client
        .generate_test_plan(request)
        .await
        .map_err(|e| anyhow::anyhow!(test_plan_error_message(&e)))?;
    print_summary(&plan);

    if args.plan_only {
        let path = download::export_plan(&config.output.dir, &plan, chrono::Local::now()).await?;
        println!();
        println!("{}", "Test plan generated.".green().bold());
        println!("  Exported to: {}", path.display());
        return Ok(());
    }

    println!("{} Generating scripts...", "[4/4]".dimmed());
    let archive = client
        .generate_scripts(&plan.stories(), Some(model.as_str()))
        .await
        .map_err(|e| backend_error(e, config))
        .context("Script generation failed")?;
    let path = download::save_archive(&config.output.dir, &archive).await?;

    println!();
    println!("{}", "Scripts generated.".green().bold());
    println!("  Saved to: {}", path.display());
    Ok(())
}

fn app_context(args: &GenerateArgs) -> Result<AppContext> {
    let context = AppContext {
        url: args.url.trim().to_string(),
        pages: args.pages.trim().to_string(),
        username: args.username.clone().unwrap_or_default(),
        password: args.password.clone().unwrap_or_default(),
    };
    if context.url.is_empty() {
        bail!("--url must not be empty");
    }
    if context.page_list().is_empty() {
        bail!("--pages must name at least one page");
    }
    Ok(context)
}

async fn requirements(args: &GenerateArgs) -> Result<String> {
    match (&args.requirements, &args.requirements_file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => {
            let path: PathBuf = download::expand_home(path);
            tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read requirements from {}", path.display()))
        }
        (None, None) => Ok(String::new()),
    }
}

/// The requested model, else the backend's current one, else the first listed.
async fn choose_model(
    client: &SeltestClient,
    config: &Config,
    requested: Option<&str>,
) -> Result<String> {
    if let Some(id) = requested {
        let ack = client
            .select_model(id)
            .await
            .map_err(|e| backend_error(e, config))?;
        return Ok(ack.selected_model_id);
    }

    if let Ok(id) = client.current_model().await {
        return Ok(id);
    }

    let models = client
        .list_models()
        .await
        .map_err(|e| backend_error(e, config))?;
    let Some(first) = models.first() else {
        bail!("The backend offers no models");
    };
    let ack = client
        .select_model(&first.id)
        .await
        .map_err(|e| backend_error(e, config))?;
    Ok(ack.selected_model_id)
}

fn print_summary(plan: &TestPlan) {
    println!(
        "  {} epics, {} stories",
        plan.epic_count(),
        plan.story_count()
    );
    for epic in &plan.backlog {
        println!("  {} ({})", epic.epic.bold(), epic.stories.len());
        for story in &epic.stories {
            println!("    {} {}", "▸".dimmed(), story.title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn args(codebase: PathBuf) -> GenerateArgs {
        GenerateArgs {
            codebase,
            requirements: Some("Users can log in".to_string()),
            requirements_file: None,
            url: "http://app.test".to_string(),
            pages: "login".to_string(),
            username: None,
            password: None,
            model: Some("claude".to_string()),
            plan_only: false,
        }
    }

    fn config_for(url: &str, out: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.api.base_url = url.to_string();
        config.output.dir = out.to_path_buf();
        config
    }

    async fn mount_backend(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/models/select/"))
            .and(body_json(json!({"model_id": "claude"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Model selected: claude",
                "selected_model_id": "claude"
            })))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/app-context/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "ok",
                "app_context": {"url": "http://app.test", "pages": "login", "username": "", "password": ""}
            })))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/test-plan/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "backlog": [{"epic": "Auth", "description": "", "stories": [
                    {"title": "Login", "description": "", "page": "login",
                     "url": "http://app.test/login", "acceptance_criteria": []}
                ]}]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_full_run_saves_archive() {
        let server = MockServer::start().await;
        mount_backend(&server).await;
        Mock::given(method("POST"))
            .and(path("/scripts/generate/"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![7, 7]))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let codebase = dir.path().join("app.zip");
        std::fs::write(&codebase, [0x50, 0x4B]).unwrap();
        let out = dir.path().join("out");

        run(&config_for(&server.uri(), &out), args(codebase))
            .await
            .unwrap();
        assert_eq!(
            std::fs::read(out.join("selenium_scripts.zip")).unwrap(),
            vec![7, 7]
        );
    }

    #[tokio::test]
    async fn test_plan_only_skips_scripts() {
        let server = MockServer::start().await;
        mount_backend(&server).await;
        Mock::given(method("POST"))
            .and(path("/scripts/generate/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let codebase = dir.path().join("app.zip");
        std::fs::write(&codebase, [0x50, 0x4B]).unwrap();
        let out = dir.path().join("out");

        let mut args = args(codebase);
        args.plan_only = true;
        run(&config_for(&server.uri(), &out), args).await.unwrap();

        let exported: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
        assert_eq!(exported.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_pages_rejected_before_requests() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path().join("app.zip"));
        args.pages = " , ".to_string();
        let err = run(&config_for("http://127.0.0.1:9", dir.path()), args)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("--pages"));
    }

    #[tokio::test]
    async fn test_requirements_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("reqs.txt");
        std::fs::write(&file, "Checkout works").unwrap();
        let mut args = args(dir.path().join("app.zip"));
        args.requirements = None;
        args.requirements_file = Some(file);
        assert_eq!(requirements(&args).await.unwrap(), "Checkout works");
    }

    #[tokio::test]
    async fn test_falls_back_to_first_model() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [{"id": "claude", "name": "Claude"}]
            })))
            .mount(&server)
            .await;
        mount_backend(&server).await;

        let client = SeltestClient::new(&server.uri()).unwrap();
        let config = config_for(&server.uri(), std::path::Path::new("."));
        let model = choose_model(&client, &config, None).await.unwrap();
        assert_eq!(model, "claude");
    }
}
