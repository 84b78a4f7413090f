use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use intervu_config::{ConfigReader, IntervuConfig};
use intervu_domain::{
    Error, InterviewType, LoginForm, Navigation, Route, SignUpForm, paginate_best_answers,
};
use intervu_infra::IntervuInfra;
use intervu_services::{IntervuServices, TurnOutcome};
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::prompt::{ChatEditor, ChatInput, END_COMMAND, Prompt};
use crate::render;

const MSG_LOGIN_HINT: &str = "Your session has expired. Please log in again with `intervu login`.";

pub struct UI {
    infra: Arc<IntervuInfra>,
    services: IntervuServices<IntervuInfra>,
    prompt: Prompt,
}

impl UI {
    pub fn init(cli: &Cli) -> Result<Self> {
        let mut reader = ConfigReader::new();
        if let Some(path) = &cli.config {
            reader = reader.path(path);
        }
        let mut config: IntervuConfig = reader.read().context("Failed to load configuration")?;
        if let Some(base_url) = &cli.base_url {
            config.api.base_url = base_url.clone();
        }
        debug!(base_url = %config.api.base_url, max_turns = config.interview.max_turns, "Configuration loaded");

        let infra = Arc::new(IntervuInfra::new(&config)?);
        let services = IntervuServices::new(infra.clone(), config.interview);
        Ok(Self { infra, services, prompt: Prompt::new() })
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        let result = self.dispatch(command).await;
        if self.infra.navigator().is_at(&Route::Login) {
            eprintln!("{}", MSG_LOGIN_HINT.yellow());
        }
        result
    }

    async fn dispatch(&self, command: Command) -> Result<()> {
        match command {
            Command::Login { username, password } => self.login(username, password).await,
            Command::Signup { username, nickname } => self.sign_up(username, nickname).await,
            Command::Logout => {
                self.services.auth().logout().await?;
                println!("{}", "Logged out.".green());
                Ok(())
            }
            Command::Profile => {
                let profile = self.services.auth().profile().await?;
                println!("{}", render::profile(&profile));
                Ok(())
            }
            Command::Interview { interview_type } => self.interview(interview_type).await,
            Command::Records => {
                let records = self.services.content().records().await?;
                println!("{}", render::records(&records));
                Ok(())
            }
            Command::Record { id } => {
                let record = self
                    .services
                    .content()
                    .record(id)
                    .await?
                    .with_context(|| format!("No interview record with id {id}"))?;
                println!("{}", render::record(&record));
                Ok(())
            }
            Command::Keyword { name } => {
                let results = self.services.content().search(&name).await?;
                println!("{}", format!("References for {name}").bold());
                println!("{}", render::search_results(&results));
                Ok(())
            }
            Command::Study { first, second, title } => self.study(first, second, title).await,
            Command::BestAnswers { category, page } => {
                let answers = self.services.content().best_answers().await?;
                let page = paginate_best_answers(&answers, category.as_deref(), page);
                println!("{}", render::best_answers(&page));
                Ok(())
            }
            Command::Reviews { company } => {
                let reviews = self.services.content().reviews(company).await?;
                println!("{}", render::reviews(&reviews));
                Ok(())
            }
            Command::ClearTokens => {
                self.services.auth().clear_local_tokens().await?;
                println!("{}", "Stored tokens removed.".green());
                Ok(())
            }
        }
    }

    async fn login(&self, username: Option<String>, password: Option<String>) -> Result<()> {
        let username = self.prompt.text_or(username, "Username")?;
        let password = self.prompt.secret_or(password, "Password")?;

        self.services
            .auth()
            .login(&LoginForm::new(username.trim(), password))
            .await?;
        println!("{}", "Logged in.".green());
        Ok(())
    }

    async fn sign_up(&self, username: Option<String>, nickname: Option<String>) -> Result<()> {
        let form = SignUpForm {
            username: self.prompt.text_or(username, "Username")?.trim().to_string(),
            password: self.prompt.secret("Password")?,
            confirm_password: self.prompt.secret("Confirm password")?,
            nickname: self.prompt.text_or(nickname, "Nickname")?.trim().to_string(),
        };

        self.services.auth().sign_up(&form).await?;
        println!("{}", "Account created. You can log in now.".green());
        Ok(())
    }

    async fn study(
        &self,
        first: Option<String>,
        second: Option<String>,
        title: Option<String>,
    ) -> Result<()> {
        let content = self.services.content();
        if let Some(title) = title {
            println!("{}\n", title.bold());
            println!("{}", content.body(&title).await?);
            return Ok(());
        }
        match (first, second) {
            (Some(first), Some(second)) => {
                let contents = content.contents(&first, &second).await?;
                println!("{}", format!("{first} / {second}").bold());
                println!("{}", render::contents(&contents));
            }
            (Some(first), None) => {
                let categories = content.categories().await?;
                let selected: Vec<_> = categories
                    .into_iter()
                    .filter(|category| category.first_category == first)
                    .collect();
                anyhow::ensure!(!selected.is_empty(), "No study category named {first}");
                println!("{}", render::categories(&selected));
            }
            _ => println!("{}", render::categories(&content.categories().await?)),
        }
        Ok(())
    }

    async fn interview(&self, interview_type: InterviewType) -> Result<()> {
        let mut controller = self.services.interview();
        println!("{}", interview_type.title().bold());

        let first = controller.start(interview_type).await.cloned()?;
        println!("{}", render::message(&first));
        println!(
            "{}",
            format!(
                "Answer {} questions. Type {END_COMMAND} to finish early.",
                controller.max_turns()
            )
            .dimmed()
        );

        let mut editor = ChatEditor::new()?;
        let navigation: Navigation = loop {
            let answer = match editor.read()? {
                ChatInput::End => {
                    if !editor.confirm("End the interview now?")? {
                        continue;
                    }
                    match controller.end(true)? {
                        Some(navigation) => break navigation,
                        None => continue,
                    }
                }
                ChatInput::Answer(answer) => answer,
            };

            match controller.send(&answer).await {
                Ok(TurnOutcome::Reply(question)) => {
                    println!("{} {}", "Interviewer:".cyan().bold(), question);
                    println!(
                        "{}",
                        format!("{} answer(s) left", controller.turns_left()).dimmed()
                    );
                }
                Ok(TurnOutcome::Failed { notice, error }) => {
                    debug!(error = %error, "Turn failed");
                    println!("{}", notice.red());
                }
                Ok(TurnOutcome::Concluded(navigation)) => {
                    if let Some(closing) = controller.messages().last().filter(|m| m.is_assistant()) {
                        println!("{}", render::message(closing));
                    }
                    break navigation;
                }
                Err(Error::Validation(message)) => println!("{}", message.yellow()),
                Err(error) => return Err(error.into()),
            }
        };

        self.result(navigation).await
    }

    async fn result(&self, navigation: Navigation) -> Result<()> {
        let state = navigation
            .state
            .context("The interview ended without a session to evaluate")?;
        println!();
        println!("{}", "Evaluating your interview...".dimmed());

        let loader = self.services.evaluation(state.session_id);
        match loader.load().await? {
            Some(report) => println!("{}", render::report(&report)),
            None => debug!("Evaluation was already requested"),
        }
        Ok(())
    }
}

/// Prints `error` the way a person should see it. Library errors carry a
/// friendly message; everything else prints its context chain.
pub fn report_error(error: &anyhow::Error) {
    match error.downcast_ref::<Error>() {
        Some(Error::ReauthenticationRequired) => {}
        Some(domain) => eprintln!("{} {}", "Error:".red().bold(), domain.user_message()),
        None => eprintln!("{} {error:#}", "Error:".red().bold()),
    }
}
