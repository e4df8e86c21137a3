//! Namika CLI
//!
//! Command-line client for a running Namika API server:
//! - Log in and out as a demo researcher or participant
//! - Browse, inspect and post studies
//! - Apply to studies and review applications
//! - Show dashboards and preferences

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "namika-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Research study marketplace client")]
#[command(long_about = "Namika connects researchers with study participants.\nBrowse studies, apply, and manage applications from the terminal.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://127.0.0.1:8085", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Role {
    Researcher,
    Participant,
}

impl Role {
    fn as_str(&self) -> &'static str {
        match self {
            Role::Researcher => "researcher",
            Role::Participant => "participant",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Switch {
    On,
    Off,
    Toggle,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in (any password is accepted)
    Login {
        email: String,
        #[arg(long = "as", value_enum)]
        role: Role,
        #[arg(short, long, default_value = "")]
        password: String,
    },

    /// Log out
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Register an account (mock, nothing is created)
    Register {
        email: String,
        #[arg(long = "as", value_enum)]
        role: Role,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },

    /// Browse open studies, best paid first
    Browse {
        #[arg(short, long)]
        search: Option<String>,
        /// e.g. "UX Research", "Survey"
        #[arg(short, long)]
        category: Option<String>,
        /// e.g. "Interview", "A/B Test"
        #[arg(short, long)]
        methodology: Option<String>,
        /// remote, in-person or hybrid
        #[arg(short, long)]
        location: Option<String>,
        #[arg(long)]
        min_compensation: Option<f64>,
    },

    /// Show a study
    Show { study_id: String },

    /// Apply to a study as the logged-in participant
    Apply {
        study_id: String,
        #[arg(long)]
        motivation: Option<String>,
        #[arg(long)]
        experience: Option<String>,
        #[arg(long)]
        availability: Option<String>,
    },

    /// Post a study as the logged-in researcher
    CreateStudy {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        methodology: String,
        #[arg(long)]
        compensation: f64,
        #[arg(long)]
        duration: String,
        #[arg(long)]
        participant_limit: u32,
        #[arg(long, default_value = "remote")]
        location: String,
        #[arg(long, default_value = "")]
        deadline: String,
        /// Repeatable
        #[arg(short, long)]
        tag: Vec<String>,
        /// Repeatable; each one becomes a required custom requirement
        #[arg(short, long)]
        requirement: Vec<String>,
    },

    /// List applications of a study or a participant
    Applications {
        #[arg(long, conflicts_with = "participant")]
        study: Option<String>,
        #[arg(long)]
        participant: Option<String>,
    },

    /// Change the status of an application
    SetStatus {
        application_id: String,
        /// pending, approved, rejected or completed
        status: String,
    },

    /// Show the dashboard of the logged-in user
    Dashboard,

    /// Show what opening a page would do
    Navigate { path: String },

    /// Show or change dark mode
    DarkMode {
        #[arg(value_enum)]
        switch: Option<Switch>,
    },

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let api = |path: &str| format!("{}/api/v1{}", cli.api_url, path);

    match cli.command {
        Commands::Login {
            email,
            role,
            password,
        } => {
            let body = json!({"email": email, "password": password, "type": role.as_str()});
            let response = client.post(api("/session/login")).json(&body).send().await?;
            let user = read_json(response).await?;

            if cli.format == "json" {
                print_json(&user)?;
            } else {
                println!(
                    "Logged in as {} {} ({})",
                    user["profile"]["firstName"].as_str().unwrap_or("-"),
                    user["profile"]["lastName"].as_str().unwrap_or("-"),
                    user["type"].as_str().unwrap_or("-")
                );
            }
        }

        Commands::Logout => {
            let response = client.post(api("/session/logout")).send().await?;
            read_json(response).await?;
            println!("Logged out");
        }

        Commands::Whoami => {
            let response = client.get(api("/session")).send().await?;
            let session = read_json(response).await?;

            if cli.format == "json" {
                print_json(&session)?;
            } else if session["user"].is_null() {
                println!("Not logged in");
            } else {
                print_user(&session["user"]);
            }
        }

        Commands::Register {
            email,
            role,
            first_name,
            last_name,
        } => {
            let body = json!({
                "email": email,
                "type": role.as_str(),
                "firstName": first_name,
                "lastName": last_name,
            });
            let response = client.post(api("/session/register")).json(&body).send().await?;
            read_json(response).await?;
            println!("Registration submitted for {}", email);
            println!("Log in with: namika-cli login {} --as {}", email, role.as_str());
        }

        Commands::Browse {
            search,
            category,
            methodology,
            location,
            min_compensation,
        } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(s) = search {
                query.push(("search", s));
            }
            if let Some(c) = category {
                query.push(("category", c));
            }
            if let Some(m) = methodology {
                query.push(("methodology", m));
            }
            if let Some(l) = location {
                query.push(("location", l));
            }
            if let Some(min) = min_compensation {
                query.push(("minCompensation", min.to_string()));
            }

            let response = client.get(api("/studies")).query(&query).send().await?;
            let list = read_json(response).await?;

            if cli.format == "json" {
                print_json(&list)?;
            } else {
                print_studies(&list["studies"]);
            }
        }

        Commands::Show { study_id } => {
            let response = client.get(api(&format!("/studies/{}", study_id))).send().await?;
            let study = read_json(response).await?;

            if cli.format == "json" {
                print_json(&study)?;
            } else {
                print_study(&study);
            }
        }

        Commands::Apply {
            study_id,
            motivation,
            experience,
            availability,
        } => {
            let body = json!({
                "motivation": motivation,
                "experience": experience,
                "availability": availability,
            });
            let response = client
                .post(api(&format!("/studies/{}/applications", study_id)))
                .json(&body)
                .send()
                .await?;
            let application = read_json(response).await?;

            if cli.format == "json" {
                print_json(&application)?;
            } else {
                println!(
                    "Applied to study {} (application {}, {})",
                    study_id,
                    application["id"].as_str().unwrap_or("-"),
                    application["status"].as_str().unwrap_or("-")
                );
            }
        }

        Commands::CreateStudy {
            title,
            description,
            category,
            methodology,
            compensation,
            duration,
            participant_limit,
            location,
            deadline,
            tag,
            requirement,
        } => {
            let requirements: Vec<Value> = requirement
                .iter()
                .map(|r| json!({"type": "custom", "description": r, "required": true}))
                .collect();

            let body = json!({
                "title": title,
                "description": description,
                "category": category,
                "methodology": methodology,
                "compensation": compensation,
                "duration": duration,
                "participantLimit": participant_limit,
                "location": location,
                "deadline": deadline,
                "tags": tag,
                "requirements": requirements,
            });
            let response = client.post(api("/studies")).json(&body).send().await?;
            let study = read_json(response).await?;

            if cli.format == "json" {
                print_json(&study)?;
            } else {
                println!(
                    "Created study {}: {}",
                    study["id"].as_str().unwrap_or("-"),
                    study["title"].as_str().unwrap_or("-")
                );
            }
        }

        Commands::Applications { study, participant } => {
            let path = match (study, participant) {
                (Some(study), _) => format!("/studies/{}/applications", study),
                (None, Some(participant)) => format!("/participants/{}/applications", participant),
                (None, None) => {
                    eprintln!("Pass --study <id> or --participant <id>");
                    std::process::exit(2);
                }
            };

            let response = client.get(api(&path)).send().await?;
            let list = read_json(response).await?;

            if cli.format == "json" {
                print_json(&list)?;
            } else {
                print_applications(&list["applications"]);
            }
        }

        Commands::SetStatus {
            application_id,
            status,
        } => {
            let response = client
                .put(api(&format!("/applications/{}/status", application_id)))
                .json(&json!({"status": status}))
                .send()
                .await?;
            let application = read_json(response).await?;
            println!(
                "Application {} is now {}",
                application_id,
                application["status"].as_str().unwrap_or("-")
            );
        }

        Commands::Dashboard => {
            let response = client.get(api("/session")).send().await?;
            let session = read_json(response).await?;

            let path = match session["user"]["type"].as_str() {
                Some("researcher") => "/dashboard/researcher",
                Some("participant") => "/dashboard/participant",
                _ => {
                    eprintln!("Not logged in. Log in with: namika-cli login <email> --as <role>");
                    std::process::exit(1);
                }
            };

            let response = client.get(api(path)).send().await?;
            let overview = read_json(response).await?;

            if cli.format == "json" {
                print_json(&overview)?;
            } else if path.ends_with("researcher") {
                print_researcher_overview(&overview);
            } else {
                print_participant_overview(&overview);
            }
        }

        Commands::Navigate { path } => {
            let response = client
                .get(api("/navigate"))
                .query(&[("path", path.as_str())])
                .send()
                .await?;
            let decision = read_json(response).await?;

            if cli.format == "json" {
                print_json(&decision)?;
            } else {
                match decision["action"].as_str() {
                    Some("render") => println!(
                        "{} -> render {}",
                        path,
                        decision["route"]["page"].as_str().unwrap_or("-")
                    ),
                    Some("redirect") => println!(
                        "{} -> redirect to {}",
                        path,
                        decision["to"].as_str().unwrap_or("-")
                    ),
                    _ => println!("{} -> loading", path),
                }
            }
        }

        Commands::DarkMode { switch } => {
            let url = api("/preferences/dark-mode");
            let request = match switch {
                None => client.get(&url),
                Some(Switch::On) => client.put(&url).json(&json!({"darkMode": true})),
                Some(Switch::Off) => client.put(&url).json(&json!({"darkMode": false})),
                Some(Switch::Toggle) => client.post(format!("{}/toggle", url)),
            };
            let prefs = read_json(request.send().await?).await?;

            let enabled = prefs["darkMode"].as_bool().unwrap_or(false);
            println!("Dark mode: {}", if enabled { "on" } else { "off" });
        }

        Commands::Status => {
            let response = client
                .get(format!("{}/health", cli.api_url))
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: Value = resp.json().await?;

                    println!("Namika v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!(
                        "Session: {}",
                        health["session"].as_str().unwrap_or("unknown")
                    );
                    println!();
                    println!("Store:");
                    println!("  Studies: {}", health["studies"].as_u64().unwrap_or(0));
                    println!(
                        "  Applications: {}",
                        health["applications"].as_u64().unwrap_or(0)
                    );

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to Namika API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the Namika API server is running:");
                    eprintln!("  cargo run --bin namika");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = namika::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Body of a successful response; exits with the server's message otherwise
async fn read_json(response: reqwest::Response) -> anyhow::Result<Value> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or(text);
        eprintln!("Failed ({}): {}", status, message);
        std::process::exit(1);
    }

    if text.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn str_of<'a>(value: &'a Value, key: &str) -> &'a str {
    value[key].as_str().unwrap_or("-")
}

fn print_user(user: &Value) {
    let profile = &user["profile"];
    println!(
        "{} {} <{}>",
        str_of(profile, "firstName"),
        str_of(profile, "lastName"),
        str_of(user, "email")
    );
    println!("  Type: {}", str_of(user, "type"));
    println!("  ID:   {}", str_of(user, "id"));
    if let Some(company) = profile["companyName"].as_str() {
        println!("  Company: {}", company);
    }
    if let Some(occupation) = profile["occupation"].as_str() {
        println!("  Occupation: {}", occupation);
    }
}

fn print_studies(studies: &Value) {
    let studies = match studies.as_array() {
        Some(s) if !s.is_empty() => s,
        _ => {
            println!("No studies match these filters.");
            return;
        }
    };

    println!(
        "{:<6} {:<42} {:<16} {:<11} {:>8} {:>9}",
        "ID", "Title", "Category", "Location", "Pay", "Spots"
    );
    println!("{}", "-".repeat(97));

    for study in studies {
        let limit = study["participantLimit"].as_u64().unwrap_or(0);
        let current = study["currentApplications"].as_u64().unwrap_or(0);
        println!(
            "{:<6} {:<42} {:<16} {:<11} {:>8} {:>9}",
            str_of(study, "id"),
            truncate(str_of(study, "title"), 40),
            str_of(study, "category"),
            str_of(study, "location"),
            format!("${}", study["compensation"].as_f64().unwrap_or(0.0)),
            format!("{}/{}", current, limit)
        );
    }
}

fn print_study(study: &Value) {
    println!("{}", str_of(study, "title"));
    println!("{}", "=".repeat(str_of(study, "title").len()));
    println!("{}", str_of(study, "description"));
    println!();
    println!("  Category:     {}", str_of(study, "category"));
    println!("  Methodology:  {}", str_of(study, "methodology"));
    println!("  Location:     {}", str_of(study, "location"));
    println!("  Duration:     {}", str_of(study, "duration"));
    println!("  Compensation: ${}", study["compensation"].as_f64().unwrap_or(0.0));
    println!("  Deadline:     {}", str_of(study, "deadline"));
    println!(
        "  Spots left:   {}",
        study["spotsRemaining"].as_u64().unwrap_or(0)
    );

    if let Some(requirements) = study["requirements"].as_array() {
        if !requirements.is_empty() {
            println!();
            println!("Requirements:");
            for r in requirements {
                let marker = if r["required"].as_bool().unwrap_or(true) {
                    "required"
                } else {
                    "preferred"
                };
                println!("  - {} ({})", str_of(r, "description"), marker);
            }
        }
    }

    if study["hasApplied"].as_bool().unwrap_or(false) {
        println!();
        println!("You have applied to this study.");
    }
}

fn print_applications(applications: &Value) {
    let applications = match applications.as_array() {
        Some(a) if !a.is_empty() => a,
        _ => {
            println!("No applications.");
            return;
        }
    };

    println!(
        "{:<38} {:<8} {:<38} {:<10}",
        "ID", "Study", "Participant", "Status"
    );
    println!("{}", "-".repeat(97));

    for application in applications {
        println!(
            "{:<38} {:<8} {:<38} {:<10}",
            str_of(application, "id"),
            str_of(application, "studyId"),
            str_of(application, "participantId"),
            str_of(application, "status")
        );
    }
}

fn print_researcher_overview(overview: &Value) {
    println!(
        "Welcome back, {} ({})",
        str_of(overview, "firstName"),
        str_of(overview, "companyName")
    );
    println!();
    println!("  Active studies:     {}", overview["activeStudies"].as_u64().unwrap_or(0));
    println!(
        "  Total applications: {}",
        overview["totalApplications"].as_u64().unwrap_or(0)
    );
    println!(
        "  Budget spent:       ${}",
        overview["budgetSpent"].as_f64().unwrap_or(0.0)
    );
    println!("  Rating:             {}", overview["rating"].as_f64().unwrap_or(0.0));
    println!();
    println!("Your studies:");
    print_studies(&overview["studies"]);
}

fn print_participant_overview(overview: &Value) {
    println!("Welcome back, {}", str_of(overview, "firstName"));
    println!();
    println!(
        "  Total earnings:    ${}",
        overview["totalEarnings"].as_f64().unwrap_or(0.0)
    );
    println!(
        "  Studies completed: {}",
        overview["studiesCompleted"].as_u64().unwrap_or(0)
    );
    println!("  Rating:            {}", overview["rating"].as_f64().unwrap_or(0.0));
    println!(
        "  Applications:      {} pending, {} approved, {} completed",
        overview["pending"].as_u64().unwrap_or(0),
        overview["approved"].as_u64().unwrap_or(0),
        overview["completed"].as_u64().unwrap_or(0)
    );
    println!();
    println!("Suggested studies:");
    print_studies(&overview["availableStudies"]);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(7260), "2h 1m");
        assert_eq!(format_duration(90000), "1d 1h");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Short", 10), "Short");
        assert_eq!(truncate("Mobile Banking App Usability Study", 12), "Mobile Ba...");
    }

    #[test]
    fn test_cli_parses_browse_filters() {
        let cli = Cli::try_parse_from([
            "namika-cli",
            "browse",
            "--category",
            "UX Research",
            "--min-compensation",
            "100",
        ])
        .unwrap();

        match cli.command {
            Commands::Browse {
                category,
                min_compensation,
                ..
            } => {
                assert_eq!(category.as_deref(), Some("UX Research"));
                assert_eq!(min_compensation, Some(100.0));
            }
            _ => panic!("expected browse"),
        }
        assert_eq!(cli.api_url, "http://127.0.0.1:8085");
    }
}
