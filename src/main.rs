use std::fs;
use std::io::{self, Write as _};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use xpboard::chart::Frame;
use xpboard::config::Config;
use xpboard::graphql::GraphqlClient;
use xpboard::logging::{json_log, obj, v_str, Domain};
use xpboard::profile::{self, ProfileStats};
use xpboard::session::Session;
use xpboard::store::TokenStore;
use xpboard::svg;

#[derive(Parser)]
#[command(name = "xpboard")]
#[command(about = "Learning-platform profile dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        user: String,
        /// Falls back to XPBOARD_PASSWORD, then an interactive prompt
        #[arg(long)]
        password: Option<String>,
    },
    /// Fetch the profile and print the dashboard report
    Profile,
    /// Fetch the profile and write SVG charts
    Render {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show whether a usable session token is stored
    Status,
    /// Drop the stored session token
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = Config::from_env();
    let store = TokenStore::open(&cfg.store_path).context("open token store")?;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.http_timeout_secs))
        .build()
        .context("build http client")?;

    match cli.command {
        Commands::Login { user, password } => {
            let password = resolve_password(password)?;
            Session::login(&http, &cfg, &store, &user, &password).await?;
            json_log(Domain::Auth, "login", obj(&[("user", v_str(&user))]));
            println!("Signed in as {}.", user);
        }
        Commands::Profile => {
            let session = require_session(&store)?;
            let client = GraphqlClient::new(http, &cfg.base_url);
            let data = profile::load_profile(&client, &session, &store).await?;
            let stats = profile::build_stats(&data, cfg.top_projects, cfg.top_skills);
            print!("{}", profile::render_report(&stats));
        }
        Commands::Render { out } => {
            let session = require_session(&store)?;
            let client = GraphqlClient::new(http, &cfg.base_url);
            let data = profile::load_profile(&client, &session, &store).await?;
            let stats = profile::build_stats(&data, cfg.top_projects, cfg.top_skills);
            let out_dir = out.unwrap_or_else(|| PathBuf::from(&cfg.charts_dir));
            write_charts(&stats, &cfg, &out_dir)?;
        }
        Commands::Status => match Session::restore(&store)? {
            Some(_) => println!("Signed in (stored token has the expected shape)."),
            None => println!("Signed out."),
        },
        Commands::Logout => {
            Session::logout(&store)?;
            json_log(Domain::Session, "logout", obj(&[]));
            println!("Signed out.");
        }
    }

    Ok(())
}

fn resolve_password(arg: Option<String>) -> Result<String> {
    if let Some(password) = arg {
        return Ok(password);
    }
    if let Ok(password) = std::env::var("XPBOARD_PASSWORD") {
        return Ok(password);
    }
    eprint!("password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line).context("read password")?;
    Ok(line.trim_end().to_string())
}

fn require_session(store: &TokenStore) -> Result<Session> {
    Session::restore(store)?.context("no valid session; run `xpboard login` first")
}

fn write_charts(stats: &ProfileStats, cfg: &Config, out_dir: &PathBuf) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create chart dir {}", out_dir.display()))?;
    let frame = Frame::new(cfg.chart_width, cfg.chart_height, cfg.chart_padding);

    let cumulative: Vec<f64> = stats.cumulative.iter().map(|v| *v as f64).collect();
    let charts = [
        ("xp.svg", svg::xp_line_svg(&cumulative, &frame)),
        (
            "projects.svg",
            svg::donut_svg(
                &[
                    ("Pass", stats.pass_fail.pass as f64),
                    ("Fail", stats.pass_fail.fail as f64),
                ],
                &frame,
                "Pass rate",
            ),
        ),
        (
            "audits.svg",
            svg::donut_svg(
                &[
                    ("Up", stats.audits.up as f64),
                    ("Down", stats.audits.down as f64),
                ],
                &frame,
                "Audit ratio",
            ),
        ),
        (
            "skills.svg",
            svg::bars_svg(
                &stats
                    .top_skills
                    .iter()
                    .map(|s| (s.name.as_str(), s.amount as f64))
                    .collect::<Vec<_>>(),
                &frame,
                "Amount",
            ),
        ),
    ];

    for (name, body) in charts {
        let path = out_dir.join(name);
        fs::write(&path, body).with_context(|| format!("write {}", path.display()))?;
        json_log(
            Domain::Render,
            "chart_written",
            obj(&[("path", v_str(&path.display().to_string()))]),
        );
        println!("Wrote {}.", path.display());
    }
    Ok(())
}
