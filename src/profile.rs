//! The view/session controller: one parallel fetch, one aggregation pass,
//! one report.

use std::fmt::Write as _;

use async_trait::async_trait;
use serde_json::json;

use crate::aggregate::{self, AuditStats, CategoryLevel, MonthXp, PassFail, ProjectXp, Skill};
use crate::error::QueryError;
use crate::graphql::GraphqlClient;
use crate::logging::{json_log, obj, v_num, v_str, Domain};
use crate::model::{
    EventLevel, EventUserEnvelope, ProgressEnvelope, ProgressRecord, Transaction,
    TransactionEnvelope, UserEnvelope, UserInfo,
};
use crate::queries;
use crate::session::Session;
use crate::store::{TokenStore, TOKEN_KEY};

/// Raw rows from one profile fetch, one field per catalog query.
#[derive(Debug, Default, Clone)]
pub struct ProfileData {
    pub user: UserInfo,
    pub xp: Vec<Transaction>,
    pub progress: Vec<ProgressRecord>,
    pub audits: Vec<Transaction>,
    pub skills: Vec<Transaction>,
    pub levels: Vec<EventLevel>,
}

/// Seam between the controller and the wire. Tests drive the controller
/// with canned data through this trait.
#[async_trait]
pub trait ProfileFetcher {
    async fn fetch_profile(&self, session: &Session) -> Result<ProfileData, QueryError>;
}

#[async_trait]
impl ProfileFetcher for GraphqlClient {
    /// All six queries run concurrently; a single failure aborts the batch
    /// and surfaces one error, discarding any partial successes. No retries.
    async fn fetch_profile(&self, session: &Session) -> Result<ProfileData, QueryError> {
        let (user_env, xp_env, progress_env, audit_env, skill_env, event_env) = tokio::try_join!(
            self.execute_as::<UserEnvelope>(session, queries::USER_INFO, json!({})),
            self.execute_as::<TransactionEnvelope>(session, queries::XP_TRANSACTIONS, json!({})),
            self.execute_as::<ProgressEnvelope>(session, queries::PROJECT_PROGRESS, json!({})),
            self.execute_as::<TransactionEnvelope>(session, queries::AUDIT_TRANSACTIONS, json!({})),
            self.execute_as::<TransactionEnvelope>(session, queries::SKILL_TRANSACTIONS, json!({})),
            self.execute_as::<EventUserEnvelope>(session, queries::EVENT_LEVELS, json!({})),
        )?;

        let user = user_env.user.into_iter().next().ok_or(QueryError::NoUser)?;
        Ok(ProfileData {
            user,
            xp: xp_env.transaction,
            progress: progress_env.progress,
            audits: audit_env.transaction,
            skills: skill_env.transaction,
            levels: event_env.event_user,
        })
    }
}

/// Loads the profile, then refuses the result if the stored token no longer
/// matches the session that issued the fetch (logout or re-login landed
/// while the queries were in flight).
pub async fn load_profile(
    fetcher: &dyn ProfileFetcher,
    session: &Session,
    store: &TokenStore,
) -> Result<ProfileData, QueryError> {
    json_log(Domain::Query, "profile_fetch_start", obj(&[]));
    let data = fetcher.fetch_profile(session).await?;

    let stored = store.get(TOKEN_KEY).map_err(|_| QueryError::SessionInvalidated)?;
    if stored.as_deref() != Some(session.token()) {
        json_log(Domain::Session, "stale_fetch_discarded", obj(&[]));
        return Err(QueryError::SessionInvalidated);
    }

    json_log(
        Domain::Query,
        "profile_fetch_done",
        obj(&[
            ("login", v_str(&data.user.login)),
            ("xp_rows", v_num(data.xp.len() as f64)),
            ("progress_rows", v_num(data.progress.len() as f64)),
            ("audit_rows", v_num(data.audits.len() as f64)),
        ]),
    );
    Ok(data)
}

/// Everything the report and the charts read.
#[derive(Debug, Clone)]
pub struct ProfileStats {
    pub login: String,
    pub full_name: String,
    pub email: String,
    pub campus: String,
    pub total_xp: i64,
    pub top_projects: Vec<ProjectXp>,
    pub pass_fail: PassFail,
    pub audits: AuditStats,
    pub top_skills: Vec<Skill>,
    pub levels: Vec<CategoryLevel>,
    pub monthly: Vec<MonthXp>,
    pub cumulative: Vec<i64>,
}

pub fn build_stats(data: &ProfileData, top_projects: usize, top_skills: usize) -> ProfileStats {
    ProfileStats {
        login: data.user.login.clone(),
        full_name: format!("{} {}", data.user.first_name, data.user.last_name)
            .trim()
            .to_string(),
        email: data.user.email.clone(),
        campus: data.user.campus.clone(),
        total_xp: aggregate::total_xp(&data.xp),
        top_projects: aggregate::top_projects(&data.xp, top_projects),
        pass_fail: aggregate::pass_fail(&data.progress),
        audits: aggregate::audit_stats(&data.audits),
        top_skills: aggregate::top_skills(&data.skills, top_skills),
        levels: aggregate::levels_by_category(&data.levels),
        monthly: aggregate::monthly_xp(&data.xp),
        cumulative: aggregate::cumulative_xp(&data.xp),
    }
}

/// Terminal dashboard. Sections mirror the chart set: identity, XP,
/// projects, audits, skills, levels, monthly buckets.
pub fn render_report(stats: &ProfileStats) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {}'s profile", stats.login);
    if !stats.full_name.is_empty() {
        let _ = writeln!(out, "{} <{}>", stats.full_name, stats.email);
    }
    if !stats.campus.is_empty() {
        let _ = writeln!(out, "Campus: {}", stats.campus);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Experience");
    let _ = writeln!(out, "Total XP: {}", stats.total_xp);
    for (i, project) in stats.top_projects.iter().enumerate() {
        let _ = writeln!(out, "- top project #{}: {} ({})", i + 1, project.name, project.amount);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Projects");
    let _ = writeln!(
        out,
        "{} passed, {} failed ({:.1}% pass rate)",
        stats.pass_fail.pass,
        stats.pass_fail.fail,
        stats.pass_fail.rate_pct()
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "## Audits");
    let _ = writeln!(
        out,
        "{} up, {} down ({:.1}% ratio)",
        stats.audits.up,
        stats.audits.down,
        stats.audits.ratio_pct()
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "## Skills");
    if stats.top_skills.is_empty() {
        let _ = writeln!(out, "No skill transactions yet.");
    } else {
        for skill in &stats.top_skills {
            let _ = writeln!(out, "- {}: {}", skill.name, skill.amount);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Levels");
    if stats.levels.is_empty() {
        let _ = writeln!(out, "No event levels recorded.");
    } else {
        for level in &stats.levels {
            let _ = writeln!(out, "- {}: {}", level.category.as_str(), level.level);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## XP by month");
    if stats.monthly.is_empty() {
        let _ = writeln!(out, "No dated XP transactions.");
    } else {
        for bucket in &stats.monthly {
            let _ = writeln!(out, "- {}: {}", bucket.month, bucket.xp);
        }
    }

    out
}
